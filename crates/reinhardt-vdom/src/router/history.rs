//! Session history backends.
//!
//! The router reads the current path from a [`History`], pushes entries on
//! navigation and subscribes to back/forward moves. [`MemoryHistory`] keeps
//! the entries in memory; [`BrowserHistory`] (wasm32 only) drives the
//! browser's History API and listens for `popstate`.

#[cfg(target_arch = "wasm32")]
mod browser;
mod memory;

use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserHistory;
pub use memory::MemoryHistory;

/// Listener notified with the new path after a back/forward move.
pub type PathListener = Rc<dyn Fn(&str)>;

/// Handle returned by [`History::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
	pub(crate) fn new(raw: u64) -> Self {
		Self(raw)
	}
}

/// A session history.
///
/// `push` and `replace` never notify subscribers; only moves the user makes
/// (back, forward) do.
pub trait History {
	/// The current location path, possibly with a query string.
	fn current_path(&self) -> String;

	/// Adds an entry after the current one, dropping any forward entries.
	fn push(&self, path: &str);

	/// Replaces the current entry.
	fn replace(&self, path: &str);

	/// Registers a back/forward listener.
	fn subscribe(&self, listener: PathListener) -> SubscriptionId;

	/// Removes a listener. Unknown ids are ignored.
	fn unsubscribe(&self, id: SubscriptionId);
}
