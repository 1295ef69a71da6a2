//! In-memory history.

use std::cell::{Cell, RefCell};
use std::fmt;

use super::{History, PathListener, SubscriptionId};

/// A history kept in memory, for native targets and tests.
///
/// # Example
///
/// ```ignore
/// let history = Rc::new(MemoryHistory::new("/"));
/// let router = Router::new(container, history.clone());
/// router.navigate("/about")?;
/// history.back(); // router resolves "/" again
/// ```
pub struct MemoryHistory {
	entries: RefCell<Vec<String>>,
	index: Cell<usize>,
	listeners: RefCell<Vec<(SubscriptionId, PathListener)>>,
	next_id: Cell<u64>,
}

impl MemoryHistory {
	/// Creates a history with a single entry.
	pub fn new(initial: impl Into<String>) -> Self {
		Self {
			entries: RefCell::new(vec![initial.into()]),
			index: Cell::new(0),
			listeners: RefCell::new(Vec::new()),
			next_id: Cell::new(0),
		}
	}

	/// Moves one entry back. Returns `false` at the first entry.
	pub fn back(&self) -> bool {
		self.go(-1)
	}

	/// Moves one entry forward. Returns `false` at the last entry.
	pub fn forward(&self) -> bool {
		self.go(1)
	}

	/// Moves by `delta` entries and notifies subscribers.
	///
	/// Returns `false`, without notifying, when the target is out of range.
	pub fn go(&self, delta: isize) -> bool {
		let Some(target) = self.index.get().checked_add_signed(delta) else {
			return false;
		};
		let path = match self.entries.borrow().get(target) {
			Some(path) => path.clone(),
			None => return false,
		};
		self.index.set(target);
		self.notify(&path);
		true
	}

	/// Returns a copy of every entry.
	pub fn entries(&self) -> Vec<String> {
		self.entries.borrow().clone()
	}

	/// Returns the position of the current entry.
	pub fn index(&self) -> usize {
		self.index.get()
	}

	/// Returns the number of registered listeners.
	pub fn listener_count(&self) -> usize {
		self.listeners.borrow().len()
	}

	fn notify(&self, path: &str) {
		// Listeners may subscribe or unsubscribe while being notified.
		let listeners: Vec<PathListener> = self
			.listeners
			.borrow()
			.iter()
			.map(|(_, listener)| listener.clone())
			.collect();
		for listener in listeners {
			listener(path);
		}
	}
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new("/")
	}
}

impl History for MemoryHistory {
	fn current_path(&self) -> String {
		self.entries
			.borrow()
			.get(self.index.get())
			.cloned()
			.unwrap_or_else(|| "/".to_string())
	}

	fn push(&self, path: &str) {
		let mut entries = self.entries.borrow_mut();
		let next = self.index.get() + 1;
		entries.truncate(next);
		entries.push(path.to_string());
		self.index.set(next);
	}

	fn replace(&self, path: &str) {
		if let Some(entry) = self.entries.borrow_mut().get_mut(self.index.get()) {
			*entry = path.to_string();
		}
	}

	fn subscribe(&self, listener: PathListener) -> SubscriptionId {
		let id = SubscriptionId::new(self.next_id.get());
		self.next_id.set(self.next_id.get() + 1);
		self.listeners.borrow_mut().push((id, listener));
		id
	}

	fn unsubscribe(&self, id: SubscriptionId) {
		self.listeners.borrow_mut().retain(|(existing, _)| *existing != id);
	}
}

impl fmt::Debug for MemoryHistory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemoryHistory")
			.field("entries", &self.entries.borrow())
			.field("index", &self.index.get())
			.field("listeners", &self.listener_count())
			.finish()
	}
}
