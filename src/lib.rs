//! # Reinhardt SPA
//!
//! Single-page application runtime for Reinhardt.
//!
//! This crate is a facade over [`reinhardt_vdom`], which renders declarative
//! component trees into a host document, keeps them in sync with hook state
//! and swaps routed components on navigation.
//!
//! ## Feature Flags
//!
//! - `debug-hooks` - Emit `debug_log!` output from hook and reconciler internals
//! - `console_error_panic_hook` - Forward panics to the browser console (wasm32)
//! - `web-sys-full` - Enable the full set of `web-sys` bindings used by the browser host
//!
//! ## Example
//!
//! ```rust,ignore
//! use reinhardt_spa::prelude::*;
//!
//! fn home(_props: &Props) -> VNode {
//!     h1((), "Home")
//! }
//!
//! let app = App::new(host, history, RuntimeConfig::default())?;
//! app.route("/", ComponentFn::new(home))?;
//! app.start()?;
//! ```

pub use reinhardt_vdom as vdom;

/// Convenience re-exports for application code.
pub mod prelude {
	pub use reinhardt_vdom::prelude::*;
}
