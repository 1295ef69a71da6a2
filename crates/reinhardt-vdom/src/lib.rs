//! Reinhardt VDOM - Declarative Component Runtime
//!
//! Renders declarative component trees into a mutable host document and keeps
//! the host tree in sync with application state across re-renders.
//!
//! ## Features
//!
//! - **VNode descriptors**: immutable trees built with [`h`] and the tag helpers
//! - **Reconciliation**: keyed diff/patch that applies the minimal host mutations
//! - **Hooks**: `use_state`, `use_effect`, `use_memo`, `use_callback`, `use_ref`
//! - **Lifecycle**: explicit mount/unmount with guaranteed effect cleanup
//! - **Batching**: setters queue re-renders; one render per instance per batch
//! - **Router**: path patterns, history integration and cleanup on navigation
//!
//! ## Architecture
//!
//! - [`dom`]: host abstraction (`HostDocument`, `MemoryDocument`, `WebDocument`)
//! - [`component`]: descriptors, props, component functions, mounting
//! - [`builder`]: descriptor constructors
//! - [`reconcile`]: the diff/patch engine
//! - [`reactive`]: hook slots, render scope and the update scheduler
//! - [`router`]: client-side routing
//! - [`app`]: application shell
//!
//! ## Example
//!
//! ```ignore
//! use reinhardt_vdom::prelude::*;
//!
//! fn counter(_props: &Props) -> VNode {
//!     let (count, set_count) = use_state(0);
//!     use_effect_with((count,), move || {
//!         info_log!("count is now {}", count);
//!     });
//!     div((), (
//!         p((), ("Count: ", count)),
//!         button(Attributes::new().on_click(move || set_count.update(|n| n + 1)), "Increment"),
//!     ))
//! }
//!
//! let doc = Rc::new(MemoryDocument::new());
//! let app = doc.create_container("app");
//! let container = Container::new(doc.clone(), app);
//! FunctionComponent::new(counter).mount(&container)?;
//! ```

#![warn(missing_docs)]

// Core modules
pub mod builder;
pub mod callback;
pub mod config;
pub mod dom;
pub mod error;
pub mod logging;
pub mod reactive;
pub mod reconcile;

// Component system
pub mod component;

// Client-side routing
pub mod router;

// Application shell
pub mod app;

// Unified prelude for simplified imports
pub mod prelude;

#[doc(hidden)]
pub mod __private {
	pub use tracing;
}

// Re-export commonly used types
pub use app::App;
pub use builder::{a, button, div, form, h, h1, h2, input, li, p, span, text, ul};
pub use callback::{Callback, IntoEventHandler};
pub use component::{
	AttrValue, Attributes, Component, ComponentFn, FunctionComponent, IntoChildren, IntoRender,
	Key, LifecycleState, Mountable, Props, VNode, VNodeKind, render,
};
pub use config::RuntimeConfig;
#[cfg(target_arch = "wasm32")]
pub use dom::WebDocument;
pub use dom::{Container, Event, EventType, HostDocument, MemoryDocument, NodeId};
pub use error::{
	ConfigurationError, HookMisuseError, HostError, LifecycleError, RenderError, RouterError,
};
// Re-export Hooks API
pub use reactive::{
	MountedFlag, Ref, Scheduler, SetState, TearDown, is_rendering, use_callback, use_effect,
	use_effect_with, use_memo, use_mounted, use_ref, use_state,
};
pub use reconcile::{Patched, Reconciler};
#[cfg(target_arch = "wasm32")]
pub use router::BrowserHistory;
pub use router::{
	History, MemoryHistory, NavigationOutcome, PathPattern, RouteParams, Router, link,
};

// Logging macros are automatically exported via #[macro_export]
// Users can access them as: reinhardt_vdom::debug_log!, reinhardt_vdom::info_log!, etc.

/// Installs a panic hook that forwards panic messages to the browser console.
#[cfg(all(target_arch = "wasm32", feature = "console_error_panic_hook"))]
pub fn set_panic_hook() {
	console_error_panic_hook::set_once();
}
