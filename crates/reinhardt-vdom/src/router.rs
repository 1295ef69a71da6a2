//! Client-side Router
//!
//! Maps location paths to components and swaps the mounted component on
//! navigation.
//!
//! ## Features
//!
//! - **Path patterns**: `/profile/:username` style, compiled with `regex`
//! - **First match wins**: routes are tried in registration order
//! - **History integration**: push/replace entries and follow back/forward
//! - **Guaranteed cleanup**: the previous component is fully unmounted,
//!   effects cleaned up, before the next one mounts
//!
//! ## Example
//!
//! ```ignore
//! use reinhardt_vdom::router::{MemoryHistory, Router, link};
//!
//! let router = Router::new(container, Rc::new(MemoryHistory::new("/about")));
//! router.add_component("/", ComponentFn::new(home))?;
//! router.add_component("/about", ComponentFn::new(about))?;
//! router.start()?; // mounts `about`, never `home`
//! ```

mod core;
mod history;
mod link;
mod params;
mod pattern;

pub use core::{NavigationOutcome, RouteFactory, RouteMatch, Router, WeakRouter};
#[cfg(target_arch = "wasm32")]
pub use history::BrowserHistory;
pub use history::{History, MemoryHistory, PathListener, SubscriptionId};
pub use link::{link, link_with};
pub use params::RouteParams;
pub use pattern::PathPattern;
