//! Unified prelude.
//!
//! ```ignore
//! use reinhardt_vdom::prelude::*;
//! ```

pub use std::rc::Rc;

pub use crate::builder::{a, button, div, form, h, h1, h2, input, li, p, span, text, ul};
pub use crate::callback::Callback;
pub use crate::component::{
	Attributes, Component, ComponentFn, FunctionComponent, Key, Mountable, Props, VNode, render,
};
pub use crate::config::RuntimeConfig;
pub use crate::dom::{Container, Event, EventType, HostDocument, MemoryDocument};
pub use crate::error::{RenderError, RouterError};
pub use crate::reactive::{
	use_callback, use_effect, use_effect_with, use_memo, use_mounted, use_ref, use_state,
};
pub use crate::router::{MemoryHistory, NavigationOutcome, RouteParams, Router, link};
pub use crate::{App, debug_log, error_log, info_log, warn_log};
