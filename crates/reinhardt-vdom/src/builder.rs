//! Tree Builder API
//!
//! Descriptors are plain values. [`h`] is the general constructor; the
//! [`html`] helpers cover the common tags.
//!
//! ## Example
//!
//! ```ignore
//! use reinhardt_vdom::builder::{h, html::{button, li, ul}};
//! use reinhardt_vdom::{Attributes, use_state};
//!
//! let (count, set_count) = use_state(0);
//!
//! let tree = h("div", Attributes::new().class("counter"), (
//!     button(Attributes::new().on_click(move || set_count.update(|n| n + 1)), "Increment"),
//!     ul((), items.iter().map(|item| li(Attributes::new().key(item.id), item.name.clone())).collect::<Vec<_>>()),
//!     count,
//! ));
//! ```

pub mod html;

use std::borrow::Cow;

use crate::component::{Attributes, IntoChildren, VNode, VNodeKind};

pub use html::*;

/// Builds a descriptor.
///
/// `kind` is a tag name or a [`ComponentFn`](crate::ComponentFn). `attributes`
/// accepts `()` for none. `children` accepts anything implementing
/// [`IntoChildren`]: descriptors, strings, numbers, `Option`, `Vec`, arrays
/// and tuples.
///
/// # Example
///
/// ```ignore
/// let item = h("li", Attributes::new().key(7).class("row"), ("#", 7));
/// let profile = h(ComponentFn::new(profile), Attributes::new().attr("user", "joe"), ());
/// ```
pub fn h(
	kind: impl Into<VNodeKind>,
	attributes: impl Into<Attributes>,
	children: impl IntoChildren,
) -> VNode {
	VNode::new(kind)
		.with_attributes(attributes.into())
		.with_children(children)
}

/// Builds a text descriptor.
pub fn text(content: impl Into<Cow<'static, str>>) -> VNode {
	VNode::text(content)
}
