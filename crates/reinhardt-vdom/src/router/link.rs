//! Router links.

use super::Router;
use crate::builder::h;
use crate::component::{Attributes, IntoChildren, VNode};
use crate::dom::{Event, EventType};
use crate::error_log;

/// Builds an `<a href=to>` whose clicks navigate through `router` instead of
/// loading a page.
///
/// The handler holds the router weakly, so links rendered by routed
/// components do not keep the router alive.
///
/// # Example
///
/// ```ignore
/// let nav = h("nav", (), (
///     link(&router, "/", "Home"),
///     link(&router, "/profile/joe", "Joe"),
/// ));
/// ```
pub fn link(router: &Router, to: impl Into<String>, children: impl IntoChildren) -> VNode {
	link_with(router, to, Attributes::new(), children)
}

/// Like [`link`], with extra attributes (class, id, ...).
pub fn link_with(
	router: &Router,
	to: impl Into<String>,
	attributes: Attributes,
	children: impl IntoChildren,
) -> VNode {
	let to = to.into();
	let router = router.downgrade();
	let target = to.clone();
	let attributes = attributes.attr("href", to).on(EventType::Click, move |event: Event| {
		event.prevent_default();
		let Some(router) = router.upgrade() else {
			return;
		};
		if let Err(e) = router.navigate(&target) {
			error_log!("Link: navigation to {} failed: {}", target, e);
		}
	});
	h("a", attributes, children)
}
