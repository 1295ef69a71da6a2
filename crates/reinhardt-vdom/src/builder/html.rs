//! HTML Element Helpers
//!
//! One function per common tag, each a shorthand for [`h`](super::h) with
//! that tag.

use crate::component::{Attributes, IntoChildren, VNode};

/// Macro for defining HTML element helpers
macro_rules! define_element {
	($(#[$meta:meta])* $name:ident, $tag:literal) => {
		$(#[$meta])*
		pub fn $name(attributes: impl Into<Attributes>, children: impl IntoChildren) -> VNode {
			super::h($tag, attributes, children)
		}
	};
}

define_element!(
	/// Create a `<div>` element
	///
	/// ## Example
	///
	/// ```ignore
	/// let container = div(Attributes::new().class("container"), p((), "Content"));
	/// ```
	div, "div"
);

define_element!(
	/// Create a `<span>` element
	span, "span"
);

define_element!(
	/// Create a `<p>` element (paragraph)
	p, "p"
);

define_element!(
	/// Create a `<button>` element
	///
	/// ## Example
	///
	/// ```ignore
	/// let button = button(Attributes::new().on_click(|| save()), "Save");
	/// ```
	button, "button"
);

define_element!(
	/// Create an `<a>` element. See [`link`](crate::router::link) for router links.
	a, "a"
);

define_element!(
	/// Create a `<ul>` element
	ul, "ul"
);

define_element!(
	/// Create an `<li>` element
	///
	/// ## Example
	///
	/// ```ignore
	/// let rows = items
	///     .iter()
	///     .map(|item| li(Attributes::new().key(item.id), item.label.clone()))
	///     .collect::<Vec<_>>();
	/// let list = ul((), rows);
	/// ```
	li, "li"
);

define_element!(
	/// Create an `<h1>` element
	h1, "h1"
);

define_element!(
	/// Create an `<h2>` element
	h2, "h2"
);

define_element!(
	/// Create an `<input>` element
	///
	/// ## Example
	///
	/// ```ignore
	/// let field = input(
	///     Attributes::new()
	///         .attr("type", "text")
	///         .on(EventType::Input, move |e: Event| set_name.set(e.value().unwrap_or_default().to_string())),
	///     (),
	/// );
	/// ```
	input, "input"
);

define_element!(
	/// Create a `<form>` element
	form, "form"
);

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(div((), ()), "div")]
	#[case(span((), ()), "span")]
	#[case(p((), ()), "p")]
	#[case(button((), ()), "button")]
	#[case(a((), ()), "a")]
	#[case(ul((), ()), "ul")]
	#[case(li((), ()), "li")]
	#[case(h1((), ()), "h1")]
	#[case(h2((), ()), "h2")]
	#[case(input((), ()), "input")]
	#[case(form((), ()), "form")]
	fn test_helpers_use_their_tag(#[case] node: VNode, #[case] tag: &str) {
		assert_eq!(node.tag(), Some(tag));
	}
}
