//! Component trait definition.

use super::{Props, VNode};

/// Trait for struct-based components.
///
/// An alternative to plain render functions for components that carry
/// configuration of their own. Hooks work the same inside `render`. Adapt an
/// implementor with [`ComponentFn::from_component`](super::ComponentFn::from_component).
///
/// # Example
///
/// ```ignore
/// use reinhardt_vdom::{Component, ComponentFn, Props, VNode, h, use_state};
///
/// struct Greeting {
///     greeting: &'static str,
/// }
///
/// impl Component for Greeting {
///     fn render(&self, props: &Props) -> VNode {
///         let name = props.get_str("name").unwrap_or("world");
///         h("p", (), (self.greeting, ", ", name.to_string()))
///     }
///
///     fn name() -> &'static str {
///         "Greeting"
///     }
/// }
///
/// let greeting = ComponentFn::from_component(Greeting { greeting: "Hello" });
/// ```
pub trait Component: 'static {
	/// Renders the component.
	fn render(&self, props: &Props) -> VNode;

	/// Returns the component's name for errors and logs.
	fn name() -> &'static str
	where
		Self: Sized;
}
