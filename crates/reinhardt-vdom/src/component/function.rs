//! Component functions.

use std::any::TypeId;
use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use super::{Component, Props, VNode};
use crate::error::BoxError;

/// Values a render function may return.
pub trait IntoRender {
	/// Converts into the rendered tree or the render error.
	fn into_render(self) -> Result<VNode, BoxError>;
}

impl IntoRender for VNode {
	fn into_render(self) -> Result<VNode, BoxError> {
		Ok(self)
	}
}

impl<E> IntoRender for Result<VNode, E>
where
	E: Into<BoxError>,
{
	fn into_render(self) -> Result<VNode, BoxError> {
		self.map_err(Into::into)
	}
}

type RenderFn = Rc<dyn Fn(&Props) -> Result<VNode, BoxError>>;

/// A render function together with its identity.
///
/// Identity is the Rust type of the wrapped function or component, so the
/// same `fn` item or closure expression re-created on every render still
/// counts as the same component, and the reconciler updates it in place.
/// When the function captures values, the instance adopts the new function
/// on every update and re-renders if it is a different one.
///
/// # Example
///
/// ```ignore
/// fn about(_props: &Props) -> VNode {
///     h("h1", (), "About")
/// }
///
/// let about = ComponentFn::new(about);
/// let tree = h(about, Attributes::new().attr("title", "x"), ());
/// ```
#[derive(Clone)]
pub struct ComponentFn {
	id: TypeId,
	name: Cow<'static, str>,
	render: RenderFn,
	/// No captured state: every value of the type renders the same way.
	stateless: bool,
}

impl ComponentFn {
	/// Wraps a render function. The name is derived from its type.
	pub fn new<F, R>(render: F) -> Self
	where
		F: Fn(&Props) -> R + 'static,
		R: IntoRender,
	{
		Self::named(short_type_name::<F>(), render)
	}

	/// Wraps a render function under an explicit name (used in errors and logs).
	pub fn named<F, R>(name: impl Into<Cow<'static, str>>, render: F) -> Self
	where
		F: Fn(&Props) -> R + 'static,
		R: IntoRender,
	{
		Self {
			id: TypeId::of::<F>(),
			name: name.into(),
			render: Rc::new(move |props: &Props| render(props).into_render()),
			stateless: size_of::<F>() == 0,
		}
	}

	/// Adapts a struct implementing [`Component`].
	pub fn from_component<C: Component>(component: C) -> Self {
		let component = Rc::new(component);
		Self {
			id: TypeId::of::<C>(),
			name: Cow::Borrowed(C::name()),
			render: Rc::new(move |props: &Props| component.render(props).into_render()),
			stateless: size_of::<C>() == 0,
		}
	}

	/// Returns the component name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns `true` when both wrap the same function or component type.
	pub fn same_component(&self, other: &Self) -> bool {
		self.id == other.id
	}

	/// Returns `true` when both are guaranteed to render identically.
	pub(crate) fn same_render(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.render, &other.render)
			|| (self.stateless && other.stateless && self.id == other.id)
	}

	pub(crate) fn call(&self, props: &Props) -> Result<VNode, BoxError> {
		(self.render)(props)
	}
}

impl fmt::Debug for ComponentFn {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComponentFn")
			.field("name", &self.name)
			.finish()
	}
}

/// Last path segment of a type name that is not a closure marker.
fn short_type_name<F>() -> Cow<'static, str> {
	let full = std::any::type_name::<F>();
	let name = full
		.split("::")
		.filter(|segment| !segment.starts_with('{'))
		.last()
		.unwrap_or(full);
	Cow::Borrowed(name)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn about(_props: &Props) -> VNode {
		VNode::text("about")
	}

	fn home(_props: &Props) -> VNode {
		VNode::text("home")
	}

	#[rstest]
	fn test_identity_follows_function_type() {
		assert!(ComponentFn::new(about).same_component(&ComponentFn::new(about)));
		assert!(!ComponentFn::new(about).same_component(&ComponentFn::new(home)));
	}

	#[rstest]
	fn test_name_is_derived() {
		assert_eq!(ComponentFn::new(about).name(), "about");
		assert_eq!(ComponentFn::named("About", about).name(), "About");
	}

	struct Greeting {
		greeting: &'static str,
	}

	impl Component for Greeting {
		fn render(&self, props: &Props) -> VNode {
			let name = props.get_str("name").unwrap_or("world");
			VNode::text(format!("{}, {}", self.greeting, name))
		}

		fn name() -> &'static str {
			"Greeting"
		}
	}

	#[rstest]
	fn test_from_component() {
		let greeting = ComponentFn::from_component(Greeting { greeting: "Hello" });
		let other = ComponentFn::from_component(Greeting { greeting: "Hi" });

		let node = greeting.call(&Props::new().with("name", "ada")).unwrap();

		assert_eq!(node.text_content(), Some("Hello, ada"));
		assert_eq!(greeting.name(), "Greeting");
		assert!(greeting.same_component(&other));
		assert!(!greeting.same_component(&ComponentFn::new(about)));
	}

	#[rstest]
	fn test_same_render_tracks_captured_state() {
		let hello = ComponentFn::from_component(Greeting { greeting: "Hello" });
		let hi = ComponentFn::from_component(Greeting { greeting: "Hi" });

		assert!(hello.same_render(&hello.clone()));
		assert!(!hello.same_render(&hi));
		assert!(ComponentFn::new(about).same_render(&ComponentFn::new(about)));
	}

	#[rstest]
	fn test_result_render() {
		let failing = ComponentFn::new(|_: &Props| -> Result<VNode, String> {
			Err("no data".to_string())
		});
		let err = failing.call(&Props::new()).unwrap_err();
		assert_eq!(err.to_string(), "no data");
	}
}
