//! Properties passed to a component's render function.

use std::borrow::Cow;
use std::rc::Rc;

use super::{AttrValue, Attributes, Key, VNode};

/// Props of a component: the attributes it was given plus its child
/// descriptors.
///
/// A child component re-renders during its parent's reconciliation only
/// when its props compare unequal to the previous ones.
///
/// # Example
///
/// ```ignore
/// fn greeting(props: &Props) -> VNode {
///     let name = props.get_str("name").unwrap_or("stranger");
///     h("p", (), ("Hello, ", name.to_string(), "!"))
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props {
	attributes: Attributes,
	children: Vec<VNode>,
}

impl Props {
	/// Creates empty props.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates props from an attribute bag and children.
	pub fn from_parts(attributes: Attributes, children: Vec<VNode>) -> Self {
		Self {
			attributes,
			children,
		}
	}

	/// Adds a value, builder style.
	pub fn with(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<AttrValue>) -> Self {
		self.attributes = self.attributes.attr(name, value);
		self
	}

	/// Returns a raw value.
	pub fn get(&self, name: &str) -> Option<&AttrValue> {
		self.attributes.get(name)
	}

	/// Returns a string value.
	pub fn get_str(&self, name: &str) -> Option<&str> {
		self.get(name).and_then(AttrValue::as_str)
	}

	/// Returns an integer value.
	pub fn get_int(&self, name: &str) -> Option<i64> {
		self.get(name).and_then(AttrValue::as_int)
	}

	/// Returns a boolean value.
	pub fn get_bool(&self, name: &str) -> Option<bool> {
		self.get(name).and_then(AttrValue::as_bool)
	}

	/// Returns a value set with [`Attributes::prop`].
	pub fn get_any<T: 'static>(&self, name: &str) -> Option<Rc<T>> {
		self.get(name).and_then(AttrValue::downcast::<T>)
	}

	/// Returns the key the component was created with.
	pub fn key(&self) -> Option<&Key> {
		self.attributes.get_key()
	}

	/// Returns the full attribute bag.
	pub fn attributes(&self) -> &Attributes {
		&self.attributes
	}

	/// Returns the child descriptors passed to the component.
	pub fn children(&self) -> &[VNode] {
		&self.children
	}
}
