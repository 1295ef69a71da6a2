//! Attribute bag attached to every tree descriptor.

use std::any::Any;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::callback::{Callback, IntoEventHandler};
use crate::dom::{Event, EventType};

/// Identity hint that lets the reconciler match a child across renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
	/// String key.
	Str(Cow<'static, str>),
	/// Integer key.
	Int(i64),
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Str(s) => f.write_str(s),
			Self::Int(i) => write!(f, "{}", i),
		}
	}
}

impl From<&'static str> for Key {
	fn from(value: &'static str) -> Self {
		Self::Str(Cow::Borrowed(value))
	}
}

impl From<String> for Key {
	fn from(value: String) -> Self {
		Self::Str(Cow::Owned(value))
	}
}

macro_rules! key_from_int {
	($($t:ty),*) => {
		$(
			impl From<$t> for Key {
				fn from(value: $t) -> Self {
					Self::Int(value as i64)
				}
			}
		)*
	};
}

key_from_int!(i32, i64, u32, u64, usize);

/// A single attribute value.
#[derive(Clone)]
pub enum AttrValue {
	/// Text value.
	Str(Cow<'static, str>),
	/// Integer value, rendered in decimal.
	Int(i64),
	/// Floating-point value.
	Float(f64),
	/// Boolean attribute: `true` renders as present and empty, `false` as absent.
	Bool(bool),
	/// Arbitrary value for component props. Never rendered to the host.
	Any(Rc<dyn Any>),
}

impl AttrValue {
	/// Wraps an arbitrary value as a prop.
	pub fn any<T: 'static>(value: T) -> Self {
		Self::Any(Rc::new(value))
	}

	/// The string form written to the host, or `None` when the attribute
	/// should be absent.
	pub fn to_host_value(&self) -> Option<Cow<'_, str>> {
		match self {
			Self::Str(s) => Some(Cow::Borrowed(s.as_ref())),
			Self::Int(i) => Some(Cow::Owned(i.to_string())),
			Self::Float(v) => Some(Cow::Owned(v.to_string())),
			Self::Bool(true) => Some(Cow::Borrowed("")),
			Self::Bool(false) | Self::Any(_) => None,
		}
	}

	/// Returns the text value.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Str(s) => Some(s.as_ref()),
			_ => None,
		}
	}

	/// Returns the integer value.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			Self::Int(i) => Some(*i),
			_ => None,
		}
	}

	/// Returns the float value. Integers are widened.
	pub fn as_float(&self) -> Option<f64> {
		match self {
			Self::Float(v) => Some(*v),
			Self::Int(i) => Some(*i as f64),
			_ => None,
		}
	}

	/// Returns the boolean value.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(b) => Some(*b),
			_ => None,
		}
	}

	/// Downcasts an [`AttrValue::Any`] payload.
	pub fn downcast<T: 'static>(&self) -> Option<Rc<T>> {
		match self {
			Self::Any(value) => Rc::clone(value).downcast::<T>().ok(),
			_ => None,
		}
	}
}

impl PartialEq for AttrValue {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Str(a), Self::Str(b)) => a == b,
			(Self::Int(a), Self::Int(b)) => a == b,
			(Self::Float(a), Self::Float(b)) => a == b,
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::Any(a), Self::Any(b)) => Rc::ptr_eq(a, b),
			_ => false,
		}
	}
}

impl fmt::Debug for AttrValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Str(s) => write!(f, "{:?}", s),
			Self::Int(i) => write!(f, "{}", i),
			Self::Float(v) => write!(f, "{}", v),
			Self::Bool(b) => write!(f, "{}", b),
			Self::Any(_) => f.write_str("<any>"),
		}
	}
}

impl From<&'static str> for AttrValue {
	fn from(value: &'static str) -> Self {
		Self::Str(Cow::Borrowed(value))
	}
}

impl From<String> for AttrValue {
	fn from(value: String) -> Self {
		Self::Str(Cow::Owned(value))
	}
}

impl From<Cow<'static, str>> for AttrValue {
	fn from(value: Cow<'static, str>) -> Self {
		Self::Str(value)
	}
}

impl From<bool> for AttrValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<f64> for AttrValue {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

macro_rules! attr_from_int {
	($($t:ty),*) => {
		$(
			impl From<$t> for AttrValue {
				fn from(value: $t) -> Self {
					Self::Int(value as i64)
				}
			}
		)*
	};
}

attr_from_int!(i32, i64, u32, u64, usize);

/// Attributes, inline style and event handlers of a descriptor, plus its key.
///
/// Built fluently:
///
/// ```ignore
/// let attrs = Attributes::new()
///     .key(item.id)
///     .class("item")
///     .style("color", "red")
///     .on(EventType::Click, move || select.set(item.id));
/// ```
///
/// Handlers compare by callback identity, everything else by value.
#[derive(Clone, Default, PartialEq)]
pub struct Attributes {
	key: Option<Key>,
	values: BTreeMap<Cow<'static, str>, AttrValue>,
	style: BTreeMap<Cow<'static, str>, Cow<'static, str>>,
	handlers: BTreeMap<EventType, Callback<Event>>,
}

impl Attributes {
	/// Creates an empty bag.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the key.
	pub fn key(mut self, key: impl Into<Key>) -> Self {
		self.key = Some(key.into());
		self
	}

	/// Sets an attribute.
	pub fn attr(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<AttrValue>) -> Self {
		self.values.insert(name.into(), value.into());
		self
	}

	/// Sets an arbitrary prop value, visible to components only.
	pub fn prop<T: 'static>(self, name: impl Into<Cow<'static, str>>, value: T) -> Self {
		self.attr(name, AttrValue::any(value))
	}

	/// Sets the `class` attribute.
	pub fn class(self, value: impl Into<AttrValue>) -> Self {
		self.attr("class", value)
	}

	/// Sets the `id` attribute.
	pub fn id(self, value: impl Into<AttrValue>) -> Self {
		self.attr("id", value)
	}

	/// Sets one inline style property.
	pub fn style(
		mut self,
		property: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Self {
		self.style.insert(property.into(), value.into());
		self
	}

	/// Installs an event handler.
	pub fn on<M>(mut self, event: EventType, handler: impl IntoEventHandler<M>) -> Self {
		self.handlers.insert(event, handler.into_event_handler());
		self
	}

	/// Shorthand for a click handler.
	pub fn on_click<M>(self, handler: impl IntoEventHandler<M>) -> Self {
		self.on(EventType::Click, handler)
	}

	/// Returns the key.
	pub fn get_key(&self) -> Option<&Key> {
		self.key.as_ref()
	}

	/// Returns an attribute value.
	pub fn get(&self, name: &str) -> Option<&AttrValue> {
		self.values.get(name)
	}

	/// Iterates attributes in name order.
	pub fn values(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
		self.values.iter().map(|(k, v)| (k.as_ref(), v))
	}

	/// Iterates style properties in name order.
	pub fn styles(&self) -> impl Iterator<Item = (&str, &str)> {
		self.style.iter().map(|(k, v)| (k.as_ref(), v.as_ref()))
	}

	/// Returns an inline style value.
	pub fn get_style(&self, property: &str) -> Option<&str> {
		self.style.get(property).map(|v| v.as_ref())
	}

	/// Iterates event handlers.
	pub fn handlers(&self) -> impl Iterator<Item = (&EventType, &Callback<Event>)> {
		self.handlers.iter()
	}

	/// Returns the handler for an event type.
	pub fn handler(&self, event: &EventType) -> Option<&Callback<Event>> {
		self.handlers.get(event)
	}

	/// Returns `true` when nothing at all is set.
	pub fn is_empty(&self) -> bool {
		self.key.is_none()
			&& self.values.is_empty()
			&& self.style.is_empty()
			&& self.handlers.is_empty()
	}
}

impl From<()> for Attributes {
	fn from(_: ()) -> Self {
		Self::new()
	}
}

impl fmt::Debug for Attributes {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut s = f.debug_struct("Attributes");
		if let Some(key) = &self.key {
			s.field("key", key);
		}
		s.field("values", &self.values)
			.field("style", &self.style)
			.field("handlers", &self.handlers.keys().collect::<Vec<_>>())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(AttrValue::from("x"), Some("x"))]
	#[case(AttrValue::from(3), Some("3"))]
	#[case(AttrValue::from(1.5), Some("1.5"))]
	#[case(AttrValue::from(true), Some(""))]
	#[case(AttrValue::from(false), None)]
	#[case(AttrValue::any(vec![1, 2]), None)]
	fn test_host_values(#[case] value: AttrValue, #[case] expected: Option<&str>) {
		assert_eq!(value.to_host_value().as_deref(), expected);
	}

	#[rstest]
	fn test_any_compares_by_identity() {
		let shared = AttrValue::any(5_u8);
		assert_eq!(shared, shared.clone());
		assert_ne!(shared, AttrValue::any(5_u8));
		assert_eq!(shared.downcast::<u8>().as_deref(), Some(&5));
	}

	#[rstest]
	fn test_handlers_compare_by_identity() {
		let handler: Callback = Callback::new(|_| {});
		let a = Attributes::new().on(EventType::Click, handler.clone());
		let b = Attributes::new().on(EventType::Click, handler);
		let c = Attributes::new().on(EventType::Click, |_: Event| {});
		assert_eq!(a, b);
		assert_ne!(a, c);
	}

	#[rstest]
	fn test_key_conversions() {
		assert_eq!(Key::from("a"), Key::Str(Cow::Borrowed("a")));
		assert_eq!(Key::from(7_usize), Key::Int(7));
		assert_eq!(Key::from(String::from("b")).to_string(), "b");
	}
}
