//! Event types delivered to handlers.

use std::borrow::Cow;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use super::NodeId;

/// Event names the runtime knows about.
///
/// Anything else goes through [`EventType::Custom`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventType {
	/// `click`
	Click,
	/// `dblclick`
	DblClick,
	/// `input`
	Input,
	/// `change`
	Change,
	/// `submit`
	Submit,
	/// `keydown`
	KeyDown,
	/// `keyup`
	KeyUp,
	/// `focus`
	Focus,
	/// `blur`
	Blur,
	/// `mouseenter`
	MouseEnter,
	/// `mouseleave`
	MouseLeave,
	/// Any other event name.
	Custom(Cow<'static, str>),
}

impl EventType {
	/// Returns the DOM event name.
	pub fn as_str(&self) -> &str {
		match self {
			Self::Click => "click",
			Self::DblClick => "dblclick",
			Self::Input => "input",
			Self::Change => "change",
			Self::Submit => "submit",
			Self::KeyDown => "keydown",
			Self::KeyUp => "keyup",
			Self::Focus => "focus",
			Self::Blur => "blur",
			Self::MouseEnter => "mouseenter",
			Self::MouseLeave => "mouseleave",
			Self::Custom(name) => name.as_ref(),
		}
	}

	/// Parses a DOM event name. Unknown names become [`EventType::Custom`].
	pub fn from_name(name: &str) -> Self {
		match name {
			"click" => Self::Click,
			"dblclick" => Self::DblClick,
			"input" => Self::Input,
			"change" => Self::Change,
			"submit" => Self::Submit,
			"keydown" => Self::KeyDown,
			"keyup" => Self::KeyUp,
			"focus" => Self::Focus,
			"blur" => Self::Blur,
			"mouseenter" => Self::MouseEnter,
			"mouseleave" => Self::MouseLeave,
			other => Self::Custom(Cow::Owned(other.to_string())),
		}
	}
}

impl fmt::Display for EventType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// An event as seen by a handler.
///
/// Clones share the default-prevented flag.
#[derive(Clone)]
pub struct Event {
	event_type: EventType,
	target: Option<NodeId>,
	value: Option<String>,
	default_prevented: Rc<Cell<bool>>,
	#[cfg(target_arch = "wasm32")]
	raw: Option<web_sys::Event>,
}

impl Event {
	/// Creates an event of the given type with no target.
	pub fn new(event_type: EventType) -> Self {
		Self {
			event_type,
			target: None,
			value: None,
			default_prevented: Rc::new(Cell::new(false)),
			#[cfg(target_arch = "wasm32")]
			raw: None,
		}
	}

	/// Sets the target node.
	pub fn with_target(mut self, target: NodeId) -> Self {
		self.target = Some(target);
		self
	}

	/// Sets the input value carried by the event.
	pub fn with_value(mut self, value: impl Into<String>) -> Self {
		self.value = Some(value.into());
		self
	}

	#[cfg(target_arch = "wasm32")]
	pub(crate) fn with_raw(mut self, raw: web_sys::Event) -> Self {
		self.raw = Some(raw);
		self
	}

	/// Returns the event type.
	pub fn event_type(&self) -> &EventType {
		&self.event_type
	}

	/// Returns the node the event was dispatched on.
	pub fn target(&self) -> Option<NodeId> {
		self.target
	}

	/// Returns the current value of an input target, if any.
	pub fn value(&self) -> Option<&str> {
		self.value.as_deref()
	}

	/// Cancels the host's default action.
	pub fn prevent_default(&self) {
		self.default_prevented.set(true);
		#[cfg(target_arch = "wasm32")]
		if let Some(raw) = &self.raw {
			raw.prevent_default();
		}
	}

	/// Returns `true` once [`prevent_default`](Self::prevent_default) was called.
	pub fn is_default_prevented(&self) -> bool {
		self.default_prevented.get()
	}

	/// Returns the underlying browser event.
	#[cfg(target_arch = "wasm32")]
	pub fn raw(&self) -> Option<&web_sys::Event> {
		self.raw.as_ref()
	}
}

impl fmt::Debug for Event {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Event")
			.field("event_type", &self.event_type)
			.field("target", &self.target)
			.field("value", &self.value)
			.field("default_prevented", &self.default_prevented.get())
			.finish()
	}
}
