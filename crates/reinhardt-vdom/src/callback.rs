//! Callback type for event handlers and memoized functions.
//!
//! A [`Callback`] is a cheaply cloneable, reference-counted function. Two
//! callbacks compare equal only when they share the same allocation, which is
//! how the reconciler decides whether an event listener needs rebinding and how
//! `use_callback` keeps a stable identity across renders.
//!
//! ## Example
//!
//! ```ignore
//! use reinhardt_vdom::{Callback, Event};
//!
//! let on_click = Callback::new(|_event: Event| {
//!     info_log!("clicked");
//! });
//! let same = on_click.clone();
//! assert!(on_click.ptr_eq(&same));
//! ```

use std::fmt;
use std::rc::Rc;

use crate::dom::Event;

/// A reference-counted function callable from any number of owners.
///
/// `Args` defaults to [`Event`] and `Ret` to `()`, so `Callback` alone is an
/// event handler.
pub struct Callback<Args = Event, Ret = ()> {
	inner: Rc<dyn Fn(Args) -> Ret>,
}

impl<Args, Ret> Callback<Args, Ret> {
	/// Wraps a function.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(Args) -> Ret + 'static,
	{
		Self { inner: Rc::new(f) }
	}

	/// Invokes the callback.
	pub fn call(&self, args: Args) -> Ret {
		(self.inner)(args)
	}

	/// Returns `true` when both callbacks share one allocation.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

impl<Args, Ret> Clone for Callback<Args, Ret> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<Args, Ret> PartialEq for Callback<Args, Ret> {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

impl<Args, Ret> fmt::Debug for Callback<Args, Ret> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Callback")
			.field("inner", &"<function>")
			.finish()
	}
}

impl<Args, Ret, F> From<F> for Callback<Args, Ret>
where
	F: Fn(Args) -> Ret + 'static,
{
	fn from(f: F) -> Self {
		Self::new(f)
	}
}

/// Conversion into an event handler.
///
/// Implemented for closures taking an [`Event`], closures taking nothing, and
/// existing callbacks (which keep their identity).
pub trait IntoEventHandler<Marker> {
	/// Converts into a [`Callback<Event>`].
	fn into_event_handler(self) -> Callback<Event>;
}

#[doc(hidden)]
pub struct WithEvent;

#[doc(hidden)]
pub struct WithoutEvent;

#[doc(hidden)]
pub struct Existing;

impl<F> IntoEventHandler<WithEvent> for F
where
	F: Fn(Event) + 'static,
{
	fn into_event_handler(self) -> Callback<Event> {
		Callback::new(self)
	}
}

impl<F> IntoEventHandler<WithoutEvent> for F
where
	F: Fn() + 'static,
{
	fn into_event_handler(self) -> Callback<Event> {
		Callback::new(move |_| self())
	}
}

impl IntoEventHandler<Existing> for Callback<Event> {
	fn into_event_handler(self) -> Callback<Event> {
		self
	}
}
