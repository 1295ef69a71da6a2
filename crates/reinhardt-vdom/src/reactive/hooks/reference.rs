//! Ref hook: use_ref

use std::cell::{self, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::reactive::scope::current_instance;
use crate::reactive::slots::{HookKind, Slot, SlotEntry};

/// A mutable box that survives re-renders.
///
/// Writing to a `Ref` never schedules a render.
pub struct Ref<T> {
	inner: Rc<RefCell<T>>,
}

impl<T> Ref<T> {
	fn new(value: T) -> Self {
		Self {
			inner: Rc::new(RefCell::new(value)),
		}
	}

	/// Borrows the current value.
	pub fn borrow(&self) -> cell::Ref<'_, T> {
		self.inner.borrow()
	}

	/// Mutably borrows the current value.
	pub fn borrow_mut(&self) -> cell::RefMut<'_, T> {
		self.inner.borrow_mut()
	}

	/// Replaces the current value, returning the old one.
	pub fn set(&self, value: T) -> T {
		self.inner.replace(value)
	}

	/// Returns `true` when both refs point at the same box.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

impl<T: Clone> Ref<T> {
	/// Returns a copy of the current value.
	pub fn get(&self) -> T {
		self.inner.borrow().clone()
	}
}

impl<T> Clone for Ref<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<T: fmt::Debug> fmt::Debug for Ref<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Ref").field(&*self.inner.borrow()).finish()
	}
}

/// Declares a mutable box whose identity is stable for the component's lifetime.
///
/// `initial` is used on the first render only.
///
/// # Panics
///
/// Panics when called outside a component render.
///
/// # Example
///
/// ```ignore
/// use reinhardt_vdom::use_ref;
///
/// let renders = use_ref(0);
/// *renders.borrow_mut() += 1;
/// ```
pub fn use_ref<T: 'static>(initial: T) -> Ref<T> {
	let instance = current_instance("use_ref");
	let mut slots = instance.slots_mut();
	match slots.next_slot(HookKind::Ref) {
		SlotEntry::Occupied(index) => {
			let stored = match slots.slot_mut(index) {
				Some(Slot::Ref(stored)) => Rc::clone(stored).downcast::<RefCell<T>>().ok(),
				_ => None,
			};
			match stored {
				Some(inner) => Ref { inner },
				None => {
					slots.reject_type(index, HookKind::Ref);
					Ref::new(initial)
				}
			}
		}
		SlotEntry::Vacant => {
			let reference = Ref::new(initial);
			slots.insert(Slot::Ref(reference.inner.clone()));
			reference
		}
		SlotEntry::Rejected => Ref::new(initial),
	}
}
