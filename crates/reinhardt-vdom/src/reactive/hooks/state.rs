//! State hook: use_state

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::component::InstanceCore;
use crate::reactive::Scheduler;
use crate::reactive::scope::current_instance;
use crate::reactive::slots::{HookKind, Slot, SlotEntry};
use crate::warn_log;

/// Declares a piece of component state.
///
/// On the first render the slot is initialized with `initial`; later renders
/// ignore the argument and return the stored value. The setter schedules the
/// owning component for re-rendering when the new value differs from the
/// stored one.
///
/// # Panics
///
/// Panics when called outside a component render.
///
/// # Example
///
/// ```ignore
/// use reinhardt_vdom::{h, use_state, Attributes, EventType, Props, VNode};
///
/// fn counter(_props: &Props) -> VNode {
///     let (count, set_count) = use_state(0);
///     h(
///         "button",
///         Attributes::new().on(EventType::Click, move || set_count.update(|n| n + 1)),
///         ("Count: ", count),
///     )
/// }
/// ```
pub fn use_state<T>(initial: T) -> (T, SetState<T>)
where
	T: Clone + PartialEq + 'static,
{
	let instance = current_instance("use_state");
	let cell = {
		let mut slots = instance.slots_mut();
		match slots.next_slot(HookKind::State) {
			SlotEntry::Occupied(index) => {
				let stored = match slots.slot_mut(index) {
					Some(Slot::State(stored)) => Rc::clone(stored).downcast::<RefCell<T>>().ok(),
					_ => None,
				};
				if stored.is_none() {
					slots.reject_type(index, HookKind::State);
				}
				stored
			}
			SlotEntry::Rejected => None,
			SlotEntry::Vacant => {
				let cell = Rc::new(RefCell::new(initial.clone()));
				slots.insert(Slot::State(cell.clone()));
				Some(cell)
			}
		}
	};

	match cell {
		Some(cell) => {
			let value = cell.borrow().clone();
			let setter = SetState {
				cell: Rc::downgrade(&cell),
				owner: Rc::downgrade(&instance),
				scheduler: Rc::downgrade(instance.scheduler()),
			};
			(value, setter)
		}
		// Poisoned pass or a type changed under the same slot: the render is
		// going to be rejected, so hand out a value nobody will commit.
		None => (initial, SetState::detached()),
	}
}

/// Setter returned by [`use_state`].
///
/// Cheap to clone and safe to move into event handlers and effects. Holds
/// only weak references, so a setter outliving its component does nothing.
pub struct SetState<T> {
	cell: Weak<RefCell<T>>,
	owner: Weak<InstanceCore>,
	scheduler: Weak<Scheduler>,
}

impl<T: PartialEq + 'static> SetState<T> {
	fn detached() -> Self {
		Self {
			cell: Weak::new(),
			owner: Weak::new(),
			scheduler: Weak::new(),
		}
	}

	/// Stale updates are logged unless the scheduler disables it.
	fn warns_on_stale_update(&self) -> bool {
		self.scheduler
			.upgrade()
			.is_none_or(|scheduler| scheduler.warns_on_stale_updates())
	}

	/// Replaces the value.
	pub fn set(&self, value: T) {
		self.update(move |_| value);
	}

	/// Computes the next value from the current one.
	///
	/// Equal values are dropped without scheduling a render. After the owning
	/// component unmounts this is a no-op that logs a warning.
	pub fn update(&self, f: impl FnOnce(&T) -> T) {
		let (Some(cell), Some(owner)) = (self.cell.upgrade(), self.owner.upgrade()) else {
			if self.warns_on_stale_update() {
				warn_log!("state update on a dropped component ignored");
			}
			return;
		};
		if owner.is_destroyed() {
			if self.warns_on_stale_update() {
				warn_log!(
					"state update on unmounted component `{}` ignored",
					owner.name()
				);
			}
			return;
		}
		let next = f(&cell.borrow());
		if *cell.borrow() == next {
			return;
		}
		*cell.borrow_mut() = next;
		owner.scheduler().schedule(&owner);
	}
}

impl<T> Clone for SetState<T> {
	fn clone(&self) -> Self {
		Self {
			cell: self.cell.clone(),
			owner: self.owner.clone(),
			scheduler: self.scheduler.clone(),
		}
	}
}

impl<T> fmt::Debug for SetState<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SetState")
			.field("live", &(self.owner.strong_count() > 0))
			.finish()
	}
}
