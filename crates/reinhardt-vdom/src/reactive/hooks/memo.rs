//! Memoization hooks: use_memo and use_callback
//!
//! Both keep a value across renders and recompute it only when the supplied
//! dependencies change. The returned handle keeps its identity while the
//! dependencies stay equal, which lets children and the reconciler skip work.

use std::any::Any;
use std::rc::Rc;

use crate::callback::Callback;
use crate::reactive::scope::current_instance;
use crate::reactive::slots::{HookKind, Slot, SlotEntry};

/// Memoizes an expensive calculation.
///
/// `f` receives the dependencies and runs on the first render and whenever
/// `deps` differs (by `PartialEq`) from the previous render's.
///
/// # Type Parameters
///
/// * `T` - The return type of the calculation
/// * `D` - The dependency type
///
/// # Arguments
///
/// * `deps` - Values the calculation depends on
/// * `f` - The calculation
///
/// # Returns
///
/// An `Rc<T>` that is pointer-identical across renders until `deps` changes.
///
/// # Panics
///
/// Panics when called outside a component render.
///
/// # Example
///
/// ```ignore
/// use reinhardt_vdom::use_memo;
///
/// let sorted = use_memo(items.clone(), |items| {
///     let mut sorted = items.clone();
///     sorted.sort();
///     sorted
/// });
/// ```
pub fn use_memo<T, D, F>(deps: D, f: F) -> Rc<T>
where
	T: 'static,
	D: PartialEq + 'static,
	F: FnOnce(&D) -> T,
{
	let instance = current_instance("use_memo");
	let lookup = {
		let mut slots = instance.slots_mut();
		match slots.next_slot(HookKind::Memo) {
			SlotEntry::Vacant => Lookup::Vacant,
			SlotEntry::Rejected => Lookup::Rejected,
			SlotEntry::Occupied(index) => {
				let found = match slots.slot_mut(index) {
					Some(Slot::Memo {
						deps: previous,
						value,
					}) => {
						let fresh = previous
							.downcast_ref::<D>()
							.is_some_and(|previous| *previous == deps);
						Rc::clone(value).downcast::<T>().ok().map(|value| (value, fresh))
					}
					_ => None,
				};
				match found {
					Some((value, true)) => Lookup::Cached(value),
					Some((_, false)) => Lookup::Stale(index),
					None => {
						slots.reject_type(index, HookKind::Memo);
						Lookup::Rejected
					}
				}
			}
		}
	};

	let compute = |deps: &D| {
		instance.slots_mut().set_computing(Some(HookKind::Memo));
		let value = Rc::new(f(deps));
		instance.slots_mut().set_computing(None);
		value
	};

	match lookup {
		Lookup::Cached(value) => value,
		Lookup::Rejected => compute(&deps),
		Lookup::Vacant => {
			let value = compute(&deps);
			instance.slots_mut().insert(Slot::Memo {
				deps: Box::new(deps),
				value: value.clone(),
			});
			value
		}
		Lookup::Stale(index) => {
			let value = compute(&deps);
			if let Some(Slot::Memo {
				deps: previous,
				value: stored,
			}) = instance.slots_mut().slot_mut(index)
			{
				*previous = Box::new(deps) as Box<dyn Any>;
				*stored = value.clone() as Rc<dyn Any>;
			}
			value
		}
	}
}

/// Where the memoized value comes from in this render.
enum Lookup<T> {
	Cached(Rc<T>),
	Vacant,
	Stale(usize),
	Rejected,
}

/// Memoizes a callback.
///
/// Returns the same [`Callback`] (by identity) until `deps` changes, so event
/// listeners bound to it are not rebound on every render.
///
/// # Panics
///
/// Panics when called outside a component render.
///
/// # Example
///
/// ```ignore
/// use reinhardt_vdom::{use_callback, Event};
///
/// let on_input = use_callback((), move |event: Event| {
///     set_query.set(event.value().unwrap_or_default().to_string());
/// });
/// ```
pub fn use_callback<Args, Ret, D, F>(deps: D, f: F) -> Callback<Args, Ret>
where
	Args: 'static,
	Ret: 'static,
	D: PartialEq + 'static,
	F: Fn(Args) -> Ret + 'static,
{
	let callback = use_memo(deps, move |_| Callback::new(f));
	(*callback).clone()
}
