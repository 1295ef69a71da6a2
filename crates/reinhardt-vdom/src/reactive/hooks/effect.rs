//! Effect hooks: use_effect and use_effect_with
//!
//! Effects never run during render. A render only stages them; they run after
//! the owning component's tree is committed to the host, children before
//! parents. Before an effect re-runs, the cleanup from its previous run is
//! called. All cleanups of a component run when it unmounts.

use std::any::Any;

use crate::reactive::scope::current_instance;
use crate::reactive::slots::{Cleanup, EffectSlot, HookKind, Slot, SlotEntry, StagedEffect};

/// Values an effect may return as its cleanup.
///
/// `()` means "nothing to clean up"; any `FnOnce()` is called as the cleanup.
pub trait TearDown: 'static {
	/// Converts into a boxed cleanup, if any.
	fn into_cleanup(self) -> Option<Box<dyn FnOnce()>>;
}

impl TearDown for () {
	fn into_cleanup(self) -> Option<Box<dyn FnOnce()>> {
		None
	}
}

impl<F> TearDown for F
where
	F: FnOnce() + 'static,
{
	fn into_cleanup(self) -> Option<Box<dyn FnOnce()>> {
		Some(Box::new(self))
	}
}

/// Runs a side effect after every commit of the component.
///
/// The effect's previous cleanup, if any, runs first.
///
/// # Panics
///
/// Panics when called outside a component render.
///
/// # Example
///
/// ```ignore
/// use reinhardt_vdom::use_effect;
///
/// use_effect(move || {
///     info_log!("rendered with count {}", count);
/// });
/// ```
pub fn use_effect<F, T>(f: F)
where
	F: FnOnce() -> T + 'static,
	T: TearDown,
{
	stage::<(), F, T>("use_effect", None, f);
}

/// Runs a side effect after the first commit and whenever `deps` changes.
///
/// Dependencies are compared with `PartialEq` against those of the last run,
/// so tuples and vectors compare element-wise. Pass `()` to run once on mount.
///
/// # Arguments
///
/// * `deps` - Values the effect depends on
/// * `f` - The effect; its return value is the cleanup (see [`TearDown`])
///
/// # Panics
///
/// Panics when called outside a component render.
///
/// # Example
///
/// ```ignore
/// use reinhardt_vdom::use_effect_with;
///
/// use_effect_with((user_id,), move || {
///     let subscription = feed.subscribe(user_id);
///     move || subscription.cancel()
/// });
/// ```
pub fn use_effect_with<D, F, T>(deps: D, f: F)
where
	D: PartialEq + 'static,
	F: FnOnce() -> T + 'static,
	T: TearDown,
{
	stage("use_effect_with", Some(deps), f);
}

fn stage<D, F, T>(hook: &str, deps: Option<D>, f: F)
where
	D: PartialEq + 'static,
	F: FnOnce() -> T + 'static,
	T: TearDown,
{
	let instance = current_instance(hook);
	let mut slots = instance.slots_mut();
	let index = match slots.next_slot(HookKind::Effect) {
		SlotEntry::Occupied(index) => index,
		SlotEntry::Vacant => slots.insert(Slot::Effect(EffectSlot::default())),
		SlotEntry::Rejected => return,
	};
	let Some(Slot::Effect(effect)) = slots.slot_mut(index) else {
		return;
	};

	let changed = match (&deps, effect.deps.as_ref()) {
		(Some(next), Some(previous)) => previous
			.downcast_ref::<D>()
			.is_none_or(|previous| previous != next),
		_ => true,
	};
	if !changed {
		return;
	}

	let run: Box<dyn FnOnce() -> Option<Cleanup>> = Box::new(move || f().into_cleanup());
	effect.staged = Some(StagedEffect {
		run,
		deps: deps.map(|d| Box::new(d) as Box<dyn Any>),
	});
}
