//! Per-instance hook storage.
//!
//! Hooks are identified by call order. Each render walks the slot list with a
//! cursor. The first render appends one slot per hook call. Later renders must
//! call the same hooks in the same order. Any deviation poisons the pass: the
//! remaining hooks get throwaway values and [`SlotStore::finish_render`]
//! reports a [`HookMisuseError`].

use std::any::Any;

use crate::debug_log;
use crate::error::HookMisuseError;

pub(crate) type Cleanup = Box<dyn FnOnce()>;
pub(crate) type EffectFn = Box<dyn FnOnce() -> Option<Cleanup>>;

/// Hook kinds, as recorded per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HookKind {
	State,
	Effect,
	Memo,
	Ref,
}

impl HookKind {
	pub(crate) fn name(self) -> &'static str {
		match self {
			Self::State => "use_state",
			Self::Effect => "use_effect",
			Self::Memo => "use_memo",
			Self::Ref => "use_ref",
		}
	}
}

/// An effect staged by the current render, applied at commit.
pub(crate) struct StagedEffect {
	pub(crate) run: EffectFn,
	pub(crate) deps: Option<Box<dyn Any>>,
}

#[derive(Default)]
pub(crate) struct EffectSlot {
	/// Dependencies of the last effect that actually ran.
	pub(crate) deps: Option<Box<dyn Any>>,
	pub(crate) cleanup: Option<Cleanup>,
	pub(crate) staged: Option<StagedEffect>,
}

pub(crate) enum Slot {
	State(std::rc::Rc<dyn Any>),
	Effect(EffectSlot),
	Memo {
		deps: Box<dyn Any>,
		value: std::rc::Rc<dyn Any>,
	},
	Ref(std::rc::Rc<dyn Any>),
}

impl Slot {
	fn kind(&self) -> HookKind {
		match self {
			Self::State(_) => HookKind::State,
			Self::Effect(_) => HookKind::Effect,
			Self::Memo { .. } => HookKind::Memo,
			Self::Ref(_) => HookKind::Ref,
		}
	}
}

/// Result of asking the store for the next slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SlotEntry {
	/// The slot recorded at this index by an earlier render.
	Occupied(usize),
	/// First render: the caller must [`SlotStore::insert`] a new slot.
	Vacant,
	/// The pass is poisoned; the caller returns a throwaway value.
	Rejected,
}

/// An effect ready to run after commit, together with the cleanup it replaces.
pub(crate) struct PendingEffect {
	pub(crate) slot: usize,
	pub(crate) run: EffectFn,
	pub(crate) previous_cleanup: Option<Cleanup>,
}

/// Storage backend for hook slots.
///
/// Call sites (the `use_*` functions) only go through this trait, so a store
/// keyed by something other than call order can replace [`PositionalSlots`].
pub(crate) trait SlotStore {
	/// Resets the cursor for a new render pass.
	fn begin_render(&mut self);

	/// Advances to the next hook call of the given kind.
	fn next_slot(&mut self, kind: HookKind) -> SlotEntry;

	/// Appends a slot after [`SlotEntry::Vacant`] and returns its index.
	fn insert(&mut self, slot: Slot) -> usize;

	/// Returns the slot at `index`.
	fn slot_mut(&mut self, index: usize) -> Option<&mut Slot>;

	/// Poisons the pass because the slot at `index` holds another value type.
	fn reject_type(&mut self, index: usize, kind: HookKind);

	/// Marks a hook's own computation as running (`Some`) or finished (`None`).
	/// Hooks called meanwhile poison the pass.
	fn set_computing(&mut self, within: Option<HookKind>);

	/// Validates the pass. On error, staged effects are already discarded.
	fn finish_render(&mut self) -> Result<(), HookMisuseError>;

	/// Discards the current pass after its render function failed.
	fn abort_render(&mut self);

	/// Takes the effects staged by the last accepted pass, in declaration order.
	fn take_pending_effects(&mut self) -> Vec<PendingEffect>;

	/// Stores the cleanup returned by an effect.
	fn store_cleanup(&mut self, slot: usize, cleanup: Cleanup);

	/// Takes every stored cleanup in reverse declaration order.
	fn take_cleanups(&mut self) -> Vec<Cleanup>;

	/// Number of slots recorded by the committed renders.
	fn len(&self) -> usize;
}

/// Slots identified by their position in the hook-call sequence.
pub(crate) struct PositionalSlots {
	component: String,
	slots: Vec<Slot>,
	cursor: usize,
	/// Set once a render has been accepted; the slot count is fixed from then on.
	sealed: bool,
	overflow: bool,
	computing: Option<HookKind>,
	violation: Option<HookMisuseError>,
}

impl PositionalSlots {
	pub(crate) fn new(component: impl Into<String>) -> Self {
		Self {
			component: component.into(),
			slots: Vec::new(),
			cursor: 0,
			sealed: false,
			overflow: false,
			computing: None,
			violation: None,
		}
	}

	fn discard_staged(&mut self) {
		for slot in &mut self.slots {
			if let Slot::Effect(effect) = slot {
				effect.staged = None;
			}
		}
	}

	fn reject(&mut self) -> HookMisuseError {
		let error = self
			.violation
			.take()
			.unwrap_or_else(|| HookMisuseError::CountMismatch {
				component: self.component.clone(),
				expected: self.slots.len(),
				actual: self.cursor,
			});
		self.discard_staged();
		if !self.sealed {
			self.slots.clear();
		}
		error
	}
}

impl SlotStore for PositionalSlots {
	fn begin_render(&mut self) {
		self.cursor = 0;
		self.overflow = false;
		self.computing = None;
		self.violation = None;
	}

	fn next_slot(&mut self, kind: HookKind) -> SlotEntry {
		if let Some(within) = self.computing {
			if self.violation.is_none() {
				self.violation = Some(HookMisuseError::Nested {
					component: self.component.clone(),
					within: within.name(),
					found: kind.name(),
				});
			}
			return SlotEntry::Rejected;
		}
		let index = self.cursor;
		self.cursor += 1;
		if self.violation.is_some() || self.overflow {
			return SlotEntry::Rejected;
		}
		if index >= self.slots.len() {
			if self.sealed {
				self.overflow = true;
				return SlotEntry::Rejected;
			}
			return SlotEntry::Vacant;
		}
		let found = self.slots[index].kind();
		if found != kind {
			self.violation = Some(HookMisuseError::OrderChanged {
				component: self.component.clone(),
				slot: index,
				expected: found.name(),
				found: kind.name(),
			});
			return SlotEntry::Rejected;
		}
		debug_log!("`{}` reusing slot {} ({})", self.component, index, kind.name());
		SlotEntry::Occupied(index)
	}

	fn insert(&mut self, slot: Slot) -> usize {
		self.slots.push(slot);
		self.slots.len() - 1
	}

	fn slot_mut(&mut self, index: usize) -> Option<&mut Slot> {
		self.slots.get_mut(index)
	}

	fn reject_type(&mut self, index: usize, kind: HookKind) {
		if self.violation.is_none() {
			self.violation = Some(HookMisuseError::TypeChanged {
				component: self.component.clone(),
				slot: index,
				hook: kind.name(),
			});
		}
	}

	fn set_computing(&mut self, within: Option<HookKind>) {
		self.computing = within;
	}

	fn finish_render(&mut self) -> Result<(), HookMisuseError> {
		if self.violation.is_some() || self.overflow {
			return Err(self.reject());
		}
		if self.sealed && self.cursor != self.slots.len() {
			return Err(self.reject());
		}
		self.sealed = true;
		Ok(())
	}

	fn abort_render(&mut self) {
		self.discard_staged();
		if !self.sealed {
			self.slots.clear();
		}
	}

	fn take_pending_effects(&mut self) -> Vec<PendingEffect> {
		self.slots
			.iter_mut()
			.enumerate()
			.filter_map(|(index, slot)| match slot {
				Slot::Effect(effect) => effect.staged.take().map(|staged| {
					effect.deps = staged.deps;
					PendingEffect {
						slot: index,
						run: staged.run,
						previous_cleanup: effect.cleanup.take(),
					}
				}),
				_ => None,
			})
			.collect()
	}

	fn store_cleanup(&mut self, slot: usize, cleanup: Cleanup) {
		if let Some(Slot::Effect(effect)) = self.slots.get_mut(slot) {
			effect.cleanup = Some(cleanup);
		}
	}

	fn take_cleanups(&mut self) -> Vec<Cleanup> {
		self.slots
			.iter_mut()
			.rev()
			.filter_map(|slot| match slot {
				Slot::Effect(effect) => {
					effect.staged = None;
					effect.cleanup.take()
				}
				_ => None,
			})
			.collect()
	}

	fn len(&self) -> usize {
		self.slots.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::rc::Rc;

	fn render(store: &mut PositionalSlots, kinds: &[HookKind]) -> Result<(), HookMisuseError> {
		store.begin_render();
		for kind in kinds {
			if let SlotEntry::Vacant = store.next_slot(*kind) {
				let slot = match kind {
					HookKind::State => Slot::State(Rc::new(0_i32)),
					HookKind::Effect => Slot::Effect(EffectSlot::default()),
					HookKind::Memo => Slot::Memo {
						deps: Box::new(()),
						value: Rc::new(()),
					},
					HookKind::Ref => Slot::Ref(Rc::new(())),
				};
				store.insert(slot);
			}
		}
		store.finish_render()
	}

	#[rstest]
	fn test_stable_sequence_is_accepted() {
		let mut store = PositionalSlots::new("Counter");
		let kinds = [HookKind::State, HookKind::Effect, HookKind::Ref];
		render(&mut store, &kinds).unwrap();
		render(&mut store, &kinds).unwrap();
		assert_eq!(store.len(), 3);
	}

	#[rstest]
	#[case(&[HookKind::State, HookKind::State, HookKind::State], 2, 3)]
	#[case(&[HookKind::State], 2, 1)]
	fn test_count_mismatch(
		#[case] second: &[HookKind],
		#[case] expected: usize,
		#[case] actual: usize,
	) {
		let mut store = PositionalSlots::new("Counter");
		render(&mut store, &[HookKind::State, HookKind::State]).unwrap();

		let err = render(&mut store, second).unwrap_err();
		assert_eq!(
			err,
			HookMisuseError::CountMismatch {
				component: "Counter".to_string(),
				expected,
				actual,
			}
		);
		// Nothing was appended by the rejected pass.
		assert_eq!(store.len(), 2);
	}

	#[rstest]
	fn test_order_changed() {
		let mut store = PositionalSlots::new("Form");
		render(&mut store, &[HookKind::State, HookKind::Effect]).unwrap();

		let err = render(&mut store, &[HookKind::Effect, HookKind::State]).unwrap_err();
		assert_eq!(
			err,
			HookMisuseError::OrderChanged {
				component: "Form".to_string(),
				slot: 0,
				expected: "use_state",
				found: "use_effect",
			}
		);
	}

	#[rstest]
	fn test_abort_on_first_render_clears_slots() {
		let mut store = PositionalSlots::new("Broken");
		store.begin_render();
		assert!(matches!(store.next_slot(HookKind::State), SlotEntry::Vacant));
		store.insert(Slot::State(Rc::new(1_i32)));
		store.abort_render();
		assert_eq!(store.len(), 0);
	}

	#[rstest]
	fn test_cleanups_taken_in_reverse_order() {
		let mut store = PositionalSlots::new("Effects");
		render(&mut store, &[HookKind::Effect, HookKind::State, HookKind::Effect]).unwrap();

		let order = Rc::new(std::cell::RefCell::new(Vec::new()));
		for slot in [0, 2] {
			let order = Rc::clone(&order);
			store.store_cleanup(slot, Box::new(move || order.borrow_mut().push(slot)));
		}
		for cleanup in store.take_cleanups() {
			cleanup();
		}
		assert_eq!(*order.borrow(), vec![2, 0]);
		assert!(store.take_cleanups().is_empty());
	}
}
