//! Reactive core: hook slots, render scope and the update scheduler.
//!
//! A component instance owns a slot store. While its render function runs,
//! the instance sits on top of a thread-local render stack and every hook
//! call claims the next slot. Setters mark the instance dirty and queue it on
//! the [`Scheduler`], which re-renders queued instances in batches.

pub mod hooks;
mod scheduler;
pub(crate) mod scope;
pub(crate) mod slots;

pub use hooks::{
	MountedFlag, Ref, SetState, TearDown, use_callback, use_effect, use_effect_with, use_memo,
	use_mounted, use_ref, use_state,
};
pub use scheduler::Scheduler;
pub use scope::is_rendering;
