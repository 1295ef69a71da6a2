//! Hooks: per-instance state and side effects for function components.
//!
//! Every hook must be called unconditionally, in the same order, on every
//! render of a component. A render that calls a different number or kind of
//! hooks than the previous one is rejected with
//! [`HookMisuseError`](crate::error::HookMisuseError).
//!
//! ## Available Hooks
//!
//! | Hook | Purpose |
//! |------|---------|
//! | [`use_state`] | Local state with a setter that schedules a re-render |
//! | [`use_effect`] | Side effect after every commit |
//! | [`use_effect_with`] | Side effect when dependencies change |
//! | [`use_memo`] | Cached computation keyed by dependencies |
//! | [`use_callback`] | Stable callback keyed by dependencies |
//! | [`use_ref`] | Mutable box that never triggers renders |
//! | [`use_mounted`] | Liveness flag for async work |

mod effect;
mod memo;
mod mounted;
mod reference;
mod state;

pub use effect::{TearDown, use_effect, use_effect_with};
pub use memo::{use_callback, use_memo};
pub use mounted::{MountedFlag, use_mounted};
pub use reference::{Ref, use_ref};
pub use state::{SetState, use_state};
