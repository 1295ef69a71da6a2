//! Liveness hook: use_mounted

use std::fmt;
use std::rc::Weak;

use crate::component::InstanceCore;
use crate::reactive::scope::current_instance;

/// Reports whether the component that created it is still mounted.
///
/// Asynchronous work started from an effect should check this before touching
/// state or the host.
#[derive(Clone)]
pub struct MountedFlag {
	owner: Weak<InstanceCore>,
}

impl MountedFlag {
	/// Returns `true` while the owning component is mounted.
	pub fn is_mounted(&self) -> bool {
		self.owner.upgrade().is_some_and(|owner| owner.is_mounted())
	}
}

impl fmt::Debug for MountedFlag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MountedFlag")
			.field("mounted", &self.is_mounted())
			.finish()
	}
}

/// Returns a [`MountedFlag`] for the rendering component.
///
/// Does not occupy a hook slot, so it may be called conditionally.
///
/// # Panics
///
/// Panics when called outside a component render.
///
/// # Example
///
/// ```ignore
/// let mounted = use_mounted();
/// use_effect_with((), move || {
///     spawn_local(async move {
///         let user = fetch_user().await;
///         if mounted.is_mounted() {
///             set_user.set(Some(user));
///         }
///     });
/// });
/// ```
pub fn use_mounted() -> MountedFlag {
	let instance = current_instance("use_mounted");
	MountedFlag {
		owner: std::rc::Rc::downgrade(&instance),
	}
}
