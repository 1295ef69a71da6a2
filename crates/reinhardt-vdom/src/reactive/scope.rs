//! The render scope hooks resolve against.
//!
//! Rendering a component pushes its instance onto a thread-local stack for the
//! duration of the render function. Hook calls act on the top entry. The
//! guard pops it on every exit path, including unwinding.

use std::cell::RefCell;
use std::rc::Rc;

use crate::component::InstanceCore;

thread_local! {
	static RENDER_STACK: RefCell<Vec<Rc<InstanceCore>>> = const { RefCell::new(Vec::new()) };
}

struct ScopeGuard;

impl Drop for ScopeGuard {
	fn drop(&mut self) {
		RENDER_STACK.with(|stack| {
			stack.borrow_mut().pop();
		});
	}
}

/// Runs `f` with `instance` as the current render target.
///
/// Resets the instance's slot cursor first. Nested calls (a child rendered
/// while its parent's scope is open) shadow the outer scope until they return.
pub(crate) fn with_render_scope<R>(instance: &Rc<InstanceCore>, f: impl FnOnce() -> R) -> R {
	instance.slots_mut().begin_render();
	RENDER_STACK.with(|stack| stack.borrow_mut().push(Rc::clone(instance)));
	let _guard = ScopeGuard;
	f()
}

/// Returns the instance currently rendering.
///
/// # Panics
///
/// Panics when called outside a component render; `hook` names the caller in
/// the message.
pub(crate) fn current_instance(hook: &str) -> Rc<InstanceCore> {
	let current = RENDER_STACK.with(|stack| stack.borrow().last().cloned());
	match current {
		Some(instance) => instance,
		None => panic!("{hook} must be called while a component is rendering"),
	}
}

/// Returns `true` while some component is rendering.
pub fn is_rendering() -> bool {
	RENDER_STACK.with(|stack| !stack.borrow().is_empty())
}
