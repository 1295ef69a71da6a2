//! Live component instances.

use std::cell::{Cell, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use super::{ComponentFn, Props, VNode};
use crate::dom::{HostDocument, NodeId};
use crate::error::{LifecycleError, RenderError};
use crate::reactive::Scheduler;
use crate::reactive::scope::with_render_scope;
use crate::reactive::slots::{PositionalSlots, SlotStore};
use crate::reconcile::{self, Commit};
use crate::{debug_log, warn_log};

/// Lifecycle state of a component instance.
///
/// An instance moves from `Unmounted` to `Mounted` on its first successful
/// commit and to `Destroyed` when unmounted. It never comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
	/// Created, not yet committed.
	Unmounted,
	/// Committed to the host.
	Mounted,
	/// Unmounted; further updates are ignored.
	Destroyed,
}

/// The runtime side of a mounted component: its props, hook slots and last
/// committed tree.
pub(crate) struct InstanceCore {
	name: String,
	component: RefCell<ComponentFn>,
	props: RefCell<Props>,
	slots: RefCell<Box<dyn SlotStore>>,
	committed: RefCell<Option<VNode>>,
	parent: Cell<Option<NodeId>>,
	state: Cell<LifecycleState>,
	dirty: Cell<bool>,
	depth: usize,
	host: Rc<dyn HostDocument>,
	scheduler: Rc<Scheduler>,
}

impl InstanceCore {
	pub(crate) fn new(
		component: ComponentFn,
		props: Props,
		host: Rc<dyn HostDocument>,
		scheduler: Rc<Scheduler>,
		depth: usize,
	) -> Rc<Self> {
		let slots: Box<dyn SlotStore> = Box::new(PositionalSlots::new(component.name()));
		Rc::new(Self {
			name: component.name().to_string(),
			component: RefCell::new(component),
			props: RefCell::new(props),
			slots: RefCell::new(slots),
			committed: RefCell::new(None),
			parent: Cell::new(None),
			state: Cell::new(LifecycleState::Unmounted),
			dirty: Cell::new(false),
			depth,
			host,
			scheduler,
		})
	}

	pub(crate) fn name(&self) -> &str {
		&self.name
	}

	/// Distance from the mounted root; used to render parents before children.
	pub(crate) fn depth(&self) -> usize {
		self.depth
	}

	pub(crate) fn state(&self) -> LifecycleState {
		self.state.get()
	}

	pub(crate) fn is_mounted(&self) -> bool {
		self.state.get() == LifecycleState::Mounted
	}

	pub(crate) fn is_destroyed(&self) -> bool {
		self.state.get() == LifecycleState::Destroyed
	}

	pub(crate) fn scheduler(&self) -> &Rc<Scheduler> {
		&self.scheduler
	}

	pub(crate) fn slots_mut(&self) -> RefMut<'_, Box<dyn SlotStore>> {
		self.slots.borrow_mut()
	}

	/// Marks the instance dirty and returns whether it already was.
	pub(crate) fn mark_dirty(&self) -> bool {
		self.dirty.replace(true)
	}

	pub(crate) fn clear_dirty(&self) {
		self.dirty.set(false);
	}

	pub(crate) fn is_dirty(&self) -> bool {
		self.dirty.get()
	}

	/// Root host node of the committed tree.
	pub(crate) fn root_host(&self) -> Option<NodeId> {
		self.committed.borrow().as_ref().and_then(VNode::host)
	}

	/// Takes the component and props of a new descriptor for this instance.
	///
	/// Returns `true` when either differs from what was rendered last, so
	/// the instance needs a re-render.
	pub(crate) fn receive(&self, component: ComponentFn, props: Props) -> bool {
		let same_render = self.component.borrow().same_render(&component);
		let same_props = *self.props.borrow() == props;
		*self.component.borrow_mut() = component;
		if !same_props {
			*self.props.borrow_mut() = props;
		}
		!(same_render && same_props)
	}

	/// Runs the render function with this instance as the hook target.
	///
	/// On a render error or hook misuse the pass is discarded: no effect is
	/// staged and the committed tree stays as it was.
	pub(crate) fn render_tree(self: &Rc<Self>) -> Result<VNode, RenderError> {
		self.dirty.set(false);
		let props = self.props.borrow().clone();
		let component = self.component.borrow().clone();
		let rendered = with_render_scope(self, || component.call(&props));
		let mut slots = self.slots.borrow_mut();
		match rendered {
			Ok(tree) => {
				slots.finish_render()?;
				debug_log!("rendered `{}` ({} slots)", self.name(), slots.len());
				Ok(tree)
			}
			Err(source) => {
				slots.abort_render();
				Err(RenderError::component(self.name(), source))
			}
		}
	}

	/// Records the first committed tree and marks the instance mounted.
	pub(crate) fn attach(&self, root: VNode, parent: NodeId) {
		*self.committed.borrow_mut() = Some(root);
		self.parent.set(Some(parent));
		self.state.set(LifecycleState::Mounted);
	}

	/// Re-renders and patches the committed tree as part of `commit`.
	///
	/// Errors are recorded in the commit. A failed render keeps the previous
	/// tree.
	pub(crate) fn update_within(self: &Rc<Self>, commit: &mut Commit) {
		if !self.is_mounted() {
			return;
		}
		let next = match self.render_tree() {
			Ok(next) => next,
			Err(e) => {
				commit.record(e);
				return;
			}
		};
		let Some(parent) = self.parent.get() else {
			return;
		};
		let Some(previous) = self.committed.borrow_mut().take() else {
			return;
		};

		let saved = commit.depth;
		commit.depth = self.depth + 1;
		let node = reconcile::update(commit, previous, next, parent);
		commit.depth = saved;

		*self.committed.borrow_mut() = Some(node);
		commit.committed(Rc::clone(self));
	}

	/// Re-renders on behalf of the scheduler and runs the resulting effects.
	pub(crate) fn rerender(self: &Rc<Self>) -> Result<(), RenderError> {
		let mut commit = Commit::new(Rc::clone(&self.host), Rc::clone(&self.scheduler), self.depth + 1);
		self.update_within(&mut commit);
		commit.finish_result()
	}

	/// Runs the effects staged by the last accepted render.
	///
	/// Cleanups of re-running effects run first, in reverse declaration
	/// order, then the effects in declaration order. An effect that unmounts
	/// its own instance stops the pass; a cleanup it returned runs at once.
	pub(crate) fn run_effects(&self) {
		let mut pending = self.slots.borrow_mut().take_pending_effects();
		for effect in pending.iter_mut().rev() {
			if let Some(cleanup) = effect.previous_cleanup.take() {
				cleanup();
			}
		}
		for effect in pending {
			if !self.is_mounted() {
				debug_log!("`{}` unmounted during its effects", self.name());
				break;
			}
			let Some(cleanup) = (effect.run)() else {
				continue;
			};
			if self.is_mounted() {
				self.slots.borrow_mut().store_cleanup(effect.slot, cleanup);
			} else {
				cleanup();
			}
		}
	}

	/// Marks the instance destroyed, runs its cleanups and then destroys
	/// its descendants. Host nodes are left to the caller.
	pub(crate) fn destroy(&self) {
		if self.state.replace(LifecycleState::Destroyed) == LifecycleState::Destroyed {
			return;
		}
		self.dirty.set(false);
		let cleanups = self.slots.borrow_mut().take_cleanups();
		for cleanup in cleanups {
			cleanup();
		}
		if let Some(committed) = self.committed.borrow().as_ref() {
			reconcile::unmount_tree(committed);
		}
		debug_log!("destroyed `{}`", self.name());
	}

	/// Unmounts a root instance and removes its host subtree.
	pub(crate) fn unmount_root(&self) -> Result<(), RenderError> {
		match self.state.get() {
			LifecycleState::Mounted => {}
			LifecycleState::Unmounted => return Err(LifecycleError::NotMounted.into()),
			LifecycleState::Destroyed => return Err(LifecycleError::Terminated.into()),
		}
		let root = self.root_host();
		self.destroy();
		let committed = self.committed.borrow_mut().take();
		let (Some(parent), Some(root)) = (self.parent.get(), root) else {
			warn_log!("`{}` had no committed host node to remove", self.name());
			self.scheduler.release_root(self);
			return Ok(());
		};
		let removed = self.host.remove_child(parent, root);
		self.host.release(root);
		drop(committed);
		self.scheduler.release_root(self);
		removed.map_err(Into::into)
	}
}

impl fmt::Debug for InstanceCore {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("InstanceCore")
			.field("component", &self.name)
			.field("state", &self.state.get())
			.field("depth", &self.depth)
			.field("dirty", &self.dirty.get())
			.finish()
	}
}
