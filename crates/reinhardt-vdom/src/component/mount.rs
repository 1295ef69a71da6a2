//! Mounting components into a container.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::{ComponentFn, InstanceCore, IntoRender, LifecycleState, Props, VNode};
use crate::dom::{Container, NodeId};
use crate::error::{LifecycleError, RenderError};
use crate::reconcile::{self, Commit};
use crate::{debug_log, info_log, warn_log};

/// Something that can be attached to and detached from a container.
///
/// The router stores routed components as `Box<dyn Mountable>`.
pub trait Mountable {
	/// Renders, commits and runs the first effects.
	///
	/// # Errors
	///
	/// Returns [`LifecycleError::AlreadyMounted`] when mounted, and
	/// [`LifecycleError::Terminated`] after an unmount.
	fn mount(&self, container: &Container) -> Result<(), RenderError>;

	/// Runs every cleanup, then detaches the host subtree.
	///
	/// # Errors
	///
	/// Returns [`LifecycleError::NotMounted`] unless mounted.
	fn unmount(&self) -> Result<(), RenderError>;

	/// Returns `true` between a successful mount and the unmount.
	fn is_mounted(&self) -> bool;
}

impl<M: Mountable + ?Sized> Mountable for Box<M> {
	fn mount(&self, container: &Container) -> Result<(), RenderError> {
		(**self).mount(container)
	}

	fn unmount(&self) -> Result<(), RenderError> {
		(**self).unmount()
	}

	fn is_mounted(&self) -> bool {
		(**self).is_mounted()
	}
}

/// A root component: a render function plus the props it is mounted with.
///
/// Once mounted, the component stays live until [`Mountable::unmount`] is
/// called, whether or not this handle is kept.
///
/// # Example
///
/// ```ignore
/// use reinhardt_vdom::{FunctionComponent, Mountable, h, use_state};
///
/// let counter = FunctionComponent::new(|_props| {
///     let (count, set_count) = use_state(0);
///     h("button", Attributes::new().on_click(move || set_count.update(|c| c + 1)), count)
/// });
/// counter.mount(&container)?;
/// ```
pub struct FunctionComponent {
	component: ComponentFn,
	props: Props,
	core: RefCell<Option<Rc<InstanceCore>>>,
}

impl FunctionComponent {
	/// Wraps a render function.
	pub fn new<F, R>(render: F) -> Self
	where
		F: Fn(&Props) -> R + 'static,
		R: IntoRender,
	{
		Self::from_fn(ComponentFn::new(render))
	}

	/// Wraps a render function under an explicit name.
	pub fn named<F, R>(name: &'static str, render: F) -> Self
	where
		F: Fn(&Props) -> R + 'static,
		R: IntoRender,
	{
		Self::from_fn(ComponentFn::named(name, render))
	}

	/// Wraps an existing [`ComponentFn`].
	pub fn from_fn(component: ComponentFn) -> Self {
		Self {
			component,
			props: Props::new(),
			core: RefCell::new(None),
		}
	}

	/// Sets the props the component is mounted with.
	pub fn with_props(mut self, props: Props) -> Self {
		self.props = props;
		self
	}

	/// Returns the component name.
	pub fn name(&self) -> &str {
		self.component.name()
	}

	/// Returns the lifecycle state.
	pub fn state(&self) -> LifecycleState {
		self.core
			.borrow()
			.as_ref()
			.map_or(LifecycleState::Unmounted, |core| core.state())
	}

	/// Root host node of the committed tree, while mounted.
	pub fn root_host(&self) -> Option<NodeId> {
		self.core.borrow().as_ref().and_then(|core| core.root_host())
	}

	fn mount_core(&self, container: &Container) -> Result<(), RenderError> {
		let host = container.host();
		let scheduler = container.scheduler();
		let core = InstanceCore::new(
			self.component.clone(),
			self.props.clone(),
			Rc::clone(host),
			Rc::clone(scheduler),
			0,
		);
		let mut commit = Commit::new(Rc::clone(host), Rc::clone(scheduler), 1);
		let tree = core.render_tree()?;
		let Some(root) = reconcile::create(&mut commit, tree, container.node()) else {
			return commit.finish_result();
		};
		let index = host.child_count(container.node());
		let Some(root) = reconcile::insert(&mut commit, root, container.node(), index) else {
			return commit.finish_result();
		};
		core.attach(root, container.node());
		scheduler.retain_root(Rc::clone(&core));
		*self.core.borrow_mut() = Some(Rc::clone(&core));
		commit.committed(core);
		info_log!("mounted `{}`", self.name());
		commit.finish_result()
	}
}

impl Mountable for FunctionComponent {
	/// A failure inside a nested subtree leaves the component mounted with that
	/// subtree omitted; the error is still returned. A failure of the root
	/// itself leaves nothing behind, and mounting may be retried.
	fn mount(&self, container: &Container) -> Result<(), RenderError> {
		match self.state() {
			LifecycleState::Mounted => return Err(LifecycleError::AlreadyMounted.into()),
			LifecycleState::Destroyed => return Err(LifecycleError::Terminated.into()),
			LifecycleState::Unmounted => {}
		}
		container
			.scheduler()
			.batch_with(|| self.mount_core(container))
	}

	fn unmount(&self) -> Result<(), RenderError> {
		let core = self.core.borrow().clone();
		let core = core.ok_or(LifecycleError::NotMounted)?;
		let scheduler = Rc::clone(core.scheduler());
		let result = scheduler.batch(|| core.unmount_root());
		debug_log!("unmounted `{}`", self.name());
		result
	}

	fn is_mounted(&self) -> bool {
		self.state() == LifecycleState::Mounted
	}
}

impl fmt::Debug for FunctionComponent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FunctionComponent")
			.field("name", &self.name())
			.field("state", &self.state())
			.finish()
	}
}

/// Mounts a static tree into a container.
///
/// The tree is wrapped in a root component, so hooks used by nested
/// components work as usual. Returns the root so it can be unmounted. On
/// error, whatever part of the tree was committed is unmounted again.
pub fn render(node: VNode, container: &Container) -> Result<FunctionComponent, RenderError> {
	let root = FunctionComponent::named("Root", move |_props: &Props| node.clone());
	if let Err(e) = root.mount(container) {
		if root.is_mounted()
			&& let Err(unmount_error) = root.unmount()
		{
			warn_log!("failed to unmount partially rendered root: {}", unmount_error);
		}
		return Err(e);
	}
	Ok(root)
}
