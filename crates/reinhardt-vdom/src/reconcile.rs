//! Reconciliation: diff a new descriptor tree against the committed one and
//! apply the minimal set of host mutations.
//!
//! ## Algorithm
//!
//! - **No previous node**: build the host subtree detached, then insert it.
//! - **Different kind** (tag, text vs element, component function): build the
//!   replacement first, unmount the old subtree, swap it in with
//!   `replace_child`, release the old host nodes.
//! - **Text**: `set_text` only when the content changed.
//! - **Same tag**: diff attributes, inline style and handlers, then the
//!   children (keyed where keys are given, positional otherwise).
//! - **Same component**: hand the child instance its new props and render
//!   function, and re-render it only when either changed.
//!
//! ## Failure isolation
//!
//! A failing subtree never aborts its siblings. Failed creations insert
//! nothing, a failed replacement keeps the old subtree, and a child component
//! whose render fails keeps its previous commit. Every error is collected and
//! returned in [`Patched::errors`].

mod children;
mod patch;

use std::fmt;
use std::rc::Rc;

use crate::component::{InstanceCore, VNode};
use crate::dom::{Container, HostDocument, NodeId};
use crate::error::RenderError;
use crate::error_log;
use crate::reactive::Scheduler;

pub(crate) use patch::{create, insert, unmount_tree, update};

/// State shared by one commit pass.
pub(crate) struct Commit {
	pub(crate) host: Rc<dyn HostDocument>,
	pub(crate) scheduler: Rc<Scheduler>,
	/// Depth assigned to component instances created at the current position.
	pub(crate) depth: usize,
	/// Instances committed in this pass, children before parents.
	committed: Vec<Rc<InstanceCore>>,
	errors: Vec<RenderError>,
}

impl Commit {
	pub(crate) fn new(host: Rc<dyn HostDocument>, scheduler: Rc<Scheduler>, depth: usize) -> Self {
		Self {
			host,
			scheduler,
			depth,
			committed: Vec::new(),
			errors: Vec::new(),
		}
	}

	pub(crate) fn record(&mut self, error: impl Into<RenderError>) {
		let error = error.into();
		error_log!("reconciliation error: {}", error);
		self.errors.push(error);
	}

	pub(crate) fn record_result(&mut self, result: Result<(), impl Into<RenderError>>) {
		if let Err(e) = result {
			self.record(e);
		}
	}

	/// Queues an instance whose effects run when the pass finishes.
	pub(crate) fn committed(&mut self, instance: Rc<InstanceCore>) {
		self.committed.push(instance);
	}

	/// Runs the effects of every instance committed in this pass that is
	/// still mounted, then returns the collected errors.
	pub(crate) fn finish(self) -> Vec<RenderError> {
		for instance in self.committed {
			if instance.is_mounted() {
				instance.run_effects();
			}
		}
		self.errors
	}

	/// Like [`finish`](Self::finish), reporting only the first error.
	pub(crate) fn finish_result(self) -> Result<(), RenderError> {
		first_error(self.finish())
	}
}

/// Returns the first error, logging any others.
pub(crate) fn first_error(errors: Vec<RenderError>) -> Result<(), RenderError> {
	let mut errors = errors.into_iter();
	match errors.next() {
		Some(first) => {
			for other in errors {
				error_log!("additional render error: {}", other);
			}
			Err(first)
		}
		None => Ok(()),
	}
}

/// Outcome of [`Reconciler::patch`].
#[derive(Debug)]
pub struct Patched {
	/// The committed tree, bound to host nodes. `None` when creation failed.
	pub node: Option<VNode>,
	/// Every error raised while reconciling, in the order encountered.
	pub errors: Vec<RenderError>,
}

impl Patched {
	/// Returns `true` when no error was raised.
	pub fn is_ok(&self) -> bool {
		self.errors.is_empty()
	}

	/// Converts into the committed tree, or the first error.
	pub fn into_result(self) -> Result<Option<VNode>, RenderError> {
		first_error(self.errors)?;
		Ok(self.node)
	}
}

/// Drives reconciliation of raw descriptor trees against a host.
///
/// Components mounted through [`Mountable`](crate::component::Mountable) use
/// the same machinery internally; this type exposes it for embedding a tree
/// at an arbitrary position.
///
/// # Example
///
/// ```ignore
/// let reconciler = Reconciler::for_container(&container);
/// let first = reconciler.patch(None, h("ul", (), items_a), container.node(), 0);
/// let second = reconciler.patch(first.node, h("ul", (), items_b), container.node(), 0);
/// ```
#[derive(Clone)]
pub struct Reconciler {
	host: Rc<dyn HostDocument>,
	scheduler: Rc<Scheduler>,
}

impl Reconciler {
	/// Creates a reconciler for a host and scheduler.
	pub fn new(host: Rc<dyn HostDocument>, scheduler: Rc<Scheduler>) -> Self {
		Self { host, scheduler }
	}

	/// Creates a reconciler sharing a container's host and scheduler.
	pub fn for_container(container: &Container) -> Self {
		Self::new(Rc::clone(container.host()), Rc::clone(container.scheduler()))
	}

	/// Reconciles `next` against `previous` under `parent`.
	///
	/// Without a previous tree, the new subtree is inserted at `index`. With
	/// one, it is updated in place and `index` is ignored. Effects of
	/// component instances created or updated by the patch run before this
	/// returns, and updates they schedule are flushed.
	pub fn patch(
		&self,
		previous: Option<VNode>,
		next: VNode,
		parent: NodeId,
		index: usize,
	) -> Patched {
		self.scheduler.batch(|| {
			let mut commit = Commit::new(Rc::clone(&self.host), Rc::clone(&self.scheduler), 0);
			let node = match previous {
				Some(previous) => Some(update(&mut commit, previous, next, parent)),
				None => create(&mut commit, next, parent)
					.and_then(|node| patch::insert(&mut commit, node, parent, index)),
			};
			let errors = commit.finish();
			Patched { node, errors }
		})
	}

	/// Unmounts a committed tree and removes it from `parent`.
	///
	/// Component cleanups run before the host nodes are detached.
	pub fn remove(&self, node: VNode, parent: NodeId) -> Result<(), RenderError> {
		let mut commit = Commit::new(Rc::clone(&self.host), Rc::clone(&self.scheduler), 0);
		patch::remove(&mut commit, parent, node);
		commit.finish_result()
	}
}

impl fmt::Debug for Reconciler {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Reconciler")
			.field("scheduler", &self.scheduler)
			.finish()
	}
}
