//! Mount target: a host node plus the scheduler shared beneath it.

use std::fmt;
use std::rc::Rc;

use super::{HostDocument, NodeId};
use crate::config::RuntimeConfig;
use crate::error::{ConfigurationError, RenderError};
use crate::reactive::Scheduler;

/// A host node that components mount into.
///
/// Cloning is cheap. Clones share the host and the scheduler, so every
/// component mounted through the same container batches its updates together.
#[derive(Clone)]
pub struct Container {
	host: Rc<dyn HostDocument>,
	node: NodeId,
	scheduler: Rc<Scheduler>,
}

impl Container {
	/// Wraps an existing host node with a default scheduler.
	pub fn new(host: Rc<dyn HostDocument>, node: NodeId) -> Self {
		Self::with_config(host, node, &RuntimeConfig::default())
	}

	/// Wraps an existing host node with a scheduler built from `config`.
	pub fn with_config(host: Rc<dyn HostDocument>, node: NodeId, config: &RuntimeConfig) -> Self {
		Self {
			host,
			node,
			scheduler: Scheduler::with_config(config),
		}
	}

	/// Looks up the element with the given id.
	///
	/// # Errors
	///
	/// Returns [`ConfigurationError::ContainerNotFound`] if no such element exists.
	pub fn by_id(host: Rc<dyn HostDocument>, id: &str) -> Result<Self, ConfigurationError> {
		Self::by_id_with_config(host, id, &RuntimeConfig::default())
	}

	/// Like [`by_id`](Self::by_id), with an explicit configuration.
	pub fn by_id_with_config(
		host: Rc<dyn HostDocument>,
		id: &str,
		config: &RuntimeConfig,
	) -> Result<Self, ConfigurationError> {
		let node = host
			.element_by_id(id)
			.ok_or_else(|| ConfigurationError::ContainerNotFound(id.to_string()))?;
		Ok(Self::with_config(host, node, config))
	}

	/// Returns the host document.
	pub fn host(&self) -> &Rc<dyn HostDocument> {
		&self.host
	}

	/// Returns the container node.
	pub fn node(&self) -> NodeId {
		self.node
	}

	/// Returns the shared scheduler.
	pub fn scheduler(&self) -> &Rc<Scheduler> {
		&self.scheduler
	}

	/// Re-renders everything scheduled under this container.
	///
	/// Returns the number of component renders performed.
	pub fn flush(&self) -> Result<usize, RenderError> {
		self.scheduler.flush()
	}
}

impl fmt::Debug for Container {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Container")
			.field("node", &self.node)
			.field("pending", &self.scheduler.pending())
			.finish()
	}
}
