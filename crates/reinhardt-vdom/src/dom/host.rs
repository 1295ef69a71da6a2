//! The host document trait.

use std::fmt;

use super::{Event, EventType};
use crate::callback::Callback;
use crate::error::HostError;

/// Opaque handle to a node owned by a [`HostDocument`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
	/// Wraps a raw handle. Only host implementations should mint ids.
	pub fn from_raw(raw: u64) -> Self {
		Self(raw)
	}

	/// Returns the raw handle.
	pub fn as_u64(self) -> u64 {
		self.0
	}
}

impl fmt::Debug for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "NodeId({})", self.0)
	}
}

/// A mutable tree of elements and text nodes.
///
/// All methods take `&self`; implementations use interior mutability so the
/// document can be shared as `Rc<dyn HostDocument>` between the reconciler,
/// the router and installed event handlers.
///
/// `insert_child` follows DOM semantics: a child that is already attached
/// somewhere is moved, not copied. Indices past the end append.
pub trait HostDocument {
	/// Creates a detached element.
	fn create_element(&self, tag: &str) -> Result<NodeId, HostError>;

	/// Creates a detached text node.
	fn create_text(&self, content: &str) -> Result<NodeId, HostError>;

	/// Replaces the content of a text node.
	fn set_text(&self, node: NodeId, content: &str) -> Result<(), HostError>;

	/// Sets an attribute on an element.
	fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> Result<(), HostError>;

	/// Removes an attribute from an element.
	fn remove_attribute(&self, node: NodeId, name: &str) -> Result<(), HostError>;

	/// Sets one inline style property.
	fn set_style(&self, node: NodeId, property: &str, value: &str) -> Result<(), HostError>;

	/// Removes one inline style property.
	fn remove_style(&self, node: NodeId, property: &str) -> Result<(), HostError>;

	/// Inserts (or moves) `child` so that it ends up at `index` under `parent`.
	fn insert_child(&self, parent: NodeId, child: NodeId, index: usize) -> Result<(), HostError>;

	/// Puts `new_child` where `old_child` is and detaches `old_child`.
	fn replace_child(
		&self,
		parent: NodeId,
		new_child: NodeId,
		old_child: NodeId,
	) -> Result<(), HostError>;

	/// Detaches `child` from `parent`.
	fn remove_child(&self, parent: NodeId, child: NodeId) -> Result<(), HostError>;

	/// Returns the parent of a node, if attached.
	fn parent(&self, node: NodeId) -> Option<NodeId>;

	/// Returns the number of children of a node.
	fn child_count(&self, node: NodeId) -> usize;

	/// Installs the handler for one event type, replacing any previous one.
	fn add_listener(
		&self,
		node: NodeId,
		event: &EventType,
		handler: Callback<Event>,
	) -> Result<(), HostError>;

	/// Removes the handler for one event type.
	fn remove_listener(&self, node: NodeId, event: &EventType) -> Result<(), HostError>;

	/// Finds an element by its `id` attribute.
	fn element_by_id(&self, id: &str) -> Option<NodeId>;

	/// Forgets a node and its descendants, dropping their listeners.
	///
	/// The handles must not be used afterwards.
	fn release(&self, node: NodeId);
}
