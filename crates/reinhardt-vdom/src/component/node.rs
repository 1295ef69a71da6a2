//! Tree descriptors.

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use super::{Attributes, ComponentFn, InstanceCore, IntoChildren, Key, Props};
use crate::dom::NodeId;

/// What a descriptor stands for.
#[derive(Clone)]
pub enum VNodeKind {
	/// A host element with the given tag.
	Element(Cow<'static, str>),
	/// A host text node.
	Text(Cow<'static, str>),
	/// A child component instance.
	Component(ComponentFn),
}

impl VNodeKind {
	/// Returns `true` when a descriptor of kind `other` can update one of this
	/// kind in place: same tag, both text, or the same component function.
	pub fn same_kind(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Element(a), Self::Element(b)) => a == b,
			(Self::Text(_), Self::Text(_)) => true,
			(Self::Component(a), Self::Component(b)) => a.same_component(b),
			_ => false,
		}
	}
}

impl PartialEq for VNodeKind {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Element(a), Self::Element(b)) => a == b,
			(Self::Text(a), Self::Text(b)) => a == b,
			(Self::Component(a), Self::Component(b)) => a.same_component(b),
			_ => false,
		}
	}
}

impl fmt::Debug for VNodeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Element(tag) => f.debug_tuple("Element").field(tag).finish(),
			Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
			Self::Component(c) => f.debug_tuple("Component").field(&c.name()).finish(),
		}
	}
}

impl From<&'static str> for VNodeKind {
	fn from(tag: &'static str) -> Self {
		Self::Element(Cow::Borrowed(tag))
	}
}

impl From<String> for VNodeKind {
	fn from(tag: String) -> Self {
		Self::Element(Cow::Owned(tag))
	}
}

impl From<ComponentFn> for VNodeKind {
	fn from(component: ComponentFn) -> Self {
		Self::Component(component)
	}
}

/// An immutable description of one node of the UI tree.
///
/// Descriptors are built fresh on every render and consumed by the
/// reconciler, which returns them bound to host nodes. Cloning yields an
/// unbound copy.
///
/// For component descriptors, `attributes` and `children` are the props handed
/// to the component; the host nodes belong to the component's own tree.
pub struct VNode {
	kind: VNodeKind,
	attributes: Attributes,
	children: Vec<VNode>,
	host: Option<NodeId>,
	instance: Option<Rc<InstanceCore>>,
}

impl VNode {
	/// Creates a descriptor of the given kind.
	pub fn new(kind: impl Into<VNodeKind>) -> Self {
		Self {
			kind: kind.into(),
			attributes: Attributes::new(),
			children: Vec::new(),
			host: None,
			instance: None,
		}
	}

	/// Creates an element descriptor.
	pub fn element(tag: impl Into<Cow<'static, str>>) -> Self {
		Self::new(VNodeKind::Element(tag.into()))
	}

	/// Creates a text descriptor.
	pub fn text(content: impl Into<Cow<'static, str>>) -> Self {
		Self::new(VNodeKind::Text(content.into()))
	}

	/// Creates a component descriptor.
	pub fn component(component: ComponentFn) -> Self {
		Self::new(VNodeKind::Component(component))
	}

	/// Replaces the attributes.
	pub fn with_attributes(mut self, attributes: Attributes) -> Self {
		self.attributes = attributes;
		self
	}

	/// Appends children.
	pub fn with_children(mut self, children: impl IntoChildren) -> Self {
		children.push_into(&mut self.children);
		self
	}

	/// Returns the kind.
	pub fn kind(&self) -> &VNodeKind {
		&self.kind
	}

	/// Returns the attributes.
	pub fn attributes(&self) -> &Attributes {
		&self.attributes
	}

	/// Returns the children.
	pub fn children(&self) -> &[VNode] {
		&self.children
	}

	/// Returns the key, if any.
	pub fn key(&self) -> Option<&Key> {
		self.attributes.get_key()
	}

	/// Returns the tag of an element descriptor.
	pub fn tag(&self) -> Option<&str> {
		match &self.kind {
			VNodeKind::Element(tag) => Some(tag.as_ref()),
			_ => None,
		}
	}

	/// Returns the content of a text descriptor.
	pub fn text_content(&self) -> Option<&str> {
		match &self.kind {
			VNodeKind::Text(text) => Some(text.as_ref()),
			_ => None,
		}
	}

	/// Returns the bound host node.
	///
	/// For a component descriptor this is the root host node of the child's
	/// committed tree.
	pub fn host(&self) -> Option<NodeId> {
		match &self.instance {
			Some(instance) => instance.root_host(),
			None => self.host,
		}
	}

	/// Returns `true` once the reconciler has bound this descriptor.
	pub fn is_bound(&self) -> bool {
		self.host.is_some() || self.instance.is_some()
	}

	/// Value equality of this node alone: kind and attributes, children excluded.
	pub fn same_node(&self, other: &Self) -> bool {
		self.kind == other.kind && self.attributes == other.attributes
	}

	pub(crate) fn into_parts(self) -> (VNodeKind, Attributes, Vec<VNode>) {
		(self.kind, self.attributes, self.children)
	}

	pub(crate) fn props(&self) -> Props {
		Props::from_parts(self.attributes.clone(), self.children.clone())
	}

	pub(crate) fn bound_host(&self) -> Option<NodeId> {
		self.host
	}

	pub(crate) fn instance(&self) -> Option<&Rc<InstanceCore>> {
		self.instance.as_ref()
	}

	pub(crate) fn bind_element(
		kind: VNodeKind,
		attributes: Attributes,
		children: Vec<VNode>,
		host: NodeId,
	) -> Self {
		Self {
			kind,
			attributes,
			children,
			host: Some(host),
			instance: None,
		}
	}

	pub(crate) fn bind_component(
		kind: VNodeKind,
		attributes: Attributes,
		children: Vec<VNode>,
		instance: Rc<InstanceCore>,
	) -> Self {
		Self {
			kind,
			attributes,
			children,
			host: None,
			instance: Some(instance),
		}
	}

	pub(crate) fn take_children(&mut self) -> Vec<VNode> {
		std::mem::take(&mut self.children)
	}
}

impl Clone for VNode {
	fn clone(&self) -> Self {
		Self {
			kind: self.kind.clone(),
			attributes: self.attributes.clone(),
			children: self.children.clone(),
			host: None,
			instance: None,
		}
	}
}

/// Deep structural equality: kind, attributes and children. Host bindings are ignored.
impl PartialEq for VNode {
	fn eq(&self, other: &Self) -> bool {
		self.same_node(other) && self.children == other.children
	}
}

impl fmt::Debug for VNode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut s = f.debug_struct("VNode");
		s.field("kind", &self.kind);
		if !self.attributes.is_empty() {
			s.field("attributes", &self.attributes);
		}
		if !self.children.is_empty() {
			s.field("children", &self.children);
		}
		if let Some(host) = self.host() {
			s.field("host", &host);
		}
		s.finish()
	}
}
