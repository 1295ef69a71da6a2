//! In-memory host document.
//!
//! `MemoryDocument` keeps an arena of nodes keyed by [`NodeId`]. It counts every
//! mutation so tests can assert that a patch touched nothing. It also
//! serializes subtrees to HTML for structural comparisons.
//!
//! A fresh document contains a single `<body>` element.
//!
//! ## Example
//!
//! ```ignore
//! let doc = MemoryDocument::new();
//! let app = doc.create_container("app");
//! assert_eq!(doc.to_html(doc.body()), r#"<body><div id="app"></div></body>"#);
//! ```

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

use super::{Event, EventType, HostDocument, NodeId};
use crate::callback::Callback;
use crate::error::HostError;

enum NodeData {
	Element {
		tag: String,
		attributes: BTreeMap<String, String>,
		style: BTreeMap<String, String>,
		listeners: BTreeMap<EventType, Callback<Event>>,
	},
	Text(String),
}

struct MemoryNode {
	data: NodeData,
	parent: Option<NodeId>,
	children: Vec<NodeId>,
}

struct Arena {
	nodes: HashMap<NodeId, MemoryNode>,
	next_id: u64,
}

impl Arena {
	fn alloc(&mut self, data: NodeData) -> NodeId {
		let id = NodeId::from_raw(self.next_id);
		self.next_id += 1;
		self.nodes.insert(
			id,
			MemoryNode {
				data,
				parent: None,
				children: Vec::new(),
			},
		);
		id
	}

	fn node(&self, id: NodeId) -> Result<&MemoryNode, HostError> {
		self.nodes
			.get(&id)
			.ok_or(HostError::UnknownNode(id.as_u64()))
	}

	fn node_mut(&mut self, id: NodeId) -> Result<&mut MemoryNode, HostError> {
		self.nodes
			.get_mut(&id)
			.ok_or(HostError::UnknownNode(id.as_u64()))
	}

	fn detach(&mut self, child: NodeId) {
		let parent = self.nodes.get_mut(&child).and_then(|n| n.parent.take());
		if let Some(parent) = parent
			&& let Some(p) = self.nodes.get_mut(&parent)
		{
			p.children.retain(|c| *c != child);
		}
	}

	fn is_ancestor(&self, candidate: NodeId, node: NodeId) -> bool {
		let mut current = Some(node);
		while let Some(id) = current {
			if id == candidate {
				return true;
			}
			current = self.nodes.get(&id).and_then(|n| n.parent);
		}
		false
	}
}

/// An in-memory [`HostDocument`].
pub struct MemoryDocument {
	arena: RefCell<Arena>,
	body: NodeId,
	mutations: Cell<usize>,
}

impl Default for MemoryDocument {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryDocument {
	/// Creates a document holding an empty `<body>`.
	pub fn new() -> Self {
		let mut arena = Arena {
			nodes: HashMap::new(),
			next_id: 1,
		};
		let body = arena.alloc(NodeData::Element {
			tag: "body".to_string(),
			attributes: BTreeMap::new(),
			style: BTreeMap::new(),
			listeners: BTreeMap::new(),
		});
		Self {
			arena: RefCell::new(arena),
			body,
			mutations: Cell::new(0),
		}
	}

	/// Returns the `<body>` node.
	pub fn body(&self) -> NodeId {
		self.body
	}

	/// Appends `<div id="{id}">` to the body and returns it.
	///
	/// Setup helper; it does not count as a mutation.
	pub fn create_container(&self, id: &str) -> NodeId {
		let mut arena = self.arena.borrow_mut();
		let mut attributes = BTreeMap::new();
		attributes.insert("id".to_string(), id.to_string());
		let node = arena.alloc(NodeData::Element {
			tag: "div".to_string(),
			attributes,
			style: BTreeMap::new(),
			listeners: BTreeMap::new(),
		});
		if let Some(n) = arena.nodes.get_mut(&node) {
			n.parent = Some(self.body);
		}
		if let Some(body) = arena.nodes.get_mut(&self.body) {
			body.children.push(node);
		}
		node
	}

	/// Number of mutations since creation or the last [`reset_mutations`](Self::reset_mutations).
	pub fn mutation_count(&self) -> usize {
		self.mutations.get()
	}

	/// Resets the mutation counter.
	pub fn reset_mutations(&self) {
		self.mutations.set(0);
	}

	/// Number of live nodes, including the body.
	pub fn node_count(&self) -> usize {
		self.arena.borrow().nodes.len()
	}

	/// Returns `true` if the handle refers to a live node.
	pub fn contains(&self, node: NodeId) -> bool {
		self.arena.borrow().nodes.contains_key(&node)
	}

	/// Returns the children of a node in order.
	pub fn children(&self, node: NodeId) -> Vec<NodeId> {
		self.arena
			.borrow()
			.nodes
			.get(&node)
			.map(|n| n.children.clone())
			.unwrap_or_default()
	}

	/// Returns the tag of an element.
	pub fn tag(&self, node: NodeId) -> Option<String> {
		match &self.arena.borrow().nodes.get(&node)?.data {
			NodeData::Element { tag, .. } => Some(tag.clone()),
			NodeData::Text(_) => None,
		}
	}

	/// Returns an attribute value.
	pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
		match &self.arena.borrow().nodes.get(&node)?.data {
			NodeData::Element { attributes, .. } => attributes.get(name).cloned(),
			NodeData::Text(_) => None,
		}
	}

	/// Returns an inline style value.
	pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
		match &self.arena.borrow().nodes.get(&node)?.data {
			NodeData::Element { style, .. } => style.get(property).cloned(),
			NodeData::Text(_) => None,
		}
	}

	/// Number of listeners installed on a node.
	pub fn listener_count(&self, node: NodeId) -> usize {
		match self.arena.borrow().nodes.get(&node).map(|n| &n.data) {
			Some(NodeData::Element { listeners, .. }) => listeners.len(),
			_ => 0,
		}
	}

	/// Concatenated text of a subtree.
	pub fn text_content(&self, node: NodeId) -> String {
		let arena = self.arena.borrow();
		let mut out = String::new();
		collect_text(&arena, node, &mut out);
		out
	}

	/// Returns every element with the given tag under `root`, in document order.
	pub fn find_all(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
		let arena = self.arena.borrow();
		let mut found = Vec::new();
		find_tagged(&arena, root, tag, &mut found);
		found
	}

	/// Serializes a subtree to HTML.
	///
	/// Attributes appear in name order, followed by a `style` attribute built
	/// from the inline style map. Listeners are not serialized.
	pub fn to_html(&self, node: NodeId) -> String {
		let arena = self.arena.borrow();
		let mut out = String::new();
		write_html(&arena, node, &mut out);
		out
	}

	/// Serializes the children of `node` without the node itself.
	pub fn inner_html(&self, node: NodeId) -> String {
		let arena = self.arena.borrow();
		let mut out = String::new();
		if let Some(n) = arena.nodes.get(&node) {
			for child in &n.children {
				write_html(&arena, *child, &mut out);
			}
		}
		out
	}

	/// Invokes the handler installed for `event_type` on `node`.
	///
	/// Returns `false` when no handler is installed. The handler runs after the
	/// document borrow is released, so it may freely mutate the document.
	pub fn dispatch(&self, node: NodeId, event_type: EventType, event: Event) -> bool {
		let handler = match self.arena.borrow().nodes.get(&node).map(|n| &n.data) {
			Some(NodeData::Element { listeners, .. }) => listeners.get(&event_type).cloned(),
			_ => None,
		};
		match handler {
			Some(handler) => {
				handler.call(event.with_target(node));
				true
			}
			None => false,
		}
	}

	/// Shorthand for dispatching a click.
	pub fn click(&self, node: NodeId) -> bool {
		self.dispatch(node, EventType::Click, Event::new(EventType::Click))
	}

	fn mutate<R>(&self, f: impl FnOnce(&mut Arena) -> Result<R, HostError>) -> Result<R, HostError> {
		let result = f(&mut self.arena.borrow_mut());
		if result.is_ok() {
			self.mutations.set(self.mutations.get() + 1);
		}
		result
	}

	fn with_element<R>(
		&self,
		node: NodeId,
		f: impl FnOnce(
			&mut BTreeMap<String, String>,
			&mut BTreeMap<String, String>,
			&mut BTreeMap<EventType, Callback<Event>>,
		) -> R,
	) -> Result<R, HostError> {
		self.mutate(|arena| match &mut arena.node_mut(node)?.data {
			NodeData::Element {
				attributes,
				style,
				listeners,
				..
			} => Ok(f(attributes, style, listeners)),
			NodeData::Text(_) => Err(HostError::NotAnElement(node.as_u64())),
		})
	}
}

impl HostDocument for MemoryDocument {
	fn create_element(&self, tag: &str) -> Result<NodeId, HostError> {
		if tag.is_empty() || tag.contains(|c: char| c.is_whitespace() || c == '<' || c == '>') {
			return Err(HostError::CreateElementFailed(tag.to_string()));
		}
		self.mutate(|arena| {
			Ok(arena.alloc(NodeData::Element {
				tag: tag.to_string(),
				attributes: BTreeMap::new(),
				style: BTreeMap::new(),
				listeners: BTreeMap::new(),
			}))
		})
	}

	fn create_text(&self, content: &str) -> Result<NodeId, HostError> {
		self.mutate(|arena| Ok(arena.alloc(NodeData::Text(content.to_string()))))
	}

	fn set_text(&self, node: NodeId, content: &str) -> Result<(), HostError> {
		self.mutate(|arena| match &mut arena.node_mut(node)?.data {
			NodeData::Text(text) => {
				*text = content.to_string();
				Ok(())
			}
			NodeData::Element { .. } => Err(HostError::MutationFailed(format!(
				"node {} is not a text node",
				node.as_u64()
			))),
		})
	}

	fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> Result<(), HostError> {
		self.with_element(node, |attributes, _, _| {
			attributes.insert(name.to_string(), value.to_string());
		})
	}

	fn remove_attribute(&self, node: NodeId, name: &str) -> Result<(), HostError> {
		self.with_element(node, |attributes, _, _| {
			attributes.remove(name);
		})
	}

	fn set_style(&self, node: NodeId, property: &str, value: &str) -> Result<(), HostError> {
		self.with_element(node, |_, style, _| {
			style.insert(property.to_string(), value.to_string());
		})
	}

	fn remove_style(&self, node: NodeId, property: &str) -> Result<(), HostError> {
		self.with_element(node, |_, style, _| {
			style.remove(property);
		})
	}

	fn insert_child(&self, parent: NodeId, child: NodeId, index: usize) -> Result<(), HostError> {
		self.mutate(|arena| {
			if let NodeData::Text(_) = arena.node(parent)?.data {
				return Err(HostError::NotAnElement(parent.as_u64()));
			}
			arena.node(child)?;
			if arena.is_ancestor(child, parent) {
				return Err(HostError::MutationFailed(format!(
					"node {} cannot be inserted into its own subtree",
					child.as_u64()
				)));
			}
			arena.detach(child);
			let siblings = &mut arena.node_mut(parent)?.children;
			let index = index.min(siblings.len());
			siblings.insert(index, child);
			arena.node_mut(child)?.parent = Some(parent);
			Ok(())
		})
	}

	fn replace_child(
		&self,
		parent: NodeId,
		new_child: NodeId,
		old_child: NodeId,
	) -> Result<(), HostError> {
		self.mutate(|arena| {
			arena.node(new_child)?;
			let position = arena
				.node(parent)?
				.children
				.iter()
				.position(|c| *c == old_child)
				.ok_or_else(|| {
					HostError::MutationFailed(format!(
						"node {} is not a child of {}",
						old_child.as_u64(),
						parent.as_u64()
					))
				})?;
			arena.detach(new_child);
			// Detaching the new node from this same parent may shift the position.
			let position = arena
				.node(parent)?
				.children
				.iter()
				.position(|c| *c == old_child)
				.unwrap_or(position);
			arena.node_mut(parent)?.children[position] = new_child;
			arena.node_mut(new_child)?.parent = Some(parent);
			arena.node_mut(old_child)?.parent = None;
			Ok(())
		})
	}

	fn remove_child(&self, parent: NodeId, child: NodeId) -> Result<(), HostError> {
		self.mutate(|arena| {
			if arena.node(child)?.parent != Some(parent) {
				return Err(HostError::MutationFailed(format!(
					"node {} is not a child of {}",
					child.as_u64(),
					parent.as_u64()
				)));
			}
			arena.detach(child);
			Ok(())
		})
	}

	fn parent(&self, node: NodeId) -> Option<NodeId> {
		self.arena.borrow().nodes.get(&node).and_then(|n| n.parent)
	}

	fn child_count(&self, node: NodeId) -> usize {
		self.arena
			.borrow()
			.nodes
			.get(&node)
			.map_or(0, |n| n.children.len())
	}

	fn add_listener(
		&self,
		node: NodeId,
		event: &EventType,
		handler: Callback<Event>,
	) -> Result<(), HostError> {
		self.with_element(node, |_, _, listeners| {
			listeners.insert(event.clone(), handler);
		})
	}

	fn remove_listener(&self, node: NodeId, event: &EventType) -> Result<(), HostError> {
		self.with_element(node, |_, _, listeners| {
			listeners.remove(event);
		})
	}

	fn element_by_id(&self, id: &str) -> Option<NodeId> {
		let arena = self.arena.borrow();
		let mut stack = vec![self.body];
		while let Some(current) = stack.pop() {
			let node = arena.nodes.get(&current)?;
			if let NodeData::Element { attributes, .. } = &node.data
				&& attributes.get("id").is_some_and(|v| v == id)
			{
				return Some(current);
			}
			stack.extend(node.children.iter().rev().copied());
		}
		None
	}

	fn release(&self, node: NodeId) {
		// Handlers are dropped only after the arena borrow ends, since dropping a
		// closure may run arbitrary destructors.
		let mut dropped = Vec::new();
		{
			let mut arena = self.arena.borrow_mut();
			arena.detach(node);
			let mut stack = vec![node];
			while let Some(current) = stack.pop() {
				if let Some(removed) = arena.nodes.remove(&current) {
					stack.extend(removed.children.iter().copied());
					dropped.push(removed);
				}
			}
		}
		drop(dropped);
	}
}

fn collect_text(arena: &Arena, node: NodeId, out: &mut String) {
	let Some(n) = arena.nodes.get(&node) else {
		return;
	};
	match &n.data {
		NodeData::Text(text) => out.push_str(text),
		NodeData::Element { .. } => {
			for child in &n.children {
				collect_text(arena, *child, out);
			}
		}
	}
}

fn find_tagged(arena: &Arena, node: NodeId, wanted: &str, found: &mut Vec<NodeId>) {
	let Some(n) = arena.nodes.get(&node) else {
		return;
	};
	if let NodeData::Element { tag, .. } = &n.data {
		if tag == wanted {
			found.push(node);
		}
		for child in &n.children {
			find_tagged(arena, *child, wanted, found);
		}
	}
}

fn write_html(arena: &Arena, node: NodeId, out: &mut String) {
	let Some(n) = arena.nodes.get(&node) else {
		return;
	};
	match &n.data {
		NodeData::Text(text) => out.push_str(&escape(text)),
		NodeData::Element {
			tag,
			attributes,
			style,
			..
		} => {
			out.push('<');
			out.push_str(tag);
			for (name, value) in attributes {
				let _ = write!(out, " {}=\"{}\"", name, escape(value));
			}
			if !style.is_empty() {
				let inline = style
					.iter()
					.map(|(k, v)| format!("{}: {}", k, v))
					.collect::<Vec<_>>()
					.join("; ");
				let _ = write!(out, " style=\"{}\"", escape(&inline));
			}
			out.push('>');
			for child in &n.children {
				write_html(arena, *child, out);
			}
			let _ = write!(out, "</{}>", tag);
		}
	}
}

fn escape(value: &str) -> String {
	value
		.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use std::rc::Rc;

	#[fixture]
	fn doc() -> MemoryDocument {
		MemoryDocument::new()
	}

	#[rstest]
	fn test_build_and_serialize(doc: MemoryDocument) {
		let ul = doc.create_element("ul").unwrap();
		let li = doc.create_element("li").unwrap();
		let text = doc.create_text("a < b").unwrap();
		doc.set_attribute(ul, "class", "list").unwrap();
		doc.set_style(li, "color", "red").unwrap();
		doc.insert_child(li, text, 0).unwrap();
		doc.insert_child(ul, li, 0).unwrap();

		assert_eq!(
			doc.to_html(ul),
			r#"<ul class="list"><li style="color: red">a &lt; b</li></ul>"#
		);
		assert_eq!(doc.text_content(ul), "a < b");
		assert_eq!(doc.mutation_count(), 7);
	}

	#[rstest]
	fn test_insert_moves_attached_child(doc: MemoryDocument) {
		let parent = doc.create_element("div").unwrap();
		let a = doc.create_text("a").unwrap();
		let b = doc.create_text("b").unwrap();
		let c = doc.create_text("c").unwrap();
		for (i, n) in [a, b, c].into_iter().enumerate() {
			doc.insert_child(parent, n, i).unwrap();
		}

		doc.insert_child(parent, c, 0).unwrap();
		assert_eq!(doc.children(parent), vec![c, a, b]);
		assert_eq!(doc.parent(c), Some(parent));
	}

	#[rstest]
	fn test_replace_child(doc: MemoryDocument) {
		let parent = doc.create_element("div").unwrap();
		let old = doc.create_element("span").unwrap();
		let new = doc.create_element("p").unwrap();
		doc.insert_child(parent, old, 0).unwrap();

		doc.replace_child(parent, new, old).unwrap();
		assert_eq!(doc.children(parent), vec![new]);
		assert_eq!(doc.parent(old), None);
	}

	#[rstest]
	fn test_text_node_rejects_element_operations(doc: MemoryDocument) {
		let text = doc.create_text("x").unwrap();
		assert_eq!(
			doc.set_attribute(text, "id", "y"),
			Err(HostError::NotAnElement(text.as_u64()))
		);
	}

	#[rstest]
	#[case("")]
	#[case("bad tag")]
	fn test_invalid_tag(doc: MemoryDocument, #[case] tag: &str) {
		assert!(matches!(
			doc.create_element(tag),
			Err(HostError::CreateElementFailed(_))
		));
	}

	#[rstest]
	fn test_release_forgets_subtree(doc: MemoryDocument) {
		let container = doc.create_container("app");
		let div = doc.create_element("div").unwrap();
		let text = doc.create_text("x").unwrap();
		doc.insert_child(div, text, 0).unwrap();
		doc.insert_child(container, div, 0).unwrap();

		doc.release(div);
		assert!(!doc.contains(div));
		assert!(!doc.contains(text));
		assert_eq!(doc.child_count(container), 0);
	}

	#[rstest]
	fn test_element_by_id_and_dispatch(doc: MemoryDocument) {
		let container = doc.create_container("app");
		assert_eq!(doc.element_by_id("app"), Some(container));
		assert_eq!(doc.element_by_id("missing"), None);

		let button = doc.create_element("button").unwrap();
		let clicks = Rc::new(Cell::new(0));
		let c = Rc::clone(&clicks);
		doc.add_listener(
			button,
			&EventType::Click,
			Callback::new(move |e: Event| {
				assert!(e.target().is_some());
				c.set(c.get() + 1);
			}),
		)
		.unwrap();

		assert!(doc.click(button));
		assert!(!doc.dispatch(button, EventType::Input, Event::new(EventType::Input)));
		assert_eq!(clicks.get(), 1);
		assert_eq!(doc.listener_count(button), 1);
	}
}
