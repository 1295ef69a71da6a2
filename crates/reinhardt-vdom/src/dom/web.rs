//! Browser DOM host (wasm32 only).

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use super::{Event, EventType, HostDocument, NodeId};
use crate::callback::Callback;
use crate::error::HostError;

type Listener = Closure<dyn FnMut(web_sys::Event)>;

/// [`HostDocument`] backed by `web_sys::Document`.
///
/// Nodes the runtime creates or looks up are registered in a handle table;
/// listeners are kept alive by the table until removed or released.
pub struct WebDocument {
	document: web_sys::Document,
	nodes: RefCell<HashMap<NodeId, web_sys::Node>>,
	listeners: RefCell<HashMap<(NodeId, EventType), Listener>>,
	next_id: Cell<u64>,
}

impl WebDocument {
	/// Wraps the window's document.
	pub fn from_window() -> Result<Self, HostError> {
		let document = web_sys::window()
			.and_then(|w| w.document())
			.ok_or_else(|| HostError::MutationFailed("no document available".to_string()))?;
		Ok(Self::new(document))
	}

	/// Wraps a document.
	pub fn new(document: web_sys::Document) -> Self {
		Self {
			document,
			nodes: RefCell::new(HashMap::new()),
			listeners: RefCell::new(HashMap::new()),
			next_id: Cell::new(1),
		}
	}

	fn register(&self, node: web_sys::Node) -> NodeId {
		let id = NodeId::from_raw(self.next_id.get());
		self.next_id.set(id.as_u64() + 1);
		self.nodes.borrow_mut().insert(id, node);
		id
	}

	fn lookup(&self, id: NodeId) -> Result<web_sys::Node, HostError> {
		self.nodes
			.borrow()
			.get(&id)
			.cloned()
			.ok_or(HostError::UnknownNode(id.as_u64()))
	}

	fn element(&self, id: NodeId) -> Result<web_sys::Element, HostError> {
		self.lookup(id)?
			.dyn_into::<web_sys::Element>()
			.map_err(|_| HostError::NotAnElement(id.as_u64()))
	}

	fn style_of(&self, id: NodeId) -> Result<web_sys::CssStyleDeclaration, HostError> {
		self.element(id)?
			.dyn_into::<web_sys::HtmlElement>()
			.map(|e| e.style())
			.map_err(|_| HostError::NotAnElement(id.as_u64()))
	}

	fn id_of(&self, node: &web_sys::Node) -> Option<NodeId> {
		self.nodes
			.borrow()
			.iter()
			.find(|(_, n)| *n == node)
			.map(|(id, _)| *id)
	}
}

fn js_error(value: wasm_bindgen::JsValue) -> HostError {
	HostError::MutationFailed(format!("{:?}", value))
}

impl HostDocument for WebDocument {
	fn create_element(&self, tag: &str) -> Result<NodeId, HostError> {
		let element = self
			.document
			.create_element(tag)
			.map_err(|_| HostError::CreateElementFailed(tag.to_string()))?;
		Ok(self.register(element.into()))
	}

	fn create_text(&self, content: &str) -> Result<NodeId, HostError> {
		let text = self.document.create_text_node(content);
		Ok(self.register(text.into()))
	}

	fn set_text(&self, node: NodeId, content: &str) -> Result<(), HostError> {
		self.lookup(node)?.set_text_content(Some(content));
		Ok(())
	}

	fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> Result<(), HostError> {
		let element = self.element(node)?;
		// Keep live form state in sync with the attribute.
		if name == "value"
			&& let Some(input) = element.dyn_ref::<web_sys::HtmlInputElement>()
		{
			input.set_value(value);
		}
		element.set_attribute(name, value).map_err(js_error)
	}

	fn remove_attribute(&self, node: NodeId, name: &str) -> Result<(), HostError> {
		self.element(node)?.remove_attribute(name).map_err(js_error)
	}

	fn set_style(&self, node: NodeId, property: &str, value: &str) -> Result<(), HostError> {
		self.style_of(node)?
			.set_property(property, value)
			.map_err(js_error)
	}

	fn remove_style(&self, node: NodeId, property: &str) -> Result<(), HostError> {
		self.style_of(node)?
			.remove_property(property)
			.map(|_| ())
			.map_err(js_error)
	}

	fn insert_child(&self, parent: NodeId, child: NodeId, index: usize) -> Result<(), HostError> {
		let parent_node = self.lookup(parent)?;
		let child_node = self.lookup(child)?;
		let children = parent_node.child_nodes();
		// The reference sibling is computed as if the child were already removed.
		let mut reference = None;
		let mut position = 0;
		for i in 0..children.length() {
			let Some(candidate) = children.item(i) else {
				continue;
			};
			if candidate == child_node {
				continue;
			}
			if position == index {
				reference = Some(candidate);
				break;
			}
			position += 1;
		}
		parent_node
			.insert_before(&child_node, reference.as_ref())
			.map(|_| ())
			.map_err(js_error)
	}

	fn replace_child(
		&self,
		parent: NodeId,
		new_child: NodeId,
		old_child: NodeId,
	) -> Result<(), HostError> {
		self.lookup(parent)?
			.replace_child(&self.lookup(new_child)?, &self.lookup(old_child)?)
			.map(|_| ())
			.map_err(js_error)
	}

	fn remove_child(&self, parent: NodeId, child: NodeId) -> Result<(), HostError> {
		self.lookup(parent)?
			.remove_child(&self.lookup(child)?)
			.map(|_| ())
			.map_err(js_error)
	}

	fn parent(&self, node: NodeId) -> Option<NodeId> {
		let parent = self.lookup(node).ok()?.parent_node()?;
		self.id_of(&parent)
	}

	fn child_count(&self, node: NodeId) -> usize {
		self.lookup(node)
			.map(|n| n.child_nodes().length() as usize)
			.unwrap_or(0)
	}

	fn add_listener(
		&self,
		node: NodeId,
		event: &EventType,
		handler: Callback<Event>,
	) -> Result<(), HostError> {
		self.remove_listener(node, event)?;
		let target = self.element(node)?;
		let event_type = event.clone();
		let closure = Closure::wrap(Box::new(move |raw: web_sys::Event| {
			let mut wrapped = Event::new(event_type.clone()).with_target(node);
			if let Some(input) = raw
				.target()
				.and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
			{
				wrapped = wrapped.with_value(input.value());
			}
			handler.call(wrapped.with_raw(raw));
		}) as Box<dyn FnMut(web_sys::Event)>);
		target
			.add_event_listener_with_callback(event.as_str(), closure.as_ref().unchecked_ref())
			.map_err(js_error)?;
		self.listeners
			.borrow_mut()
			.insert((node, event.clone()), closure);
		Ok(())
	}

	fn remove_listener(&self, node: NodeId, event: &EventType) -> Result<(), HostError> {
		let removed = self.listeners.borrow_mut().remove(&(node, event.clone()));
		if let Some(closure) = removed {
			self.element(node)?
				.remove_event_listener_with_callback(
					event.as_str(),
					closure.as_ref().unchecked_ref(),
				)
				.map_err(js_error)?;
		}
		Ok(())
	}

	fn element_by_id(&self, id: &str) -> Option<NodeId> {
		let element = self.document.get_element_by_id(id)?;
		let node: web_sys::Node = element.into();
		Some(self.id_of(&node).unwrap_or_else(|| self.register(node)))
	}

	fn release(&self, node: NodeId) {
		let Ok(root) = self.lookup(node) else {
			return;
		};
		if let Some(parent) = root.parent_node() {
			let _ = parent.remove_child(&root);
		}
		let released: Vec<NodeId> = self
			.nodes
			.borrow()
			.iter()
			.filter(|(_, n)| root.contains(Some(n)))
			.map(|(id, _)| *id)
			.collect();
		let mut listeners = self.listeners.borrow_mut();
		listeners.retain(|(id, _), _| !released.contains(id));
		drop(listeners);
		let mut nodes = self.nodes.borrow_mut();
		for id in released {
			nodes.remove(&id);
		}
	}
}
