//! Node-level create, update, replace and remove.

use std::rc::{Rc, Weak};

use super::Commit;
use super::children::reconcile_children;
use crate::callback::Callback;
use crate::component::{Attributes, ComponentFn, InstanceCore, Props, VNode, VNodeKind};
use crate::dom::{Event, NodeId};
use crate::reactive::Scheduler;
use crate::{debug_log, warn_log};

/// Builds the host subtree for `next`, detached.
///
/// `parent` is where the subtree will be attached; component instances
/// remember it for their own re-renders. Returns `None` when the node could
/// not be created. The error is recorded and nothing is left behind.
pub(crate) fn create(commit: &mut Commit, next: VNode, parent: NodeId) -> Option<VNode> {
	let (kind, attributes, children) = next.into_parts();
	match kind {
		VNodeKind::Text(content) => match commit.host.create_text(&content) {
			Ok(id) => Some(VNode::bind_element(
				VNodeKind::Text(content),
				attributes,
				Vec::new(),
				id,
			)),
			Err(e) => {
				commit.record(e);
				None
			}
		},
		VNodeKind::Element(tag) => {
			let id = match commit.host.create_element(&tag) {
				Ok(id) => id,
				Err(e) => {
					commit.record(e);
					return None;
				}
			};
			apply_attributes(commit, id, None, &attributes);
			let mut bound = Vec::with_capacity(children.len());
			for child in children {
				let Some(child) = create(commit, child, id) else {
					continue;
				};
				if let Some(child) = insert(commit, child, id, bound.len()) {
					bound.push(child);
				}
			}
			Some(VNode::bind_element(
				VNodeKind::Element(tag),
				attributes,
				bound,
				id,
			))
		}
		VNodeKind::Component(component) => {
			create_component(commit, component, attributes, children, parent)
		}
	}
}

fn create_component(
	commit: &mut Commit,
	component: ComponentFn,
	attributes: Attributes,
	children: Vec<VNode>,
	parent: NodeId,
) -> Option<VNode> {
	let props = Props::from_parts(attributes.clone(), children.clone());
	let instance = InstanceCore::new(
		component.clone(),
		props,
		Rc::clone(&commit.host),
		Rc::clone(&commit.scheduler),
		commit.depth,
	);
	let tree = match instance.render_tree() {
		Ok(tree) => tree,
		Err(e) => {
			commit.record(e);
			return None;
		}
	};

	let saved = commit.depth;
	commit.depth = instance.depth() + 1;
	let root = create(commit, tree, parent);
	commit.depth = saved;

	let root = root?;
	instance.attach(root, parent);
	commit.committed(Rc::clone(&instance));
	debug_log!("created component {} at depth {}", instance.name(), instance.depth());
	Some(VNode::bind_component(
		VNodeKind::Component(component),
		attributes,
		children,
		instance,
	))
}

/// Inserts a created subtree at `index` under `parent`.
///
/// On failure the subtree is discarded and `None` is returned.
pub(crate) fn insert(
	commit: &mut Commit,
	node: VNode,
	parent: NodeId,
	index: usize,
) -> Option<VNode> {
	let host = node.host()?;
	match commit.host.insert_child(parent, host, index) {
		Ok(()) => Some(node),
		Err(e) => {
			commit.record(e);
			discard(commit, node);
			None
		}
	}
}

/// Reconciles `next` against the committed `prev` under `parent`.
///
/// Always returns the tree that is committed afterwards. When the update
/// fails, that is the previous tree.
pub(crate) fn update(commit: &mut Commit, mut prev: VNode, next: VNode, parent: NodeId) -> VNode {
	if !prev.kind().same_kind(next.kind()) {
		return replace(commit, prev, next, parent);
	}

	match next.kind() {
		VNodeKind::Text(_) => {
			let Some(id) = prev.bound_host() else {
				return replace(commit, prev, next, parent);
			};
			if prev.text_content() != next.text_content() {
				let content = next.text_content().unwrap_or_default();
				if let Err(e) = commit.host.set_text(id, content) {
					commit.record(e);
					return prev;
				}
			}
			let (kind, attributes, _) = next.into_parts();
			VNode::bind_element(kind, attributes, Vec::new(), id)
		}
		VNodeKind::Element(_) => {
			let Some(id) = prev.bound_host() else {
				return replace(commit, prev, next, parent);
			};
			apply_attributes(commit, id, Some(prev.attributes()), next.attributes());
			let previous_children = prev.take_children();
			let (kind, attributes, children) = next.into_parts();
			let children = reconcile_children(commit, previous_children, children, id);
			VNode::bind_element(kind, attributes, children, id)
		}
		VNodeKind::Component(component) => {
			let Some(instance) = prev.instance().cloned() else {
				return replace(commit, prev, next, parent);
			};
			if instance.receive(component.clone(), next.props()) {
				instance.update_within(commit);
			}
			let (kind, attributes, children) = next.into_parts();
			VNode::bind_component(kind, attributes, children, instance)
		}
	}
}

/// Builds `next`, then swaps it in for `prev`.
///
/// If `next` cannot be built the previous subtree stays in place.
fn replace(commit: &mut Commit, prev: VNode, next: VNode, parent: NodeId) -> VNode {
	let Some(old_host) = prev.host() else {
		return create(commit, next, parent)
			.and_then(|node| {
				let index = commit.host.child_count(parent);
				insert(commit, node, parent, index)
			})
			.unwrap_or(prev);
	};
	let Some(node) = create(commit, next, parent) else {
		return prev;
	};
	let Some(new_host) = node.host() else {
		return prev;
	};

	unmount_tree(&prev);
	match commit.host.replace_child(parent, new_host, old_host) {
		Ok(()) => {
			commit.host.release(old_host);
			node
		}
		Err(e) => {
			commit.record(e);
			discard(commit, node);
			prev
		}
	}
}

/// Unmounts `node` and detaches its host subtree from `parent`.
pub(crate) fn remove(commit: &mut Commit, parent: NodeId, node: VNode) {
	let host = node.host();
	unmount_tree(&node);
	if let Some(host) = host {
		let result = commit.host.remove_child(parent, host);
		commit.record_result(result);
		commit.host.release(host);
	}
}

/// Unmounts and releases a subtree that never made it into the document.
fn discard(commit: &mut Commit, node: VNode) {
	let host = node.host();
	unmount_tree(&node);
	if let Some(host) = host {
		commit.host.release(host);
	}
}

/// Destroys every component instance in a committed subtree.
///
/// Each instance runs its own cleanups before those of its descendants.
pub(crate) fn unmount_tree(node: &VNode) {
	match node.instance() {
		Some(instance) => instance.destroy(),
		None => {
			for child in node.children() {
				unmount_tree(child);
			}
		}
	}
}

/// Brings the host attributes, styles and listeners of `id` from `old` to `new`.
fn apply_attributes(commit: &mut Commit, id: NodeId, old: Option<&Attributes>, new: &Attributes) {
	let host = Rc::clone(&commit.host);

	if let Some(old) = old {
		for (name, value) in old.values() {
			if new.get(name).is_none() && value.to_host_value().is_some() {
				commit.record_result(host.remove_attribute(id, name));
			}
		}
		for (property, _) in old.styles() {
			if new.get_style(property).is_none() {
				commit.record_result(host.remove_style(id, property));
			}
		}
		for (event, _) in old.handlers() {
			if new.handler(event).is_none() {
				commit.record_result(host.remove_listener(id, event));
			}
		}
	}

	for (name, value) in new.values() {
		let previous = old.and_then(|old| old.get(name));
		if previous == Some(value) {
			continue;
		}
		match value.to_host_value() {
			Some(host_value) => commit.record_result(host.set_attribute(id, name, &host_value)),
			None => {
				if previous.is_some_and(|p| p.to_host_value().is_some()) {
					commit.record_result(host.remove_attribute(id, name));
				}
			}
		}
	}

	for (property, value) in new.styles() {
		if old.and_then(|old| old.get_style(property)) != Some(value) {
			commit.record_result(host.set_style(id, property, value));
		}
	}

	for (event, handler) in new.handlers() {
		let unchanged = old
			.and_then(|old| old.handler(event))
			.is_some_and(|previous| previous.ptr_eq(handler));
		if unchanged {
			continue;
		}
		let listener = batched(&commit.scheduler, handler.clone());
		if let Err(e) = host.add_listener(id, event, listener) {
			warn_log!("failed to bind {} handler on node {:?}", event, id);
			commit.record(e);
		}
	}
}

/// Wraps a handler so the updates it triggers are batched into one flush.
fn batched(scheduler: &Rc<Scheduler>, handler: Callback<Event>) -> Callback<Event> {
	let scheduler: Weak<Scheduler> = Rc::downgrade(scheduler);
	Callback::new(move |event: Event| match scheduler.upgrade() {
		Some(scheduler) => scheduler.batch(|| handler.call(event)),
		None => handler.call(event),
	})
}
