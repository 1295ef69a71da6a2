//! Child list reconciliation.

use std::collections::{HashMap, HashSet, VecDeque};

use super::Commit;
use super::patch::{create, insert, remove, update};
use crate::component::{Key, VNode};
use crate::dom::NodeId;
use crate::warn_log;

/// Reconciles the children of `parent` and returns the committed list.
///
/// Keyed children are matched by key, unkeyed ones by position among the
/// unkeyed children. Unmatched previous children are removed first. The
/// survivors keep their host nodes and are moved only when out of place.
pub(super) fn reconcile_children(
	commit: &mut Commit,
	previous: Vec<VNode>,
	next: Vec<VNode>,
	parent: NodeId,
) -> Vec<VNode> {
	let mut by_key: HashMap<Key, usize> = HashMap::new();
	let mut unkeyed: VecDeque<usize> = VecDeque::new();
	for (index, child) in previous.iter().enumerate() {
		match child.key() {
			Some(key) => {
				by_key.entry(key.clone()).or_insert(index);
			}
			None => unkeyed.push_back(index),
		}
	}

	let hosts: Vec<Option<NodeId>> = previous.iter().map(VNode::host).collect();
	let mut slots: Vec<Option<VNode>> = previous.into_iter().map(Some).collect();
	let mut seen: HashSet<Key> = HashSet::new();
	let mut pairs = Vec::with_capacity(next.len());
	for child in next {
		let index = match child.key() {
			Some(key) if !seen.insert(key.clone()) => {
				warn_log!("duplicate key `{}` under node {:?}; the child is recreated", key, parent);
				None
			}
			Some(key) => by_key.get(key).copied(),
			None => unkeyed.pop_front(),
		};
		let matched = index.and_then(|i| slots[i].take());
		pairs.push((matched, child));
	}

	// Host order of the surviving children, mirrored as moves are applied.
	let mut order: Vec<NodeId> = Vec::new();
	for (slot, host) in slots.iter_mut().zip(hosts) {
		match slot.take() {
			Some(stale) => remove(commit, parent, stale),
			None => order.extend(host),
		}
	}

	let mut committed = Vec::with_capacity(pairs.len());
	for (previous, next) in pairs {
		let target = committed.len();
		let node = match previous {
			Some(previous) => {
				let before = previous.host();
				let node = update(commit, previous, next, parent);
				let after = node.host();
				if before != after
					&& let Some(position) = before.and_then(|b| order.iter().position(|h| *h == b))
				{
					match after {
						Some(after) => order[position] = after,
						None => {
							order.remove(position);
						}
					}
				}
				node
			}
			None => {
				let Some(node) = create(commit, next, parent) else {
					continue;
				};
				let Some(node) = insert(commit, node, parent, target) else {
					continue;
				};
				if let Some(host) = node.host() {
					order.insert(target.min(order.len()), host);
				}
				committed.push(node);
				continue;
			}
		};

		if let Some(host) = node.host()
			&& order.get(target) != Some(&host)
		{
			match commit.host.insert_child(parent, host, target) {
				Ok(()) => {
					order.retain(|h| *h != host);
					order.insert(target.min(order.len()), host);
				}
				Err(e) => commit.record(e),
			}
		}
		committed.push(node);
	}
	committed
}
