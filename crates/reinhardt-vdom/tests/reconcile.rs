//! Integration tests for the diff/patch engine
//!
//! Success Criteria:
//! 1. Patching a tree against an equal tree performs no host mutation
//! 2. Keyed children keep their host nodes when reordered
//! 3. Attribute, style and handler changes are applied as a minimal diff
//! 4. A failing subtree does not prevent its siblings from committing
//! 5. Patching A into B yields the same host tree as rendering B fresh
//! 6. A child component re-renders with the function it was given last
//!
//! Test Categories:
//! - Minimal mutation: 2 tests
//! - Keyed reconciliation: 3 tests
//! - Attribute diff: 3 tests
//! - Component updates: 2 tests
//! - Failure isolation: 2 tests
//! - Properties: 3 tests

use std::rc::Rc;

use reinhardt_vdom::{
	Attributes, Component, ComponentFn, Container, MemoryDocument, Props, Reconciler, RenderError,
	VNode, div, h, li, p, span, text, ul,
};
use rstest::rstest;

fn setup() -> (Rc<MemoryDocument>, Container) {
	let doc = Rc::new(MemoryDocument::new());
	let node = doc.create_container("app");
	let container = Container::new(doc.clone(), node);
	(doc, container)
}

fn keyed_list(keys: &[&'static str]) -> VNode {
	ul(
		(),
		keys.iter()
			.map(|key| li(Attributes::new().key(*key), *key))
			.collect::<Vec<_>>(),
	)
}

// ============================================================================
// Minimal mutation
// ============================================================================

/// Success Criterion 1: an unchanged tree costs zero host mutations
#[rstest]
fn test_patch_equal_tree_performs_no_mutation() {
	let (doc, container) = setup();
	let reconciler = Reconciler::for_container(&container);
	let tree = || {
		div(
			Attributes::new().class("card").style("color", "red"),
			(h1_title(), keyed_list(&["a", "b", "c"]), text("footer")),
		)
	};

	let first = reconciler.patch(None, tree(), container.node(), 0);
	assert!(first.is_ok());
	doc.reset_mutations();

	let second = reconciler.patch(first.node, tree(), container.node(), 0);

	assert!(second.is_ok());
	assert_eq!(doc.mutation_count(), 0);
}

fn h1_title() -> VNode {
	h("h1", Attributes::new().id("title"), "Title")
}

/// Success Criterion 1: a text change is a single host mutation
#[rstest]
fn test_text_change_is_single_mutation() {
	let (doc, container) = setup();
	let reconciler = Reconciler::for_container(&container);
	let first = reconciler.patch(None, p((), "before"), container.node(), 0);
	let host = first.node.as_ref().and_then(VNode::host).unwrap();
	doc.reset_mutations();

	let second = reconciler.patch(first.node, p((), "after"), container.node(), 0);

	assert!(second.is_ok());
	assert_eq!(doc.mutation_count(), 1);
	assert_eq!(second.node.as_ref().and_then(VNode::host), Some(host));
	assert_eq!(doc.inner_html(container.node()), "<p>after</p>");
}

// ============================================================================
// Keyed reconciliation
// ============================================================================

/// Success Criterion 2: reordering keyed children moves the existing nodes
#[rstest]
fn test_keyed_reorder_reuses_host_nodes() {
	let (doc, container) = setup();
	let reconciler = Reconciler::for_container(&container);
	let first = reconciler.patch(None, keyed_list(&["a", "b", "c"]), container.node(), 0);
	let list = first.node.as_ref().and_then(VNode::host).unwrap();
	let before = doc.children(list);
	let nodes = doc.node_count();

	let second = reconciler.patch(first.node, keyed_list(&["c", "a", "b"]), container.node(), 0);

	assert!(second.is_ok());
	assert_eq!(doc.children(list), vec![before[2], before[0], before[1]]);
	assert_eq!(doc.node_count(), nodes);
	assert_eq!(doc.text_content(list), "cab");
}

/// Success Criterion 2: a removed key releases its node, an added key creates one
#[rstest]
fn test_keyed_insert_and_remove() {
	let (doc, container) = setup();
	let reconciler = Reconciler::for_container(&container);
	let first = reconciler.patch(None, keyed_list(&["a", "b", "c"]), container.node(), 0);
	let list = first.node.as_ref().and_then(VNode::host).unwrap();
	let before = doc.children(list);

	let second = reconciler.patch(first.node, keyed_list(&["a", "d", "c"]), container.node(), 0);

	assert!(second.is_ok());
	let after = doc.children(list);
	assert_eq!(after.len(), 3);
	assert_eq!(after[0], before[0]);
	assert_eq!(after[2], before[2]);
	assert!(!doc.contains(before[1]));
	assert_eq!(doc.text_content(list), "adc");
}

/// Success Criterion 2: unkeyed children are matched by position
#[rstest]
fn test_unkeyed_children_match_by_position() {
	let (doc, container) = setup();
	let reconciler = Reconciler::for_container(&container);
	let first = reconciler.patch(
		None,
		div((), (span((), "one"), span((), "two"))),
		container.node(),
		0,
	);
	let root = first.node.as_ref().and_then(VNode::host).unwrap();
	let before = doc.children(root);

	let second = reconciler.patch(
		first.node,
		div((), (span((), "uno"), span((), "two"), span((), "tres"))),
		container.node(),
		0,
	);

	assert!(second.is_ok());
	let after = doc.children(root);
	assert_eq!(&after[..2], &before[..]);
	assert_eq!(doc.text_content(root), "unotwotres");
}

// ============================================================================
// Attribute diff
// ============================================================================

/// Success Criterion 3: stale attributes, styles and handlers are removed
#[rstest]
fn test_attribute_style_and_handler_diff() {
	let (doc, container) = setup();
	let reconciler = Reconciler::for_container(&container);
	let first = reconciler.patch(
		None,
		div(
			Attributes::new()
				.class("a")
				.attr("title", "tip")
				.style("color", "red")
				.on_click(|| {}),
			(),
		),
		container.node(),
		0,
	);
	let host = first.node.as_ref().and_then(VNode::host).unwrap();
	assert_eq!(doc.listener_count(host), 1);

	let second = reconciler.patch(
		first.node,
		div(Attributes::new().class("b").style("margin", "0"), ()),
		container.node(),
		0,
	);

	assert!(second.is_ok());
	assert_eq!(doc.attribute(host, "class").as_deref(), Some("b"));
	assert_eq!(doc.attribute(host, "title"), None);
	assert_eq!(doc.style(host, "color"), None);
	assert_eq!(doc.style(host, "margin").as_deref(), Some("0"));
	assert_eq!(doc.listener_count(host), 0);
}

/// Success Criterion 3: boolean attributes are present only while `true`
#[rstest]
#[case(true, Some(""))]
#[case(false, None)]
fn test_boolean_attribute(#[case] disabled: bool, #[case] expected: Option<&str>) {
	let (doc, container) = setup();
	let reconciler = Reconciler::for_container(&container);
	let first = reconciler.patch(
		None,
		h("button", Attributes::new().attr("disabled", !disabled), "Go"),
		container.node(),
		0,
	);
	let host = first.node.as_ref().and_then(VNode::host).unwrap();

	reconciler.patch(
		first.node,
		h("button", Attributes::new().attr("disabled", disabled), "Go"),
		container.node(),
		0,
	);

	assert_eq!(doc.attribute(host, "disabled").as_deref(), expected);
}

/// Success Criterion 3: a changed tag replaces the node in place
#[rstest]
fn test_kind_change_replaces_node() {
	let (doc, container) = setup();
	let reconciler = Reconciler::for_container(&container);
	let first = reconciler.patch(None, div((), (p((), "keep"), span((), "x"))), container.node(), 0);
	let root = first.node.as_ref().and_then(VNode::host).unwrap();
	let old = doc.children(root);

	let second = reconciler.patch(
		first.node,
		div((), (p((), "keep"), h("em", (), "x"))),
		container.node(),
		0,
	);

	assert!(second.is_ok());
	let new = doc.children(root);
	assert_eq!(new[0], old[0]);
	assert_ne!(new[1], old[1]);
	assert!(!doc.contains(old[1]));
	assert_eq!(doc.inner_html(root), "<p>keep</p><em>x</em>");
}

// ============================================================================
// Component updates
// ============================================================================

fn greeting(word: &str) -> ComponentFn {
	let word = word.to_string();
	ComponentFn::named("Greeting", move |_props: &Props| text(word.clone()))
}

/// Success Criterion 6: a closure with new captured values renders its new output
#[rstest]
fn test_component_with_new_captures_rerenders() {
	let (doc, container) = setup();
	let reconciler = Reconciler::for_container(&container);
	let first = reconciler.patch(None, div((), h(greeting("Hello"), (), ())), container.node(), 0);
	let root = first.node.as_ref().and_then(VNode::host).unwrap();
	let label = doc.children(root)[0];

	let second = reconciler.patch(first.node, div((), h(greeting("Goodbye"), (), ())), container.node(), 0);

	assert!(second.is_ok());
	assert_eq!(doc.inner_html(container.node()), "<div>Goodbye</div>");
	assert_eq!(doc.children(root), vec![label]);
}

struct Banner(&'static str);

impl Component for Banner {
	fn render(&self, _props: &Props) -> VNode {
		text(self.0)
	}

	fn name() -> &'static str {
		"Banner"
	}
}

/// Success Criterion 6: a struct component with new fields renders its new output
#[rstest]
fn test_struct_component_with_new_fields_rerenders() {
	let (doc, container) = setup();
	let reconciler = Reconciler::for_container(&container);
	let banner = |word| div((), h(ComponentFn::from_component(Banner(word)), (), ()));
	let first = reconciler.patch(None, banner("Hello"), container.node(), 0);

	let second = reconciler.patch(first.node, banner("Hi"), container.node(), 0);

	assert!(second.is_ok());
	assert_eq!(doc.inner_html(container.node()), "<div>Hi</div>");
}

// ============================================================================
// Failure isolation
// ============================================================================

fn broken(_props: &Props) -> Result<VNode, String> {
	Err("no data".to_string())
}

/// Success Criterion 4: a component error leaves the siblings committed
#[rstest]
fn test_component_error_is_isolated() {
	let (doc, container) = setup();
	let reconciler = Reconciler::for_container(&container);

	let patched = reconciler.patch(
		None,
		div((), (h(ComponentFn::new(broken), (), ()), p((), "still here"))),
		container.node(),
		0,
	);

	assert_eq!(patched.errors.len(), 1);
	assert!(matches!(&patched.errors[0], RenderError::Component { source, .. } if source.to_string() == "no data"));
	assert_eq!(doc.inner_html(container.node()), "<div><p>still here</p></div>");
}

/// Success Criterion 4: a host rejection is reported without aborting the patch
#[rstest]
fn test_host_error_is_isolated() {
	let (doc, container) = setup();
	let reconciler = Reconciler::for_container(&container);

	let patched = reconciler.patch(
		None,
		div((), (h("not a tag", (), ()), span((), "ok"))),
		container.node(),
		0,
	);

	assert!(!patched.is_ok());
	assert!(matches!(patched.errors[0], RenderError::Host(_)));
	assert_eq!(doc.inner_html(container.node()), "<div><span>ok</span></div>");
}

// ============================================================================
// Properties
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod property_tests {
	use super::*;
	use proptest::prelude::*;
	use std::collections::HashSet;

	fn unique(keys: Vec<u32>) -> Vec<u32> {
		let mut seen = HashSet::new();
		keys.into_iter().filter(|key| seen.insert(*key)).collect()
	}

	fn label(prefix: &'static str) -> ComponentFn {
		ComponentFn::named("Label", move |props: &Props| {
			span((), (prefix, props.get_int("n").unwrap_or_default()))
		})
	}

	fn row(key: u32, highlighted: bool) -> VNode {
		let attributes = Attributes::new().key(key);
		let (attributes, prefix) = if highlighted {
			(attributes.class("hl"), "hl ")
		} else {
			(attributes, "plain ")
		};
		li(
			attributes,
			("item ", key, h(label(prefix), Attributes::new().attr("n", key), ())),
		)
	}

	fn rows(keys: &[u32], highlighted: bool) -> VNode {
		ul((), keys.iter().map(|key| row(*key, highlighted)).collect::<Vec<_>>())
	}

	proptest! {
		/// Property: patching A into B gives the same host tree as rendering B fresh
		#[test]
		fn prop_patch_matches_fresh_render(
			a in prop::collection::vec(0u32..16, 0..10),
			b in prop::collection::vec(0u32..16, 0..10),
			highlighted in any::<bool>(),
		) {
			let (a, b) = (unique(a), unique(b));

			let (patched_doc, patched) = setup();
			let reconciler = Reconciler::for_container(&patched);
			let first = reconciler.patch(None, rows(&a, false), patched.node(), 0);
			let second = reconciler.patch(first.node, rows(&b, highlighted), patched.node(), 0);
			prop_assert!(second.is_ok());

			let (fresh_doc, fresh) = setup();
			Reconciler::for_container(&fresh).patch(None, rows(&b, highlighted), fresh.node(), 0);

			prop_assert_eq!(
				patched_doc.inner_html(patched.node()),
				fresh_doc.inner_html(fresh.node())
			);
		}

		/// Property: patching a tree against an equal tree performs no host mutations
		#[test]
		fn prop_equal_tree_is_idempotent(
			keys in prop::collection::vec(0u32..16, 0..10),
			highlighted in any::<bool>(),
		) {
			let keys = unique(keys);
			let (doc, container) = setup();
			let reconciler = Reconciler::for_container(&container);
			let first = reconciler.patch(None, rows(&keys, highlighted), container.node(), 0);
			let before = doc.inner_html(container.node());
			doc.reset_mutations();

			let second = reconciler.patch(first.node, rows(&keys, highlighted), container.node(), 0);

			prop_assert!(second.is_ok());
			prop_assert_eq!(doc.mutation_count(), 0);
			prop_assert_eq!(doc.inner_html(container.node()), before);
		}

		/// Property: a key present before and after keeps its host node
		#[test]
		fn prop_surviving_keys_keep_their_nodes(
			a in prop::collection::vec(0u32..16, 0..10),
			b in prop::collection::vec(0u32..16, 0..10),
		) {
			let (a, b) = (unique(a), unique(b));
			let (doc, container) = setup();
			let reconciler = Reconciler::for_container(&container);
			let first = reconciler.patch(None, rows(&a, false), container.node(), 0);
			let list = first.node.as_ref().and_then(VNode::host).unwrap();
			let before = doc.children(list);

			reconciler.patch(first.node, rows(&b, false), container.node(), 0);
			let after = doc.children(list);

			for (new_index, key) in b.iter().enumerate() {
				if let Some(old_index) = a.iter().position(|k| k == key) {
					prop_assert_eq!(after[new_index], before[old_index]);
				}
			}
		}
	}
}
