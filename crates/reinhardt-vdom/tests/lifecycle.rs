//! Integration tests for the component lifecycle
//!
//! Success Criteria:
//! 1. Mount and unmount are only valid from the matching state
//! 2. Unmount runs every cleanup before the host subtree is detached
//! 3. Setters called after unmount are ignored
//! 4. Nested components are created, updated and destroyed with their parent
//! 5. Runaway update loops stop at the configured pass limit
//! 6. A mounted root keeps working after its handle is dropped
//!
//! Test Categories:
//! - State transitions: 4 tests
//! - Cleanup: 2 tests
//! - Nested components: 3 tests
//! - Scheduler limits: 1 test
//! - Root ownership: 2 tests

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use reinhardt_vdom::{
	Attributes, ComponentFn, Container, FunctionComponent, LifecycleError, LifecycleState,
	MemoryDocument, Mountable, NodeId, Props, RenderError, RuntimeConfig, SetState, VNode, button,
	div, h, p, render, span, use_effect, use_effect_with, use_state,
};
use rstest::rstest;
use serial_test::serial;

fn setup() -> (Rc<MemoryDocument>, Container) {
	let doc = Rc::new(MemoryDocument::new());
	let node = doc.create_container("app");
	let container = Container::new(doc.clone(), node);
	(doc, container)
}

fn static_view(_props: &Props) -> VNode {
	p((), "static")
}

// ============================================================================
// State transitions
// ============================================================================

/// Success Criterion 1: mounting twice is rejected
#[rstest]
fn test_double_mount_is_rejected() {
	let (doc, container) = setup();
	let component = FunctionComponent::new(static_view);

	component.mount(&container).unwrap();
	let err = component.mount(&container).unwrap_err();

	assert!(matches!(err, RenderError::Lifecycle(LifecycleError::AlreadyMounted)));
	assert_eq!(doc.inner_html(container.node()), "<p>static</p>");
}

/// Success Criterion 1: unmounting before mounting is rejected
#[rstest]
fn test_unmount_before_mount_is_rejected() {
	let component = FunctionComponent::new(static_view);

	let err = component.unmount().unwrap_err();

	assert!(matches!(err, RenderError::Lifecycle(LifecycleError::NotMounted)));
	assert_eq!(component.state(), LifecycleState::Unmounted);
}

/// Success Criterion 1: an unmounted instance cannot come back
#[rstest]
fn test_unmounted_instance_is_terminal() {
	let (doc, container) = setup();
	let component = FunctionComponent::new(static_view);
	component.mount(&container).unwrap();

	component.unmount().unwrap();

	assert_eq!(component.state(), LifecycleState::Destroyed);
	assert_eq!(doc.inner_html(container.node()), "");
	assert!(matches!(
		component.mount(&container).unwrap_err(),
		RenderError::Lifecycle(LifecycleError::Terminated)
	));
	assert!(matches!(
		component.unmount().unwrap_err(),
		RenderError::Lifecycle(LifecycleError::Terminated)
	));

	// A fresh instance mounts fine.
	FunctionComponent::new(static_view).mount(&container).unwrap();
	assert_eq!(doc.inner_html(container.node()), "<p>static</p>");
}

/// Success Criterion 1: a static tree mounts through `render` and unmounts cleanly
#[rstest]
fn test_render_static_tree() {
	let (doc, container) = setup();

	let root = render(div(Attributes::new().class("shell"), span((), "hi")), &container).unwrap();
	assert_eq!(
		doc.inner_html(container.node()),
		r#"<div class="shell"><span>hi</span></div>"#
	);
	assert!(root.is_mounted());

	root.unmount().unwrap();
	assert_eq!(doc.inner_html(container.node()), "");
	assert_eq!(doc.node_count(), 2);
}

// ============================================================================
// Cleanup
// ============================================================================

/// Success Criterion 2: cleanups see the host subtree still attached
#[rstest]
#[serial]
fn test_cleanup_runs_before_detach() {
	let (doc, container) = setup();
	let observed = Rc::new(RefCell::new(Vec::new()));
	let component = FunctionComponent::new({
		let doc = doc.clone();
		let observed = observed.clone();
		let node = container.node();
		move |_props: &Props| {
			let doc = doc.clone();
			let observed = observed.clone();
			use_effect_with((), move || {
				move || observed.borrow_mut().push(doc.inner_html(node))
			});
			p((), "tracked")
		}
	});
	component.mount(&container).unwrap();

	component.unmount().unwrap();

	assert_eq!(*observed.borrow(), vec!["<p>tracked</p>".to_string()]);
	assert_eq!(doc.inner_html(container.node()), "");
}

/// Success Criterion 3: a setter captured before unmount is a no-op afterwards
#[rstest]
#[serial]
fn test_stale_setter_is_ignored() {
	let (doc, container) = setup();
	let renders = Rc::new(Cell::new(0));
	let setter: Rc<RefCell<Option<SetState<i32>>>> = Rc::new(RefCell::new(None));
	let component = FunctionComponent::new({
		let renders = renders.clone();
		let setter = setter.clone();
		move |_props: &Props| {
			renders.set(renders.get() + 1);
			let (n, set_n) = use_state(0);
			*setter.borrow_mut() = Some(set_n);
			p((), n)
		}
	});
	component.mount(&container).unwrap();
	let stale = setter.borrow().clone().unwrap();
	component.unmount().unwrap();

	stale.set(99);
	container.flush().unwrap();

	assert_eq!(renders.get(), 1);
	assert_eq!(container.scheduler().pending(), 0);
	assert_eq!(doc.inner_html(container.node()), "");
}

// ============================================================================
// Nested components
// ============================================================================

fn child(props: &Props) -> VNode {
	let label = props.get_str("label").unwrap_or("?").to_string();
	span((), label)
}

/// Success Criterion 4: child effects run before the parent's, and cleanups on unmount
#[rstest]
#[serial]
fn test_nested_effect_order() {
	let (_doc, container) = setup();
	let log: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
	let child_log = log.clone();
	let logged_child = ComponentFn::named("LoggedChild", move |_props: &Props| {
		let log = child_log.clone();
		use_effect_with((), move || {
			log.borrow_mut().push("child effect");
			move || log.borrow_mut().push("child cleanup")
		});
		span((), "child")
	});
	let component = FunctionComponent::new({
		let log = log.clone();
		move |_props: &Props| {
			let log = log.clone();
			use_effect_with((), move || {
				log.borrow_mut().push("parent effect");
				move || log.borrow_mut().push("parent cleanup")
			});
			div((), h(logged_child.clone(), (), ()))
		}
	});

	component.mount(&container).unwrap();
	component.unmount().unwrap();

	assert_eq!(
		*log.borrow(),
		vec!["child effect", "parent effect", "parent cleanup", "child cleanup"]
	);
}

/// Success Criterion 4: a removed child is destroyed, a kept child is updated in place
#[rstest]
#[serial]
fn test_child_components_follow_parent_state() {
	let (doc, container) = setup();
	let setter: Rc<RefCell<Option<SetState<Vec<&'static str>>>>> = Rc::new(RefCell::new(None));
	let component = FunctionComponent::new({
		let setter = setter.clone();
		move |_props: &Props| {
			let (labels, set_labels) = use_state(vec!["a", "b"]);
			*setter.borrow_mut() = Some(set_labels);
			div(
				(),
				labels
					.iter()
					.map(|label| {
						h(
							ComponentFn::new(child),
							Attributes::new().key(*label).attr("label", *label),
							(),
						)
					})
					.collect::<Vec<_>>(),
			)
		}
	});
	component.mount(&container).unwrap();
	let root: NodeId = component.root_host().unwrap();
	let kept = doc.children(root)[1];

	let set = setter.borrow().clone().unwrap();
	container.scheduler().batch(|| set.set(vec!["b", "c"]));

	assert_eq!(doc.inner_html(root), "<span>b</span><span>c</span>");
	assert_eq!(doc.children(root)[0], kept);
}

/// Success Criterion 4: a child whose props did not change is not re-rendered
#[rstest]
#[serial]
fn test_unchanged_child_props_skip_render() {
	let (_doc, container) = setup();
	let child_renders = Rc::new(Cell::new(0));
	let counting_child = ComponentFn::named("Counting", {
		let child_renders = child_renders.clone();
		move |props: &Props| {
			child_renders.set(child_renders.get() + 1);
			span((), props.get_int("value").unwrap_or_default())
		}
	});
	let setter: Rc<RefCell<Option<SetState<(i64, i64)>>>> = Rc::new(RefCell::new(None));
	let component = FunctionComponent::new({
		let setter = setter.clone();
		move |_props: &Props| {
			let (values, set_values) = use_state((1i64, 0i64));
			*setter.borrow_mut() = Some(set_values);
			div(
				(),
				(
					h(counting_child.clone(), Attributes::new().attr("value", values.0), ()),
					p((), values.1),
				),
			)
		}
	});
	component.mount(&container).unwrap();
	let set = setter.borrow().clone().unwrap();

	container.scheduler().batch(|| set.set((1, 5)));
	assert_eq!(child_renders.get(), 1);

	container.scheduler().batch(|| set.set((2, 5)));
	assert_eq!(child_renders.get(), 2);
}

// ============================================================================
// Scheduler limits
// ============================================================================

/// Success Criterion 5: an effect that always sets new state hits the pass limit
#[rstest]
#[serial]
fn test_update_loop_hits_pass_limit() {
	let doc = Rc::new(MemoryDocument::new());
	let node = doc.create_container("app");
	let config = RuntimeConfig::new().with_max_flush_passes(3);
	let container = Container::with_config(doc.clone(), node, &config);
	let component = FunctionComponent::new(|_props: &Props| {
		let (n, set_n) = use_state(0);
		use_effect(move || set_n.set(n + 1));
		p((), n)
	});

	let err = component.mount(&container).unwrap_err();

	assert!(matches!(err, RenderError::UpdateLimitExceeded(3)));
	assert!(component.is_mounted());
	assert_eq!(container.scheduler().pending(), 0);
	assert_eq!(doc.inner_html(node), "<p>3</p>");
}

// ============================================================================
// Root ownership
// ============================================================================

/// Success Criterion 6: dropping the handle keeps the component responsive
#[rstest]
#[serial]
fn test_dropped_handle_keeps_root_live() {
	let (doc, container) = setup();
	let cleanups = Rc::new(Cell::new(0));
	FunctionComponent::new({
		let cleanups = cleanups.clone();
		move |_props: &Props| {
			let (count, set_count) = use_state(0);
			let cleanups = cleanups.clone();
			use_effect_with((), move || move || cleanups.set(cleanups.get() + 1));
			div(
				(),
				(
					p((), count),
					button(Attributes::new().on_click(move || set_count.update(|n| n + 1)), "+"),
				),
			)
		}
	})
	.mount(&container)
	.unwrap();
	let plus = doc.find_all(container.node(), "button")[0];

	doc.click(plus);
	doc.click(plus);

	assert_eq!(doc.text_content(doc.find_all(container.node(), "p")[0]), "2");
	assert_eq!(container.scheduler().root_count(), 1);
	assert_eq!(cleanups.get(), 0);
}

/// Success Criterion 6: unmounting releases the root, and `render` roots are retained too
#[rstest]
#[serial]
fn test_unmount_releases_root() {
	let (_doc, container) = setup();
	let component = FunctionComponent::new(static_view);
	component.mount(&container).unwrap();
	let tree = render(span((), "static"), &container).unwrap();
	assert_eq!(container.scheduler().root_count(), 2);

	component.unmount().unwrap();
	assert_eq!(container.scheduler().root_count(), 1);

	tree.unmount().unwrap();
	assert_eq!(container.scheduler().root_count(), 0);
}
