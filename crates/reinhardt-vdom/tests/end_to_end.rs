//! End-to-end tests driving applications through host events
//!
//! Success Criteria:
//! 1. A clicked counter re-renders with the new count and keeps its nodes
//! 2. A keyed list driven by events preserves surviving items
//! 3. An `App` routes, follows links and stops cleanly
//! 4. Configuration loaded from JSON selects the container
//!
//! Test Categories:
//! - Counter: 2 tests
//! - Keyed list: 1 test
//! - App shell: 3 tests

use std::rc::Rc;

use reinhardt_vdom::{
	App, Attributes, ComponentFn, ConfigurationError, Container, Event, EventType,
	FunctionComponent, MemoryDocument, MemoryHistory, Mountable, NavigationOutcome, Props,
	RouteParams, RuntimeConfig, VNode, button, div, h1, input, li, link, p, ul, use_state,
};
use rstest::rstest;
use serial_test::serial;

fn setup() -> (Rc<MemoryDocument>, Container) {
	let doc = Rc::new(MemoryDocument::new());
	let node = doc.create_container("app");
	let container = Container::new(doc.clone(), node);
	(doc, container)
}

fn counter(_props: &Props) -> VNode {
	let (count, set_count) = use_state(0);
	div(
		Attributes::new().class("counter"),
		(
			p((), ("Count: ", count)),
			button(
				Attributes::new().on_click(move || set_count.update(|n| n + 1)),
				"Increment",
			),
		),
	)
}

// ============================================================================
// Counter
// ============================================================================

/// Success Criterion 1: every click renders the incremented count
#[rstest]
#[serial]
fn test_counter_click() {
	let (doc, container) = setup();
	FunctionComponent::new(counter).mount(&container).unwrap();
	let button = doc.find_all(container.node(), "button")[0];
	let label = doc.find_all(container.node(), "p")[0];

	assert!(doc.click(button));
	assert!(doc.click(button));

	assert_eq!(doc.text_content(label), "Count: 2");
	assert_eq!(doc.find_all(container.node(), "button"), vec![button]);
	assert_eq!(doc.find_all(container.node(), "p"), vec![label]);
}

/// Success Criterion 1: an input handler receives the event value
#[rstest]
#[serial]
fn test_input_value_flows_into_state() {
	let (doc, container) = setup();
	let echo = FunctionComponent::new(|_props: &Props| {
		let (value, set_value) = use_state(String::new());
		div(
			(),
			(
				input(
					Attributes::new().on(EventType::Input, move |event: Event| {
						set_value.set(event.value().unwrap_or_default().to_string());
					}),
					(),
				),
				p((), value),
			),
		)
	});
	echo.mount(&container).unwrap();
	let field = doc.find_all(container.node(), "input")[0];

	let handled = doc.dispatch(
		field,
		EventType::Input,
		Event::new(EventType::Input).with_value("hello"),
	);

	assert!(handled);
	assert_eq!(doc.text_content(container.node()), "hello");
}

// ============================================================================
// Keyed list
// ============================================================================

/// Success Criterion 2: rotating a keyed list moves nodes instead of recreating them
#[rstest]
#[serial]
fn test_rotate_keyed_list() {
	let (doc, container) = setup();
	let list = FunctionComponent::new(|_props: &Props| {
		let (items, set_items) = use_state(vec![1u32, 2, 3]);
		let rotated = {
			let mut next = items.clone();
			next.rotate_left(1);
			next
		};
		div(
			(),
			(
				button(
					Attributes::new().on_click(move || set_items.set(rotated.clone())),
					"Rotate",
				),
				ul(
					(),
					items
						.iter()
						.map(|id| li(Attributes::new().key(*id), ("#", *id)))
						.collect::<Vec<_>>(),
				),
			),
		)
	});
	list.mount(&container).unwrap();
	let list_node = doc.find_all(container.node(), "ul")[0];
	let before = doc.children(list_node);
	let rotate = doc.find_all(container.node(), "button")[0];

	doc.click(rotate);

	assert_eq!(doc.text_content(list_node), "#2#3#1");
	assert_eq!(doc.children(list_node), vec![before[1], before[2], before[0]]);
}

// ============================================================================
// App shell
// ============================================================================

fn home(_props: &Props) -> VNode {
	h1((), "Home")
}

fn profile(props: &Props) -> VNode {
	h1((), format!("@{}", props.get_str("username").unwrap_or_default()))
}

fn missing(_props: &Props) -> VNode {
	h1((), "Not Found")
}

/// Success Criterion 3: an app starts, follows a link and stops
#[rstest]
#[serial]
fn test_app_routes_and_links() {
	let doc = Rc::new(MemoryDocument::new());
	let app_node = doc.create_container("app");
	let history = Rc::new(MemoryHistory::new("/"));
	let app = App::new(doc.clone(), history.clone(), RuntimeConfig::default()).unwrap();
	let weak = app.router().downgrade();
	app.route_with("/", move |_params: &RouteParams| {
		let weak = weak.clone();
		FunctionComponent::named("Home", move |_props: &Props| match weak.upgrade() {
			Some(router) => div((), (h1((), "Home"), link(&router, "/profile/ada", "Ada"))),
			None => h1((), "Home"),
		})
	})
	.unwrap()
	.route("/profile/:username", ComponentFn::new(profile))
	.unwrap()
	.not_found(ComponentFn::new(missing));

	assert_eq!(app.start().unwrap(), NavigationOutcome::Matched);
	let anchor = doc.find_all(app_node, "a")[0];
	doc.click(anchor);
	assert_eq!(doc.inner_html(app_node), "<h1>@ada</h1>");

	assert_eq!(
		app.router().navigate("/nope").unwrap(),
		NavigationOutcome::Fallback
	);
	assert_eq!(doc.inner_html(app_node), "<h1>Not Found</h1>");

	app.stop().unwrap();
	assert!(!app.is_running());
	assert_eq!(doc.inner_html(app_node), "");
}

/// Success Criterion 4: the container id comes from the configuration
#[rstest]
#[serial]
fn test_app_uses_configured_container() {
	let doc = Rc::new(MemoryDocument::new());
	doc.create_container("app");
	let root = doc.create_container("root");
	let config = RuntimeConfig::from_json(r#"{ "container_id": "root" }"#).unwrap();
	let app = App::new(doc.clone(), Rc::new(MemoryHistory::default()), config).unwrap();
	app.route("/", ComponentFn::new(home)).unwrap();

	app.start().unwrap();

	assert_eq!(doc.inner_html(root), "<h1>Home</h1>");
	assert_eq!(app.config().container_id, "root");
}

/// Success Criterion 4: a missing container is a configuration error
#[rstest]
fn test_app_without_container_fails() {
	let doc = Rc::new(MemoryDocument::new());
	let config = RuntimeConfig::new().with_container_id("main");

	let err = App::new(doc, Rc::new(MemoryHistory::default()), config).unwrap_err();

	assert_eq!(err, ConfigurationError::ContainerNotFound("main".to_string()));
	assert_eq!(err.to_string(), "Container with id 'main' not found");
}
