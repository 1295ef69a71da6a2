//! Core Router Implementation.
//!
//! The router owns at most one mounted component. Every route change fully
//! unmounts the previous component (running its cleanups) before the next
//! one mounts. Navigations requested while a route change is in progress,
//! such as a redirect from an effect, are queued and resolved once it
//! completes.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use super::history::{History, SubscriptionId};
use super::pattern::{PathPattern, strip_query};
use super::RouteParams;
use crate::component::{ComponentFn, FunctionComponent, Mountable, Props};
use crate::dom::Container;
use crate::error::RouterError;
use crate::{error_log, info_log, warn_log};

/// Builds the component for a matched route.
pub type RouteFactory = Rc<dyn Fn(&RouteParams) -> Box<dyn Mountable>>;

/// What a navigation ended up showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
	/// A registered route matched and its component is mounted.
	Matched,
	/// No route matched; the not-found component is mounted.
	Fallback,
	/// No route matched and there is no fallback; the view is empty.
	Miss,
	/// The path equals the current one; nothing changed.
	Unchanged,
	/// Another route change was in progress; this one runs when it finishes.
	Deferred,
}

/// A successful [`Router::match_path`] lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch {
	/// The matched pattern as written.
	pub pattern: String,
	/// Captured parameters.
	pub params: RouteParams,
}

struct Route {
	pattern: PathPattern,
	factory: RouteFactory,
}

#[derive(Default)]
struct RouterState {
	current_path: String,
	current_params: RouteParams,
	active: Option<Box<dyn Mountable>>,
	subscription: Option<SubscriptionId>,
	started: bool,
	pending: Option<String>,
}

struct RouterInner {
	container: Container,
	history: Rc<dyn History>,
	routes: RefCell<Vec<Route>>,
	not_found: RefCell<Option<RouteFactory>>,
	on_leave: RefCell<Vec<Rc<dyn Fn()>>>,
	state: RefCell<RouterState>,
	resolving: Cell<bool>,
}

/// Client-side router.
///
/// Cloning is cheap; clones share the route table and the mounted component.
///
/// # Example
///
/// ```ignore
/// use reinhardt_vdom::router::{MemoryHistory, Router};
///
/// let router = Router::new(container, Rc::new(MemoryHistory::new("/")));
/// router.add_component("/", ComponentFn::new(home))?;
/// router.add_component("/profile/:username", ComponentFn::new(profile))?;
/// router.not_found_component(ComponentFn::new(not_found));
/// router.start()?;
///
/// router.navigate("/profile/joe")?;
/// assert_eq!(router.current_params().get("username"), Some("joe"));
/// ```
#[derive(Clone)]
pub struct Router {
	inner: Rc<RouterInner>,
}

/// A non-owning handle to a [`Router`], for use in event handlers.
#[derive(Clone)]
pub struct WeakRouter {
	inner: Weak<RouterInner>,
}

impl WeakRouter {
	/// Returns the router if it is still alive.
	pub fn upgrade(&self) -> Option<Router> {
		self.inner.upgrade().map(|inner| Router { inner })
	}
}

impl fmt::Debug for WeakRouter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("WeakRouter")
			.field("live", &(self.inner.strong_count() > 0))
			.finish()
	}
}

impl Router {
	/// Creates a router rendering into `container`.
	pub fn new(container: Container, history: Rc<dyn History>) -> Self {
		Self {
			inner: Rc::new(RouterInner {
				container,
				history,
				routes: RefCell::new(Vec::new()),
				not_found: RefCell::new(None),
				on_leave: RefCell::new(Vec::new()),
				state: RefCell::new(RouterState::default()),
				resolving: Cell::new(false),
			}),
		}
	}

	/// Returns a non-owning handle.
	pub fn downgrade(&self) -> WeakRouter {
		WeakRouter {
			inner: Rc::downgrade(&self.inner),
		}
	}

	/// Appends a route. Earlier routes take precedence.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidPattern`] if the pattern does not compile.
	pub fn add_route<F, M>(&self, pattern: &str, factory: F) -> Result<(), RouterError>
	where
		F: Fn(&RouteParams) -> M + 'static,
		M: Mountable + 'static,
	{
		let pattern = PathPattern::new(pattern)?;
		let factory: RouteFactory = Rc::new(move |params: &RouteParams| {
			Box::new(factory(params)) as Box<dyn Mountable>
		});
		self.inner.routes.borrow_mut().push(Route { pattern, factory });
		Ok(())
	}

	/// Appends a route that mounts `component`, passing each captured
	/// parameter as a string prop of the same name.
	pub fn add_component(&self, pattern: &str, component: ComponentFn) -> Result<(), RouterError> {
		self.add_route(pattern, move |params: &RouteParams| {
			FunctionComponent::from_fn(component.clone()).with_props(params_to_props(params))
		})
	}

	/// Sets the component shown when no route matches.
	pub fn not_found<F, M>(&self, factory: F)
	where
		F: Fn(&RouteParams) -> M + 'static,
		M: Mountable + 'static,
	{
		let factory: RouteFactory = Rc::new(move |params: &RouteParams| {
			Box::new(factory(params)) as Box<dyn Mountable>
		});
		*self.inner.not_found.borrow_mut() = Some(factory);
	}

	/// Sets a component function shown when no route matches.
	pub fn not_found_component(&self, component: ComponentFn) {
		self.not_found(move |_: &RouteParams| FunctionComponent::from_fn(component.clone()));
	}

	/// Registers a callback run on every route change, after the previous
	/// component is unmounted and before the next one mounts, and on
	/// [`destroy`](Self::destroy).
	pub fn on_leave(&self, callback: impl Fn() + 'static) {
		self.inner.on_leave.borrow_mut().push(Rc::new(callback));
	}

	/// Resolves the history's current path and subscribes to back/forward
	/// moves.
	///
	/// Calling `start` again while started re-resolves nothing and returns
	/// [`NavigationOutcome::Unchanged`].
	pub fn start(&self) -> Result<NavigationOutcome, RouterError> {
		if self.inner.state.borrow().started {
			warn_log!("Router already started");
			return Ok(NavigationOutcome::Unchanged);
		}
		let path = match self.inner.history.current_path() {
			path if path.is_empty() => "/".to_string(),
			path => path,
		};

		let weak = self.downgrade();
		let subscription = self.inner.history.subscribe(Rc::new(move |path: &str| {
			if let Some(router) = weak.upgrade()
				&& let Err(e) = router.on_history_move(path)
			{
				error_log!("Router: navigation to {} failed: {}", path, e);
			}
		}));
		{
			let mut state = self.inner.state.borrow_mut();
			state.subscription = Some(subscription);
			state.started = true;
			state.current_path = path.clone();
		}
		self.resolve(&path)
	}

	/// Navigates to `path`, pushing a history entry.
	///
	/// Returns [`NavigationOutcome::Unchanged`] when `path` is the current path.
	pub fn navigate(&self, path: &str) -> Result<NavigationOutcome, RouterError> {
		if !self.set_current_path(path) {
			return Ok(NavigationOutcome::Unchanged);
		}
		self.inner.history.push(path);
		self.resolve(path)
	}

	/// Navigates to `path`, replacing the current history entry.
	pub fn replace(&self, path: &str) -> Result<NavigationOutcome, RouterError> {
		if !self.set_current_path(path) {
			return Ok(NavigationOutcome::Unchanged);
		}
		self.inner.history.replace(path);
		self.resolve(path)
	}

	/// Returns the current path.
	pub fn get_current_route(&self) -> String {
		self.inner.state.borrow().current_path.clone()
	}

	/// Returns the parameters captured by the active route.
	pub fn current_params(&self) -> RouteParams {
		self.inner.state.borrow().current_params.clone()
	}

	/// Finds the first route matching `path` without mounting anything.
	pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
		self.inner.routes.borrow().iter().find_map(|route| {
			route.pattern.matches(path).map(|params| RouteMatch {
				pattern: route.pattern.raw().to_string(),
				params,
			})
		})
	}

	/// Returns the number of registered routes.
	pub fn route_count(&self) -> usize {
		self.inner.routes.borrow().len()
	}

	/// Returns `true` while a routed component is mounted.
	pub fn has_active(&self) -> bool {
		self.inner
			.state
			.borrow()
			.active
			.as_ref()
			.is_some_and(|active| active.is_mounted())
	}

	/// Returns `true` between [`start`](Self::start) and [`destroy`](Self::destroy).
	pub fn is_started(&self) -> bool {
		self.inner.state.borrow().started
	}

	/// Returns the container routed components mount into.
	pub fn container(&self) -> &Container {
		&self.inner.container
	}

	/// Unmounts the active component and drops the history subscription.
	///
	/// The route table is kept, so the router can be started again.
	pub fn destroy(&self) -> Result<(), RouterError> {
		let (active, subscription) = {
			let mut state = self.inner.state.borrow_mut();
			state.started = false;
			state.pending = None;
			state.current_params = RouteParams::default();
			(state.active.take(), state.subscription.take())
		};
		if let Some(id) = subscription {
			self.inner.history.unsubscribe(id);
		}
		let result = self.scheduled(|| {
			let result = unmount_active(active);
			self.run_on_leave();
			result
		});
		info_log!("Router destroyed");
		result
	}

	fn on_history_move(&self, path: &str) -> Result<NavigationOutcome, RouterError> {
		if !self.set_current_path(path) {
			return Ok(NavigationOutcome::Unchanged);
		}
		self.resolve(path)
	}

	/// Stores `path` as current. Returns `false` if it already was.
	fn set_current_path(&self, path: &str) -> bool {
		let mut state = self.inner.state.borrow_mut();
		if state.current_path == path {
			return false;
		}
		state.current_path = path.to_string();
		true
	}

	/// Runs `f` inside the container's scheduler batch.
	fn scheduled<R>(&self, f: impl FnOnce() -> R) -> R {
		let scheduler = Rc::clone(self.inner.container.scheduler());
		scheduler.batch(f)
	}

	fn run_on_leave(&self) {
		let callbacks: Vec<Rc<dyn Fn()>> = self.inner.on_leave.borrow().clone();
		for callback in callbacks {
			callback();
		}
	}

	/// Mounts whatever `path` resolves to, then any navigation queued meanwhile.
	fn resolve(&self, path: &str) -> Result<NavigationOutcome, RouterError> {
		if self.inner.resolving.replace(true) {
			self.inner.state.borrow_mut().pending = Some(path.to_string());
			return Ok(NavigationOutcome::Deferred);
		}
		let mut outcome = self.scheduled(|| self.swap(path));
		loop {
			let next = self.inner.state.borrow_mut().pending.take();
			let Some(next) = next else {
				break;
			};
			outcome = self.scheduled(|| self.swap(&next));
		}
		self.inner.resolving.set(false);
		outcome
	}

	fn swap(&self, path: &str) -> Result<NavigationOutcome, RouterError> {
		let previous = self.inner.state.borrow_mut().active.take();
		if let Err(e) = unmount_active(previous) {
			error_log!("Router: failed to unmount previous component: {}", e);
		}
		self.run_on_leave();

		let matched = self.inner.routes.borrow().iter().find_map(|route| {
			route
				.pattern
				.matches(path)
				.map(|params| (Rc::clone(&route.factory), params))
		});
		let (factory, params, outcome) = match matched {
			Some((factory, params)) => (factory, params, NavigationOutcome::Matched),
			None => {
				let fallback = self.inner.not_found.borrow().clone();
				match fallback {
					Some(factory) => (factory, RouteParams::default(), NavigationOutcome::Fallback),
					None => {
						warn_log!("No route found for path: {}", strip_query(path));
						self.inner.state.borrow_mut().current_params = RouteParams::default();
						return Ok(NavigationOutcome::Miss);
					}
				}
			}
		};

		self.inner.state.borrow_mut().current_params = params.clone();
		let component = factory(&params);
		let mounted = component.mount(&self.inner.container);
		if component.is_mounted() {
			self.inner.state.borrow_mut().active = Some(component);
		}
		mounted?;
		info_log!("Router: mounted component for {}", path);
		Ok(outcome)
	}
}

impl fmt::Debug for Router {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.inner.state.borrow();
		f.debug_struct("Router")
			.field("routes_count", &self.inner.routes.borrow().len())
			.field("current_path", &state.current_path)
			.field("started", &state.started)
			.finish()
	}
}

fn unmount_active(active: Option<Box<dyn Mountable>>) -> Result<(), RouterError> {
	match active {
		Some(active) if active.is_mounted() => active.unmount().map_err(RouterError::from),
		_ => Ok(()),
	}
}

fn params_to_props(params: &RouteParams) -> Props {
	params.iter().fold(Props::new(), |props, (name, value)| {
		props.with(name.to_string(), value.to_string())
	})
}
