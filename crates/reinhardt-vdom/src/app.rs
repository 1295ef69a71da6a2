//! Application shell.
//!
//! [`App`] ties a host document, a history and a [`RuntimeConfig`] together:
//! it resolves the container, owns the router and manages its start/stop
//! cycle.

use std::fmt;
use std::rc::Rc;

use crate::component::{ComponentFn, Mountable};
use crate::config::RuntimeConfig;
use crate::dom::{Container, HostDocument};
use crate::error::{ConfigurationError, RouterError};
use crate::router::{History, NavigationOutcome, RouteParams, Router};
use crate::{info_log, warn_log};

/// A routed single-page application.
///
/// # Example
///
/// ```ignore
/// use reinhardt_vdom::{App, RuntimeConfig};
/// use reinhardt_vdom::router::BrowserHistory;
///
/// let host = Rc::new(WebDocument::from_window()?);
/// let history = Rc::new(BrowserHistory::new().expect("browser context"));
/// let app = App::new(host, history, RuntimeConfig::default())?;
/// app.route("/", ComponentFn::new(home))?
///     .route("/profile/:username", ComponentFn::new(profile))?;
/// app.start()?;
/// ```
pub struct App {
	config: RuntimeConfig,
	router: Router,
}

impl App {
	/// Creates an application rendering into the element whose id is
	/// `config.container_id`.
	///
	/// # Errors
	///
	/// Returns [`ConfigurationError::ContainerNotFound`] when the host has no
	/// such element.
	pub fn new(
		host: Rc<dyn HostDocument>,
		history: Rc<dyn History>,
		config: RuntimeConfig,
	) -> Result<Self, ConfigurationError> {
		let container = Container::by_id_with_config(host, &config.container_id, &config)?;
		Ok(Self {
			router: Router::new(container, history),
			config,
		})
	}

	/// Registers a component for a path pattern. Captured parameters are
	/// passed as string props.
	pub fn route(&self, pattern: &str, component: ComponentFn) -> Result<&Self, RouterError> {
		self.router.add_component(pattern, component)?;
		Ok(self)
	}

	/// Registers a route with a custom factory.
	pub fn route_with<F, M>(&self, pattern: &str, factory: F) -> Result<&Self, RouterError>
	where
		F: Fn(&RouteParams) -> M + 'static,
		M: Mountable + 'static,
	{
		self.router.add_route(pattern, factory)?;
		Ok(self)
	}

	/// Sets the component shown when no route matches.
	pub fn not_found(&self, component: ComponentFn) -> &Self {
		self.router.not_found_component(component);
		self
	}

	/// Starts routing from the history's current path.
	///
	/// Starting a running application only logs a warning.
	pub fn start(&self) -> Result<NavigationOutcome, RouterError> {
		if self.router.is_started() {
			warn_log!("App already initialized");
			return Ok(NavigationOutcome::Unchanged);
		}
		let outcome = self.router.start()?;
		info_log!(
			"Application started at {} in #{}",
			self.router.get_current_route(),
			self.config.container_id
		);
		Ok(outcome)
	}

	/// Unmounts the routed component and stops following history moves.
	pub fn stop(&self) -> Result<(), RouterError> {
		info_log!("Stopping application...");
		self.router.destroy()
	}

	/// Stops, then starts again from the history's current path.
	pub fn restart(&self) -> Result<NavigationOutcome, RouterError> {
		self.stop()?;
		self.start()
	}

	/// Returns `true` while started.
	pub fn is_running(&self) -> bool {
		self.router.is_started()
	}

	/// Returns the router.
	pub fn router(&self) -> &Router {
		&self.router
	}

	/// Returns the configuration the application was created with.
	pub fn config(&self) -> &RuntimeConfig {
		&self.config
	}
}

impl fmt::Debug for App {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("App")
			.field("container_id", &self.config.container_id)
			.field("router", &self.router)
			.finish()
	}
}
