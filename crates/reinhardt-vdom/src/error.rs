//! Error types for the runtime.
//!
//! Each failure class surfaces as its own type so callers can tell a broken
//! render function apart from a misaligned hook sequence or a rejected host
//! mutation. Stale state updates and unmatched navigations are not errors; they
//! are logged and reported through return values instead.

use std::error::Error as StdError;

/// Boxed error produced by a component's render function.
pub type BoxError = Box<dyn StdError + 'static>;

/// Raised while wiring the runtime to its environment.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
	/// The host document has no element with the configured id.
	#[error("Container with id '{0}' not found")]
	ContainerNotFound(String),

	/// The runtime configuration could not be parsed.
	#[error("Invalid runtime configuration: {0}")]
	InvalidConfig(String),
}

/// The hook-call sequence of a render differs from the previous render.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HookMisuseError {
	/// A different number of hooks was called than on the previous render.
	#[error(
		"component `{component}` called {actual} hooks, but {expected} on the previous render"
	)]
	CountMismatch {
		/// Name of the offending component.
		component: String,
		/// Slot count recorded by the previous render.
		expected: usize,
		/// Hook calls observed in this render.
		actual: usize,
	},

	/// The hook at a position is of a different kind than on the previous render.
	#[error(
		"component `{component}` called {found} at slot {slot}, but {expected} on the previous render"
	)]
	OrderChanged {
		/// Name of the offending component.
		component: String,
		/// Zero-based slot position.
		slot: usize,
		/// Hook kind recorded by the previous render.
		expected: &'static str,
		/// Hook kind called in this render.
		found: &'static str,
	},

	/// The hook at a position stores a different value type than before.
	#[error("component `{component}` changed the value type of {hook} at slot {slot}")]
	TypeChanged {
		/// Name of the offending component.
		component: String,
		/// Zero-based slot position.
		slot: usize,
		/// The hook called at that position.
		hook: &'static str,
	},

	/// A hook was called from inside another hook's computation.
	#[error("component `{component}` called {found} inside the {within} computation")]
	Nested {
		/// Name of the offending component.
		component: String,
		/// The hook whose computation was running.
		within: &'static str,
		/// The hook called from inside it.
		found: &'static str,
	},
}

/// A lifecycle transition was requested from the wrong state.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
	/// `mount` was called on a mounted instance.
	#[error("component is already mounted")]
	AlreadyMounted,

	/// `unmount` was called on an instance that is not mounted.
	#[error("component is not mounted")]
	NotMounted,

	/// `mount` was called after the instance was unmounted; create a new instance instead.
	#[error("component was unmounted and cannot be mounted again")]
	Terminated,
}

/// The host document rejected an operation.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
	/// The node handle does not refer to a live host node.
	#[error("unknown host node {0}")]
	UnknownNode(u64),

	/// The host could not create an element with this tag.
	#[error("failed to create element `{0}`")]
	CreateElementFailed(String),

	/// The operation needs an element but was given a text node.
	#[error("host node {0} is not an element")]
	NotAnElement(u64),

	/// A structural mutation (insert, replace, remove) failed.
	#[error("host mutation failed: {0}")]
	MutationFailed(String),
}

/// Failure while producing or committing a component tree.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
	/// The component's render function returned an error.
	#[error("component `{component}` failed to render: {source}")]
	Component {
		/// Name of the failing component.
		component: String,
		/// The error returned by the render function.
		#[source]
		source: BoxError,
	},

	/// The hook sequence was not stable across renders.
	#[error(transparent)]
	HookMisuse(#[from] HookMisuseError),

	/// The host document rejected a mutation.
	#[error(transparent)]
	Host(#[from] HostError),

	/// Invalid mount or unmount transition.
	#[error(transparent)]
	Lifecycle(#[from] LifecycleError),

	/// State updates kept scheduling renders past the configured pass limit.
	#[error("update loop did not settle after {0} flush passes")]
	UpdateLimitExceeded(usize),
}

impl RenderError {
	/// Wraps an error returned by a render function.
	pub fn component(component: impl Into<String>, source: impl Into<BoxError>) -> Self {
		Self::Component {
			component: component.into(),
			source: source.into(),
		}
	}

	/// Returns `true` when this error reports a hook-order violation.
	pub fn is_hook_misuse(&self) -> bool {
		matches!(self, Self::HookMisuse(_))
	}
}

/// Errors returned by [`Router`](crate::router::Router) operations.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
	/// The route pattern could not be compiled.
	#[error("Invalid route pattern '{pattern}': {reason}")]
	InvalidPattern {
		/// The pattern as written.
		pattern: String,
		/// Why it was rejected.
		reason: String,
	},

	/// Mounting or unmounting the routed component failed.
	#[error(transparent)]
	Render(#[from] RenderError),

	/// The router could not be attached to its container.
	#[error(transparent)]
	Configuration(#[from] ConfigurationError),
}
