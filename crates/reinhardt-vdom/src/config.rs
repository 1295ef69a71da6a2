//! Runtime configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Default id of the element the application mounts into.
pub const DEFAULT_CONTAINER_ID: &str = "app";

/// Default cap on consecutive flush passes before the scheduler gives up.
pub const DEFAULT_MAX_FLUSH_PASSES: usize = 50;

/// Settings shared by the app shell, router and scheduler.
///
/// Every field has a default, so partial JSON documents are accepted.
///
/// # Example
///
/// ```
/// use reinhardt_vdom::RuntimeConfig;
///
/// let config = RuntimeConfig::from_json(r#"{ "container_id": "root" }"#).unwrap();
/// assert_eq!(config.container_id, "root");
/// assert_eq!(config.max_flush_passes, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
	/// Id of the host element the router mounts into.
	pub container_id: String,
	/// Maximum flush passes per scheduler flush.
	pub max_flush_passes: usize,
	/// Whether setters called after unmount emit a warning.
	pub warn_on_stale_updates: bool,
}

impl Default for RuntimeConfig {
	fn default() -> Self {
		Self {
			container_id: DEFAULT_CONTAINER_ID.to_string(),
			max_flush_passes: DEFAULT_MAX_FLUSH_PASSES,
			warn_on_stale_updates: true,
		}
	}
}

impl RuntimeConfig {
	/// Creates the default configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the container id.
	pub fn with_container_id(mut self, id: impl Into<String>) -> Self {
		self.container_id = id.into();
		self
	}

	/// Sets the flush pass limit. Zero is clamped to one.
	pub fn with_max_flush_passes(mut self, passes: usize) -> Self {
		self.max_flush_passes = passes.max(1);
		self
	}

	/// Enables or disables stale-update warnings.
	pub fn with_stale_update_warnings(mut self, enabled: bool) -> Self {
		self.warn_on_stale_updates = enabled;
		self
	}

	/// Parses a configuration from JSON.
	///
	/// # Errors
	///
	/// Returns [`ConfigurationError::InvalidConfig`] for malformed JSON or a
	/// zero `max_flush_passes`.
	pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
		let config: Self = serde_json::from_str(json)
			.map_err(|e| ConfigurationError::InvalidConfig(e.to_string()))?;
		if config.max_flush_passes == 0 {
			return Err(ConfigurationError::InvalidConfig(
				"max_flush_passes must be at least 1".to_string(),
			));
		}
		Ok(config)
	}
}
