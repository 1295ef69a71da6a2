//! Logging abstraction layer for reinhardt-vdom
//!
//! The runtime logs through [`tracing`] so that the embedding application decides
//! where records go (`tracing-subscriber` on native targets, `tracing-wasm` in the
//! browser). These macros pin every record to the `reinhardt_vdom` target.
//!
//! ## Macro Overview
//!
//! | Macro | Level | Feature Required |
//! |-------|-------|------------------|
//! | `debug_log!` | `DEBUG` | `debug-hooks` |
//! | `info_log!` | `INFO` | None |
//! | `warn_log!` | `WARN` | None |
//! | `error_log!` | `ERROR` | None |
//!
//! ## Example
//!
//! ```ignore
//! use reinhardt_vdom::{debug_log, warn_log};
//!
//! // Only emitted when the `debug-hooks` feature is enabled
//! debug_log!("slot {} reused", index);
//!
//! warn_log!("state update on unmounted component `{}` ignored", name);
//! ```

/// Logs a debug message (requires the `debug-hooks` feature)
///
/// Used for hook-slot and reconciler internals. Compiles to a no-op without the
/// feature so hot paths pay nothing for it.
#[macro_export]
#[cfg(feature = "debug-hooks")]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::debug!(target: "reinhardt_vdom", $($arg)*);
	}};
}

/// No-op debug_log when the `debug-hooks` feature is disabled
#[macro_export]
#[cfg(not(feature = "debug-hooks"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{}};
}

/// Logs an info message.
///
/// # Example
///
/// ```ignore
/// info_log!("Router: mounted component for {}", path);
/// ```
#[macro_export]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::info!(target: "reinhardt_vdom", $($arg)*);
	}};
}

/// Logs a warning message.
///
/// # Example
///
/// ```ignore
/// warn_log!("No route found for path: {}", path);
/// ```
#[macro_export]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::warn!(target: "reinhardt_vdom", $($arg)*);
	}};
}

/// Logs an error message.
///
/// # Example
///
/// ```ignore
/// error_log!("Deferred flush failed: {}", error);
/// ```
#[macro_export]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::error!(target: "reinhardt_vdom", $($arg)*);
	}};
}

#[cfg(test)]
mod tests {
	use rstest::rstest;
	// Import macros from crate root
	use crate::{debug_log, error_log, info_log, warn_log};

	#[rstest]
	fn test_logging_macros_compile() {
		debug_log!("Debug message: {}", 42);
		info_log!("Info message: {}", "test");
		warn_log!("Warning message: {:?}", vec![1, 2, 3]);
		error_log!("Error message: {}", "error");
	}

	#[rstest]
	fn test_logging_macros_no_args() {
		debug_log!("Simple debug");
		info_log!("Simple info");
		warn_log!("Simple warning");
		error_log!("Simple error");
	}
}
