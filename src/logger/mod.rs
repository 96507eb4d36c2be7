//! Structured logging for the PumpFun backend
//!
//! This module provides a clean, ergonomic logging API with:
//! - Automatic debug mode filtering from command-line arguments
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-module debug control via --debug-<module> flags
//! - Colored, aligned console output
//!
//! ## Usage
//!
//! ```rust
//! use pumpfun_backend::logger::{self, LogTag};
//!
//! // Level-specific functions
//! logger::error(LogTag::Api, "Connection failed");
//! logger::warning(LogTag::Config, "HELIUS_API_KEY not set");
//! logger::info(LogTag::Webserver, "Listening on 0.0.0.0:3000");
//! logger::debug(LogTag::Helius, "Request payload: ..."); // Only if --debug-helius
//! logger::verbose(LogTag::Tokens, "Raw pair data: ..."); // Only if --verbose
//! ```
//!
//! ## Initialization
//!
//! Call once at startup (in main.rs) before any logging occurs:
//! ```rust
//! use pumpfun_backend::logger;
//!
//! logger::init();
//! ```

mod config;
mod core;
mod format;
mod levels;
mod tags;

// Re-export public types
pub use config::{
    get_logger_config, init_from_args, set_logger_config, update_logger_config, LoggerConfig,
};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger system
///
/// This must be called once at application startup, before any logging
/// occurs. It scans command-line arguments for --debug-<module>, --verbose
/// and --quiet flags and installs the resulting filtering rules.
pub fn init() {
    config::init_from_args();
}

/// Log at ERROR level (always shown, critical issues)
///
/// Errors are always displayed regardless of debug flags or verbosity
/// settings.
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (important issues)
///
/// Warnings are shown by default (unless --quiet is used).
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level (detailed diagnostics)
///
/// Debug logs are ONLY shown when the matching --debug-<module> flag is
/// provided.
///
/// # Example
/// ```rust
/// use pumpfun_backend::logger::{self, LogTag};
///
/// // Only shown with --debug-api flag
/// logger::debug(LogTag::Api, "Request headers: {...}");
/// ```
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (very detailed tracing)
///
/// Verbose logs are ONLY shown when the --verbose flag is provided.
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Log with an explicit event label in the type column
///
/// Used in request paths where the event name carries more signal than a
/// bare level, e.g. `log(LogTag::Api, "UPSTREAM_STATUS", "dexscreener 404")`.
pub fn log(tag: LogTag, log_type: &str, message: &str) {
    core::log_event(tag, log_type, message);
}
