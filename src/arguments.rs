/// Centralized argument handling for the PumpFun backend
///
/// This module consolidates command-line argument parsing and debug flag
/// checking so no other module touches std::env directly.
///
/// Features:
/// - Centralized CMD_ARGS storage with thread-safe access
/// - Debug flag checking functions for all modules
/// - Unified argument parsing utilities
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

/// Global command-line arguments storage
/// Thread-safe singleton that stores arguments for access throughout the application
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Sets the global command-line arguments
/// Used by tests to override the default env::args() collection
pub fn set_cmd_args(args: Vec<String>) {
    if let Ok(mut cmd_args) = CMD_ARGS.lock() {
        *cmd_args = args;
    }
}

/// Gets a copy of the current command-line arguments
/// Returns a vector clone to avoid holding the mutex lock
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => {
            // Fallback to env::args if mutex is poisoned
            env::args().collect()
        }
    }
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    get_cmd_args().iter().any(|a| a == arg)
}

/// Gets the value of a command-line argument that follows a flag
/// Returns None if the flag is not found or has no value
pub fn get_arg_value(flag: &str) -> Option<String> {
    let args = get_cmd_args();
    for (i, arg) in args.iter().enumerate() {
        if arg == flag && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

// =============================================================================
// DEBUG FLAG CHECKING FUNCTIONS
// These functions check for specific debug flags in the command-line arguments
// =============================================================================

/// Upstream API calls debug mode (DexScreener, PumpPortal)
pub fn is_debug_api_enabled() -> bool {
    has_arg("--debug-api")
}

/// Helius JSON-RPC debug mode
pub fn is_debug_helius_enabled() -> bool {
    has_arg("--debug-helius")
}

/// Webserver request handling debug mode
pub fn is_debug_webserver_enabled() -> bool {
    has_arg("--debug-webserver")
}

/// Token filter pipeline debug mode
pub fn is_debug_filtering_enabled() -> bool {
    has_arg("--debug-filtering")
}

/// Token normalization debug mode
pub fn is_debug_tokens_enabled() -> bool {
    has_arg("--debug-tokens")
}

/// Configuration loading debug mode
pub fn is_debug_config_enabled() -> bool {
    has_arg("--debug-config")
}

// =============================================================================
// SERVER OVERRIDES
// =============================================================================

/// Listen port override (--port), takes precedence over the PORT env var
pub fn get_port_override() -> Option<u16> {
    get_arg_value("--port").and_then(|s| s.parse().ok())
}

/// Bind address override (--host), takes precedence over the HOST env var
pub fn get_host_override() -> Option<String> {
    get_arg_value("--host")
}

// =============================================================================
// HELP SYSTEM
// =============================================================================

/// Displays the help menu with all available flags and their descriptions
pub fn print_help() {
    println!("PumpFun Backend - DexScreener + Helius market data proxy");
    println!();
    println!("USAGE:");
    println!("    pumpfun-backend [FLAGS]");
    println!();
    println!("CORE FLAGS:");
    println!("    --port <port>             Listen port (overrides PORT, default 3000)");
    println!("    --host <addr>             Bind address (overrides HOST, default 0.0.0.0)");
    println!("    --help, -h                Show this help message");
    println!("    --quiet, -q               Only show warnings and errors");
    println!("    --verbose, -v             Show verbose trace output");
    println!();
    println!("DEBUG FLAGS:");
    println!("    --debug-api               Upstream API calls debug mode");
    println!("    --debug-config            Configuration loading debug mode");
    println!("    --debug-filtering         Token filter pipeline debug mode");
    println!("    --debug-helius            Helius JSON-RPC debug mode");
    println!("    --debug-tokens            Token normalization debug mode");
    println!("    --debug-webserver         Webserver request handling debug mode");
    println!();
    println!("EXAMPLES:");
    println!("    pumpfun-backend                             # Start with env/default config");
    println!("    pumpfun-backend --port 8080                 # Start on port 8080");
    println!("    pumpfun-backend --debug-helius              # Trace Helius RPC traffic");
    println!("    pumpfun-backend --debug-api --debug-tokens  # Trace the /tokens pipeline");
    println!("    pumpfun-backend --help                      # Show this help");
}

// =============================================================================
// UTILITY FUNCTIONS
// =============================================================================

/// Checks if any debug mode is enabled
pub fn is_any_debug_enabled() -> bool {
    is_debug_api_enabled()
        || is_debug_helius_enabled()
        || is_debug_webserver_enabled()
        || is_debug_filtering_enabled()
        || is_debug_tokens_enabled()
        || is_debug_config_enabled()
}

/// Gets a list of all enabled debug modes
pub fn get_enabled_debug_modes() -> Vec<&'static str> {
    let mut modes = Vec::new();

    if is_debug_api_enabled() {
        modes.push("api");
    }
    if is_debug_config_enabled() {
        modes.push("config");
    }
    if is_debug_filtering_enabled() {
        modes.push("filtering");
    }
    if is_debug_helius_enabled() {
        modes.push("helius");
    }
    if is_debug_tokens_enabled() {
        modes.push("tokens");
    }
    if is_debug_webserver_enabled() {
        modes.push("webserver");
    }

    modes
}

/// Prints debug information about current arguments and enabled debug modes
pub fn print_debug_info() {
    let enabled_modes = get_enabled_debug_modes();
    if enabled_modes.is_empty() {
        return;
    }
    println!("Command-line arguments: {:?}", get_cmd_args());
    println!("Enabled debug modes: {:?}", enabled_modes);
}

// =============================================================================
// COMMON ARGUMENT PATTERNS
// =============================================================================

/// Common argument parsing patterns
pub mod patterns {
    use super::*;

    /// Checks for help flags
    pub fn is_help_requested() -> bool {
        has_arg("--help") || has_arg("-h")
    }

    /// Checks for version flags
    pub fn is_version_requested() -> bool {
        has_arg("--version") || has_arg("-V")
    }

    /// Checks for quiet/silent mode
    pub fn is_quiet_mode() -> bool {
        has_arg("--quiet") || has_arg("-q")
    }

    /// Checks for verbose mode
    pub fn is_verbose_mode() -> bool {
        has_arg("--verbose") || has_arg("-v")
    }
}
