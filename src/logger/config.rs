/// Logger configuration with per-tag debug gating
///
/// Populated once at startup from command-line arguments, then read on every
/// log call. Kept behind a RwLock so tests can swap configurations.

use std::collections::HashSet;
use std::sync::RwLock;

use once_cell::sync::Lazy;

use super::levels::LogLevel;
use super::tags::LogTag;
use crate::arguments;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Minimum level that passes the filter (errors always pass)
    pub min_level: LogLevel,
    /// Tags with --debug-<tag> enabled
    pub debug_tags: HashSet<String>,
    /// Tags with --verbose-<tag> enabled
    pub verbose_tags: HashSet<String>,
    /// When non-empty, only these tags are shown
    pub enabled_tags: HashSet<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            verbose_tags: HashSet::new(),
            enabled_tags: HashSet::new(),
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

/// Snapshot of the current logger configuration
pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_default()
}

/// Replace the logger configuration
pub fn set_logger_config(config: LoggerConfig) {
    if let Ok(mut current) = LOGGER_CONFIG.write() {
        *current = config;
    }
}

/// Mutate the logger configuration in place
pub fn update_logger_config<F>(update: F)
where
    F: FnOnce(&mut LoggerConfig),
{
    if let Ok(mut current) = LOGGER_CONFIG.write() {
        update(&mut current);
    }
}

/// Scan command-line arguments and install the resulting configuration
///
/// Recognized flags:
/// - `--verbose` lowers the threshold to Verbose globally
/// - `--quiet` raises the threshold to Warning
/// - `--debug-<tag>` enables Debug output for one tag (`--debug-all` for all)
/// - `--verbose-<tag>` enables Verbose output for one tag
pub fn init_from_args() {
    let args = arguments::get_cmd_args();
    set_logger_config(config_from_args(&args));
}

fn config_from_args(args: &[String]) -> LoggerConfig {
    let mut config = LoggerConfig::default();

    if args.iter().any(|a| a == "--verbose" || a == "-v") {
        config.min_level = LogLevel::Verbose;
    } else if args.iter().any(|a| a == "--quiet" || a == "-q") {
        config.min_level = LogLevel::Warning;
    }

    for arg in args {
        if let Some(tag) = arg.strip_prefix("--debug-") {
            config.debug_tags.insert(tag.to_lowercase());
        } else if let Some(tag) = arg.strip_prefix("--verbose-") {
            config.verbose_tags.insert(tag.to_lowercase());
        }
    }

    config
}

/// True when --debug-<tag> (or --debug-all) was passed for this tag
pub fn is_debug_enabled_for_tag(tag: &LogTag) -> bool {
    let config = get_logger_config();
    config.debug_tags.contains(&tag.to_debug_key()) || config.debug_tags.contains("all")
}

/// True when --verbose-<tag> was passed for this tag
pub fn is_verbose_enabled_for_tag(tag: &LogTag) -> bool {
    let config = get_logger_config();
    config.verbose_tags.contains(&tag.to_debug_key())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_threshold_is_info() {
        let config = config_from_args(&args(&["pumpfun-backend"]));
        assert_eq!(config.min_level, LogLevel::Info);
        assert!(config.debug_tags.is_empty());
    }

    #[test]
    fn test_debug_flags_collected_per_tag() {
        let config = config_from_args(&args(&["bin", "--debug-helius", "--debug-webserver"]));
        assert!(config.debug_tags.contains("helius"));
        assert!(config.debug_tags.contains("webserver"));
        assert!(!config.debug_tags.contains("api"));
    }

    #[test]
    fn test_verbose_and_quiet_set_threshold() {
        assert_eq!(
            config_from_args(&args(&["bin", "--verbose"])).min_level,
            LogLevel::Verbose
        );
        assert_eq!(
            config_from_args(&args(&["bin", "--quiet"])).min_level,
            LogLevel::Warning
        );
    }
}
