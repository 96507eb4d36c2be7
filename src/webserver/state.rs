/// Shared application state for the webserver
///
/// Route handlers get the parsed configuration and the injected HTTP
/// transport through this state; none of them read the process environment.
use crate::apis::HttpFetch;
use crate::config::ProxyConfig;
use std::sync::Arc;

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    /// Parsed service configuration
    pub config: Arc<ProxyConfig>,

    /// Outbound HTTP transport shared by all upstream clients
    pub http: Arc<dyn HttpFetch>,

    /// Server startup time
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Arc<ProxyConfig>, http: Arc<dyn HttpFetch>) -> Self {
        Self {
            config,
            http,
            startup_time: chrono::Utc::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        (chrono::Utc::now() - self.startup_time)
            .num_seconds()
            .max(0) as u64
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::http::testing::StubFetch;

    #[test]
    fn test_uptime_starts_at_zero() {
        let state = AppState::new(
            Arc::new(ProxyConfig::default()),
            Arc::new(StubFetch::new()),
        );
        assert!(state.uptime_seconds() <= 1);
    }
}
