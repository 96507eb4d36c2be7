use axum::{extract::State, response::Response, routing::get, Router};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::{
    arguments::is_debug_webserver_enabled,
    logger::{log, LogTag},
    webserver::{state::AppState, utils::success_response},
};

/// Exact liveness body; deployed frontends match on this string
pub const LIVENESS_MESSAGE: &str = "PumpFun backend running (DexScreener + Helius)";

/// Machine-readable status response
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Create status routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(liveness))
        .route("/status", get(service_status))
}

/// GET /
async fn liveness() -> &'static str {
    if is_debug_webserver_enabled() {
        log(LogTag::Webserver, "DEBUG", "Liveness endpoint called");
    }

    LIVENESS_MESSAGE
}

/// GET /status
async fn service_status(State(state): State<Arc<AppState>>) -> Response {
    if is_debug_webserver_enabled() {
        log(LogTag::Webserver, "DEBUG", "Status endpoint called");
    }

    let response = StatusResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    };

    success_response(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::http::testing::StubFetch;
    use crate::config::ProxyConfig;
    use crate::webserver::state::testing::stub_state;
    use crate::webserver::utils::testing::{read_json, read_text};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn test_liveness_body_is_exact() {
        let response = liveness().await.into_response();
        let (status, body) = read_text(response).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "PumpFun backend running (DexScreener + Helius)");
    }

    #[tokio::test]
    async fn test_liveness_is_plain_text() {
        let response = liveness().await.into_response();
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();

        assert!(content_type.starts_with("text/plain"));
    }

    #[tokio::test]
    async fn test_status_reports_version_and_uptime() {
        let state = stub_state(ProxyConfig::default(), Arc::new(StubFetch::new()));
        let response = service_status(State(state)).await;
        let (status, body) = read_json(response).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert!(body["uptime_seconds"].is_u64());
    }
}
