use axum::{extract::State, http::StatusCode, response::Response, routing::get, Router};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{
    apis::helius::{HeliusClient, SIGNATURE_FETCH_LIMIT, WSOL_MINT},
    arguments::is_debug_webserver_enabled,
    errors::ProxyError,
    logger::{self, log, LogTag},
    webserver::{
        state::AppState,
        utils::{error_response, success_response},
    },
};

// =============================================================================
// ERROR BODIES
// =============================================================================

/// Body when the RPC credential is not configured
const MISSING_KEY_ERROR: &str = "HELIUS_API_KEY not set in environment";

/// Body when the health probe fails
const HEALTH_FETCH_ERROR: &str = "Helius health check failed";

/// Body when either step of the transaction fetch fails
const TXS_FETCH_ERROR: &str = "Helius tx fetch failed";

/// Create Helius routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/helius-health", get(helius_health))
        .route("/helius-txs", get(helius_txs))
}

/// GET /helius-health
///
/// The upstream getHealth body is forwarded verbatim at 200 even when it
/// carries a JSON-RPC error object. Only a missing credential or a failed
/// round trip produces this service's own error body.
async fn helius_health(State(state): State<Arc<AppState>>) -> Response {
    let client = match rpc_client(&state) {
        Ok(client) => client,
        Err(response) => return response,
    };

    if is_debug_webserver_enabled() {
        log(LogTag::Webserver, "DEBUG", "Helius health check requested");
    }

    match client.get_health().await {
        Ok(body) => success_response(body),
        Err(err) => {
            logger::error(LogTag::Helius, &format!("Health check failed: {}", err));
            error_response(StatusCode::INTERNAL_SERVER_ERROR, HEALTH_FETCH_ERROR)
        }
    }
}

/// GET /helius-txs
///
/// Two sequential RPC calls: recent signatures for the wrapped SOL mint,
/// then parsed transactions for those signatures. The second call is made
/// even when the first returned no signatures.
async fn helius_txs(State(state): State<Arc<AppState>>) -> Response {
    let client = match rpc_client(&state) {
        Ok(client) => client,
        Err(response) => return response,
    };

    if is_debug_webserver_enabled() {
        log(LogTag::Webserver, "DEBUG", "Helius transaction fetch requested");
    }

    match fetch_recent_transactions(&client).await {
        Ok(body) => success_response(body),
        Err(err) => {
            logger::error(LogTag::Helius, &format!("Transaction fetch failed: {}", err));
            error_response(StatusCode::INTERNAL_SERVER_ERROR, TXS_FETCH_ERROR)
        }
    }
}

/// Build the RPC client, or the 500 the caller must return when the
/// credential is missing. No outbound request happens on that path.
fn rpc_client(state: &Arc<AppState>) -> Result<HeliusClient, Response> {
    match state.config.helius_rpc_url() {
        Ok(url) => Ok(HeliusClient::new(Arc::clone(&state.http), url)),
        Err(err) => {
            logger::warning(LogTag::Helius, &format!("{}", err));
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                MISSING_KEY_ERROR,
            ))
        }
    }
}

async fn fetch_recent_transactions(client: &HeliusClient) -> Result<Value, ProxyError> {
    let signatures = client
        .get_signatures_for_address(WSOL_MINT, SIGNATURE_FETCH_LIMIT)
        .await?;
    let transactions = client.get_parsed_transactions(&signatures).await?;

    Ok(json!({
        "signatures": signatures,
        "transactions": transactions,
    }))
}
