use axum::{extract::State, http::StatusCode, response::Response, routing::get, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    apis::dexscreener::DexScreenerClient,
    apis::pumpportal::PumpPortalClient,
    arguments::is_debug_webserver_enabled,
    config::TokenSource,
    errors::ProxyError,
    filtering::{self, FilterTargets},
    logger::{self, log, LogTag},
    tokens::{NormalizedToken, TokenListResponse, UpstreamPair},
    webserver::{
        state::AppState,
        utils::{error_response, success_response, success_response_no_store, upstream_error_response},
    },
};

// =============================================================================
// ERROR BODIES
// =============================================================================

/// Body when DexScreener rejects a listing request
const DEXSCREENER_FETCH_ERROR: &str = "Failed to fetch from DexScreener";

/// Body when PumpPortal rejects a passthrough request
const PUMPPORTAL_FETCH_ERROR: &str = "Failed to fetch from PumpPortal";

/// Body for transport and decode failures
const INTERNAL_ERROR: &str = "Internal server error";

/// Create token routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/tokens", get(list_tokens))
}

/// GET /tokens
///
/// Source, filter clauses, sort and caching behavior all come from the
/// tokens section of the configuration.
async fn list_tokens(State(state): State<Arc<AppState>>) -> Response {
    if is_debug_webserver_enabled() {
        log(
            LogTag::Webserver,
            "DEBUG",
            &format!(
                "Token listing requested (source={})",
                state.config.tokens.source.describe()
            ),
        );
    }

    match fetch_listing(&state).await {
        Ok(response) => response,
        Err(err) => listing_error(&state, &err),
    }
}

async fn fetch_listing(state: &Arc<AppState>) -> Result<Response, ProxyError> {
    match &state.config.tokens.source {
        TokenSource::Search { query } => {
            let pairs = dexscreener_client(state).search(query).await?;
            Ok(normalized_listing(state, pairs))
        }
        TokenSource::ChainPairs { chain } => {
            let pairs = dexscreener_client(state).chain_pairs(chain).await?;
            Ok(normalized_listing(state, pairs))
        }
        TokenSource::PumpPortal => {
            let client = PumpPortalClient::new(
                Arc::clone(&state.http),
                &state.config.upstreams.pumpportal_data_url,
            );
            let data = client.fetch_data().await?;
            Ok(listing_response(state, data))
        }
    }
}

fn dexscreener_client(state: &Arc<AppState>) -> DexScreenerClient {
    DexScreenerClient::new(
        Arc::clone(&state.http),
        &state.config.upstreams.dexscreener_base_url,
    )
}

/// Filter, sort and project DexScreener pairs into the service's own shape
fn normalized_listing(state: &Arc<AppState>, pairs: Vec<UpstreamPair>) -> Response {
    let tokens_cfg = &state.config.tokens;
    let targets = FilterTargets::from_config(tokens_cfg);
    let (mut kept, stats) = filtering::apply_filters(pairs, &tokens_cfg.filters, &targets);

    if is_debug_webserver_enabled() {
        log(LogTag::Tokens, "DEBUG", &stats.summary());
    }

    if tokens_cfg.sort_newest_first {
        filtering::sort_newest_first(&mut kept);
    }

    let tokens: Vec<NormalizedToken> = kept.iter().map(NormalizedToken::from_pair).collect();
    listing_response(state, TokenListResponse { tokens })
}

fn listing_response<T: Serialize>(state: &Arc<AppState>, data: T) -> Response {
    if state.config.tokens.no_store {
        success_response_no_store(data)
    } else {
        success_response(data)
    }
}

/// Upstream rejections mirror the upstream status; everything else is a 500
fn listing_error(state: &Arc<AppState>, err: &ProxyError) -> Response {
    logger::error(LogTag::Tokens, &format!("Token listing failed: {}", err));

    if let Some(status) = err.upstream_status() {
        let message = match state.config.tokens.source {
            TokenSource::PumpPortal => PUMPPORTAL_FETCH_ERROR,
            _ => DEXSCREENER_FETCH_ERROR,
        };
        return upstream_error_response(status, message);
    }

    error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::http::testing::StubFetch;
    use crate::config::ProxyConfig;
    use crate::errors::ProxyError;
    use crate::webserver::state::testing::stub_state;
    use crate::webserver::utils::testing::read_json;
    use serde_json::{json, Value};

    fn pair(address: &str, chain: &str, symbol: &str, name: &str, created_at: Option<u64>) -> Value {
        let mut pair = json!({
            "pairAddress": address,
            "chainId": chain,
            "dexId": "raydium",
            "url": format!("https://dexscreener.com/{}/{}", chain, address),
            "baseToken": { "address": "base-mint", "name": name, "symbol": symbol },
            "quoteToken": { "address": "quote-mint", "name": "USD Coin", "symbol": "USDC" },
            "priceUsd": "1.23",
            "liquidity": { "usd": 1000.0 },
            "fdv": 5000.0,
            "volume": { "h24": 250.0 },
            "txns": { "h24": { "buys": 3, "sells": 1 } },
            "priceChange": { "h24": -4.2 },
        });
        if let Some(ts) = created_at {
            pair["pairCreatedAt"] = json!(ts);
        }
        pair
    }

    fn pairs_body(pairs: &[Value]) -> String {
        json!({ "pairs": pairs }).to_string()
    }

    #[tokio::test]
    async fn test_default_listing_filters_and_projects() {
        let stub = Arc::new(StubFetch::new());
        stub.push_response(
            200,
            &pairs_body(&[
                pair("PAIRSOL", "solana", "SOL", "Wrapped SOL", Some(1)),
                pair("PAIRFOO", "solana", "FOO", "Foo Token", Some(2)),
                pair("PAIRETH", "ethereum", "BAR", "Bar Token", Some(3)),
            ]),
        );

        let state = stub_state(ProxyConfig::default(), stub.clone());
        let (status, body) = read_json(list_tokens(State(state)).await).await;

        assert_eq!(status, StatusCode::OK);
        let tokens = body["tokens"].as_array().unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0]["id"], "PAIRFOO");
        assert_eq!(tokens[0]["priceUsd"], "1.23");
        assert_eq!(tokens[0]["pairCreatedAt"], 2);

        let url = stub.recorded_requests()[0].url.clone();
        assert_eq!(url, "https://api.dexscreener.com/latest/dex/search?q=solana");
    }

    #[tokio::test]
    async fn test_upstream_status_and_message_mirrored() {
        let stub = Arc::new(StubFetch::new());
        stub.push_response(404, "Not Found");
        stub.push_response(429, r#"{"message":"rate limited"}"#);

        let state = stub_state(ProxyConfig::default(), stub);

        let (status, body) = read_json(list_tokens(State(state.clone())).await).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Failed to fetch from DexScreener" }));

        let (status, body) = read_json(list_tokens(State(state)).await).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body, json!({ "error": "Failed to fetch from DexScreener" }));
    }

    #[tokio::test]
    async fn test_transport_failure_is_internal_error() {
        let stub = Arc::new(StubFetch::new());
        stub.push_error(ProxyError::network_error("connection refused"));

        let state = stub_state(ProxyConfig::default(), stub);
        let (status, body) = read_json(list_tokens(State(state)).await).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Internal server error" }));
    }

    #[tokio::test]
    async fn test_malformed_upstream_body_is_internal_error() {
        let stub = Arc::new(StubFetch::new());
        stub.push_response(200, "<html>maintenance</html>");

        let state = stub_state(ProxyConfig::default(), stub);
        let (status, body) = read_json(list_tokens(State(state)).await).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_missing_pairs_member_is_empty_listing() {
        let stub = Arc::new(StubFetch::new());
        stub.push_response(200, r#"{"schemaVersion":"1.0.0"}"#);

        let state = stub_state(ProxyConfig::default(), stub);
        let (status, body) = read_json(list_tokens(State(state)).await).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "tokens": [] }));
    }

    #[tokio::test]
    async fn test_null_pairs_member_is_empty_listing() {
        let stub = Arc::new(StubFetch::new());
        stub.push_response(200, r#"{"schemaVersion":"1.0.0","pairs":null}"#);

        let state = stub_state(ProxyConfig::default(), stub);
        let (status, body) = read_json(list_tokens(State(state)).await).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "tokens": [] }));
    }

    #[tokio::test]
    async fn test_null_base_token_is_listed_with_null_identity() {
        let stub = Arc::new(StubFetch::new());
        stub.push_response(
            200,
            &json!({
                "pairs": [{
                    "pairAddress": "PAIRNULL",
                    "chainId": "solana",
                    "baseToken": null,
                    "quoteToken": null
                }]
            })
            .to_string(),
        );

        let state = stub_state(ProxyConfig::default(), stub);
        let (status, body) = read_json(list_tokens(State(state)).await).await;

        assert_eq!(status, StatusCode::OK);
        let tokens = body["tokens"].as_array().unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0]["id"], "PAIRNULL");
        assert_eq!(tokens[0]["name"], Value::Null);
        assert_eq!(tokens[0]["symbol"], Value::Null);
    }

    #[tokio::test]
    async fn test_no_store_header_follows_config() {
        let stub = Arc::new(StubFetch::new());
        stub.push_response(200, &pairs_body(&[]));
        stub.push_response(200, &pairs_body(&[]));

        let default_state = stub_state(ProxyConfig::default(), stub.clone());
        let plain = list_tokens(State(default_state)).await;
        assert!(plain
            .headers()
            .get(axum::http::header::CACHE_CONTROL)
            .is_none());

        let mut config = ProxyConfig::default();
        config.tokens.no_store = true;
        let no_store = list_tokens(State(stub_state(config, stub))).await;
        assert_eq!(
            no_store
                .headers()
                .get(axum::http::header::CACHE_CONTROL)
                .unwrap(),
            "no-store"
        );
    }

    #[tokio::test]
    async fn test_sort_flag_orders_newest_first() {
        let stub = Arc::new(StubFetch::new());
        stub.push_response(
            200,
            &pairs_body(&[
                pair("OLD", "solana", "AAA", "Token A", Some(100)),
                pair("NEW", "solana", "BBB", "Token B", Some(300)),
                pair("NO_TS", "solana", "CCC", "Token C", None),
                pair("MID", "solana", "DDD", "Token D", Some(200)),
            ]),
        );

        let mut config = ProxyConfig::default();
        config.tokens.sort_newest_first = true;
        let state = stub_state(config, stub);
        let (_, body) = read_json(list_tokens(State(state)).await).await;

        let ids: Vec<&str> = body["tokens"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["NEW", "MID", "OLD", "NO_TS"]);
    }

    #[tokio::test]
    async fn test_chain_pairs_source_uses_chain_url() {
        let stub = Arc::new(StubFetch::new());
        stub.push_response(200, &pairs_body(&[]));

        let mut config = ProxyConfig::default();
        config.tokens.source = TokenSource::ChainPairs {
            chain: "solana".to_string(),
        };
        let state = stub_state(config, stub.clone());
        list_tokens(State(state)).await;

        assert_eq!(
            stub.recorded_requests()[0].url,
            "https://api.dexscreener.com/latest/dex/pairs/solana"
        );
    }

    #[tokio::test]
    async fn test_pumpportal_source_passes_payload_through() {
        let stub = Arc::new(StubFetch::new());
        stub.push_response(200, r#"{"coins":[{"mint":"abc"}]}"#);

        let mut config = ProxyConfig::default();
        config.tokens.source = TokenSource::PumpPortal;
        let state = stub_state(config, stub);
        let (status, body) = read_json(list_tokens(State(state)).await).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "coins": [{ "mint": "abc" }] }));
    }

    #[tokio::test]
    async fn test_pumpportal_upstream_error_message() {
        let stub = Arc::new(StubFetch::new());
        stub.push_response(503, "unavailable");

        let mut config = ProxyConfig::default();
        config.tokens.source = TokenSource::PumpPortal;
        let state = stub_state(config, stub);
        let (status, body) = read_json(list_tokens(State(state)).await).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, json!({ "error": "Failed to fetch from PumpPortal" }));
    }
}
