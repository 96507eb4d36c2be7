/// DexScreener API client
///
/// API Documentation: https://docs.dexscreener.com/api/reference
///
/// Endpoints used:
/// 1. /latest/dex/search?q={query} - Search pairs by token name, symbol or address
/// 2. /latest/dex/pairs/{chainId} - Latest pairs for one chain
///
/// Both payloads share the same shape; a missing or null `pairs` member
/// means an empty result, not a malformed response.

use serde::Deserialize;
use std::sync::Arc;

use crate::apis::http::HttpFetch;
use crate::errors::ProxyError;
use crate::logger::{self, LogTag};
use crate::tokens::UpstreamPair;

// ============================================================================
// API CONFIGURATION
// ============================================================================

/// DexScreener API base URL
pub const DEXSCREENER_BASE_URL: &str = "https://api.dexscreener.com";

/// Default chain for pair listings
pub const DEFAULT_CHAIN_ID: &str = "solana";

/// Search and listing payload. `pairs` stays an Option so an explicit
/// `"pairs": null` deserializes instead of failing the whole listing.
#[derive(Debug, Default, Deserialize)]
pub struct PairsResponse {
    #[serde(default)]
    pub pairs: Option<Vec<UpstreamPair>>,
}

pub struct DexScreenerClient {
    http: Arc<dyn HttpFetch>,
    base_url: String,
}

impl DexScreenerClient {
    pub fn new(http: Arc<dyn HttpFetch>, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Search for pairs matching a free-form query
    ///
    /// # Arguments
    /// * `query` - Token name, symbol or address
    ///
    /// # Returns
    /// * `Ok(Vec<UpstreamPair>)` - Pairs exactly as upstream returned them
    /// * `Err(ProxyError)` - Non-2xx status, transport failure or bad JSON
    pub async fn search(&self, query: &str) -> Result<Vec<UpstreamPair>, ProxyError> {
        if query.is_empty() {
            return Err(ProxyError::configuration_error(
                "Search query cannot be empty",
            ));
        }

        let url = url::Url::parse_with_params(
            &format!("{}/latest/dex/search", self.base_url),
            &[("q", query)],
        )
        .map_err(|e| ProxyError::configuration_error(format!("Bad search URL: {}", e)))?;

        self.fetch_pairs(url.as_str()).await
    }

    /// Latest pairs for one chain
    ///
    /// # Arguments
    /// * `chain_id` - Chain identifier, e.g. "solana"
    pub async fn chain_pairs(&self, chain_id: &str) -> Result<Vec<UpstreamPair>, ProxyError> {
        let url = format!("{}/latest/dex/pairs/{}", self.base_url, chain_id);
        self.fetch_pairs(&url).await
    }

    async fn fetch_pairs(&self, url: &str) -> Result<Vec<UpstreamPair>, ProxyError> {
        logger::debug(LogTag::Api, &format!("[DEXSCREENER] GET {}", url));

        let response = self.http.get(url).await?;

        if !response.is_success() {
            logger::debug(
                LogTag::Api,
                &format!("[DEXSCREENER] Upstream returned status {}", response.status),
            );
            return Err(ProxyError::upstream_status_error(
                "dexscreener",
                response.status,
                response.body,
            ));
        }

        let parsed: PairsResponse = serde_json::from_str(&response.body)
            .map_err(|e| ProxyError::parse_error("DexScreener response", e.to_string()))?;
        let pairs = parsed.pairs.unwrap_or_default();

        logger::debug(
            LogTag::Api,
            &format!("[DEXSCREENER] {} pairs returned", pairs.len()),
        );

        Ok(pairs)
    }
}
