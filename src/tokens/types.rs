/// Core types for the token proxy pipeline
use serde::{Deserialize, Serialize};

// ============================================================================
// UPSTREAM PAIR - Exactly what DexScreener may send, every field optional
// ============================================================================

/// One pair record as DexScreener returns it.
///
/// Upstream omits fields freely and sometimes sends explicit nulls, so
/// everything here is optional and deserialization succeeds for any subset
/// of fields, including the empty object and `"baseToken": null`. Absence
/// is handled once, in [`NormalizedToken::from_pair`], not at call sites.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpstreamPair {
    #[serde(rename = "pairAddress")]
    pub pair_address: Option<String>,
    #[serde(rename = "chainId")]
    pub chain_id: Option<String>,
    #[serde(rename = "dexId")]
    pub dex_id: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "baseToken")]
    pub base_token: Option<TokenDescriptor>,
    #[serde(rename = "quoteToken")]
    pub quote_token: Option<TokenDescriptor>,
    #[serde(rename = "priceUsd")]
    pub price_usd: Option<String>,
    pub liquidity: Option<LiquidityInfo>,
    pub fdv: Option<f64>,
    #[serde(rename = "marketCap")]
    pub market_cap: Option<f64>,
    pub volume: Option<VolumeStats>,
    pub txns: Option<TxnStats>,
    #[serde(rename = "priceChange")]
    pub price_change: Option<PriceChangeStats>,
    #[serde(rename = "pairCreatedAt")]
    pub pair_created_at: Option<u64>,
}

/// Base or quote token identity
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TokenDescriptor {
    pub address: Option<String>,
    pub name: Option<String>,
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LiquidityInfo {
    pub usd: Option<f64>,
    pub base: Option<f64>,
    pub quote: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VolumeStats {
    pub m5: Option<f64>,
    pub h1: Option<f64>,
    pub h6: Option<f64>,
    pub h24: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TxnStats {
    pub m5: Option<TxnPeriod>,
    pub h1: Option<TxnPeriod>,
    pub h6: Option<TxnPeriod>,
    pub h24: Option<TxnPeriod>,
}

/// Buy/sell counts for one window, passed through to the response as-is
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TxnPeriod {
    pub buys: Option<i64>,
    pub sells: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceChangeStats {
    pub m5: Option<f64>,
    pub h1: Option<f64>,
    pub h6: Option<f64>,
    pub h24: Option<f64>,
}

// ============================================================================
// NORMALIZED TOKEN - The outward /tokens projection
// ============================================================================

/// Flat token record served to clients.
///
/// Every key is always serialized: optionals become JSON null, liquidityUsd
/// falls back to 0. Clients never need to probe for missing keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedToken {
    pub id: String,
    pub name: Option<String>,
    pub symbol: Option<String>,
    #[serde(rename = "chainId")]
    pub chain_id: Option<String>,
    #[serde(rename = "dexId")]
    pub dex_id: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "priceUsd")]
    pub price_usd: Option<String>,
    #[serde(rename = "liquidityUsd")]
    pub liquidity_usd: f64,
    pub fdv: Option<f64>,
    #[serde(rename = "marketCap")]
    pub market_cap: Option<f64>,
    #[serde(rename = "volume24h")]
    pub volume_24h: Option<f64>,
    #[serde(rename = "txns24h")]
    pub txns_24h: Option<TxnPeriod>,
    #[serde(rename = "priceChange")]
    pub price_change: Option<PriceChangeStats>,
    #[serde(rename = "pairCreatedAt")]
    pub pair_created_at: Option<u64>,
}

impl NormalizedToken {
    /// Total projection from an upstream pair. Never fails, never drops a
    /// key; the id falls back to an empty string if the pair address is
    /// somehow absent.
    pub fn from_pair(pair: &UpstreamPair) -> Self {
        Self {
            id: pair.pair_address.clone().unwrap_or_default(),
            name: pair.base_token.as_ref().and_then(|t| t.name.clone()),
            symbol: pair.base_token.as_ref().and_then(|t| t.symbol.clone()),
            chain_id: pair.chain_id.clone(),
            dex_id: pair.dex_id.clone(),
            url: pair.url.clone(),
            price_usd: pair.price_usd.clone(),
            liquidity_usd: pair
                .liquidity
                .as_ref()
                .and_then(|l| l.usd)
                .unwrap_or(0.0),
            fdv: pair.fdv,
            market_cap: pair.market_cap,
            volume_24h: pair.volume.as_ref().and_then(|v| v.h24),
            txns_24h: pair.txns.as_ref().and_then(|t| t.h24.clone()),
            price_change: pair.price_change.clone(),
            pair_created_at: pair.pair_created_at,
        }
    }
}

/// Response body for /tokens
#[derive(Debug, Clone, Serialize)]
pub struct TokenListResponse {
    pub tokens: Vec<NormalizedToken>,
}
