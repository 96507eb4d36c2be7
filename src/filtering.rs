/// Token filter pipeline for the /tokens endpoint
///
/// Filters are small named predicates over upstream pairs. The active set is
/// chosen by configuration and AND-composed; a pair must pass every clause to
/// survive. Each clause can be tested on its own.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::arguments::is_debug_filtering_enabled;
use crate::config::TokensEndpointConfig;
use crate::logger::{log, LogTag};
use crate::tokens::types::UpstreamPair;

// =============================================================================
// FILTER CLAUSES
// =============================================================================

/// One named filter clause. Values match the TOKENS_FILTERS config names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterClause {
    /// Keep pairs on the configured chain (case-sensitive exact match)
    ChainMatch,
    /// Drop pairs whose base token IS the native asset, by symbol
    /// (case-insensitive) or by name (case-insensitive)
    ExcludeNativeBase,
    /// Keep only pairs quoted in the native asset whose base is not the
    /// native asset (exact symbol comparison on both legs)
    NativeQuoteOnly,
}

impl FilterClause {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChainMatch => "chain_match",
            Self::ExcludeNativeBase => "exclude_native_base",
            Self::NativeQuoteOnly => "native_quote_only",
        }
    }

    pub fn from_str(name: &str) -> Result<Self, String> {
        match name {
            "chain_match" => Ok(Self::ChainMatch),
            "exclude_native_base" => Ok(Self::ExcludeNativeBase),
            "native_quote_only" => Ok(Self::NativeQuoteOnly),
            other => Err(format!(
                "unknown filter clause '{}' (expected chain_match, exclude_native_base or native_quote_only)",
                other
            )),
        }
    }
}

/// Comparison targets the clauses run against
#[derive(Debug, Clone)]
pub struct FilterTargets {
    pub chain_id: String,
    pub native_symbol: String,
    pub native_name: String,
}

impl FilterTargets {
    pub fn from_config(config: &TokensEndpointConfig) -> Self {
        Self {
            chain_id: config.chain_id.clone(),
            native_symbol: config.native_symbol.clone(),
            native_name: config.native_name.clone(),
        }
    }
}

// =============================================================================
// CLAUSE PREDICATES
// =============================================================================

/// Chain restriction: pair must sit on the configured chain
fn check_chain(pair: &UpstreamPair, targets: &FilterTargets) -> Option<FilterRejectionReason> {
    if pair.chain_id.as_deref() != Some(targets.chain_id.as_str()) {
        return Some(FilterRejectionReason::WrongChain);
    }
    None
}

/// Self-exclusion: the native asset itself never shows up as a base token
fn check_native_base(
    pair: &UpstreamPair,
    targets: &FilterTargets,
) -> Option<FilterRejectionReason> {
    let symbol_is_native = pair
        .base_token
        .as_ref()
        .and_then(|t| t.symbol.as_deref())
        .map(|s| s.eq_ignore_ascii_case(&targets.native_symbol))
        .unwrap_or(false);
    let name_is_native = pair
        .base_token
        .as_ref()
        .and_then(|t| t.name.as_deref())
        .map(|n| n.eq_ignore_ascii_case(&targets.native_name))
        .unwrap_or(false);

    if symbol_is_native || name_is_native {
        return Some(FilterRejectionReason::NativeBaseToken);
    }
    None
}

/// Quote restriction: only pairs denominated in the native asset
fn check_native_quote(
    pair: &UpstreamPair,
    targets: &FilterTargets,
) -> Option<FilterRejectionReason> {
    let quote_symbol = pair.quote_token.as_ref().and_then(|t| t.symbol.as_deref());
    if quote_symbol != Some(targets.native_symbol.as_str()) {
        return Some(FilterRejectionReason::NonNativeQuote);
    }
    let base_symbol = pair.base_token.as_ref().and_then(|t| t.symbol.as_deref());
    if base_symbol == Some(targets.native_symbol.as_str()) {
        return Some(FilterRejectionReason::NativeBaseToken);
    }
    None
}

/// Run one pair through the active clauses; first rejection wins
pub fn check_pair(
    pair: &UpstreamPair,
    clauses: &[FilterClause],
    targets: &FilterTargets,
) -> Option<FilterRejectionReason> {
    for clause in clauses {
        let rejection = match clause {
            FilterClause::ChainMatch => check_chain(pair, targets),
            FilterClause::ExcludeNativeBase => check_native_base(pair, targets),
            FilterClause::NativeQuoteOnly => check_native_quote(pair, targets),
        };
        if rejection.is_some() {
            return rejection;
        }
    }
    None
}

// =============================================================================
// PIPELINE
// =============================================================================

/// Filter a batch of upstream pairs, keeping input order
pub fn apply_filters(
    pairs: Vec<UpstreamPair>,
    clauses: &[FilterClause],
    targets: &FilterTargets,
) -> (Vec<UpstreamPair>, FilteringStats) {
    let debug_enabled = is_debug_filtering_enabled();
    let mut stats = FilteringStats::new();
    let mut passed = Vec::with_capacity(pairs.len());

    for pair in pairs {
        stats.total_processed += 1;
        match check_pair(&pair, clauses, targets) {
            Some(reason) => {
                stats.record_rejection(reason);
                if debug_enabled {
                    log(
                        LogTag::Filtering,
                        "REJECT",
                        &format!(
                            "{} rejected: {}",
                            pair.pair_address.as_deref().unwrap_or("<no address>"),
                            reason.as_str()
                        ),
                    );
                }
            }
            None => {
                stats.passed += 1;
                passed.push(pair);
            }
        }
    }

    if debug_enabled {
        log(LogTag::Filtering, "RESULT", &stats.summary());
    }

    (passed, stats)
}

/// Stable sort by creation time, newest first. Pairs without a creation
/// timestamp sort as 0 (oldest); equal timestamps keep upstream order.
pub fn sort_newest_first(pairs: &mut [UpstreamPair]) {
    pairs.sort_by_key(|p| std::cmp::Reverse(p.pair_created_at.unwrap_or(0)));
}

// =============================================================================
// REJECTION TRACKING
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterRejectionReason {
    WrongChain,
    NativeBaseToken,
    NonNativeQuote,
}

impl FilterRejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WrongChain => "wrong_chain",
            Self::NativeBaseToken => "native_base_token",
            Self::NonNativeQuote => "non_native_quote",
        }
    }
}

/// Filtering statistics tracker
#[derive(Debug, Clone)]
pub struct FilteringStats {
    pub total_processed: usize,
    pub passed: usize,
    pub rejection_counts: HashMap<String, usize>,
}

impl FilteringStats {
    pub fn new() -> Self {
        Self {
            total_processed: 0,
            passed: 0,
            rejection_counts: HashMap::new(),
        }
    }

    fn record_rejection(&mut self, reason: FilterRejectionReason) {
        let key = reason.as_str().to_string();
        *self.rejection_counts.entry(key).or_insert(0) += 1;
    }

    pub fn summary(&self) -> String {
        let mut parts: Vec<String> = self
            .rejection_counts
            .iter()
            .map(|(reason, count)| format!("{}={}", reason, count))
            .collect();
        parts.sort();
        format!(
            "{}/{} pairs passed ({})",
            self.passed,
            self.total_processed,
            if parts.is_empty() {
                "no rejections".to_string()
            } else {
                parts.join(", ")
            }
        )
    }
}
