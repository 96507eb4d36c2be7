//! Token pipeline types: the optional-field upstream pair model and the
//! total outward projection served by /tokens.

pub mod types;

// Re-export main types
pub use types::{
    NormalizedToken, PriceChangeStats, TokenDescriptor, TokenListResponse, TxnPeriod, UpstreamPair,
};
