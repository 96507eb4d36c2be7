//! Upstream API clients
//!
//! Every client takes the shared [`HttpFetch`] transport, so request handling
//! can be exercised in tests without touching the network.

pub mod dexscreener;
pub mod helius;
pub mod http;
pub mod pumpportal;

pub use http::{HttpFetch, HttpResponse, ReqwestFetch};
