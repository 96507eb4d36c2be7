use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

use crate::arguments;
use crate::errors::ProxyError;
use crate::filtering::FilterClause;

/// Full runtime configuration, loaded once at startup and passed into the
/// webserver. Handlers only ever see this snapshot; nothing reads the
/// environment after startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub server: ServerConfig,
    pub upstreams: UpstreamConfig,
    pub tokens: TokensEndpointConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub dexscreener_base_url: String,
    pub helius_rpc_base_url: String,
    pub pumpportal_data_url: String,
    /// Absent or empty means Helius endpoints answer 500 without calling out
    pub helius_api_key: Option<String>,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokensEndpointConfig {
    pub source: TokenSource,
    pub filters: Vec<FilterClause>,
    pub sort_newest_first: bool,
    pub no_store: bool,
    pub chain_id: String,
    pub native_symbol: String,
    pub native_name: String,
}

/// Where /tokens gets its data from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenSource {
    /// DexScreener free-text search (latest/dex/search?q=...)
    Search { query: String },
    /// DexScreener per-chain pair listing (latest/dex/pairs/<chain>)
    ChainPairs { chain: String },
    /// PumpPortal data endpoint, returned unmodified
    PumpPortal,
}

impl TokenSource {
    /// Parse the TOKENS_SOURCE env value: `search:<q>`, `pairs:<chain>` or
    /// `pumpportal`
    pub fn parse(value: &str) -> Result<Self, String> {
        if value == "pumpportal" {
            return Ok(TokenSource::PumpPortal);
        }
        if let Some(query) = value.strip_prefix("search:") {
            if query.is_empty() {
                return Err("search source requires a query, e.g. search:solana".to_string());
            }
            return Ok(TokenSource::Search {
                query: query.to_string(),
            });
        }
        if let Some(chain) = value.strip_prefix("pairs:") {
            if chain.is_empty() {
                return Err("pairs source requires a chain, e.g. pairs:solana".to_string());
            }
            return Ok(TokenSource::ChainPairs {
                chain: chain.to_string(),
            });
        }
        Err(format!(
            "unknown token source '{}' (expected search:<q>, pairs:<chain> or pumpportal)",
            value
        ))
    }

    pub fn describe(&self) -> String {
        match self {
            TokenSource::Search { query } => format!("dexscreener search '{}'", query),
            TokenSource::ChainPairs { chain } => format!("dexscreener pairs '{}'", chain),
            TokenSource::PumpPortal => "pumpportal passthrough".to_string(),
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            upstreams: UpstreamConfig {
                dexscreener_base_url: "https://api.dexscreener.com".to_string(),
                helius_rpc_base_url: "https://mainnet.helius-rpc.com".to_string(),
                pumpportal_data_url: "https://pumpportal.fun/api/data".to_string(),
                helius_api_key: None,
                request_timeout_secs: 30,
            },
            tokens: TokensEndpointConfig {
                source: TokenSource::Search {
                    query: "solana".to_string(),
                },
                filters: vec![FilterClause::ChainMatch, FilterClause::ExcludeNativeBase],
                sort_newest_first: false,
                no_store: false,
                chain_id: "solana".to_string(),
                native_symbol: "SOL".to_string(),
                native_name: "Solana".to_string(),
            },
        }
    }
}

impl ProxyConfig {
    /// Build the configuration from environment variables (dotenv-compatible)
    /// and command-line overrides, then validate it.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(port) = env::var("PORT") {
            config.server.port = port
                .parse()
                .with_context(|| format!("PORT must be a port number, got '{}'", port))?;
        }
        if let Ok(host) = env::var("HOST") {
            config.server.host = host;
        }

        // CLI flags win over the environment
        if let Some(port) = arguments::get_port_override() {
            config.server.port = port;
        }
        if let Some(host) = arguments::get_host_override() {
            config.server.host = host;
        }

        config.upstreams.helius_api_key = env::var("HELIUS_API_KEY").ok().filter(|k| !k.is_empty());

        if let Ok(timeout) = env::var("REQUEST_TIMEOUT_SECS") {
            config.upstreams.request_timeout_secs = timeout.parse().with_context(|| {
                format!("REQUEST_TIMEOUT_SECS must be a number, got '{}'", timeout)
            })?;
        }

        if let Ok(source) = env::var("TOKENS_SOURCE") {
            config.tokens.source = TokenSource::parse(&source).map_err(|e| anyhow::anyhow!(e))?;
        }
        if let Ok(filters) = env::var("TOKENS_FILTERS") {
            config.tokens.filters = parse_filter_list(&filters).map_err(|e| anyhow::anyhow!(e))?;
        }
        if let Ok(sort) = env::var("TOKENS_SORT_NEWEST") {
            config.tokens.sort_newest_first = parse_bool(&sort)
                .map_err(|e| anyhow::anyhow!("TOKENS_SORT_NEWEST must be true/false: {}", e))?;
        }
        if let Ok(no_store) = env::var("TOKENS_NO_STORE") {
            config.tokens.no_store = parse_bool(&no_store)
                .map_err(|e| anyhow::anyhow!("TOKENS_NO_STORE must be true/false: {}", e))?;
        }
        if let Ok(chain) = env::var("CHAIN_ID") {
            config.tokens.chain_id = chain;
        }
        if let Ok(symbol) = env::var("NATIVE_SYMBOL") {
            config.tokens.native_symbol = symbol;
        }
        if let Ok(name) = env::var("NATIVE_NAME") {
            config.tokens.native_name = name;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate URLs and numeric ranges
    pub fn validate(&self) -> Result<()> {
        for (label, value) in [
            ("dexscreener_base_url", &self.upstreams.dexscreener_base_url),
            ("helius_rpc_base_url", &self.upstreams.helius_rpc_base_url),
            ("pumpportal_data_url", &self.upstreams.pumpportal_data_url),
        ] {
            url::Url::parse(value)
                .with_context(|| format!("{} is not a valid URL: '{}'", label, value))?;
        }

        if self.upstreams.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!("request_timeout_secs must be greater than 0"));
        }

        Ok(())
    }

    /// Full Helius RPC URL including the api-key query parameter.
    ///
    /// Errors when the credential is missing so callers can short-circuit
    /// before making any outbound request.
    pub fn helius_rpc_url(&self) -> Result<String, ProxyError> {
        let key = self
            .upstreams
            .helius_api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ProxyError::missing_credential("HELIUS_API_KEY"))?;

        Ok(format!(
            "{}/?api-key={}",
            self.upstreams.helius_rpc_base_url.trim_end_matches('/'),
            key
        ))
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_bool(value: &str) -> Result<bool, String> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(format!("not a boolean: '{}'", other)),
    }
}

fn parse_filter_list(value: &str) -> Result<Vec<FilterClause>, String> {
    value
        .split(',')
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(FilterClause::from_str)
        .collect()
}
