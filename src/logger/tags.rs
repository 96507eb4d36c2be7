/// Log tags identifying the subsystem a message originates from
///
/// Each tag maps to a --debug-<key> command-line flag so diagnostics can be
/// enabled per subsystem without drowning the console.

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogTag {
    /// Startup, shutdown and process-level events
    System,
    /// Configuration loading and validation
    Config,
    /// HTTP server lifecycle and request handling
    Webserver,
    /// Outbound upstream API calls (DexScreener, PumpPortal)
    Api,
    /// Helius JSON-RPC calls
    Helius,
    /// Token filter pipeline
    Filtering,
    /// Token normalization and projection
    Tokens,
    /// Test-only messages
    Test,
    /// Anything without a dedicated tag
    Other(String),
}

impl LogTag {
    /// Key used for --debug-<key> flag matching
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system".to_string(),
            LogTag::Config => "config".to_string(),
            LogTag::Webserver => "webserver".to_string(),
            LogTag::Api => "api".to_string(),
            LogTag::Helius => "helius".to_string(),
            LogTag::Filtering => "filtering".to_string(),
            LogTag::Tokens => "tokens".to_string(),
            LogTag::Test => "test".to_string(),
            LogTag::Other(s) => s.to_lowercase(),
        }
    }

    /// Uncolored display name for plain-text output
    pub fn to_plain_string(&self) -> String {
        match self {
            LogTag::System => "SYSTEM".to_string(),
            LogTag::Config => "CONFIG".to_string(),
            LogTag::Webserver => "WEBSERVER".to_string(),
            LogTag::Api => "API".to_string(),
            LogTag::Helius => "HELIUS".to_string(),
            LogTag::Filtering => "FILTER".to_string(),
            LogTag::Tokens => "TOKENS".to_string(),
            LogTag::Test => "TEST".to_string(),
            LogTag::Other(s) => s.to_uppercase(),
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}
