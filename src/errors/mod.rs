use serde_json::Value;

// =============================================================================
// MAIN ERROR TYPE
// =============================================================================

#[derive(Debug, Clone)]
pub enum ProxyError {
    // Outbound HTTP connectivity errors
    Network(NetworkError),

    // Startup / credential errors
    Configuration(ConfigurationError),

    // Upstream payload errors
    Data(DataError),
}

impl std::fmt::Display for ProxyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProxyError::Network(e) => write!(f, "Network Error: {}", e),
            ProxyError::Configuration(e) => write!(f, "Configuration Error: {}", e),
            ProxyError::Data(e) => write!(f, "Data Error: {}", e),
        }
    }
}

impl std::error::Error for ProxyError {}

// =============================================================================
// NETWORK ERROR TYPES
// =============================================================================

#[derive(Debug, Clone)]
pub enum NetworkError {
    ConnectionTimeout {
        endpoint: String,
        timeout_ms: u64,
    },
    // Upstream answered with a non-success status; the status is mirrored
    // back to the caller instead of being retried.
    HttpStatus {
        endpoint: String,
        status: u16,
        body: String,
    },
    Generic {
        message: String,
    },
}

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkError::ConnectionTimeout {
                endpoint,
                timeout_ms,
            } => {
                write!(f, "Connection to {} timed out after {}ms", endpoint, timeout_ms)
            }
            NetworkError::HttpStatus {
                endpoint, status, ..
            } => {
                write!(f, "{} returned HTTP {}", endpoint, status)
            }
            NetworkError::Generic { message } => write!(f, "{}", message),
        }
    }
}

// =============================================================================
// CONFIGURATION ERROR TYPES
// =============================================================================

#[derive(Debug, Clone)]
pub enum ConfigurationError {
    MissingCredential { name: String },
    InvalidConfig { field: String, reason: String },
    InvalidUrl { url: String, error: String },
    Generic { message: String },
}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigurationError::MissingCredential { name } => {
                write!(f, "{} not set in environment", name)
            }
            ConfigurationError::InvalidConfig { field, reason } => {
                write!(f, "Invalid config field '{}': {}", field, reason)
            }
            ConfigurationError::InvalidUrl { url, error } => {
                write!(f, "Invalid URL '{}': {}", url, error)
            }
            ConfigurationError::Generic { message } => write!(f, "{}", message),
        }
    }
}

// =============================================================================
// DATA ERROR TYPES
// =============================================================================

#[derive(Debug, Clone)]
pub enum DataError {
    ParseError { data_type: String, error: String },
    MissingField { field: String, context: String },
    Generic { message: String },
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::ParseError { data_type, error } => {
                write!(f, "Failed to parse {}: {}", data_type, error)
            }
            DataError::MissingField { field, context } => {
                write!(f, "Missing field '{}' in {}", field, context)
            }
            DataError::Generic { message } => write!(f, "{}", message),
        }
    }
}

// =============================================================================
// ERROR CONVERSIONS FROM STANDARD LIBRARY AND CLIENT TYPES
// =============================================================================

impl From<String> for ProxyError {
    fn from(err: String) -> Self {
        ProxyError::Network(NetworkError::Generic { message: err })
    }
}

impl From<&str> for ProxyError {
    fn from(err: &str) -> Self {
        ProxyError::Network(NetworkError::Generic {
            message: err.to_string(),
        })
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            let endpoint = err
                .url()
                .map(|u| u.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            return ProxyError::Network(NetworkError::ConnectionTimeout {
                endpoint,
                timeout_ms: 0,
            });
        }
        ProxyError::Network(NetworkError::Generic {
            message: format!("HTTP request failed: {}", err),
        })
    }
}

impl From<serde_json::Error> for ProxyError {
    fn from(err: serde_json::Error) -> Self {
        ProxyError::Data(DataError::ParseError {
            data_type: "JSON".to_string(),
            error: err.to_string(),
        })
    }
}

// =============================================================================
// STRUCTURED ERROR BUILDERS
// =============================================================================

impl ProxyError {
    /// Create a generic network error
    pub fn network_error(message: impl Into<String>) -> Self {
        ProxyError::Network(NetworkError::Generic {
            message: message.into(),
        })
    }

    /// Create a timeout error for a specific endpoint
    pub fn timeout_error(endpoint: impl Into<String>, timeout_ms: u64) -> Self {
        ProxyError::Network(NetworkError::ConnectionTimeout {
            endpoint: endpoint.into(),
            timeout_ms,
        })
    }

    /// Create an upstream non-success status error
    pub fn upstream_status_error(
        endpoint: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        ProxyError::Network(NetworkError::HttpStatus {
            endpoint: endpoint.into(),
            status,
            body: body.into(),
        })
    }

    /// Create a parse error for a named payload type
    pub fn parse_error(data_type: impl Into<String>, error: impl Into<String>) -> Self {
        ProxyError::Data(DataError::ParseError {
            data_type: data_type.into(),
            error: error.into(),
        })
    }

    /// Create a missing-field error for an upstream payload
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        ProxyError::Data(DataError::MissingField {
            field: field.into(),
            context: context.into(),
        })
    }

    /// Create a missing-credential error
    pub fn missing_credential(name: impl Into<String>) -> Self {
        ProxyError::Configuration(ConfigurationError::MissingCredential { name: name.into() })
    }

    /// Create a generic configuration error
    pub fn configuration_error(message: impl Into<String>) -> Self {
        ProxyError::Configuration(ConfigurationError::Generic {
            message: message.into(),
        })
    }

    /// Status carried by an upstream non-success response, if that is what
    /// this error is.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            ProxyError::Network(NetworkError::HttpStatus { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// True when the error is a missing credential and the request should be
    /// rejected before any outbound call.
    pub fn is_missing_credential(&self) -> bool {
        matches!(
            self,
            ProxyError::Configuration(ConfigurationError::MissingCredential { .. })
        )
    }

    /// Body carried by an upstream non-success response, parsed as JSON when
    /// possible.
    pub fn upstream_body(&self) -> Option<Value> {
        match self {
            ProxyError::Network(NetworkError::HttpStatus { body, .. }) => {
                serde_json::from_str(body).ok()
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_display() {
        let err = ProxyError::missing_credential("HELIUS_API_KEY");
        assert_eq!(
            err.to_string(),
            "Configuration Error: HELIUS_API_KEY not set in environment"
        );
        assert!(err.is_missing_credential());
    }

    #[test]
    fn test_upstream_status_accessor() {
        let err = ProxyError::upstream_status_error("dexscreener", 404, "{\"ok\":false}");
        assert_eq!(err.upstream_status(), Some(404));
        assert_eq!(err.upstream_body().unwrap()["ok"], false);

        let other = ProxyError::network_error("connection reset");
        assert_eq!(other.upstream_status(), None);
    }

    #[test]
    fn test_from_serde_json_error() {
        let parse_failure = serde_json::from_str::<Value>("not json").unwrap_err();
        let err: ProxyError = parse_failure.into();
        assert!(matches!(err, ProxyError::Data(DataError::ParseError { .. })));
    }

    #[test]
    fn test_from_string() {
        let err: ProxyError = String::from("socket closed").into();
        assert_eq!(err.to_string(), "Network Error: socket closed");
    }
}
