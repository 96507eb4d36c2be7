/// PumpPortal data client
///
/// Thin passthrough: the payload is forwarded to callers without reshaping.

use serde_json::Value;
use std::sync::Arc;

use crate::apis::http::HttpFetch;
use crate::errors::ProxyError;
use crate::logger::{self, LogTag};

/// PumpPortal data endpoint
pub const PUMPPORTAL_DATA_URL: &str = "https://pumpportal.fun/api/data";

pub struct PumpPortalClient {
    http: Arc<dyn HttpFetch>,
    data_url: String,
}

impl PumpPortalClient {
    pub fn new(http: Arc<dyn HttpFetch>, data_url: &str) -> Self {
        Self {
            http,
            data_url: data_url.to_string(),
        }
    }

    /// Fetch the data payload, unmodified
    pub async fn fetch_data(&self) -> Result<Value, ProxyError> {
        logger::debug(LogTag::Api, &format!("[PUMPPORTAL] GET {}", self.data_url));

        let response = self.http.get(&self.data_url).await?;

        if !response.is_success() {
            return Err(ProxyError::upstream_status_error(
                "pumpportal",
                response.status,
                response.body,
            ));
        }

        serde_json::from_str(&response.body)
            .map_err(|e| ProxyError::parse_error("PumpPortal response", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::http::testing::StubFetch;

    #[tokio::test]
    async fn test_payload_forwarded_verbatim() {
        let stub = Arc::new(StubFetch::new());
        stub.push_response(200, r#"{"coins":[{"mint":"abc","usd_market_cap":12.5}]}"#);

        let client = PumpPortalClient::new(stub.clone(), PUMPPORTAL_DATA_URL);
        let data = client.fetch_data().await.unwrap();

        assert_eq!(data["coins"][0]["mint"], "abc");
        assert_eq!(stub.recorded_requests()[0].url, PUMPPORTAL_DATA_URL);
    }

    #[tokio::test]
    async fn test_upstream_status_preserved() {
        let stub = Arc::new(StubFetch::new());
        stub.push_response(503, "unavailable");

        let client = PumpPortalClient::new(stub, PUMPPORTAL_DATA_URL);
        let err = client.fetch_data().await.unwrap_err();

        assert_eq!(err.upstream_status(), Some(503));
    }
}
