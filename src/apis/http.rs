/// HTTP transport used by every upstream client
///
/// The trait is the seam between clients and the network: production wires in
/// [`ReqwestFetch`], tests substitute a scripted stub and count outbound
/// calls. Non-success statuses are NOT errors at this layer; each client
/// decides what a status means for its endpoint.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::errors::ProxyError;

/// Raw upstream response with the status left uninterpreted
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, ProxyError>;
    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse, ProxyError>;
}

/// reqwest-backed production transport
pub struct ReqwestFetch {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestFetch {
    pub fn new(timeout_seconds: u64) -> Result<Self, ProxyError> {
        if timeout_seconds == 0 {
            return Err(ProxyError::configuration_error(
                "Timeout must be greater than zero",
            ));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(timeout_seconds),
        })
    }

    fn map_send_error(&self, url: &str, err: reqwest::Error) -> ProxyError {
        if err.is_timeout() {
            return ProxyError::timeout_error(url, self.timeout.as_millis() as u64);
        }
        ProxyError::network_error(format!("Request to {} failed: {}", url, err))
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetch {
    async fn get(&self, url: &str) -> Result<HttpResponse, ProxyError> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.map_send_error(url, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ProxyError::network_error(format!("Failed to read response body: {}", e)))?;

        Ok(HttpResponse { status, body })
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse, ProxyError> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.map_send_error(url, e))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ProxyError::network_error(format!("Failed to read response body: {}", e)))?;

        Ok(HttpResponse { status, body: text })
    }
}


#[cfg(test)]
mod tests {
    use super::testing::StubFetch;
    use super::*;

    #[test]
    fn test_is_success_bounds() {
        let ok = HttpResponse {
            status: 200,
            body: String::new(),
        };
        let created = HttpResponse {
            status: 204,
            body: String::new(),
        };
        let not_found = HttpResponse {
            status: 404,
            body: String::new(),
        };
        let redirect = HttpResponse {
            status: 301,
            body: String::new(),
        };

        assert!(ok.is_success());
        assert!(created.is_success());
        assert!(!not_found.is_success());
        assert!(!redirect.is_success());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(ReqwestFetch::new(0).is_err());
        assert!(ReqwestFetch::new(30).is_ok());
    }

    #[tokio::test]
    async fn test_stub_plays_back_in_order() {
        let stub = StubFetch::new();
        stub.push_response(200, "first");
        stub.push_response(404, "second");

        let a = stub.get("http://example.test/a").await.unwrap();
        let b = stub.get("http://example.test/b").await.unwrap();

        assert_eq!(a.body, "first");
        assert_eq!(b.status, 404);
        assert_eq!(stub.call_count(), 2);
        assert!(stub.get("http://example.test/c").await.is_err());
    }
}
