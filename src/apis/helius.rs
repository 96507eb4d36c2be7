/// Helius JSON-RPC client
///
/// Speaks JSON-RPC 2.0 against the Helius mainnet endpoint. Request ids are
/// fixed per operation so upstream logs stay comparable across deployments.
///
/// Responses are parsed but never gated on HTTP status or the JSON-RPC
/// `error` member here; /helius-health forwards degraded bodies verbatim and
/// the other callers pick the fields they need.

use serde_json::{json, Value};
use std::sync::Arc;

use crate::apis::http::HttpFetch;
use crate::errors::ProxyError;
use crate::logger::{self, LogTag};

// ============================================================================
// RPC CONFIGURATION
// ============================================================================

/// Wrapped SOL mint, the fixed account whose activity /helius-txs reports
pub const WSOL_MINT: &str = "So11111111111111111111111111111111111111112";

/// Signatures fetched per lookup
pub const SIGNATURE_FETCH_LIMIT: u64 = 10;

/// Version cap passed to getParsedTransactions
pub const MAX_SUPPORTED_TRANSACTION_VERSION: u64 = 0;

pub struct HeliusClient {
    http: Arc<dyn HttpFetch>,
    rpc_url: String,
}

impl HeliusClient {
    pub fn new(http: Arc<dyn HttpFetch>, rpc_url: String) -> Self {
        Self { http, rpc_url }
    }

    /// One JSON-RPC 2.0 round trip
    async fn rpc_call(&self, id: &str, method: &str, params: Value) -> Result<Value, ProxyError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        logger::debug(LogTag::Helius, &format!("RPC {} (id={})", method, id));

        let response = self.http.post_json(&self.rpc_url, &payload).await?;

        serde_json::from_str(&response.body)
            .map_err(|e| ProxyError::parse_error(format!("{} response", method), e.to_string()))
    }

    /// getHealth, returned verbatim including any JSON-RPC error object
    pub async fn get_health(&self) -> Result<Value, ProxyError> {
        self.rpc_call("health-check", "getHealth", json!([])).await
    }

    /// Recent transaction signatures for an address, newest first
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Signature strings pulled from the result entries
    /// * `Err(ProxyError)` - Transport failure, bad JSON or an entry without
    ///   a signature field
    pub async fn get_signatures_for_address(
        &self,
        address: &str,
        limit: u64,
    ) -> Result<Vec<String>, ProxyError> {
        let body = self
            .rpc_call(
                "recent-sigs",
                "getSignaturesForAddress",
                json!([address, { "limit": limit }]),
            )
            .await?;

        let entries = body
            .get("result")
            .and_then(|r| r.as_array())
            .cloned()
            .unwrap_or_default();

        let mut signatures = Vec::with_capacity(entries.len());
        for entry in &entries {
            let signature = entry
                .get("signature")
                .and_then(|s| s.as_str())
                .ok_or_else(|| {
                    ProxyError::missing_field("signature", "getSignaturesForAddress result")
                })?;
            signatures.push(signature.to_string());
        }

        logger::debug(
            LogTag::Helius,
            &format!("{} signatures for {}", signatures.len(), address),
        );

        Ok(signatures)
    }

    /// Parsed transaction details for a batch of signatures
    ///
    /// A response whose result member is missing or null yields an empty
    /// array so callers always get an array back.
    pub async fn get_parsed_transactions(
        &self,
        signatures: &[String],
    ) -> Result<Value, ProxyError> {
        let body = self
            .rpc_call(
                "parsed-txs",
                "getParsedTransactions",
                json!([
                    signatures,
                    { "maxSupportedTransactionVersion": MAX_SUPPORTED_TRANSACTION_VERSION }
                ]),
            )
            .await?;

        let result = match body.get("result") {
            None | Some(Value::Null) => json!([]),
            Some(value) => value.clone(),
        };
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::http::testing::StubFetch;

    const RPC_URL: &str = "https://mainnet.helius-rpc.com/?api-key=test-key";

    fn client_with(stub: Arc<StubFetch>) -> HeliusClient {
        HeliusClient::new(stub, RPC_URL.to_string())
    }

    #[tokio::test]
    async fn test_health_payload_shape() {
        let stub = Arc::new(StubFetch::new());
        stub.push_response(200, r#"{"jsonrpc":"2.0","id":"health-check","result":"ok"}"#);

        let body = client_with(stub.clone()).get_health().await.unwrap();
        assert_eq!(body["result"], "ok");

        let requests = stub.recorded_requests();
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].url, RPC_URL);

        let payload = requests[0].body.clone().unwrap();
        assert_eq!(payload["jsonrpc"], "2.0");
        assert_eq!(payload["id"], "health-check");
        assert_eq!(payload["method"], "getHealth");
        assert_eq!(payload["params"], json!([]));
    }

    #[tokio::test]
    async fn test_health_passes_rpc_error_through() {
        let stub = Arc::new(StubFetch::new());
        stub.push_response(
            200,
            r#"{"jsonrpc":"2.0","id":"health-check","error":{"code":-32603,"message":"node is behind"}}"#,
        );

        let body = client_with(stub).get_health().await.unwrap();
        assert_eq!(body["error"]["code"], -32603);
    }

    #[tokio::test]
    async fn test_signature_extraction() {
        let stub = Arc::new(StubFetch::new());
        stub.push_response(
            200,
            r#"{"jsonrpc":"2.0","id":"recent-sigs","result":[{"signature":"sig1","slot":1},{"signature":"sig2","slot":2}]}"#,
        );

        let sigs = client_with(stub.clone())
            .get_signatures_for_address(WSOL_MINT, SIGNATURE_FETCH_LIMIT)
            .await
            .unwrap();

        assert_eq!(sigs, vec!["sig1".to_string(), "sig2".to_string()]);

        let payload = stub.recorded_requests()[0].body.clone().unwrap();
        assert_eq!(payload["method"], "getSignaturesForAddress");
        assert_eq!(payload["params"][0], WSOL_MINT);
        assert_eq!(payload["params"][1]["limit"], 10);
    }

    #[tokio::test]
    async fn test_missing_result_means_no_signatures() {
        let stub = Arc::new(StubFetch::new());
        stub.push_response(200, r#"{"jsonrpc":"2.0","id":"recent-sigs"}"#);
        stub.push_response(200, r#"{"jsonrpc":"2.0","id":"recent-sigs","result":null}"#);

        let client = client_with(stub);
        let sigs = client
            .get_signatures_for_address(WSOL_MINT, SIGNATURE_FETCH_LIMIT)
            .await
            .unwrap();
        assert!(sigs.is_empty());

        let sigs = client
            .get_signatures_for_address(WSOL_MINT, SIGNATURE_FETCH_LIMIT)
            .await
            .unwrap();
        assert!(sigs.is_empty());
    }

    #[tokio::test]
    async fn test_entry_without_signature_is_error() {
        let stub = Arc::new(StubFetch::new());
        stub.push_response(
            200,
            r#"{"jsonrpc":"2.0","id":"recent-sigs","result":[{"slot":1}]}"#,
        );

        let err = client_with(stub)
            .get_signatures_for_address(WSOL_MINT, SIGNATURE_FETCH_LIMIT)
            .await
            .unwrap_err();
        assert!(format!("{}", err).contains("signature"));
    }

    #[tokio::test]
    async fn test_parsed_transactions_payload_and_fallback() {
        let stub = Arc::new(StubFetch::new());
        stub.push_response(200, r#"{"jsonrpc":"2.0","id":"parsed-txs"}"#);

        let sigs = vec!["sig1".to_string()];
        let txs = client_with(stub.clone())
            .get_parsed_transactions(&sigs)
            .await
            .unwrap();

        assert_eq!(txs, json!([]));

        let payload = stub.recorded_requests()[0].body.clone().unwrap();
        assert_eq!(payload["id"], "parsed-txs");
        assert_eq!(payload["params"][0], json!(["sig1"]));
        assert_eq!(payload["params"][1]["maxSupportedTransactionVersion"], 0);
    }

    #[tokio::test]
    async fn test_null_result_means_empty_transactions() {
        let stub = Arc::new(StubFetch::new());
        stub.push_response(200, r#"{"jsonrpc":"2.0","id":"parsed-txs","result":null}"#);

        let sigs = vec!["sig1".to_string()];
        let txs = client_with(stub).get_parsed_transactions(&sigs).await.unwrap();
        assert_eq!(txs, json!([]));
    }

    #[tokio::test]
    async fn test_non_json_body_is_parse_error() {
        let stub = Arc::new(StubFetch::new());
        stub.push_response(502, "Bad Gateway");

        assert!(client_with(stub).get_health().await.is_err());
    }
}
