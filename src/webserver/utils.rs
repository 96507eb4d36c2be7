/// Shared response helpers for route handlers
///
/// Every JSON error leaving this service has the same one-key shape:
/// `{"error": "<message>"}`.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

/// 200 with a JSON body
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// 200 with a JSON body and caching disabled
pub fn success_response_no_store<T: Serialize>(data: T) -> Response {
    (
        StatusCode::OK,
        [(header::CACHE_CONTROL, "no-store")],
        Json(data),
    )
        .into_response()
}

/// Error with the service's one-key body
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Mirror an upstream status code on an error body
///
/// A status outside the representable range falls back to 502.
pub fn upstream_error_response(status: u16, message: &str) -> Response {
    let code = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
    error_response(code, message)
}

#[cfg(test)]
pub mod testing {
    //! Response readers shared by route tests

    use axum::http::StatusCode;
    use axum::response::Response;
    use serde_json::Value;

    pub async fn read_json(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    pub async fn read_text(response: Response) -> (StatusCode, String) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::testing::read_json;
    use super::*;

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        let (status, body) = read_json(response).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "Internal server error" }));
    }

    #[tokio::test]
    async fn test_upstream_status_mirrored() {
        let response = upstream_error_response(429, "Failed to fetch from DexScreener");
        let (status, _) = read_json(response).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_invalid_status_falls_back_to_502() {
        let response = upstream_error_response(42, "Failed to fetch from DexScreener");
        let (status, _) = read_json(response).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_no_store_header() {
        let response = success_response_no_store(serde_json::json!({ "tokens": [] }));
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-store"
        );
    }
}
