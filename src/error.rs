//! Error types for the collection server
//!
//! Provides unified error handling using thiserror.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

// == App Error Enum ==
/// Unified error type for request handling.
///
/// Cache operations never fail, so every variant comes from the document
/// store or from the request itself.
#[derive(Error, Debug)]
pub enum AppError {
    /// Reading or parsing the stored collection failed
    #[error("Error reading store: {0}")]
    StoreRead(String),

    /// Persisting the collection failed
    #[error("Error writing store: {0}")]
    StoreWrite(String),

    /// No document carries the requested id
    #[error("Data not found: {0}")]
    NotFound(String),

    /// Request body does not have the expected shape
    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::StoreRead(_) | AppError::StoreWrite(_) => {
                error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, json!({ "message": "Data not found" })),
            AppError::MalformedInput(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedInput(rejection.body_text())
    }
}

// == Result Type Alias ==
/// Convenience Result type for handlers.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let cases = vec![
            (AppError::StoreRead("io".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::StoreWrite("io".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::NotFound("7".to_string()), StatusCode::NOT_FOUND),
            (AppError::MalformedInput("bad".to_string()), StatusCode::BAD_REQUEST),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn test_store_error_hides_detail() {
        let response = AppError::StoreRead("/secret/path: permission denied".to_string())
            .into_response();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["error"], "Internal server error");
        assert!(!json.to_string().contains("secret"));
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let response = AppError::NotFound("3".to_string()).into_response();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["message"], "Data not found");
    }
}
