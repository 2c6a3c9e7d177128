//! # REST API Errors
//!
//! Error types for the product endpoints and their JSON envelopes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::persistence::StoreError;

use super::validation::ValidationErrors;

/// Fixed message for a missing product
pub const NOT_FOUND_MESSAGE: &str = "Product Not Found";

/// Fixed message for any server-side failure
pub const INTERNAL_MESSAGE: &str = "Internal Server Error";

/// Result type for product handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Product API errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// One or more input checks failed
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// No product with the requested id
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Persistence failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Single-message error body: `{ "error": "..." }`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::new(NOT_FOUND_MESSAGE)
    }

    pub fn internal() -> Self {
        Self::new(INTERNAL_MESSAGE)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::Validation(errors) => {
                tracing::debug!(count = errors.len(), "request rejected by validation");
                (status, Json(errors)).into_response()
            }
            ApiError::NotFound => (status, Json(ErrorResponse::not_found())).into_response(),
            ApiError::Store(err) => {
                tracing::error!(error = %err, "persistence failure");
                (status, Json(ErrorResponse::internal())).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest_api::validation::FieldError;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Validation(ValidationErrors::default()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Store(StoreError::Missing(1)).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_body() {
        let json = serde_json::to_value(ErrorResponse::not_found()).unwrap();
        assert_eq!(json, serde_json::json!({"error": "Product Not Found"}));
    }

    #[tokio::test]
    async fn test_store_error_hides_cause() {
        let response = ApiError::Store(StoreError::Missing(7)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json, serde_json::json!({"error": "Internal Server Error"}));
    }

    #[test]
    fn test_validation_from() {
        let errors = ValidationErrors::single(FieldError::malformed_body());
        let err = ApiError::from(errors);
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
