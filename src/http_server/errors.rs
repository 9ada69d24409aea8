//! # HTTP API Errors
//!
//! Every failure leaves a handler as `ApiError` and is rendered as
//! `{"error": ..., "code": ...}` with the matching status.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event};
use crate::store::StoreError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Rejected by the record store
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Path segment is not a document number
    #[error("invalid document '{0}': expected a positive integer")]
    InvalidDocument(String),

    /// Body missing, not JSON, or not the expected shape
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Query string does not decode
    #[error("invalid query string: {0}")]
    InvalidQuery(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Poisoned lock or similar
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Store(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidDocument(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Store(err) => err.code(),
            ApiError::InvalidDocument(_) => "API_INVALID_DOCUMENT",
            ApiError::InvalidBody(_) => "API_INVALID_BODY",
            ApiError::InvalidQuery(_) => "API_INVALID_QUERY",
            ApiError::Internal(_) => "API_INTERNAL",
        }
    }

    /// Lock poisoned by a panicking writer
    pub fn poisoned(tree: &str) -> Self {
        log_event_with_fields(
            Event::InternalFailure,
            &[("reason", "lock poisoned"), ("tree", tree)],
        );
        ApiError::Internal(format!("{} store is unavailable", tree))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        Self {
            code: err.code(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{SchemaError, ValidationDetails};

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::from(StoreError::Duplicate(1)).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(StoreError::NotFound(1)).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(StoreError::InvalidOrder("x".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidQuery("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("test".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_message_passes_through() {
        let schema = SchemaError::validation_failed(ValidationDetails::empty_field("city"));
        let err = ApiError::from(StoreError::from(schema.clone()));
        assert_eq!(err.to_string(), schema.to_string());
        assert_eq!(err.code(), "SCHEMA_VALIDATION_FAILED");
    }

    #[test]
    fn test_error_response_body() {
        let body = ErrorResponse::from(ApiError::from(StoreError::NotFound(12)));
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["code"], "TREE_KEY_NOT_FOUND");
        assert!(value["error"].as_str().unwrap().contains("12"));
    }
}
