//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! Raw database error text never reaches a client: 500-class responses
//! log the underlying error and return a generic body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::StoreError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Request validation failed (400)
    Validation(ValidationError),

    /// Required field empty or over its length bound at the database (400)
    Constraint(String),

    /// Structurally invalid argument, e.g. a zero id (400)
    InvalidArgument(String),

    /// Booking not found (404)
    NotFound { id: i64 },

    /// Store failure (500, logged)
    Store(StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": e.to_string()
                }),
            ),
            Self::Constraint(message) => {
                // Log the driver text, return a curated message
                tracing::warn!("constraint violation: {}", message);
                (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "error": "constraint_violation",
                        "message": "a field is empty or exceeds its length limit"
                    }),
                )
            }
            Self::InvalidArgument(message) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "invalid_argument",
                    "message": message
                }),
            ),
            Self::NotFound { id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("booking {} not found", id)
                }),
            ),
            Self::Store(e) => {
                // Log the actual error, return generic message
                tracing::error!("store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { id } => Self::NotFound { id },
            StoreError::Constraint(message) => Self::Constraint(message),
            StoreError::InvalidArgument(message) => Self::InvalidArgument(message),
            e => Self::Store(e),
        }
    }
}
