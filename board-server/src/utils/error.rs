//! Unified error handling
//!
//! Application error type and response envelope for the HTTP surface.
//!
//! # Error code scheme
//!
//! | Code  | Meaning            |
//! |-------|--------------------|
//! | E0000 | Success            |
//! | E0002 | Validation failed  |
//! | E0003 | Not found          |
//! | E9002 | Store write failed |
//! | E9003 | Store unreachable  |
//! | E9001 | Internal error     |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::store::StoreError;

/// API response envelope
///
/// ```json
/// {
///   "code": "E0000",
///   "message": "Success",
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// Error code (E0000 on success)
    pub code: String,
    /// Message
    pub message: String,
    /// Response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Mutation on a missing order (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Missing or malformed form input (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The store rejected a write (500)
    #[error("Store error: {0}")]
    Database(String),

    /// Cannot reach the store (503)
    #[error("Store unreachable: {0}")]
    Connection(String),

    /// Anything else (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => Self::NotFound(msg),
            StoreError::Persistence(msg) => Self::Database(msg),
            StoreError::Connection(msg) => Self::Connection(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.clone()),

            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.clone()),

            AppError::Database(msg) => {
                error!(target: "store", error = %msg, "Store write failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9002",
                    "Store error".to_string(),
                )
            }

            AppError::Connection(msg) => {
                error!(target: "store", error = %msg, "Store unreachable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "E9003",
                    "Store unreachable".to_string(),
                )
            }

            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(AppResponse::<()> {
            code: code.to_string(),
            message,
            data: None,
        });

        (status, body).into_response()
    }
}

/// Result type for handlers
pub type AppResult<T> = Result<T, AppError>;

// ========== Helper functions ==========

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "E0000".to_string(),
        message: "Success".to_string(),
        data: Some(data),
    })
}

/// Create a successful response with custom message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "E0000".to_string(),
        message: message.into(),
        data: Some(data),
    })
}
