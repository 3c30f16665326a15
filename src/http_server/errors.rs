//! # API Errors
//!
//! Every failure a handler can produce, with its status code. All of them
//! render as the `{success: false, error}` envelope.

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::observability::Event;
use crate::store::StoreError;

use super::envelope::Envelope;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Path identifier is not a valid ObjectId
    #[error("Invalid ID format")]
    InvalidId,

    /// Create without a non-empty title
    #[error("Title is required")]
    TitleRequired,

    /// Body is not JSON or a field has the wrong type
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Body could not be read (too large, stream error)
    #[error("{message}")]
    BodyRejected { status: StatusCode, message: String },

    /// Well-formed id, no matching record
    #[error("Todo not found")]
    TodoNotFound,

    /// No route registered for method + path
    #[error("Route not found")]
    RouteNotFound,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store or connection fault
    #[error("{0}")]
    Store(#[from] StoreError),

    /// A fault that escaped a handler
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            ApiError::InvalidId => StatusCode::BAD_REQUEST,
            ApiError::TitleRequired => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::BodyRejected { status, .. } => *status,

            // 404 Not Found
            ApiError::TodoNotFound => StatusCode::NOT_FOUND,
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidBody(err.to_string())
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::BodyRejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let ApiError::Store(e) = &self {
            tracing::warn!(event = %Event::RequestFailed, error = %e, "store operation failed");
        }
        (status, Json(Envelope::error(self.to_string()))).into_response()
    }
}
