//! # Response Envelope
//!
//! Every handler answers with the same JSON wrapper:
//!
//! ```text
//! { "success": bool, "data"?: T, "count"?: int, "message"?: string, "error"?: string }
//! ```
//!
//! Absent members are omitted from the output rather than sent as `null`.

use serde::Serialize;

/// Uniform JSON wrapper for handler responses
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    /// `{success: true, data}`
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            count: None,
            data: Some(data),
            message: None,
            error: None,
        }
    }
}

impl<T: Serialize> Envelope<Vec<T>> {
    /// `{success: true, count, data}`
    pub fn list(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: Some(data.len()),
            data: Some(data),
            message: None,
            error: None,
        }
    }
}

impl Envelope<()> {
    /// `{success: true, message}`
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            count: None,
            data: None,
            message: Some(message.into()),
            error: None,
        }
    }

    /// `{success: false, error}`
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            count: None,
            data: None,
            message: None,
            error: Some(error.into()),
        }
    }
}
