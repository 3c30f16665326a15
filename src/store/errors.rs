//! # Store Errors
//!
//! Every failure surfaced by a backend or its connection layer. The
//! `Display` text is what HTTP clients see in the 500 envelope.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store faults
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Could not reach or authenticate against the store
    #[error("{0}")]
    Connection(String),

    /// An operation was issued and failed
    #[error("{0}")]
    Operation(String),

    /// A stored document could not be mapped to a todo
    #[error("Corrupt document: {0}")]
    CorruptDocument(String),
}

impl StoreError {
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }

    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::CorruptDocument(msg.into())
    }

    /// Whether this fault happened while connecting
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Operation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_passed_through() {
        let err = StoreError::operation("connection reset by peer");
        assert_eq!(err.to_string(), "connection reset by peer");
    }

    #[test]
    fn test_corrupt_document_display() {
        let err = StoreError::corrupt("missing _id");
        assert_eq!(err.to_string(), "Corrupt document: missing _id");
    }

    #[test]
    fn test_is_connection() {
        assert!(StoreError::connection("refused").is_connection());
        assert!(!StoreError::operation("boom").is_connection());
    }
}
