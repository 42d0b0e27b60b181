//! Unified error types for the entity store.
//!
//! This module provides the canonical error type for all store operations.
//! The taxonomy distinguishes conflicts (retryable after reconciliation)
//! from storage failures (fatal for the current operation).

use thiserror::Error;

/// All entity store errors.
///
/// Staleness and conflicts are never retried automatically: blind retry
/// could silently skip reconciling divergent local state, so retry policy
/// belongs to the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// Load attempted for a key with no events
    #[error("not found: {0}")]
    NotFound(String),

    /// Creation attempted for a key that already has events
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// Optimistic-concurrency failure: this instance holds locally-applied
    /// uncommitted events, or another writer advanced the stream first.
    /// The caller must reconcile (typically reload) before writing again.
    #[error("stale entity: {0}")]
    Stale(String),

    /// Conditional insert lost the race for a sequence slot
    #[error("conflict: {0}")]
    Conflict(String),

    /// Reducer does not recognize an event's action
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// Payload encode/decode error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Storage collaborator failure (connectivity, transaction, timeout)
    #[error("storage error: {0}")]
    Storage(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error (bug or invariant violation)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for entity store operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a staleness error.
    ///
    /// Stale operations may succeed after the caller reloads the entity.
    pub fn is_stale(&self) -> bool {
        matches!(self, Error::Stale(_))
    }

    /// Check if this is a store-level sequence conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict(_))
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this is a serious/unrecoverable error.
    pub fn is_serious(&self) -> bool {
        matches!(self, Error::Internal(_) | Error::Storage(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::NotFound("foobar".to_string());
        assert_eq!(e.to_string(), "not found: foobar");

        let e = Error::DuplicateKey("foobar".to_string());
        assert_eq!(e.to_string(), "duplicate key: foobar");
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::Stale("x".into()).is_stale());
        assert!(!Error::Stale("x".into()).is_conflict());
        assert!(Error::Conflict("x".into()).is_conflict());
        assert!(Error::NotFound("x".into()).is_not_found());
        assert!(Error::Internal("x".into()).is_serious());
        assert!(!Error::Conflict("x".into()).is_serious());
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let bad: std::result::Result<i64, _> = serde_json::from_str("not json");
        let e: Error = bad.unwrap_err().into();
        assert!(matches!(e, Error::Serialization(_)));
    }
}
