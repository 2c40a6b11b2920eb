//! Error types for event handling.

use thiserror::Error;

/// Errors that can occur when handling membership events.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    /// The event kind string is unknown.
    #[error("unknown event kind: {0}")]
    UnknownEventKind(String),

    /// The participant ID string is malformed.
    #[error("invalid participant ID: {0}")]
    InvalidParticipantId(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for EventError {
    fn from(err: serde_json::Error) -> Self {
        EventError::Serialization(err.to_string())
    }
}
