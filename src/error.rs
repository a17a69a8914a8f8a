use thiserror::Error;

use crate::common::MessageId;

/// Errors raised by a conversation session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Text was empty after trimming whitespace
    #[error("message text is empty")]
    EmptyMessage,

    #[error("message {0} not found")]
    MessageNotFound(MessageId),

    /// The session loop is not keeping up with commands
    #[error("session command queue is full")]
    QueueFull,

    /// The session loop has stopped
    #[error("session closed")]
    SessionClosed,
}

/// Errors raised while writing the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SessionResult<T> = Result<T, SessionError>;
