// Error types for event submission

use dtclient_core::ModelError;
use thiserror::Error;

/// Result type alias for submission operations
pub type Result<T> = std::result::Result<T, SubmissionError>;

/// Coarse classification of a [`SubmissionError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Decode,
    Transport,
    Configuration,
}

/// Errors that can occur while submitting an event
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Payload rejected locally, nothing was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Payload could not be encoded or the response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Non-200 status or network failure. `status` is `None` when no
    /// response was received.
    #[error("{}", transport_display(.status, .message))]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// Client could not be built from its configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

fn transport_display(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("Transport error (HTTP {}): {}", status, message),
        None => format!("Transport error: {}", message),
    }
}

impl SubmissionError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        SubmissionError::Validation(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        SubmissionError::Decode(msg.into())
    }

    /// Create a transport error for a response with the given status
    pub fn status(status: u16, msg: impl Into<String>) -> Self {
        SubmissionError::Transport {
            status: Some(status),
            message: msg.into(),
        }
    }

    /// Create a transport error for a request that got no response
    pub fn connection(msg: impl Into<String>) -> Self {
        SubmissionError::Transport {
            status: None,
            message: msg.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        SubmissionError::Configuration(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SubmissionError::Validation(_) => ErrorKind::Validation,
            SubmissionError::Decode(_) => ErrorKind::Decode,
            SubmissionError::Transport { .. } => ErrorKind::Transport,
            SubmissionError::Configuration(_) => ErrorKind::Configuration,
        }
    }

    /// HTTP status of a transport failure, if a response was received
    pub fn http_status(&self) -> Option<u16> {
        match self {
            SubmissionError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<ModelError> for SubmissionError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Validation(msg) => SubmissionError::Validation(msg),
            ModelError::Decode(msg) | ModelError::Encode(msg) => SubmissionError::Decode(msg),
        }
    }
}
