// Error types for the event model

use thiserror::Error;

/// Result type alias for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised while decoding, encoding or validating event payloads
#[derive(Debug, Error)]
pub enum ModelError {
    /// Input was not well-formed JSON or did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Serialization failed
    #[error("Encode error: {0}")]
    Encode(String),

    /// A semantically required field is missing
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ModelError {
    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        ModelError::Decode(msg.into())
    }

    /// Create an encode error
    pub fn encode(msg: impl Into<String>) -> Self {
        ModelError::Encode(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        ModelError::Validation(msg.into())
    }
}
