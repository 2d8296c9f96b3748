//! Error types for chatwindow
//!
//! Every core operation returns one of these to its caller; nothing in the
//! library logs or recovers on its own.

use thiserror::Error;

/// Malformed identity or configuration fields, raised at construction time
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid owner id: owner must not be empty")]
    EmptyOwner,

    #[error("Invalid chat status: {0:?}")]
    InvalidStatus(String),

    #[error("Invalid temperature {0}: must be within 0.0..=2.0")]
    TemperatureOutOfRange(f32),

    #[error("Invalid top_p {0}: must be within 0.0..=1.0")]
    TopPOutOfRange(f32),

    #[error("Invalid presence penalty {0}: must be within -2.0..=2.0")]
    PresencePenaltyOutOfRange(f32),

    #[error("Invalid frequency penalty {0}: must be within -2.0..=2.0")]
    FrequencyPenaltyOutOfRange(f32),

    #[error("Invalid message: content must not be empty")]
    EmptyContent,
}

/// Main error type for conversation context operations
#[derive(Error, Debug)]
pub enum ContextError {
    /// Construction or validation failure
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Conversation is closed to new messages
    #[error("Chat already ended: no more messages allowed")]
    ChatEnded,

    /// A single message is larger than the model's whole budget
    #[error("Message of {tokens} tokens exceeds model budget of {max} tokens")]
    MessageExceedsBudget { tokens: usize, max: usize },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Malformed transcript line
    #[error("Transcript line {line}: {reason}")]
    Transcript { line: usize, reason: String },

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for context operations
pub type Result<T> = std::result::Result<T, ContextError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_error_display() {
        let err = ContextError::MessageExceedsBudget { tokens: 60, max: 50 };
        assert!(err.to_string().contains("60"));
        assert!(err.to_string().contains("50"));
    }

    #[test]
    fn test_validation_error_converts() {
        let err: ContextError = ValidationError::TemperatureOutOfRange(2.5).into();
        assert!(matches!(
            err,
            ContextError::Validation(ValidationError::TemperatureOutOfRange(_))
        ));
        assert!(err.to_string().contains("2.5"));
    }
}
