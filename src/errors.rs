//! Error types for keygraph
//!
//! This module defines the error types used throughout the library.
//! Configuration problems and cancellations are ordinary, recoverable
//! errors; graph misuse signals a broken internal invariant.

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, KeyGraphError>;

/// Main error type for keygraph
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyGraphError {
    /// Configuration validation failed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// An edge referenced an absent node, or a self-loop was attempted.
    /// The extractor controls call order, so this is an internal bug
    /// when it surfaces from `extract`.
    #[error("Invalid graph operation: {message}")]
    InvalidGraphOperation { message: String },

    /// Extraction was aborted through a cancellation token
    #[error("Extraction cancelled at stage '{stage}'")]
    Cancelled { stage: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Internal error (should not occur in normal usage)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl KeyGraphError {
    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid graph operation error
    pub fn invalid_graph_operation(message: impl Into<String>) -> Self {
        Self::InvalidGraphOperation {
            message: message.into(),
        }
    }

    /// Create a cancellation error for the given stage
    pub fn cancelled(stage: impl Into<String>) -> Self {
        Self::Cancelled {
            stage: stage.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this error was caused by cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

impl From<serde_json::Error> for KeyGraphError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
