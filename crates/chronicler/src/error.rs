//! Error types for chronicler.
//!
//! This module defines all error types used throughout the chronicler crate.
//! Telemetry failures are recovered internally wherever possible; these
//! types surface only at construction and configuration seams.

use thiserror::Error;

/// The main error type for chronicler operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Transport Errors ===
    /// A batch could not be handed to the delivery primitive.
    ///
    /// This covers enqueue rejection only; whether the remote collector
    /// ever receives an enqueued batch is unobservable by design.
    #[error("failed to enqueue batch for delivery: {message}")]
    TransportEnqueue {
        /// Description of what went wrong.
        message: String,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for chronicler operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new transport enqueue error.
    #[must_use]
    pub fn transport_enqueue(message: impl Into<String>) -> Self {
        Self::TransportEnqueue {
            message: message.into(),
        }
    }

    /// Check if this error is an enqueue failure the scheduler should
    /// respond to by re-queueing the batch.
    #[must_use]
    pub fn is_enqueue_failure(&self) -> bool {
        matches!(self, Self::TransportEnqueue { .. } | Self::Json(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::transport_enqueue("no runtime");
        assert_eq!(
            err.to_string(),
            "failed to enqueue batch for delivery: no runtime"
        );
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "batch_threshold must be greater than 0".to_string(),
        };
        assert!(err.to_string().contains("batch_threshold"));
    }

    #[test]
    fn test_is_enqueue_failure() {
        assert!(Error::transport_enqueue("rejected").is_enqueue_failure());

        let err = Error::ConfigValidation {
            message: "bad".to_string(),
        };
        assert!(!err.is_enqueue_failure());
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
            assert!(err.is_enqueue_failure());
        }
    }
}
