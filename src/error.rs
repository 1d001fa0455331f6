//! Error handling for the helm reporter
//!
//! This module defines the error taxonomy for the pipeline and a Result
//! alias for use throughout the crate. Every per-line failure mode has its
//! own variant so the main loop can log and continue on an explicit branch
//! instead of unwinding.

use crate::frame::FrameError;
use crate::message::{ClassifyError, MessageType};
use thiserror::Error;

/// Main error type for helm reporter operations
#[derive(Error, Debug)]
pub enum ReporterError {
    /// A raw line violated the wire framing rules
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// A payload was not a valid JSON object
    #[error("invalid JSON payload {payload:?}: {source}")]
    Decode {
        /// The offending payload, kept for the log line
        payload: String,
        #[source]
        source: serde_json::Error,
    },

    /// A decoded message had zero or multiple type keys
    #[error(transparent)]
    Classify(#[from] ClassifyError),

    /// No handler is registered for the message type key
    #[error("no handler for message type {0:?}")]
    NoHandler(String),

    /// A handler failed while processing a message
    #[error("{kind} handler failed: {message}")]
    Handler {
        /// The message type whose handler failed
        kind: MessageType,
        /// Description of the failure
        message: String,
    },

    /// A message body did not have the shape its handler requires
    #[error("malformed {kind} body: {detail}")]
    MalformedBody {
        /// The message type whose body was malformed
        kind: MessageType,
        /// What was wrong with it
        detail: String,
    },

    /// Errors from the serial port layer
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// IO errors from the line source
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors from the reporting sink transport
    #[error("report sink error: {0}")]
    Sink(String),

    /// Errors loading or parsing the configuration
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for helm reporter operations
pub type Result<T> = std::result::Result<T, ReporterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReporterError::NoHandler("FOO".to_string());
        assert_eq!(err.to_string(), "no handler for message type \"FOO\"");
    }

    #[test]
    fn test_handler_error_names_type() {
        let err = ReporterError::Handler {
            kind: MessageType::Data,
            message: "sink unreachable".to_string(),
        };
        assert!(err.to_string().contains("DATA"));
        assert!(err.to_string().contains("sink unreachable"));
    }
}
