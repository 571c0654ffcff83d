//! Error types for the Recsync core library
//!
//! All per-job failures (validation, mapping) are recoverable and are
//! converted into a `SyncResult` at the job boundary; the remaining
//! variants surface synchronously to the caller.
//!
//! Copyright (c) 2025 Recsync Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

use crate::sink::SinkError;

/// Main error type for Recsync operations
#[derive(Error, Debug)]
pub enum Error {
    /// A contract document could not be parsed or compiled.
    ///
    /// Fatal at startup: the system cannot run without its contracts.
    #[error("Invalid contract: {message}")]
    Schema {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// A record violated a structural contract.
    ///
    /// Carries every violation found, not just the first.
    #[error("Contract validation failed:\n{}", format_violations(.messages))]
    Validation { messages: Vec<String> },

    /// A field mapping could not be applied to a record.
    #[error("Mapping failed for field {field:?}: {message}")]
    Mapping { field: String, message: String },

    /// The dispatcher queue was full at submission time.
    ///
    /// Returned synchronously; the dispatcher never retries on the
    /// submitter's behalf.
    #[error("Dispatcher queue is full (capacity {capacity})")]
    QueueFull { capacity: usize },

    /// The dispatcher has shut down and accepts no further submissions.
    #[error("Dispatcher is stopped")]
    DispatcherStopped,

    /// Invalid dispatcher or rate limiter configuration.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Delivery to the downstream sink failed.
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

fn format_violations(messages: &[String]) -> String {
    messages
        .iter()
        .map(|m| format!("  - {m}"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl Error {
    /// Create a schema error from any underlying cause
    pub fn schema<M: Into<String>>(message: M) -> Self {
        Error::Schema {
            message: message.into(),
            source: None,
        }
    }

    /// Create a mapping error for a named field
    pub fn mapping<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Error::Mapping {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_lists_every_message() {
        let err = Error::Validation {
            messages: vec![
                "\"last_name\" is a required property".to_string(),
                "\"status\" is not one of the allowed values".to_string(),
            ],
        };
        let rendered = err.to_string();
        assert!(rendered.contains("last_name"));
        assert!(rendered.contains("status"));
        assert_eq!(rendered.lines().count(), 3);
    }

    #[test]
    fn test_mapping_display_names_the_field() {
        let err = Error::mapping("priority", "unexpected value \"Urgent\"");
        assert!(err.to_string().contains("\"priority\""));
    }

    #[test]
    fn test_queue_full_display() {
        let err = Error::QueueFull { capacity: 8 };
        assert_eq!(err.to_string(), "Dispatcher queue is full (capacity 8)");
    }
}
