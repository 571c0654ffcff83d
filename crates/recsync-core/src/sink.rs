//! Downstream sink boundary
//!
//! The sink is the external system that ultimately receives a validated,
//! transformed record. The core only depends on the `Sink` trait;
//! `MockSink` stands in for a real transport in demos and tests.
//!
//! Copyright (c) 2025 Recsync Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

use crate::types::{Operation, Record};

/// Error reported by a sink on failed delivery
#[derive(Debug, Error)]
#[error("sink rejected record: {message}")]
pub struct SinkError {
    pub message: String,
}

impl SinkError {
    pub fn new<M: Into<String>>(message: M) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Destination for transformed records.
///
/// Delivery is synchronous from the worker's point of view; a failure is
/// reported but never rolls back the completed transformation.
pub trait Sink: Send + Sync {
    fn send(&self, record: &Record, operation: Operation) -> Result<(), SinkError>;
}

/// A stand-in external system.
///
/// Logs each delivery and rejects any record carrying `"failme": true`,
/// which lets demos and tests exercise the failure path on demand.
#[derive(Debug, Default)]
pub struct MockSink;

impl Sink for MockSink {
    fn send(&self, record: &Record, operation: Operation) -> Result<(), SinkError> {
        tracing::debug!(%operation, fields = record.len(), "mock sink delivery");
        if record.get("failme").and_then(|v| v.as_bool()) == Some(true) {
            return Err(SinkError::new("external system rejected record"));
        }
        Ok(())
    }
}
