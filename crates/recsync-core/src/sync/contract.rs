//! Structural contract validation for records
//!
//! A `Contract` wraps a JSON Schema document compiled once at load time
//! and shared read-only across jobs. Validation collects every violation
//! into a single error rather than stopping at the first one, so an
//! operator sees the whole shape of a bad record at once.
//!
//! Copyright (c) 2025 Recsync Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;

use crate::error::{Error, Result};
use crate::types::Record;

/// An immutable structural contract for records.
///
/// Compiling the schema happens exactly once, in the constructor; a
/// malformed schema is rejected there and never reaches job processing.
pub struct Contract {
    raw: Value,
    validator: jsonschema::Validator,
}

impl std::fmt::Debug for Contract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Contract").field("schema", &self.raw).finish()
    }
}

impl Contract {
    /// Compile a contract from a parsed schema document
    pub fn from_value(schema: Value) -> Result<Self> {
        let validator = jsonschema::validator_for(&schema).map_err(|e| Error::Schema {
            message: format!("failed to compile schema: {e}"),
            source: None,
        })?;
        Ok(Self {
            raw: schema,
            validator,
        })
    }

    /// Compile a contract from raw schema bytes (JSON)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let schema: Value = serde_json::from_slice(bytes).map_err(|e| Error::Schema {
            message: format!("failed to parse schema: {e}"),
            source: Some(e.into()),
        })?;
        Self::from_value(schema)
    }

    /// The raw schema document this contract was compiled from
    pub fn schema(&self) -> &Value {
        &self.raw
    }

    /// Validate a record against this contract.
    ///
    /// Collects all violations into one `Error::Validation`; validating
    /// the same record twice yields the same verdict and error set.
    pub fn validate(&self, record: &Record) -> Result<()> {
        let instance = Value::Object(record.clone());
        let messages: Vec<String> = self
            .validator
            .iter_errors(&instance)
            .map(|e| e.to_string())
            .collect();

        if messages.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation { messages })
        }
    }
}
