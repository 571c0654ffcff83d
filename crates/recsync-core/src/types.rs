//! Core types and data structures for the Recsync synchronization engine
//!
//! This module defines the value objects moved through the pipeline:
//! records, field mappings, transform configurations, jobs, and results.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::sync::Contract;

/// A dynamically-typed, field-named data unit being synchronized.
///
/// `serde_json::Value` is the closed value variant for field contents
/// (string | number | boolean | nested object/array | null); transform
/// modes match on variants rather than downcasting. Records are never
/// mutated in place; each pipeline stage produces a new one.
pub type Record = serde_json::Map<String, Value>;

/// Operation tag carried by a job for the downstream sink.
///
/// Informational only; the pipeline itself does not branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "create"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

/// Value transform applied by a single field mapping.
///
/// Exactly one lookup table travels with each mode, so an ambiguous
/// mapping (several tables set at once) is unrepresentable. Tables must
/// be total over the contract's enumerated values; a value outside the
/// table is a mapping error, never a silent default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueTransform {
    /// Copy the value unchanged.
    Identity,
    /// String enum to boolean, e.g. "Active"/"Inactive" -> true/false.
    StringToBool(HashMap<String, bool>),
    /// Boolean to string enum (reverse of `StringToBool`). The table is
    /// total by construction: one value per boolean arm.
    BoolToString { when_true: String, when_false: String },
    /// Generic string-to-string lookup.
    StringToString(HashMap<String, String>),
    /// String enum to integer code, e.g. "High" -> 3.
    StringToInt(HashMap<String, i64>),
    /// Integer code to string enum (reverse of `StringToInt`).
    IntToString(HashMap<i64, String>),
}

/// One declarative remapping rule: `source_field` -> `target_field`
/// plus the value transform to apply on the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Field name looked up in the input record
    pub source_field: String,

    /// Field name written in the output record
    pub target_field: String,

    /// Value transform; `Identity` when the value is copied as-is
    #[serde(default = "default_transform")]
    pub transform: ValueTransform,
}

fn default_transform() -> ValueTransform {
    ValueTransform::Identity
}

impl FieldMapping {
    /// A plain rename with no value transform
    pub fn renamed<S: Into<String>, T: Into<String>>(source: S, target: T) -> Self {
        Self::with_transform(source, target, ValueTransform::Identity)
    }

    /// A mapping with an explicit value transform
    pub fn with_transform<S: Into<String>, T: Into<String>>(
        source: S,
        target: T,
        transform: ValueTransform,
    ) -> Self {
        Self {
            source_field: source.into(),
            target_field: target.into(),
            transform,
        }
    }
}

/// An ordered, directional set of field mappings defining one contract
/// translation (e.g. internal -> external).
///
/// Immutable and reusable across jobs; order only affects which missing
/// source field is reported first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformConfig {
    pub field_mappings: Vec<FieldMapping>,
}

impl TransformConfig {
    pub fn new(field_mappings: Vec<FieldMapping>) -> Self {
        Self { field_mappings }
    }
}

/// A unit of synchronization work.
///
/// Contracts and the transform configuration are shared read-only across
/// jobs; the record is owned by whichever worker task processes the job.
#[derive(Debug, Clone)]
pub struct SyncJob {
    /// Identifying name, echoed in the result
    pub name: String,

    /// The record to synchronize
    pub record: Record,

    /// Contract the input record must satisfy
    pub source_contract: Arc<Contract>,

    /// Contract the transformed record must satisfy
    pub dest_contract: Arc<Contract>,

    /// Directional field mappings to apply
    pub mapping: Arc<TransformConfig>,

    /// Operation tag handed to the sink
    pub operation: Operation,
}

/// Terminal status of a sync job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    Success,
    TransformFail,
}

impl std::fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncStatus::Success => write!(f, "success"),
            SyncStatus::TransformFail => write!(f, "transform_fail"),
        }
    }
}

/// Outcome of one sync job; produced exactly once per job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncResult {
    /// Name of the job this result belongs to
    pub job_name: String,

    /// Terminal status
    pub status: SyncStatus,

    /// Human-readable detail (stage-tagged on failure)
    pub detail: String,

    /// Transformed record; present iff status is `Success`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transformed: Option<Record>,

    /// RFC 3339 completion timestamp
    pub completed_at: String,
}

impl SyncResult {
    /// Build a success result for a job
    pub fn success<N: Into<String>, D: Into<String>>(
        job_name: N,
        detail: D,
        transformed: Record,
    ) -> Self {
        Self {
            job_name: job_name.into(),
            status: SyncStatus::Success,
            detail: detail.into(),
            transformed: Some(transformed),
            completed_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Build a transform-failure result for a job
    pub fn transform_fail<N: Into<String>, D: Into<String>>(job_name: N, detail: D) -> Self {
        Self {
            job_name: job_name.into(),
            status: SyncStatus::TransformFail,
            detail: detail.into(),
            transformed: None,
            completed_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "create");
        assert_eq!(Operation::Update.to_string(), "update");
        assert_eq!(Operation::Delete.to_string(), "delete");
    }

    #[test]
    fn test_field_mapping_default_transform_is_identity() {
        let mapping: FieldMapping =
            serde_json::from_value(serde_json::json!({
                "source_field": "id",
                "target_field": "contactId",
            }))
            .unwrap();
        assert_eq!(mapping.transform, ValueTransform::Identity);
    }

    #[test]
    fn test_sync_result_success_carries_record() {
        let mut record = Record::new();
        record.insert("contactId".to_string(), Value::from("abc1"));
        let result = SyncResult::success("good", "OK", record);
        assert_eq!(result.status, SyncStatus::Success);
        assert!(result.transformed.is_some());
        assert!(!result.completed_at.is_empty());
    }

    #[test]
    fn test_sync_result_failure_has_no_record() {
        let result = SyncResult::transform_fail("bad", "mapping failed");
        assert_eq!(result.status, SyncStatus::TransformFail);
        assert!(result.transformed.is_none());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&SyncStatus::TransformFail).unwrap(),
            "\"transform_fail\""
        );
    }
}
