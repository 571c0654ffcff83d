//! Builtin contact translation configs and demo jobs
//!
//! The two directional configs are independently constructed value
//! objects handed explicitly into each job; there is no process-wide
//! mapping registry.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;

use recsync_core::{
    Contract, FieldMapping, Operation, Record, SyncJob, TransformConfig, ValueTransform,
};

/// Mapping from the internal contact shape to the external one
pub fn internal_to_external() -> TransformConfig {
    TransformConfig::new(vec![
        FieldMapping::renamed("id", "contactId"),
        FieldMapping::renamed("first_name", "givenName"),
        FieldMapping::renamed("last_name", "familyName"),
        FieldMapping::renamed("email", "emailAddress"),
        FieldMapping::with_transform(
            "status",
            "isActive",
            ValueTransform::StringToBool(HashMap::from([
                ("Active".to_string(), true),
                ("Inactive".to_string(), false),
            ])),
        ),
        FieldMapping::with_transform(
            "priority",
            "priorityCode",
            ValueTransform::StringToInt(HashMap::from([
                ("Low".to_string(), 1),
                ("Medium".to_string(), 2),
                ("High".to_string(), 3),
            ])),
        ),
    ])
}

/// Mapping from the external contact shape back to the internal one
pub fn external_to_internal() -> TransformConfig {
    TransformConfig::new(vec![
        FieldMapping::renamed("contactId", "id"),
        FieldMapping::renamed("givenName", "first_name"),
        FieldMapping::renamed("familyName", "last_name"),
        FieldMapping::renamed("emailAddress", "email"),
        FieldMapping::with_transform(
            "isActive",
            "status",
            ValueTransform::BoolToString {
                when_true: "Active".to_string(),
                when_false: "Inactive".to_string(),
            },
        ),
        FieldMapping::with_transform(
            "priorityCode",
            "priority",
            ValueTransform::IntToString(HashMap::from([
                (1, "Low".to_string()),
                (2, "Medium".to_string()),
                (3, "High".to_string()),
            ])),
        ),
    ])
}

fn record(value: serde_json::Value) -> Record {
    value.as_object().expect("demo record is an object").clone()
}

/// The demo jobs: one conformant record, one missing a required field,
/// one with an out-of-contract enum value
pub fn demo_jobs(source: Arc<Contract>, dest: Arc<Contract>) -> Vec<SyncJob> {
    let mapping = Arc::new(internal_to_external());

    vec![
        SyncJob {
            name: "good".to_string(),
            record: record(json!({
                "id": "abc1",
                "first_name": "Alice",
                "last_name": "Doe",
                "email": "alice@example.com",
                "status": "Active",
                "priority": "High"
            })),
            source_contract: Arc::clone(&source),
            dest_contract: Arc::clone(&dest),
            mapping: Arc::clone(&mapping),
            operation: Operation::Create,
        },
        SyncJob {
            name: "bad_input_missing_field".to_string(),
            record: record(json!({
                "id": "abc2",
                "first_name": "Bob",
                "email": "bob@example.com",
                "status": "Active",
                "priority": "Medium"
            })),
            source_contract: Arc::clone(&source),
            dest_contract: Arc::clone(&dest),
            mapping: Arc::clone(&mapping),
            operation: Operation::Update,
        },
        SyncJob {
            name: "bad_input_enum".to_string(),
            record: record(json!({
                "id": "abc3",
                "first_name": "Dan",
                "last_name": "Smith",
                "email": "dan@example.com",
                "status": "Unknown",
                "priority": "Low"
            })),
            source_contract: source,
            dest_contract: dest,
            mapping,
            operation: Operation::Update,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use recsync_core::run_pipeline;

    fn contracts() -> (Arc<Contract>, Arc<Contract>) {
        let store = recsync_schemas::SchemaStore::new();
        let internal = Contract::from_value(store.load(recsync_schemas::CONTACT_INTERNAL).unwrap())
            .unwrap();
        let external = Contract::from_value(store.load(recsync_schemas::CONTACT_EXTERNAL).unwrap())
            .unwrap();
        (Arc::new(internal), Arc::new(external))
    }

    #[test]
    fn test_demo_configs_round_trip() {
        let (internal, external) = contracts();
        let jobs = demo_jobs(Arc::clone(&internal), Arc::clone(&external));
        let good = &jobs[0];

        let outbound = run_pipeline(
            &good.record,
            &internal,
            &external,
            &internal_to_external(),
        )
        .unwrap();
        let back =
            run_pipeline(&outbound, &external, &internal, &external_to_internal()).unwrap();
        assert_eq!(back, good.record);
    }

    #[test]
    fn test_demo_jobs_cover_the_three_outcomes() {
        let (internal, external) = contracts();
        let jobs = demo_jobs(internal, external);
        let names: Vec<&str> = jobs.iter().map(|j| j.name.as_str()).collect();
        assert_eq!(names, vec!["good", "bad_input_missing_field", "bad_input_enum"]);
    }
}
