//! Field mapping engine
//!
//! Applies a `TransformConfig` to a record: every mapping is processed in
//! order, a missing source field aborts the whole transform immediately,
//! and on success the output contains exactly the configured target
//! fields. Value transforms are dispatched on the `ValueTransform` tag,
//! so each mode checks exactly the type it expects.
//!
//! Copyright (c) 2025 Recsync Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;

use crate::error::{Error, Result};
use crate::types::{Record, TransformConfig, ValueTransform};

/// Apply a transform configuration to a record, producing a fresh output
/// record.
///
/// Fail-fast: the first missing field or untranslatable value aborts the
/// transform and no partial output is returned.
pub fn apply(record: &Record, config: &TransformConfig) -> Result<Record> {
    let mut output = Record::new();
    for mapping in &config.field_mappings {
        let raw = record.get(&mapping.source_field).ok_or_else(|| {
            Error::mapping(&mapping.source_field, "field missing in input")
        })?;
        let value = transform_value(&mapping.source_field, &mapping.transform, raw)?;
        output.insert(mapping.target_field.clone(), value);
    }
    Ok(output)
}

fn transform_value(field: &str, transform: &ValueTransform, raw: &Value) -> Result<Value> {
    match transform {
        ValueTransform::Identity => Ok(raw.clone()),

        ValueTransform::StringToBool(table) => {
            let s = expect_string(field, raw)?;
            table
                .get(s)
                .map(|b| Value::Bool(*b))
                .ok_or_else(|| Error::mapping(field, format!("unexpected value {s:?}")))
        }

        ValueTransform::BoolToString {
            when_true,
            when_false,
        } => {
            let b = expect_boolish(field, raw)?;
            let mapped = if b { when_true } else { when_false };
            Ok(Value::String(mapped.clone()))
        }

        ValueTransform::StringToString(table) => {
            let s = expect_string(field, raw)?;
            table
                .get(s)
                .map(|v| Value::String(v.clone()))
                .ok_or_else(|| Error::mapping(field, format!("unexpected value {s:?}")))
        }

        ValueTransform::StringToInt(table) => {
            let s = expect_string(field, raw)?;
            table
                .get(s)
                .map(|code| Value::from(*code))
                .ok_or_else(|| Error::mapping(field, format!("unexpected value {s:?}")))
        }

        ValueTransform::IntToString(table) => {
            let code = expect_integer(field, raw)?;
            table
                .get(&code)
                .map(|v| Value::String(v.clone()))
                .ok_or_else(|| Error::mapping(field, format!("unexpected code {code}")))
        }
    }
}

fn expect_string<'a>(field: &str, raw: &'a Value) -> Result<&'a str> {
    raw.as_str()
        .ok_or_else(|| Error::mapping(field, format!("expected string, got {}", type_name(raw))))
}

/// Accept a native boolean or the literal strings "true"/"false".
///
/// The string forms are tolerated non-canonical input from upstreams that
/// serialize booleans inconsistently; they are not a general contract.
fn expect_boolish(field: &str, raw: &Value) -> Result<bool> {
    match raw {
        Value::Bool(b) => Ok(*b),
        Value::String(s) if s == "true" => Ok(true),
        Value::String(s) if s == "false" => Ok(false),
        Value::String(s) => Err(Error::mapping(
            field,
            format!("expected boolean or \"true\"/\"false\", got {s:?}"),
        )),
        other => Err(Error::mapping(
            field,
            format!("expected boolean, got {}", type_name(other)),
        )),
    }
}

/// Accept `i64` and integral `f64` representations; JSON numbers often
/// arrive decoded as floating point.
fn expect_integer(field: &str, raw: &Value) -> Result<i64> {
    match raw {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if let Some(f) = n.as_f64().filter(|f| f.fract() == 0.0) {
                Ok(f as i64)
            } else {
                Err(Error::mapping(field, format!("expected integer, got {n}")))
            }
        }
        other => Err(Error::mapping(
            field,
            format!("expected integer, got {}", type_name(other)),
        )),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldMapping;
    use serde_json::json;
    use std::collections::HashMap;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().unwrap().clone()
    }

    fn status_to_bool() -> ValueTransform {
        ValueTransform::StringToBool(HashMap::from([
            ("Active".to_string(), true),
            ("Inactive".to_string(), false),
        ]))
    }

    fn priority_to_code() -> ValueTransform {
        ValueTransform::StringToInt(HashMap::from([
            ("Low".to_string(), 1),
            ("Medium".to_string(), 2),
            ("High".to_string(), 3),
        ]))
    }

    fn code_to_priority() -> ValueTransform {
        ValueTransform::IntToString(HashMap::from([
            (1, "Low".to_string()),
            (2, "Medium".to_string()),
            (3, "High".to_string()),
        ]))
    }

    #[test]
    fn test_identity_copies_value_unchanged() {
        let config = TransformConfig::new(vec![FieldMapping::renamed("id", "contactId")]);
        let output = apply(&record(json!({"id": "abc1"})), &config).unwrap();
        assert_eq!(output, record(json!({"contactId": "abc1"})));
    }

    #[test]
    fn test_missing_field_fails_fast_with_empty_output() {
        let config = TransformConfig::new(vec![
            FieldMapping::renamed("first_name", "givenName"),
            FieldMapping::renamed("last_name", "familyName"),
        ]);
        let err = apply(&record(json!({"first_name": "Bob"})), &config).unwrap_err();
        match err {
            Error::Mapping { field, .. } => assert_eq!(field, "last_name"),
            other => panic!("expected Mapping error, got {other:?}"),
        }
    }

    #[test]
    fn test_string_to_bool() {
        let config = TransformConfig::new(vec![FieldMapping::with_transform(
            "status",
            "isActive",
            status_to_bool(),
        )]);
        let output = apply(&record(json!({"status": "Active"})), &config).unwrap();
        assert_eq!(output["isActive"], json!(true));
    }

    #[test]
    fn test_string_to_bool_rejects_unknown_key() {
        let config = TransformConfig::new(vec![FieldMapping::with_transform(
            "status",
            "isActive",
            status_to_bool(),
        )]);
        let err = apply(&record(json!({"status": "Dormant"})), &config).unwrap_err();
        assert!(err.to_string().contains("Dormant"));
    }

    #[test]
    fn test_bool_to_string_accepts_native_bool() {
        let config = TransformConfig::new(vec![FieldMapping::with_transform(
            "isActive",
            "status",
            ValueTransform::BoolToString {
                when_true: "Active".to_string(),
                when_false: "Inactive".to_string(),
            },
        )]);
        let output = apply(&record(json!({"isActive": false})), &config).unwrap();
        assert_eq!(output["status"], json!("Inactive"));
    }

    #[test]
    fn test_bool_to_string_tolerates_string_booleans() {
        let config = TransformConfig::new(vec![FieldMapping::with_transform(
            "isActive",
            "status",
            ValueTransform::BoolToString {
                when_true: "Active".to_string(),
                when_false: "Inactive".to_string(),
            },
        )]);
        let output = apply(&record(json!({"isActive": "true"})), &config).unwrap();
        assert_eq!(output["status"], json!("Active"));

        let err = apply(&record(json!({"isActive": "yes"})), &config).unwrap_err();
        assert!(matches!(err, Error::Mapping { .. }));
    }

    #[test]
    fn test_string_to_string_lookup() {
        let config = TransformConfig::new(vec![FieldMapping::with_transform(
            "tier",
            "plan",
            ValueTransform::StringToString(HashMap::from([
                ("gold".to_string(), "premium".to_string()),
            ])),
        )]);
        let output = apply(&record(json!({"tier": "gold"})), &config).unwrap();
        assert_eq!(output["plan"], json!("premium"));

        let err = apply(&record(json!({"tier": "silver"})), &config).unwrap_err();
        assert!(matches!(err, Error::Mapping { .. }));
    }

    #[test]
    fn test_string_to_int() {
        let config = TransformConfig::new(vec![FieldMapping::with_transform(
            "priority",
            "priorityCode",
            priority_to_code(),
        )]);
        let output = apply(&record(json!({"priority": "High"})), &config).unwrap();
        assert_eq!(output["priorityCode"], json!(3));
    }

    #[test]
    fn test_int_to_string_accepts_integral_float() {
        let config = TransformConfig::new(vec![FieldMapping::with_transform(
            "priorityCode",
            "priority",
            code_to_priority(),
        )]);
        let output = apply(&record(json!({"priorityCode": 3.0})), &config).unwrap();
        assert_eq!(output["priority"], json!("High"));
    }

    #[test]
    fn test_int_to_string_rejects_fractional_and_unknown() {
        let config = TransformConfig::new(vec![FieldMapping::with_transform(
            "priorityCode",
            "priority",
            code_to_priority(),
        )]);
        assert!(apply(&record(json!({"priorityCode": 2.5})), &config).is_err());
        assert!(apply(&record(json!({"priorityCode": 9})), &config).is_err());
    }

    #[test]
    fn test_output_contains_exactly_the_target_fields() {
        let config = TransformConfig::new(vec![
            FieldMapping::renamed("id", "contactId"),
            FieldMapping::renamed("email", "emailAddress"),
        ]);
        let input = record(json!({"id": "abc1", "email": "a@b.c", "extra": 42}));
        let output = apply(&input, &config).unwrap();
        assert_eq!(output.len(), 2);
        assert!(!output.contains_key("extra"));
    }

    #[test]
    fn test_input_record_is_not_mutated() {
        let config = TransformConfig::new(vec![FieldMapping::renamed("id", "contactId")]);
        let input = record(json!({"id": "abc1"}));
        let before = input.clone();
        let _ = apply(&input, &config).unwrap();
        assert_eq!(input, before);
    }
}
