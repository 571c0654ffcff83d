//! Integration tests for contract resolution from a schema directory

use std::fs;

use serde_json::Value;
use tempfile::TempDir;

use recsync_schemas::{LoaderError, SchemaStore};

fn store_with_dir(dir: &TempDir) -> SchemaStore {
    SchemaStore::new().with_schema_dir(dir.path())
}

#[test]
fn test_json_contract_from_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("order.v1.json"),
        r#"{"type": "object", "required": ["orderId"]}"#,
    )
    .unwrap();

    let schema = store_with_dir(&dir).load("order.v1").unwrap();
    assert_eq!(schema["required"][0], "orderId");
}

#[test]
fn test_yaml_contract_from_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("order.v1.yaml"),
        "type: object\nrequired:\n  - orderId\n",
    )
    .unwrap();

    let schema = store_with_dir(&dir).load("order.v1").unwrap();
    assert_eq!(schema["type"], "object");
    assert_eq!(schema["required"][0], "orderId");
}

#[test]
fn test_json_preferred_over_yaml_for_same_name() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("order.v1.json"), r#"{"source": "json"}"#).unwrap();
    fs::write(dir.path().join("order.v1.yaml"), "source: yaml\n").unwrap();

    let schema = store_with_dir(&dir).load("order.v1").unwrap();
    assert_eq!(schema["source"], "json");
}

#[test]
fn test_builtin_shadows_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("contact.internal.json"),
        r#"{"shadowed": true}"#,
    )
    .unwrap();

    let schema = store_with_dir(&dir).load("contact.internal").unwrap();
    // Builtins win: the embedded contact contract, not the file.
    assert!(schema.get("shadowed").is_none());
    assert_eq!(schema["type"], "object");
}

#[test]
fn test_malformed_json_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.json"), "{ nope").unwrap();

    let err = store_with_dir(&dir).load("broken").unwrap_err();
    assert!(matches!(err, LoaderError::JsonParse { .. }));
    assert!(err.path().is_some());
}

#[test]
fn test_missing_everywhere_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = store_with_dir(&dir).load("ghost").unwrap_err();
    assert!(matches!(err, LoaderError::NotFound { .. }));
}

#[test]
fn test_load_file_rejects_unknown_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("schema.toml");
    fs::write(&path, "x = 1").unwrap();

    let err = recsync_schemas::loader::load_file(&path).unwrap_err();
    assert!(matches!(err, LoaderError::UnsupportedFormat { .. }));
}

#[test]
fn test_loaded_contract_is_plain_json_value() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("nested.yaml"),
        "type: object\nproperties:\n  tags:\n    type: array\n",
    )
    .unwrap();

    let schema: Value = store_with_dir(&dir).load("nested").unwrap();
    assert_eq!(schema["properties"]["tags"]["type"], "array");
}
