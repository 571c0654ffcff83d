//! Contract store: resolves logical contract names to schema documents
//!
//! Builtin contracts are embedded at compile time so the demo runs with
//! no on-disk configuration; a schema directory can be layered on for
//! additional or overriding contracts. Contracts are loaded once at
//! startup and shared read-only afterwards.
//!
//! Copyright (c) 2025 Recsync Team
//! Licensed under the Apache-2.0 license

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{LoaderError, LoaderResult};

// Embed the builtin contracts at compile time for reliability
const CONTACT_INTERNAL_SCHEMA: &str = include_str!("../schemas/contact-internal.schema.json");
const CONTACT_EXTERNAL_SCHEMA: &str = include_str!("../schemas/contact-external.schema.json");

/// Logical name of the builtin internal contact contract
pub const CONTACT_INTERNAL: &str = "contact.internal";
/// Logical name of the builtin external contact contract
pub const CONTACT_EXTERNAL: &str = "contact.external";

/// Resolves logical contract names to parsed schema documents.
///
/// Resolution order: registered builtins first, then
/// `<dir>/<name>.json`, `<name>.yaml`, `<name>.yml` under the optional
/// schema directory.
#[derive(Debug, Clone)]
pub struct SchemaStore {
    builtins: HashMap<String, &'static str>,
    schema_dir: Option<PathBuf>,
}

impl SchemaStore {
    /// Create a store holding only the builtin contracts
    pub fn new() -> Self {
        let mut builtins = HashMap::new();
        builtins.insert(CONTACT_INTERNAL.to_string(), CONTACT_INTERNAL_SCHEMA);
        builtins.insert(CONTACT_EXTERNAL.to_string(), CONTACT_EXTERNAL_SCHEMA);
        Self {
            builtins,
            schema_dir: None,
        }
    }

    /// Add a directory searched for contracts not found among the
    /// builtins
    pub fn with_schema_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.schema_dir = Some(dir.into());
        self
    }

    /// Names of all registered builtin contracts
    pub fn builtin_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.builtins.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Load a contract document by logical name
    pub fn load(&self, name: &str) -> LoaderResult<Value> {
        if let Some(content) = self.builtins.get(name) {
            let path = PathBuf::from(format!("<builtin:{name}>"));
            return parse_json(&path, content);
        }

        if let Some(dir) = &self.schema_dir {
            for ext in ["json", "yaml", "yml"] {
                let candidate = dir.join(format!("{name}.{ext}"));
                if candidate.exists() {
                    return load_file(&candidate);
                }
            }
        }

        Err(LoaderError::NotFound {
            name: name.to_string(),
        })
    }

    /// Load a contract document as raw JSON bytes
    pub fn load_bytes(&self, name: &str) -> LoaderResult<Vec<u8>> {
        let value = self.load(name)?;
        // A just-parsed document always re-serializes.
        Ok(serde_json::to_vec(&value).expect("schema value serializes"))
    }
}

impl Default for SchemaStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and parse a single schema file, dispatching on its extension
pub fn load_file(path: &Path) -> LoaderResult<Value> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match extension.as_deref() {
        Some("json") => {
            let content = read_file(path)?;
            parse_json(path, &content)
        }
        Some("yaml") | Some("yml") => {
            let content = read_file(path)?;
            serde_yaml::from_str(&content)
                .map_err(|e| LoaderError::yaml_parse(path.to_path_buf(), e))
        }
        _ => Err(LoaderError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

fn read_file(path: &Path) -> LoaderResult<String> {
    std::fs::read_to_string(path).map_err(|e| LoaderError::io(path.to_path_buf(), e))
}

fn parse_json(path: &Path, content: &str) -> LoaderResult<Value> {
    serde_json::from_str(content).map_err(|e| LoaderError::json_parse(path.to_path_buf(), e))
}
