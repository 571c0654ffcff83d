//! Recsync Schemas - contract documents and loading
//!
//! This crate is the schema-source collaborator for the Recsync core:
//! it resolves logical contract names to structural schema documents,
//! from embedded builtins or from a schema directory (JSON or YAML).

pub mod error;
pub mod loader;

pub use error::{LoaderError, LoaderResult};
pub use loader::{SchemaStore, CONTACT_EXTERNAL, CONTACT_INTERNAL};
