//! Error types for contract loading operations
//!
//! Copyright (c) 2025 Recsync Team
//! Licensed under the Apache-2.0 license

use std::path::PathBuf;
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Error types for contract loading operations
#[derive(Error, Debug)]
pub enum LoaderError {
    /// No builtin or on-disk contract answers to the requested name
    #[error("No contract named '{name}' found")]
    NotFound { name: String },

    /// File I/O errors
    #[error("Failed to read file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON parsing errors
    #[error("Failed to parse JSON file '{path}': {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// YAML parsing errors
    #[error("Failed to parse YAML file '{path}': {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// Unsupported file format
    #[error("Unsupported file format for '{path}'. Expected .json, .yaml, or .yml")]
    UnsupportedFormat { path: PathBuf },
}

impl LoaderError {
    /// Create an I/O error with path context
    pub fn io(path: PathBuf, source: std::io::Error) -> Self {
        Self::Io { path, source }
    }

    /// Create a JSON parsing error with path context
    pub fn json_parse(path: PathBuf, source: serde_json::Error) -> Self {
        Self::JsonParse { path, source }
    }

    /// Create a YAML parsing error with path context
    pub fn yaml_parse(path: PathBuf, source: serde_yaml::Error) -> Self {
        Self::YamlParse { path, source }
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            Self::JsonParse { path, .. } => Some(path),
            Self::YamlParse { path, .. } => Some(path),
            Self::UnsupportedFormat { path } => Some(path),
            Self::NotFound { .. } => None,
        }
    }
}
