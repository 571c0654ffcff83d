//! Error types and handling for the CLI

use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from the recsync-core library
    #[error("Core error: {0}")]
    Core(#[from] recsync_core::Error),

    /// A pipeline stage failed for a one-shot transform
    #[error("{0}")]
    Pipeline(#[from] recsync_core::PipelineError),

    /// Error from contract loading
    #[error("Loader error: {0}")]
    Loader(#[from] recsync_schemas::LoaderError),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A record file did not hold a JSON object
    #[error("Invalid record in {}: expected a JSON object", path.display())]
    InvalidRecord { path: PathBuf },

    /// Invalid argument combination
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Core(_) => 2,
            Self::Pipeline(_) => 3,
            Self::Loader(_) => 4,
            Self::FileNotFound { .. } => 5,
            Self::InvalidRecord { .. } => 6,
            Self::InvalidArgs(_) => 7,
            Self::Json(_) => 8,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::InvalidArgs(_))
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}
