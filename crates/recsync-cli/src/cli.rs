//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Recsync CLI - contract-validated record synchronization
///
/// Validate records against structural contracts, transform them between
/// source and destination shapes, and run synchronization jobs through
/// the rate-limited dispatcher.
#[derive(Parser, Debug)]
#[command(
    name = "recsync",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Directory searched for contracts beyond the builtins
    #[arg(long, global = true, env = "RECSYNC_SCHEMA_DIR")]
    pub schema_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a record file against a named contract
    Validate(ValidateArgs),

    /// Run one record through the full transform-and-validate pipeline
    Transform(TransformArgs),

    /// Run the demo synchronization jobs through the dispatcher
    Run(RunArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the record file (JSON object)
    #[arg(value_name = "RECORD")]
    pub record: PathBuf,

    /// Logical name of the contract to validate against
    #[arg(short, long, default_value = "contact.internal")]
    pub contract: String,
}

/// Direction of the builtin contact translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    /// Internal contact shape to external contact shape
    InternalToExternal,
    /// External contact shape back to internal
    ExternalToInternal,
}

/// Arguments for the transform command
#[derive(Parser, Debug)]
pub struct TransformArgs {
    /// Path to the record file (JSON object)
    #[arg(value_name = "RECORD")]
    pub record: PathBuf,

    /// Direction of the builtin contact translation
    #[arg(short, long, value_enum, default_value = "internal-to-external")]
    pub direction: Direction,

    /// Path to a mapping configuration file (JSON), overriding the
    /// builtin direction mappings
    #[arg(long, value_name = "FILE")]
    pub mapping: Option<PathBuf>,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Steady-state admission rate, in jobs per second
    #[arg(long, default_value = "2.0")]
    pub rate: f64,

    /// How many jobs may be admitted back-to-back above steady state
    #[arg(long, default_value = "2")]
    pub burst: u32,

    /// How many unadmitted jobs may wait before submission is rejected
    #[arg(long, default_value = "8")]
    pub queue_capacity: usize,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Effective verbosity level (0 when quiet)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Whether colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color
    }
}
