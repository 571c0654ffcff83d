//! Recsync Core - record-to-record synchronization engine
//!
//! This crate provides the core functionality for moving records between
//! two data representations: validating a record against a source
//! contract, remapping its fields according to a declarative
//! configuration, validating the result against a destination contract,
//! and dispatching such jobs concurrently under a token-bucket rate
//! limit.
//!
//! # Main Components
//!
//! - **Contract Validator**: JSON Schema contracts compiled once and
//!   shared across jobs, collecting every violation per record
//! - **Field Mapping Engine**: ordered, fail-fast field remapping with
//!   typed value transforms
//! - **Sync Pipeline**: validate -> remap -> validate as one atomic
//!   operation with stage-tagged failures
//! - **Job Dispatcher**: bounded queue, token-bucket admission, one task
//!   per job, graceful drain on shutdown

pub mod dispatch;
pub mod error;
pub mod sink;
pub mod sync;
pub mod types;

// Re-export main types for convenience
pub use dispatch::{Dispatcher, DispatcherConfig, RateLimiter};
pub use error::{Error, Result};
pub use sink::{MockSink, Sink, SinkError};
pub use sync::{run_pipeline, Contract, PipelineError, PipelineStage, SyncWorker};
pub use types::{
    FieldMapping, Operation, Record, SyncJob, SyncResult, SyncStatus, TransformConfig,
    ValueTransform,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
