//! Sync pipeline: validate(source) -> remap -> validate(destination)
//!
//! The pipeline is one atomic operation with a single outcome. Each
//! stage's failure is tagged with the stage that produced it, so a caller
//! can tell bad input from a bad mapping configuration from a bad output
//! shape: three distinct operator-actionable failure classes.
//!
//! Copyright (c) 2025 Recsync Team
//! Licensed under the Apache-2.0 license

pub mod contract;
pub mod mapper;
pub mod worker;

pub use contract::Contract;
pub use worker::SyncWorker;

use thiserror::Error;

use crate::error::Error;
use crate::types::{Record, TransformConfig};

/// Stage of the pipeline a failure originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    ValidateSource,
    Mapping,
    ValidateDest,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStage::ValidateSource => write!(f, "input validation"),
            PipelineStage::Mapping => write!(f, "mapping"),
            PipelineStage::ValidateDest => write!(f, "output validation"),
        }
    }
}

/// A pipeline failure: which stage failed, and why
#[derive(Debug, Error)]
#[error("{stage} error: {source}")]
pub struct PipelineError {
    pub stage: PipelineStage,
    #[source]
    pub source: Error,
}

/// Run the full pipeline for one record, short-circuiting on the first
/// failure.
///
/// 1. Validate the input against the source contract.
/// 2. Apply the field mappings.
/// 3. Validate the output against the destination contract, a defense
///    against mapping-config bugs and partial contracts.
pub fn run_pipeline(
    record: &Record,
    source: &Contract,
    dest: &Contract,
    config: &TransformConfig,
) -> Result<Record, PipelineError> {
    source.validate(record).map_err(|e| PipelineError {
        stage: PipelineStage::ValidateSource,
        source: e,
    })?;

    let output = mapper::apply(record, config).map_err(|e| PipelineError {
        stage: PipelineStage::Mapping,
        source: e,
    })?;

    dest.validate(&output).map_err(|e| PipelineError {
        stage: PipelineStage::ValidateDest,
        source: e,
    })?;

    Ok(output)
}
