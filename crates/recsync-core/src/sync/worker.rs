//! Sync worker: runs the pipeline for one job and produces its result
//!
//! Copyright (c) 2025 Recsync Team
//! Licensed under the Apache-2.0 license

use std::sync::Arc;

use crate::sink::Sink;
use crate::sync::run_pipeline;
use crate::types::{SyncJob, SyncResult};

/// Processes sync jobs one at a time.
///
/// Every per-job error is converted into a `SyncResult` here; nothing a
/// job does can escape into the dispatcher's control flow or affect a
/// sibling job.
pub struct SyncWorker {
    sink: Arc<dyn Sink>,
}

impl SyncWorker {
    pub fn new(sink: Arc<dyn Sink>) -> Self {
        Self { sink }
    }

    /// Run the pipeline for one job and report its outcome.
    ///
    /// On success the transformed record is handed to the sink. A sink
    /// failure is reported in the detail and logged, but the completed
    /// transformation is not rolled back and the status stays `success`:
    /// there is no compensating transaction.
    pub fn process_job(&self, job: &SyncJob) -> SyncResult {
        let output = match run_pipeline(
            &job.record,
            &job.source_contract,
            &job.dest_contract,
            &job.mapping,
        ) {
            Ok(output) => output,
            Err(e) => {
                tracing::info!(job = %job.name, stage = %e.stage, "transform failed");
                return SyncResult::transform_fail(&job.name, e.to_string());
            }
        };

        match self.sink.send(&output, job.operation) {
            Ok(()) => SyncResult::success(&job.name, "OK", output),
            Err(e) => {
                tracing::warn!(job = %job.name, error = %e, "sink delivery failed");
                SyncResult::success(
                    &job.name,
                    format!("transformed, but sink delivery failed: {e}"),
                    output,
                )
            }
        }
    }
}
