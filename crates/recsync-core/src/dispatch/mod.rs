//! Job dispatcher: bounded queue, token-bucket admission, concurrent
//! pipeline execution
//!
//! Submission is decoupled from execution: `submit` either enqueues
//! immediately or rejects immediately, a single admission loop pulls jobs
//! in FIFO order once the rate limiter grants a token, and each admitted
//! job runs in its own task. Shutdown stops admission promptly (the
//! remaining queue is not drained) and waits for every already-spawned
//! task before returning.
//!
//! Copyright (c) 2025 Recsync Team
//! Licensed under the Apache-2.0 license

pub mod rate_limit;

pub use rate_limit::RateLimiter;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;

use crate::error::{Error, Result};
use crate::sync::SyncWorker;
use crate::types::{SyncJob, SyncResult, SyncStatus};

/// Dispatcher configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatcherConfig {
    /// Steady-state admission throughput, in jobs per second
    pub rate: f64,
    /// How many jobs may be admitted back-to-back above steady state
    pub burst: u32,
    /// How many unadmitted jobs may wait before submission is rejected
    pub queue_capacity: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            rate: 5.0,
            burst: 5,
            queue_capacity: 16,
        }
    }
}

impl DispatcherConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.rate > 0.0) {
            return Err(Error::Configuration {
                message: "rate must be positive".to_string(),
            });
        }
        if self.burst == 0 {
            return Err(Error::Configuration {
                message: "burst cannot be zero".to_string(),
            });
        }
        if self.queue_capacity == 0 {
            return Err(Error::Configuration {
                message: "queue_capacity cannot be zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Rate-limited concurrent job dispatcher.
///
/// Owning the dispatcher is the Running state; `shutdown` consumes it,
/// so submission to a stopped dispatcher is unrepresentable. Every
/// accepted job eventually yields exactly one `SyncResult` on the
/// result channel supplied at construction.
pub struct Dispatcher {
    job_tx: mpsc::Sender<SyncJob>,
    shutdown_tx: watch::Sender<bool>,
    loop_handle: tokio::task::JoinHandle<()>,
    queue_capacity: usize,
}

impl Dispatcher {
    /// Create a dispatcher and start its admission loop.
    ///
    /// Every `SyncResult` is published on `result_tx`; the caller decides
    /// whether that feeds a channel consumer, a log, or a test harness.
    pub fn new(
        config: DispatcherConfig,
        worker: SyncWorker,
        result_tx: mpsc::UnboundedSender<SyncResult>,
    ) -> Result<Self> {
        config.validate()?;

        let (job_tx, job_rx) = mpsc::channel(config.queue_capacity);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let limiter = RateLimiter::new(config.rate, config.burst);
        let queue_capacity = config.queue_capacity;

        let loop_handle = tokio::spawn(admission_loop(
            job_rx,
            shutdown_rx,
            limiter,
            Arc::new(worker),
            result_tx,
        ));

        Ok(Self {
            job_tx,
            shutdown_tx,
            loop_handle,
            queue_capacity,
        })
    }

    /// Submit a job for asynchronous processing.
    ///
    /// Non-blocking fire-and-forget: returns `Ok` once the job is
    /// enqueued, or `Error::QueueFull` immediately when the queue is at
    /// capacity. The dispatcher never retries a rejected submission.
    pub fn submit(&self, job: SyncJob) -> Result<()> {
        self.job_tx.try_send(job).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => Error::QueueFull {
                capacity: self.queue_capacity,
            },
            mpsc::error::TrySendError::Closed(_) => Error::DispatcherStopped,
        })
    }

    /// Shut down gracefully.
    ///
    /// Stops the admission loop promptly (jobs still waiting in the
    /// queue are not admitted), then waits for every already-spawned
    /// pipeline task to finish. No task is ever killed mid-flight.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.loop_handle.await;
    }
}

async fn admission_loop(
    mut job_rx: mpsc::Receiver<SyncJob>,
    mut shutdown_rx: watch::Receiver<bool>,
    limiter: RateLimiter,
    worker: Arc<SyncWorker>,
    result_tx: mpsc::UnboundedSender<SyncResult>,
) {
    let mut tasks: JoinSet<()> = JoinSet::new();

    loop {
        // Reap tasks that already finished so the set does not grow
        // unbounded on long runs.
        while tasks.try_join_next().is_some() {}

        let job = tokio::select! {
            _ = shutdown_rx.changed() => break,
            maybe_job = job_rx.recv() => match maybe_job {
                Some(job) => job,
                None => break,
            },
        };

        // Admission: wait for a token, but leave immediately on shutdown
        // rather than draining the queue.
        tokio::select! {
            _ = shutdown_rx.changed() => break,
            _ = limiter.acquire() => {}
        }

        tracing::debug!(job = %job.name, "job admitted");
        let worker = Arc::clone(&worker);
        let result_tx = result_tx.clone();
        tasks.spawn(async move {
            let result = worker.process_job(&job);
            log_result(&result);
            let _ = result_tx.send(result);
        });
    }

    // Join barrier: every spawned pipeline run completes before shutdown
    // returns to the caller.
    while tasks.join_next().await.is_some() {}
}

fn log_result(result: &SyncResult) {
    match result.status {
        SyncStatus::Success => {
            tracing::info!(job = %result.job_name, status = %result.status, detail = %result.detail, "job finished");
        }
        SyncStatus::TransformFail => {
            tracing::warn!(job = %result.job_name, status = %result.status, detail = %result.detail, "job failed");
        }
    }
}
