//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use tokio::sync::mpsc;

use recsync_core::{
    Contract, Dispatcher, DispatcherConfig, MockSink, Record, SyncResult, SyncStatus, SyncWorker,
    TransformConfig,
};
use recsync_schemas::{SchemaStore, CONTACT_EXTERNAL, CONTACT_INTERNAL};

use crate::cli::{Direction, RunArgs, TransformArgs, ValidateArgs};
use crate::demo;
use crate::error::{Error, Result};

/// Handle the validate command
pub async fn handle_validate(args: ValidateArgs, store: &SchemaStore) -> Result<()> {
    let record = read_record(&args.record)?;
    let contract = load_contract(store, &args.contract)?;

    match contract.validate(&record) {
        Ok(()) => {
            println!(
                "{} {} conforms to {}",
                "ok:".green().bold(),
                args.record.display(),
                args.contract
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Handle the transform command
pub async fn handle_transform(args: TransformArgs, store: &SchemaStore) -> Result<()> {
    let record = read_record(&args.record)?;

    let (source_name, dest_name, builtin_mapping) = match args.direction {
        Direction::InternalToExternal => {
            (CONTACT_INTERNAL, CONTACT_EXTERNAL, demo::internal_to_external())
        }
        Direction::ExternalToInternal => {
            (CONTACT_EXTERNAL, CONTACT_INTERNAL, demo::external_to_internal())
        }
    };

    let mapping = match &args.mapping {
        Some(path) => read_mapping(path)?,
        None => builtin_mapping,
    };

    let source = load_contract(store, source_name)?;
    let dest = load_contract(store, dest_name)?;

    let output = recsync_core::run_pipeline(&record, &source, &dest, &mapping)?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Handle the run command: submit the demo jobs through the dispatcher
/// and summarize their results
pub async fn handle_run(args: RunArgs, store: &SchemaStore, use_color: bool) -> Result<()> {
    let source = Arc::new(load_contract(store, CONTACT_INTERNAL)?);
    let dest = Arc::new(load_contract(store, CONTACT_EXTERNAL)?);

    let config = DispatcherConfig {
        rate: args.rate,
        burst: args.burst,
        queue_capacity: args.queue_capacity,
    };
    let (result_tx, mut result_rx) = mpsc::unbounded_channel();
    let worker = SyncWorker::new(Arc::new(MockSink));
    let dispatcher = Dispatcher::new(config, worker, result_tx)?;

    let jobs = demo::demo_jobs(source, dest);
    let mut accepted = 0usize;
    for job in jobs {
        let name = job.name.clone();
        match dispatcher.submit(job) {
            Ok(()) => accepted += 1,
            Err(e) => eprintln!("submission rejected for {name}: {e}"),
        }
    }

    let mut results = Vec::with_capacity(accepted);
    for _ in 0..accepted {
        match result_rx.recv().await {
            Some(result) => results.push(result),
            None => break,
        }
    }
    dispatcher.shutdown().await;

    println!("\n--- RESULTS ---");
    for result in &results {
        print_result(result, use_color);
    }
    Ok(())
}

fn print_result(result: &SyncResult, use_color: bool) {
    let status_text = result.status.to_string();
    let status = if use_color {
        match result.status {
            SyncStatus::Success => status_text.as_str().green().bold().to_string(),
            SyncStatus::TransformFail => status_text.as_str().red().bold().to_string(),
        }
    } else {
        status_text
    };
    println!("{}: {} ({})", result.job_name, status, result.detail);

    if let Some(transformed) = &result.transformed {
        let rendered = serde_json::to_string_pretty(transformed)
            .unwrap_or_else(|_| "<unprintable>".to_string());
        println!("  Output: {rendered}");
    }
}

fn read_record(path: &Path) -> Result<Record> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    value
        .as_object()
        .cloned()
        .ok_or_else(|| Error::InvalidRecord {
            path: path.to_path_buf(),
        })
}

fn read_mapping(path: &Path) -> Result<TransformConfig> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn load_contract(store: &SchemaStore, name: &str) -> Result<Contract> {
    let schema = store.load(name)?;
    Ok(Contract::from_value(schema)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_record_rejects_non_objects() {
        let dir = std::env::temp_dir().join("recsync-cli-test-read-record");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("array.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let err = read_record(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { .. }));
    }

    #[test]
    fn test_read_record_missing_file() {
        let err = read_record(Path::new("/nonexistent/record.json")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
