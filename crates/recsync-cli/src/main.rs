//! Recsync CLI - contract-validated record synchronization
//!
//! This is the main entry point for the Recsync CLI application,
//! providing commands for validating records against contracts,
//! transforming them between shapes, and running synchronization jobs
//! through the rate-limited dispatcher.

mod cli;
mod demo;
mod error;
mod handlers;
mod logging;

use cli::{Cli, Commands};
use colored::control;
use error::Result;
use logging::LoggingConfig;
use recsync_schemas::SchemaStore;
use std::process;

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Set up colored output
    control::set_override(cli.use_color());

    // Initialize logging
    logging::init_logging(LoggingConfig::from_verbosity(cli.verbosity_level()));

    // Run the application
    let result = run(cli).await;

    // Handle the result
    match result {
        Ok(()) => {
            process::exit(0);
        }
        Err(e) => {
            eprintln!(
                "{}",
                error::format_error(&e, control::SHOULD_COLORIZE.should_colorize())
            );

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<()> {
    let store = match &cli.schema_dir {
        Some(dir) => SchemaStore::new().with_schema_dir(dir),
        None => SchemaStore::new(),
    };

    tracing::info!(command = ?cli.command, "executing command");

    let use_color = cli.use_color();

    match cli.command {
        Commands::Validate(args) => handlers::handle_validate(args, &store).await,
        Commands::Transform(args) => handlers::handle_transform(args, &store).await,
        Commands::Run(args) => handlers::handle_run(args, &store, use_color).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["recsync", "-vv", "run"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["recsync", "--no-color", "validate", "r.json"]);
        assert!(!cli.use_color());
    }
}
