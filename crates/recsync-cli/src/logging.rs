//! Logging setup for the Recsync CLI
//!
//! Maps CLI verbosity onto a tracing level filter; `RUST_LOG` takes
//! precedence when set.

use tracing_subscriber::EnvFilter;

/// Logging configuration derived from CLI flags
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter
    pub level: String,
    /// Include file and line numbers
    pub source_location: bool,
}

impl LoggingConfig {
    /// Create logging config from verbosity level
    pub fn from_verbosity(verbosity: u8) -> Self {
        match verbosity {
            0 => Self {
                level: "warn".to_string(),
                source_location: false,
            },
            1 => Self {
                level: "info".to_string(),
                source_location: false,
            },
            2 => Self {
                level: "debug".to_string(),
                source_location: true,
            },
            _ => Self {
                level: "trace".to_string(),
                source_location: true,
            },
        }
    }
}

/// Initialize the logging system
pub fn init_logging(config: LoggingConfig) {
    // RUST_LOG takes precedence over the verbosity-derived level.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_mapping() {
        assert_eq!(LoggingConfig::from_verbosity(0).level, "warn");
        assert_eq!(LoggingConfig::from_verbosity(1).level, "info");
        assert_eq!(LoggingConfig::from_verbosity(2).level, "debug");
        assert_eq!(LoggingConfig::from_verbosity(5).level, "trace");
    }

    #[test]
    fn test_source_location_only_when_debugging() {
        assert!(!LoggingConfig::from_verbosity(1).source_location);
        assert!(LoggingConfig::from_verbosity(2).source_location);
    }
}
