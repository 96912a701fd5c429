//! Logging setup and timing for the imgbatch tools
//!
//! - Structured logging with `tracing`, written to stderr
//! - A per-process session id for correlating log lines
//! - Timers for measuring operations

use once_cell::sync::Lazy;
use std::time::{Duration, Instant};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

/// Global session ID for correlating logs
static SESSION_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Initialize logging with custom configuration.
///
/// `RUST_LOG` takes precedence over `config.log_level`.
pub fn init_with_config(config: TelemetryConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| anyhow::anyhow!("Invalid log level '{}': {}", config.log_level, e))?;

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(config.show_target)
            .with_file(config.show_file)
            .with_line_number(config.show_line_number)
            .compact());

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::debug!(
        session_id = %session_id(),
        version = env!("CARGO_PKG_VERSION"),
        "Telemetry initialized"
    );

    Ok(())
}

/// Get the current session ID
pub fn session_id() -> &'static str {
    &SESSION_ID
}

/// Telemetry configuration
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_level: String,
    /// Print the event target
    pub show_target: bool,
    /// Print the source file
    pub show_file: bool,
    /// Print the source line
    pub show_line_number: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "error".to_string(),
            show_target: false,
            show_file: false,
            show_line_number: false,
        }
    }
}

impl TelemetryConfig {
    /// Configuration for a given level; verbose mode also shows targets and source lines.
    pub fn for_level(log_level: impl Into<String>, verbose: bool) -> Self {
        Self {
            log_level: log_level.into(),
            show_target: verbose,
            show_file: verbose,
            show_line_number: verbose,
        }
    }
}

/// Timer for measuring operation duration
pub struct Timer {
    name: String,
    start: Instant,
}

impl Timer {
    /// Start a new timer
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
        }
    }

    /// Stop the timer and log the duration
    pub fn stop(self) -> Duration {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.name,
            duration_ms = duration.as_millis(),
            "Timer completed"
        );
        duration
    }
}
