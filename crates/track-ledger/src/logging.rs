//! Structured logging setup.
//!
//! Installs a `tracing-subscriber` fmt subscriber, human-readable by
//! default or JSON for log shippers.

use std::env;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Logging setup errors.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The filter directive did not parse.
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    /// A global subscriber is already installed.
    #[error("Subscriber init failed: {0}")]
    Init(String),
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter directive (`info`, `track_ledger=debug`, ...).
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `TRACK_LEDGER_LOG_LEVEL` or `RUST_LOG`: filter (default: info)
    /// - `TRACK_LEDGER_JSON_LOGS`: `true`/`1` for JSON output (default: false)
    pub fn from_env() -> Self {
        let level = env::var("TRACK_LEDGER_LOG_LEVEL")
            .or_else(|_| env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string());

        let json = env::var("TRACK_LEDGER_JSON_LOGS")
            .map(|v| parse_bool(&v))
            .unwrap_or(false);

        Self { level, json }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

/// Install the global subscriber.
///
/// Fails instead of panicking when a subscriber is already set, so tests
/// and embedding hosts can call it unconditionally.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| LoggingError::InvalidFilter(e.to_string()))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| LoggingError::Init(e.to_string()))
}
