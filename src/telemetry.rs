//! Tracing subscriber initialisation.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing-subscriber` filter directive.
pub const LOG_ENV_VAR: &str = "ATELIER_LOG";

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured fallback filter does not parse.
    #[error("invalid log filter '{filter}': {reason}")]
    InvalidFilter {
        /// Offending directive.
        filter: String,
        /// Parser message.
        reason: String,
    },
    /// A global subscriber is already installed.
    #[error("failed to initialise tracing subscriber: {0}")]
    Install(String),
}

/// Resolves the active filter: `ATELIER_LOG` when set and valid, otherwise
/// `fallback`.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when `fallback` is used and does
/// not parse.
pub fn resolve_filter(fallback: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_env(LOG_ENV_VAR).or_else(|_| {
        EnvFilter::try_new(fallback).map_err(|err| TelemetryError::InvalidFilter {
            filter: fallback.to_owned(),
            reason: err.to_string(),
        })
    })
}

/// Installs a formatting subscriber writing to stderr, keeping stdout free
/// for responses.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the filter is invalid or a subscriber is
/// already installed.
pub fn init(fallback_filter: &str) -> Result<(), TelemetryError> {
    let filter = resolve_filter(fallback_filter)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| TelemetryError::Install(err.to_string()))
}
