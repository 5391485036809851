//! Process-wide `tracing` subscriber.
//!
//! Events go to stderr so stdout carries only the JSON payload. `RUST_LOG`
//! overrides `--log-level` when set.

use tracing_subscriber::EnvFilter;

use crate::error::CliError;

pub fn init(log_level: &str) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|error| CliError::Logging(format!("invalid log level '{log_level}': {error}")))?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|error| CliError::Logging(error.to_string()))
}
