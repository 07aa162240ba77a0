//! Tracing and logging setup.
//!
//! Events go to stderr so that stdout only carries analysis results.

use crate::config::{LogFormat, LoggingConfig};
use crate::errors::{LabelError, LabelResult};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Filter directive for the crate's own events at `level`
pub fn default_directive(level: &str) -> String {
    format!("nutrition_label={level}")
}

/// Build the event filter. `RUST_LOG`, when set, takes precedence.
pub fn build_filter(config: &LoggingConfig) -> LabelResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(default_directive(&config.level)).map_err(|e| {
        LabelError::Config(format!("Invalid log level '{}': {}", config.level, e))
    })
}

/// Initialize structured logging
pub fn init_tracing(config: &LoggingConfig) -> LabelResult<()> {
    let filter = build_filter(config)?;

    let result = match config.format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_thread_names(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| LabelError::Config(format!("Failed to initialize tracing: {e}")))?;

    tracing::debug!(
        log_level = %config.level,
        log_format = ?config.format,
        "Tracing initialized"
    );
    Ok(())
}
