//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use ag_shared::config::{LogFormat, LoggingConfig};

use crate::InfrastructureError;

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` takes precedence over the configured level. Fails if a global
/// subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), InfrastructureError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| InfrastructureError::Config(format!("Invalid log level '{}': {}", config.level, e)))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let result = match (config.format, config.timestamp) {
        (LogFormat::Json, true) => builder.json().try_init(),
        (LogFormat::Json, false) => builder.json().without_time().try_init(),
        (LogFormat::Pretty, true) => builder.pretty().try_init(),
        (LogFormat::Pretty, false) => builder.pretty().without_time().try_init(),
        (LogFormat::Compact, true) => builder.compact().try_init(),
        (LogFormat::Compact, false) => builder.compact().without_time().try_init(),
    };

    result.map_err(|e| InfrastructureError::General(format!("Failed to install tracing subscriber: {}", e)))
}
