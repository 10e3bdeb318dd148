//! Tracing subscriber setup

use crate::file_config::{LogFormat, LoggingConfig};
use anyhow::{Context, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber described by `config`
///
/// `RUST_LOG` takes precedence over `config.level`. Returns `false` when a
/// subscriber was already installed, which leaves the existing one active.
pub fn init_tracing(config: &LoggingConfig) -> Result<bool> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .with_context(|| format!("Invalid log level {:?}", config.level))?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let installed = match config.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    match installed {
        Ok(()) => {
            debug!(level = %config.level, format = %config.format, "tracing initialised");
            Ok(true)
        }
        Err(_) => Ok(false),
    }
}
