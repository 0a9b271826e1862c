//! Tracing subscriber bootstrap

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Installs a global fmt subscriber
///
/// `RUST_LOG` takes precedence over the configured filter. Fails when the filter does not
/// parse or a global subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter)
            .with_context(|| format!("Invalid log filter: {:?}", config.filter))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow!("Failed to install tracing subscriber: {}", err))
}
