//! Tracing subscriber setup

use crate::{LogFormat, LoggingConfig};
use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber described by `config`
///
/// `RUST_LOG` takes precedence over the configured level. Fails if a global
/// subscriber is already installed or the level directive does not parse.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| anyhow!("Invalid log level '{}': {}", config.level, e))?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match config.format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_install_is_rejected() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            format: LogFormat::Json,
        };

        let _ = init_tracing(&config);
        assert!(init_tracing(&config).is_err());
    }
}
