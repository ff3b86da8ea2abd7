//! Exchange Configuration Module
//!
//! Loads engine configuration from a TOML file with `AMM_`-prefixed
//! environment variable overrides. Every field has a default, so an empty
//! file (or no file at all) yields a working configuration.

use anyhow::{Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Default custody account of the engine
pub const DEFAULT_ENGINE_ACCOUNT: &str = "0x00000000000000000000000000000000000a3300";

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ExchangeConfig {
    #[serde(default)]
    pub engine: EngineSettings,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Opening balances for the in-memory asset ledger
    #[serde(default)]
    pub genesis: Vec<GenesisBalance>,
}

/// Engine settings
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EngineSettings {
    /// Account that custodies pooled tokens (hex address)
    #[serde(default = "default_engine_account")]
    pub account: String,
}

/// Logging settings
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `engine=debug,warn`
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// One opening balance
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct GenesisBalance {
    /// Token address (hex)
    pub token: String,
    /// Holder address (hex)
    pub account: String,
    /// Amount in raw token units, decimal string
    pub amount: String,
}

fn default_engine_account() -> String {
    DEFAULT_ENGINE_ACCOUNT.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            account: default_engine_account(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl ExchangeConfig {
    /// Load configuration from `path` (optional) with environment overrides
    ///
    /// Environment variables use the `AMM` prefix and `__` as the section
    /// separator, e.g. `AMM_LOGGING__LEVEL=debug`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            info!("Loading exchange config: {:?}", path);
            builder = builder.add_source(File::from(path).required(true));
        } else {
            debug!("No config file given, using defaults");
        }

        builder = builder.add_source(
            Environment::with_prefix("AMM")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

/// Convenience function to load configuration from a file
pub fn load_config(path: &Path) -> Result<ExchangeConfig> {
    ExchangeConfig::load(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_full_config() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("exchange.toml");

        let config_content = r#"
[engine]
account = "0x00000000000000000000000000000000000000ee"

[logging]
level = "debug"
format = "json"

[[genesis]]
token = "0x0000000000000000000000000000000000000001"
account = "0x0000000000000000000000000000000000000100"
amount = "1000000"

[[genesis]]
token = "0x0000000000000000000000000000000000000002"
account = "0x0000000000000000000000000000000000000100"
amount = "2000000"
"#;

        fs::write(&config_path, config_content).unwrap();

        let config = load_config(&config_path).unwrap();

        assert_eq!(
            config.engine.account,
            "0x00000000000000000000000000000000000000ee"
        );
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.genesis.len(), 2);
        assert_eq!(config.genesis[1].amount, "2000000");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("empty.toml");
        fs::write(&config_path, "").unwrap();

        let config = load_config(&config_path).unwrap();

        assert_eq!(config.engine.account, DEFAULT_ENGINE_ACCOUNT);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.genesis.is_empty());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(load_config(&missing).is_err());
    }
}
