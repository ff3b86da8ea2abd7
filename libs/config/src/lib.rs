//! # AMM Exchange Configuration
//!
//! Centralized configuration for the exchange engine.
//!
//! ## Features
//!
//! - **Layered loading**: TOML file plus `AMM_`-prefixed environment overrides
//! - **Defaults**: every field optional, an empty file is a valid config
//! - **Genesis balances**: opening token balances for the in-memory ledger
//! - **Logging**: `tracing-subscriber` setup in pretty or JSON format
//!
//! ## Usage
//!
//! ```rust,no_run
//! use config::{init_tracing, ExchangeConfig};
//!
//! let config = ExchangeConfig::load(Some(std::path::Path::new("config/exchange.toml")))?;
//! init_tracing(&config.logging)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod exchange_config;
pub mod logging;

// Re-export commonly used types
pub use exchange_config::{
    load_config, EngineSettings, ExchangeConfig, GenesisBalance, LogFormat, LoggingConfig,
    DEFAULT_ENGINE_ACCOUNT,
};
pub use logging::init_tracing;
