//! Application configuration management.

use serde::Deserialize;

use crate::error::AppResult;
use crate::types::{Currency, LaborRatePolicy};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Rollup engine defaults.
    pub rollup: RollupConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum accepted request body, in bytes.
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_body_limit() -> usize {
    8 * 1024 * 1024
}

/// Defaults applied to every rollup request that does not override them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RollupConfig {
    /// Reporting currency for all amounts.
    pub currency: Currency,
    /// How labor cost is priced when time logs are aggregated.
    pub labor_rate_policy: LaborRatePolicy,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of the human-readable format.
    pub json: bool,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `BUILDLEDGER__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BUILDLEDGER").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
