//! Application configuration management.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::CENT;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "EVENLY";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Ledger rules applied when recording and reporting.
    pub ledger: LedgerConfig,
    /// Logging configuration.
    pub log: LogConfig,
}

/// Ledger configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Tolerance used by the zero-sum check and the debt simplifier.
    #[serde(default = "default_tolerance")]
    pub tolerance: Decimal,
    /// Maximum participants per expense. `0` disables the cap.
    #[serde(default = "default_max_participants")]
    pub max_participants: usize,
}

fn default_tolerance() -> Decimal {
    CENT
}

fn default_max_participants() -> usize {
    4
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_participants: default_max_participants(),
        }
    }
}

impl LedgerConfig {
    /// Returns the participant cap, or `None` when uncapped.
    #[must_use]
    pub fn participant_cap(&self) -> Option<usize> {
        (self.max_participants > 0).then_some(self.max_participants)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Default `tracing` filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "evenly=info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from config files and the environment.
    ///
    /// Sources, lowest precedence first: `config/default`, `config/{RUN_MODE}`,
    /// then `EVENLY__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Loads configuration, layering an explicit file over the defaults.
    ///
    /// The explicit file is required to exist; environment variables still win.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed, or if any value
    /// fails to deserialize.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
