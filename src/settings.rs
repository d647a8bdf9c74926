//! Application settings.
//!
//! Sources, lowest priority first: built-in defaults, an optional TOML file
//! (`expense-ledger.toml` unless `--config` points elsewhere), then
//! `EXPENSE_LEDGER_*` environment variables (`EXPENSE_LEDGER_SERVER__PORT`
//! for nested keys). Command-line flags override
//! the result in [`crate::cli`].
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::storage::DEFAULT_DATA_FILE;

pub const DEFAULT_CONFIG_PATH: &str = "expense-ledger.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Path of the JSON backing file.
    pub data_file: String,
    /// Default log filter level (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
    pub server: ServerSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: DEFAULT_DATA_FILE.to_string(),
            log_level: "info".to_string(),
            server: ServerSettings::default(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

impl Settings {
    /// Load settings from the given file (or the default one) and the environment.
    /// A missing file is fine; a malformed one is an error.
    pub fn load(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let path = config_path.unwrap_or(DEFAULT_CONFIG_PATH);

        Config::builder()
            .add_source(File::with_name(path).required(config_path.is_some()))
            .add_source(
                Environment::with_prefix("EXPENSE_LEDGER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
