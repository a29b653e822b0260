//! Configuration file
//!
//! ```text
//! {
//!   "database_path": "./tablestore.db.json",
//!   "extra_fields": "drop",
//!   "log_level": "info"
//! }
//! ```
//!
//! Only `database_path` is required.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::observability::Severity;
use crate::schema::ExtraFields;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Database document location (required)
    pub database_path: String,

    /// Handling of undeclared keys on write (optional, default "drop")
    #[serde(default)]
    pub extra_fields: ExtraFields,

    /// Minimum log severity (optional, default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Configuration with defaults for everything but the database path
    pub fn new(database_path: impl Into<String>) -> Self {
        Self {
            database_path: database_path.into(),
            extra_fields: ExtraFields::default(),
            log_level: default_log_level(),
        }
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Err(CliError::not_initialized());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Write configuration to file
    pub fn save(&self, path: &Path) -> CliResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .map_err(|e| CliError::config_error(format!("Failed to write config: {}", e)))
    }

    fn validate(&self) -> CliResult<()> {
        if self.database_path.trim().is_empty() {
            return Err(CliError::config_error("database_path must not be empty"));
        }
        self.min_severity()?;
        Ok(())
    }

    pub fn database_path(&self) -> &Path {
        Path::new(&self.database_path)
    }

    /// Parsed `log_level`
    pub fn min_severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse()
            .map_err(|e: String| CliError::config_error(format!("Invalid log_level: {}", e)))
    }
}
