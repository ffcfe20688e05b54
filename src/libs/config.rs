//! Configuration management.
//!
//! Settings live in a JSON file in the platform data directory. Everything
//! is optional: a missing file or missing section falls back to the built-in
//! defaults, so a fresh install needs no configuration at all.

use super::data_storage::DataStorage;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;

/// Configuration file name inside the application data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Database settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database file name override, resolved inside the data directory.
    pub file: Option<String>,
}

/// Bootstrap admin settings.
///
/// Overrides for the credentials seeded when no admin account exists yet.
/// The seeded password is a publicly documented default either way; rotate
/// it through `Users::set_password` after first login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub database: Option<DatabaseConfig>,
    pub bootstrap: Option<BootstrapConfig>,
}

impl Config {
    /// Reads the configuration, or returns defaults when no file exists.
    pub fn read() -> Result<Self> {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let file = File::open(path)?;
        let config = serde_json::from_reader(file)?;
        Ok(config)
    }

    /// Writes the configuration to the data directory.
    pub fn save(&self) -> Result<()> {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}
