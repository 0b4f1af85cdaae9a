//! JSON persistence for loot configurations.
//!
//! Engine state is never saved; only the configuration an engine is built
//! from, so a front end can restore its drop tables across restarts.

use super::LootConfig;
use crate::error::ConfigError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".lootbox";
const CONFIG_FILE: &str = "config.json";

/// Get the ~/.lootbox/ directory path. Does not create it.
pub fn config_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    Ok(home_dir.join(CONFIG_DIR))
}

/// Get ~/.lootbox/config.json.
pub fn default_config_path() -> io::Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

impl LootConfig {
    /// Read and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&json)?;
        config.validate()?;
        tracing::debug!(
            path = %path.as_ref().display(),
            slots = config.slot_count(),
            "loaded loot config"
        );
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON, creating parent
    /// directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
