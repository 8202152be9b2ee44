//! Application settings and configuration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which persistent store backs the group collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Volatile in-process map
    #[default]
    Memory,
    /// One JSON file per key under `data_dir`
    File,
    /// SQLite database at `data_dir/groops.db`
    Sqlite,
}

/// Application settings
///
/// Settings are stored in JSON format; missing fields take their defaults.
///
/// # Example
/// ```rust,no_run
/// use groops::config::Settings;
///
/// let settings = Settings::load("groops.json").expect("Failed to load");
/// println!("Collection key: {}", settings.collection_key);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Store key holding the serialized group collection
    pub collection_key: String,
    /// Persistent store backend
    pub backend: BackendKind,
    /// Directory for file and SQLite backends
    pub data_dir: String,
    /// Seed the default groups on first load
    pub seed_defaults: bool,
}

impl Settings {
    /// Load settings from a JSON file
    ///
    /// # Returns
    /// The loaded settings, or default settings if the file doesn't exist or is empty
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let data = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read settings: {}", e)))?;

        if data.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings: Self = serde_json::from_str(&data)
            .map_err(|e| Error::Config(format!("Failed to parse settings: {}", e)))?;

        if settings.collection_key.trim().is_empty() {
            return Err(Error::Config("collection_key must not be empty".to_string()));
        }

        Ok(settings)
    }

    /// Save settings to a JSON file, creating parent directories as needed
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create settings directory: {}", e)))?;
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .map_err(|e| Error::Config(format!("Failed to write settings: {}", e)))?;

        Ok(())
    }

    /// Path of the SQLite database used by [`BackendKind::Sqlite`]
    pub fn database_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join("groops.db")
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            collection_key: "groups".to_string(),
            backend: BackendKind::Memory,
            data_dir: "./data".to_string(),
            seed_defaults: true,
        }
    }
}
