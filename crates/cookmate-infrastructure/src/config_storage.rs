//! Config file storage.
//!
//! Loads `config.toml` and writes it back atomically (tmp file + rename).

use crate::config::CookmateConfig;
use crate::paths::CookmatePaths;
use cookmate_core::{CookmateError, Result};
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::PathBuf;

/// Handle on one config file.
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Loads the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(config))`: parsed and validated
    /// - `Ok(None)`: file missing or empty
    /// - `Err`: unreadable, malformed or invalid
    pub fn load(&self) -> Result<Option<CookmateConfig>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        CookmateConfig::from_toml_str(&content).map(Some)
    }

    /// Writes `config` atomically, creating the parent directory if needed.
    pub fn save(&self, config: &CookmateConfig) -> Result<()> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| CookmateError::io("Config path has no parent directory"))?;
        fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(config)?;

        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| CookmateError::io("Config path has no file name"))?;
        let tmp_path = parent.join(format!(".{}.tmp", file_name.to_string_lossy()));

        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

/// Loads the effective configuration: file (or defaults) plus environment.
pub fn load_config(paths: &CookmatePaths) -> Result<CookmateConfig> {
    let storage = ConfigStorage::new(paths.config_file());
    let mut config = match storage.load()? {
        Some(config) => {
            tracing::debug!("Loaded config from {}", storage.path().display());
            config
        }
        None => {
            tracing::debug!(
                "No config at {}, using defaults",
                storage.path().display()
            );
            CookmateConfig::default()
        }
    };

    config.apply_env_overrides(|key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
}
