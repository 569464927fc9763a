//! Path management for Cookmate configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/cookmate/          # Config directory (platform config dir)
//! ├── config.toml              # Application configuration
//! └── logs/                    # Application logs
//!     └── cookmate.log.YYYY-MM-DD
//! ```
//!
//! `COOKMATE_CONFIG_DIR` replaces the whole directory, which keeps tests and
//! side-by-side installs apart.

use cookmate_core::{CookmateError, Result};
use std::path::PathBuf;

const APP_DIR: &str = "cookmate";
const CONFIG_FILE: &str = "config.toml";
const LOG_DIR: &str = "logs";

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "COOKMATE_CONFIG_DIR";

/// Resolves where Cookmate keeps its files.
#[derive(Debug, Clone)]
pub struct CookmatePaths {
    base: PathBuf,
}

impl CookmatePaths {
    /// Uses `COOKMATE_CONFIG_DIR` if set, otherwise `<config_dir>/cookmate`.
    pub fn discover() -> Result<Self> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(Self::with_base(PathBuf::from(dir)));
        }

        let config_dir = dirs::config_dir()
            .ok_or_else(|| CookmateError::config("Cannot determine the config directory"))?;
        Ok(Self::with_base(config_dir.join(APP_DIR)))
    }

    /// Uses `base` as the configuration directory.
    pub fn with_base(base: PathBuf) -> Self {
        Self { base }
    }

    pub fn config_dir(&self) -> &PathBuf {
        &self.base
    }

    pub fn config_file(&self) -> PathBuf {
        self.base.join(CONFIG_FILE)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.base.join(LOG_DIR)
    }
}
