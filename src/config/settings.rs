//! Tool settings
//!
//! Layered configuration: defaults → settings file → environment variables → CLI args

use std::path::PathBuf;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error, Result};

use super::{ConfigStore, DEFAULT_ENV_FILE, RECOGNIZED_KEYS};

/// Settings of the `srs-mgmt` tool itself (not the managed `.env` contents)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Path of the managed dotenv file
    pub env_file: PathBuf,

    /// Mask secret values such as the management password in listings
    pub mask_secrets: bool,

    /// Enable debug logging
    pub debug: bool,

    /// Log file path (if set, logs to file instead of stderr)
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            mask_secrets: true,
            debug: false,
            log_file: None,
        }
    }
}

impl Settings {
    /// Load settings from all sources
    pub fn load() -> Result<Self> {
        let settings_path = Self::settings_file_path()?;
        Self::figment(&settings_path)
            .extract()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()).into())
    }

    /// Layered provider chain for a given settings file
    pub fn figment(settings_path: &std::path::Path) -> Figment {
        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer settings file if it exists
            .merge(Toml::file(settings_path))
            // Layer environment variables (SRS_MGMT_ENV_FILE, etc.)
            .merge(Env::prefixed("SRS_MGMT_"))
    }

    /// Store over the configured env file, with process defaults for recognized keys
    pub fn store(&self) -> ConfigStore {
        ConfigStore::new(&self.env_file).with_process_defaults(RECOGNIZED_KEYS)
    }

    /// Get the settings file path
    pub fn settings_file_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("settings.toml"))
    }

    /// Save current settings to the default settings file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::settings_file_path()?)
    }

    /// Save current settings to a specific path
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|_e| {
                Error::Config(ConfigError::DirectoryCreationFailed(parent.to_path_buf()))
            })?;
        }

        let toml =
            toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        std::fs::write(path, toml).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        Ok(())
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("io", "ossrs", "srs-mgmt").ok_or_else(|| {
            Error::Config(ConfigError::LoadFailed(
                "Could not determine home directory".to_string(),
            ))
        })
    }
}
