use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::controller::PAGE_SIZE;
use crate::error::CoreError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Environment variable that overrides `tmdb.api_key`.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub tmdb: TmdbConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    pub language: String,
    pub prefetch_distance: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub base_url: String,
    pub image_base_url: String,
    pub poster_size: String,
    pub timeout_secs: u64,
}

impl AppConfig {
    /// Load config: user file (if exists) or built-in defaults, then
    /// apply the `TMDB_API_KEY` environment override.
    pub fn load() -> Result<Self, CoreError> {
        let mut config = Self::load_file()?;
        config.apply_api_key(std::env::var(API_KEY_ENV).ok());
        Ok(config)
    }

    /// Load the user file (or built-in defaults) without environment
    /// overrides. This is what gets written back by [`AppConfig::save`].
    pub fn load_file() -> Result<Self, CoreError> {
        let user_path = Self::config_path();
        let config = if user_path.exists() {
            let user_str = std::fs::read_to_string(&user_path)
                .map_err(|e| CoreError::Config(e.to_string()))?;
            Self::from_toml(&user_str)?
        } else {
            Self::from_toml(DEFAULT_CONFIG)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Use `key` as the API key unless it is missing or blank.
    pub fn apply_api_key(&mut self, key: Option<String>) {
        if let Some(key) = key.map(|k| k.trim().to_string()) {
            if !key.is_empty() {
                self.tmdb.api_key = Some(key);
            }
        }
    }

    /// Parse a TOML document into a config.
    pub fn from_toml(content: &str) -> Result<Self, CoreError> {
        toml::from_str(content).map_err(|e| CoreError::Config(e.to_string()))
    }

    /// Reject values that would break paging.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.general.prefetch_distance > PAGE_SIZE {
            return Err(CoreError::Config(format!(
                "general.prefetch_distance must not exceed {PAGE_SIZE}"
            )));
        }
        Ok(())
    }

    /// Save current config to the user config file.
    pub fn save(&self) -> Result<(), CoreError> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CoreError::Config(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Path to the saved list state.
    pub fn state_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.data_dir().join("state.json"))
            .unwrap_or_else(|| PathBuf::from("state.json"))
    }

    /// Directory for log files.
    pub fn log_dir() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.data_dir().join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "popcorn")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}
