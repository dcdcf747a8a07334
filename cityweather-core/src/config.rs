use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Current-conditions endpoint used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

pub const API_KEY_ENV: &str = "WEATHER_API_KEY";
pub const BASE_URL_ENV: &str = "WEATHER_API_URL";

/// Settings stored on disk and overlaid by the environment.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_url = "https://api.openweathermap.org/data/2.5/weather"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl Config {
    /// Load the config file (if any), then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let cfg = Self::load_from(&path)?;
        Ok(cfg.with_overrides(|name| std::env::var(name).ok()))
    }

    /// Read config from `path`, or return an empty default if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Apply `WEATHER_API_KEY` / `WEATHER_API_URL` on top of file values.
    /// Empty variables are treated as unset.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(API_KEY_ENV) {
            self.api_key = Some(key);
        }
        if let Some(url) = non_empty(BASE_URL_ENV) {
            self.base_url = Some(url);
        }
        self
    }

    /// Save config to the platform location.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "cityweather", "cityweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// The credential to send. A missing key is sent as an empty string; the provider
    /// rejects it like any other bad request.
    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }
}
