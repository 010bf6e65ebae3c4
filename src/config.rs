use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_DEBOUNCE_MS: u64 = 2000;

/// User-tunable settings, read from `config.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub debounce_ms: u64,
    pub user_agent: String,
    /// No timeout when unset; a stalled request keeps the view loading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            user_agent: format!("reposcout/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: None,
        }
    }
}

impl Settings {
    #[must_use]
    pub const fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Apply command-line overrides on top of the file values
    #[must_use]
    pub fn with_overrides(mut self, api_base_url: Option<String>, debounce_ms: Option<u64>) -> Self {
        if let Some(url) = api_base_url {
            self.api_base_url = url;
        }
        if let Some(ms) = debounce_ms {
            self.debounce_ms = ms;
        }
        self
    }

    /// Check that the base URL can have `/users/{name}/repos` appended
    pub fn validate(&self) -> Result<reqwest::Url> {
        let url = reqwest::Url::parse(&self.api_base_url)
            .with_context(|| format!("Invalid api_base_url: {}", self.api_base_url))?;

        if url.cannot_be_a_base() {
            anyhow::bail!("api_base_url cannot carry a path: {}", self.api_base_url);
        }

        Ok(url)
    }
}

/// Get the reposcout configuration directory
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine the user configuration directory")?;
    Ok(base.join("reposcout"))
}

/// Get the path to the settings file
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Load settings from a specific path. The file must exist.
pub fn load_settings_from_path(config_path: &Path) -> Result<Settings> {
    if !config_path.exists() {
        anyhow::bail!("Configuration not found at {}", config_path.display());
    }

    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

    let settings: Settings = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

    Ok(settings)
}

/// Load settings from the default location, falling back to defaults when
/// no file has been written yet
pub fn load_settings() -> Result<Settings> {
    let config_path = config_path()?;
    if !config_path.exists() {
        return Ok(Settings::default());
    }
    load_settings_from_path(&config_path)
}
