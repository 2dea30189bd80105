//! Configuration management.

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use ytdata_fetch::{
    FetchSettings, DEFAULT_API_BASE_URL, DEFAULT_API_KEY_ENV, DEFAULT_TIMEOUT_SECS,
    DEFAULT_WATCH_BASE_URL,
};

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Data API access.
    #[serde(default)]
    pub api: ApiConfig,
    /// Transcript lookup.
    #[serde(default)]
    pub transcripts: TranscriptConfig,
    /// Collection and search defaults.
    #[serde(default)]
    pub collect: CollectConfig,
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
}

/// Data API access settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Data API root.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Site root for watch pages.
    #[serde(default = "default_watch_base_url")]
    pub watch_base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Transcript settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptConfig {
    /// Whether collection fetches transcripts unless told otherwise.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Accepted caption languages, most preferred first.
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
}

/// Defaults for collection and search commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectConfig {
    /// Videos per channel or playlist.
    #[serde(default = "default_max_videos")]
    pub max_videos: usize,
    /// Results per search keyword.
    #[serde(default = "default_search_max_results")]
    pub search_max_results: u32,
    /// Look-back window for channel ranking, in days.
    #[serde(default = "default_timeframe_days")]
    pub timeframe_days: u32,
}

/// General application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when neither `--verbose` nor `--quiet` is given.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_watch_base_url() -> String {
    DEFAULT_WATCH_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

fn default_languages() -> Vec<String> {
    vec!["en".to_string()]
}

fn default_max_videos() -> usize {
    5
}

fn default_search_max_results() -> u32 {
    5
}

fn default_timeframe_days() -> u32 {
    30
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
            watch_base_url: default_watch_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            languages: default_languages(),
        }
    }
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            max_videos: default_max_videos(),
            search_max_results: default_search_max_results(),
            timeframe_days: default_timeframe_days(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ytdata")
            .join("config.json")
    }

    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, StoreError> {
        Self::load_from(&Self::default_path())
    }

    /// Loads configuration from a specific path. A missing file yields
    /// the defaults.
    pub fn load_from(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;

        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Saves configuration to the default path.
    pub fn save(&self) -> Result<(), StoreError> {
        self.save_to(&Self::default_path())
    }

    /// Saves configuration to a specific path, creating parent
    /// directories. The file is replaced atomically.
    pub fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, content)?;
        std::fs::rename(&temp_path, path)?;

        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Checks values serde cannot.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.api.api_key_env.trim().is_empty() {
            return Err(StoreError::Config("api.api_key_env is empty".to_string()));
        }
        if self.api.timeout_secs == 0 {
            return Err(StoreError::Config("api.timeout_secs must be positive".to_string()));
        }
        if !LOG_LEVELS.contains(&self.general.log_level.as_str()) {
            return Err(StoreError::Config(format!(
                "general.log_level must be one of {}, got {:?}",
                LOG_LEVELS.join(", "),
                self.general.log_level
            )));
        }
        Ok(())
    }

    /// Builds the HTTP client settings.
    pub fn fetch_settings(&self) -> Result<FetchSettings, StoreError> {
        self.validate()?;
        let settings = FetchSettings::default()
            .with_api_base_url(self.api.base_url.as_str())
            .with_watch_base_url(self.api.watch_base_url.as_str())
            .with_timeout(Duration::from_secs(self.api.timeout_secs))
            .with_transcript_languages(self.transcripts.languages.clone());

        settings
            .allowed_domains()
            .map_err(|e| StoreError::Config(e.to_string()))?;
        Ok(settings)
    }
}

// ============================================================================
// Tests
// ============================================================================
