//! Fetch settings and credentials.
//!
//! Settings are built once at startup and handed to the clients; nothing
//! in the collection layer reads configuration or the environment itself.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::FetchError;

/// Data API v3 root.
pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Site root used for watch pages and caption tracks.
pub const DEFAULT_WATCH_BASE_URL: &str = "https://www.youtube.com";

/// Environment variable holding the API key.
pub const DEFAULT_API_KEY_ENV: &str = "YOUTUBE_API_KEY";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// API Key
// ============================================================================

/// A Data API key. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Reads the key from an environment variable.
    ///
    /// A missing or blank variable is [`FetchError::MissingApiKey`].
    pub fn from_env(var: &str) -> Result<Self, FetchError> {
        match std::env::var(var) {
            Ok(value) if !value.trim().is_empty() => Ok(Self(value.trim().to_string())),
            _ => Err(FetchError::MissingApiKey(var.to_string())),
        }
    }

    /// Returns the secret for use in a request.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

// ============================================================================
// Fetch Settings
// ============================================================================

/// Settings for the HTTP clients.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Data API root, without trailing slash.
    pub api_base_url: String,
    /// Site root for watch pages.
    pub watch_base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Accepted transcript languages, most preferred first.
    pub transcript_languages: Vec<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            watch_base_url: DEFAULT_WATCH_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            transcript_languages: vec!["en".to_string()],
        }
    }
}

impl FetchSettings {
    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the Data API root.
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the watch page root.
    #[must_use]
    pub fn with_watch_base_url(mut self, url: impl Into<String>) -> Self {
        self.watch_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the accepted transcript languages.
    #[must_use]
    pub fn with_transcript_languages(mut self, languages: Vec<String>) -> Self {
        self.transcript_languages = languages;
        self
    }

    /// Hosts the clients are allowed to contact.
    pub fn allowed_domains(&self) -> Result<Vec<String>, FetchError> {
        [&self.api_base_url, &self.watch_base_url]
            .into_iter()
            .map(|raw| {
                let url = Url::parse(raw).map_err(|e| FetchError::InvalidUrl(format!("{raw}: {e}")))?;
                url.host_str()
                    .map(str::to_string)
                    .ok_or_else(|| FetchError::InvalidUrl(format!("no host in {raw}")))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_debug_is_redacted() {
        let key = ApiKey::new("AIzaSecret");
        assert_eq!(format!("{key:?}"), "ApiKey(***)");
        assert_eq!(key.expose(), "AIzaSecret");
    }

    #[test]
    fn test_missing_env_var() {
        let result = ApiKey::from_env("YTDATA_TEST_KEY_THAT_IS_NEVER_SET");
        assert!(matches!(result, Err(FetchError::MissingApiKey(var)) if var == "YTDATA_TEST_KEY_THAT_IS_NEVER_SET"));
    }

    #[test]
    fn test_default_allowed_domains() {
        let domains = FetchSettings::default().allowed_domains().unwrap();
        assert_eq!(domains, vec!["www.googleapis.com", "www.youtube.com"]);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let settings = FetchSettings::default().with_api_base_url("http://127.0.0.1:1234/");
        assert_eq!(settings.api_base_url, "http://127.0.0.1:1234");
    }

    #[test]
    fn test_invalid_base_url() {
        let settings = FetchSettings::default().with_watch_base_url("not a url");
        assert!(settings.allowed_domains().is_err());
    }
}
