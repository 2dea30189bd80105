//! CLI command implementations.

pub mod channel;
pub mod collect;
pub mod config;
pub mod playlist;
pub mod search;

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;
use ytdata_core::{TranscriptSource, YouTubeApi};
use ytdata_fetch::{ApiKey, HttpTranscriptSource, YouTubeClient};
use ytdata_store::Config;

/// Builds the Data API client from the config and the key in the
/// environment.
pub fn connect(config: &Config) -> Result<Arc<dyn YouTubeApi>> {
    let settings = config.fetch_settings()?;
    let key = ApiKey::from_env(&config.api.api_key_env)?;
    debug!(base_url = %settings.api_base_url, timeout = ?settings.timeout, "Connecting");
    Ok(Arc::new(YouTubeClient::new(key, &settings)?))
}

/// Builds the transcript source from the config.
pub fn transcript_source(config: &Config) -> Result<Arc<dyn TranscriptSource>> {
    let settings = config.fetch_settings()?;
    Ok(Arc::new(HttpTranscriptSource::new(&settings)?))
}
