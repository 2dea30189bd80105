// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # ytdata Fetch
//!
//! HTTP implementations of the `ytdata-core` boundary traits.
//!
//! - [`client::YouTubeClient`] - Data API v3 list endpoints
//! - [`transcript::HttpTranscriptSource`] - caption tracks from the watch page
//! - [`http::HttpClient`] - reqwest wrapper with tracing and a domain allowlist
//! - [`settings`] - base URLs, timeout, transcript languages, API key
//!
//! ## Example
//!
//! ```ignore
//! use ytdata_fetch::{ApiKey, FetchSettings, YouTubeClient};
//!
//! let settings = FetchSettings::default();
//! let key = ApiKey::from_env("YOUTUBE_API_KEY")?;
//! let client = YouTubeClient::new(key, &settings)?;
//! ```

pub mod client;
pub mod error;
pub mod http;
pub mod settings;
pub mod transcript;

pub use client::YouTubeClient;
pub use error::FetchError;
pub use http::{HttpClient, ResponseExt};
pub use settings::{
    ApiKey, FetchSettings, DEFAULT_API_BASE_URL, DEFAULT_API_KEY_ENV, DEFAULT_TIMEOUT_SECS,
    DEFAULT_WATCH_BASE_URL,
};
pub use transcript::HttpTranscriptSource;
