// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # ytdata Core
//!
//! Core types, models, and traits shared by every `ytdata` crate.
//!
//! This crate provides:
//!
//! - Identifiers for channels, videos and playlists
//! - Serde models of the YouTube Data API v3 list responses
//! - Derived records (video properties, statistics, channel info)
//! - Error types
//! - The boundary traits the collection layer talks to
//!
//! ## Key Types
//!
//! ### Identifiers
//! - [`ChannelId`], [`VideoId`], [`PlaylistId`] - Opaque, compared by value
//!
//! ### Records
//! - [`VideoProperties`] - Static video metadata
//! - [`VideoStatistics`] - Live counters for a video
//! - [`ChannelInfo`] - Channel summary row
//! - [`VideoRecord`] - Merged per-video record with a fixed column order
//! - [`TranscriptOutcome`] - Transcript text or a typed absence/failure
//!
//! ### Boundary
//! - [`YouTubeApi`] - The four Data API list operations
//! - [`TranscriptSource`] - Caption text lookup

pub mod error;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Identifiers
    ChannelId,
    PlaylistId,
    VideoId,
    // Responses
    ChannelContentDetails,
    ChannelResource,
    ChannelSnippet,
    ChannelStatisticsResource,
    ListResponse,
    PageInfo,
    Part,
    PlaylistItemContentDetails,
    PlaylistItemResource,
    RelatedPlaylists,
    SearchResultId,
    SearchResultResource,
    SearchSnippet,
    VideoContentDetails,
    VideoResource,
    VideoSnippet,
    VideoStatisticsResource,
    VideoStatus,
    // Video
    License,
    VideoKind,
    VideoProperties,
    VideoStatistics,
    SHORTS_MAX_LENGTH_SECS,
    // Channel
    ChannelInfo,
    RelatedPlaylist,
    // Transcript
    TranscriptOutcome,
    // Records
    PropertiesRow,
    Tabular,
    VideoRecord,
    // Search
    ResultKind,
    SearchOrder,
    SearchQuery,
    // Helpers
    parse_duration,
    NOT_FOUND,
};

// Re-export traits
pub use traits::{TranscriptSource, YouTubeApi};
