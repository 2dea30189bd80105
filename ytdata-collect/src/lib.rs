// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # ytdata Collect
//!
//! Lazy channel, video and playlist handles, keyword search and batch
//! collection on top of the `ytdata-core` boundary traits.
//!
//! - [`Channel`], [`Video`], [`Playlist`] - fetch attributes on first access
//! - [`pagination`] - playlist traversal across continuation tokens
//! - [`YouTubeSearch`] - keyword search and channel discovery
//! - [`VideoDataCollector`] - per-video fan-out that survives item failures
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use ytdata_collect::{CollectRequest, CollectSource, FieldGroups, VideoDataCollector};
//!
//! let collector = VideoDataCollector::new(api, Some(transcripts));
//! let request = CollectRequest::new(
//!     CollectSource::Channels(vec!["UC_x5XG1OV2P6uZZ5FSM9Ttw".into()]),
//!     FieldGroups::static_data(),
//! )
//! .with_max_videos(10);
//! let report = collector.collect(&request).await?;
//! ```

pub mod collector;
pub mod entities;
pub mod error;
pub mod pagination;
pub mod search;

#[cfg(test)]
mod testing;

pub use collector::{
    CollectRequest, CollectSource, CollectionReport, CollectionStats, FieldGroups,
    VideoDataCollector, DEFAULT_MAX_VIDEOS,
};
pub use entities::{Channel, Playlist, Video};
pub use error::CollectError;
pub use pagination::{collect_playlist_video_ids, fetch_page, PlaylistPage, PAGE_SIZE_CEILING};
pub use search::{ranking_start, ExactMatches, SearchHit, YouTubeSearch, DEFAULT_TIMEFRAME_DAYS};
