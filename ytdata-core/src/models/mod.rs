//! Domain models for ytdata.
//!
//! ## Submodules
//!
//! - [`ids`] - Identifier newtypes
//! - [`response`] - Data API v3 response documents
//! - [`video`] - Video properties, statistics, classification
//! - [`channel`] - Channel info
//! - [`transcript`] - Transcript outcomes
//! - [`record`] - Column-ordered records
//! - [`search`] - Search query types
//! - [`duration`] - Duration token parsing

pub mod channel;
pub mod duration;
pub mod ids;
pub mod record;
pub mod response;
pub mod search;
pub mod transcript;
pub mod video;

// Re-export everything at the models level
pub use channel::{ChannelInfo, RelatedPlaylist};
pub use duration::parse_duration;
pub use ids::{ChannelId, PlaylistId, VideoId};
pub use record::{PropertiesRow, Tabular, VideoRecord};
pub use response::{
    ChannelContentDetails, ChannelResource, ChannelSnippet, ChannelStatisticsResource,
    ListResponse, PageInfo, Part, PlaylistItemContentDetails, PlaylistItemResource,
    RelatedPlaylists, SearchResultId, SearchResultResource, SearchSnippet, VideoContentDetails,
    VideoResource, VideoSnippet, VideoStatisticsResource, VideoStatus,
};
pub use search::{ResultKind, SearchOrder, SearchQuery};
pub use transcript::TranscriptOutcome;
pub use video::{License, VideoKind, VideoProperties, VideoStatistics, NOT_FOUND, SHORTS_MAX_LENGTH_SECS};
