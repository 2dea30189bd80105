//! Data API v3 response documents.
//!
//! Only the fields ytdata reads are modelled. Everything below the list
//! envelope is optional: the API omits parts that were not requested and
//! fields the owner chose to hide, and a missing field must default rather
//! than fail the whole response.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::video::parse_counter;
use crate::error::CoreError;

// ============================================================================
// Parts
// ============================================================================

/// A resource part selector (the `part` query parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Part {
    /// Basic details: titles, owner, publication date, tags.
    Snippet,
    /// Duration for videos, related playlists for channels, video id for
    /// playlist items.
    ContentDetails,
    /// Upload/licensing status.
    Status,
    /// Counters.
    Statistics,
}

impl Part {
    /// Returns the wire name of this part.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Snippet => "snippet",
            Self::ContentDetails => "contentDetails",
            Self::Status => "status",
            Self::Statistics => "statistics",
        }
    }

    /// Joins parts into the comma-separated `part` parameter.
    pub fn join(parts: &[Part]) -> String {
        parts
            .iter()
            .map(Part::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// List envelope
// ============================================================================

/// The envelope shared by every `*.list` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    /// Returned resources.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,

    /// Continuation token for the next page, if any.
    #[serde(default)]
    pub next_page_token: Option<String>,

    /// Paging totals.
    #[serde(default)]
    pub page_info: Option<PageInfo>,
}

impl<T> ListResponse<T> {
    /// Builds a response from items, without continuation.
    pub fn from_items(items: Vec<T>) -> Self {
        Self {
            items,
            next_page_token: None,
            page_info: None,
        }
    }

    /// Sets the continuation token.
    #[must_use]
    pub fn with_next_page_token(mut self, token: impl Into<String>) -> Self {
        self.next_page_token = Some(token.into());
        self
    }

    /// Returns the first item, if any.
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    /// Consumes the response and returns the first item, if any.
    pub fn into_first(self) -> Option<T> {
        self.items.into_iter().next()
    }
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self::from_items(Vec::new())
    }
}

/// Paging totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Total results available (approximate for search).
    #[serde(default)]
    pub total_results: Option<u64>,

    /// Results included in this page.
    #[serde(default)]
    pub results_per_page: Option<u32>,
}

// ============================================================================
// Videos
// ============================================================================

/// A `videos` resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResource {
    /// Video id.
    #[serde(default)]
    pub id: String,

    /// Snippet part.
    #[serde(default)]
    pub snippet: Option<VideoSnippet>,

    /// Content details part.
    #[serde(default)]
    pub content_details: Option<VideoContentDetails>,

    /// Status part.
    #[serde(default)]
    pub status: Option<VideoStatus>,

    /// Statistics part.
    #[serde(default)]
    pub statistics: Option<VideoStatisticsResource>,
}

/// Video snippet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    /// Video title.
    #[serde(default)]
    pub title: Option<String>,
    /// Owning channel id.
    #[serde(default)]
    pub channel_id: Option<String>,
    /// Owning channel title.
    #[serde(default)]
    pub channel_title: Option<String>,
    /// Category id.
    #[serde(default)]
    pub category_id: Option<String>,
    /// RFC 3339 publication timestamp.
    #[serde(default)]
    pub published_at: Option<String>,
    /// Uploader tags.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Description text.
    #[serde(default)]
    pub description: Option<String>,
}

/// Video content details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoContentDetails {
    /// ISO 8601 duration token (`PT1H2M3S`).
    #[serde(default)]
    pub duration: Option<String>,
}

/// Video status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatus {
    /// `youtube` or `creativeCommon`.
    #[serde(default)]
    pub license: Option<String>,
    /// Made-for-kids designation.
    #[serde(default)]
    pub made_for_kids: Option<bool>,
}

/// Video statistics. The API encodes counters as decimal strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatisticsResource {
    /// View count.
    #[serde(default)]
    pub view_count: Option<String>,
    /// Like count (absent when hidden).
    #[serde(default)]
    pub like_count: Option<String>,
    /// Comment count (absent when comments are off).
    #[serde(default)]
    pub comment_count: Option<String>,
}

// ============================================================================
// Channels
// ============================================================================

/// A `channels` resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelResource {
    /// Channel id.
    #[serde(default)]
    pub id: String,

    /// Snippet part.
    #[serde(default)]
    pub snippet: Option<ChannelSnippet>,

    /// Content details part.
    #[serde(default)]
    pub content_details: Option<ChannelContentDetails>,

    /// Statistics part.
    #[serde(default)]
    pub statistics: Option<ChannelStatisticsResource>,
}

/// Channel snippet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSnippet {
    /// Display name.
    #[serde(default)]
    pub title: Option<String>,
    /// Channel description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Channel content details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelContentDetails {
    /// System playlists owned by the channel.
    #[serde(default)]
    pub related_playlists: RelatedPlaylists,
}

/// System playlists of a channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedPlaylists {
    /// Uploads playlist.
    #[serde(default)]
    pub uploads: Option<String>,
    /// Liked videos playlist (usually private).
    #[serde(default)]
    pub likes: Option<String>,
}

/// Channel statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatisticsResource {
    /// Subscriber count (absent when hidden).
    #[serde(default)]
    pub subscriber_count: Option<String>,
    /// Whether the owner hides the subscriber count.
    #[serde(default)]
    pub hidden_subscriber_count: Option<bool>,
    /// Total channel views.
    #[serde(default)]
    pub view_count: Option<String>,
    /// Public video count.
    #[serde(default)]
    pub video_count: Option<String>,
}

impl ChannelStatisticsResource {
    /// Parsed subscriber count, `None` when hidden.
    pub fn subscribers(&self) -> Result<Option<u64>, CoreError> {
        if self.hidden_subscriber_count == Some(true) {
            return Ok(None);
        }
        parse_counter(self.subscriber_count.as_deref())
    }
}

// ============================================================================
// Search
// ============================================================================

/// A `search` result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultResource {
    /// Typed id of the matched resource.
    #[serde(default)]
    pub id: SearchResultId,

    /// Snippet of the matched resource.
    #[serde(default)]
    pub snippet: Option<SearchSnippet>,
}

/// Typed id of a search result. Exactly one of the id fields is set,
/// depending on `kind`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultId {
    /// `youtube#video`, `youtube#channel`, ...
    #[serde(default)]
    pub kind: Option<String>,
    /// Set for video results.
    #[serde(default)]
    pub video_id: Option<String>,
    /// Set for channel results.
    #[serde(default)]
    pub channel_id: Option<String>,
    /// Set for playlist results.
    #[serde(default)]
    pub playlist_id: Option<String>,
}

/// Search result snippet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSnippet {
    /// Owning channel id (the channel itself for channel results).
    #[serde(default)]
    pub channel_id: Option<String>,
    /// Title of the matched resource.
    #[serde(default)]
    pub title: Option<String>,
    /// Owning channel title.
    #[serde(default)]
    pub channel_title: Option<String>,
    /// RFC 3339 publication timestamp.
    #[serde(default)]
    pub published_at: Option<String>,
}

// ============================================================================
// Playlist items
// ============================================================================

/// A `playlistItems` resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemResource {
    /// Content details part.
    #[serde(default)]
    pub content_details: Option<PlaylistItemContentDetails>,
}

impl PlaylistItemResource {
    /// Convenience constructor for an item pointing at a video.
    pub fn for_video(video_id: impl Into<String>) -> Self {
        Self {
            content_details: Some(PlaylistItemContentDetails {
                video_id: Some(video_id.into()),
            }),
        }
    }

    /// The referenced video id, if present.
    pub fn video_id(&self) -> Option<&str> {
        self.content_details
            .as_ref()
            .and_then(|cd| cd.video_id.as_deref())
    }
}

/// Playlist item content details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemContentDetails {
    /// The referenced video.
    #[serde(default)]
    pub video_id: Option<String>,
}
