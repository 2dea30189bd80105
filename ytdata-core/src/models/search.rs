//! Search query types.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

// ============================================================================
// Result Kind
// ============================================================================

/// Resource type a search is restricted to.
///
/// The API vocabulary has four values; only [`ResultKind::Video`] and
/// [`ResultKind::Channel`] are supported by the collection layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    /// Videos.
    Video,
    /// Channels.
    Channel,
    /// Playlists (not supported).
    Playlist,
    /// Movies (not supported).
    Movie,
}

impl ResultKind {
    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Channel => "channel",
            Self::Playlist => "playlist",
            Self::Movie => "movie",
        }
    }

    /// True for the kinds search results can be mapped to entities for.
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Video | Self::Channel)
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResultKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "video" => Ok(Self::Video),
            "channel" => Ok(Self::Channel),
            "playlist" => Ok(Self::Playlist),
            "movie" => Ok(Self::Movie),
            other => Err(CoreError::InvalidConfig(format!(
                "unknown search type {other:?}; only 'video' and 'channel' are supported"
            ))),
        }
    }
}

// ============================================================================
// Search Order
// ============================================================================

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchOrder {
    /// Highest view count first. The reliable choice for ranking.
    ViewCount,
    /// YouTube's relevance score. Weaker for ranking: it does not track
    /// how well a video actually performs.
    #[default]
    Relevance,
    /// Newest first.
    Date,
}

impl SearchOrder {
    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewCount => "viewCount",
            Self::Relevance => "relevance",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for SearchOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Search Query
// ============================================================================

/// One keyword query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Search term.
    pub keyword: String,
    /// Resource type filter.
    pub kind: ResultKind,
    /// Ordering.
    pub order: SearchOrder,
    /// Page size (the API caps it at 50).
    pub max_results: u32,
    /// Only include resources published after this instant.
    pub published_after: Option<DateTime<Utc>>,
}

impl SearchQuery {
    /// Creates a query with relevance ordering and a single result.
    pub fn new(keyword: impl Into<String>, kind: ResultKind) -> Self {
        Self {
            keyword: keyword.into(),
            kind,
            order: SearchOrder::default(),
            max_results: 1,
            published_after: None,
        }
    }

    /// Sets the ordering.
    #[must_use]
    pub fn order(mut self, order: SearchOrder) -> Self {
        self.order = order;
        self
    }

    /// Sets the page size.
    #[must_use]
    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    /// Sets the publication cutoff.
    #[must_use]
    pub fn published_after(mut self, cutoff: Option<DateTime<Utc>>) -> Self {
        self.published_after = cutoff;
        self
    }

    /// The cutoff formatted the way the API expects (`2024-01-31T00:00:00Z`).
    pub fn published_after_param(&self) -> Option<String> {
        self.published_after
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}
