//! Keyword search and channel discovery.
//!
//! A [`YouTubeSearch`] runs one query per keyword, strictly in order, and
//! turns each hit into an entity. Titles and owners from the result
//! snippets are handed to the entities so reading them costs no request.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info, warn};
use ytdata_core::{
    ChannelId, ResultKind, SearchOrder, SearchQuery, SearchResultResource, VideoId, YouTubeApi,
};

use crate::entities::{Channel, Video};
use crate::error::CollectError;

/// Default look-back window for channel ranking, in days.
pub const DEFAULT_TIMEFRAME_DAYS: u32 = 30;

// ============================================================================
// Hits
// ============================================================================

/// One search result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SearchHit {
    /// A video result.
    Video(Video),
    /// A channel result.
    Channel(Channel),
}

impl SearchHit {
    /// Result kind.
    pub fn kind(&self) -> ResultKind {
        match self {
            Self::Video(_) => ResultKind::Video,
            Self::Channel(_) => ResultKind::Channel,
        }
    }

    /// Raw id of the result.
    pub fn id(&self) -> &str {
        match self {
            Self::Video(v) => v.id().as_str(),
            Self::Channel(c) => c.id().as_str(),
        }
    }

    /// The channel, for channel hits.
    pub fn into_channel(self) -> Option<Channel> {
        match self {
            Self::Channel(c) => Some(c),
            Self::Video(_) => None,
        }
    }

    /// The video, for video hits.
    pub fn into_video(self) -> Option<Video> {
        match self {
            Self::Video(v) => Some(v),
            Self::Channel(_) => None,
        }
    }
}

/// Result of an exact-name channel lookup.
#[derive(Debug, Clone, Default)]
pub struct ExactMatches {
    /// Channels whose name equals a keyword, in keyword order.
    pub channels: Vec<Channel>,
    /// Keywords with no exactly named channel.
    pub not_found: Vec<String>,
}

/// Start of the ranking window: `days` before `now`.
///
/// A window reaching past the earliest representable instant is
/// rejected.
pub fn ranking_start(now: DateTime<Utc>, days: u32) -> Result<DateTime<Utc>, CollectError> {
    TimeDelta::try_days(i64::from(days))
        .and_then(|window| now.checked_sub_signed(window))
        .ok_or_else(|| CollectError::Config(format!("timeframe of {days} days is out of range")))
}

/// Search snippets come HTML-escaped.
fn unescape_snippet(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

// ============================================================================
// Search
// ============================================================================

/// Keyword search over the Data API.
pub struct YouTubeSearch {
    api: Arc<dyn YouTubeApi>,
    keywords: Vec<String>,
}

impl YouTubeSearch {
    /// Creates a search over `keywords`, which must not be empty.
    pub fn new(api: Arc<dyn YouTubeApi>, keywords: Vec<String>) -> Result<Self, CollectError> {
        if keywords.is_empty() {
            return Err(CollectError::Config("at least one keyword is required".to_string()));
        }
        Ok(Self { api, keywords })
    }

    /// The keywords, in query order.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn to_hit(&self, kind: ResultKind, item: SearchResultResource) -> Option<SearchHit> {
        let snippet = item.snippet.unwrap_or_default();
        let title = snippet.title.as_deref().map(unescape_snippet);

        match kind {
            ResultKind::Video => item.id.video_id.map(|id| {
                SearchHit::Video(Video::with_snippet(
                    VideoId::new(id),
                    Arc::clone(&self.api),
                    title,
                    snippet.channel_id.map(ChannelId::new),
                ))
            }),
            ResultKind::Channel => item.id.channel_id.map(|id| {
                SearchHit::Channel(Channel::with_name(ChannelId::new(id), Arc::clone(&self.api), title))
            }),
            ResultKind::Playlist | ResultKind::Movie => None,
        }
    }

    async fn query(&self, query: &SearchQuery) -> Result<Vec<SearchHit>, CollectError> {
        let response = self.api.search(query).await?;
        let total = response.items.len();
        let hits: Vec<SearchHit> = response
            .items
            .into_iter()
            .filter_map(|item| self.to_hit(query.kind, item))
            .collect();

        if hits.len() < total {
            warn!(
                keyword = %query.keyword,
                skipped = total - hits.len(),
                "Search results without an id of the requested kind"
            );
        }
        debug!(keyword = %query.keyword, kind = %query.kind, hits = hits.len(), "Search done");
        Ok(hits)
    }

    /// Runs one query per keyword and concatenates the hits in keyword
    /// order.
    ///
    /// Only video and channel searches are supported; other kinds fail
    /// before any request.
    pub async fn execute(
        &self,
        kind: ResultKind,
        max_results: u32,
        published_after: Option<DateTime<Utc>>,
        order: SearchOrder,
    ) -> Result<Vec<SearchHit>, CollectError> {
        if !kind.is_supported() {
            return Err(CollectError::Unsupported(format!(
                "searching for {kind} results is not implemented"
            )));
        }

        let mut hits = Vec::new();
        for keyword in &self.keywords {
            let query = SearchQuery::new(keyword.clone(), kind)
                .order(order)
                .max_results(max_results)
                .published_after(published_after);
            hits.extend(self.query(&query).await?);
        }

        info!(keywords = self.keywords.len(), kind = %kind, hits = hits.len(), "Search finished");
        Ok(hits)
    }

    /// Finds, for each keyword, a channel whose name equals it ignoring
    /// case.
    ///
    /// Only the top channel result of each keyword is considered. Keywords
    /// without a match are reported, not treated as errors.
    pub async fn collect_exact_terms(&self) -> Result<ExactMatches, CollectError> {
        let mut matches = ExactMatches::default();

        for keyword in &self.keywords {
            let query = SearchQuery::new(keyword.clone(), ResultKind::Channel);
            let top = self
                .query(&query)
                .await?
                .into_iter()
                .find_map(SearchHit::into_channel);

            let Some(channel) = top else {
                matches.not_found.push(keyword.clone());
                continue;
            };

            if channel.name().await?.to_lowercase() == keyword.to_lowercase() {
                matches.channels.push(channel);
            } else {
                matches.not_found.push(keyword.clone());
            }
        }

        if !matches.not_found.is_empty() {
            warn!(keywords = ?matches.not_found, "Some keywords matched no channel name exactly");
        }
        Ok(matches)
    }

    /// Channels behind the best-performing recent videos.
    ///
    /// Searches videos published in the last `timeframe_days` days and
    /// maps each to its owner. With `only_unique`, repeated channels are
    /// dropped, keeping the first occurrence. [`SearchOrder::ViewCount`]
    /// is the meaningful order here; relevance does not reflect how well a
    /// video performs.
    pub async fn collect_best_ranking_channels(
        &self,
        max_results: u32,
        timeframe_days: u32,
        order: SearchOrder,
        only_unique: bool,
    ) -> Result<Vec<Channel>, CollectError> {
        let cutoff = ranking_start(Utc::now(), timeframe_days)?;
        let hits = self
            .execute(ResultKind::Video, max_results, Some(cutoff), order)
            .await?;

        let mut channels = Vec::with_capacity(hits.len());
        let mut seen = HashSet::new();
        for video in hits.into_iter().filter_map(SearchHit::into_video) {
            let owner = video.channel_id().await?;
            if only_unique && !seen.insert(owner.clone()) {
                continue;
            }
            channels.push(Channel::new(owner, Arc::clone(&self.api)));
        }

        Ok(channels)
    }
}

// ============================================================================
// Tests
// ============================================================================
