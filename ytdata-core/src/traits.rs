//! Trait definitions for ytdata.
//!
//! These are the seams between the collection layer and the outside
//! world. The HTTP implementations live in `ytdata-fetch`; tests plug in
//! in-memory fakes.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::{
    ChannelId, ChannelResource, ListResponse, Part, PlaylistId, PlaylistItemResource,
    SearchQuery, SearchResultResource, TranscriptOutcome, VideoId, VideoResource,
};

/// The four Data API list operations ytdata consumes.
///
/// Implementors own authentication. Responses are returned as documents;
/// interpreting them (and defaulting absent fields) is the caller's job.
#[async_trait]
pub trait YouTubeApi: Send + Sync {
    /// `videos.list` for a single id.
    async fn fetch_video(
        &self,
        id: &VideoId,
        parts: &[Part],
    ) -> Result<ListResponse<VideoResource>, CoreError>;

    /// `channels.list` for a single id.
    async fn fetch_channel(
        &self,
        id: &ChannelId,
        parts: &[Part],
    ) -> Result<ListResponse<ChannelResource>, CoreError>;

    /// `search.list` for one keyword.
    async fn search(
        &self,
        query: &SearchQuery,
    ) -> Result<ListResponse<SearchResultResource>, CoreError>;

    /// One page of `playlistItems.list` (`contentDetails` part).
    ///
    /// `page_token` is the `nextPageToken` of the previous page.
    async fn fetch_playlist_page(
        &self,
        id: &PlaylistId,
        max_results: u32,
        page_token: Option<&str>,
    ) -> Result<ListResponse<PlaylistItemResource>, CoreError>;
}

/// Looks up caption text for a video.
///
/// Never fails: every way of not getting a transcript is a
/// [`TranscriptOutcome`] variant.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetches the transcript of a video.
    async fn fetch_transcript(&self, id: &VideoId) -> TranscriptOutcome;
}
