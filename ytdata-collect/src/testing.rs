//! In-memory boundary fakes for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ytdata_core::{
    ChannelContentDetails, ChannelId, ChannelResource, ChannelSnippet, ChannelStatisticsResource,
    CoreError, ListResponse, Part, PlaylistId, PlaylistItemResource, RelatedPlaylists, ResultKind,
    SearchQuery, SearchResultId, SearchResultResource, SearchSnippet, TranscriptOutcome,
    TranscriptSource, VideoContentDetails, VideoId, VideoResource, VideoSnippet,
    VideoStatisticsResource, VideoStatus, YouTubeApi,
};

/// One recorded boundary call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Video(String, Vec<Part>),
    Channel(String, Vec<Part>),
    Search(String, ResultKind),
    Page {
        playlist: String,
        max_results: u32,
        token: Option<String>,
    },
}

/// Scripted [`YouTubeApi`] that records every call.
///
/// Playlists are sliced into pages by the requested size; page tokens are
/// the offset of the next item. An empty id stands for an item without a
/// video id (deleted or private).
#[derive(Default)]
pub(crate) struct FakeApi {
    videos: HashMap<String, VideoResource>,
    channels: HashMap<String, ChannelResource>,
    playlists: HashMap<String, Vec<String>>,
    dangling_tokens: HashSet<String>,
    searches: HashMap<(String, ResultKind), Vec<SearchResultResource>>,
    video_failures: HashMap<String, Part>,
    page_failures: HashMap<(String, usize), CoreError>,
    calls: Mutex<Vec<Call>>,
}

pub(crate) fn video_resource(id: &str, channel_id: &str, duration: &str) -> VideoResource {
    VideoResource {
        id: id.to_string(),
        snippet: Some(VideoSnippet {
            title: Some(format!("Video {id}")),
            channel_id: Some(channel_id.to_string()),
            channel_title: Some(format!("Channel {channel_id}")),
            category_id: Some("22".to_string()),
            published_at: Some("2024-03-01T10:00:00Z".to_string()),
            tags: Some(vec!["tag".to_string()]),
            description: Some(String::new()),
        }),
        content_details: Some(VideoContentDetails {
            duration: Some(duration.to_string()),
        }),
        status: Some(VideoStatus {
            license: Some("youtube".to_string()),
            made_for_kids: Some(false),
        }),
        statistics: Some(VideoStatisticsResource {
            view_count: Some("100".to_string()),
            like_count: Some("10".to_string()),
            comment_count: None,
        }),
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_video(mut self, id: &str, channel_id: &str, duration: &str) -> Self {
        self.videos
            .insert(id.to_string(), video_resource(id, channel_id, duration));
        self
    }

    pub fn with_channel(mut self, id: &str, title: &str, uploads: &str, subscribers: Option<&str>) -> Self {
        self.channels.insert(
            id.to_string(),
            ChannelResource {
                id: id.to_string(),
                snippet: Some(ChannelSnippet {
                    title: Some(title.to_string()),
                    description: None,
                }),
                content_details: Some(ChannelContentDetails {
                    related_playlists: RelatedPlaylists {
                        uploads: Some(uploads.to_string()),
                        likes: None,
                    },
                }),
                statistics: Some(ChannelStatisticsResource {
                    subscriber_count: subscribers.map(str::to_string),
                    hidden_subscriber_count: Some(subscribers.is_none()),
                    view_count: None,
                    video_count: None,
                }),
            },
        );
        self
    }

    pub fn with_playlist(mut self, id: &str, video_ids: &[&str]) -> Self {
        self.playlists.insert(
            id.to_string(),
            video_ids.iter().map(|v| (*v).to_string()).collect(),
        );
        self
    }

    /// The last page of this playlist still carries a token, and the page
    /// after it is empty.
    pub fn with_dangling_token(mut self, id: &str) -> Self {
        self.dangling_tokens.insert(id.to_string());
        self
    }

    pub fn with_search(mut self, keyword: &str, kind: ResultKind, hits: Vec<SearchResultResource>) -> Self {
        self.searches.insert((keyword.to_string(), kind), hits);
        self
    }

    /// Requests for this video that include `part` fail.
    pub fn failing_video(mut self, id: &str, part: Part) -> Self {
        self.video_failures.insert(id.to_string(), part);
        self
    }

    /// The given 1-based page of a playlist fails.
    pub fn failing_page(mut self, playlist: &str, page: usize, err: CoreError) -> Self {
        self.page_failures.insert((playlist.to_string(), page), err);
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn pages_requested(&self, playlist: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, Call::Page { playlist: p, .. } if p == playlist))
            .count()
    }
}

pub(crate) fn channel_hit(channel_id: &str, title: &str) -> SearchResultResource {
    SearchResultResource {
        id: SearchResultId {
            kind: Some("youtube#channel".to_string()),
            video_id: None,
            channel_id: Some(channel_id.to_string()),
            playlist_id: None,
        },
        snippet: Some(SearchSnippet {
            channel_id: Some(channel_id.to_string()),
            title: Some(title.to_string()),
            channel_title: Some(title.to_string()),
            published_at: None,
        }),
    }
}

pub(crate) fn video_hit(video_id: &str, channel_id: &str) -> SearchResultResource {
    SearchResultResource {
        id: SearchResultId {
            kind: Some("youtube#video".to_string()),
            video_id: Some(video_id.to_string()),
            channel_id: None,
            playlist_id: None,
        },
        snippet: Some(SearchSnippet {
            channel_id: Some(channel_id.to_string()),
            title: Some(format!("Video {video_id}")),
            channel_title: None,
            published_at: Some("2024-03-01T10:00:00Z".to_string()),
        }),
    }
}

#[async_trait]
impl YouTubeApi for FakeApi {
    async fn fetch_video(
        &self,
        id: &VideoId,
        parts: &[Part],
    ) -> Result<ListResponse<VideoResource>, CoreError> {
        self.record(Call::Video(id.to_string(), parts.to_vec()));
        if let Some(part) = self.video_failures.get(id.as_str()) {
            if parts.contains(part) {
                return Err(CoreError::Transport(format!("{part} failed for {id}")));
            }
        }
        Ok(ListResponse::from_items(
            self.videos.get(id.as_str()).cloned().into_iter().collect(),
        ))
    }

    async fn fetch_channel(
        &self,
        id: &ChannelId,
        parts: &[Part],
    ) -> Result<ListResponse<ChannelResource>, CoreError> {
        self.record(Call::Channel(id.to_string(), parts.to_vec()));
        Ok(ListResponse::from_items(
            self.channels.get(id.as_str()).cloned().into_iter().collect(),
        ))
    }

    async fn search(
        &self,
        query: &SearchQuery,
    ) -> Result<ListResponse<SearchResultResource>, CoreError> {
        self.record(Call::Search(query.keyword.clone(), query.kind));
        let hits = self
            .searches
            .get(&(query.keyword.clone(), query.kind))
            .cloned()
            .unwrap_or_default();
        let limit = usize::try_from(query.max_results).unwrap_or(usize::MAX);
        Ok(ListResponse::from_items(hits.into_iter().take(limit).collect()))
    }

    async fn fetch_playlist_page(
        &self,
        id: &PlaylistId,
        max_results: u32,
        page_token: Option<&str>,
    ) -> Result<ListResponse<PlaylistItemResource>, CoreError> {
        let page = self.pages_requested(id.as_str()) + 1;
        self.record(Call::Page {
            playlist: id.to_string(),
            max_results,
            token: page_token.map(str::to_string),
        });

        if let Some(err) = self.page_failures.get(&(id.to_string(), page)) {
            return Err(match err {
                CoreError::Transport(msg) => CoreError::Transport(msg.clone()),
                CoreError::QuotaExceeded => CoreError::QuotaExceeded,
                other => CoreError::Api(other.to_string()),
            });
        }

        let Some(items) = self.playlists.get(id.as_str()) else {
            return Err(CoreError::not_found("playlist", id.as_str()));
        };

        let offset: usize = page_token.and_then(|t| t.parse().ok()).unwrap_or(0);
        let size = usize::try_from(max_results).unwrap_or(usize::MAX);
        let end = (offset + size).min(items.len());
        let slice: Vec<_> = items
            .get(offset..end)
            .unwrap_or_default()
            .iter()
            .map(|video| match video.as_str() {
                "" => PlaylistItemResource { content_details: None },
                video => PlaylistItemResource::for_video(video),
            })
            .collect();

        let mut response = ListResponse::from_items(slice);
        if end < items.len() || (self.dangling_tokens.contains(id.as_str()) && offset < items.len()) {
            response = response.with_next_page_token(end.to_string());
        }
        Ok(response)
    }
}

/// Transcript source answering from a fixed table; unknown videos are
/// [`TranscriptOutcome::NotFound`].
#[derive(Default)]
pub(crate) struct FakeTranscripts {
    outcomes: HashMap<String, TranscriptOutcome>,
    calls: Mutex<usize>,
}

impl FakeTranscripts {
    pub fn with(mut self, id: &str, outcome: TranscriptOutcome) -> Self {
        self.outcomes.insert(id.to_string(), outcome);
        self
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl TranscriptSource for FakeTranscripts {
    async fn fetch_transcript(&self, id: &VideoId) -> TranscriptOutcome {
        *self.calls.lock().unwrap() += 1;
        self.outcomes
            .get(id.transcript_key())
            .cloned()
            .unwrap_or(TranscriptOutcome::NotFound)
    }
}
