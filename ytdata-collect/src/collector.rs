//! Batch collection of per-video data.
//!
//! [`VideoDataCollector`] expands channels or playlists into videos, then
//! fetches the requested field groups for each video one at a time. A
//! failure for one video is counted and logged; it never stops the batch.
//! Only a failure to list a channel's or playlist's videos ends the run.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use ytdata_core::{
    ChannelId, PlaylistId, PropertiesRow, TranscriptSource, VideoId, VideoRecord,
    VideoStatistics, YouTubeApi,
};

use crate::entities::{Channel, Playlist, Video};
use crate::error::CollectError;
use crate::pagination::PAGE_SIZE_CEILING;

/// Default number of videos taken from each channel or playlist.
pub const DEFAULT_MAX_VIDEOS: usize = 5;

// ============================================================================
// Request
// ============================================================================

/// Which field groups to fetch per video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldGroups {
    /// Snippet, duration and status derived properties.
    pub properties: bool,
    /// View, like and comment counters.
    pub statistics: bool,
    /// Caption text.
    pub transcript: bool,
}

impl FieldGroups {
    /// Properties and transcript: data that does not change over time.
    pub fn static_data() -> Self {
        Self {
            properties: true,
            statistics: false,
            transcript: true,
        }
    }

    /// Statistics only: data sampled over time.
    pub fn dynamic_data() -> Self {
        Self {
            properties: false,
            statistics: true,
            transcript: false,
        }
    }

    /// Every group.
    pub fn all() -> Self {
        Self {
            properties: true,
            statistics: true,
            transcript: true,
        }
    }

    /// True when nothing is selected.
    pub fn is_empty(&self) -> bool {
        !(self.properties || self.statistics || self.transcript)
    }
}

/// Where the videos come from. One identifier kind per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectSource {
    /// Most recent uploads of each channel.
    Channels(Vec<ChannelId>),
    /// Exactly these videos.
    Videos(Vec<VideoId>),
    /// First items of each playlist.
    Playlists(Vec<PlaylistId>),
}

impl CollectSource {
    /// Number of identifiers.
    pub fn len(&self) -> usize {
        match self {
            Self::Channels(ids) => ids.len(),
            Self::Videos(ids) => ids.len(),
            Self::Playlists(ids) => ids.len(),
        }
    }

    /// True when there are no identifiers.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Identifier kind, for messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Channels(_) => "channel",
            Self::Videos(_) => "video",
            Self::Playlists(_) => "playlist",
        }
    }
}

/// A collection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectRequest {
    /// Identifiers to start from.
    pub source: CollectSource,
    /// Videos per channel or playlist. Ignored for video ids.
    pub max_videos: usize,
    /// Field groups to fetch.
    pub fields: FieldGroups,
}

impl CollectRequest {
    /// Creates a request with the default video limit.
    pub fn new(source: CollectSource, fields: FieldGroups) -> Self {
        Self {
            source,
            max_videos: DEFAULT_MAX_VIDEOS,
            fields,
        }
    }

    /// Sets the per-source video limit.
    #[must_use]
    pub fn with_max_videos(mut self, max_videos: usize) -> Self {
        self.max_videos = max_videos;
        self
    }

    fn validate(&self, has_transcripts: bool) -> Result<(), CollectError> {
        if self.fields.is_empty() {
            return Err(CollectError::Config("no field group selected".to_string()));
        }
        if self.source.is_empty() {
            return Err(CollectError::Config(format!(
                "at least one {} id is required",
                self.source.kind()
            )));
        }
        if self.fields.transcript && !has_transcripts {
            return Err(CollectError::Config(
                "transcripts requested but no transcript source configured".to_string(),
            ));
        }
        if let CollectSource::Playlists(_) = self.source {
            if self.max_videos > PAGE_SIZE_CEILING as usize {
                return Err(CollectError::Unsupported(format!(
                    "playlist collection is limited to {PAGE_SIZE_CEILING} videos per playlist, got {}",
                    self.max_videos
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Report
// ============================================================================

/// Counters for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionStats {
    /// Videos attempted.
    pub videos_seen: usize,
    /// Videos whose properties could not be fetched.
    pub property_errors: usize,
    /// Videos whose statistics could not be fetched.
    pub statistics_errors: usize,
    /// Transcripts that failed for a transient reason.
    pub transcript_errors: usize,
}

/// Result of a run.
#[derive(Debug, Clone, Default)]
pub struct CollectionReport {
    /// One record per video with at least one group collected, in
    /// traversal order.
    pub records: Vec<VideoRecord>,
    /// Counters.
    pub stats: CollectionStats,
}

impl CollectionReport {
    /// The properties stream: videos whose properties were collected.
    pub fn properties_rows(&self) -> impl Iterator<Item = PropertiesRow<'_>> {
        self.records.iter().filter_map(VideoRecord::properties_row)
    }

    /// The statistics stream: videos whose statistics were collected.
    pub fn statistics_rows(&self) -> impl Iterator<Item = &VideoStatistics> {
        self.records.iter().filter_map(|r| r.statistics.as_ref())
    }

    /// True if any per-video fetch failed.
    pub fn has_errors(&self) -> bool {
        self.stats.property_errors > 0
            || self.stats.statistics_errors > 0
            || self.stats.transcript_errors > 0
    }
}

// ============================================================================
// Collector
// ============================================================================

/// Runs collection requests against the API boundary.
pub struct VideoDataCollector {
    api: Arc<dyn YouTubeApi>,
    transcripts: Option<Arc<dyn TranscriptSource>>,
}

impl VideoDataCollector {
    /// Creates a collector. Without a transcript source, requests that
    /// include transcripts are rejected.
    pub fn new(api: Arc<dyn YouTubeApi>, transcripts: Option<Arc<dyn TranscriptSource>>) -> Self {
        Self { api, transcripts }
    }

    /// Runs a request.
    ///
    /// Validation errors are returned before any request is made.
    pub async fn collect(&self, request: &CollectRequest) -> Result<CollectionReport, CollectError> {
        request.validate(self.transcripts.is_some())?;

        let date = Utc::now().date_naive();
        let mut report = CollectionReport::default();

        match &request.source {
            CollectSource::Channels(ids) => {
                for id in ids {
                    let channel = Channel::new(id.clone(), Arc::clone(&self.api));
                    let videos = channel.videos(request.max_videos).await?;
                    info!(channel_id = %id, videos = videos.len(), "Collecting channel videos");
                    self.collect_videos(&videos, request.fields, date, &mut report).await;
                }
            }
            CollectSource::Videos(ids) => {
                info!(videos = ids.len(), "Collecting videos");
                let videos: Vec<Video> = ids
                    .iter()
                    .map(|id| Video::new(id.clone(), Arc::clone(&self.api)))
                    .collect();
                self.collect_videos(&videos, request.fields, date, &mut report).await;
            }
            CollectSource::Playlists(ids) => {
                for id in ids {
                    let playlist = Playlist::new(id.clone(), Arc::clone(&self.api));
                    let videos = playlist.videos(request.max_videos).await?;
                    info!(playlist_id = %id, videos = videos.len(), "Collecting playlist videos");
                    self.collect_videos(&videos, request.fields, date, &mut report).await;
                }
            }
        }

        info!(
            records = report.records.len(),
            seen = report.stats.videos_seen,
            property_errors = report.stats.property_errors,
            statistics_errors = report.stats.statistics_errors,
            transcript_errors = report.stats.transcript_errors,
            "Collection finished"
        );
        Ok(report)
    }

    async fn collect_videos(
        &self,
        videos: &[Video],
        fields: FieldGroups,
        date: NaiveDate,
        report: &mut CollectionReport,
    ) {
        for video in videos {
            if let Some(record) = self.collect_one(video, fields, date, &mut report.stats).await {
                report.records.push(record);
            }
        }
    }

    /// Fetches the requested groups for one video.
    ///
    /// Returns `None` when every requested data group failed. The
    /// transcript is only looked up for videos that are kept.
    async fn collect_one(
        &self,
        video: &Video,
        fields: FieldGroups,
        date: NaiveDate,
        stats: &mut CollectionStats,
    ) -> Option<VideoRecord> {
        stats.videos_seen += 1;
        let mut record = VideoRecord::new(video.id().clone());

        if fields.properties {
            match video.properties().await {
                Ok(properties) => record.properties = Some(properties.clone()),
                Err(e) => {
                    stats.property_errors += 1;
                    warn!(video_id = %video.id(), error = %e, "Skipping video properties");
                }
            }
        }

        if fields.statistics {
            match video.statistics_on(date).await {
                Ok(statistics) => record.statistics = Some(statistics),
                Err(e) => {
                    stats.statistics_errors += 1;
                    warn!(video_id = %video.id(), error = %e, "Skipping video statistics");
                }
            }
        }

        let data_requested = fields.properties || fields.statistics;
        if data_requested && record.properties.is_none() && record.statistics.is_none() {
            return None;
        }

        if fields.transcript {
            if let Some(source) = &self.transcripts {
                let outcome = video.transcript(source.as_ref()).await;
                if outcome.is_retryable() {
                    stats.transcript_errors += 1;
                    warn!(video_id = %video.id(), outcome = %outcome, "Transcript lookup failed");
                }
                record.transcript = Some(outcome);
            }
        }

        Some(record)
    }

    /// Properties and transcripts of each channel's latest `max_videos`
    /// uploads.
    pub async fn collect_from_channels(
        &self,
        channel_ids: Vec<ChannelId>,
        max_videos: usize,
    ) -> Result<CollectionReport, CollectError> {
        let request = CollectRequest::new(CollectSource::Channels(channel_ids), FieldGroups::static_data())
            .with_max_videos(max_videos);
        self.collect(&request).await
    }

    /// Today's statistics for each video.
    pub async fn collect_from_videos(
        &self,
        video_ids: Vec<VideoId>,
    ) -> Result<CollectionReport, CollectError> {
        let request = CollectRequest::new(CollectSource::Videos(video_ids), FieldGroups::dynamic_data());
        self.collect(&request).await
    }

    /// Properties and transcripts of each playlist's first `max_videos`
    /// items.
    pub async fn collect_from_playlists(
        &self,
        playlist_ids: Vec<PlaylistId>,
        max_videos: usize,
    ) -> Result<CollectionReport, CollectError> {
        let request = CollectRequest::new(CollectSource::Playlists(playlist_ids), FieldGroups::static_data())
            .with_max_videos(max_videos);
        self.collect(&request).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeApi, FakeTranscripts};
    use ytdata_core::{CoreError, Part, Tabular, TranscriptOutcome};

    fn catalog() -> FakeApi {
        FakeApi::new()
            .with_channel("UC1", "Acme", "UU1", Some("10"))
            .with_channel("UC2", "Beta", "UU2", Some("20"))
            .with_playlist("UU1", &["a1", "a2", "a3"])
            .with_playlist("UU2", &["b1", "b2"])
            .with_video("a1", "UC1", "PT30S")
            .with_video("a2", "UC1", "PT10M")
            .with_video("a3", "UC1", "PT1H")
            .with_video("b1", "UC2", "PT59S")
            .with_video("b2", "UC2", "PT2M")
    }

    fn collector(api: Arc<FakeApi>, transcripts: Option<Arc<FakeTranscripts>>) -> VideoDataCollector {
        VideoDataCollector::new(
            api,
            transcripts.map(|t| t as Arc<dyn TranscriptSource>),
        )
    }

    fn ids(report: &CollectionReport) -> Vec<&str> {
        report.records.iter().map(|r| r.video_id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_channels_static_data() {
        let api = catalog().into_arc();
        let transcripts = Arc::new(
            FakeTranscripts::default().with("a1", TranscriptOutcome::Text("hello".into())),
        );
        let report = collector(api.clone(), Some(transcripts.clone()))
            .collect_from_channels(vec![ChannelId::new("UC1"), ChannelId::new("UC2")], 2)
            .await
            .unwrap();

        assert_eq!(ids(&report), vec!["a1", "a2", "b1", "b2"]);
        assert_eq!(report.stats.videos_seen, 4);
        assert!(!report.has_errors());
        assert_eq!(report.properties_rows().count(), 4);
        assert_eq!(report.statistics_rows().count(), 0);
        assert_eq!(transcripts.call_count(), 4);

        let first = report.properties_rows().next().unwrap().row();
        assert_eq!(first.last().map(String::as_str), Some("hello"));
        let second = &report.records[1];
        assert_eq!(second.transcript, Some(TranscriptOutcome::NotFound));
    }

    #[tokio::test]
    async fn test_videos_dynamic_data() {
        let api = catalog().into_arc();
        let report = collector(api.clone(), None)
            .collect_from_videos(vec![VideoId::new("a1"), VideoId::new("b2")])
            .await
            .unwrap();

        assert_eq!(report.statistics_rows().count(), 2);
        assert_eq!(report.properties_rows().count(), 0);
        let date = Utc::now().date_naive();
        assert!(report.statistics_rows().all(|s| s.date == date));
        assert_eq!(api.call_count(), 2);
    }

    #[tokio::test]
    async fn test_property_failure_drops_video_from_properties_stream_only() {
        let api = catalog().failing_video("a2", Part::Snippet).into_arc();
        let request = CollectRequest::new(
            CollectSource::Videos(vec![VideoId::new("a1"), VideoId::new("a2"), VideoId::new("a3")]),
            FieldGroups { properties: true, statistics: true, transcript: false },
        );
        let report = collector(api, None).collect(&request).await.unwrap();

        assert_eq!(report.stats.property_errors, 1);
        assert_eq!(report.stats.statistics_errors, 0);
        assert!(report.has_errors());
        let with_props: Vec<&str> = report
            .properties_rows()
            .map(|r| r.properties.video_id.as_str())
            .collect();
        assert_eq!(with_props, vec!["a1", "a3"]);
        assert_eq!(report.statistics_rows().count(), 3);
    }

    #[tokio::test]
    async fn test_statistics_failure_counted() {
        let api = catalog().failing_video("b1", Part::Statistics).into_arc();
        let report = collector(api, None)
            .collect_from_videos(vec![VideoId::new("b1"), VideoId::new("b2")])
            .await
            .unwrap();

        assert_eq!(report.stats.statistics_errors, 1);
        assert_eq!(ids(&report), vec!["b2"]);
    }

    #[tokio::test]
    async fn test_failed_video_skips_transcript() {
        let api = catalog().failing_video("a1", Part::Snippet).into_arc();
        let transcripts = Arc::new(FakeTranscripts::default());
        let report = collector(api, Some(transcripts.clone()))
            .collect(&CollectRequest::new(
                CollectSource::Videos(vec![VideoId::new("a1"), VideoId::new("a2")]),
                FieldGroups::static_data(),
            ))
            .await
            .unwrap();

        assert_eq!(ids(&report), vec!["a2"]);
        assert_eq!(report.stats.videos_seen, 2);
        assert_eq!(report.stats.property_errors, 1);
        assert_eq!(transcripts.call_count(), 1);
    }

    #[tokio::test]
    async fn test_transient_transcript_counted_permanent_not() {
        let api = catalog().into_arc();
        let transcripts = Arc::new(
            FakeTranscripts::default()
                .with("a1", TranscriptOutcome::TransientError("429".into()))
                .with("a2", TranscriptOutcome::Disabled),
        );
        let request = CollectRequest::new(
            CollectSource::Videos(vec![VideoId::new("a1"), VideoId::new("a2")]),
            FieldGroups { properties: false, statistics: false, transcript: true },
        );
        let report = collector(api.clone(), Some(transcripts)).collect(&request).await.unwrap();

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.stats.transcript_errors, 1);
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_disabled_transcript_isolated_to_its_video() {
        let videos = ["v1", "v2", "v3", "v4", "v5"];
        let mut api = FakeApi::new().with_playlist("PL5", &videos);
        let mut transcripts = FakeTranscripts::default();
        for id in videos {
            api = api.with_video(id, "UC1", "PT2M");
            let outcome = if id == "v3" {
                TranscriptOutcome::Disabled
            } else {
                TranscriptOutcome::Text(format!("words of {id}"))
            };
            transcripts = transcripts.with(id, outcome);
        }
        let transcripts = Arc::new(transcripts);

        let report = collector(api.into_arc(), Some(transcripts.clone()))
            .collect_from_playlists(vec![PlaylistId::new("PL5")], 5)
            .await
            .unwrap();

        assert_eq!(ids(&report), videos.to_vec());
        assert_eq!(transcripts.call_count(), 5);
        for row in report.properties_rows() {
            let id = row.properties.video_id.as_str();
            let field = row.row().last().cloned().unwrap();
            if id == "v3" {
                assert_eq!(field, TranscriptOutcome::DISABLED);
                assert_ne!(field, TranscriptOutcome::NOT_FOUND);
            } else {
                assert_eq!(field, format!("words of {id}"));
            }
        }
        assert_eq!(report.stats.transcript_errors, 0);
        assert_eq!(report.stats.property_errors, 0);
        assert!(!report.has_errors());
    }

    #[tokio::test]
    async fn test_validation_happens_before_calls() {
        let api = catalog().into_arc();
        let transcripts = Arc::new(FakeTranscripts::default());
        let c = collector(api.clone(), Some(transcripts));

        let empty = CollectRequest::new(CollectSource::Channels(Vec::new()), FieldGroups::static_data());
        assert!(matches!(c.collect(&empty).await, Err(CollectError::Config(_))));

        let nothing = CollectRequest::new(
            CollectSource::Videos(vec![VideoId::new("a1")]),
            FieldGroups { properties: false, statistics: false, transcript: false },
        );
        assert!(matches!(c.collect(&nothing).await, Err(CollectError::Config(_))));

        let too_many = CollectRequest::new(
            CollectSource::Playlists(vec![PlaylistId::new("UU1")]),
            FieldGroups::static_data(),
        )
        .with_max_videos(51);
        assert!(matches!(c.collect(&too_many).await, Err(CollectError::Unsupported(_))));

        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_transcripts_without_source_rejected() {
        let api = catalog().into_arc();
        let err = collector(api, None)
            .collect_from_channels(vec![ChannelId::new("UC1")], 1)
            .await
            .unwrap_err();
        assert!(err.is_config());
    }

    #[tokio::test]
    async fn test_playlist_traversal_failure_is_fatal() {
        let api = catalog()
            .failing_page("UU2", 1, CoreError::Transport("reset".into()))
            .into_arc();
        let err = collector(api, Some(Arc::new(FakeTranscripts::default())))
            .collect_from_playlists(vec![PlaylistId::new("UU1"), PlaylistId::new("UU2")], 50)
            .await
            .unwrap_err();
        assert!(matches!(err, CollectError::PageFetch { page: 1, .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_playlists_limit_allowed_at_ceiling() {
        let api = catalog().into_arc();
        let report = collector(api, Some(Arc::new(FakeTranscripts::default())))
            .collect_from_playlists(vec![PlaylistId::new("UU2")], 50)
            .await
            .unwrap();
        assert_eq!(ids(&report), vec!["b1", "b2"]);
        assert_eq!(
            report.records[0].properties.as_ref().map(|p| p.kind),
            Some(ytdata_core::VideoKind::Short)
        );
    }
}
