//! The video entity.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tokio::sync::OnceCell;
use tracing::debug;
use ytdata_core::{
    ChannelId, Part, TranscriptOutcome, TranscriptSource, VideoId, VideoKind, VideoProperties,
    VideoRecord, VideoResource, VideoStatistics, YouTubeApi,
};

use crate::error::CollectError;

const PROPERTY_PARTS: [Part; 3] = [Part::Snippet, Part::ContentDetails, Part::Status];
const STATISTICS_PARTS: [Part; 1] = [Part::Statistics];

/// A video, identified by id.
///
/// Properties are fetched on first access and kept; statistics are fetched
/// fresh on every call. Two videos are equal when their ids are.
#[derive(Clone)]
pub struct Video {
    id: VideoId,
    api: Arc<dyn YouTubeApi>,
    properties: OnceCell<VideoProperties>,
    title: OnceCell<String>,
    owner: OnceCell<ChannelId>,
}

impl Video {
    /// Creates a video handle. No request is made.
    pub fn new(id: VideoId, api: Arc<dyn YouTubeApi>) -> Self {
        Self {
            id,
            api,
            properties: OnceCell::new(),
            title: OnceCell::new(),
            owner: OnceCell::new(),
        }
    }

    /// Creates a video whose title and owner are already known, as search
    /// results report them.
    pub fn with_snippet(
        id: VideoId,
        api: Arc<dyn YouTubeApi>,
        title: Option<String>,
        owner: Option<ChannelId>,
    ) -> Self {
        let mut video = Self::new(id, api);
        video.title = OnceCell::new_with(title);
        video.owner = OnceCell::new_with(owner);
        video
    }

    /// The video id.
    pub fn id(&self) -> &VideoId {
        &self.id
    }

    async fn fetch(&self, parts: &[Part]) -> Result<VideoResource, CollectError> {
        let response = self.api.fetch_video(&self.id, parts).await?;
        response
            .into_first()
            .ok_or_else(|| CollectError::not_found("video", self.id.as_str()))
    }

    /// Static properties, fetched once.
    pub async fn properties(&self) -> Result<&VideoProperties, CollectError> {
        self.properties
            .get_or_try_init(|| async {
                debug!(video_id = %self.id, "Fetching video properties");
                let resource = self.fetch(&PROPERTY_PARTS).await?;
                Ok::<_, CollectError>(VideoProperties::from_resource(&self.id, &resource)?)
            })
            .await
    }

    /// Title.
    pub async fn name(&self) -> Result<&str, CollectError> {
        if let Some(title) = self.title.get() {
            return Ok(title);
        }
        Ok(&self.properties().await?.video_name)
    }

    /// Owning channel id.
    pub async fn channel_id(&self) -> Result<ChannelId, CollectError> {
        if let Some(owner) = self.owner.get() {
            return Ok(owner.clone());
        }
        self.properties()
            .await?
            .owner()
            .ok_or_else(|| CollectError::not_found("channel", format!("owner of video {}", self.id)))
    }

    /// Length in seconds.
    pub async fn length(&self) -> Result<u64, CollectError> {
        Ok(self.properties().await?.length)
    }

    /// Short or long form.
    pub async fn kind(&self) -> Result<VideoKind, CollectError> {
        Ok(self.properties().await?.kind)
    }

    /// Current counters, stamped with today's UTC date.
    pub async fn statistics(&self) -> Result<VideoStatistics, CollectError> {
        self.statistics_on(Utc::now().date_naive()).await
    }

    /// Current counters, stamped with `date`.
    pub async fn statistics_on(&self, date: NaiveDate) -> Result<VideoStatistics, CollectError> {
        debug!(video_id = %self.id, "Fetching video statistics");
        let resource = self.fetch(&STATISTICS_PARTS).await?;
        Ok(VideoStatistics::from_resource(&self.id, &resource, date)?)
    }

    /// Transcript text or the reason there is none.
    pub async fn transcript(&self, source: &dyn TranscriptSource) -> TranscriptOutcome {
        source.fetch_transcript(&self.id).await
    }

    /// Properties and current statistics in one record.
    pub async fn data(&self) -> Result<VideoRecord, CollectError> {
        let properties = self.properties().await?.clone();
        let statistics = self.statistics().await?;
        let mut record = VideoRecord::new(self.id.clone());
        record.properties = Some(properties);
        record.statistics = Some(statistics);
        Ok(record)
    }
}

impl fmt::Debug for Video {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Video").field("video_id", &self.id).finish()
    }
}

impl PartialEq for Video {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Video {}

impl Hash for Video {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeApi, FakeTranscripts};
    use std::collections::HashSet;

    fn video(api: &Arc<FakeApi>, id: &str) -> Video {
        Video::new(VideoId::new(id), api.clone())
    }

    #[tokio::test]
    async fn test_properties_fetched_once() {
        let api = FakeApi::new().with_video("v1", "UC1", "PT3M").into_arc();
        let v = video(&api, "v1");

        assert_eq!(v.name().await.unwrap(), "Video v1");
        assert_eq!(v.length().await.unwrap(), 180);
        assert_eq!(v.kind().await.unwrap(), VideoKind::Long);
        assert_eq!(v.channel_id().await.unwrap().as_str(), "UC1");

        assert_eq!(
            api.calls(),
            vec![Call::Video("v1".to_string(), PROPERTY_PARTS.to_vec())]
        );
    }

    #[tokio::test]
    async fn test_statistics_not_memoized() {
        let api = FakeApi::new().with_video("v1", "UC1", "PT30S").into_arc();
        let v = video(&api, "v1");

        let first = v.statistics().await.unwrap();
        v.statistics().await.unwrap();
        assert_eq!(first.views, Some(100));
        assert_eq!(first.comments, 0);
        assert_eq!(api.call_count(), 2);
    }

    #[tokio::test]
    async fn test_missing_video() {
        let api = FakeApi::new().into_arc();
        let err = video(&api, "gone").properties().await.unwrap_err();
        assert!(matches!(err, CollectError::NotFound { kind: "video", .. }));
    }

    #[tokio::test]
    async fn test_failed_properties_retried_on_next_access() {
        let api = FakeApi::new()
            .with_video("v1", "UC1", "PT3M")
            .failing_video("v1", Part::Snippet)
            .into_arc();
        let v = video(&api, "v1");

        assert!(v.properties().await.is_err());
        assert!(v.properties().await.is_err());
        assert_eq!(api.call_count(), 2);
    }

    #[tokio::test]
    async fn test_snippet_avoids_lookup() {
        let api = FakeApi::new().into_arc();
        let v = Video::with_snippet(
            VideoId::new("v9"),
            api.clone(),
            Some("Primed".to_string()),
            Some(ChannelId::new("UC9")),
        );
        assert_eq!(v.name().await.unwrap(), "Primed");
        assert_eq!(v.channel_id().await.unwrap().as_str(), "UC9");
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_data_merges_groups() {
        let api = FakeApi::new().with_video("v1", "UC1", "PT45S").into_arc();
        let record = video(&api, "v1").data().await.unwrap();
        assert_eq!(record.properties.unwrap().kind, VideoKind::Short);
        assert_eq!(record.statistics.unwrap().likes, Some(10));
        assert!(record.transcript.is_none());
    }

    #[tokio::test]
    async fn test_transcript_uses_source() {
        let api = FakeApi::new().into_arc();
        let source = FakeTranscripts::default().with("v1", TranscriptOutcome::Disabled);
        let outcome = video(&api, "v1").transcript(&source).await;
        assert_eq!(outcome, TranscriptOutcome::Disabled);
        assert_eq!(api.call_count(), 0);
    }

    #[test]
    fn test_equality_by_id() {
        let api = FakeApi::new().into_arc();
        let set: HashSet<Video> = [video(&api, "a"), video(&api, "a"), video(&api, "b")]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
        assert_eq!(format!("{:?}", video(&api, "a")), r#"Video { video_id: VideoId("a") }"#);
    }
}
