//! The channel entity.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::debug;
use ytdata_core::{
    ChannelId, ChannelInfo, ChannelResource, Part, PlaylistId, RelatedPlaylist, VideoId,
    YouTubeApi, NOT_FOUND,
};

use super::video::Video;
use crate::error::CollectError;
use crate::pagination::collect_playlist_video_ids;

/// A channel, identified by id.
///
/// Each attribute is fetched with its own request on first access and
/// kept for the life of the value.
#[derive(Clone)]
pub struct Channel {
    id: ChannelId,
    api: Arc<dyn YouTubeApi>,
    name: OnceCell<String>,
    uploads: OnceCell<PlaylistId>,
    subscribers: OnceCell<Option<u64>>,
}

impl Channel {
    /// Creates a channel handle. No request is made.
    pub fn new(id: ChannelId, api: Arc<dyn YouTubeApi>) -> Self {
        Self {
            id,
            api,
            name: OnceCell::new(),
            uploads: OnceCell::new(),
            subscribers: OnceCell::new(),
        }
    }

    /// Creates a channel whose display name is already known.
    pub fn with_name(id: ChannelId, api: Arc<dyn YouTubeApi>, name: Option<String>) -> Self {
        let mut channel = Self::new(id, api);
        channel.name = OnceCell::new_with(name);
        channel
    }

    /// The channel id.
    pub fn id(&self) -> &ChannelId {
        &self.id
    }

    async fn fetch(&self, part: Part) -> Result<ChannelResource, CollectError> {
        debug!(channel_id = %self.id, part = %part, "Fetching channel");
        self.api
            .fetch_channel(&self.id, &[part])
            .await?
            .into_first()
            .ok_or_else(|| CollectError::not_found("channel", self.id.as_str()))
    }

    /// Display name.
    pub async fn name(&self) -> Result<&str, CollectError> {
        let name = self
            .name
            .get_or_try_init(|| async {
                let resource = self.fetch(Part::Snippet).await?;
                Ok::<_, CollectError>(
                    resource
                        .snippet
                        .and_then(|s| s.title)
                        .unwrap_or_else(|| NOT_FOUND.to_string()),
                )
            })
            .await?;
        Ok(name)
    }

    /// Id of the playlist holding every upload.
    pub async fn uploads_playlist_id(&self) -> Result<&PlaylistId, CollectError> {
        self.uploads
            .get_or_try_init(|| self.playlist_id(RelatedPlaylist::Uploads))
            .await
    }

    /// Looks up one of the channel's related playlists. Not cached.
    pub async fn playlist_id(&self, which: RelatedPlaylist) -> Result<PlaylistId, CollectError> {
        let resource = self.fetch(Part::ContentDetails).await?;
        let related = resource
            .content_details
            .map(|cd| cd.related_playlists)
            .unwrap_or_default();

        let id = match which {
            RelatedPlaylist::Uploads => related.uploads,
            RelatedPlaylist::Likes => related.likes,
        };

        id.filter(|id| !id.is_empty())
            .map(PlaylistId::new)
            .ok_or_else(|| {
                CollectError::not_found(
                    "playlist",
                    format!("{} playlist of channel {}", which.as_str(), self.id),
                )
            })
    }

    /// Subscriber count; `None` when the channel hides it.
    pub async fn subscriber_count(&self) -> Result<Option<u64>, CollectError> {
        let count = self
            .subscribers
            .get_or_try_init(|| async {
                let resource = self.fetch(Part::Statistics).await?;
                match resource.statistics {
                    Some(stats) => Ok::<_, CollectError>(stats.subscribers()?),
                    None => Ok(None),
                }
            })
            .await?;
        Ok(*count)
    }

    /// Id, name, uploads playlist and subscriber count.
    pub async fn info(&self) -> Result<ChannelInfo, CollectError> {
        Ok(ChannelInfo {
            channel_id: self.id.clone(),
            channel_name: self.name().await?.to_string(),
            uploads_playlist_id: self.uploads_playlist_id().await?.clone(),
            subscriber_count: self.subscriber_count().await?,
        })
    }

    /// Ids of up to `count` most recent uploads.
    pub async fn video_ids(&self, count: usize) -> Result<Vec<VideoId>, CollectError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let uploads = self.uploads_playlist_id().await?;
        collect_playlist_video_ids(self.api.as_ref(), uploads, count).await
    }

    /// Up to `count` most recent uploads.
    pub async fn videos(&self, count: usize) -> Result<Vec<Video>, CollectError> {
        Ok(self
            .video_ids(count)
            .await?
            .into_iter()
            .map(|id| Video::new(id, Arc::clone(&self.api)))
            .collect())
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel").field("channel_id", &self.id).finish()
    }
}

impl PartialEq for Channel {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Channel {}

impl Hash for Channel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// ============================================================================
// Tests
// ============================================================================
