//! The playlist entity.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use ytdata_core::{PlaylistId, VideoId, YouTubeApi};

use super::video::Video;
use crate::error::CollectError;
use crate::pagination::{collect_playlist_video_ids, fetch_page, PlaylistPage, PAGE_SIZE_CEILING};

/// A playlist, identified by id. Holds no cached state.
#[derive(Clone)]
pub struct Playlist {
    id: PlaylistId,
    api: Arc<dyn YouTubeApi>,
}

impl Playlist {
    /// Creates a playlist handle. No request is made.
    pub fn new(id: PlaylistId, api: Arc<dyn YouTubeApi>) -> Self {
        Self { id, api }
    }

    /// The playlist id.
    pub fn id(&self) -> &PlaylistId {
        &self.id
    }

    /// One page of at most `max_results` (1 to 50) items, continuing from
    /// `page_token`.
    ///
    /// Failures map like any single lookup; only full traversals report
    /// [`CollectError::PageFetch`] with a page number.
    pub async fn page(
        &self,
        max_results: u32,
        page_token: Option<&str>,
    ) -> Result<PlaylistPage, CollectError> {
        if max_results == 0 || max_results > PAGE_SIZE_CEILING {
            return Err(CollectError::Config(format!(
                "page size must be between 1 and {PAGE_SIZE_CEILING}, got {max_results}"
            )));
        }
        Ok(fetch_page(self.api.as_ref(), &self.id, max_results, page_token).await?)
    }

    /// Ids of the first `count` items.
    pub async fn video_ids(&self, count: usize) -> Result<Vec<VideoId>, CollectError> {
        collect_playlist_video_ids(self.api.as_ref(), &self.id, count).await
    }

    /// The first `count` items as videos.
    pub async fn videos(&self, count: usize) -> Result<Vec<Video>, CollectError> {
        Ok(self
            .video_ids(count)
            .await?
            .into_iter()
            .map(|id| Video::new(id, Arc::clone(&self.api)))
            .collect())
    }
}

impl fmt::Debug for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Playlist").field("playlist_id", &self.id).finish()
    }
}

impl PartialEq for Playlist {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Playlist {}

impl Hash for Playlist {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
