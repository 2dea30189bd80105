//! Channel-derived records.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ChannelId, PlaylistId};

/// One of a channel's system playlists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelatedPlaylist {
    /// Every public upload.
    Uploads,
    /// Liked videos.
    Likes,
}

impl RelatedPlaylist {
    /// Returns the API key of this playlist.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uploads => "uploads",
            Self::Likes => "likes",
        }
    }
}

impl fmt::Display for RelatedPlaylist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary row for a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    /// Channel id.
    pub channel_id: ChannelId,
    /// Display name.
    pub channel_name: String,
    /// Uploads playlist.
    pub uploads_playlist_id: PlaylistId,
    /// Subscriber count, `None` when the owner hides it.
    pub subscriber_count: Option<u64>,
}
