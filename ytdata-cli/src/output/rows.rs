//! Row types for command output that has no library record.

use serde::Serialize;
use ytdata_core::{ChannelId, ResultKind, Tabular, VideoId};

/// A search hit.
#[derive(Debug, Clone, Serialize)]
pub struct HitRow {
    pub kind: ResultKind,
    pub id: String,
    pub title: String,
    pub channel_id: String,
}

impl Tabular for HitRow {
    fn columns() -> &'static [&'static str] {
        &["kind", "id", "title", "channel_id"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.kind.to_string(),
            self.id.clone(),
            self.title.clone(),
            self.channel_id.clone(),
        ]
    }
}

/// A channel with its display name.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelRow {
    pub channel_id: ChannelId,
    pub channel_name: String,
}

impl Tabular for ChannelRow {
    fn columns() -> &'static [&'static str] {
        &["channel_id", "channel_name"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.channel_id.to_string(), self.channel_name.clone()]
    }
}

/// A bare channel id.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelIdRow {
    pub channel_id: ChannelId,
}

impl Tabular for ChannelIdRow {
    fn columns() -> &'static [&'static str] {
        &["channel_id"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.channel_id.to_string()]
    }
}

/// A bare video id.
#[derive(Debug, Clone, Serialize)]
pub struct VideoIdRow {
    pub video_id: VideoId,
}

impl Tabular for VideoIdRow {
    fn columns() -> &'static [&'static str] {
        &["video_id"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.video_id.to_string()]
    }
}
