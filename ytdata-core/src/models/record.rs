//! Flat, column-ordered records.
//!
//! Downstream exports depend on a fixed key set and ordering, so every
//! record type lists its columns explicitly instead of relying on map
//! merge semantics.

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use super::channel::ChannelInfo;
use super::ids::VideoId;
use super::transcript::TranscriptOutcome;
use super::video::{display_or_not_found, VideoProperties, VideoStatistics, NOT_FOUND};

/// A record with a fixed, ordered column set.
pub trait Tabular {
    /// Column names in export order.
    fn columns() -> &'static [&'static str];

    /// Cell values in the same order as [`Tabular::columns`].
    fn row(&self) -> Vec<String>;
}

// ============================================================================
// Channel info
// ============================================================================

impl Tabular for ChannelInfo {
    fn columns() -> &'static [&'static str] {
        &["channel_id", "channel_name", "uploads_playlist_id", "subscriber_count"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.channel_id.to_string(),
            self.channel_name.clone(),
            self.uploads_playlist_id.to_string(),
            display_or_not_found(self.subscriber_count),
        ]
    }
}

// ============================================================================
// Statistics
// ============================================================================

impl Tabular for VideoStatistics {
    fn columns() -> &'static [&'static str] {
        &["date", "video_id", "views", "likes", "comments"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.date.to_string(),
            self.video_id.to_string(),
            display_or_not_found(self.views),
            display_or_not_found(self.likes),
            self.comments.to_string(),
        ]
    }
}

// ============================================================================
// Properties (+ transcript)
// ============================================================================

const PROPERTY_COLUMNS: [&str; 12] = [
    "video_id",
    "video_name",
    "channel_id",
    "channel_name",
    "category_id",
    "published_at",
    "video_length",
    "type",
    "license",
    "made_for_kids",
    "user_tags",
    "description",
];

fn property_cells(props: &VideoProperties) -> Vec<String> {
    vec![
        props.video_id.to_string(),
        props.video_name.clone(),
        props.channel_id.clone(),
        props.channel_name.clone(),
        props.category_id.clone(),
        display_or_not_found(props.published_at),
        props.length.to_string(),
        props.kind.to_string(),
        props.license.to_string(),
        display_or_not_found(props.made_for_kids),
        props.user_tags.join("|"),
        props.description.clone(),
    ]
}

/// Properties joined with the transcript field: the static-data export.
#[derive(Debug, Clone, Copy)]
pub struct PropertiesRow<'a> {
    /// Video properties.
    pub properties: &'a VideoProperties,
    /// Transcript outcome, if it was collected.
    pub transcript: Option<&'a TranscriptOutcome>,
}

impl Tabular for PropertiesRow<'_> {
    fn columns() -> &'static [&'static str] {
        &[
            "video_id",
            "video_name",
            "channel_id",
            "channel_name",
            "category_id",
            "published_at",
            "video_length",
            "type",
            "license",
            "made_for_kids",
            "user_tags",
            "description",
            "transcript",
        ]
    }

    fn row(&self) -> Vec<String> {
        let mut cells = property_cells(self.properties);
        cells.push(
            self.transcript
                .map(|t| t.as_field().to_string())
                .unwrap_or_default(),
        );
        cells
    }
}

impl Serialize for PropertiesRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PropertiesRow", 13)?;
        serialize_properties(&mut state, Some(self.properties))?;
        state.serialize_field("transcript", &self.transcript)?;
        state.end()
    }
}

// ============================================================================
// Video record
// ============================================================================

/// Everything collected for one video.
///
/// Each field group is filled independently; a group that was not
/// requested, or whose fetch failed, stays `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoRecord {
    /// Video id.
    pub video_id: VideoId,
    /// Static properties.
    pub properties: Option<VideoProperties>,
    /// Live counters.
    pub statistics: Option<VideoStatistics>,
    /// Transcript outcome.
    pub transcript: Option<TranscriptOutcome>,
}

impl VideoRecord {
    /// Creates an empty record for a video.
    pub fn new(video_id: VideoId) -> Self {
        Self {
            video_id,
            properties: None,
            statistics: None,
            transcript: None,
        }
    }

    /// True when no field group was filled.
    pub fn is_empty(&self) -> bool {
        self.properties.is_none() && self.statistics.is_none() && self.transcript.is_none()
    }

    /// The properties export row, when properties were collected.
    pub fn properties_row(&self) -> Option<PropertiesRow<'_>> {
        self.properties.as_ref().map(|properties| PropertiesRow {
            properties,
            transcript: self.transcript.as_ref(),
        })
    }
}

impl Tabular for VideoRecord {
    fn columns() -> &'static [&'static str] {
        &[
            "video_id",
            "video_name",
            "channel_id",
            "channel_name",
            "category_id",
            "published_at",
            "video_length",
            "type",
            "license",
            "made_for_kids",
            "user_tags",
            "description",
            "date",
            "views",
            "likes",
            "comments",
            "transcript",
        ]
    }

    fn row(&self) -> Vec<String> {
        let mut cells = match &self.properties {
            Some(props) => property_cells(props),
            None => {
                let mut empty = vec![String::new(); PROPERTY_COLUMNS.len()];
                empty[0] = self.video_id.to_string();
                empty
            }
        };

        match &self.statistics {
            Some(stats) => {
                cells.push(stats.date.to_string());
                cells.push(display_or_not_found(stats.views));
                cells.push(display_or_not_found(stats.likes));
                cells.push(stats.comments.to_string());
            }
            None => cells.extend(std::iter::repeat_n(String::new(), 4)),
        }

        cells.push(
            self.transcript
                .as_ref()
                .map(|t| t.as_field().to_string())
                .unwrap_or_default(),
        );
        cells
    }
}

impl Serialize for VideoRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("VideoRecord", 17)?;

        if let Some(props) = &self.properties {
            serialize_properties(&mut state, Some(props))?;
        } else {
            state.serialize_field("video_id", &self.video_id)?;
            serialize_properties_tail(&mut state, None)?;
        }

        let stats = self.statistics.as_ref();
        state.serialize_field("date", &stats.map(|s| s.date))?;
        state.serialize_field("views", &stats.and_then(|s| s.views))?;
        state.serialize_field("likes", &stats.and_then(|s| s.likes))?;
        state.serialize_field("comments", &stats.map(|s| s.comments))?;
        state.serialize_field("transcript", &self.transcript)?;
        state.end()
    }
}

fn serialize_properties<S: SerializeStruct>(
    state: &mut S,
    props: Option<&VideoProperties>,
) -> Result<(), S::Error> {
    state.serialize_field("video_id", &props.map(|p| &p.video_id))?;
    serialize_properties_tail(state, props)
}

/// Every property column after `video_id`. Strings keep their
/// `Not Found` sentinel; typed values serialize as `null` when absent.
fn serialize_properties_tail<S: SerializeStruct>(
    state: &mut S,
    props: Option<&VideoProperties>,
) -> Result<(), S::Error> {
    state.serialize_field("video_name", &props.map(|p| &p.video_name))?;
    state.serialize_field("channel_id", &props.map(|p| &p.channel_id))?;
    state.serialize_field("channel_name", &props.map(|p| &p.channel_name))?;
    state.serialize_field("category_id", &props.map(|p| &p.category_id))?;
    state.serialize_field(
        "published_at",
        &props.map(|p| display_or_not_found(p.published_at)),
    )?;
    state.serialize_field("video_length", &props.map(|p| p.length))?;
    state.serialize_field("type", &props.map(|p| p.kind))?;
    state.serialize_field("license", &props.map(|p| p.license))?;
    state.serialize_field("made_for_kids", &props.and_then(|p| p.made_for_kids))?;
    state.serialize_field("user_tags", &props.map(|p| &p.user_tags))?;
    state.serialize_field("description", &props.map(|p| &p.description))?;
    Ok(())
}
