//! Video-derived records.
//!
//! - [`VideoProperties`] - Static metadata (title, owner, length, licence)
//! - [`VideoStatistics`] - Counters sampled on a given day
//! - [`VideoKind`] - Short-form vs long-form classification
//! - [`License`] - Licence label

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::duration::parse_duration;
use super::ids::{ChannelId, VideoId};
use super::response::VideoResource;
use crate::error::CoreError;

/// Sentinel for a field the API did not return.
pub const NOT_FOUND: &str = "Not Found";

/// Longest video, in seconds, still classified as a short.
pub const SHORTS_MAX_LENGTH_SECS: u64 = 60;

// ============================================================================
// Video Kind
// ============================================================================

/// Short-form vs long-form video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VideoKind {
    /// Length at or below [`SHORTS_MAX_LENGTH_SECS`].
    #[serde(rename = "shorts")]
    Short,
    /// Anything longer.
    #[serde(rename = "video")]
    Long,
}

impl VideoKind {
    /// Classifies a video by its length in seconds.
    pub fn classify(length_secs: u64) -> Self {
        if length_secs <= SHORTS_MAX_LENGTH_SECS {
            Self::Short
        } else {
            Self::Long
        }
    }

    /// Returns the export label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Short => "shorts",
            Self::Long => "video",
        }
    }
}

impl fmt::Display for VideoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// License
// ============================================================================

/// Video licence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum License {
    /// Standard YouTube licence (`youtube`).
    #[serde(rename = "Standard License")]
    Standard,
    /// Creative Commons (`creativeCommon`).
    #[serde(rename = "Creative Commons")]
    CreativeCommons,
    /// Status part missing or licence not reported.
    #[serde(rename = "Not Found")]
    NotFound,
}

impl License {
    /// Maps the API licence value.
    pub fn from_api(value: Option<&str>) -> Self {
        match value {
            Some("youtube") => Self::Standard,
            Some("creativeCommon") => Self::CreativeCommons,
            _ => Self::NotFound,
        }
    }

    /// Returns the export label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Standard => "Standard License",
            Self::CreativeCommons => "Creative Commons",
            Self::NotFound => NOT_FOUND,
        }
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Video Properties
// ============================================================================

/// Static properties of a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoProperties {
    /// Video id.
    pub video_id: VideoId,
    /// Title.
    pub video_name: String,
    /// Owning channel id (`Not Found` when absent).
    pub channel_id: String,
    /// Owning channel title.
    pub channel_name: String,
    /// Category id.
    pub category_id: String,
    /// Publication day (UTC).
    pub published_at: Option<NaiveDate>,
    /// Length in seconds.
    pub length: u64,
    /// Short/long classification derived from `length`.
    pub kind: VideoKind,
    /// Licence.
    pub license: License,
    /// Made-for-kids designation.
    pub made_for_kids: Option<bool>,
    /// Uploader tags.
    pub user_tags: Vec<String>,
    /// Description.
    pub description: String,
}

impl VideoProperties {
    /// Builds properties from a video resource fetched with
    /// `snippet`, `contentDetails` and `status`.
    ///
    /// Missing fields fall back to [`NOT_FOUND`]; only an unrepresentable
    /// duration is an error.
    pub fn from_resource(video_id: &VideoId, resource: &VideoResource) -> Result<Self, CoreError> {
        let snippet = resource.snippet.clone().unwrap_or_default();
        let status = resource.status.clone().unwrap_or_default();

        let length = match resource
            .content_details
            .as_ref()
            .and_then(|cd| cd.duration.as_deref())
        {
            Some(token) => parse_duration(token)?,
            None => 0,
        };

        let or_not_found = |value: Option<String>| value.unwrap_or_else(|| NOT_FOUND.to_string());

        Ok(Self {
            video_id: video_id.clone(),
            video_name: or_not_found(snippet.title),
            channel_id: or_not_found(snippet.channel_id),
            channel_name: or_not_found(snippet.channel_title),
            category_id: or_not_found(snippet.category_id),
            published_at: snippet.published_at.as_deref().and_then(parse_publication_date),
            length,
            kind: VideoKind::classify(length),
            license: License::from_api(status.license.as_deref()),
            made_for_kids: status.made_for_kids,
            user_tags: snippet.tags.unwrap_or_default(),
            description: or_not_found(snippet.description),
        })
    }

    /// The owning channel as an identifier, when known.
    pub fn owner(&self) -> Option<ChannelId> {
        (self.channel_id != NOT_FOUND).then(|| ChannelId::new(self.channel_id.clone()))
    }
}

/// Reduces an RFC 3339 timestamp to its UTC calendar day.
fn parse_publication_date(raw: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
}

// ============================================================================
// Video Statistics
// ============================================================================

/// Counters for a video on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoStatistics {
    /// Day the counters were sampled (UTC).
    pub date: NaiveDate,
    /// Video id.
    pub video_id: VideoId,
    /// View count, `None` when not reported.
    pub views: Option<u64>,
    /// Like count, `None` when hidden.
    pub likes: Option<u64>,
    /// Comment count, zero when comments are off.
    pub comments: u64,
}

impl VideoStatistics {
    /// Builds statistics from a video resource fetched with `statistics`.
    pub fn from_resource(
        video_id: &VideoId,
        resource: &VideoResource,
        date: NaiveDate,
    ) -> Result<Self, CoreError> {
        let stats = resource
            .statistics
            .as_ref()
            .ok_or_else(|| CoreError::InvalidData(format!("no statistics for video {video_id}")))?;

        Ok(Self {
            date,
            video_id: video_id.clone(),
            views: parse_counter(stats.view_count.as_deref())?,
            likes: parse_counter(stats.like_count.as_deref())?,
            comments: parse_counter(stats.comment_count.as_deref())?.unwrap_or(0),
        })
    }
}

/// Parses a decimal counter string.
pub(crate) fn parse_counter(raw: Option<&str>) -> Result<Option<u64>, CoreError> {
    raw.map(|value| {
        value
            .parse::<u64>()
            .map_err(|e| CoreError::InvalidData(format!("counter {value:?}: {e}")))
    })
    .transpose()
}

/// Renders an optional value, substituting [`NOT_FOUND`].
pub(crate) fn display_or_not_found<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| NOT_FOUND.to_string(), |v| v.to_string())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::response::{
        VideoContentDetails, VideoSnippet, VideoStatisticsResource, VideoStatus,
    };

    fn full_resource() -> VideoResource {
        VideoResource {
            id: "vid1".to_string(),
            snippet: Some(VideoSnippet {
                title: Some("Launch day".to_string()),
                channel_id: Some("UC1".to_string()),
                channel_title: Some("Acme".to_string()),
                category_id: Some("28".to_string()),
                published_at: Some("2024-03-05T23:30:00-02:00".to_string()),
                tags: Some(vec!["rust".to_string()]),
                description: Some("desc".to_string()),
            }),
            content_details: Some(VideoContentDetails {
                duration: Some("PT1M1S".to_string()),
            }),
            status: Some(VideoStatus {
                license: Some("youtube".to_string()),
                made_for_kids: Some(false),
            }),
            statistics: None,
        }
    }

    #[test]
    fn test_classification_boundary() {
        assert_eq!(VideoKind::classify(60), VideoKind::Short);
        assert_eq!(VideoKind::classify(61), VideoKind::Long);
        assert_eq!(VideoKind::classify(0), VideoKind::Short);
    }

    #[test]
    fn test_license_mapping() {
        assert_eq!(License::from_api(Some("youtube")), License::Standard);
        assert_eq!(License::from_api(Some("creativeCommon")), License::CreativeCommons);
        assert_eq!(License::from_api(None), License::NotFound);
        assert_eq!(License::NotFound.label(), NOT_FOUND);
    }

    #[test]
    fn test_properties_from_full_resource() {
        let id = VideoId::new("vid1");
        let props = VideoProperties::from_resource(&id, &full_resource()).unwrap();

        assert_eq!(props.video_name, "Launch day");
        assert_eq!(props.channel_id, "UC1");
        assert_eq!(props.length, 61);
        assert_eq!(props.kind, VideoKind::Long);
        assert_eq!(props.license, License::Standard);
        assert_eq!(props.made_for_kids, Some(false));
        // 23:30 at -02:00 is the next day in UTC
        assert_eq!(props.published_at, NaiveDate::from_ymd_opt(2024, 3, 6));
        assert_eq!(props.owner(), Some(ChannelId::new("UC1")));
    }

    #[test]
    fn test_properties_defaults_for_missing_parts() {
        let id = VideoId::new("bare");
        let props = VideoProperties::from_resource(&id, &VideoResource::default()).unwrap();

        assert_eq!(props.video_name, NOT_FOUND);
        assert_eq!(props.channel_name, NOT_FOUND);
        assert_eq!(props.length, 0);
        assert_eq!(props.kind, VideoKind::Short);
        assert_eq!(props.license, License::NotFound);
        assert!(props.user_tags.is_empty());
        assert!(props.published_at.is_none());
        assert!(props.owner().is_none());
    }

    #[test]
    fn test_properties_fail_on_overflowing_duration() {
        let mut resource = full_resource();
        resource.content_details = Some(VideoContentDetails {
            duration: Some("PT99999999999999999999S".to_string()),
        });

        assert!(VideoProperties::from_resource(&VideoId::new("x"), &resource).is_err());
    }

    #[test]
    fn test_statistics_from_resource() {
        let mut resource = VideoResource::default();
        resource.statistics = Some(VideoStatisticsResource {
            view_count: Some("1200".to_string()),
            like_count: None,
            comment_count: None,
        });
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        let stats = VideoStatistics::from_resource(&VideoId::new("v"), &resource, date).unwrap();
        assert_eq!(stats.views, Some(1200));
        assert_eq!(stats.likes, None);
        assert_eq!(stats.comments, 0);
    }

    #[test]
    fn test_statistics_missing_part_is_error() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let result = VideoStatistics::from_resource(&VideoId::new("v"), &VideoResource::default(), date);
        assert!(result.is_err());
    }

    #[test]
    fn test_statistics_rejects_garbage_counter() {
        assert!(parse_counter(Some("12a")).is_err());
        assert_eq!(parse_counter(None).unwrap(), None);
    }
}
