//! Transcript lookup outcomes.

use serde::{Serialize, Serializer};
use std::fmt;

/// Result of looking up a video's transcript.
///
/// Absence is not an error: each permanent cause gets its own variant so
/// consumers can tell "never going to exist" from "try again later".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptOutcome {
    /// Caption segments joined with single spaces.
    Text(String),
    /// The owner turned captions off.
    Disabled,
    /// Captions exist, but none in an accepted language.
    NotFound,
    /// The video itself cannot be played (private, removed, region locked).
    Unavailable,
    /// Rate limiting, transport failure or an unparseable response.
    TransientError(String),
}

impl TranscriptOutcome {
    /// Sentinel for [`TranscriptOutcome::Disabled`].
    pub const DISABLED: &'static str = "transcript-disabled";
    /// Sentinel for [`TranscriptOutcome::NotFound`].
    pub const NOT_FOUND: &'static str = "transcript-not-found";
    /// Sentinel for [`TranscriptOutcome::Unavailable`].
    pub const UNAVAILABLE: &'static str = "transcript-unavailable";
    /// Sentinel for [`TranscriptOutcome::TransientError`].
    pub const ERROR: &'static str = "transcript-error";

    /// Returns the transcript text or the sentinel for this outcome.
    pub fn as_field(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Disabled => Self::DISABLED,
            Self::NotFound => Self::NOT_FOUND,
            Self::Unavailable => Self::UNAVAILABLE,
            Self::TransientError(_) => Self::ERROR,
        }
    }

    /// Returns the text if the lookup succeeded.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// True only for failures that may go away on a later attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransientError(_))
    }
}

impl fmt::Display for TranscriptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_field())
    }
}

impl Serialize for TranscriptOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_field())
    }
}
