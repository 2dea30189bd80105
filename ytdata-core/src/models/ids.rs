//! Identifier newtypes.
//!
//! Identifiers are opaque strings handed out by YouTube. They are the only
//! thing entity equality and hashing look at.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of a canonical video id; longer ids carry suffixes the caption
/// endpoint does not accept.
const CANONICAL_VIDEO_ID_LEN: usize = 11;

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a raw identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the raw identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the wrapper and returns the raw identifier.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

identifier!(
    /// A channel identifier (`UC...`).
    ChannelId
);

identifier!(
    /// A video identifier.
    VideoId
);

identifier!(
    /// A playlist identifier (`PL...`, `UU...` for uploads).
    PlaylistId
);

impl VideoId {
    /// The id as accepted by the caption endpoint (first 11 characters).
    pub fn transcript_key(&self) -> &str {
        match self.0.char_indices().nth(CANONICAL_VIDEO_ID_LEN) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_by_value() {
        assert_eq!(ChannelId::new("UC1"), ChannelId::from("UC1"));
        assert_ne!(ChannelId::new("UC1"), ChannelId::new("UC2"));
    }

    #[test]
    fn test_hash_dedupes() {
        let set: HashSet<VideoId> = ["a", "b", "a"].into_iter().map(VideoId::from).collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_transcript_key_truncates() {
        assert_eq!(VideoId::new("dQw4w9WgXcQ").transcript_key(), "dQw4w9WgXcQ");
        assert_eq!(VideoId::new("dQw4w9WgXcQ&t=42").transcript_key(), "dQw4w9WgXcQ");
        assert_eq!(VideoId::new("short").transcript_key(), "short");
    }

    #[test]
    fn test_serializes_transparently() {
        let json = serde_json::to_string(&PlaylistId::new("UUabc")).unwrap();
        assert_eq!(json, r#""UUabc""#);
    }
}
