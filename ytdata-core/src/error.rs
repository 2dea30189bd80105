//! Core error types for ytdata.

use thiserror::Error;

/// Core error type shared across the API boundary.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid configuration or precondition (reported before any request).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Operation exists in the API vocabulary but is not supported here.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// The requested resource does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Resource kind (video, channel, playlist).
        kind: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// Response data could not be interpreted.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Network-level failure talking to the API.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The API asked us to slow down.
    #[error("Rate limited by the API")]
    RateLimited,

    /// The daily quota for the API key is used up.
    #[error("API quota exceeded")]
    QuotaExceeded,

    /// Any other API-reported failure.
    #[error("API error: {0}")]
    Api(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Creates a `NotFound` error for a resource kind and id.
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Returns true if retrying the same request later might succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::RateLimited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(CoreError::Transport("reset".into()).is_transient());
        assert!(CoreError::RateLimited.is_transient());
        assert!(!CoreError::QuotaExceeded.is_transient());
        assert!(!CoreError::InvalidConfig("x".into()).is_transient());
        assert!(!CoreError::not_found("video", "abc").is_transient());
    }

    #[test]
    fn test_not_found_message() {
        let err = CoreError::not_found("channel", "UC123");
        assert_eq!(err.to_string(), "channel not found: UC123");
    }
}
