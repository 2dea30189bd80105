//! Collection error types.

use thiserror::Error;
use ytdata_core::{CoreError, PlaylistId};

/// Errors from entity lookups, traversal, search and collection.
#[derive(Debug, Error)]
pub enum CollectError {
    /// The request is malformed. Raised before any API call.
    #[error("Invalid request: {0}")]
    Config(String),

    /// The request is well-formed but not supported.
    #[error("Not supported: {0}")]
    Unsupported(String),

    /// A resource does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Resource kind.
        kind: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// A playlist page could not be fetched; the traversal was abandoned.
    #[error("Failed to fetch page {page} of playlist {playlist_id}: {source}")]
    PageFetch {
        /// Playlist being traversed.
        playlist_id: PlaylistId,
        /// 1-based page number.
        page: usize,
        /// Underlying failure.
        source: CoreError,
    },

    /// Any other boundary failure.
    #[error(transparent)]
    Api(CoreError),
}

impl CollectError {
    pub(crate) fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Returns true if repeating the whole operation later might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::PageFetch { source, .. } | Self::Api(source) => source.is_transient(),
            _ => false,
        }
    }

    /// True for errors raised by request validation.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Unsupported(_))
    }
}

impl From<CoreError> for CollectError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidConfig(msg) => Self::Config(msg),
            CoreError::NotImplemented(msg) => Self::Unsupported(msg),
            CoreError::NotFound { kind, id } => Self::NotFound { kind, id },
            other => Self::Api(other),
        }
    }
}
