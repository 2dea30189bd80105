//! Fetch error types.

use reqwest::StatusCode;
use thiserror::Error;
use ytdata_core::CoreError;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for fetch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No API key in the environment.
    #[error("API key not set: environment variable {0} is missing or empty")]
    MissingApiKey(String),

    /// API key rejected.
    #[error("API key is invalid or lacks permission")]
    InvalidApiKey,

    /// Daily quota used up.
    #[error("Quota exceeded - try again after the daily reset")]
    QuotaExceeded,

    /// Rate limited by the API.
    #[error("Rate limited, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after: Option<u64>,
    },

    /// Resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other error status reported by the API.
    #[error("API returned {status}: {reason}")]
    Api {
        /// HTTP status.
        status: StatusCode,
        /// Error reason from the response body, or the status text.
        reason: String,
    },

    /// Invalid response from the API.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Domain not allowed.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Returns true if this is a transient error that might succeed on retry.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            Self::RateLimited { .. } => true,
            Self::Api { status, .. } => status.is_server_error(),
            _ => false,
        }
    }
}

impl From<FetchError> for CoreError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Http(e) => CoreError::Transport(e.to_string()),
            FetchError::MissingApiKey(_)
            | FetchError::InvalidApiKey
            | FetchError::DomainNotAllowed(_)
            | FetchError::InvalidUrl(_) => CoreError::InvalidConfig(err.to_string()),
            FetchError::QuotaExceeded => CoreError::QuotaExceeded,
            FetchError::RateLimited { .. } => CoreError::RateLimited,
            FetchError::NotFound(what) => CoreError::not_found("resource", what),
            FetchError::Api { status, .. } if status.is_server_error() => {
                CoreError::Transport(err.to_string())
            }
            FetchError::Api { .. } => CoreError::Api(err.to_string()),
            FetchError::InvalidResponse(msg) => CoreError::InvalidData(msg),
            FetchError::Json(e) => CoreError::InvalidData(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_mapping() {
        assert!(matches!(
            CoreError::from(FetchError::QuotaExceeded),
            CoreError::QuotaExceeded
        ));
        assert!(matches!(
            CoreError::from(FetchError::RateLimited { retry_after: Some(3) }),
            CoreError::RateLimited
        ));
        assert!(matches!(
            CoreError::from(FetchError::InvalidApiKey),
            CoreError::InvalidConfig(_)
        ));
        assert!(matches!(
            CoreError::from(FetchError::NotFound("playlist UU1".into())),
            CoreError::NotFound { .. }
        ));
    }

    #[test]
    fn test_server_errors_are_transient() {
        let err = FetchError::Api {
            status: StatusCode::SERVICE_UNAVAILABLE,
            reason: "backendError".into(),
        };
        assert!(err.is_transient());
        assert!(CoreError::from(err).is_transient());

        let err = FetchError::Api {
            status: StatusCode::BAD_REQUEST,
            reason: "invalidParameter".into(),
        };
        assert!(!err.is_transient());
    }
}
