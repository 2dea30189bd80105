//! Data API v3 client.
//!
//! [`YouTubeClient`] is the production [`YouTubeApi`]. It owns the API key
//! and translates error statuses into [`FetchError`] variants using the
//! `reason` of the API's error body.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use ytdata_core::{
    ChannelId, ChannelResource, CoreError, ListResponse, Part, PlaylistId, PlaylistItemResource,
    SearchQuery, SearchResultResource, VideoId, VideoResource, YouTubeApi,
};

use crate::error::FetchError;
use crate::http::{HttpClient, ResponseExt};
use crate::settings::{ApiKey, FetchSettings};

// ============================================================================
// Error Body
// ============================================================================

/// `{"error": {"code": 403, "message": "...", "errors": [{"reason": "..."}]}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    reason: Option<String>,
}

/// Maps an error response to a [`FetchError`].
///
/// `what` names the requested resource for `NotFound`.
pub(crate) fn classify_error(
    status: StatusCode,
    retry_after: Option<u64>,
    body: &str,
    what: &str,
) -> FetchError {
    let parsed = serde_json::from_str::<ErrorEnvelope>(body).ok();
    let reason = parsed
        .as_ref()
        .and_then(|e| e.error.errors.iter().find_map(|d| d.reason.clone()))
        .unwrap_or_default();

    match (status, reason.as_str()) {
        (_, "quotaExceeded" | "dailyLimitExceeded") => FetchError::QuotaExceeded,
        (StatusCode::TOO_MANY_REQUESTS, _) | (_, "rateLimitExceeded" | "userRateLimitExceeded") => {
            FetchError::RateLimited { retry_after }
        }
        (_, "keyInvalid" | "keyExpired") | (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, _) => {
            FetchError::InvalidApiKey
        }
        (StatusCode::NOT_FOUND, _) => FetchError::NotFound(what.to_string()),
        _ => {
            let reason = if reason.is_empty() {
                parsed
                    .and_then(|e| e.error.message)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string())
            } else {
                reason
            };
            FetchError::Api { status, reason }
        }
    }
}

// ============================================================================
// Client
// ============================================================================

/// HTTP client for the four list endpoints.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    http: HttpClient,
    api_key: ApiKey,
    base_url: String,
}

impl YouTubeClient {
    /// Creates a client from settings and a key.
    pub fn new(api_key: ApiKey, settings: &FetchSettings) -> Result<Self, FetchError> {
        let http = HttpClient::new(settings.timeout)?
            .with_allowed_domains(settings.allowed_domains()?);

        Ok(Self {
            http,
            api_key,
            base_url: settings.api_base_url.clone(),
        })
    }

    #[instrument(skip(self, params), fields(endpoint = %endpoint))]
    async fn list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        what: &str,
        mut params: Vec<(&str, String)>,
    ) -> Result<ListResponse<T>, FetchError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        params.push(("key", self.api_key.expose().to_string()));

        let response = self.http.get_query(&url, &params).await?;
        let status = response.status();

        if !status.is_success() {
            let retry_after = response.retry_after_secs();
            let body = response.text().await.unwrap_or_default();
            let err = classify_error(status, retry_after, &body, what);
            warn!(status = %status, error = %err, "API request failed");
            return Err(err);
        }

        let body = response.text().await?;
        let parsed: ListResponse<T> = serde_json::from_str(&body)
            .map_err(|e| FetchError::InvalidResponse(format!("{endpoint}: {e}")))?;
        debug!(
            items = parsed.items.len(),
            has_next = parsed.next_page_token.is_some(),
            "List response parsed"
        );
        Ok(parsed)
    }
}

#[async_trait]
impl YouTubeApi for YouTubeClient {
    async fn fetch_video(
        &self,
        id: &VideoId,
        parts: &[Part],
    ) -> Result<ListResponse<VideoResource>, CoreError> {
        let params = vec![("part", Part::join(parts)), ("id", id.to_string())];
        Ok(self.list("videos", &format!("video {id}"), params).await?)
    }

    async fn fetch_channel(
        &self,
        id: &ChannelId,
        parts: &[Part],
    ) -> Result<ListResponse<ChannelResource>, CoreError> {
        let params = vec![("part", Part::join(parts)), ("id", id.to_string())];
        Ok(self.list("channels", &format!("channel {id}"), params).await?)
    }

    async fn search(
        &self,
        query: &SearchQuery,
    ) -> Result<ListResponse<SearchResultResource>, CoreError> {
        let mut params = vec![
            ("part", Part::Snippet.as_str().to_string()),
            ("q", query.keyword.clone()),
            ("type", query.kind.as_str().to_string()),
            ("order", query.order.as_str().to_string()),
            ("maxResults", query.max_results.to_string()),
        ];
        if let Some(cutoff) = query.published_after_param() {
            params.push(("publishedAfter", cutoff));
        }
        Ok(self
            .list("search", &format!("search {:?}", query.keyword), params)
            .await?)
    }

    async fn fetch_playlist_page(
        &self,
        id: &PlaylistId,
        max_results: u32,
        page_token: Option<&str>,
    ) -> Result<ListResponse<PlaylistItemResource>, CoreError> {
        let mut params = vec![
            ("part", Part::ContentDetails.as_str().to_string()),
            ("playlistId", id.to_string()),
            ("maxResults", max_results.to_string()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }
        Ok(self
            .list("playlistItems", &format!("playlist {id}"), params)
            .await?)
    }
}

// ============================================================================
// Tests
// ============================================================================
