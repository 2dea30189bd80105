//! HTTP client with tracing and a domain allowlist.
//!
//! Every request the crate makes goes through [`HttpClient`], so the
//! allowlist and the request spans apply to the Data API and the watch
//! pages alike.

use reqwest::{header, Client, Response};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::error::FetchError;

/// User agent string for ytdata.
const USER_AGENT: &str = concat!("ytdata/", env!("CARGO_PKG_VERSION"));

/// Sent with watch page requests so captions come back in a stable locale.
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper with tracing and domain allowlist.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    allowed_domains: Option<Vec<String>>,
}

impl HttpClient {
    /// Creates a client with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            inner: client,
            allowed_domains: None,
        })
    }

    /// Restricts requests to the given hosts and their subdomains.
    #[must_use]
    pub fn with_allowed_domains(mut self, domains: Vec<String>) -> Self {
        self.allowed_domains = Some(domains);
        self
    }

    fn check_domain(&self, url: &str) -> Result<(), FetchError> {
        let Some(ref allowed) = self.allowed_domains else {
            return Ok(());
        };

        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| FetchError::InvalidUrl("No host in URL".to_string()))?;

        let allowed = allowed
            .iter()
            .any(|domain| host == domain || host.ends_with(&format!(".{domain}")));

        if allowed {
            Ok(())
        } else {
            Err(FetchError::DomainNotAllowed(host.to_string()))
        }
    }

    /// Performs a GET request.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get(&self, url: &str) -> Result<Response, FetchError> {
        self.check_domain(url)?;
        debug!("GET request");

        let response = self
            .inner
            .get(url)
            .header(header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
            .send()
            .await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Performs a GET request with query parameters.
    ///
    /// The query is not recorded in the span; it carries the API key.
    #[instrument(skip(self, query), fields(url = %url))]
    pub async fn get_query<Q: Serialize + ?Sized>(
        &self,
        url: &str,
        query: &Q,
    ) -> Result<Response, FetchError> {
        self.check_domain(url)?;
        debug!("GET request with query");

        let response = self
            .inner
            .get(url)
            .header(header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
            .query(query)
            .send()
            .await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }
}

// ============================================================================
// Response Extensions
// ============================================================================

/// Extension trait for Response handling.
pub trait ResponseExt {
    /// Check if the response indicates rate limiting.
    fn is_rate_limited(&self) -> bool;

    /// Get the Retry-After header value in seconds.
    fn retry_after_secs(&self) -> Option<u64>;
}

impl ResponseExt for Response {
    fn is_rate_limited(&self) -> bool {
        self.status() == reqwest::StatusCode::TOO_MANY_REQUESTS
    }

    fn retry_after_secs(&self) -> Option<u64> {
        self.headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HttpClient {
        HttpClient::new(Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_domain_allowlist() {
        let client = client().with_allowed_domains(vec![
            "www.googleapis.com".to_string(),
            "youtube.com".to_string(),
        ]);

        assert!(client.check_domain("https://www.googleapis.com/youtube/v3/videos").is_ok());
        assert!(client.check_domain("https://www.youtube.com/watch?v=abc").is_ok());
        assert!(client.check_domain("https://evil.com/steal").is_err());
        assert!(client.check_domain("https://notyoutube.com/").is_err());
    }

    #[test]
    fn test_no_domain_restrictions() {
        assert!(client().check_domain("https://any.domain.com").is_ok());
    }

    #[test]
    fn test_invalid_url() {
        let client = client().with_allowed_domains(vec!["example.com".to_string()]);
        assert!(matches!(
            client.check_domain("not-a-valid-url"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_blocked_request_never_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("GET", "/").expect(0).create_async().await;

        let client = client().with_allowed_domains(vec!["www.youtube.com".to_string()]);
        let result = client.get(&server.url()).await;

        assert!(matches!(result, Err(FetchError::DomainNotAllowed(_))));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_retry_after_header() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .with_status(429)
            .with_header("retry-after", "17")
            .create_async()
            .await;

        let response = client().get(&server.url()).await.unwrap();
        assert!(response.is_rate_limited());
        assert_eq!(response.retry_after_secs(), Some(17));
    }
}
