//! Outbound HTTP fetching.
//!
//! Thin JSON GET wrapper around reqwest. Every failure comes back as a
//! tagged `FetchError` value; nothing panics or escapes this boundary.
//! The `Fetch` trait is the seam the aggregation service is written
//! against, so tests can substitute a canned transport.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Errors surfaced by the fetch wrapper.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Upstream answered with a non-2xx status.
    #[error("HTTP {status} from {url}")]
    FetchFailed { status: u16, url: String },

    /// Transport failure or a body that was not valid JSON.
    #[error("request failed: {0}")]
    Unknown(String),
}

/// JSON GET transport. Implemented by [`Fetcher`] for real traffic and by
/// `MockFetch` in tests.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn get_json(&self, url: &Url) -> Result<serde_json::Value, FetchError>;
}

/// HTTP fetcher, optionally attaching a bearer token to every request.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Build a fetcher that sends `Authorization: Bearer <token>`.
    pub fn authenticated(token: &str) -> Result<Self, FetchError> {
        Self::build(Some(token))
    }

    /// Build an unauthenticated fetcher.
    pub fn anonymous() -> Result<Self, FetchError> {
        Self::build(None)
    }

    fn build(token: Option<&str>) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| FetchError::Unknown(e.to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::Unknown(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for Fetcher {
    async fn get_json(&self, url: &Url) -> Result<serde_json::Value, FetchError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| FetchError::Unknown(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::FetchFailed {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| FetchError::Unknown(e.to_string()))
    }
}

/// Canned transport for tests: responses keyed by URL substring, every
/// call recorded.
#[cfg(test)]
pub struct MockFetch {
    responses: Vec<(String, serde_json::Value)>,
    calls: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockFetch {
    pub fn new() -> Self {
        Self {
            responses: Vec::new(),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Serve `body` for any URL containing `fragment`. Earlier entries win,
    /// so register the more specific fragment first.
    pub fn respond(mut self, fragment: &str, body: serde_json::Value) -> Self {
        self.responses.push((fragment.to_string(), body));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[cfg(test)]
#[async_trait]
impl Fetch for MockFetch {
    async fn get_json(&self, url: &Url) -> Result<serde_json::Value, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());

        let target = url.to_string();
        for (fragment, body) in &self.responses {
            if target.contains(fragment.as_str()) {
                return Ok(body.clone());
            }
        }

        Err(FetchError::FetchFailed {
            status: 404,
            url: target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_serves_by_fragment() {
        let mock = MockFetch::new().respond("/players/abc", json!({"ok": true}));

        let url = Url::parse("https://open.faceit.com/data/v4/players/abc").unwrap();
        let body = mock.get_json(&url).await.unwrap();

        assert_eq!(body["ok"], json!(true));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_unmatched_is_fetch_failed() {
        let mock = MockFetch::new();
        let url = Url::parse("https://open.faceit.com/data/v4/players/abc").unwrap();

        let err = mock.get_json(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::FetchFailed { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_mock_first_registered_fragment_wins() {
        let mock = MockFetch::new()
            .respond("offset=100", json!({"page": 2}))
            .respond("offset=1", json!({"page": 1}));

        let url = Url::parse("https://x.test/matches?offset=100").unwrap();
        let body = mock.get_json(&url).await.unwrap();
        assert_eq!(body["page"], json!(2));
    }

    #[test]
    fn test_authenticated_builder_accepts_token() {
        assert!(Fetcher::authenticated("11111111-2222-3333-4444-555555555555").is_ok());
    }
}
