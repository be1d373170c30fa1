//! API client for the FIFA data API.
//!
//! The client targets a single base URL and returns parsed JSON. It never
//! retries: a failed request surfaces as a `FetchError` and the user reloads
//! the page to try again.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, Client, Response};
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::FlagImage;

use super::{ApiRequest, FetchError};

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 20;

/// Connection timeout in seconds.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// The API rejects some non-browser agents, so requests present a desktop one.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/135.0.0.0 Safari/537.36";

/// Content type assumed for images served without one
const DEFAULT_IMAGE_TYPE: &str = "image/png";

/// API client for the FIFA data API.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    language: String,
}

impl ApiClient {
    /// Create a client for `base_url`, sending `language` with every request
    pub fn new(base_url: &str, language: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            language: language.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join an endpoint onto the base URL with exactly one slash
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Query string for a request: `language` first, then the caller's
    /// parameters. A caller-supplied `language` replaces the default.
    fn query<'a>(&'a self, params: &'a [(String, String)]) -> Vec<(&'a str, &'a str)> {
        let mut query = Vec::with_capacity(params.len() + 1);
        if !params.iter().any(|(k, _)| k == "language") {
            query.push(("language", self.language.as_str()));
        }
        query.extend(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        query
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(endpoint: &str, response: Response) -> Result<Response, FetchError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(endpoint = endpoint, status = %status, "API request failed");
            Err(FetchError::from_status(endpoint, status, &body))
        }
    }

    /// GET `endpoint` with `params` and parse the body as JSON
    pub async fn fetch(&self, endpoint: &str, params: &[(String, String)]) -> Result<Value, FetchError> {
        let url = self.url(endpoint);
        debug!(endpoint = endpoint, "Fetching from API");

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .query(&self.query(params))
            .send()
            .await
            .map_err(|e| {
                warn!(endpoint = endpoint, error = %e, "API request could not be sent");
                FetchError::network(endpoint, e)
            })?;

        let response = Self::check_response(endpoint, response).await?;

        let text = response
            .text()
            .await
            .map_err(|e| FetchError::network(endpoint, e))?;

        serde_json::from_str(&text)
            .map_err(|e| FetchError::invalid(endpoint, format!("body is not valid JSON: {}", e)))
    }

    /// Execute a described request
    pub async fn fetch_request(&self, request: &ApiRequest) -> Result<Value, FetchError> {
        self.fetch(&request.endpoint, &request.params).await
    }

    /// GET `endpoint` and return the raw body, for images
    pub async fn fetch_bytes(&self, endpoint: &str) -> Result<FlagImage, FetchError> {
        let url = self.url(endpoint);
        debug!(endpoint = endpoint, "Fetching bytes from API");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::network(endpoint, e))?;

        let response = Self::check_response(endpoint, response).await?;

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_IMAGE_TYPE)
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::network(endpoint, e))?;

        if bytes.is_empty() {
            return Err(FetchError::invalid(endpoint, "empty body"));
        }

        Ok(FlagImage {
            content_type,
            bytes: bytes.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_with_single_slash() {
        let client = ApiClient::new("https://api.fifa.com/api/v3/", "en").unwrap();
        assert_eq!(
            client.url("/calendar/matches"),
            "https://api.fifa.com/api/v3/calendar/matches"
        );
        assert_eq!(
            client.url("calendar/matches"),
            "https://api.fifa.com/api/v3/calendar/matches"
        );
    }

    #[test]
    fn test_query_puts_language_first() {
        let client = ApiClient::new("http://localhost", "en").unwrap();
        let params = vec![("idSeason".to_string(), "288439".to_string())];
        assert_eq!(client.query(&params), vec![("language", "en"), ("idSeason", "288439")]);
    }

    #[test]
    fn test_query_caller_language_wins() {
        let client = ApiClient::new("http://localhost", "en").unwrap();
        let params = vec![("language".to_string(), "es".to_string())];
        assert_eq!(client.query(&params), vec![("language", "es")]);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        // Port 9 (discard) on localhost is expected to refuse connections
        let client = ApiClient::new("http://127.0.0.1:9", "en").unwrap();
        let err = client.fetch("/calendar/matches", &[]).await.unwrap_err();
        assert!(matches!(err, FetchError::Network { .. }));
        assert_eq!(err.endpoint(), "/calendar/matches");
    }
}
