//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests with redirect-following and a per-request timeout
//! - Error classification into `ErrorRecord` values

use crate::config::{Config, UserAgentConfig};
use crate::output::{ErrorReason, ErrorRecord};
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client, StatusCode};
use std::time::Duration;

/// Maximum redirect hops followed for one request
const MAX_REDIRECTS: usize = 10;

/// Outcome of one fetch: the HTML body, or the recorded failure
pub type FetchResult = Result<String, ErrorRecord>;

/// An asynchronous source of HTML pages
///
/// Implementations never panic or raise past this boundary; every outcome is a
/// `FetchResult` value.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchResult;
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```
/// use site2kb::config::UserAgentConfig;
/// use site2kb::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Production fetcher backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(&config.user_agent)?,
            timeout: config.crawler.request_timeout(),
        })
    }

    /// Wraps an existing client
    pub fn with_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    /// Fetches a URL, accepting only `200 OK` responses declaring `text/html`
    ///
    /// | Condition | Outcome |
    /// |-----------|---------|
    /// | 200 + text/html | body |
    /// | any other status or content type | `non-200-or-non-html` with status |
    /// | request or body read timed out | `timeout` |
    /// | other transport failure | `http-error` |
    async fn fetch(&self, url: &str) -> FetchResult {
        let response = match self.client.get(url).timeout(self.timeout).send().await {
            Ok(response) => response,
            Err(e) => return Err(classify_transport_error(url, &e, None)),
        };

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_lowercase();

        if status != StatusCode::OK || !content_type.contains("text/html") {
            tracing::debug!(
                "Rejected {}: status {}, content-type '{}'",
                url,
                status,
                content_type
            );
            return Err(ErrorRecord::new(
                url,
                ErrorReason::NonHtml,
                Some(status.as_u16()),
            ));
        }

        match response.text().await {
            Ok(body) => Ok(body),
            Err(e) => Err(classify_transport_error(url, &e, Some(status.as_u16()))),
        }
    }
}

/// Maps a reqwest failure onto the error taxonomy
fn classify_transport_error(url: &str, error: &reqwest::Error, status: Option<u16>) -> ErrorRecord {
    let status = error.status().map(|s| s.as_u16()).or(status);

    if error.is_timeout() {
        ErrorRecord::new(url, ErrorReason::Timeout, status)
    } else {
        tracing::debug!("Transport error for {}: {}", url, error);
        ErrorRecord::new(url, ErrorReason::Http, status)
    }
}
