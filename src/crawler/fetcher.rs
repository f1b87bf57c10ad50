//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with browser-like request headers
//! - GET requests to fetch listing pages
//! - Error classification into transport failures

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::{Result, WarnError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use url::Url;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Source of listing page bodies
///
/// The coordinator only needs the body of a successful response; everything
/// else is reported as an error and ends the crawl.
pub trait PageFetcher {
    /// Fetches one page and returns its body
    fn fetch_page(&self, url: &Url) -> impl Future<Output = Result<String>> + Send;
}

/// Fetches listing pages over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher from the user agent and crawler configuration
    pub fn new(user_agent: &UserAgentConfig, crawler: &CrawlerConfig) -> Result<Self> {
        let client = build_http_client(user_agent, crawler)?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &Url) -> Result<String> {
        fetch_url(&self.client, url).await
    }
}

/// Builds an HTTP client with proper configuration
///
/// Certificate validation stays enabled; the listing is served over public TLS.
///
/// # Example
///
/// ```no_run
/// use warn_alerts::config::{CrawlerConfig, UserAgentConfig};
/// use warn_alerts::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> std::result::Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));

    let timeout = Duration::from_secs(crawler.request_timeout_secs);

    Client::builder()
        .user_agent(user_agent.user_agent.as_str())
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 2xx | Body text |
/// | Any other status | `WarnError::Transport` |
/// | Timeout, connection or body error | `WarnError::Http` |
pub async fn fetch_url(client: &Client, url: &Url) -> Result<String> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| WarnError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(WarnError::Transport {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| WarnError::Http {
        url: url.to_string(),
        source,
    })
}
