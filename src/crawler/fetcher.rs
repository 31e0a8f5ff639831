//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the shared HTTP client with the configured user agent
//! - GET requests for pages, with response validation
//! - Redirect detection

use crate::crawler::PageError;
use crate::url::same_host;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Per-request timeout, covering connect, headers and body
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const CONTENT_TYPE_HTML: &str = "text/html";

/// A successfully fetched HTML page
#[derive(Debug)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: Url,
    /// HTTP status code
    pub status_code: u16,
    /// Page body content
    pub body: String,
}

impl FetchedPage {
    /// Returns the final URL if the request ended somewhere other than `requested`
    ///
    /// Only the path and the host are compared. A changed query string or an
    /// http to https upgrade alone is not a redirect.
    pub fn redirect_target(&self, requested: &Url) -> Option<&Url> {
        if self.final_url.path() != requested.path() || !same_host(&self.final_url, requested) {
            Some(&self.final_url)
        } else {
            None
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed with reqwest's default policy, so the final URL of
/// a response tells whether the page redirected.
///
/// # Arguments
///
/// * `user_agent` - Value for the User-Agent header
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use smap::crawler::build_http_client;
///
/// let client = build_http_client("smap-v0.0.1").unwrap();
/// ```
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(REQUEST_TIMEOUT)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and validates the response
///
/// # Request Flow
///
/// 1. Send a GET request (redirects are followed)
/// 2. Accept only status 200-399 with a `text/html` Content-Type
/// 3. Read the whole body
///
/// There is no retry: any failure is final for this page.
///
/// | Condition | Result |
/// |-----------|--------|
/// | Request could not be sent / timed out | `PageError::Request` |
/// | Status outside 200-399 | `PageError::InvalidResponse` |
/// | Content-Type without `text/html` | `PageError::InvalidResponse` |
/// | Body could not be read or decoded | `PageError::HtmlParse` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage, PageError> {
    let response = client.get(url.clone()).send().await?;

    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let status_ok = (200..400).contains(&status.as_u16());
    if !status_ok || !content_type.contains(CONTENT_TYPE_HTML) {
        return Err(PageError::InvalidResponse {
            status: status.as_u16(),
            content_type,
        });
    }

    let final_url = response.url().clone();
    let body = response
        .text()
        .await
        .map_err(|e| PageError::HtmlParse(e.to_string()))?;

    Ok(FetchedPage {
        final_url,
        status_code: status.as_u16(),
        body,
    })
}
