//! Robots.txt handling module
//!
//! This module fetches and parses the robots.txt of the crawled host and
//! answers whether a path may be crawled by a given user agent.

mod parser;

pub use parser::ParsedRobots;

use crate::url::robots_url;
use crate::SmapError;
use reqwest::Client;
use url::Url;

/// Fetches and parses robots.txt for the host of `root`
///
/// # Failure Handling
///
/// | Condition | Outcome |
/// |-----------|---------|
/// | Request could not be sent | `Err(RobotsFetch)` |
/// | HTTP status >= 400 | `Ok(allow_all)` |
/// | Body could not be read | `Err(RobotsRead)` |
/// | Body is not valid robots.txt text | `Err(RobotsParse)` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use (carries the user agent and timeout)
/// * `root` - The crawl's root URL
///
/// # Returns
///
/// * `Ok(ParsedRobots)` - Policy to apply for the whole crawl
/// * `Err(SmapError)` - Fatal failure; the crawl must not start
pub async fn fetch_robots(client: &Client, root: &Url) -> Result<ParsedRobots, SmapError> {
    let url = robots_url(root).map_err(|source| SmapError::InvalidTarget {
        url: root.to_string(),
        source,
    })?;

    tracing::debug!("Fetching robots.txt from {}", url);

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| SmapError::RobotsFetch {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if status.as_u16() >= 400 {
        tracing::warn!(
            "robots.txt at {} returned HTTP {}, allowing all paths",
            url,
            status.as_u16()
        );
        return Ok(ParsedRobots::allow_all());
    }

    let body = response
        .bytes()
        .await
        .map_err(|source| SmapError::RobotsRead {
            url: url.to_string(),
            source,
        })?;

    let robots = ParsedRobots::from_bytes(&body).map_err(|message| SmapError::RobotsParse {
        url: url.to_string(),
        message,
    })?;

    tracing::info!(
        "Loaded robots.txt from {} ({} bytes, {} sitemap entries)",
        url,
        body.len(),
        robots.sitemaps().len()
    );

    Ok(robots)
}
