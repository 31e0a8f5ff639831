//! smap: a site-mapping engine
//!
//! This crate crawls a single website from its root URL and maps the links
//! between its pages, respecting robots.txt and a bounded worker budget.
//! The result is a [`SiteMap`]: a directed graph keyed by page path.

pub mod config;
pub mod crawler;
pub mod output;
pub mod robots;
pub mod sitemap;
pub mod state;
pub mod url;
pub mod worker;

use thiserror::Error;

/// Main error type for smap operations
///
/// Every variant here is fatal for a crawl. Failures scoped to a single page
/// are reported as [`crawler::PageError`] and never surface through this type.
#[derive(Debug, Error)]
pub enum SmapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid crawl target {url}: {source}")]
    InvalidTarget { url: String, source: UrlError },

    #[error("Failed to fetch robots.txt from {url}: {source}")]
    RobotsFetch { url: String, source: reqwest::Error },

    #[error("Failed to read robots.txt from {url}: {source}")]
    RobotsRead { url: String, source: reqwest::Error },

    #[error("Failed to parse robots.txt from {url}: {message}")]
    RobotsParse { url: String, message: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Worker pool error: {0}")]
    Pool(#[from] worker::PoolError),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition {
        from: state::CrawlState,
        to: state::CrawlState,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(#[from] ::url::ParseError),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,

    #[error("URL should be the base url, got path {0}")]
    NotRoot(String),
}

/// Result type alias for smap operations
pub type Result<T> = std::result::Result<T, SmapError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Client, Crawler};
pub use sitemap::{Link, Links, Page, SiteMap};
