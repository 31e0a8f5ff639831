//! Crawler module for site mapping
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and response validation
//! - HTML link extraction
//! - The shared frontier of scheduled paths
//! - The per-page pipeline run on the worker pool
//! - Overall crawl coordination and termination

mod client;
mod coordinator;
mod fetcher;
mod frontier;
mod page;
mod parser;

pub use client::Client;
pub use coordinator::{CrawlStats, Crawler};
pub use fetcher::{build_http_client, fetch_page, FetchedPage, REQUEST_TIMEOUT};
pub use frontier::Frontier;
pub use page::PageError;
pub use parser::extract_hrefs;
