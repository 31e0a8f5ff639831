//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: the lifecycle of one crawl, from input validation to the
//!   finished sitemap

mod crawl_state;

pub use crawl_state::CrawlState;
