//! Output module for rendering a finished site map
//!
//! This module handles:
//! - Projecting pages into their exported shape ([`PageView`])
//! - The human-readable listing
//! - JSON rendering keyed by path

mod json;
mod text;
mod view;

pub use json::to_json;
pub use text::format_text;
pub use view::PageView;

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
