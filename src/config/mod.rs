//! Configuration module for smap
//!
//! A crawl is configured by an explicit [`Config`] value handed to
//! [`crate::Client::new`]. It can be built in code, or loaded from a TOML
//! file and then overridden by command-line flags.
//!
//! # Example
//!
//! ```no_run
//! use smap::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("smap.toml")).unwrap();
//! println!("Crawling with {} workers", config.max_workers);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{Config, DEFAULT_MAX_WORKERS, DEFAULT_USER_AGENT};

pub use parser::{load_config, parse_config};
pub use validation::{apply_defaults, validate};
