//! URL handling module for smap
//!
//! This module provides crawl-target validation, host comparison and the
//! canonicalization applied to every anchor `href` found while crawling.

mod domain;
mod normalize;

use crate::{UrlError, UrlResult};
use ::url::Url;

// Re-export main functions
pub use domain::{authority, same_host};
pub use normalize::resolve_href;

/// Path segment some CDNs use to obfuscate e-mail addresses; never a real page
pub const EMAIL_PROTECTION_PATH: &str = "/cdn-cgi/l/email-protection";

/// Validates a crawl target and returns its canonical root URL
///
/// A target must be an absolute `http` or `https` URL with a host, and its
/// path must be empty or `/`: crawls only ever start from a site root.
/// Query and fragment are dropped from the returned root.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use smap::url::validate_root;
///
/// let root = validate_root(&Url::parse("https://example.com").unwrap()).unwrap();
/// assert_eq!(root.as_str(), "https://example.com/");
///
/// assert!(validate_root(&Url::parse("https://example.com/blog/").unwrap()).is_err());
/// ```
pub fn validate_root(target: &Url) -> UrlResult<Url> {
    match target.scheme() {
        "http" | "https" => {}
        other => return Err(UrlError::InvalidScheme(other.to_string())),
    }

    if target.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    let path = target.path();
    if !path.is_empty() && path != "/" {
        return Err(UrlError::NotRoot(path.to_string()));
    }

    let mut root = target.clone();
    root.set_path("/");
    root.set_query(None);
    root.set_fragment(None);
    Ok(root)
}

/// Returns the robots.txt location for the host of `root`
pub fn robots_url(root: &Url) -> UrlResult<Url> {
    Ok(root.join("/robots.txt")?)
}
