use crate::UrlResult;
use url::Url;

/// Resolves an anchor `href` into an absolute URL on the crawled site
///
/// # Canonicalization Steps
///
/// 1. Trim surrounding whitespace and strip leading `/` characters
/// 2. Ensure a trailing `/`, so `page` and `page/` map to the same URL
/// 3. If the result parses as an absolute URL, use it as-is
/// 4. Otherwise treat it as relative to the site root of `root`
///    (a bare `/` resolves to the root itself)
///
/// Links to other hosts come back absolute and untouched; filtering them
/// out is the caller's job.
///
/// # Arguments
///
/// * `href` - The raw attribute value
/// * `root` - The crawl's root URL (scheme and host are taken from it)
///
/// # Returns
///
/// * `Ok(Url)` - The canonical absolute URL
/// * `Err(UrlError)` - The value cannot be turned into a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use smap::url::resolve_href;
///
/// let root = Url::parse("https://example.com/").unwrap();
/// assert_eq!(resolve_href("/about", &root).unwrap().as_str(), "https://example.com/about/");
/// assert_eq!(resolve_href("about/", &root).unwrap().as_str(), "https://example.com/about/");
/// assert_eq!(resolve_href("/", &root).unwrap().as_str(), "https://example.com/");
/// ```
pub fn resolve_href(href: &str, root: &Url) -> UrlResult<Url> {
    let mut value = href.trim().trim_start_matches('/').to_string();
    if !value.ends_with('/') {
        value.push('/');
    }

    // Url::parse only accepts absolute URLs
    if let Ok(absolute) = Url::parse(&value) {
        return Ok(absolute);
    }

    let relative = if value == "/" { "" } else { value.as_str() };
    Ok(root.join(relative)?)
}
