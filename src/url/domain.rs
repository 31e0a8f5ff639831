use url::Url;

/// Returns the lowercase host and explicit port of a URL
///
/// The scheme plays no part: `http://example.com` and `https://example.com`
/// share an authority. A port equal to the scheme's default is dropped when
/// the URL is parsed, so `http://example.com:80` matches `http://example.com`.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use smap::url::authority;
///
/// let url = Url::parse("https://EXAMPLE.com/path").unwrap();
/// assert_eq!(authority(&url), Some(("example.com".to_string(), None)));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(authority(&url), Some(("127.0.0.1".to_string(), Some(8080))));
/// ```
pub fn authority(url: &Url) -> Option<(String, Option<u16>)> {
    url.host_str().map(|h| (h.to_lowercase(), url.port()))
}

/// Checks whether two URLs point at the same host and port
///
/// URLs without a host (`mailto:`, `javascript:` and friends) never match.
pub fn same_host(a: &Url, b: &Url) -> bool {
    match (authority(a), authority(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
