use crate::crawler::PageError;
use crate::sitemap::Links;
use url::Url;

/// A node of the site graph
///
/// A page is created when its crawl job is scheduled and filled in by the
/// worker that runs the job. After the result is handed to the crawler it is
/// only touched by the cleanup passes.
#[derive(Debug)]
pub struct Page {
    /// The URL that was requested for this page
    pub url: Url,

    /// Outbound edges, in anchor order
    pub links: Links,

    /// Inbound edges, filled in after the crawl; order is unspecified
    pub linked_from: Links,

    /// Whether the request ended on a different path or host
    pub is_redirect: bool,

    /// Final URL after redirects, when `is_redirect` is set
    pub redirects_to: Option<Url>,

    /// Why the page could not be crawled
    pub error: Option<PageError>,
}

impl Page {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            links: Links::new(),
            linked_from: Links::new(),
            is_redirect: false,
            redirects_to: None,
            error: None,
        }
    }

    /// Graph key of this page
    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
