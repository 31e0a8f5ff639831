use crate::sitemap::Page;
use serde::Serialize;

/// Exported shape of a page
///
/// Edges are reduced to their target paths and the redirect target to its
/// path. Full URLs and page errors stay internal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub path: String,
    pub redirects_to: Option<String>,
    pub links: Vec<String>,
    pub linked_from: Vec<String>,
    pub is_redirect: bool,
}

impl From<&Page> for PageView {
    fn from(page: &Page) -> Self {
        Self {
            path: page.path().to_string(),
            redirects_to: page
                .redirects_to
                .as_ref()
                .filter(|_| page.is_redirect)
                .map(|url| url.path().to_string()),
            links: page.links.paths(),
            linked_from: page.linked_from.paths(),
            is_redirect: page.is_redirect,
        }
    }
}
