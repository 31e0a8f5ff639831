//! The site graph produced by a crawl
//!
//! A [`SiteMap`] maps each page path to its [`Page`]. It is filled one page
//! at a time by the crawler's collection loop, then finished by two
//! sequential passes: [`SiteMap::prune_links_to`] drops edges to pages that
//! failed, and [`SiteMap::derive_backlinks`] fills every page's
//! `linked_from` list from the surviving edges.

mod link;
mod page;

pub use link::{Link, Links};
pub use page::Page;

use std::collections::{HashMap, HashSet};

/// Mapping from page path to page
#[derive(Debug, Default)]
pub struct SiteMap {
    pages: HashMap<String, Page>,
}

impl SiteMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a page under its path, replacing any page with the same path
    pub fn insert(&mut self, page: Page) -> Option<Page> {
        self.pages.insert(page.path().to_string(), page)
    }

    pub fn get(&self, path: &str) -> Option<&Page> {
        self.pages.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.pages.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Crawled paths in sorted order
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.pages.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    /// Pages in unspecified order
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }

    /// Pages sorted by path
    pub fn sorted_pages(&self) -> Vec<&Page> {
        let mut pages: Vec<&Page> = self.pages.values().collect();
        pages.sort_unstable_by(|a, b| a.path().cmp(b.path()));
        pages
    }

    /// Removes every outbound edge whose target path is in `failed`
    ///
    /// Returns the number of edges removed.
    pub fn prune_links_to(&mut self, failed: &HashSet<String>) -> usize {
        if failed.is_empty() {
            return 0;
        }

        let mut removed = 0;
        for page in self.pages.values_mut() {
            let before = page.links.len();
            page.links.retain(|link| !failed.contains(link.path()));
            removed += before - page.links.len();
        }
        removed
    }

    /// Appends an inbound edge to the target of every outbound edge
    ///
    /// Each outbound edge A -> B adds one `{url: A.url}` entry to B's
    /// `linked_from`, so a page linking twice to B appears twice. Edges to
    /// paths absent from the map are skipped; after
    /// [`SiteMap::prune_links_to`] there are none.
    pub fn derive_backlinks(&mut self) {
        let edges: Vec<(String, url::Url)> = self
            .pages
            .values()
            .flat_map(|page| {
                page.links
                    .iter()
                    .map(move |link| (link.path().to_string(), page.url.clone()))
            })
            .collect();

        for (target, source) in edges {
            match self.pages.get_mut(&target) {
                Some(page) => page.linked_from.push(Link::new(source, true)),
                None => tracing::warn!(
                    "Edge from {} points at {} which is not in the sitemap",
                    source.path(),
                    target
                ),
            }
        }
    }
}

impl IntoIterator for SiteMap {
    type Item = (String, Page);
    type IntoIter = std::collections::hash_map::IntoIter<String, Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.into_iter()
    }
}
