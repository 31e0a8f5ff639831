use url::Url;

/// An edge from one page to another
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// The target URL, as resolved from the anchor
    pub url: Url,

    /// True when this edge must not start a new crawl job, because its
    /// target was already scheduled by this or another page
    pub already_scheduled: bool,
}

impl Link {
    pub fn new(url: Url, already_scheduled: bool) -> Self {
        Self {
            url,
            already_scheduled,
        }
    }

    /// Graph key of the target page
    pub fn path(&self) -> &str {
        self.url.path()
    }
}

/// An ordered list of edges
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links(Vec<Link>);

impl Links {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, link: Link) {
        self.0.push(link);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Link> {
        self.0.iter()
    }

    /// Keeps only the edges matching `keep`, preserving order
    pub fn retain(&mut self, keep: impl FnMut(&Link) -> bool) {
        self.0.retain(keep);
    }

    /// Target paths of every edge, in order
    pub fn paths(&self) -> Vec<String> {
        self.0.iter().map(|l| l.path().to_string()).collect()
    }
}

impl<'a> IntoIterator for &'a Links {
    type Item = &'a Link;
    type IntoIter = std::slice::Iter<'a, Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Link> for Links {
    fn from_iter<I: IntoIterator<Item = Link>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
