use crate::output::view::PageView;
use crate::output::OutputResult;
use crate::sitemap::SiteMap;
use std::collections::BTreeMap;

/// Renders the site map as a JSON object keyed by path
///
/// Keys come out in sorted order so runs over the same site are comparable.
pub fn to_json(sitemap: &SiteMap) -> OutputResult<String> {
    Ok(serde_json::to_string(&views_by_path(sitemap))?)
}

fn views_by_path(sitemap: &SiteMap) -> BTreeMap<&str, PageView> {
    sitemap
        .pages()
        .map(|page| (page.path(), PageView::from(page)))
        .collect()
}
