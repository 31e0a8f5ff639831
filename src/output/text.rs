use crate::output::view::PageView;
use crate::sitemap::SiteMap;

/// Formats the site map as a human-readable listing
///
/// Pages appear in sorted path order, each followed by a blank line:
///
/// ```text
/// Path: /1/
/// Redirect: true
/// Redirect Url: /2/
/// Links:
/// Linked From:
///     /
/// ```
pub fn format_text(sitemap: &SiteMap) -> String {
    let mut out = String::new();

    for page in sitemap.sorted_pages() {
        let view = PageView::from(page);

        out.push_str(&format!("Path: {}\n", view.path));
        out.push_str(&format!("Redirect: {}\n", view.is_redirect));
        out.push_str(&format!(
            "Redirect Url: {}\n",
            view.redirects_to.as_deref().unwrap_or("null")
        ));

        out.push_str("Links:\n");
        for path in &view.links {
            out.push_str(&format!("\t{}\n", path));
        }

        out.push_str("Linked From:\n");
        for path in &view.linked_from {
            out.push_str(&format!("\t{}\n", path));
        }

        out.push('\n');
    }

    out
}
