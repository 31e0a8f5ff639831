//! HTML link extraction
//!
//! Pulls the raw `href` value of every anchor out of a document. Resolution
//! and filtering happen in the page crawler; this module only reads markup.

use scraper::{Html, Selector};

/// Extracts the `href` attribute of every `<a>` element, in document order
///
/// Anchors without an `href` are skipped. Values are returned untouched,
/// including duplicates, fragments and non-HTTP schemes.
///
/// # Example
///
/// ```
/// use smap::crawler::extract_hrefs;
///
/// let html = r#"<a href="/1">one</a><a>none</a><a href="/2">two</a>"#;
/// assert_eq!(extract_hrefs(html), vec!["/1", "/2"]);
/// ```
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}
