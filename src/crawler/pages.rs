//! Pagination link discovery
//!
//! The listing publishes no page count, so every fetched page is searched for
//! links to further pages. Only the listing table is searched when the page
//! has one, which keeps site navigation links out of the frontier.

use crate::crawler::parser::elements_named;
use crate::url::{canonical_page_url, is_pagination_link, resolve_link};
use scraper::{ElementRef, Html};
use std::collections::{BTreeMap, BTreeSet};
use url::Url;

/// Returns the distinct pagination links referenced by a page
///
/// Links are resolved against `origin` and only links on the same origin are
/// kept. Two hrefs that name the same page collapse into one entry, which
/// keeps the first href's URL as written.
///
/// # Example
///
/// ```
/// use url::Url;
/// use warn_alerts::crawler::discover_pages;
///
/// let html = r#"<table><tr><td>
///     <a href="/WarnList/Records?year=2025&page=2">2</a>
///     <a href="/WarnList/Records?year=2025&page=2">Next</a>
/// </td></tr></table>"#;
/// let origin = Url::parse("https://warn.example.org").unwrap();
/// assert_eq!(discover_pages(html, &origin).len(), 1);
/// ```
pub fn discover_pages(html: &str, origin: &Url) -> BTreeSet<Url> {
    let document = Html::parse_document(html);
    let root = document.root_element();
    let scope = elements_named(root, &["table"]).next().unwrap_or(root);
    discover_in(scope, origin)
}

/// Collects pagination links below one element
pub(crate) fn discover_in(scope: ElementRef<'_>, origin: &Url) -> BTreeSet<Url> {
    // Canonical form to the first resolved URL seen for that page
    let mut pages: BTreeMap<String, Url> = BTreeMap::new();

    for anchor in elements_named(scope, &["a"]) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        match resolve_link(href, origin) {
            Some(url) if url.origin() != origin.origin() => {
                tracing::trace!("Ignoring off-site link {}", url);
            }
            Some(mut url) if is_pagination_link(&url) => {
                url.set_fragment(None);
                pages
                    .entry(canonical_page_url(&url).into())
                    .or_insert(url);
            }
            Some(url) => tracing::trace!("Ignoring non-pagination link {}", url),
            None => {}
        }
    }

    pages.into_values().collect()
}
