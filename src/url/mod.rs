//! URL handling module for WARN Alerts
//!
//! This module builds the listing and download URLs for the configured origin,
//! resolves links found in fetched pages, and decides which of them point at
//! further pages of the listing.

mod normalize;

use crate::{UrlError, UrlResult};
use url::Url;

pub use normalize::canonical_page_url;

/// Path of the paginated notice listing
pub const LISTING_PATH: &str = "/WarnList/Records";

/// Path of the attachment download endpoint
pub const DOWNLOAD_PATH: &str = "/WarnList/DownloadAzureFile";

/// Token a link target must contain to count as a pagination link
const PAGE_TOKEN: &str = "page";

/// Parses and validates the site origin
///
/// Only HTTP(S) origins with a host are accepted. Any path is discarded.
///
/// # Examples
///
/// ```
/// use warn_alerts::url::parse_origin;
///
/// let origin = parse_origin("https://reactwarn.floridajobs.org/ignored").unwrap();
/// assert_eq!(origin.as_str(), "https://reactwarn.floridajobs.org/");
/// ```
pub fn parse_origin(origin: &str) -> UrlResult<Url> {
    let mut url = Url::parse(origin).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_path("/");
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// Builds the seed URL of the listing for one year
pub fn listing_url(origin: &Url, year: i32) -> Url {
    let mut url = origin.clone();
    url.set_path(LISTING_PATH);
    url.query_pairs_mut()
        .clear()
        .append_pair("year", &year.to_string());
    url
}

/// Builds the attachment link for a download token
///
/// The token is opaque and appended verbatim.
pub fn download_url(origin: &Url, token: &str) -> String {
    let mut base = origin.clone();
    base.set_path(DOWNLOAD_PATH);
    base.set_query(None);
    format!("{}?file={}", base, token)
}

/// Resolves a link href against the site origin and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
pub fn resolve_link(href: &str, origin: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match origin.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url)
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

/// Returns true if the URL's path or query carries the page token
///
/// The host is deliberately not inspected.
pub fn is_pagination_link(url: &Url) -> bool {
    let path = url.path().to_ascii_lowercase();
    let query = url.query().unwrap_or("").to_ascii_lowercase();
    path.contains(PAGE_TOKEN) || query.contains(PAGE_TOKEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Url {
        parse_origin("https://warn.example.org").unwrap()
    }

    #[test]
    fn test_parse_origin_rejects_ftp() {
        let result = parse_origin("ftp://warn.example.org");
        assert!(matches!(result, Err(UrlError::InvalidScheme(_))));
    }

    #[test]
    fn test_parse_origin_rejects_garbage() {
        assert!(matches!(parse_origin("not a url"), Err(UrlError::Parse(_))));
    }

    #[test]
    fn test_listing_url() {
        let url = listing_url(&origin(), 2025);
        assert_eq!(
            url.as_str(),
            "https://warn.example.org/WarnList/Records?year=2025"
        );
    }

    #[test]
    fn test_download_url_appends_token() {
        assert_eq!(
            download_url(&origin(), "abc123.pdf"),
            "https://warn.example.org/WarnList/DownloadAzureFile?file=abc123.pdf"
        );
    }

    #[test]
    fn test_resolve_relative_link() {
        let url = resolve_link("/WarnList/Records?year=2025&page=2", &origin()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://warn.example.org/WarnList/Records?year=2025&page=2"
        );
    }

    #[test]
    fn test_resolve_absolute_link() {
        let url = resolve_link("https://other.example.org/x?page=2", &origin()).unwrap();
        assert_eq!(url.host_str(), Some("other.example.org"));
    }

    #[test]
    fn test_skip_special_links() {
        assert!(resolve_link("javascript:void(0)", &origin()).is_none());
        assert!(resolve_link("mailto:hr@example.org", &origin()).is_none());
        assert!(resolve_link("#top", &origin()).is_none());
        assert!(resolve_link("   ", &origin()).is_none());
    }

    #[test]
    fn test_pagination_link_detection() {
        let paged = resolve_link("/WarnList/Records?year=2025&page=3", &origin()).unwrap();
        let paged_path = resolve_link("/WarnList/Page/3", &origin()).unwrap();
        let other = resolve_link("/WarnList/About", &origin()).unwrap();

        assert!(is_pagination_link(&paged));
        assert!(is_pagination_link(&paged_path));
        assert!(!is_pagination_link(&other));
    }

    #[test]
    fn test_pagination_ignores_host() {
        let url = Url::parse("https://homepage.example.org/about").unwrap();
        assert!(!is_pagination_link(&url));
    }
}
