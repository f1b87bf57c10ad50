use url::Url;

/// Query parameter that selects the listing page
const PAGE_PARAM: &str = "page";

/// Reduces a page URL to the identity the crawl frontier deduplicates on
///
/// # Normalization Steps
///
/// 1. Remove fragment (everything after #)
/// 2. Remove trailing slash (except for root /)
/// 3. Drop `page=1`, which serves the same table as the unpaginated listing
/// 4. Sort remaining query parameters alphabetically
/// 5. Remove empty query string (trailing ?)
///
/// Host lower-casing and dot-segment removal already happen when the URL is parsed.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use warn_alerts::url::canonical_page_url;
///
/// let url = Url::parse("https://example.com/Records?page=2&year=2025#top").unwrap();
/// assert_eq!(
///     canonical_page_url(&url).as_str(),
///     "https://example.com/Records?page=2&year=2025"
/// );
/// ```
pub fn canonical_page_url(url: &Url) -> Url {
    let mut url = url.clone();

    url.set_fragment(None);

    let path = trim_trailing_slash(url.path());
    url.set_path(&path);

    if url.query().is_some() {
        let params = sorted_query_params(&url);

        if params.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(params);
        }
    }

    url
}

fn trim_trailing_slash(path: &str) -> String {
    if path.is_empty() {
        return "/".to_string();
    }

    if path.len() > 1 && path.ends_with('/') {
        path[..path.len() - 1].to_string()
    } else {
        path.to_string()
    }
}

/// Sorts query parameters by key, dropping the first-page marker
fn sorted_query_params(url: &Url) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, value)| !(key.eq_ignore_ascii_case(PAGE_PARAM) && value == "1"))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    // Stable, so repeated keys keep their relative order
    params.sort_by(|a, b| a.0.cmp(&b.0));

    params
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canon(s: &str) -> String {
        canonical_page_url(&Url::parse(s).unwrap()).to_string()
    }

    #[test]
    fn test_remove_fragment() {
        assert_eq!(
            canon("https://example.com/Records?page=2#section"),
            "https://example.com/Records?page=2"
        );
    }

    #[test]
    fn test_remove_trailing_slash() {
        assert_eq!(
            canon("https://example.com/Records/"),
            "https://example.com/Records"
        );
    }

    #[test]
    fn test_keep_root_slash() {
        assert_eq!(canon("https://example.com/"), "https://example.com/");
    }

    #[test]
    fn test_sort_query_params() {
        assert_eq!(
            canon("https://example.com/Records?year=2025&page=3"),
            "https://example.com/Records?page=3&year=2025"
        );
    }

    #[test]
    fn test_first_page_matches_seed() {
        assert_eq!(
            canon("https://example.com/Records?year=2025&page=1"),
            canon("https://example.com/Records?year=2025")
        );
    }

    #[test]
    fn test_only_first_page_param_removes_query() {
        assert_eq!(
            canon("https://example.com/Records?page=1"),
            "https://example.com/Records"
        );
    }

    #[test]
    fn test_lowercase_host() {
        assert_eq!(
            canon("https://EXAMPLE.COM/Records"),
            "https://example.com/Records"
        );
    }
}
