use crate::{UrlError, UrlResult};
use url::Url;

/// Parses and checks a site origin
///
/// The origin must be an absolute http(s) URL that can carry a path.
pub fn parse_origin(origin: &str) -> UrlResult<Url> {
    let url = Url::parse(origin).map_err(|e| UrlError::Parse(format!("{}: {}", origin, e)))?;

    if !super::is_http_scheme(&url) {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost(origin.to_string()));
    }

    Ok(url)
}

/// Builds the URL of a listing page: `<origin>/results/<term>/<offset>`
///
/// The search term is percent-encoded as a single path segment, so a term
/// containing `/` or spaces still produces exactly three trailing segments.
///
/// # Examples
///
/// ```
/// use bucket_trawler::url::make_listing_url;
/// use url::Url;
///
/// let origin = Url::parse("https://buckets.example.com").unwrap();
/// let url = make_listing_url(&origin, "xls", 20).unwrap();
/// assert_eq!(url.as_str(), "https://buckets.example.com/results/xls/20");
/// ```
pub fn make_listing_url(origin: &Url, search_term: &str, offset: u64) -> UrlResult<Url> {
    let mut url = origin.clone();
    url.set_query(None);
    url.set_fragment(None);

    url.path_segments_mut()
        .map_err(|_| UrlError::CannotBeABase(origin.to_string()))?
        .pop_if_empty()
        .push("results")
        .push(search_term)
        .push(&offset.to_string());

    Ok(url)
}

/// Joins a site-relative href onto the origin by plain concatenation
///
/// Exactly one `/` separates the two parts regardless of how either side is
/// written. The href is not resolved relative to any page.
pub fn join_site_href(origin: &Url, href: &str) -> UrlResult<Url> {
    let base = origin.as_str().trim_end_matches('/');
    let path = href.trim().trim_start_matches('/');
    let joined = format!("{}/{}", base, path);

    Url::parse(&joined).map_err(|e| UrlError::Parse(format!("{}: {}", joined, e)))
}
