use crate::UrlError;
use url::Url;

/// Normalizes a URL into its crawl identity
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Require an `http` or `https` scheme
/// 3. Require a host (the `url` crate lowercases it during parsing)
/// 4. Remove the fragment (everything after #)
///
/// Path and query are kept byte-for-byte: two URLs that differ there may serve
/// different pages, so they are different crawl targets.
///
/// # Examples
///
/// ```
/// use site_inspector::url::normalize_url;
///
/// let url = normalize_url("https://EXAMPLE.test/docs?page=2#intro").unwrap();
/// assert_eq!(url.as_str(), "https://example.test/docs?page=2");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;
    normalize_parsed(url)
}

/// Normalizes an already-parsed URL
///
/// Same rules as [`normalize_url`], without re-parsing.
pub fn normalize_parsed(mut url: Url) -> Result<Url, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlError::MissingHost),
    }

    url.set_fragment(None);

    Ok(url)
}
