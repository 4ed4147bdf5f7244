use url::Url;

/// Schemes that can be fetched over the network
const FETCHABLE_SCHEMES: &[&str] = &["http", "https"];

/// Resolves a possibly-relative reference against a base URL
///
/// Handles every relative form the URL standard defines: path-relative
/// (`page`, `../up`), absolute-path (`/root`), protocol-relative
/// (`//host/path`), query-only (`?q=1`) and fragment-only (`#top`).
///
/// # Returns
///
/// * `Some(Url)` - The absolute URL
/// * `None` - The reference is empty or cannot be resolved
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_inspector::url::resolve;
///
/// let base = Url::parse("https://example.test/docs/intro").unwrap();
/// assert_eq!(resolve(&base, "../about").unwrap().as_str(), "https://example.test/about");
/// assert_eq!(resolve(&base, "//cdn.test/a.png").unwrap().as_str(), "https://cdn.test/a.png");
/// assert!(resolve(&base, "   ").is_none());
/// ```
pub fn resolve(base_url: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    base_url.join(href).ok()
}

/// Returns true if the URL uses a scheme the crawler can request
pub fn is_fetchable(url: &Url) -> bool {
    FETCHABLE_SCHEMES.contains(&url.scheme())
}

/// Decides whether a resolved URL belongs to the crawled site
///
/// A URL is internal when it has no host at all, or when its host equals the
/// site root's host. Comparison is case-insensitive and exact: subdomains are
/// external.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_inspector::url::is_internal;
///
/// let root = Url::parse("https://example.test/").unwrap();
/// assert!(is_internal(&root, &Url::parse("https://EXAMPLE.test/b").unwrap()));
/// assert!(!is_internal(&root, &Url::parse("https://blog.example.test/").unwrap()));
/// ```
pub fn is_internal(site_root: &Url, candidate: &Url) -> bool {
    match candidate.host_str() {
        None | Some("") => true,
        Some(host) => site_root
            .host_str()
            .map(|root| root.eq_ignore_ascii_case(host))
            .unwrap_or(false),
    }
}
