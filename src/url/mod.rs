//! URL handling module for Site-Inspector
//!
//! This module resolves references found in pages, normalizes crawl targets
//! and decides which URLs belong to the crawled site.

mod classify;
mod normalize;

// Re-export main functions
pub use classify::{is_fetchable, is_internal, resolve};
pub use normalize::{normalize_parsed, normalize_url};

use ::url::Url;

/// Resolves a reference and returns it as an internal crawl target
///
/// Combines resolution, internal-link filtering and normalization: the result
/// is `Some` only for fetchable URLs on the site root's host, with the fragment
/// stripped.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_inspector::url::internal_target;
///
/// let root = Url::parse("https://example.test/").unwrap();
/// let page = Url::parse("https://example.test/a").unwrap();
///
/// let target = internal_target(&root, &page, "/b#part").unwrap();
/// assert_eq!(target.as_str(), "https://example.test/b");
/// assert!(internal_target(&root, &page, "https://other.test/x").is_none());
/// ```
pub fn internal_target(site_root: &Url, base_url: &Url, href: &str) -> Option<Url> {
    let resolved = resolve(base_url, href)?;
    if !is_fetchable(&resolved) || !is_internal(site_root, &resolved) {
        return None;
    }
    normalize_parsed(resolved).ok()
}
