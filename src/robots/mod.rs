//! Robots.txt handling module
//!
//! This module fetches and evaluates the crawled site's robots.txt. Every
//! failure on this path fails open: an unavailable or unreadable robots.txt
//! yields a policy that allows everything.

mod parser;

pub use parser::RobotsPolicy;

use reqwest::Client;
use std::time::Duration;
use url::Url;

/// User agent token used for robots.txt evaluation
pub const ROBOTS_USER_AGENT: &str = "*";

/// Fetches and parses robots.txt for the site
///
/// The file is requested from `/robots.txt` relative to the site root. A
/// transport error, a non-2xx status or an unreadable body all produce
/// [`RobotsPolicy::allow_all`].
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `site_root` - Any URL on the site; only its origin is used
/// * `timeout` - Request timeout for the robots.txt fetch
pub async fn load(client: &Client, site_root: &Url, timeout: Duration) -> RobotsPolicy {
    let robots_url = match site_root.join("/robots.txt") {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Cannot build robots.txt URL for {}: {}", site_root, e);
            return RobotsPolicy::allow_all();
        }
    };

    tracing::debug!("Fetching robots.txt from {}", robots_url);

    let response = match client.get(robots_url.as_str()).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::info!("robots.txt unavailable ({}), allowing all", e);
            return RobotsPolicy::allow_all();
        }
    };

    if !response.status().is_success() {
        tracing::info!(
            "robots.txt returned HTTP {}, allowing all",
            response.status().as_u16()
        );
        return RobotsPolicy::allow_all();
    }

    match response.text().await {
        Ok(body) => {
            tracing::debug!("Loaded robots.txt ({} bytes)", body.len());
            RobotsPolicy::from_content(&body)
        }
        Err(e) => {
            tracing::info!("robots.txt body unreadable ({}), allowing all", e);
            RobotsPolicy::allow_all()
        }
    }
}

/// Checks if a URL may be crawled under the policy
///
/// Evaluated for the generic `*` user agent; evaluation failures allow.
pub fn allowed(policy: &RobotsPolicy, url: &Url) -> bool {
    policy.is_allowed(url.as_str(), ROBOTS_USER_AGENT)
}
