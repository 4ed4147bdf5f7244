//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the shared HTTP client
//! - GET requests to fetch page content
//! - HEAD requests to check link and image reachability
//! - Error classification

use crate::config::HttpConfig;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Maximum redirect hops followed for pages and link checks
const MAX_REDIRECTS: usize = 10;

/// Result of a page fetch
#[derive(Debug)]
pub enum FetchResult {
    /// The page body was retrieved
    Success {
        /// Final URL after redirects
        final_url: Url,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Page is not HTML (Content-Type mismatch)
    ContentMismatch {
        /// The actual Content-Type received
        content_type: String,
    },

    /// Error status with nothing to analyze
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Reachability of a single link or image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStatus {
    /// Responded with a status below 400
    Reachable(u16),
    /// Responded with status 400 or above
    Broken(u16),
    /// No response (timeout, DNS, connection, redirect loop)
    Unreachable(String),
}

impl LinkStatus {
    pub fn is_broken(&self) -> bool {
        !matches!(self, Self::Reachable(_))
    }
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed (up to 10 hops). Per-request timeouts are applied by
/// the callers, since pages, link checks and robots.txt use different limits.
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use site_inspector::config::HttpConfig;
/// use site_inspector::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .connect_timeout(Duration::from_secs(config.page_timeout))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Returns true if a Content-Type header value denotes an HTML document
pub fn is_html_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    mime == "text/html" || mime == "application/xhtml+xml"
}

/// Fetches a page with a GET request
///
/// # Outcomes
///
/// | Condition | Result |
/// |-----------|--------|
/// | Transport error or timeout | `NetworkError` |
/// | Content-Type present and not HTML | `ContentMismatch` |
/// | Non-2xx with an empty body | `HttpError` |
/// | Any other response | `Success` |
///
/// A missing Content-Type header is treated as HTML.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `timeout` - Total request timeout
pub async fn fetch_page(client: &Client, url: &Url, timeout: Duration) -> FetchResult {
    let response = match client.get(url.as_str()).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => return FetchResult::NetworkError { error: classify_error(&e) },
    };

    let status = response.status();
    let final_url = response.url().clone();

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    if let Some(content_type) = content_type {
        if !is_html_content_type(&content_type) {
            return FetchResult::ContentMismatch { content_type };
        }
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => return FetchResult::NetworkError { error: classify_error(&e) },
    };

    if !status.is_success() && body.trim().is_empty() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    FetchResult::Success {
        final_url,
        status_code: status.as_u16(),
        body,
    }
}

/// Checks whether a link or image URL is reachable with a HEAD request
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to check
/// * `timeout` - Request timeout
pub async fn check_link(client: &Client, url: &Url, timeout: Duration) -> LinkStatus {
    match client.head(url.as_str()).timeout(timeout).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            if status >= 400 {
                LinkStatus::Broken(status)
            } else {
                LinkStatus::Reachable(status)
            }
        }
        Err(e) => LinkStatus::Unreachable(classify_error(&e)),
    }
}

fn classify_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        "Connection refused".to_string()
    } else if e.is_redirect() {
        "Too many redirects".to_string()
    } else {
        e.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> Client {
        build_http_client(&HttpConfig::default()).unwrap()
    }

    fn url(server: &MockServer, p: &str) -> Url {
        Url::parse(&format!("{}{}", server.uri(), p)).unwrap()
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(&HttpConfig::default()).is_ok());
    }

    #[test]
    fn test_is_html_content_type() {
        assert!(is_html_content_type("text/html"));
        assert!(is_html_content_type("text/html; charset=utf-8"));
        assert!(is_html_content_type("TEXT/HTML"));
        assert!(is_html_content_type("application/xhtml+xml"));
        assert!(!is_html_content_type("application/pdf"));
        assert!(!is_html_content_type("image/png"));
    }

    #[tokio::test]
    async fn test_fetch_html_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("<p>hi</p>", "text/html"),
            )
            .mount(&server)
            .await;

        let result = fetch_page(&client(), &url(&server, "/page"), Duration::from_secs(5)).await;
        match result {
            FetchResult::Success { status_code, body, .. } => {
                assert_eq!(status_code, 200);
                assert_eq!(body, "<p>hi</p>");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_non_html() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doc.pdf"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(vec![0u8; 16], "application/pdf"),
            )
            .mount(&server)
            .await;

        let result = fetch_page(&client(), &url(&server, "/doc.pdf"), Duration::from_secs(5)).await;
        assert!(matches!(result, FetchResult::ContentMismatch { .. }));
    }

    #[tokio::test]
    async fn test_fetch_error_with_body_is_processed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone"))
            .respond_with(
                ResponseTemplate::new(404).set_body_raw("<h1>Not found</h1>", "text/html"),
            )
            .mount(&server)
            .await;

        let result = fetch_page(&client(), &url(&server, "/gone"), Duration::from_secs(5)).await;
        assert!(matches!(result, FetchResult::Success { status_code: 404, .. }));
    }

    #[tokio::test]
    async fn test_fetch_error_without_body() {
        let server = MockServer::start().await;

        let result = fetch_page(&client(), &url(&server, "/missing"), Duration::from_secs(5)).await;
        assert!(matches!(result, FetchResult::HttpError { status_code: 404 }));
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let result = fetch_page(&client(), &url(&server, "/"), Duration::from_millis(200)).await;
        assert!(matches!(result, FetchResult::NetworkError { .. }));
    }

    #[tokio::test]
    async fn test_check_link_statuses() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/moved"))
            .respond_with(ResponseTemplate::new(301).insert_header("location", "/ok"))
            .mount(&server)
            .await;

        let timeout = Duration::from_secs(5);
        assert_eq!(
            check_link(&client(), &url(&server, "/ok"), timeout).await,
            LinkStatus::Reachable(200)
        );
        assert_eq!(
            check_link(&client(), &url(&server, "/moved"), timeout).await,
            LinkStatus::Reachable(200)
        );
        assert_eq!(
            check_link(&client(), &url(&server, "/missing.png"), timeout).await,
            LinkStatus::Broken(404)
        );
    }

    #[tokio::test]
    async fn test_check_link_unreachable() {
        let target = Url::parse("http://127.0.0.1:9/x").unwrap();
        let status = check_link(&client(), &target, Duration::from_secs(2)).await;
        assert!(status.is_broken());
        assert!(matches!(status, LinkStatus::Unreachable(_)));
    }
}
