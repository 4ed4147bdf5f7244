//! Single-page analysis
//!
//! A [`PageAnalyzer`] takes one URL through the whole per-page pipeline:
//! robots.txt check, fetch, text extraction, spell check, link and image
//! reachability checks, and discovery of internal links to follow.

use crate::config::HttpConfig;
use crate::crawler::fetcher::{check_link, fetch_page, FetchResult};
use crate::crawler::parser::parse_html;
use crate::crawler::scheduler::Scheduler;
use crate::output::PageResult;
use crate::robots::{self, RobotsPolicy};
use crate::spelling::{check_spelling, SpellCheck};
use crate::state::PageStatus;
use crate::url::{internal_target, is_fetchable, resolve};
use reqwest::Client;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// What happened to one dispatched page
#[derive(Debug)]
pub enum PageOutcome {
    /// Page was fetched and analyzed
    Processed {
        result: PageResult,
        /// Internal links not yet visited when the page was analyzed
        discovered: Vec<Url>,
        /// Number of link and image checks performed
        links_checked: u64,
    },

    /// robots.txt forbids the page
    Disallowed,

    /// The page could not be retrieved
    FetchFailed { error: String },

    /// The page is not an HTML document
    NotHtml { content_type: String },

    /// The crawl was interrupted before the analysis finished
    Cancelled,
}

impl PageOutcome {
    pub fn status(&self) -> PageStatus {
        match self {
            Self::Processed { .. } => PageStatus::Processed,
            Self::Disallowed => PageStatus::Disallowed,
            Self::FetchFailed { .. } => PageStatus::FetchFailed,
            Self::NotHtml { .. } => PageStatus::NotHtml,
            Self::Cancelled => PageStatus::Cancelled,
        }
    }
}

/// Runs the per-page pipeline; shared by all workers of a crawl
pub struct PageAnalyzer {
    client: Client,
    robots: Arc<RobotsPolicy>,
    site_root: Url,
    checker: Arc<dyn SpellCheck>,
    page_timeout: Duration,
    link_timeout: Duration,
}

impl PageAnalyzer {
    pub fn new(
        client: Client,
        robots: Arc<RobotsPolicy>,
        site_root: Url,
        checker: Arc<dyn SpellCheck>,
        http: &HttpConfig,
    ) -> Self {
        Self {
            client,
            robots,
            site_root,
            checker,
            page_timeout: Duration::from_secs(http.page_timeout),
            link_timeout: Duration::from_secs(http.link_check_timeout),
        }
    }

    /// Analyzes one page
    ///
    /// # Pipeline
    ///
    /// 1. robots.txt check; a disallowed page is never fetched
    /// 2. GET the page (see [`fetch_page`] for failure outcomes)
    /// 3. Spell check the visible text
    /// 4. HEAD every `a[href]` and `img[src]` target; failures are broken links
    /// 5. Collect internal links the scheduler has not seen yet
    ///
    /// # Arguments
    ///
    /// * `url` - The page to analyze
    /// * `scheduler` - Used to skip already-visited links during discovery
    pub async fn analyze(&self, url: &Url, scheduler: &Scheduler) -> PageOutcome {
        if !robots::allowed(&self.robots, url) {
            return PageOutcome::Disallowed;
        }

        let (base_url, body) = match fetch_page(&self.client, url, self.page_timeout).await {
            FetchResult::Success {
                final_url,
                status_code,
                body,
            } => {
                if status_code >= 400 {
                    tracing::debug!("{} returned HTTP {}, analyzing body", url, status_code);
                }
                (final_url, body)
            }
            FetchResult::ContentMismatch { content_type } => {
                return PageOutcome::NotHtml { content_type };
            }
            FetchResult::HttpError { status_code } => {
                return PageOutcome::FetchFailed {
                    error: format!("HTTP {}", status_code),
                };
            }
            FetchResult::NetworkError { error } => {
                return PageOutcome::FetchFailed { error };
            }
        };

        let parsed = parse_html(&body);
        let spelling_issues = self.check_text(parsed.text).await;

        let mut result = PageResult::new(url.as_str());
        result.spelling_issues = spelling_issues;

        let (broken_links, links_checked) = self
            .find_broken_links(&base_url, &parsed.references)
            .await;
        result.broken_links = broken_links;

        let discovered = self.discover(&base_url, &parsed.anchors, scheduler);

        PageOutcome::Processed {
            result,
            discovered,
            links_checked,
        }
    }

    /// Spell checks text on the blocking pool
    async fn check_text(&self, text: String) -> BTreeMap<String, Option<String>> {
        let checker = Arc::clone(&self.checker);
        match tokio::task::spawn_blocking(move || check_spelling(&text, checker.as_ref())).await {
            Ok(issues) => issues,
            Err(e) => {
                tracing::warn!("Spell check task failed: {}", e);
                BTreeMap::new()
            }
        }
    }

    /// HEADs every reference in order, returning the broken ones
    ///
    /// Each distinct URL is requested once per page; repeated references
    /// reuse the first verdict and are reported once per occurrence.
    async fn find_broken_links(&self, base_url: &Url, references: &[String]) -> (Vec<String>, u64) {
        let mut verdicts: HashMap<String, bool> = HashMap::new();
        let mut broken = Vec::new();
        let mut checked = 0;

        for reference in references {
            let Some(target) = resolve(base_url, reference) else {
                continue;
            };
            if !is_fetchable(&target) {
                continue;
            }

            let key = target.as_str().to_string();
            let is_broken = match verdicts.get(&key) {
                Some(verdict) => *verdict,
                None => {
                    let status = check_link(&self.client, &target, self.link_timeout).await;
                    checked += 1;
                    if status.is_broken() {
                        tracing::debug!("Broken link {} ({:?})", target, status);
                    }
                    verdicts.insert(key.clone(), status.is_broken());
                    status.is_broken()
                }
            };

            if is_broken {
                broken.push(key);
            }
        }

        (broken, checked)
    }

    fn discover(&self, base_url: &Url, anchors: &[String], scheduler: &Scheduler) -> Vec<Url> {
        let mut seen = HashSet::new();
        anchors
            .iter()
            .filter_map(|href| internal_target(&self.site_root, base_url, href))
            .filter(|target| seen.insert(target.as_str().to_string()))
            .filter(|target| !scheduler.is_visited(target.as_str()))
            .collect()
    }
}
