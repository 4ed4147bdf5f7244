//! Report types and output errors
//!
//! This module defines the per-page result, the report map that collects
//! them, and the aggregate counts shown in the text summary.

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Findings for one processed page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageResult {
    /// The page URL (the report key, so not repeated in the value)
    #[serde(skip)]
    pub url: String,

    /// Misspelled word and its suggested correction
    pub spelling_issues: BTreeMap<String, Option<String>>,

    /// Absolute URLs of broken links and images, in encounter order
    pub broken_links: Vec<String>,
}

impl PageResult {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn has_spelling_issues(&self) -> bool {
        !self.spelling_issues.is_empty()
    }

    pub fn has_broken_links(&self) -> bool {
        !self.broken_links.is_empty()
    }
}

/// All page results of a crawl, keyed and sorted by page URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CrawlReport {
    pages: BTreeMap<String, PageResult>,
}

impl CrawlReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page result
    ///
    /// Returns false and keeps the existing entry if the URL is already
    /// present.
    pub fn insert(&mut self, result: PageResult) -> bool {
        if self.pages.contains_key(&result.url) {
            return false;
        }
        self.pages.insert(result.url.clone(), result);
        true
    }

    pub fn get(&self, url: &str) -> Option<&PageResult> {
        self.pages.get(url)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.pages.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Page URLs in sorted order
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    /// Page results in URL order
    pub fn pages(&self) -> impl Iterator<Item = &PageResult> {
        self.pages.values()
    }

    pub fn summary(&self) -> CrawlSummary {
        CrawlSummary::from_report(self)
    }
}

/// Aggregate counts over a crawl report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    pub total_pages: usize,
    /// Sum of per-page misspelled word counts
    pub total_spelling_mistakes: usize,
    pub total_broken_links: usize,
}

impl CrawlSummary {
    pub fn from_report(report: &CrawlReport) -> Self {
        report.pages().fold(
            Self {
                total_pages: report.len(),
                ..Self::default()
            },
            |mut acc, page| {
                acc.total_spelling_mistakes += page.spelling_issues.len();
                acc.total_broken_links += page.broken_links.len();
                acc
            },
        )
    }
}
