//! Page status definitions for tracking what happened to each dispatched URL

use std::fmt;

/// Final status of a page after its analysis finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageStatus {
    // ===== Success =====
    /// Page was fetched, analyzed and recorded in the report
    Processed,

    // ===== Skip States =====
    /// robots.txt disallows the page; it was never fetched
    Disallowed,

    /// Page Content-Type is not HTML
    NotHtml,

    /// Analysis was abandoned because the crawl was interrupted
    Cancelled,

    // ===== Error States =====
    /// Page could not be fetched (timeout, connection error, empty error response)
    FetchFailed,
}

impl PageStatus {
    /// Returns true if the page is recorded in the report and consumes budget
    pub fn is_recorded(&self) -> bool {
        matches!(self, Self::Processed)
    }

    /// Returns true if this represents a deliberate skip
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Disallowed | Self::NotHtml | Self::Cancelled)
    }

    /// Returns true if this represents an error
    pub fn is_error(&self) -> bool {
        matches!(self, Self::FetchFailed)
    }

    /// Short label used in logs and statistics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Disallowed => "disallowed",
            Self::NotHtml => "not_html",
            Self::Cancelled => "cancelled",
            Self::FetchFailed => "fetch_failed",
        }
    }

    /// Returns all possible page statuses
    pub fn all() -> [Self; 5] {
        [
            Self::Processed,
            Self::Disallowed,
            Self::NotHtml,
            Self::Cancelled,
            Self::FetchFailed,
        ]
    }
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
