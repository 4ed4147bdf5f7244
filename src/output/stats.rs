//! Run statistics
//!
//! This module counts what happened to every dispatched page and prints the
//! totals once the crawl is over.

use crate::state::PageStatus;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// When the crawl started
    pub started_at: DateTime<Utc>,

    /// When the crawl finished, once it has
    pub finished_at: Option<DateTime<Utc>>,

    /// Count of dispatched pages by final status
    pub pages_by_status: HashMap<PageStatus, u64>,

    /// Number of link and image checks performed
    pub links_checked: u64,

    /// Whether the crawl was interrupted
    pub interrupted: bool,
}

impl Default for CrawlStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl CrawlStatistics {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            pages_by_status: HashMap::new(),
            links_checked: 0,
            interrupted: false,
        }
    }

    /// Records the final status of one dispatched page
    pub fn record(&mut self, status: PageStatus) {
        *self.pages_by_status.entry(status).or_insert(0) += 1;
    }

    /// Count for a single status
    pub fn count(&self, status: PageStatus) -> u64 {
        self.pages_by_status.get(&status).copied().unwrap_or(0)
    }

    /// Total number of pages dispatched
    pub fn total_dispatched(&self) -> u64 {
        self.pages_by_status.values().sum()
    }

    /// Pages deliberately not analyzed (robots, content type, interrupt)
    pub fn skipped(&self) -> u64 {
        self.sum_where(PageStatus::is_skipped)
    }

    /// Pages that could not be fetched
    pub fn errors(&self) -> u64 {
        self.sum_where(PageStatus::is_error)
    }

    fn sum_where(&self, predicate: fn(&PageStatus) -> bool) -> u64 {
        self.pages_by_status
            .iter()
            .filter(|&(status, _)| predicate(status))
            .map(|(_, count)| count)
            .sum()
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Elapsed wall-clock time in seconds (up to now if still running)
    pub fn duration_seconds(&self) -> f64 {
        let end = self.finished_at.unwrap_or_else(Utc::now);
        (end - self.started_at).num_milliseconds().max(0) as f64 / 1000.0
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    if let Some(finished) = stats.finished_at {
        println!("  Finished: {}", finished.to_rfc3339());
    }
    println!("  Duration: {:.1}s", stats.duration_seconds());
    println!("  Pages dispatched: {}", stats.total_dispatched());
    println!("  Pages skipped: {}", stats.skipped());
    println!("  Fetch errors: {}", stats.errors());
    println!("  Links checked: {}", stats.links_checked);
    if stats.interrupted {
        println!("  Interrupted: yes (partial report)");
    }
    println!();

    println!("Pages by Status:");
    let total = stats.total_dispatched();
    for status in PageStatus::all() {
        let count = stats.count(status);
        if count == 0 {
            continue;
        }
        let percentage = if total > 0 {
            (count as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", status, count, percentage);
    }
    println!();
}
