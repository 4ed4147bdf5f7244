//! Plain-text summary generation
//!
//! This module generates the human-readable summary of a crawl: which pages
//! have spelling issues, the misspelled words with their suggestions, and the
//! broken links and images per page, followed by overall totals.

use crate::output::traits::CrawlReport;
use std::fmt::Write;

/// Formats a crawl report as the text summary
///
/// # Arguments
///
/// * `report` - The crawl report
///
/// # Returns
///
/// The summary text; sections without entries show ` None`
pub fn render_summary(report: &CrawlReport) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_summary(report, &mut out);
    out
}

fn write_summary(report: &CrawlReport, out: &mut String) -> std::fmt::Result {
    writeln!(out, "=== Summary Report ===")?;
    writeln!(out)?;

    // Spelling issues
    writeln!(out, "Page URLs with spelling issues:")?;
    let mut found = false;
    for page in report.pages().filter(|p| p.has_spelling_issues()) {
        writeln!(out, " - {}", page.url)?;
        found = true;
    }
    if !found {
        writeln!(out, " None")?;
    }

    // Misspelled words
    writeln!(out)?;
    writeln!(out, "Misspelled words (with suggestions):")?;
    let mut found = false;
    for page in report.pages() {
        for (word, suggestion) in &page.spelling_issues {
            writeln!(
                out,
                " - {} (suggestion: {})",
                word,
                suggestion.as_deref().unwrap_or("None")
            )?;
            found = true;
        }
    }
    if !found {
        writeln!(out, " None")?;
    }

    // Broken links/images
    writeln!(out)?;
    writeln!(out, "Page URLs with broken links/images:")?;
    let mut found = false;
    for page in report.pages().filter(|p| p.has_broken_links()) {
        writeln!(out, " - {}", page.url)?;
        for link in &page.broken_links {
            writeln!(out, "    * {}", link)?;
        }
        found = true;
    }
    if !found {
        writeln!(out, " None")?;
    }

    let summary = report.summary();
    writeln!(out)?;
    writeln!(out, "=== Crawl Summary ===")?;
    writeln!(out, "Total Pages Crawled: {}", summary.total_pages)?;
    writeln!(out, "Total Spelling Mistakes: {}", summary.total_spelling_mistakes)?;
    writeln!(out, "Total Broken Links/Images: {}", summary.total_broken_links)?;

    Ok(())
}
