//! Output module for generating crawl reports
//!
//! This module handles:
//! - Collecting per-page results into the crawl report
//! - Rendering the JSON report and the text summary
//! - Writing both documents to disk
//! - Recording crawl statistics

mod json;
pub mod stats;
mod text;
mod traits;

pub use json::render_report;
pub use stats::{print_statistics, CrawlStatistics};
pub use text::render_summary;
pub use traits::{CrawlReport, CrawlSummary, OutputError, OutputResult, PageResult};

use crate::config::OutputConfig;
use std::path::{Path, PathBuf};

/// Writes the JSON report and the text summary
///
/// Both documents are rendered and staged next to their targets before
/// either target is replaced. A rendering failure or a failed staging write
/// leaves any previous reports untouched; only a failure between the two
/// final renames can leave them from different runs.
///
/// # Arguments
///
/// * `report` - The crawl report
/// * `config` - Output paths
///
/// # Returns
///
/// * `Ok(())` - Both files written
/// * `Err(OutputError)` - Rendering or a filesystem write failed
pub fn write_reports(report: &CrawlReport, config: &OutputConfig) -> OutputResult<()> {
    let json = render_report(report)?;
    let summary = render_summary(report);

    let report_path = Path::new(&config.report_path);
    let summary_path = Path::new(&config.summary_path);

    let staged_report = stage_file(report_path, &json)?;
    let staged_summary = match stage_file(summary_path, &summary) {
        Ok(staged) => staged,
        Err(e) => {
            let _ = std::fs::remove_file(&staged_report);
            return Err(e);
        }
    };

    commit_file(&staged_report, report_path)?;
    commit_file(&staged_summary, summary_path)?;

    tracing::info!(
        "Wrote report to {} and summary to {}",
        config.report_path,
        config.summary_path
    );
    Ok(())
}

/// Staging path used while a document is being written
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}

/// Writes `content` to the staging path of `path`
fn stage_file(path: &Path, content: &str) -> OutputResult<PathBuf> {
    let staged = staging_path(path);
    std::fs::write(&staged, content).map_err(|source| OutputError::Write {
        path: staged.display().to_string(),
        source,
    })?;
    Ok(staged)
}

fn commit_file(staged: &Path, path: &Path) -> OutputResult<()> {
    std::fs::rename(staged, path).map_err(|source| {
        let _ = std::fs::remove_file(staged);
        OutputError::Write {
            path: path.display().to_string(),
            source,
        }
    })
}
