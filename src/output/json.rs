//! JSON report rendering

use crate::output::traits::{CrawlReport, OutputResult};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Renders the report as a JSON object keyed by page URL
///
/// Output is pretty-printed with 4-space indentation:
///
/// ```text
/// {
///     "https://example.test/": {
///         "spelling_issues": { "Helo": "Hello" },
///         "broken_links": []
///     }
/// }
/// ```
pub fn render_report(report: &CrawlReport) -> OutputResult<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    report.serialize(&mut serializer)?;

    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
