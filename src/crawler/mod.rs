//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and link reachability checks
//! - HTML parsing for visible text, links and images
//! - Per-page analysis
//! - Frontier, budget and phase bookkeeping
//! - Overall crawl coordination

mod analyzer;
mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use analyzer::{PageAnalyzer, PageOutcome};
pub use coordinator::Coordinator;
pub use fetcher::{
    build_http_client, check_link, fetch_page, is_html_content_type, FetchResult, LinkStatus,
};
pub use parser::{parse_html, ParsedPage};
pub use scheduler::Scheduler;
