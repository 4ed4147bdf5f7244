//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: lifecycle of the whole crawl (running, draining, done)
//! - `PageStatus`: what happened to each dispatched page

mod page_status;
mod phase;

// Re-export main types
pub use page_status::PageStatus;
pub use phase::CrawlPhase;
