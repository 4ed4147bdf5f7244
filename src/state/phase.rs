//! Crawl phase state machine

use std::fmt;

/// Lifecycle phase of a crawl run
///
/// ```text
/// Running ──► Draining ──► Done
///    └────────────────────►┘
/// ```
///
/// `Running` dispatches work and accepts new frontier entries. `Draining`
/// lets in-flight work finish but dispatches nothing new and accepts no new
/// links; it is entered when the page budget is exhausted or the crawl is
/// cancelled. `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CrawlPhase {
    #[default]
    Running,
    Draining,
    Done,
}

impl CrawlPhase {
    /// Returns true if moving from `self` to `next` is a legal transition
    ///
    /// Staying in the same phase is always legal.
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        use CrawlPhase::*;
        matches!(
            (self, next),
            (Running, Running)
                | (Running, Draining)
                | (Running, Done)
                | (Draining, Draining)
                | (Draining, Done)
                | (Done, Done)
        )
    }

    /// Returns true if new work may be dispatched in this phase
    pub fn accepts_dispatch(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Done => "done",
        };
        f.write_str(label)
    }
}
