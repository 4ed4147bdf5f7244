//! Scheduler for managing the crawl frontier and page budget
//!
//! This module handles:
//! - The FIFO frontier of URLs awaiting dispatch
//! - The visited set used for deduplication
//! - A backlog of links that arrived while the budget had no room
//! - Budget accounting (recorded + in-flight pages never exceed `max_pages`)
//! - The crawl phase (running, draining, done)
//!
//! All state lives in one [`SchedulerState`] behind a mutex, and every
//! operation on it is a single critical section.

use crate::state::CrawlPhase;
use crate::InspectorError;
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use url::Url;

/// Mutable crawl bookkeeping shared by the coordinator and the workers
#[derive(Debug)]
struct SchedulerState {
    /// URLs awaiting dispatch, breadth-first
    frontier: VecDeque<Url>,

    /// Normalized URLs ever queued or dispatched
    visited: HashSet<String>,

    /// In-scope links turned away for lack of room, in discovery order
    backlog: VecDeque<Url>,

    /// Normalized URLs currently held in `backlog`
    backlogged: HashSet<String>,

    /// Pages recorded in the report
    completed: u32,

    /// Pages dispatched and not yet completed
    in_flight: u32,

    phase: CrawlPhase,

    max_pages: u32,
}

impl SchedulerState {
    fn has_dispatch_headroom(&self) -> bool {
        self.completed + self.in_flight < self.max_pages
    }

    fn has_frontier_headroom(&self) -> bool {
        (self.completed + self.in_flight) as usize + self.frontier.len() < self.max_pages as usize
    }

    /// Moves backlogged links into the frontier while room remains
    fn refill(&mut self) {
        while self.phase.accepts_dispatch() && self.has_frontier_headroom() {
            let Some(url) = self.backlog.pop_front() else {
                break;
            };
            let key = url.as_str().to_string();
            self.backlogged.remove(&key);
            if self.visited.insert(key) {
                self.frontier.push_back(url);
            }
        }
    }

    fn transition(&mut self, to: CrawlPhase) -> Result<(), InspectorError> {
        if !self.phase.can_transition_to(to) {
            return Err(InspectorError::InvalidTransition {
                from: self.phase,
                to,
            });
        }
        if self.phase != to {
            tracing::debug!("Crawl phase {} -> {}", self.phase, to);
        }
        self.phase = to;
        Ok(())
    }
}

/// Cloneable handle to the shared crawl bookkeeping
#[derive(Debug, Clone)]
pub struct Scheduler {
    state: Arc<Mutex<SchedulerState>>,
}

impl Scheduler {
    /// Creates a new scheduler
    ///
    /// # Arguments
    ///
    /// * `max_pages` - Maximum number of pages recorded in the report
    pub fn new(max_pages: u32) -> Self {
        Self {
            state: Arc::new(Mutex::new(SchedulerState {
                frontier: VecDeque::new(),
                visited: HashSet::new(),
                backlog: VecDeque::new(),
                backlogged: HashSet::new(),
                completed: 0,
                in_flight: 0,
                phase: CrawlPhase::Running,
                max_pages,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SchedulerState> {
        // The state stays consistent across a panicking holder; every
        // critical section is a handful of counter and collection updates.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seeds the crawl with its starting URL
    ///
    /// The seed is always marked visited, but only enters the frontier when
    /// the budget allows at least one page.
    pub fn seed(&self, url: Url) {
        let mut state = self.lock();
        state.visited.insert(url.as_str().to_string());
        if state.has_frontier_headroom() {
            state.frontier.push_back(url);
        }
    }

    /// Offers a discovered URL to the frontier
    ///
    /// The URL is admitted only while the crawl is running and if it was never
    /// seen before. When the budget leaves no room for it, the URL is not
    /// marked visited but parked in the backlog, and enters the frontier once
    /// a page finishes without consuming budget.
    ///
    /// # Returns
    ///
    /// `true` if the URL was added to the frontier
    pub fn try_admit(&self, url: Url) -> bool {
        let mut state = self.lock();
        if !state.phase.accepts_dispatch() {
            return false;
        }
        let key = url.as_str().to_string();
        if state.visited.contains(&key) {
            return false;
        }

        // A non-empty backlog means no room, so arrival order is kept
        if !state.has_frontier_headroom() {
            if state.backlogged.insert(key) {
                state.backlog.push_back(url);
            }
            return false;
        }

        state.visited.insert(key);
        state.frontier.push_back(url);
        true
    }

    /// Returns true if the URL was already queued or dispatched
    pub fn is_visited(&self, url: &str) -> bool {
        self.lock().visited.contains(url)
    }

    /// Returns true if at least one URL could be dispatched right now
    pub fn can_dispatch(&self) -> bool {
        let state = self.lock();
        state.phase.accepts_dispatch()
            && !state.frontier.is_empty()
            && state.has_dispatch_headroom()
    }

    /// Pops up to `limit` URLs for dispatch and counts them as in flight
    pub fn next_batch(&self, limit: usize) -> Vec<Url> {
        let mut state = self.lock();
        let mut batch = Vec::new();

        while batch.len() < limit
            && state.phase.accepts_dispatch()
            && state.has_dispatch_headroom()
        {
            let Some(url) = state.frontier.pop_front() else {
                break;
            };
            state.in_flight += 1;
            batch.push(url);
        }

        batch
    }

    /// Releases the in-flight slot of a finished page
    ///
    /// A recorded page consumes budget; once the budget is spent the crawl
    /// starts draining. A page that was not recorded gives its slot back, and
    /// backlogged links move into the frontier to use it.
    ///
    /// # Returns
    ///
    /// The number of recorded pages after this completion
    pub fn complete(&self, recorded: bool) -> u32 {
        let mut state = self.lock();
        state.in_flight = state.in_flight.saturating_sub(1);
        if recorded {
            state.completed += 1;
            if state.completed >= state.max_pages && state.phase == CrawlPhase::Running {
                state.phase = CrawlPhase::Draining;
                tracing::debug!("Page budget spent, draining");
            }
        } else {
            state.refill();
        }
        state.completed
    }

    /// Stops dispatch and frontier admission; in-flight work still completes
    pub fn begin_draining(&self) -> Result<(), InspectorError> {
        self.lock().transition(CrawlPhase::Draining)
    }

    /// Marks the crawl as done
    pub fn finish(&self) -> Result<(), InspectorError> {
        self.lock().transition(CrawlPhase::Done)
    }

    /// Returns true when nothing is in flight and nothing more will be dispatched
    pub fn is_finished(&self) -> bool {
        let state = self.lock();
        state.in_flight == 0
            && (state.frontier.is_empty()
                || !state.phase.accepts_dispatch()
                || !state.has_dispatch_headroom())
    }

    pub fn phase(&self) -> CrawlPhase {
        self.lock().phase
    }

    pub fn in_flight(&self) -> u32 {
        self.lock().in_flight
    }

    pub fn frontier_size(&self) -> usize {
        self.lock().frontier.len()
    }

    pub fn backlog_size(&self) -> usize {
        self.lock().backlog.len()
    }
}
