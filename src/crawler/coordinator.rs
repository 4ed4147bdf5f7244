//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawling process, including:
//! - Loading robots.txt and seeding the frontier
//! - Dispatching page analyses to a bounded worker set
//! - Pacing dispatch batches with the politeness delay
//! - Feeding discovered links back into the frontier
//! - Handling interrupts and assembling the report

use crate::config::Config;
use crate::crawler::analyzer::{PageAnalyzer, PageOutcome};
use crate::crawler::build_http_client;
use crate::crawler::scheduler::Scheduler;
use crate::output::{CrawlReport, CrawlStatistics};
use crate::robots;
use crate::spelling::SpellCheck;
use crate::state::PageStatus;
use crate::url::normalize_url;
use crate::InspectorError;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinError, JoinSet};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    client: Client,
    seed: Url,
    scheduler: Scheduler,
    checker: Arc<dyn SpellCheck>,
    stats: CrawlStatistics,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `seed` - The starting URL; its host defines the crawled site
    /// * `checker` - Spelling capability shared by all workers
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(InspectorError)` - Invalid seed URL or HTTP client failure
    pub fn new(
        config: Config,
        seed: &str,
        checker: Arc<dyn SpellCheck>,
    ) -> Result<Self, InspectorError> {
        let seed = normalize_url(seed)?;
        let client = build_http_client(&config.http)?;
        let scheduler = Scheduler::new(config.crawler.max_pages);

        Ok(Self {
            config: Arc::new(config),
            client,
            seed,
            scheduler,
            checker,
            stats: CrawlStatistics::new(),
        })
    }

    /// Statistics of the last run
    pub fn statistics(&self) -> &CrawlStatistics {
        &self.stats
    }

    /// Handle to the scheduler state
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Runs the main crawl loop
    ///
    /// The loop:
    /// 1. Dispatches a batch of up to `max_workers - in_flight` URLs when the
    ///    politeness delay since the previous batch has passed
    /// 2. Waits for the next completion, the next batch slot or cancellation
    /// 3. Records processed pages and admits their discovered links
    ///
    /// Cancelling `cancel` stops dispatch; in-flight analyses return at their
    /// next await point and the partial report is returned.
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<CrawlReport, InspectorError> {
        let max_pages = self.config.crawler.max_pages;
        let max_workers = self.config.crawler.max_workers.max(1) as usize;
        let delay = Duration::from_millis(self.config.crawler.politeness_delay);

        tracing::info!(
            "Starting crawl of {} (max {} pages, {} workers)",
            self.seed,
            max_pages,
            max_workers
        );

        let robots_timeout = Duration::from_secs(self.config.http.robots_timeout);
        let policy = robots::load(&self.client, &self.seed, robots_timeout).await;

        let analyzer = Arc::new(PageAnalyzer::new(
            self.client.clone(),
            Arc::new(policy),
            self.seed.clone(),
            Arc::clone(&self.checker),
            &self.config.http,
        ));

        self.scheduler.seed(self.seed.clone());

        let mut report = CrawlReport::new();
        let mut tasks: JoinSet<(Url, PageOutcome)> = JoinSet::new();
        let mut next_batch_at = Instant::now();

        loop {
            if Instant::now() >= next_batch_at && tasks.len() < max_workers {
                let batch = self.scheduler.next_batch(max_workers - tasks.len());
                if !batch.is_empty() {
                    tracing::debug!("Dispatching batch of {}", batch.len());
                    next_batch_at = Instant::now() + delay;
                }
                for url in batch {
                    let analyzer = Arc::clone(&analyzer);
                    let scheduler = self.scheduler.clone();
                    let token = cancel.clone();
                    tasks.spawn(async move {
                        let outcome = tokio::select! {
                            outcome = analyzer.analyze(&url, &scheduler) => outcome,
                            _ = token.cancelled() => PageOutcome::Cancelled,
                        };
                        (url, outcome)
                    });
                }
            }

            if tasks.is_empty() && self.scheduler.is_finished() {
                break;
            }

            let may_dispatch = tasks.len() < max_workers && self.scheduler.can_dispatch();
            let running = self.scheduler.phase().accepts_dispatch();

            tokio::select! {
                Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                    self.handle_joined(joined, &mut report, max_pages);
                }
                _ = tokio::time::sleep_until(next_batch_at), if may_dispatch => {}
                _ = cancel.cancelled(), if running => {
                    tracing::warn!("Crawl interrupted, finishing in-flight pages");
                    self.stats.interrupted = true;
                    self.scheduler.begin_draining()?;
                }
                else => break,
            }
        }

        self.scheduler.finish()?;
        self.stats.finish();

        tracing::info!(
            "Crawl completed: {} pages recorded in {:.1}s",
            report.len(),
            self.stats.duration_seconds()
        );

        Ok(report)
    }

    /// Applies the outcome of one finished worker task
    fn handle_joined(
        &mut self,
        joined: Result<(Url, PageOutcome), JoinError>,
        report: &mut CrawlReport,
        max_pages: u32,
    ) {
        let (url, outcome) = match joined {
            Ok(done) => done,
            Err(e) => {
                // A panicked worker is treated as a failed fetch
                tracing::error!("Worker task failed: {}", e);
                self.scheduler.complete(false);
                self.stats.record(PageStatus::FetchFailed);
                return;
            }
        };

        let status = outcome.status();
        self.stats.record(status);
        let recorded = self.scheduler.complete(status.is_recorded());

        match outcome {
            PageOutcome::Processed {
                result,
                discovered,
                links_checked,
            } => {
                tracing::info!("Crawled ({}/{}): {}", recorded, max_pages, url);
                self.stats.links_checked += links_checked;
                report.insert(result);

                let admitted = discovered
                    .into_iter()
                    .filter(|link| self.scheduler.try_admit(link.clone()))
                    .count();
                tracing::debug!(
                    "{} new links queued from {} (frontier {}, waiting for room {})",
                    admitted,
                    url,
                    self.scheduler.frontier_size(),
                    self.scheduler.backlog_size()
                );
            }
            PageOutcome::Disallowed => {
                tracing::info!("Skipping {} (disallowed by robots.txt)", url);
            }
            PageOutcome::FetchFailed { error } => {
                tracing::warn!("Failed to fetch {}: {}", url, error);
            }
            PageOutcome::NotHtml { content_type } => {
                tracing::debug!("Skipping {} (content type {})", url, content_type);
            }
            PageOutcome::Cancelled => {
                tracing::debug!("Abandoned {}", url);
            }
        }
    }
}
