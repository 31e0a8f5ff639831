//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties the other pieces together:
//! - Validating the target and building the worker pool
//! - Loading robots.txt
//! - Seeding the root job and counting jobs until the crawl drains itself
//! - Running the cleanup passes that turn page results into a [`SiteMap`]
//!
//! There is no supervisor deciding when the crawl is over. The loop counts
//! jobs created and jobs completed; when the two are equal no job is running
//! and none can be created any more, so the crawl is finished.

use crate::config::{validate, Config};
use crate::crawler::frontier::Frontier;
use crate::crawler::page::{CrawlContext, CrawlEvent, PageJob};
use crate::robots::fetch_robots;
use crate::sitemap::SiteMap;
use crate::state::CrawlState;
use crate::url::validate_root;
use crate::worker::WorkerPool;
use crate::{Result, SmapError};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use url::Url;

/// Summary of a finished crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages in the final site map
    pub pages_mapped: usize,
    /// Pages dropped because of a page error
    pub pages_failed: usize,
    pub jobs_created: usize,
    pub jobs_completed: usize,
    /// Distinct paths marked in the frontier
    pub paths_scheduled: usize,
    /// Edges removed because their target failed
    pub links_pruned: usize,
    pub elapsed: Duration,
}

/// Crawls one site from its root
///
/// A `Crawler` runs once. Use [`crate::Client`] to crawl several sites with
/// the same configuration.
pub struct Crawler {
    root: Url,
    config: Config,
    client: reqwest::Client,
    pool: WorkerPool,
    frontier: Option<Frontier>,
    state: CrawlState,
    stats: CrawlStats,
}

impl Crawler {
    /// Creates a new crawler instance
    ///
    /// # Arguments
    ///
    /// * `target` - The site root; its path must be empty or `/`
    /// * `config` - The crawler configuration, with defaults applied
    /// * `client` - HTTP client carrying the user agent and timeout
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to [`run`](Crawler::run)
    /// * `Err(SmapError)` - Invalid configuration or target; nothing was fetched
    pub fn new(target: &Url, config: &Config, client: reqwest::Client) -> Result<Self> {
        validate(config)?;

        let root = validate_root(target).map_err(|source| SmapError::InvalidTarget {
            url: target.to_string(),
            source,
        })?;

        let pool = WorkerPool::new(config.worker_count())?;

        Ok(Self {
            root,
            config: config.clone(),
            client,
            pool,
            frontier: Some(Frontier::new()),
            state: CrawlState::Init,
            stats: CrawlStats::default(),
        })
    }

    /// The validated root URL
    pub fn root(&self) -> &Url {
        &self.root
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// Statistics of the last run; all zero before [`run`](Crawler::run) returns
    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    /// Runs the crawl to completion
    ///
    /// 1. Load robots.txt unless it is ignored
    /// 2. Start the pool and seed the root job
    /// 3. Schedule discovered paths and collect page results until every
    ///    created job has completed
    /// 4. Close the pool
    /// 5. Drop edges to failed pages, then derive backlinks
    ///
    /// # Returns
    ///
    /// * `Ok(SiteMap)` - The finished graph
    /// * `Err(SmapError)` - robots.txt could not be loaded; no partial result
    pub async fn run(&mut self) -> Result<SiteMap> {
        let started = Instant::now();
        tracing::info!(
            "Starting crawl of {} with {} workers",
            self.root,
            self.pool.size()
        );

        let robots = if self.config.ignore_robots {
            tracing::info!("Ignoring robots.txt");
            None
        } else {
            self.transition(CrawlState::RobotsInit)?;
            match fetch_robots(&self.client, &self.root).await {
                Ok(robots) => Some(robots),
                Err(e) => {
                    tracing::error!("Aborting crawl of {}: {}", self.root, e);
                    self.transition(CrawlState::Failed)?;
                    return Err(e);
                }
            }
        };

        self.transition(CrawlState::Running)?;

        let frontier = self.frontier.take().ok_or(SmapError::InvalidTransition {
            from: self.state,
            to: CrawlState::Running,
        })?;
        let ctx = Arc::new(CrawlContext {
            root: self.root.clone(),
            client: self.client.clone(),
            robots,
            user_agent: self.config.user_agent.clone(),
            frontier,
        });

        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        self.pool.start()?;

        let mut sitemap = SiteMap::new();
        let mut failed = HashSet::new();
        let mut created = 0usize;
        let mut completed = 0usize;

        ctx.frontier.try_schedule(self.root.path());
        if let Err(e) = self.submit(&ctx, &events_tx, self.root.clone()) {
            return Err(self.abandon(e).await);
        }
        created += 1;

        while completed < created {
            let Some(event) = events_rx.recv().await else {
                tracing::error!(
                    "Event channel closed with {} jobs outstanding",
                    created - completed
                );
                break;
            };

            match event {
                CrawlEvent::Discovered(url) => {
                    if let Err(e) = self.submit(&ctx, &events_tx, url) {
                        return Err(self.abandon(e).await);
                    }
                    created += 1;
                }
                CrawlEvent::Completed(page) => {
                    completed += 1;
                    if page.is_ok() {
                        tracing::debug!(
                            "Mapped {} ({} links) [{}/{}]",
                            page.path(),
                            page.links.len(),
                            completed,
                            created
                        );
                        sitemap.insert(page);
                    } else {
                        failed.insert(page.path().to_string());
                    }
                }
            }
        }

        self.transition(CrawlState::Draining)?;
        drop(events_tx);
        self.pool.close().await?;
        self.transition(CrawlState::Done)?;

        let links_pruned = sitemap.prune_links_to(&failed);
        sitemap.derive_backlinks();

        self.stats = CrawlStats {
            pages_mapped: sitemap.len(),
            pages_failed: failed.len(),
            jobs_created: created,
            jobs_completed: completed,
            paths_scheduled: ctx.frontier.scheduled_count(),
            links_pruned,
            elapsed: started.elapsed(),
        };

        tracing::info!(
            "Crawl of {} complete: {} pages mapped, {} failed, {} jobs in {:.2}s",
            self.root,
            self.stats.pages_mapped,
            self.stats.pages_failed,
            self.stats.jobs_completed,
            self.stats.elapsed.as_secs_f64()
        );

        Ok(sitemap)
    }

    fn submit(
        &self,
        ctx: &Arc<CrawlContext>,
        events: &mpsc::UnboundedSender<CrawlEvent>,
        url: Url,
    ) -> Result<()> {
        let job = PageJob::new(url, Arc::clone(ctx), events.clone());
        self.pool.add_job(Box::new(job))?;
        Ok(())
    }

    /// Stops a running crawl after a fatal error
    ///
    /// The pool is still closed so that no worker outlives the crawl; jobs
    /// already queued run to completion and their events are discarded.
    async fn abandon(&mut self, err: SmapError) -> SmapError {
        tracing::error!("Abandoning crawl of {}: {}", self.root, err);

        if let Err(e) = self.transition(CrawlState::Draining) {
            tracing::warn!("{}", e);
        }
        if let Err(e) = self.pool.close().await {
            tracing::warn!("Failed to close worker pool: {}", e);
        }

        err
    }

    fn transition(&mut self, next: CrawlState) -> Result<()> {
        if !self.state.can_transition_to(next) {
            return Err(SmapError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }

        tracing::debug!("Crawl state {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }
}
