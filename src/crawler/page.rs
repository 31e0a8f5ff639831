//! Per-page crawl pipeline
//!
//! Each scheduled path becomes a [`PageJob`] run on the worker pool. The job
//! fetches the page, records its outbound edges and reports back to the
//! crawler through a single event channel:
//!
//! 1. one [`CrawlEvent::Discovered`] per link this page won in the frontier
//! 2. exactly one [`CrawlEvent::Completed`] carrying the page itself
//!
//! Both go through the same channel, so the crawler always counts a page's
//! new jobs before it counts the page as done.

use crate::crawler::fetcher::fetch_page;
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::extract_hrefs;
use crate::robots::ParsedRobots;
use crate::sitemap::{Link, Page};
use crate::url::{resolve_href, same_host, EMAIL_PROTECTION_PATH};
use crate::worker::{Job, JobFuture};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use url::Url;

/// Page-scoped crawl failure
///
/// A page that fails is dropped from the site map, and so are the edges
/// pointing at it. The crawl itself carries on.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid response (status {status}, content-type {content_type:?})")]
    InvalidResponse { status: u16, content_type: String },

    #[error("error parsing html: {0}")]
    HtmlParse(String),

    #[error("page job aborted: {0}")]
    Aborted(String),
}

/// Message from a page job to the crawler
#[derive(Debug)]
pub(crate) enum CrawlEvent {
    /// A new path to schedule
    Discovered(Url),
    /// The finished page, sent once per job
    Completed(Page),
}

/// State shared by every page job of one crawl
#[derive(Debug)]
pub(crate) struct CrawlContext {
    pub root: Url,
    pub client: reqwest::Client,
    /// `None` when robots.txt is ignored
    pub robots: Option<ParsedRobots>,
    pub user_agent: String,
    pub frontier: Frontier,
}

impl CrawlContext {
    /// Whether a resolved anchor on `page` may become an edge
    fn accepts(&self, page: &Url, candidate: &Url) -> bool {
        if !same_host(candidate, &self.root) {
            tracing::trace!("Skipping {}: different host", candidate);
            return false;
        }

        if candidate.path() == page.path()
            || candidate.as_str() == page.as_str()
            || candidate.path().contains(EMAIL_PROTECTION_PATH)
        {
            tracing::trace!("Skipping {}: self link or protected address", candidate);
            return false;
        }

        if let Some(robots) = &self.robots {
            if !robots.is_allowed(candidate.path(), &self.user_agent) {
                tracing::trace!("Skipping {}: disallowed by robots.txt", candidate);
                return false;
            }
        }

        true
    }
}

/// Fetches `page` and fills in its redirect status and outbound edges
///
/// Returns the URLs this page won in the frontier; the caller must schedule
/// each of them exactly once.
///
/// An edge is flagged `already_scheduled` when its path appeared earlier on
/// the same page or was already taken in the frontier. Every occurrence of a
/// valid anchor is recorded as an edge, but only the first one on the page
/// consults the frontier.
pub(crate) async fn crawl_page(
    page: &mut Page,
    ctx: &CrawlContext,
) -> Result<Vec<Url>, PageError> {
    let fetched = fetch_page(&ctx.client, &page.url).await?;
    tracing::debug!("Fetched {} (HTTP {})", page.url, fetched.status_code);

    if let Some(target) = fetched.redirect_target(&page.url) {
        tracing::debug!("{} redirected to {}", page.url, target);
        page.is_redirect = true;
        page.redirects_to = Some(target.clone());
    }

    let mut seen = HashSet::new();
    let mut new_work = Vec::new();

    for href in extract_hrefs(&fetched.body) {
        let candidate = match resolve_href(&href, &ctx.root) {
            Ok(url) => url,
            Err(e) => {
                tracing::trace!("Skipping anchor {:?} on {}: {}", href, page.url, e);
                continue;
            }
        };

        if !ctx.accepts(&page.url, &candidate) {
            continue;
        }

        let path = candidate.path().to_string();
        let already_scheduled = !seen.insert(path.clone()) || !ctx.frontier.try_schedule(&path);

        if !already_scheduled {
            tracing::debug!("Scheduling {} (found on {})", path, page.path());
            new_work.push(candidate.clone());
        }
        page.links.push(Link::new(candidate, already_scheduled));
    }

    Ok(new_work)
}

/// Crawl job for a single page
pub(crate) struct PageJob {
    url: Url,
    ctx: Arc<CrawlContext>,
    events: mpsc::UnboundedSender<CrawlEvent>,
}

impl PageJob {
    pub fn new(
        url: Url,
        ctx: Arc<CrawlContext>,
        events: mpsc::UnboundedSender<CrawlEvent>,
    ) -> Self {
        Self { url, ctx, events }
    }
}

impl Job for PageJob {
    fn run(self: Box<Self>) -> JobFuture {
        Box::pin(async move {
            let PageJob { url, ctx, events } = *self;

            // The pipeline runs in its own task so that a panic still yields
            // a result for this page.
            let requested = url.clone();
            let task = tokio::spawn(async move {
                let mut page = Page::new(url);
                let outcome = crawl_page(&mut page, &ctx).await;
                (page, outcome)
            });

            let page = match task.await {
                Ok((page, Ok(new_work))) => {
                    for url in new_work {
                        if events.send(CrawlEvent::Discovered(url)).is_err() {
                            break;
                        }
                    }
                    page
                }
                Ok((mut page, Err(e))) => {
                    tracing::warn!("Failed to crawl {}: {}", page.url, e);
                    page.error = Some(e);
                    page
                }
                Err(e) => {
                    tracing::error!("Crawl task for {} did not complete: {}", requested, e);
                    let mut page = Page::new(requested);
                    page.error = Some(PageError::Aborted(e.to_string()));
                    page
                }
            };

            if events.send(CrawlEvent::Completed(page)).is_err() {
                tracing::debug!("Crawler stopped listening before a page result arrived");
            }
        })
    }
}
