//! Crawl lifecycle states
//!
//! ```text
//! Init -> RobotsInit -> Running -> Draining -> Done
//!   |         |
//!   +---------+------> Failed
//! ```
//!
//! `RobotsInit` is skipped when robots.txt is ignored.

use std::fmt;

/// Represents the current state of a crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    /// Inputs validated, frontier and pool constructed
    Init,

    /// Fetching and parsing robots.txt
    RobotsInit,

    /// Workers are fetching pages and the collection loop is counting jobs
    Running,

    /// All known work finished; the pool is shutting down
    Draining,

    /// Cleanup passes ran and the sitemap is ready
    Done,

    /// A fatal error aborted the crawl
    Failed,
}

impl CrawlState {
    /// Returns true if no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Checks whether moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: CrawlState) -> bool {
        matches!(
            (self, next),
            (Self::Init, Self::RobotsInit)
                | (Self::Init, Self::Running)
                | (Self::Init, Self::Failed)
                | (Self::RobotsInit, Self::Running)
                | (Self::RobotsInit, Self::Failed)
                | (Self::Running, Self::Draining)
                | (Self::Draining, Self::Done)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::RobotsInit => "robots_init",
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
