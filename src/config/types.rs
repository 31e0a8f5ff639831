use serde::Deserialize;

/// Worker count used when none is configured
pub const DEFAULT_MAX_WORKERS: i64 = 50;

/// User agent sent with every request when none is configured
pub const DEFAULT_USER_AGENT: &str = "smap-v0.0.1";

/// Crawl configuration
///
/// Every field is optional in a config file. Zero workers and an empty user
/// agent are placeholders that [`super::apply_defaults`] replaces with
/// [`DEFAULT_MAX_WORKERS`] and [`DEFAULT_USER_AGENT`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Maximum number of concurrent page fetches
    #[serde(rename = "max-workers", default)]
    pub max_workers: i64,

    /// Skip fetching and honoring robots.txt
    #[serde(rename = "ignore-robots", default)]
    pub ignore_robots: bool,

    /// Value of the User-Agent header, also used for robots.txt matching
    #[serde(rename = "user-agent", default)]
    pub user_agent: String,
}

impl Config {
    /// Creates a configuration from explicit values
    pub fn new(max_workers: i64, ignore_robots: bool, user_agent: impl Into<String>) -> Self {
        Self {
            max_workers,
            ignore_robots,
            user_agent: user_agent.into(),
        }
    }

    /// Returns the worker count as a pool size
    ///
    /// Non-positive counts map to zero, which the worker pool rejects.
    pub fn worker_count(&self) -> usize {
        usize::try_from(self.max_workers).unwrap_or(0)
    }
}
