use crate::config::{apply_defaults, validate, Config};
use crate::crawler::coordinator::{CrawlStats, Crawler};
use crate::crawler::fetcher::build_http_client;
use crate::sitemap::SiteMap;
use crate::Result;
use url::Url;

/// Entry point for crawling sites with one configuration
///
/// The HTTP client is built once and shared by every crawl started from the
/// same `Client`.
///
/// # Example
///
/// ```no_run
/// use smap::{Client, Config};
/// use url::Url;
///
/// # async fn run() -> smap::Result<()> {
/// let client = Client::new(Config::default())?;
/// let sitemap = client.crawl(&Url::parse("https://example.com").unwrap()).await?;
/// for path in sitemap.paths() {
///     println!("{}", path);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    config: Config,
    http: reqwest::Client,
}

impl Client {
    /// Applies defaults to `config`, validates it and builds the HTTP client
    ///
    /// # Returns
    ///
    /// * `Ok(Client)` - Ready to crawl
    /// * `Err(SmapError::Config)` - Invalid worker count or user agent
    /// * `Err(SmapError::HttpClient)` - The HTTP client could not be built
    pub fn new(mut config: Config) -> Result<Self> {
        apply_defaults(&mut config);
        validate(&config)?;

        let http = build_http_client(&config.user_agent)?;

        tracing::debug!(
            "Client ready: {} workers, user agent {:?}, robots {}",
            config.max_workers,
            config.user_agent,
            if config.ignore_robots { "ignored" } else { "respected" }
        );

        Ok(Self { config, http })
    }

    /// The effective configuration, with defaults applied
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Crawls the site rooted at `target`
    pub async fn crawl(&self, target: &Url) -> Result<SiteMap> {
        self.crawl_with_stats(target).await.map(|(sitemap, _)| sitemap)
    }

    /// Crawls the site rooted at `target` and returns the run statistics too
    pub async fn crawl_with_stats(&self, target: &Url) -> Result<(SiteMap, CrawlStats)> {
        let mut crawler = Crawler::new(target, &self.config, self.http.clone())?;
        let sitemap = crawler.run().await?;
        Ok((sitemap, crawler.stats().clone()))
    }
}
