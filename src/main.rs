//! smap main entry point
//!
//! This is the command-line interface for the smap site-mapping engine.

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use smap::config::{load_config, Config};
use smap::output::{format_text, to_json};
use smap::Client;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use url::Url;

/// smap: a site-mapping engine
///
/// smap crawls a website from its root URL, following same-host links while
/// respecting robots.txt, and prints the link graph of every page it found.
#[derive(Parser, Debug)]
#[command(name = "smap")]
#[command(version)]
#[command(about = "smap is a site-mapping engine", long_about = None)]
struct Cli {
    /// Root URL of the site to map, e.g. https://example.com
    #[arg(value_name = "URL")]
    url: String,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// How many workers to use
    #[arg(short, long, value_name = "N")]
    workers: Option<i64>,

    /// Ignore robots.txt
    #[arg(long)]
    robots: bool,

    /// User agent to use for the crawler
    #[arg(short, long, value_name = "UA")]
    user_agent: Option<String>,

    /// Print only the JSON document
    #[arg(long)]
    json: bool,

    /// Show a progress spinner and increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let target = Url::parse(&cli.url).with_context(|| format!("Invalid URL: {}", cli.url))?;

    let config = build_config(&cli)?;
    let client = Client::new(config).context("Invalid configuration")?;

    let spinner = if cli.verbose > 0 {
        Some(start_spinner(&target)?)
    } else {
        None
    };

    let result = client.crawl_with_stats(&target).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let (sitemap, stats) = result.with_context(|| format!("Crawl of {} failed", target))?;
    tracing::debug!("Crawl statistics: {:?}", stats);

    if !cli.json {
        print!("{}", format_text(&sitemap));
    }

    let json = to_json(&sitemap).context("Failed to render site map as JSON")?;
    println!("{}", json);

    Ok(())
}

/// Merges the optional config file with command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(workers) = cli.workers {
        config.max_workers = workers;
    }
    if cli.robots {
        config.ignore_robots = true;
    }
    if let Some(user_agent) = &cli.user_agent {
        config.user_agent = user_agent.clone();
    }

    Ok(config)
}

fn start_spinner(target: &Url) -> anyhow::Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Crawling {}", target));
    Ok(spinner)
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only the site map.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("smap=warn,error"),
            1 => EnvFilter::new("smap=info,warn"),
            2 => EnvFilter::new("smap=debug,info"),
            _ => EnvFilter::new("smap=trace,debug"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
