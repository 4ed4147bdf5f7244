//! Site-Inspector main entry point
//!
//! This is the command-line interface for the Site-Inspector crawler.

use clap::Parser;
use site_inspector::config::{load_config_with_hash, validate, Config};
use site_inspector::crawler::Coordinator;
use site_inspector::output::{print_statistics, write_reports};
use site_inspector::spelling::{Dictionary, SpellCheck};
use site_inspector::url::normalize_url;
use site_inspector::ConfigError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Site-Inspector: a polite same-site crawler
///
/// Site-Inspector crawls a website from a seed URL, staying on the seed's
/// host and respecting robots.txt. It reports misspelled words in visible
/// page text and broken links and images.
#[derive(Parser, Debug)]
#[command(name = "site-inspector")]
#[command(version)]
#[command(about = "Crawl a site for spelling mistakes and broken links", long_about = None)]
struct Cli {
    /// URL to start crawling from
    #[arg(value_name = "SEED_URL")]
    seed: String,

    /// Maximum number of pages to record
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Maximum number of pages analyzed concurrently
    #[arg(long, value_name = "N")]
    max_workers: Option<u32>,

    /// Delay between dispatch batches in milliseconds
    #[arg(long, value_name = "MS")]
    delay: Option<u64>,

    /// Word list used for spell checking instead of the bundled one
    #[arg(long, value_name = "FILE")]
    dictionary: Option<PathBuf>,

    /// Path of the JSON report
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Path of the text summary
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    // Reject a bad seed before loading anything heavy
    if let Err(e) = normalize_url(&cli.seed) {
        tracing::error!("Invalid seed URL {}: {}", cli.seed, e);
        return Err(ConfigError::InvalidUrl(format!("{}: {}", cli.seed, e)).into());
    }

    if cli.dry_run {
        handle_dry_run(&cli.seed, &config);
        return Ok(());
    }

    handle_crawl(config, &cli.seed).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_inspector=info,warn"),
            1 => EnvFilter::new("site_inspector=debug,info"),
            2 => EnvFilter::new("site_inspector=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the optional config file and applies command-line overrides
fn build_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(max_workers) = cli.max_workers {
        config.crawler.max_workers = max_workers;
    }
    if let Some(delay) = cli.delay {
        config.crawler.politeness_delay = delay;
    }
    if let Some(path) = &cli.dictionary {
        config.spelling.dictionary_path = Some(path.display().to_string());
    }
    if let Some(path) = &cli.report {
        config.output.report_path = path.display().to_string();
    }
    if let Some(path) = &cli.summary {
        config.output.summary_path = path.display().to_string();
    }

    validate(&config)?;
    Ok(config)
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(seed: &str, config: &Config) {
    println!("=== Site-Inspector Dry Run ===\n");

    println!("Seed: {}\n", seed);

    println!("Crawler Configuration:");
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Max workers: {}", config.crawler.max_workers);
    println!("  Politeness delay: {}ms", config.crawler.politeness_delay);

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Page timeout: {}s", config.http.page_timeout);
    println!("  Link check timeout: {}s", config.http.link_check_timeout);
    println!("  Robots timeout: {}s", config.http.robots_timeout);

    println!("\nSpelling:");
    match &config.spelling.dictionary_path {
        Some(path) => println!("  Dictionary: {}", path),
        None => println!("  Dictionary: bundled"),
    }

    println!("\nOutput:");
    println!("  Report: {}", config.output.report_path);
    println!("  Summary: {}", config.output.summary_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, seed: &str) -> Result<(), Box<dyn std::error::Error>> {
    let dictionary = match &config.spelling.dictionary_path {
        Some(path) => match Dictionary::load(Path::new(path)) {
            Ok(dictionary) => dictionary,
            Err(e) => {
                tracing::error!("Failed to load dictionary: {}", e);
                return Err(e.into());
            }
        },
        None => Dictionary::bundled(),
    };
    tracing::info!("Dictionary loaded ({} words)", dictionary.len());
    let checker: Arc<dyn SpellCheck> = Arc::new(dictionary);

    let output = config.output.clone();
    let mut coordinator = Coordinator::new(config, seed, checker)?;

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping crawl");
            interrupt.cancel();
        }
    });

    let report = match coordinator.run(cancel).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    write_reports(&report, &output)?;
    print_statistics(coordinator.statistics());

    let summary = report.summary();
    println!(
        "Crawled {} pages: {} spelling mistakes, {} broken links/images",
        summary.total_pages, summary.total_spelling_mistakes, summary.total_broken_links
    );

    Ok(())
}
