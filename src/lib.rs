//! Site-Inspector: a polite same-site crawler for spelling and link audits
//!
//! This crate crawls a website from a seed URL, staying on the seed's host,
//! respecting robots.txt and a fixed request pace. Every page it visits is
//! checked for misspelled words in its visible text and for broken links and
//! images, and the results are exported as a JSON report and a text summary.

pub mod config;
pub mod crawler;
pub mod output;
pub mod robots;
pub mod spelling;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Inspector operations
#[derive(Debug, Error)]
pub enum InspectorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("Dictionary error: {0}")]
    Dictionary(#[from] spelling::DictionaryError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Invalid crawl phase transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlPhase,
        to: state::CrawlPhase,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid seed URL: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

// Re-export commonly used types
pub use config::Config;
pub use crawler::Coordinator;
pub use output::{CrawlReport, PageResult};
pub use spelling::{Dictionary, SpellCheck};
pub use state::{CrawlPhase, PageStatus};
pub use url::{is_internal, normalize_url, resolve};
