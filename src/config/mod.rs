//! Configuration module for Site-Inspector
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A configuration file is optional: `Config::default()` describes a crawl of
//! 50 pages with 5 workers, and command-line flags override individual values.
//!
//! # Example
//!
//! ```no_run
//! use site_inspector::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("inspector.toml")).unwrap();
//! println!("Crawler will use {} workers", config.crawler.max_workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, HttpConfig, OutputConfig, SpellingConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
