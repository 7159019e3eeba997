//! Configuration module for site2kb
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use site2kb::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("site2kb.toml")).unwrap();
//! println!("Crawl starts at: {}", config.crawler.start_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, ScopeConfig, UserAgentConfig, MAX_CONCURRENT_FETCHES,
    MAX_PAGES, MIN_CONCURRENT_FETCHES, MIN_PAGES,
};
pub(crate) use types::{clamped_concurrency, clamped_page_budget};

// Re-export parser functions
pub use parser::{
    compute_config_hash, load_config, load_config_with_hash, load_unvalidated_config_with_hash,
    parse_config, parse_unvalidated,
};
pub use validation::validate;
