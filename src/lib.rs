//! site2kb: turns a bounded region of a website into a Markdown knowledge base
//!
//! This crate crawls breadth-first from a start URL, staying inside a host scope
//! and path prefix, up to a page budget and a wall-clock deadline. Every fetched
//! page is converted to Markdown and the pages are aggregated into one document
//! grouped by host.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for site2kb operations
#[derive(Debug, Error)]
pub enum KbError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Empty URL")]
    Empty,

    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for site2kb operations
pub type Result<T> = std::result::Result<T, KbError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, crawl_with_pages, fetch_selected, Coordinator};
pub use output::{aggregate, CrawlResult, ErrorReason, ErrorRecord, PageRecord};
pub use state::{Frontier, PageState};
pub use crate::url::{is_allowed, normalize_url, root_domain};
