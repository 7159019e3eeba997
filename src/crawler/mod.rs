//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `PageFetcher` seam
//! - HTML content extraction and link discovery
//! - Round-based breadth-first coordination

mod coordinator;
mod extractor;
mod fetcher;

pub use coordinator::Coordinator;
pub use extractor::{extract, ExtractedPage};
pub use fetcher::{build_http_client, FetchResult, HttpFetcher, PageFetcher};

use crate::config::Config;
use crate::output::{aggregate, CrawlResult};
use crate::KbError;

/// Crawls and returns the aggregated knowledge-base document
///
/// A crawl in which every page failed still yields a well-formed document;
/// deciding whether zero pages is an error is left to the caller.
///
/// # Example
///
/// ```no_run
/// use site2kb::config::Config;
/// use site2kb::crawler::crawl;
///
/// # async fn example() -> Result<(), site2kb::KbError> {
/// let document = crawl(Config::for_start_url("https://example.com/docs")).await?;
/// println!("{}", document);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: Config) -> Result<String, KbError> {
    let result = crawl_with_pages(config).await?;
    Ok(aggregate(&result))
}

/// Crawls and returns the raw result, for previewing pages before download
pub async fn crawl_with_pages(config: Config) -> Result<CrawlResult, KbError> {
    let coordinator = Coordinator::new(config)?;
    Ok(coordinator.run().await)
}

/// Re-fetches only the selected URLs through the same scope gate and extractor
pub async fn fetch_selected(config: Config, urls: &[String]) -> Result<CrawlResult, KbError> {
    let coordinator = Coordinator::new(config)?;
    Ok(coordinator.fetch_selected(urls).await)
}
