//! Output module for crawl results
//!
//! This module handles:
//! - The result types a crawl produces (`PageRecord`, `ErrorRecord`, `CrawlResult`)
//! - Assembling the knowledge-base markdown document
//! - Summarizing crawl statistics for the command line

mod markdown;
pub mod stats;
mod types;

pub use markdown::{aggregate, normalize_whitespace, render_page, write_knowledge_base};
pub use stats::{print_statistics, CrawlStatistics};
pub use types::{CrawlResult, ErrorReason, ErrorRecord, PageRecord};
