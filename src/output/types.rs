//! Crawl result types
//!
//! Everything here is scoped to a single crawl invocation and owned by the
//! engine until it hands the result to the caller.

use std::fmt;

/// The durable result of one successfully fetched and extracted page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    /// Canonical URL
    pub url: String,

    /// Lower-cased host
    pub host: String,

    /// Path, plus `?query` when present
    pub path: String,

    /// Document title, or the URL when the page declares none
    pub title: String,

    /// Markdown body of the primary content region
    pub markdown: String,

    /// Link hops from the start URL
    pub depth: u32,
}

/// Why a URL produced no page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorReason {
    /// Per-request deadline exceeded
    Timeout,

    /// Any status other than 200, or a content type without `text/html`
    NonHtml,

    /// Transport-level failure (connection reset, DNS, TLS, ...)
    Http,
}

impl ErrorReason {
    /// Tag used in summaries
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::NonHtml => "non-200-or-non-html",
            Self::Http => "http-error",
        }
    }
}

impl fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// A per-URL failure; recorded, never raised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub url: String,
    pub reason: ErrorReason,
    /// HTTP status, when one was observed
    pub status: Option<u16>,
}

impl ErrorRecord {
    pub fn new(url: impl Into<String>, reason: ErrorReason, status: Option<u16>) -> Self {
        Self {
            url: url.into(),
            reason,
            status,
        }
    }
}

/// Everything one crawl produced
#[derive(Debug, Clone, Default)]
pub struct CrawlResult {
    /// Pages in round-completion order
    pub pages: Vec<PageRecord>,

    /// Failures in the order they were integrated
    pub errors: Vec<ErrorRecord>,

    /// Set when the crawl deadline cut the traversal short
    pub timed_out: bool,
}

impl CrawlResult {
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
