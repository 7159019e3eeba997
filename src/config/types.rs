use serde::Deserialize;
use std::time::Duration;

/// Smallest page budget a crawl accepts
pub const MIN_PAGES: usize = 1;

/// Largest page budget a crawl accepts
pub const MAX_PAGES: usize = 500;

/// Fewest fetches a crawl keeps in flight
pub const MIN_CONCURRENT_FETCHES: usize = 1;

/// Most fetches a crawl keeps in flight
pub const MAX_CONCURRENT_FETCHES: usize = 100;

/// Main configuration structure for site2kb
///
/// One value describes one crawl. The engine never mutates it.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub scope: ScopeConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Builds a configuration with every setting at its default
    ///
    /// # Example
    ///
    /// ```
    /// use site2kb::config::Config;
    ///
    /// let config = Config::for_start_url("https://example.com/");
    /// assert_eq!(config.crawler.max_pages, 50);
    /// assert!(config.scope.include_subdomains);
    /// ```
    pub fn for_start_url(start_url: &str) -> Self {
        Self {
            crawler: CrawlerConfig {
                start_url: start_url.to_string(),
                ..CrawlerConfig::default()
            },
            scope: ScopeConfig::default(),
            user_agent: UserAgentConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Crawl budget and pacing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// URL the crawl starts from (depth 0)
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Maximum number of pages collected, clamped to [1, 500]
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Maximum link-hop distance from the start URL
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Maximum number of fetches in flight at any instant
    #[serde(
        rename = "max-concurrent-fetches",
        default = "default_max_concurrent_fetches"
    )]
    pub max_concurrent_fetches: usize,

    /// Per-request timeout (milliseconds)
    #[serde(rename = "request-timeout-ms", default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Wall-clock deadline for the whole crawl (milliseconds)
    #[serde(rename = "crawl-deadline-ms", default = "default_crawl_deadline_ms")]
    pub crawl_deadline_ms: u64,

    /// Reserved; robots.txt is not consulted
    #[serde(rename = "respect-robots", default)]
    pub respect_robots: bool,
}

impl CrawlerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn crawl_deadline(&self) -> Duration {
        Duration::from_millis(self.crawl_deadline_ms)
    }

    /// Clamps the page budget into [MIN_PAGES, MAX_PAGES]
    pub fn clamp_page_budget(&mut self) {
        self.max_pages = clamped_page_budget(self.max_pages);
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            start_url: String::new(),
            max_pages: default_max_pages(),
            max_depth: default_max_depth(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
            request_timeout_ms: default_request_timeout_ms(),
            crawl_deadline_ms: default_crawl_deadline_ms(),
            respect_robots: false,
        }
    }
}

/// Which hosts and paths a crawl may fetch
#[derive(Debug, Clone, Deserialize)]
pub struct ScopeConfig {
    /// Accept subdomains of the start URL's root domain
    #[serde(rename = "include-subdomains", default = "default_true")]
    pub include_subdomains: bool,

    /// Explicit host allow-list; when non-empty it replaces root-domain matching
    #[serde(rename = "allowed-hosts", default)]
    pub allowed_hosts: Vec<String>,

    /// Path (plus query) prefixes a URL must start with; empty accepts all
    #[serde(rename = "path-prefixes", default)]
    pub path_prefixes: Vec<String>,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            include_subdomains: true,
            allowed_hosts: Vec::new(),
            path_prefixes: Vec::new(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default)]
    pub contact_url: Option<String>,
}

impl UserAgentConfig {
    /// Formats the header value: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the knowledge-base markdown file
    #[serde(default = "default_output_path")]
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

pub(crate) fn clamped_page_budget(max_pages: usize) -> usize {
    max_pages.clamp(MIN_PAGES, MAX_PAGES)
}

pub(crate) fn clamped_concurrency(max_concurrent_fetches: usize) -> usize {
    max_concurrent_fetches.clamp(MIN_CONCURRENT_FETCHES, MAX_CONCURRENT_FETCHES)
}

fn default_max_pages() -> usize {
    50
}

fn default_max_depth() -> u32 {
    3
}

fn default_max_concurrent_fetches() -> usize {
    5
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_crawl_deadline_ms() -> u64 {
    120_000
}

fn default_true() -> bool {
    true
}

fn default_crawler_name() -> String {
    "site2kb".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_output_path() -> String {
    "knowledgebase.md".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_page_budget() {
        let mut crawler = CrawlerConfig {
            max_pages: 0,
            ..CrawlerConfig::default()
        };
        crawler.clamp_page_budget();
        assert_eq!(crawler.max_pages, 1);

        crawler.max_pages = 10_000;
        crawler.clamp_page_budget();
        assert_eq!(crawler.max_pages, 500);

        crawler.max_pages = 42;
        crawler.clamp_page_budget();
        assert_eq!(crawler.max_pages, 42);
    }

    #[test]
    fn test_clamped_concurrency() {
        assert_eq!(clamped_concurrency(0), 1);
        assert_eq!(clamped_concurrency(7), 7);
        assert_eq!(clamped_concurrency(usize::MAX), 100);
    }

    #[test]
    fn test_durations() {
        let crawler = CrawlerConfig {
            request_timeout_ms: 1500,
            crawl_deadline_ms: 60_000,
            ..CrawlerConfig::default()
        };
        assert_eq!(crawler.request_timeout(), Duration::from_millis(1500));
        assert_eq!(crawler.crawl_deadline(), Duration::from_secs(60));
    }

    #[test]
    fn test_user_agent_header_value() {
        let mut ua = UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: None,
        };
        assert_eq!(ua.header_value(), "TestBot/1.0");

        ua.contact_url = Some("https://example.com/bot".to_string());
        assert_eq!(ua.header_value(), "TestBot/1.0 (+https://example.com/bot)");
    }
}
