//! Crawler coordinator - main crawl orchestration logic
//!
//! The coordinator owns all traversal state of one crawl and drives it in
//! rounds:
//! - Build a batch from the front of the frontier
//! - Fetch and extract every batch member concurrently
//! - Await the whole batch, then integrate pages, errors and new links
//!
//! Fetch tasks only read shared state; every mutation happens between rounds,
//! so no locks are needed.

use crate::config::{clamped_concurrency, clamped_page_budget, Config};
use crate::crawler::extractor::extract;
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::output::{CrawlResult, ErrorRecord, PageRecord};
use crate::state::{Frontier, FrontierEntry, PageState};
use crate::url::{extract_host, is_allowed, normalize_url, root_domain};
use crate::{KbError, UrlError};
use futures::future::join_all;
use std::collections::HashSet;
use tokio::sync::Semaphore;
use tokio::time::Instant;
use url::Url;

/// A page that was fetched and extracted, plus the links it admits
struct Harvested {
    page: PageRecord,
    links: Vec<String>,
}

/// Main crawler coordinator structure
///
/// Each crawl constructs a fresh coordinator; nothing is shared between crawls.
pub struct Coordinator<F: PageFetcher> {
    config: Config,
    fetcher: F,
    limiter: Semaphore,
    frontier: Frontier,
    start_url: String,
    root_domain: String,
    page_budget: usize,
    concurrency: usize,
    result: CrawlResult,
}

impl Coordinator<HttpFetcher> {
    /// Creates a coordinator that fetches over HTTP
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(KbError)` - The start URL is unusable or the HTTP client failed to build
    pub fn new(config: Config) -> Result<Self, KbError> {
        let fetcher = HttpFetcher::new(&config)?;
        Self::with_fetcher(config, fetcher)
    }
}

impl<F: PageFetcher> Coordinator<F> {
    /// Creates a coordinator over any page source
    pub fn with_fetcher(config: Config, fetcher: F) -> Result<Self, KbError> {
        let start_url = normalize_url(&config.crawler.start_url)?;
        let Some(start_host) = extract_host(&start_url) else {
            return Err(UrlError::MissingHost(start_url).into());
        };
        let root_domain = root_domain(Some(&start_host));
        let page_budget = clamped_page_budget(config.crawler.max_pages);
        let concurrency = clamped_concurrency(config.crawler.max_concurrent_fetches);
        let limiter = Semaphore::new(concurrency);

        if config.crawler.respect_robots {
            tracing::warn!("respect-robots is set, but robots.txt is not consulted");
        }

        Ok(Self {
            frontier: Frontier::seeded(&start_url),
            config,
            fetcher,
            limiter,
            start_url,
            root_domain,
            page_budget,
            concurrency,
            result: CrawlResult::default(),
        })
    }

    /// Runs the round loop until the frontier drains, the page budget is
    /// reached, or the crawl deadline passes
    pub async fn run(mut self) -> CrawlResult {
        let started = Instant::now();
        let deadline = self.config.crawler.crawl_deadline();
        let mut rounds = 0usize;

        tracing::info!(
            "Starting crawl at {} (root domain '{}', budget {} pages, max depth {})",
            self.start_url,
            self.root_domain,
            self.page_budget,
            self.config.crawler.max_depth
        );

        while !self.frontier.is_empty() && self.result.pages.len() < self.page_budget {
            if started.elapsed() > deadline {
                tracing::warn!(
                    "Crawl deadline of {:?} reached after {} rounds; stopping",
                    deadline,
                    rounds
                );
                self.result.timed_out = true;
                break;
            }

            let batch = self.next_batch();
            if batch.is_empty() {
                break;
            }

            rounds += 1;
            tracing::debug!(
                "Round {}: dispatching {} URLs ({} still queued)",
                rounds,
                batch.len(),
                self.frontier.queued_len()
            );

            // Each task owns its entry; nothing is captured from the loop
            let outcomes = join_all(batch.into_iter().map(|entry| self.process(entry))).await;
            self.integrate(outcomes);
        }

        // Every dispatched URL ends as exactly one page or one error
        debug_assert_eq!(
            self.frontier.visited_len(),
            self.result.pages.len() + self.result.errors.len()
        );

        tracing::info!(
            "Crawl finished: {} URLs dispatched, {} pages, {} errors, {} rounds in {:?}{}",
            self.frontier.visited_len(),
            self.result.pages.len(),
            self.result.errors.len(),
            rounds,
            started.elapsed(),
            if self.result.timed_out { " (timed out)" } else { "" }
        );

        self.result
    }

    /// Fetches only the given URLs, without following links
    ///
    /// URLs are normalized and deduplicated; any that fail the scope gate are
    /// skipped. Results keep the order of `urls`.
    pub async fn fetch_selected(mut self, urls: &[String]) -> CrawlResult {
        let mut seen = HashSet::new();
        let mut selected = Vec::new();

        for url in urls {
            let normalized = match normalize_url(url) {
                Ok(normalized) => normalized,
                Err(e) => {
                    tracing::warn!("Skipping selected URL {}: {}", url, e);
                    continue;
                }
            };

            if !seen.insert(normalized.clone()) {
                continue;
            }

            if !is_allowed(&normalized, &self.config.scope, &self.root_domain) {
                tracing::warn!("Skipping selected URL {}: outside crawl scope", normalized);
                continue;
            }

            selected.push(FrontierEntry {
                url: normalized,
                depth: 0,
            });
        }

        tracing::info!("Fetching {} selected URLs", selected.len());

        let outcomes = join_all(selected.into_iter().map(|entry| self.process(entry))).await;
        for outcome in outcomes {
            match outcome {
                Ok(harvested) => self.result.pages.push(harvested.page),
                Err(error) => self.record_error(error),
            }
        }

        self.result
    }

    /// Pops the next round's entries off the front of the frontier
    ///
    /// Entries already dispatched or failing the scope gate are dropped without
    /// taking a slot.
    fn next_batch(&mut self) -> Vec<FrontierEntry> {
        let mut batch = Vec::new();

        while batch.len() < self.concurrency
            && self.result.pages.len() + batch.len() < self.page_budget
        {
            let Some(entry) = self.frontier.pop() else {
                break;
            };

            if self.frontier.is_visited(&entry.url) {
                continue;
            }

            if !is_allowed(&entry.url, &self.config.scope, &self.root_domain) {
                tracing::debug!("Not dispatching {}: outside crawl scope", entry.url);
                continue;
            }

            self.frontier.mark_visited(&entry.url);
            batch.push(entry);
        }

        batch
    }

    /// Fetch, extract and filter one URL
    ///
    /// Reads the frontier but never mutates it.
    async fn process(&self, entry: FrontierEntry) -> Result<Harvested, ErrorRecord> {
        let html = {
            let _permit = self.limiter.acquire().await.ok();
            self.fetcher.fetch(&entry.url).await?
        };

        let extracted = extract(&html, &entry.url);

        let mut seen = HashSet::new();
        let links = extracted
            .links
            .into_iter()
            .filter(|link| {
                is_allowed(link, &self.config.scope, &self.root_domain)
                    && !self.frontier.is_known(link)
                    && seen.insert(link.clone())
            })
            .collect();

        let (host, path) = location_of(&entry.url);
        let page = PageRecord {
            url: entry.url,
            host,
            path,
            title: extracted.title,
            markdown: extracted.markdown,
            depth: entry.depth,
        };

        Ok(Harvested { page, links })
    }

    /// Folds one completed round into the result and the frontier
    fn integrate(&mut self, outcomes: Vec<Result<Harvested, ErrorRecord>>) {
        let max_depth = self.config.crawler.max_depth;
        let mut admitting = true;

        for outcome in outcomes {
            let Harvested { page, links } = match outcome {
                Ok(harvested) => harvested,
                Err(error) => {
                    self.record_error(error);
                    continue;
                }
            };

            tracing::debug!("{} {} (depth {})", PageState::Fetched, page.url, page.depth);
            let next_depth = page.depth + 1;
            self.result.pages.push(page);

            if !admitting || next_depth > max_depth {
                continue;
            }

            for link in links {
                if self.frontier.known_len() >= self.page_budget {
                    tracing::debug!(
                        "Page budget of {} reached; no more links admitted this round",
                        self.page_budget
                    );
                    admitting = false;
                    break;
                }
                self.frontier.enqueue(&link, next_depth);
            }
        }
    }

    fn record_error(&mut self, error: ErrorRecord) {
        tracing::warn!(
            "{} {}: {}{}",
            PageState::Failed,
            error.url,
            error.reason,
            error
                .status
                .map(|s| format!(" (status {})", s))
                .unwrap_or_default()
        );
        self.result.errors.push(error);
    }
}

/// Host and path (plus query) of a canonical URL
fn location_of(url: &str) -> (String, String) {
    match Url::parse(url) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or_default().to_lowercase();
            let path = match parsed.query() {
                Some(query) => format!("{}?{}", parsed.path(), query),
                None => parsed.path().to_string(),
            };
            (host, path)
        }
        Err(_) => (String::new(), String::new()),
    }
}
