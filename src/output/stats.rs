//! Crawl statistics for the command-line report

use crate::output::types::{CrawlResult, ErrorReason};
use std::collections::BTreeMap;

/// Aggregate counts derived from one crawl result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    pub total_pages: usize,
    pub total_errors: usize,
    pub pages_by_host: BTreeMap<String, usize>,
    pub errors_by_reason: BTreeMap<ErrorReason, usize>,
    pub deepest_page: Option<u32>,
    pub timed_out: bool,
}

impl CrawlStatistics {
    pub fn from_result(result: &CrawlResult) -> Self {
        let mut stats = Self {
            total_pages: result.pages.len(),
            total_errors: result.errors.len(),
            timed_out: result.timed_out,
            ..Self::default()
        };

        for page in &result.pages {
            *stats.pages_by_host.entry(page.host.clone()).or_insert(0) += 1;
        }

        for error in &result.errors {
            *stats.errors_by_reason.entry(error.reason).or_insert(0) += 1;
        }

        stats.deepest_page = result.pages.iter().map(|page| page.depth).max();
        stats
    }

    /// Percentage of dispatched URLs that produced a page
    pub fn success_rate(&self) -> f64 {
        let attempted = self.total_pages + self.total_errors;
        if attempted == 0 {
            0.0
        } else {
            (self.total_pages as f64 / attempted as f64) * 100.0
        }
    }
}

/// Prints statistics to stdout
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== site2kb Crawl Statistics ===\n");
    println!("Pages:   {}", stats.total_pages);
    println!("Errors:  {}", stats.total_errors);
    println!("Success: {:.1}%", stats.success_rate());
    if let Some(depth) = stats.deepest_page {
        println!("Deepest page: depth {}", depth);
    }

    if !stats.pages_by_host.is_empty() {
        println!("\nPages by host:");
        for (host, count) in &stats.pages_by_host {
            println!("  {:<40} {}", host, count);
        }
    }

    if !stats.errors_by_reason.is_empty() {
        println!("\nErrors by reason:");
        for (reason, count) in &stats.errors_by_reason {
            println!("  {:<40} {}", reason.as_tag(), count);
        }
    }

    if stats.timed_out {
        println!("\nCrawl deadline reached; results are partial.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::types::{ErrorRecord, PageRecord};

    fn page(host: &str, depth: u32) -> PageRecord {
        PageRecord {
            url: format!("https://{}/", host),
            host: host.to_string(),
            path: "/".to_string(),
            title: host.to_string(),
            markdown: String::new(),
            depth,
        }
    }

    #[test]
    fn test_from_result() {
        let result = CrawlResult {
            pages: vec![page("a.test", 0), page("b.test", 2), page("a.test", 1)],
            errors: vec![
                ErrorRecord::new("https://a.test/x", ErrorReason::Timeout, None),
                ErrorRecord::new("https://a.test/y", ErrorReason::Timeout, None),
                ErrorRecord::new("https://a.test/z", ErrorReason::NonHtml, Some(404)),
            ],
            timed_out: true,
        };

        let stats = CrawlStatistics::from_result(&result);
        assert_eq!(stats.total_pages, 3);
        assert_eq!(stats.total_errors, 3);
        assert_eq!(stats.pages_by_host.get("a.test"), Some(&2));
        assert_eq!(stats.pages_by_host.get("b.test"), Some(&1));
        assert_eq!(stats.errors_by_reason.get(&ErrorReason::Timeout), Some(&2));
        assert_eq!(stats.errors_by_reason.get(&ErrorReason::NonHtml), Some(&1));
        assert_eq!(stats.deepest_page, Some(2));
        assert!(stats.timed_out);
        assert!((stats.success_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_result() {
        let stats = CrawlStatistics::from_result(&CrawlResult::default());
        assert_eq!(stats.total_pages, 0);
        assert_eq!(stats.deepest_page, None);
        assert_eq!(stats.success_rate(), 0.0);
    }
}
