//! Knowledge-base document assembly
//!
//! Turns a `CrawlResult` into one Markdown document grouped by host. The same
//! result always produces byte-identical output.

use crate::output::types::{CrawlResult, PageRecord};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// How many errors the summary block lists individually
pub const MAX_LISTED_ERRORS: usize = 20;

/// Assembles the knowledge-base document
///
/// Hosts are emitted in lexicographic order; pages within a host keep the order
/// they were collected in. A summary block is prepended as an HTML comment so it
/// does not render.
///
/// # Example
///
/// ```
/// use site2kb::output::{aggregate, CrawlResult};
///
/// let document = aggregate(&CrawlResult::default());
/// assert!(document.starts_with("<!--"));
/// assert!(document.contains("pages: 0"));
/// ```
pub fn aggregate(result: &CrawlResult) -> String {
    let mut md = String::new();

    md.push_str(&format_summary(result));

    let mut by_host: BTreeMap<&str, Vec<&PageRecord>> = BTreeMap::new();
    for page in &result.pages {
        by_host.entry(page.host.as_str()).or_default().push(page);
    }

    for (host, pages) in by_host {
        md.push_str(&format!("\n# {}\n\n", host));

        let sections: Vec<String> = pages.iter().map(|page| render_page(page)).collect();
        md.push_str(&sections.join("\n\n---\n\n"));
        md.push('\n');
    }

    normalize_whitespace(&md)
}

/// Renders one page as a heading plus its trimmed body
pub fn render_page(page: &PageRecord) -> String {
    let body = page.markdown.trim();
    if body.is_empty() {
        format!("## {}", page_heading(page))
    } else {
        format!("## {}\n\n{}", page_heading(page), body)
    }
}

/// Title, else path, else URL, kept on one line
fn page_heading(page: &PageRecord) -> String {
    [&page.title, &page.path, &page.url]
        .into_iter()
        .map(|candidate| candidate.split_whitespace().collect::<Vec<_>>().join(" "))
        .find(|candidate| !candidate.is_empty())
        .unwrap_or_default()
}

/// Formats the non-rendering summary block
fn format_summary(result: &CrawlResult) -> String {
    let mut summary = String::new();

    summary.push_str("<!--\n");
    summary.push_str("site2kb crawl summary\n");
    summary.push_str(&format!("pages: {}\n", result.pages.len()));
    summary.push_str(&format!("errors: {}\n", result.errors.len()));

    for error in result.errors.iter().take(MAX_LISTED_ERRORS) {
        let status = error
            .status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "n/a".to_string());
        summary.push_str(&format!(
            "- {} | {} | {}\n",
            comment_safe(&error.url),
            error.reason,
            status
        ));
    }

    if result.errors.len() > MAX_LISTED_ERRORS {
        summary.push_str(&format!(
            "- ... {} more\n",
            result.errors.len() - MAX_LISTED_ERRORS
        ));
    }

    if result.timed_out {
        summary.push_str("timed out: crawl deadline reached before the frontier was exhausted\n");
    }

    summary.push_str("-->\n");
    summary
}

/// `--` would terminate the surrounding HTML comment early
fn comment_safe(text: &str) -> String {
    text.replace("--", "- -")
}

/// Strips trailing whitespace from every line and collapses runs of blank
/// lines into a single blank line
pub fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0;

    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }

    let trimmed_len = out.trim_end().len();
    out.truncate(trimmed_len);
    out.push('\n');
    out
}

/// Writes the document to `output_path`, replacing any existing file
pub fn write_knowledge_base(document: &str, output_path: &Path) -> std::io::Result<()> {
    let mut file = File::create(output_path)?;
    file.write_all(document.as_bytes())?;
    Ok(())
}
