//! site2kb main entry point
//!
//! This is the command-line interface for the site2kb knowledge-base builder.

use anyhow::{bail, Context};
use clap::Parser;
use site2kb::config::{load_unvalidated_config_with_hash, validate, Config};
use site2kb::crawler::{crawl_with_pages, fetch_selected};
use site2kb::output::{aggregate, print_statistics, write_knowledge_base, CrawlStatistics};
use site2kb::CrawlResult;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// site2kb: crawl part of a website into one Markdown knowledge base
///
/// Starting from one URL, site2kb follows links breadth-first within the
/// configured host scope and path prefixes, converts each page to Markdown,
/// and writes a single document grouped by host.
#[derive(Parser, Debug)]
#[command(name = "site2kb")]
#[command(version)]
#[command(about = "Crawl a website into a Markdown knowledge base", long_about = None)]
struct Cli {
    /// URL to start crawling from (overrides the config file)
    #[arg(value_name = "URL", required_unless_present = "config")]
    url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of pages to collect (clamped to 1..=500)
    #[arg(long)]
    max_pages: Option<usize>,

    /// Maximum link depth from the start URL
    #[arg(long)]
    max_depth: Option<u32>,

    /// Maximum number of concurrent fetches
    #[arg(long)]
    concurrency: Option<usize>,

    /// Per-request timeout in milliseconds
    #[arg(long)]
    request_timeout_ms: Option<u64>,

    /// Deadline for the whole crawl in milliseconds
    #[arg(long)]
    deadline_ms: Option<u64>,

    /// Stay on the start URL's root domain, excluding its subdomains
    #[arg(long)]
    no_subdomains: bool,

    /// Only crawl these hosts and their subdomains (repeatable)
    #[arg(long = "allow-host", value_name = "HOST")]
    allowed_hosts: Vec<String>,

    /// Only crawl URLs whose path starts with this prefix (repeatable)
    #[arg(long = "path-prefix", value_name = "PREFIX")]
    path_prefixes: Vec<String>,

    /// Where to write the knowledge-base document
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// List the pages a crawl would include without writing a document
    #[arg(long, conflicts_with = "select")]
    preview: bool,

    /// Fetch only these URLs instead of crawling (repeatable)
    #[arg(long, value_name = "URL")]
    select: Vec<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;

    if cli.preview {
        handle_preview(config).await
    } else if !cli.select.is_empty() {
        handle_select(config, &cli.select, cli.quiet).await
    } else {
        handle_crawl(config, cli.quiet).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site2kb=info,warn"),
            1 => EnvFilter::new("site2kb=debug,info"),
            2 => EnvFilter::new("site2kb=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any) and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            // Checked once below, after flags have been applied
            let (config, hash) = load_unvalidated_config_with_hash(path)
                .with_context(|| format!("loading {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::for_start_url(""),
    };

    if let Some(url) = &cli.url {
        config.crawler.start_url = url.clone();
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(max_depth) = cli.max_depth {
        config.crawler.max_depth = max_depth;
    }
    if let Some(concurrency) = cli.concurrency {
        config.crawler.max_concurrent_fetches = concurrency;
    }
    if let Some(timeout) = cli.request_timeout_ms {
        config.crawler.request_timeout_ms = timeout;
    }
    if let Some(deadline) = cli.deadline_ms {
        config.crawler.crawl_deadline_ms = deadline;
    }
    if cli.no_subdomains {
        config.scope.include_subdomains = false;
    }
    if !cli.allowed_hosts.is_empty() {
        config.scope.allowed_hosts = cli.allowed_hosts.clone();
    }
    if !cli.path_prefixes.is_empty() {
        config.scope.path_prefixes = cli.path_prefixes.clone();
    }
    if let Some(output) = &cli.output {
        config.output.path = output.display().to_string();
    }

    config.crawler.clamp_page_budget();
    validate(&config).context("invalid configuration")?;

    Ok(config)
}

/// Handles the --preview mode: crawls and lists pages without writing
async fn handle_preview(config: Config) -> anyhow::Result<()> {
    let start_url = config.crawler.start_url.clone();
    let result = crawl_with_pages(config).await?;
    ensure_pages(&result, &start_url)?;

    println!("=== site2kb Preview ===\n");
    for page in &result.pages {
        println!("[depth {}] {}  {}", page.depth, page.url, page.title);
    }
    println!();
    print_statistics(&CrawlStatistics::from_result(&result));
    println!("\nRe-run with --select URL for each page to download a subset.");

    Ok(())
}

/// Handles --select: fetches only the chosen URLs and writes the document
async fn handle_select(config: Config, urls: &[String], quiet: bool) -> anyhow::Result<()> {
    let output_path = PathBuf::from(&config.output.path);
    let start_url = config.crawler.start_url.clone();

    let result = fetch_selected(config, urls).await?;
    ensure_pages(&result, &start_url)?;

    write_document(&result, &output_path, quiet)
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, quiet: bool) -> anyhow::Result<()> {
    let output_path = PathBuf::from(&config.output.path);
    let start_url = config.crawler.start_url.clone();

    let result = crawl_with_pages(config).await?;
    ensure_pages(&result, &start_url)?;

    write_document(&result, &output_path, quiet)
}

fn ensure_pages(result: &CrawlResult, start_url: &str) -> anyhow::Result<()> {
    if result.is_empty() {
        bail!(
            "No content could be extracted from {} ({} errors)",
            start_url,
            result.errors.len()
        );
    }
    Ok(())
}

fn write_document(result: &CrawlResult, output_path: &Path, quiet: bool) -> anyhow::Result<()> {
    let document = aggregate(result);
    write_knowledge_base(&document, output_path)
        .with_context(|| format!("writing {}", output_path.display()))?;

    tracing::info!(
        "Wrote {} pages to {}",
        result.pages.len(),
        output_path.display()
    );

    if !quiet {
        print_statistics(&CrawlStatistics::from_result(result));
    }

    Ok(())
}
