//! Crawler module for breadth-first page fetching
//!
//! This module contains the crawling stage, including:
//! - HTTP fetching with retry logic and scope-aware redirects
//! - Link extraction from fetched HTML
//! - The FIFO frontier and visited set
//! - Overall crawl coordination under depth and page limits

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod record;

pub use coordinator::Crawler;
pub use fetcher::{build_http_client, fetch_url, is_html_content_type, FetchResult, NetworkErrorKind};
pub use frontier::{CrawlTarget, Frontier};
pub use parser::extract_links;
pub use record::{CrawlOutput, PageRecord, SkipReason, SkippedPage};

use crate::config::Config;
use crate::PulseError;

/// Runs a complete crawl over the configured seeds
///
/// This is the entry point for the fetching stage. It will:
/// 1. Normalize the seeds and derive the crawl scope
/// 2. Build the HTTP client
/// 3. Visit pages breadth-first, following in-scope links
/// 4. Return every fetched page plus the reason for every skipped target
///
/// # Arguments
///
/// * `config` - The run configuration
///
/// # Returns
///
/// * `Ok(CrawlOutput)` - Crawl finished, possibly with zero pages
/// * `Err(PulseError)` - A seed URL is malformed or the client could not be built
pub async fn crawl(config: &Config) -> Result<CrawlOutput, PulseError> {
    let crawler = Crawler::new(config)?;
    Ok(crawler.run().await)
}
