//! Crawler coordinator - the breadth-first crawl loop
//!
//! This module ties together:
//! - The FIFO frontier and visited set
//! - Scope, path and robots.txt policy checks
//! - Politeness delays between requests
//! - Fetching, hop-by-hop redirect following and link discovery
//!
//! Requests are issued strictly one at a time.

use crate::config::{Config, CrawlerConfig};
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchResult, NetworkErrorKind};
use crate::crawler::frontier::{CrawlTarget, Frontier};
use crate::crawler::parser::extract_links;
use crate::crawler::record::{CrawlOutput, PageRecord, SkipReason, SkippedPage};
use crate::robots::{fetch_robots, RobotsCache};
use crate::url::{has_non_html_extension, is_blacklisted_path, normalize_url, CrawlScope};
use crate::PulseError;
use reqwest::Client;
use std::time::{Duration, Instant};
use url::Url;

/// Upper bound applied to a robots.txt `Crawl-delay`
const MAX_ROBOTS_DELAY: Duration = Duration::from_secs(60);

/// Breadth-first crawler for one run
///
/// Owns the frontier, the visited set and the robots cache exclusively; all
/// three are dropped when [`Crawler::run`] returns.
pub struct Crawler {
    config: CrawlerConfig,
    client: Client,
    scope: CrawlScope,
    frontier: Frontier,
    robots: RobotsCache,
    agent_token: String,
    last_request: Option<Instant>,
}

impl Crawler {
    /// Creates a crawler seeded with the configuration's seed URLs at depth 0
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to run
    /// * `Err(PulseError)` - A seed URL is malformed or the HTTP client could not be built
    pub fn new(config: &Config) -> Result<Self, PulseError> {
        let seeds = config
            .seeds
            .iter()
            .map(|seed| normalize_url(seed))
            .collect::<Result<Vec<_>, _>>()?;

        let scope = CrawlScope::from_seeds(&seeds, config.crawler.include_subdomains);
        tracing::debug!("Crawl scope: {:?}", scope.hosts());

        let client = build_http_client(&config.crawler, &config.user_agent)?;

        let mut frontier = Frontier::new();
        for seed in seeds {
            frontier.push(seed, 0);
        }

        Ok(Self {
            config: config.crawler.clone(),
            client,
            scope,
            frontier,
            robots: RobotsCache::new(),
            agent_token: config.user_agent.crawler_name.clone(),
            last_request: None,
        })
    }

    /// Runs the crawl to completion
    ///
    /// Stops when the frontier is empty or `max_pages` pages have been
    /// fetched. Per-page failures are recorded in the output and never abort
    /// the crawl.
    pub async fn run(mut self) -> CrawlOutput {
        let max_pages = self.config.max_pages as usize;
        let start_time = Instant::now();
        let mut output = CrawlOutput::default();

        tracing::info!(
            "Starting crawl of {} seed URL(s) (max depth {}, max pages {}, delay {}s)",
            self.frontier.len(),
            self.config.max_depth,
            self.config.max_pages,
            self.config.delay
        );

        while output.pages.len() < max_pages {
            let Some(target) = self.frontier.pop() else {
                tracing::info!("Frontier is empty, crawl complete");
                break;
            };

            if let Some(reason) = self.check_policy(&target).await {
                tracing::debug!("Skipping {}: {}", target.url, reason);
                output.skipped.push(SkippedPage {
                    url: target.url,
                    depth: target.depth,
                    reason,
                    status: None,
                    detail: None,
                });
                continue;
            }

            match self.process_target(&target).await {
                Ok(page) => output.pages.push(page),
                Err(skipped) => output.skipped.push(skipped),
            }

            if output.pages.len() % 10 == 0 && !output.pages.is_empty() {
                tracing::info!(
                    "Progress: {} pages fetched, {} in frontier",
                    output.pages.len(),
                    self.frontier.len()
                );
            }
        }

        if output.pages.len() >= max_pages {
            tracing::info!(
                "Reached max pages ({}), {} URL(s) left in frontier",
                max_pages,
                self.frontier.len()
            );
        }

        tracing::info!(
            "Crawl completed: {} pages fetched, {} skipped, {} URL(s) seen in {:?}",
            output.pages.len(),
            output.skipped.len(),
            self.frontier.visited_count(),
            start_time.elapsed()
        );

        output
    }

    /// Returns the policy exclusion that applies to a target, if any
    async fn check_policy(&mut self, target: &CrawlTarget) -> Option<SkipReason> {
        if target.depth > self.config.max_depth {
            return Some(SkipReason::DepthExceeded);
        }

        if !self.scope.allows(&target.url) {
            return Some(SkipReason::OffDomain);
        }

        if is_blacklisted_path(&target.url) {
            return Some(SkipReason::BlacklistedPath);
        }

        if has_non_html_extension(&target.url) {
            return Some(SkipReason::NonHtmlExtension);
        }

        if self.config.respect_robots && !self.robots_allow(&target.url).await {
            return Some(SkipReason::RobotsDisallowed);
        }

        None
    }

    /// Checks robots.txt for the URL's origin, fetching it on first use
    async fn robots_allow(&mut self, url: &Url) -> bool {
        if self.robots.get(url).is_none() {
            let robots = fetch_robots(&self.client, url).await;
            self.robots.insert(url, robots);
        }

        self.robots
            .get(url)
            .map_or(true, |robots| robots.is_allowed(url.as_str(), &self.agent_token))
    }

    /// Sleeps until the politeness delay since the previous request has passed
    ///
    /// A robots.txt `Crawl-delay` can raise the configured delay for its origin.
    async fn wait_politely(&self, url: &Url) {
        let mut delay = self.config.delay_duration();

        if self.config.respect_robots {
            let robots_delay = self
                .robots
                .get(url)
                .and_then(|robots| robots.crawl_delay(&self.agent_token))
                .filter(|secs| secs.is_finite() && *secs > 0.0)
                .map(|secs| Duration::from_secs_f64(secs.min(MAX_ROBOTS_DELAY.as_secs_f64())));
            if let Some(robots_delay) = robots_delay {
                delay = delay.max(robots_delay);
            }
        }

        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < delay {
                tokio::time::sleep(delay - elapsed).await;
            }
        }
    }

    /// Fetches one target and turns the outcome into a page or a skip
    ///
    /// Redirects are followed one hop at a time. Each hop target is
    /// normalized and must pass the scope and path policy; a hop to a URL
    /// that is already visited or queued ends the fetch without a request.
    async fn process_target(&mut self, target: &CrawlTarget) -> Result<PageRecord, SkippedPage> {
        let skip = |reason: SkipReason, status: Option<u16>, detail: Option<String>| SkippedPage {
            url: target.url.clone(),
            depth: target.depth,
            reason,
            status,
            detail,
        };

        let mut current = target.url.clone();
        let mut hops: Vec<Url> = Vec::new();

        loop {
            self.wait_politely(&current).await;

            tracing::info!("Crawling [{}] {}", target.depth, current);
            let result = fetch_url(&self.client, current.as_str(), self.config.max_retries).await;
            self.last_request = Some(Instant::now());

            match result {
                FetchResult::Success {
                    final_url,
                    status_code,
                    content_type,
                    body,
                } => {
                    let base = Url::parse(&final_url).unwrap_or_else(|_| current.clone());
                    let url = normalize_url(base.as_str()).unwrap_or_else(|_| current.clone());

                    if target.depth < self.config.max_depth {
                        let added = self.enqueue_links(&body, &base, target.depth + 1);
                        tracing::debug!("Discovered {} new URL(s) on {}", added, url);
                    }

                    return Ok(PageRecord {
                        url,
                        requested_url: target.url.clone(),
                        depth: target.depth,
                        status: status_code,
                        content_type,
                        html: body,
                    });
                }

                FetchResult::Redirect {
                    status_code,
                    location,
                } => {
                    hops.push(current.clone());
                    if hops.len() > self.config.max_redirects as usize {
                        tracing::warn!("Too many redirects from {}", target.url);
                        return Err(skip(
                            SkipReason::Failed,
                            Some(status_code),
                            Some("too many redirects".to_string()),
                        ));
                    }

                    let next = match current.join(&location) {
                        Ok(next) => next,
                        Err(e) => {
                            tracing::warn!("Bad redirect from {} to {}: {}", current, location, e);
                            return Err(skip(SkipReason::Failed, Some(status_code), Some(location)));
                        }
                    };

                    if hops.contains(&next) {
                        tracing::warn!("Redirect loop at {}", next);
                        return Err(skip(
                            SkipReason::Failed,
                            Some(status_code),
                            Some("redirect loop".to_string()),
                        ));
                    }

                    if let Some(reason) = self.check_redirect(target, &next).await {
                        tracing::debug!("{} redirected to {}: {}", target.url, next, reason);
                        return Err(skip(reason, Some(status_code), Some(next.to_string())));
                    }

                    tracing::debug!("Following redirect {} -> {}", current, next);
                    current = next;
                }

                FetchResult::ContentMismatch { content_type } => {
                    tracing::debug!("Skipping {}: not HTML ({})", current, content_type);
                    return Err(skip(SkipReason::ContentMismatch, None, Some(content_type)));
                }

                FetchResult::HttpError { status_code } => {
                    tracing::warn!("Failed to fetch {}: HTTP {}", current, status_code);
                    return Err(skip(
                        SkipReason::from_status(status_code),
                        Some(status_code),
                        Some(format!("HTTP {}", status_code)),
                    ));
                }

                FetchResult::NetworkError { error, kind } => {
                    tracing::warn!("Failed to fetch {}: {}", current, error);
                    let reason = match kind {
                        NetworkErrorKind::Timeout => SkipReason::Timeout,
                        NetworkErrorKind::Connect => SkipReason::Unreachable,
                        NetworkErrorKind::Other => SkipReason::Failed,
                    };
                    return Err(skip(reason, None, Some(error)));
                }
            }
        }
    }

    /// Applies scope, path, visited and robots rules to a redirect target
    ///
    /// A target that normalizes to the requested URL (a trailing-slash
    /// redirect, say) is the same page and is always followed. Any other
    /// in-scope target is claimed in the visited set before it is requested.
    async fn check_redirect(&mut self, target: &CrawlTarget, next: &Url) -> Option<SkipReason> {
        let Ok(normalized) = normalize_url(next.as_str()) else {
            return Some(SkipReason::Failed);
        };

        if !self.scope.allows(&normalized) {
            return Some(SkipReason::RedirectOutOfScope);
        }

        if is_blacklisted_path(&normalized) {
            return Some(SkipReason::BlacklistedPath);
        }

        if has_non_html_extension(&normalized) {
            return Some(SkipReason::NonHtmlExtension);
        }

        if self.config.respect_robots && !self.robots_allow(&normalized).await {
            return Some(SkipReason::RobotsDisallowed);
        }

        if normalized != target.url && !self.frontier.claim(&normalized) {
            return Some(SkipReason::DuplicateRedirect);
        }

        None
    }

    /// Enqueues in-scope links from a fetched page at the given depth
    ///
    /// Malformed, off-domain, blacklisted and non-HTML links are dropped
    /// silently. Returns the number of newly queued URLs.
    fn enqueue_links(&mut self, html: &str, base: &Url, depth: u32) -> usize {
        let mut added = 0;

        for link in extract_links(html, base) {
            let Ok(normalized) = normalize_url(link.as_str()) else {
                continue;
            };

            if !self.scope.allows(&normalized)
                || is_blacklisted_path(&normalized)
                || has_non_html_extension(&normalized)
            {
                continue;
            }

            if self.frontier.push(normalized, depth) {
                added += 1;
            }
        }

        added
    }
}
