//! Robots.txt handling module
//!
//! This module provides functionality for fetching, parsing, and caching
//! robots.txt files. A robots.txt that cannot be fetched is treated as
//! allow-all.

mod cache;
mod parser;

pub use cache::RobotsCache;
pub use parser::ParsedRobots;

use reqwest::header::LOCATION;
use reqwest::Client;
use url::Url;

/// Redirect hops followed when fetching robots.txt
pub const MAX_ROBOTS_REDIRECTS: usize = 5;

/// Fetches robots.txt for the origin of `url`
///
/// The page client does not follow redirects, so up to
/// [`MAX_ROBOTS_REDIRECTS`] hops are resolved here. Never fails: a 4xx, 5xx,
/// network error, redirect loop or unreadable body all yield
/// [`ParsedRobots::allow_all`].
pub async fn fetch_robots(client: &Client, url: &Url) -> ParsedRobots {
    let mut robots_url = match url.join("/robots.txt") {
        Ok(u) => u,
        Err(_) => return ParsedRobots::allow_all(),
    };

    let mut hops = 0;
    let response = loop {
        tracing::debug!("Fetching robots.txt: {}", robots_url);

        let response = match client.get(robots_url.as_str()).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Could not fetch {}: {}", robots_url, e);
                return ParsedRobots::allow_all();
            }
        };

        if !response.status().is_redirection() {
            break response;
        }

        let next = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|location| robots_url.join(location).ok());

        match next {
            Some(next) if hops < MAX_ROBOTS_REDIRECTS => {
                tracing::debug!("robots.txt at {} redirects to {}", robots_url, next);
                hops += 1;
                robots_url = next;
            }
            _ => {
                tracing::debug!(
                    "Giving up on robots.txt at {} (HTTP {}, {} redirect(s))",
                    robots_url,
                    response.status().as_u16(),
                    hops
                );
                return ParsedRobots::allow_all();
            }
        }
    };

    if !response.status().is_success() {
        tracing::debug!(
            "No usable robots.txt at {} (HTTP {})",
            robots_url,
            response.status().as_u16()
        );
        return ParsedRobots::allow_all();
    }

    match response.text().await {
        Ok(body) => ParsedRobots::from_content(&body),
        Err(e) => {
            tracing::debug!("Could not read {}: {}", robots_url, e);
            ParsedRobots::allow_all()
        }
    }
}
