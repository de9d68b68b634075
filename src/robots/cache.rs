//! Per-run robots.txt cache
//!
//! One entry per origin (scheme, host and port). Entries live for the
//! duration of a single crawl and are dropped with the crawler.

use crate::robots::ParsedRobots;
use std::collections::HashMap;
use url::Url;

/// Robots rules keyed by origin
#[derive(Debug, Default)]
pub struct RobotsCache {
    entries: HashMap<String, ParsedRobots>,
}

impl RobotsCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cache key for a URL
    pub fn origin_key(url: &Url) -> String {
        url.origin().ascii_serialization()
    }

    /// Looks up the cached rules for the URL's origin
    pub fn get(&self, url: &Url) -> Option<&ParsedRobots> {
        self.entries.get(&Self::origin_key(url))
    }

    /// Stores the rules for the URL's origin, replacing any previous entry
    pub fn insert(&mut self, url: &Url, robots: ParsedRobots) {
        self.entries.insert(Self::origin_key(url), robots);
    }

    /// Number of cached origins
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
