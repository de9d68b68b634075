//! Breadth-first crawl frontier
//!
//! A FIFO queue of [`CrawlTarget`]s plus the visited set. A URL enters the
//! visited set the moment it is enqueued (or claimed as a redirect target),
//! so each normalized URL is handed out at most once per run.

use std::collections::{HashSet, VecDeque};
use url::Url;

/// A URL awaiting fetch, with the number of link hops from its seed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    /// Normalized URL
    pub url: Url,

    /// Discovery depth (seeds are depth 0)
    pub depth: u32,
}

/// FIFO frontier and visited set, owned by a single crawler
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<CrawlTarget>,
    visited: HashSet<String>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a URL unless it has been seen before
    ///
    /// Returns true if the URL was added.
    pub fn push(&mut self, url: Url, depth: u32) -> bool {
        if !self.visited.insert(url.as_str().to_string()) {
            return false;
        }
        self.queue.push_back(CrawlTarget { url, depth });
        true
    }

    /// Pops the oldest target
    pub fn pop(&mut self) -> Option<CrawlTarget> {
        self.queue.pop_front()
    }

    /// Claims a URL reached through a redirect
    ///
    /// Returns false if the URL was already fetched or is still queued.
    pub fn claim(&mut self, url: &Url) -> bool {
        self.visited.insert(url.as_str().to_string())
    }

    /// Returns true if the URL has been enqueued or claimed
    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url.as_str())
    }

    /// Number of queued targets
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of distinct URLs seen so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
