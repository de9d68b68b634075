//! Run statistics

use crate::crawler::{CrawlOutput, SkipReason};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Counters collected over one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_seconds: f64,

    pub pages_fetched: usize,
    pub pages_skipped: usize,

    /// Skip counts keyed by reason label; zero counts are omitted
    pub skipped_by_reason: BTreeMap<&'static str, usize>,

    /// Fetched pages keyed by discovery depth
    pub pages_by_depth: BTreeMap<u32, usize>,

    /// Fetched pages that yielded no content blocks
    pub pages_without_blocks: usize,
    pub blocks_extracted: usize,

    pub module_level: Option<u8>,
    pub modules: usize,
    pub submodules: usize,
    pub orphan_blocks: usize,
}

impl RunStats {
    /// Starts a run's statistics at the current time
    pub fn start() -> Self {
        let now = Utc::now();
        Self {
            started_at: now,
            finished_at: now,
            elapsed_seconds: 0.0,
            pages_fetched: 0,
            pages_skipped: 0,
            skipped_by_reason: BTreeMap::new(),
            pages_by_depth: BTreeMap::new(),
            pages_without_blocks: 0,
            blocks_extracted: 0,
            module_level: None,
            modules: 0,
            submodules: 0,
            orphan_blocks: 0,
        }
    }

    /// Records crawl counters; must run before the pages are consumed
    pub fn record_crawl(&mut self, output: &CrawlOutput) {
        self.pages_fetched = output.pages.len();
        self.pages_skipped = output.skipped.len();

        for page in &output.pages {
            *self.pages_by_depth.entry(page.depth).or_default() += 1;
        }

        for reason in SkipReason::all() {
            let count = output.skipped_with(reason);
            if count > 0 {
                self.skipped_by_reason.insert(reason.as_str(), count);
            }
        }
    }

    /// Records the block count of one extracted page
    pub fn record_page_blocks(&mut self, blocks: usize) {
        self.blocks_extracted += blocks;
        if blocks == 0 {
            self.pages_without_blocks += 1;
        }
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Utc::now();
        self.elapsed_seconds = (self.finished_at - self.started_at)
            .num_milliseconds()
            .max(0) as f64
            / 1000.0;
    }

    /// Skipped targets that were errors rather than policy exclusions
    pub fn error_count(&self) -> usize {
        SkipReason::all()
            .into_iter()
            .filter(SkipReason::is_error)
            .filter_map(|reason| self.skipped_by_reason.get(reason.as_str()))
            .sum()
    }
}
