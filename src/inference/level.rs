//! Run-wide module level heuristic

use crate::config::InferenceConfig;
use crate::extract::ContentBlock;

/// Deepest heading level the extractor emits
pub const MAX_HEADING_LEVEL: u8 = 4;

/// Per-level page counts across a crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingStats {
    /// Pages carrying at least one heading
    pub pages_with_headings: usize,

    /// `pages_with_level[n - 1]` counts pages carrying at least one heading at level n
    pub pages_with_level: [usize; MAX_HEADING_LEVEL as usize],
}

impl HeadingStats {
    pub fn collect<P: AsRef<[ContentBlock]>>(pages: &[P]) -> Self {
        let mut stats = Self::default();

        for page in pages {
            let mut seen = [false; MAX_HEADING_LEVEL as usize];
            for level in page.as_ref().iter().filter_map(|b| b.kind.heading_level()) {
                if (1..=MAX_HEADING_LEVEL).contains(&level) {
                    seen[level as usize - 1] = true;
                }
            }

            if seen.iter().any(|&s| s) {
                stats.pages_with_headings += 1;
            }
            for (count, present) in stats.pages_with_level.iter_mut().zip(seen) {
                if present {
                    *count += 1;
                }
            }
        }

        stats
    }

    pub fn pages_with(&self, level: u8) -> usize {
        match level {
            1..=MAX_HEADING_LEVEL => self.pages_with_level[level as usize - 1],
            _ => 0,
        }
    }
}

/// Chooses the heading level that defines modules for the whole run
///
/// H1 wins when at least `h1_page_fraction` of the heading-bearing pages
/// carry one. Otherwise the level present on the most pages wins, ties going
/// to the shallower level. Returns None when no page has a heading.
pub fn choose_module_level(stats: &HeadingStats, config: &InferenceConfig) -> Option<u8> {
    if stats.pages_with_headings == 0 {
        return None;
    }

    let h1_fraction = stats.pages_with(1) as f64 / stats.pages_with_headings as f64;
    if stats.pages_with(1) > 0 && h1_fraction >= config.h1_page_fraction {
        return Some(1);
    }

    let mut best: Option<(u8, usize)> = None;
    for level in 1..=MAX_HEADING_LEVEL {
        let count = stats.pages_with(level);
        if count > 0 && best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((level, count));
        }
    }

    best.map(|(level, _)| level)
}
