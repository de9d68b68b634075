//! Hierarchy inference
//!
//! Builds the two-level module tree from the content blocks of every page.
//! The module level is chosen once for the run from aggregated heading
//! statistics, then each page is folded into the tree with a fresh cursor.

mod level;
mod names;
mod tree;

pub use level::{choose_module_level, HeadingStats, MAX_HEADING_LEVEL};
pub use names::{clean_heading, normalize_name};
pub use tree::{ExtractionResult, ModuleNode, SubmoduleNode};

use crate::config::InferenceConfig;
use crate::extract::{BlockKind, ContentBlock};

/// Infers the module tree from per-page content blocks
///
/// Descriptions are left empty for the summarizer.
pub fn infer<P: AsRef<[ContentBlock]>>(pages: &[P], config: &InferenceConfig) -> ExtractionResult {
    let stats = HeadingStats::collect(pages);
    let module_level = choose_module_level(&stats, config);

    tracing::debug!(
        "Heading pages: {} total, per level {:?}; module level {:?}",
        stats.pages_with_headings,
        stats.pages_with_level,
        module_level
    );

    match module_level {
        Some(level) => infer_with_level(pages, level, config),
        None => ExtractionResult::new(None),
    }
}

/// Infers the module tree with an explicit module level
pub fn infer_with_level<P: AsRef<[ContentBlock]>>(
    pages: &[P],
    module_level: u8,
    config: &InferenceConfig,
) -> ExtractionResult {
    let mut result = ExtractionResult::new(Some(module_level));

    for page in pages {
        let mut cursor = PageCursor::default();
        for block in page.as_ref() {
            cursor.apply(block, module_level, config, &mut result);
        }
    }

    tracing::debug!(
        "Inferred {} module(s), {} submodule(s), {} orphan block(s)",
        result.modules.len(),
        result.submodule_count(),
        result.orphan_blocks
    );

    result
}

/// Open module and submodule while folding one page
///
/// Created fresh for every page; nothing carries across pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageCursor {
    pub module: Option<usize>,
    pub submodule: Option<usize>,
}

impl PageCursor {
    /// Folds one block into the tree
    pub fn apply(
        &mut self,
        block: &ContentBlock,
        module_level: u8,
        config: &InferenceConfig,
        result: &mut ExtractionResult,
    ) {
        match block.kind {
            BlockKind::Heading(level) => {
                let mut name = clean_heading(&block.text, config.max_name_length);
                if name.chars().count() < config.min_name_length {
                    name.clear();
                }
                self.on_heading(level, name, module_level, result);
            }
            BlockKind::Paragraph | BlockKind::ListItem => self.on_text(&block.text, result),
        }
    }

    fn on_heading(
        &mut self,
        level: u8,
        name: String,
        module_level: u8,
        result: &mut ExtractionResult,
    ) {
        if level < module_level {
            self.module = None;
            self.submodule = None;
            return;
        }

        if level == module_level {
            self.module = (!name.is_empty()).then(|| result.open_module(name));
            self.submodule = None;
            return;
        }

        self.submodule = match self.module {
            Some(module) if !name.is_empty() => Some(result.modules[module].open_submodule(name)),
            _ => None,
        };
    }

    fn on_text(&self, text: &str, result: &mut ExtractionResult) {
        match (self.module, self.submodule) {
            (Some(module), Some(submodule)) => {
                result.modules[module].submodules[submodule].append_text(text);
            }
            (Some(module), None) => result.modules[module].append_text(text),
            (None, _) => result.orphan_blocks += 1,
        }
    }
}
