//! Pipeline orchestration
//!
//! Sequences the four stages strictly forward:
//! seeds → crawl → extract → infer → summarize.
//! Each stage runs to completion before the next begins.

mod stats;

pub use stats::RunStats;

use crate::config::{validate, Config};
use crate::crawler::{crawl, PageRecord, SkippedPage};
use crate::extract::ContentExtractor;
use crate::inference::{infer, ExtractionResult};
use crate::summarize::Summarizer;
use crate::PulseError;

/// Everything a pipeline run produced
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Module tree with descriptions filled in
    pub result: ExtractionResult,

    /// Targets that were not fetched, with reasons
    pub skipped: Vec<SkippedPage>,

    pub stats: RunStats,
}

/// Runs the full pipeline for the configured seeds
///
/// The configuration is validated before any request is made; after that no
/// per-page failure aborts the run. A run that finds no module headings
/// returns an empty tree.
///
/// # Returns
///
/// * `Ok(PipelineReport)` - The run completed
/// * `Err(PulseError)` - The configuration is invalid or the HTTP client could not be built
pub async fn run_pipeline(config: &Config) -> Result<PipelineReport, PulseError> {
    validate(config)?;

    let mut stats = RunStats::start();
    tracing::info!("Pipeline started at {}", stats.started_at.to_rfc3339());

    let output = crawl(config).await?;
    stats.record_crawl(&output);

    let result = build_module_tree(output.pages, config, &mut stats);

    stats.finish();
    tracing::info!(
        "Pipeline finished: {} module(s), {} submodule(s) from {} page(s) in {:.2}s",
        stats.modules,
        stats.submodules,
        stats.pages_fetched,
        stats.elapsed_seconds
    );

    Ok(PipelineReport {
        result,
        skipped: output.skipped,
        stats,
    })
}

/// Runs extraction, inference and summarization over fetched pages
///
/// Pages are consumed; each raw body is dropped once its blocks are extracted.
pub fn build_module_tree(
    pages: Vec<PageRecord>,
    config: &Config,
    stats: &mut RunStats,
) -> ExtractionResult {
    let extractor = ContentExtractor::new(config.extractor.clone());

    let per_page_blocks: Vec<_> = pages
        .into_iter()
        .map(|page| {
            let content = extractor.extract(&page.html, &page.url);
            stats.record_page_blocks(content.blocks.len());
            if content.blocks.is_empty() {
                tracing::debug!("No content blocks on {}", page.url);
            }
            content.blocks
        })
        .collect();

    let mut result = infer(&per_page_blocks, &config.inference);
    if result.is_empty() {
        tracing::info!("No module-level headings found");
    }

    Summarizer::new(config.summarizer.clone()).describe(&mut result);

    stats.module_level = result.module_level;
    stats.modules = result.modules.len();
    stats.submodules = result.submodule_count();
    stats.orphan_blocks = result.orphan_blocks;

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn page(path: &str, html: &str) -> PageRecord {
        let url = Url::parse(&format!("https://docs.example.com{}", path)).unwrap();
        PageRecord {
            url: url.clone(),
            requested_url: url,
            depth: 0,
            status: 200,
            content_type: "text/html".to_string(),
            html: html.to_string(),
        }
    }

    #[test]
    fn test_build_module_tree() {
        let pages = vec![
            page(
                "/install",
                "<body><h1>Install</h1><p>Install the CLI by running setup.</p>\
                 <h2>Requirements</h2><p>Needs network access.</p></body>",
            ),
            page("/blank", "<body><p>Short.</p></body>"),
        ];
        let mut stats = RunStats::start();

        let result = build_module_tree(pages, &Config::default(), &mut stats);

        assert_eq!(result.modules.len(), 1);
        assert_eq!(result.modules[0].description, "Install the CLI by running setup.");
        assert_eq!(
            result.modules[0].submodules[0].description,
            "Needs network access."
        );
        assert_eq!(stats.modules, 1);
        assert_eq!(stats.submodules, 1);
        assert_eq!(stats.pages_without_blocks, 1);
        assert_eq!(stats.module_level, Some(1));
    }

    #[tokio::test]
    async fn test_run_pipeline_rejects_missing_seeds() {
        let result = run_pipeline(&Config::default()).await;
        assert!(matches!(result, Err(PulseError::Config(_))));
    }
}
