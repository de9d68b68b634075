//! Statistics reporting

use crate::output::writer::write_text;
use crate::pipeline::RunStats;
use crate::PulseError;
use std::path::Path;

/// Writes run statistics as pretty JSON to `path`
pub fn write_stats_json(stats: &RunStats, path: &Path) -> Result<(), PulseError> {
    let mut json = serde_json::to_string_pretty(stats)?;
    json.push('\n');
    write_text(&json, path)
}

/// Prints run statistics to stdout
pub fn print_statistics(stats: &RunStats) {
    println!("=== Run Statistics ===\n");

    println!("Timing:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    println!("  Finished: {}", stats.finished_at.to_rfc3339());
    println!("  Elapsed: {:.2}s", stats.elapsed_seconds);
    println!();

    println!("Crawl:");
    println!("  Pages fetched: {}", stats.pages_fetched);
    println!("  Targets skipped: {}", stats.pages_skipped);
    for (depth, count) in &stats.pages_by_depth {
        println!("  Depth {}: {} page(s)", depth, count);
    }
    println!();

    if !stats.skipped_by_reason.is_empty() {
        println!("Skipped by Reason:");
        let mut reasons: Vec<_> = stats.skipped_by_reason.iter().collect();
        reasons.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));

        for (reason, count) in reasons {
            println!("  {}: {}", reason, count);
        }
        println!();
    }

    println!("Extraction:");
    println!("  Content blocks: {}", stats.blocks_extracted);
    println!("  Pages without content: {}", stats.pages_without_blocks);
    match stats.module_level {
        Some(level) => println!("  Module heading level: H{}", level),
        None => println!("  Module heading level: none"),
    }
    println!("  Modules: {}", stats.modules);
    println!("  Submodules: {}", stats.submodules);
    println!("  Unattributed text blocks: {}", stats.orphan_blocks);
    println!();

    let attempted = stats.pages_fetched + stats.error_count();
    let success_rate = if attempted > 0 {
        (stats.pages_fetched as f64 / attempted as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Fetch Success Rate: {:.1}% ({} / {} requested pages)",
        success_rate, stats.pages_fetched, attempted
    );
}
