//! Output module for module records and run reports
//!
//! This module handles:
//! - Converting the module tree into serialized records
//! - Writing JSON and markdown files
//! - Printing run statistics and writing them as JSON

mod markdown;
mod records;
mod stats;
mod writer;

pub use markdown::render_markdown;
pub use records::{to_records, ModuleRecord, SubmoduleMap};
pub use stats::{print_statistics, write_stats_json};
pub use writer::{to_json_string, write_json, write_text};

use crate::PulseError;
use std::path::Path;

/// Output file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Markdown,
}

/// Writes records to `path` in the given format
pub fn write_records(
    records: &[ModuleRecord],
    path: &Path,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), PulseError> {
    match format {
        OutputFormat::Json => write_json(records, path, pretty),
        OutputFormat::Markdown => write_text(&render_markdown(records), path),
    }
}
