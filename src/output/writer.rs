//! Writing module records to disk

use crate::output::records::ModuleRecord;
use crate::PulseError;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Serializes records as a JSON array, compact or pretty
pub fn to_json_string(records: &[ModuleRecord], pretty: bool) -> Result<String, PulseError> {
    let json = if pretty {
        serde_json::to_string_pretty(records)?
    } else {
        serde_json::to_string(records)?
    };
    Ok(json)
}

/// Writes records as JSON to `path`, creating parent directories
pub fn write_json(records: &[ModuleRecord], path: &Path, pretty: bool) -> Result<(), PulseError> {
    create_parent_dirs(path)?;

    let mut writer = BufWriter::new(File::create(path)?);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, records)?;
    } else {
        serde_json::to_writer(&mut writer, records)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::info!("Wrote {} module(s) to {}", records.len(), path.display());
    Ok(())
}

/// Writes text to `path`, creating parent directories
pub fn write_text(text: &str, path: &Path) -> Result<(), PulseError> {
    create_parent_dirs(path)?;
    fs::write(path, text)?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

fn create_parent_dirs(path: &Path) -> Result<(), PulseError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
