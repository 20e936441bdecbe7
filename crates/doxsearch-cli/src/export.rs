//! Implementation of the `doxsearch export` command.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tracing::info;

use doxsearch_core::SearchIndex;

/// Output format for an exported table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// Doxygen `searchData` script
    Js,
    /// Pretty-printed JSON array of entries
    Json,
}

fn render(index: &SearchIndex, format: ExportFormat) -> Result<String> {
    Ok(match format {
        ExportFormat::Js => index.table.to_js(),
        ExportFormat::Json => {
            let mut json = index.table.to_json().context("Failed to serialize table")?;
            json.push('\n');
            json
        }
    })
}

/// Write the merged table to `out`.
pub fn run(index: &SearchIndex, format: ExportFormat, out: &mut impl Write) -> Result<()> {
    out.write_all(render(index, format)?.as_bytes())?;
    Ok(())
}

/// Write the merged table to a file.
pub fn to_file(index: &SearchIndex, format: ExportFormat, path: &Path) -> Result<()> {
    let content = render(index, format)?;
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), entries = index.table.len(), "exported search table");
    Ok(())
}
