//! Implementation of the `doxsearch check` command.

use anyhow::Result;
use std::io::Write;
use tracing::info;

use doxsearch_core::SearchIndex;

/// Report structural issues, failing when any are found.
pub fn run(index: &SearchIndex, json: bool, out: &mut impl Write) -> Result<()> {
    let issues = index.table.validate();

    if json {
        serde_json::to_writer_pretty(&mut *out, &issues)?;
        writeln!(out)?;
    } else {
        for issue in &issues {
            writeln!(out, "{issue}")?;
        }
    }

    if !issues.is_empty() {
        return Err(anyhow::anyhow!(
            "{} issue(s) found in {} entries",
            issues.len(),
            index.table.len()
        ));
    }

    info!(entries = index.table.len(), "search index is well formed");
    if !json {
        writeln!(
            out,
            "OK: {} entries across {} partition(s)",
            index.table.len(),
            index.files.len()
        )?;
    }
    Ok(())
}
