//! Implementation of the `doxsearch list` and `doxsearch stats` commands.

use anyhow::Result;
use std::io::Write;

use doxsearch_core::SearchIndex;

/// Print every key with its label, in key order.
pub fn list(index: &SearchIndex, out: &mut impl Write) -> Result<()> {
    let width = index
        .table
        .entries()
        .iter()
        .map(|e| e.key.len())
        .max()
        .unwrap_or(0);

    for entry in index.table.sorted() {
        writeln!(out, "{:<width$}  {}", entry.key, entry.label)?;
    }
    Ok(())
}

/// Print partition, entry, anchor and page counts.
pub fn stats(index: &SearchIndex, out: &mut impl Write) -> Result<()> {
    let table = &index.table;
    let ambiguous = table.entries().iter().filter(|e| e.is_ambiguous()).count();
    let external = table
        .entries()
        .iter()
        .flat_map(|e| &e.targets)
        .filter(|t| t.external)
        .count();

    writeln!(out, "Directory:   {}", index.dir.display())?;
    writeln!(out, "Partitions:  {}", index.files.len())?;
    writeln!(out, "Entries:     {}", table.len())?;
    writeln!(out, "Anchors:     {}", table.anchor_count())?;
    writeln!(out, "Pages:       {}", index.page_count())?;
    writeln!(out, "Ambiguous:   {ambiguous}")?;
    writeln!(out, "External:    {external}")?;
    Ok(())
}
