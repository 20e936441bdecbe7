//! Serialization of search tables
//!
//! `to_js` writes the layout Doxygen generates, so a table parsed from a
//! Doxygen file and written back is byte-identical to the input. `to_json`
//! is a plain JSON export for other tools.

use super::table::{SearchTable, TableError};
use super::types::{AnchorRef, SearchEntry};

/// Name of the variable Doxygen assigns the table to
pub const SEARCH_DATA_VAR: &str = "searchData";

impl SearchTable {
    /// Render the table as a Doxygen `searchData` script
    pub fn to_js(&self) -> String {
        let mut js = format!("var {SEARCH_DATA_VAR}=\n[\n");
        for (i, entry) in self.entries().iter().enumerate() {
            if i > 0 {
                js.push_str(",\n");
            }
            js.push_str("  ");
            write_entry(&mut js, entry);
        }
        js.push_str("\n];\n");
        js
    }

    /// Render the table as a pretty-printed JSON array of entries
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Rebuild a table from the output of [`SearchTable::to_json`]
    pub fn from_json(json: &str) -> Result<Self, JsonError> {
        let entries: Vec<SearchEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries)?)
    }
}

/// Errors reading a JSON export back in
#[derive(thiserror::Error, Debug)]
pub enum JsonError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Table(#[from] TableError),
}

fn write_entry(js: &mut String, entry: &SearchEntry) {
    js.push('[');
    push_quoted(js, &entry.key);
    js.push_str(",[");
    push_quoted(js, &entry.label);
    for anchor in &entry.targets {
        js.push(',');
        write_anchor(js, anchor);
    }
    js.push_str("]]");
}

fn write_anchor(js: &mut String, anchor: &AnchorRef) {
    js.push('[');
    push_quoted(js, &anchor.href());
    // 1 opens inside the documentation frame, 0 in a new window
    js.push_str(if anchor.external { ",0," } else { ",1," });
    push_quoted(js, &anchor.qualifier);
    js.push(']');
}

/// Append a single-quoted JavaScript string literal
fn push_quoted(js: &mut String, s: &str) {
    js.push('\'');
    for c in s.chars() {
        match c {
            '\\' => js.push_str("\\\\"),
            '\'' => js.push_str("\\'"),
            '\n' => js.push_str("\\n"),
            '\r' => js.push_str("\\r"),
            '\t' => js.push_str("\\t"),
            c if c.is_control() => {
                js.push_str(&format!("\\u{:04x}", u32::from(c)));
            }
            c => js.push(c),
        }
    }
    js.push('\'');
}
