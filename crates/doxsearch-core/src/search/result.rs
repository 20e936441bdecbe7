//! Presentation of lookup results
//!
//! Mirrors what the documentation site's search box shows: the label, and
//! beneath it one line per documented location with its decoded qualifier.

use std::path::Path;

use serde::Serialize;

use super::types::{decode_entities, Context, SearchEntry};

/// One entry ready for display
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub key: String,
    /// Label with HTML entities decoded
    pub label: String,
    pub hits: Vec<ResultHit>,
}

/// One documented location of a result
#[derive(Debug, Clone, Serialize)]
pub struct ResultHit {
    /// Link as written in the table
    pub href: String,
    /// Page resolved against the search directory, with its fragment, when a directory is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    pub context: Context,
    pub external: bool,
}

impl SearchResult {
    /// Build a result, resolving pages against `search_dir` if given
    pub fn from_entry(entry: &SearchEntry, search_dir: Option<&Path>) -> Self {
        let hits = entry
            .targets
            .iter()
            .map(|anchor| ResultHit {
                href: anchor.href(),
                page: search_dir.map(|dir| {
                    let page = anchor.resolve(dir).display().to_string();
                    match &anchor.fragment {
                        Some(fragment) => format!("{page}#{fragment}"),
                        None => page,
                    }
                }),
                context: anchor.context(),
                external: anchor.external,
            })
            .collect();

        Self {
            key: entry.key.clone(),
            label: decode_entities(&entry.label),
            hits,
        }
    }
}

impl std::fmt::Display for SearchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)?;
        for hit in &self.hits {
            f.write_str("\n    ")?;
            let context = hit.context.describe();
            if !context.is_empty() {
                write!(f, "{context}  ")?;
            }
            f.write_str(hit.page.as_deref().unwrap_or(&hit.href))?;
            if hit.external {
                f.write_str("  [external]")?;
            }
        }
        Ok(())
    }
}

/// Render entries as results, keeping at most `limit` of them
pub fn render_results<'a>(
    entries: impl IntoIterator<Item = &'a SearchEntry>,
    search_dir: Option<&Path>,
    limit: Option<usize>,
) -> Vec<SearchResult> {
    entries
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|entry| SearchResult::from_entry(entry, search_dir))
        .collect()
}
