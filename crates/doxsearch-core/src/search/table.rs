//! The loaded, read-only search table

use std::collections::BTreeMap;
use std::ops::Bound;

use serde::Serialize;
use thiserror::Error;

use super::key::encode_key;
use super::types::SearchEntry;

/// Errors raised while assembling a table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("entry has an empty key")]
    EmptyKey,

    #[error("entry '{0}' has no targets")]
    NoTargets(String),

    #[error("duplicate key '{0}'")]
    DuplicateKey(String),
}

/// A search table: symbol keys mapped to documentation anchors
///
/// Entries keep the order they were read in, which is the order they are
/// written back out. Lookups go through a sorted key index so results always
/// come back in ascending key order. Keys are unique case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchTable {
    entries: Vec<SearchEntry>,
    #[serde(skip)]
    by_key: BTreeMap<String, usize>,
}

impl SearchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from entries, rejecting empty and duplicate keys
    pub fn from_entries(entries: impl IntoIterator<Item = SearchEntry>) -> Result<Self, TableError> {
        let mut table = Self::new();
        for entry in entries {
            table.insert(entry)?;
        }
        Ok(table)
    }

    /// Add an entry while the table is being assembled
    pub(crate) fn insert(&mut self, entry: SearchEntry) -> Result<(), TableError> {
        if entry.key.is_empty() {
            return Err(TableError::EmptyKey);
        }
        if entry.targets.is_empty() {
            return Err(TableError::NoTargets(entry.key));
        }
        let folded = entry.key.to_lowercase();
        if self.by_key.contains_key(&folded) {
            return Err(TableError::DuplicateKey(entry.key));
        }
        self.by_key.insert(folded, self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Every entry whose key starts with `prefix`, in ascending key order
    ///
    /// The prefix is matched case-insensitively, both as written and encoded
    /// the same way keys are, so typing `spl_` or `spl_5f` finds `spl_5fpz`.
    /// An empty prefix returns the whole table; no match returns an empty list.
    pub fn lookup(&self, prefix: &str) -> Vec<&SearchEntry> {
        let raw = prefix.to_lowercase();
        let encoded = encode_key(prefix);

        let mut hits: BTreeMap<&str, usize> = self.scan(&raw).collect();
        if encoded != raw {
            hits.extend(self.scan(&encoded));
        }
        hits.into_values().map(|index| &self.entries[index]).collect()
    }

    /// Folded keys starting with `prefix`, with their entry indices
    fn scan<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, usize)> + 'a {
        self.by_key
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(key, _)| key.starts_with(prefix))
            .map(|(key, &index)| (key.as_str(), index))
    }

    /// Exact lookup by stored key
    pub fn get(&self, key: &str) -> Option<&SearchEntry> {
        self.by_key
            .get(&key.to_lowercase())
            .map(|&index| &self.entries[index])
    }

    /// Exact lookup by symbol text (`spl_pz`, `SplPar`)
    pub fn find_symbol(&self, symbol: &str) -> Option<&SearchEntry> {
        self.get(&encode_key(symbol))
    }

    /// Entries in table order
    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    /// Entries in ascending key order
    pub fn sorted(&self) -> impl Iterator<Item = &SearchEntry> {
        self.by_key.values().map(|&index| &self.entries[index])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of anchors across all entries
    pub fn anchor_count(&self) -> usize {
        self.entries.iter().map(|e| e.targets.len()).sum()
    }
}

impl<'a> IntoIterator for &'a SearchTable {
    type Item = &'a SearchEntry;
    type IntoIter = std::slice::Iter<'a, SearchEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
