//! Structural checks over a loaded table
//!
//! Loading only rejects what makes a table unusable (empty or duplicate keys,
//! entries without targets). Everything else a generator could get wrong is
//! reported here so callers can decide how strict to be.

use serde::Serialize;

use super::key::{encode_key, is_canonical_key};
use super::table::SearchTable;
use super::types::decode_entities;

/// A problem found in one entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Key of the offending entry
    pub key: String,
    pub kind: IssueKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum IssueKind {
    /// Key is not in `_xx`-escaped lowercase form
    NonCanonicalKey,
    /// Encoding the label gives a different key
    LabelMismatch { expected: String },
    /// Entry sorts before the one preceding it
    OutOfOrder { previous: String },
    /// Anchor with an empty page path
    EmptyPath { target: usize },
    /// Anchor whose URL ends in a bare `#`
    EmptyFragment { target: usize },
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}': ", self.key)?;
        match &self.kind {
            IssueKind::NonCanonicalKey => write!(f, "key is not in canonical encoded form"),
            IssueKind::LabelMismatch { expected } => {
                write!(f, "label encodes to '{expected}', not the key")
            }
            IssueKind::OutOfOrder { previous } => write!(f, "sorts before preceding key '{previous}'"),
            IssueKind::EmptyPath { target } => write!(f, "target {target} has an empty page path"),
            IssueKind::EmptyFragment { target } => write!(f, "target {target} has an empty fragment"),
        }
    }
}

impl SearchTable {
    /// Run every structural check, returning issues in table order
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let mut previous: Option<&str> = None;

        for entry in self.entries() {
            let mut report = |kind| {
                issues.push(ValidationIssue {
                    key: entry.key.clone(),
                    kind,
                });
            };

            if !is_canonical_key(&entry.key) {
                report(IssueKind::NonCanonicalKey);
            } else {
                let expected = encode_key(&decode_entities(&entry.label));
                if expected != entry.key {
                    report(IssueKind::LabelMismatch { expected });
                }
            }

            if let Some(prev) = previous {
                if entry.key.to_lowercase() < prev.to_lowercase() {
                    report(IssueKind::OutOfOrder {
                        previous: prev.to_string(),
                    });
                }
            }
            previous = Some(&entry.key);

            for (target, anchor) in entry.targets.iter().enumerate() {
                if anchor.path.is_empty() {
                    report(IssueKind::EmptyPath { target });
                }
                if anchor.fragment.as_deref() == Some("") {
                    report(IssueKind::EmptyFragment { target });
                }
            }
        }

        issues
    }
}
