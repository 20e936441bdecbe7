//! Search tables: entries, lookup, serialization and validation
//!
//! A table maps encoded symbol keys to the anchors where each symbol is
//! documented. Tables are built once by the parser (or from a JSON export)
//! and are read-only afterwards.

mod key;
mod result;
mod table;
mod types;
mod validate;
mod writer;

pub use key::{decode_key, encode_key, is_canonical_key};
pub use result::{render_results, ResultHit, SearchResult};
pub use table::{SearchTable, TableError};
pub use types::{decode_entities, AnchorRef, Context, SearchEntry};
pub use validate::{IssueKind, ValidationIssue};
pub use writer::{JsonError, SEARCH_DATA_VAR};
