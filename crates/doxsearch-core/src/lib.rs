//! Doxsearch Core - reading and querying Doxygen search indexes
//!
//! This crate provides:
//! - Lexer: tokenization of `searchData` table files
//! - Parser: table construction from the token stream
//! - Search: entries, prefix lookup, serialization and validation
//! - Index: loading and merging a directory of partition files
//! - Config: `doxsearch.toml` settings

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lexer module - tokenization of table files
pub mod lexer;

/// Parser module - converts tokens into a search table
pub mod parser;

/// Search tables and lookups
pub mod search;

/// Partitioned search directories
pub mod index;

/// Configuration file support
pub mod config;

pub use config::{Config, ConfigError};
pub use index::{IndexError, SearchIndex, DEFAULT_PATTERN};
pub use parser::{ParseError, ParseErrorKind, Parser};
pub use search::{AnchorRef, Context, SearchEntry, SearchResult, SearchTable, ValidationIssue};
