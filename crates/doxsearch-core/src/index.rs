//! Loading a documentation build's search directory
//!
//! Doxygen splits its search index across partition files (`all_0.js`,
//! `all_1.js`, ...). A [`SearchIndex`] loads the partitions matching a glob
//! pattern and merges them into a single [`SearchTable`].

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::parser::{ParseError, Parser};
use crate::search::{SearchTable, TableError};

/// Pattern matching the partitions of the "All" search category
pub const DEFAULT_PATTERN: &str = "all_*.js";

/// Errors that can occur while loading a search directory
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("invalid file pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("{path}: {source}")]
    Table {
        path: PathBuf,
        #[source]
        source: TableError,
    },

    #[error("key '{key}' in '{path}' is already defined in another partition")]
    DuplicateKey { key: String, path: PathBuf },

    #[error("no files matching '{pattern}' in '{dir}'")]
    NoFiles { dir: PathBuf, pattern: String },
}

/// A merged search table plus where it came from
#[derive(Debug, Clone)]
pub struct SearchIndex {
    /// Directory the partitions were read from; anchors resolve against it
    pub dir: PathBuf,
    /// Partition files in load order
    pub files: Vec<PathBuf>,
    pub table: SearchTable,
}

impl SearchIndex {
    /// Load a single table file
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, IndexError> {
        let path = path.as_ref();
        let table = read_table(path)?;
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(Self {
            dir,
            files: vec![path.to_path_buf()],
            table,
        })
    }

    /// Load and merge every partition in `dir` matching `pattern`
    ///
    /// Partitions are merged in natural order (`all_2.js` before `all_10.js`).
    pub fn load_dir(dir: impl AsRef<Path>, pattern: &str) -> Result<Self, IndexError> {
        let dir = dir.as_ref();
        let files = partition_files(dir, pattern)?;
        if files.is_empty() {
            return Err(IndexError::NoFiles {
                dir: dir.to_path_buf(),
                pattern: pattern.to_string(),
            });
        }

        let mut table = SearchTable::new();
        for path in &files {
            let partition = read_table(path)?;
            debug!(path = %path.display(), entries = partition.len(), "loaded partition");
            for entry in partition.entries().iter().cloned() {
                table.insert(entry).map_err(|e| match e {
                    TableError::DuplicateKey(key) => IndexError::DuplicateKey {
                        key,
                        path: path.clone(),
                    },
                    other => IndexError::Table {
                        path: path.clone(),
                        source: other,
                    },
                })?;
            }
        }

        let issues = table.validate();
        if !issues.is_empty() {
            warn!(count = issues.len(), dir = %dir.display(), "search index has structural issues");
        }

        Ok(Self {
            dir: dir.to_path_buf(),
            files,
            table,
        })
    }

    /// Load a directory, or a single file when `path` is not a directory
    pub fn load(path: impl AsRef<Path>, pattern: &str) -> Result<Self, IndexError> {
        let path = path.as_ref();
        if path.is_dir() {
            Self::load_dir(path, pattern)
        } else {
            Self::load_file(path)
        }
    }

    /// Number of distinct pages referenced by the index
    pub fn page_count(&self) -> usize {
        let mut pages: Vec<&str> = self
            .table
            .entries()
            .iter()
            .flat_map(|e| e.targets.iter().map(|t| t.path.as_str()))
            .collect();
        pages.sort_unstable();
        pages.dedup();
        pages.len()
    }
}

fn read_table(path: &Path) -> Result<SearchTable, IndexError> {
    let source = std::fs::read_to_string(path).map_err(|source| IndexError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Parser::parse_table(&source).map_err(|source| IndexError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Files in `dir` matching `pattern`, in natural order
fn partition_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, IndexError> {
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let full = Path::new(&escaped).join(pattern);
    let full = full.to_string_lossy();
    let paths = glob::glob(&full).map_err(|source| IndexError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files: Vec<PathBuf> = paths.filter_map(Result::ok).filter(|p| p.is_file()).collect();
    files.sort_by_key(|p| natural_key(p));
    Ok(files)
}

/// Sort key splitting a file stem into its text and trailing number
fn natural_key(path: &Path) -> (String, u64, String) {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let digits = stem.len() - stem.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    let (text, number) = stem.split_at(stem.len() - digits);
    (
        text.to_string(),
        number.parse().unwrap_or(0),
        path.to_string_lossy().into_owned(),
    )
}
