//! `doxsearch.toml` configuration parsing and validation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::index::DEFAULT_PATTERN;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "doxsearch.toml";

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for '{0}': {1}")]
    Invalid(&'static str, &'static str),
}

/// The complete configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where the search tables live.
    #[serde(default)]
    pub index: IndexConfig,

    /// Lookup behaviour.
    #[serde(default)]
    pub search: SearchConfig,
}

/// `[index]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    /// Search directory of a Doxygen HTML build, or a single table file.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// Glob selecting the partition files inside `dir`.
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

/// `[search]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Maximum number of results printed by a lookup.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_dir() -> PathBuf {
    PathBuf::from("doc/html/search")
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

fn default_limit() -> usize {
    20
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            pattern: default_pattern(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load an explicit config file, or `doxsearch.toml` in `cwd` if present,
    /// or fall back to defaults.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }
        let candidate = cwd.join(CONFIG_FILE);
        if candidate.is_file() {
            Self::from_path(candidate)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.index.pattern.trim().is_empty() {
            return Err(ConfigError::Invalid("index.pattern", "pattern cannot be empty"));
        }
        if self.search.limit == 0 {
            return Err(ConfigError::Invalid("search.limit", "limit must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.index.dir, PathBuf::from("doc/html/search"));
        assert_eq!(config.index.pattern, "all_*.js");
        assert_eq!(config.search.limit, 20);
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[index]
dir = "build/html/search"
pattern = "variables_*.js"

[search]
limit = 5
"#;
        let config = Config::parse(toml).unwrap();
        assert_eq!(config.index.dir, PathBuf::from("build/html/search"));
        assert_eq!(config.index.pattern, "variables_*.js");
        assert_eq!(config.search.limit, 5);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Config::parse("[search]\nfuzzy = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn zero_limit_is_invalid() {
        let err = Config::parse("[search]\nlimit = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("search.limit", _)));
    }

    #[test]
    fn discover_prefers_explicit_then_cwd() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::discover(None, dir.path()).unwrap(), Config::default());

        std::fs::write(dir.path().join(CONFIG_FILE), "[search]\nlimit = 3\n").unwrap();
        assert_eq!(Config::discover(None, dir.path()).unwrap().search.limit, 3);

        let explicit = dir.path().join("other.toml");
        std::fs::write(&explicit, "[search]\nlimit = 7\n").unwrap();
        assert_eq!(
            Config::discover(Some(&explicit), dir.path()).unwrap().search.limit,
            7
        );
    }
}
