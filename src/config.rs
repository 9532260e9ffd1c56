//! Configuration loading and management.
//!
//! Configuration is loaded from the following sources, each one found
//! replacing the previous (highest precedence last):
//!
//! 1. Default values
//! 2. `~/.config/sql-doc-lint/config.toml`
//! 3. `.sql-doc-lint.toml` in current directory
//! 4. The file passed with `--config` (or `SQL_DOC_LINT_CONFIG`)
//!
//! No configuration file is required.
//!
//! # Configuration File Format
//!
//! ```toml
//! [checks]
//! disabled = ["SQL003"]
//!
//! [checks.severity]
//! SQL001 = "error"
//! LINK003 = "info"
//!
//! [markdown]
//! languages = ["sql", "postgresql"]
//!
//! [sql]
//! leading_keywords = ["SELECT", "WITH", "CREATE", "EXPLAIN"]
//!
//! [corpus]
//! exclude = ["node_modules", "target"]
//! ```

use std::{
    collections::HashMap,
    env,
    ffi::OsStr,
    fs,
    path::{Path, PathBuf}
};

use compact_str::CompactString;
use serde::Deserialize;

use crate::error::{AppResult, config_error};

/// Name of the per-project configuration file
pub const LOCAL_CONFIG_FILE: &str = ".sql-doc-lint.toml";

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub checks:   ChecksConfig,
    #[serde(default)]
    pub markdown: MarkdownConfig,
    #[serde(default)]
    pub sql:      SqlConfig,
    #[serde(default)]
    pub corpus:   CorpusConfig
}

/// Check selection and severity overrides
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ChecksConfig {
    /// Disabled check IDs
    #[serde(default)]
    pub disabled: Vec<String>,
    /// Severity overrides (check_id -> severity)
    #[serde(default)]
    pub severity: HashMap<String, String>
}

/// Markdown extraction settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Fence info-string languages treated as SQL
    pub languages: Vec<CompactString>
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            languages: ["sql", "postgresql", "postgres", "pgsql", "mysql", "sqlite", "tsql", "plsql"]
                .into_iter()
                .map(CompactString::from)
                .collect()
        }
    }
}

/// SQL shape check settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SqlConfig {
    /// Keywords a SQL block may start with
    pub leading_keywords: Vec<CompactString>
}

impl Default for SqlConfig {
    fn default() -> Self {
        Self {
            leading_keywords: ["SELECT", "WITH", "CREATE", "EXPLAIN"]
                .into_iter()
                .map(CompactString::from)
                .collect()
        }
    }
}

/// Corpus walking settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Directory or file names skipped while walking
    pub exclude:        Vec<String>,
    /// Walk into hidden (dot-prefixed) directories
    pub include_hidden: bool
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            exclude:        vec![String::from("node_modules"), String::from("target")],
            include_hidden: false
        }
    }
}

impl CorpusConfig {
    /// Whether a directory entry named `name` is skipped
    pub fn is_excluded(&self, name: &OsStr) -> bool {
        let name = name.to_string_lossy();
        if !self.include_hidden && name.starts_with('.') && name != "." && name != ".." {
            return true;
        }
        self.exclude.iter().any(|ex| *ex == name)
    }
}

impl Config {
    /// Load configuration from the standard locations, then `explicit`
    ///
    /// An explicit path must exist; the standard locations are optional.
    pub fn load(explicit: Option<&Path>) -> AppResult<Self> {
        let mut config = Self::default();

        // Try to load from home directory config
        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("sql-doc-lint")
                .join("config.toml");
            if home_config.exists() {
                config = Self::from_file(&home_config)?;
            }
        }

        // Current directory config overrides home config
        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            config = Self::from_file(&local_config)?;
        }

        if let Some(path) = explicit {
            config = Self::from_file(path)?;
        }

        Ok(config)
    }

    /// Read and parse one configuration file
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            config_error(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content).map_err(|e| {
            config_error(format!("Invalid config file '{}': {}", path.display(), e))
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
