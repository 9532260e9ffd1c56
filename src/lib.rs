//! # SQL Doc Lint
//!
//! Linter for documentation corpora that embed SQL examples.
//!
//! `sql-doc-lint` walks a tree of Markdown and SQL files and checks that:
//!
//! - fenced SQL blocks are closed
//! - `{{variable}}` and `[[optional clause]]` template markers are balanced
//!   and correctly nested
//! - each SQL example has a plausible shape (balanced parentheses and
//!   quotes, an expected leading keyword)
//! - internal links point to files and headings that exist
//!
//! # Quick Start
//!
//! ```bash
//! # Lint a documentation tree
//! sql-doc-lint check docs/
//!
//! # Fail on warnings too, report as SARIF for code scanning
//! sql-doc-lint check docs/ --strict -f sarif > results.sarif
//!
//! # Which anchors does a page define?
//! sql-doc-lint anchors docs/questions/filters.md
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded from (later sources replace earlier ones):
//!
//! 1. `~/.config/sql-doc-lint/config.toml`
//! 2. `.sql-doc-lint.toml` in current directory
//! 3. `--config` / `SQL_DOC_LINT_CONFIG`
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
//!
//! # Checks
//!
//! | ID | Severity | Description |
//! |----|----------|-------------|
//! | DOC001 | error | Code fence never closed |
//! | TPL001 | error | Closing marker without opening marker |
//! | TPL002 | error | Opening marker never closed |
//! | TPL003 | error | Markers close out of order or nest illegally |
//! | TPL004 | warning | `{{ }}` with no variable name |
//! | TPL005 | info | `[[ ]]` clause without a variable |
//! | SQL001 | warning | Unbalanced parentheses |
//! | SQL002 | warning | Unterminated quote or block comment |
//! | SQL003 | warning | Unexpected leading keyword |
//! | SQL004 | info | SQL block with no statement |
//! | LINK001 | error | Anchor not found in target |
//! | LINK002 | error | Link target file missing |
//! | LINK003 | warning | Duplicate explicit anchor |
//!
//! # Exit Codes
//!
//! - `0` - No errors (warnings allowed unless `--strict`)
//! - `1` - Errors found, or warnings under `--strict`
//! - `2` - Fatal error (unreadable file, invalid configuration)
//!
//! # Modules
//!
//! - [`corpus`] - Document discovery and line/column mapping
//! - [`extract`] - SQL fragment extraction from Markdown and SQL files
//! - [`checks`] - Template, shape and link checks, and the lint engine
//! - [`config`] - Configuration loading
//! - [`output`] - Report formatting (text, JSON, YAML, SARIF)
//! - [`app`] - Command implementations used by the binary
//! - [`error`] - Error types and constructors

pub mod app;
pub mod checks;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod extract;
pub mod output;
