//! Parameters and results of the CLI commands.

use std::path::PathBuf;

use crate::cli::Format;

/// Parameters for the check command.
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
///
/// use sql_doc_lint::{app::CheckParams, cli::Format};
///
/// let params = CheckParams {
///     root:          PathBuf::from("docs"),
///     strict:        false,
///     output_format: Format::Text,
///     verbose:       false,
///     no_color:      true
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CheckParams {
    /// Corpus root: a directory, Markdown file or SQL file.
    pub root:          PathBuf,
    /// Fail on warnings as well as errors.
    pub strict:        bool,
    /// Output format for the report.
    pub output_format: Format,
    /// Print fix suggestions under findings.
    pub verbose:       bool,
    /// Disable colored terminal output.
    pub no_color:      bool
}

/// Result of a check run.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// `0` when the run passes, `1` when it fails.
    pub exit_code: i32,
    /// Formatted report for standard output.
    pub output:    String,
    /// One-line summary for standard error.
    pub summary:   String
}
