//! The `check` command.

use super::{
    helpers::{calculate_exit_code, create_output_options},
    types::{CheckParams, CheckResult}
};
use crate::{
    checks::Linter,
    config::Config,
    corpus::Corpus,
    error::AppResult,
    output::{format_report, format_summary}
};

/// Lints a corpus and formats the report.
///
/// 1. **Load**: Walks the root and reads every Markdown and SQL file
/// 2. **Lint**: Runs all enabled checks in parallel
/// 3. **Format**: Renders the report and the summary line
///
/// # Errors
///
/// Returns an error if a file or directory cannot be read, or the root is
/// neither a directory nor a Markdown/SQL file. Findings are never errors.
///
/// # Example
///
/// ```no_run
/// use std::path::PathBuf;
///
/// use sql_doc_lint::{
///     app::{CheckParams, run_check},
///     cli::Format,
///     config::Config
/// };
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let params = CheckParams {
///     root:          PathBuf::from("docs"),
///     strict:        false,
///     output_format: Format::Text,
///     verbose:       false,
///     no_color:      true
/// };
/// let result = run_check(params, Config::default())?;
/// println!("{}", result.output);
/// # Ok(())
/// # }
/// ```
pub fn run_check(params: CheckParams, config: Config) -> AppResult<CheckResult> {
    let corpus = Corpus::load(&params.root, &config.corpus)?;
    let linter = Linter::with_config(&config);
    let report = linter.lint(&corpus);
    let output_opts = create_output_options(params.output_format, params.no_color, params.verbose);
    Ok(CheckResult {
        exit_code: calculate_exit_code(&report, params.strict),
        output:    format_report(&report, &output_opts),
        summary:   format_summary(&report, &output_opts)
    })
}
