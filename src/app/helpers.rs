//! Helper functions for CLI operations.
//!
//! Exit code calculation and output option construction, shared by the
//! commands and the binary.

use super::convert::convert_format;
use crate::{checks::Report, cli::Format, output::OutputOptions};

/// Calculates the process exit code of a finished run.
///
/// - `0` - No errors (and no warnings in strict mode)
/// - `1` - At least one error, or a warning in strict mode
///
/// Fatal errors never reach this point; the binary exits with `2` for them.
///
/// # Example
///
/// ```
/// use sql_doc_lint::{app::calculate_exit_code, checks::Report};
///
/// let report = Report::new(1);
/// assert_eq!(calculate_exit_code(&report, true), 0);
/// ```
pub fn calculate_exit_code(report: &Report, strict: bool) -> i32 {
    if report.is_failure(strict) { 1 } else { 0 }
}

/// Creates output options from CLI parameters
pub fn create_output_options(format: Format, no_color: bool, verbose: bool) -> OutputOptions {
    OutputOptions {
        format: convert_format(format),
        colored: !no_color,
        verbose
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::{
        checks::{CheckCategory, Finding, Severity},
        output::OutputFormat
    };

    fn finding(severity: Severity) -> Finding {
        Finding {
            check_id: "TEST",
            check_name: "Test",
            severity,
            category: CheckCategory::Shape,
            message: "Test".to_string(),
            suggestion: None,
            path: PathBuf::from("a.md"),
            line: 1,
            column: 1,
            offset: 0
        }
    }

    #[test]
    fn test_calculate_exit_code_no_findings() {
        let report = Report::new(1);
        assert_eq!(calculate_exit_code(&report, false), 0);
    }

    #[test]
    fn test_calculate_exit_code_info_only() {
        let mut report = Report::new(1);
        report.add_finding(finding(Severity::Info));
        assert_eq!(calculate_exit_code(&report, true), 0);
    }

    #[test]
    fn test_calculate_exit_code_warning() {
        let mut report = Report::new(1);
        report.add_finding(finding(Severity::Warning));
        assert_eq!(calculate_exit_code(&report, false), 0);
        assert_eq!(calculate_exit_code(&report, true), 1);
    }

    #[test]
    fn test_calculate_exit_code_error() {
        let mut report = Report::new(1);
        report.add_finding(finding(Severity::Warning));
        report.add_finding(finding(Severity::Error));
        assert_eq!(calculate_exit_code(&report, false), 1);
    }

    #[test]
    fn test_create_output_options_text_colored() {
        let opts = create_output_options(Format::Text, false, true);
        assert_eq!(opts.format, OutputFormat::Text);
        assert!(opts.colored);
        assert!(opts.verbose);
    }

    #[test]
    fn test_create_output_options_json_no_color() {
        let opts = create_output_options(Format::Json, true, false);
        assert_eq!(opts.format, OutputFormat::Json);
        assert!(!opts.colored);
    }
}
