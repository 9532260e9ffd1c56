//! Conversions from CLI-facing types to internal types.

use crate::{cli::Format, output::OutputFormat};

/// Converts a CLI format to the internal output format.
///
/// # Example
///
/// ```
/// use sql_doc_lint::{app::convert_format, cli::Format, output::OutputFormat};
///
/// assert_eq!(convert_format(Format::Sarif), OutputFormat::Sarif);
/// ```
pub fn convert_format(format: Format) -> OutputFormat {
    match format {
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
        Format::Yaml => OutputFormat::Yaml,
        Format::Sarif => OutputFormat::Sarif
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_format_text() {
        assert_eq!(convert_format(Format::Text), OutputFormat::Text);
    }

    #[test]
    fn test_convert_format_json() {
        assert_eq!(convert_format(Format::Json), OutputFormat::Json);
    }

    #[test]
    fn test_convert_format_yaml() {
        assert_eq!(convert_format(Format::Yaml), OutputFormat::Yaml);
    }

    #[test]
    fn test_convert_format_sarif() {
        assert_eq!(convert_format(Format::Sarif), OutputFormat::Sarif);
    }
}
