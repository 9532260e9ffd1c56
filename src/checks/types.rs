//! Type definitions shared by every check.
//!
//! - [`Severity`] - Finding severity levels (Info, Warning, Error)
//! - [`CheckCategory`] - What part of a document a check looks at
//! - [`CheckInfo`] - Static metadata describing one check
//! - [`Issue`] - Raw result of a pass, positioned by byte offset
//! - [`Finding`] - Issue resolved to a path, line and column
//! - [`Report`] - Complete, ordered lint results

use std::path::PathBuf;

use serde::Serialize;

/// Severity level of a finding.
///
/// Ordered from lowest to highest severity for sorting purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational note, never affects the exit code
    Info,
    /// Probable mistake; fails the run only in strict mode
    Warning,
    /// Defect that fails the run
    Error
}

impl Severity {
    /// Parse a severity name as written in configuration files
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" | "warn" => Some(Self::Warning),
            "info" => Some(Self::Info),
            _ => None
        }
    }

    /// SARIF `level` for this severity
    pub fn sarif_level(&self) -> &'static str {
        match self {
            Self::Info => "note",
            Self::Warning => "warning",
            Self::Error => "error"
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error")
        }
    }
}

/// Category of a check for grouping and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckCategory {
    /// Document structure (code fences)
    Structure,
    /// `{{variable}}` and `[[optional clause]]` markers
    Template,
    /// Lightweight SQL shape checks
    Shape,
    /// Markdown links and anchors
    Link
}

impl std::fmt::Display for CheckCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Structure => write!(f, "Structure"),
            Self::Template => write!(f, "Template"),
            Self::Shape => write!(f, "Shape"),
            Self::Link => write!(f, "Link")
        }
    }
}

/// Metadata about a check for identification and configuration.
#[derive(Debug, Clone, Serialize)]
pub struct CheckInfo {
    /// Unique check identifier (e.g., "TPL002")
    pub id:          &'static str,
    /// Human-readable check name
    pub name:        &'static str,
    /// Default severity level
    pub severity:    Severity,
    /// Check category
    pub category:    CheckCategory,
    /// One-sentence description used in SARIF rule metadata
    pub description: &'static str
}

/// A problem found by one pass, positioned by byte offset in its document.
#[derive(Debug, Clone)]
pub struct Issue {
    pub check:      &'static CheckInfo,
    pub message:    String,
    pub offset:     usize,
    pub suggestion: Option<String>
}

impl Issue {
    pub fn new(check: &'static CheckInfo, message: impl Into<String>, offset: usize) -> Self {
        Self {
            check,
            message: message.into(),
            offset,
            suggestion: None
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Shift the offset from fragment-relative to document-relative
    pub fn shifted(mut self, base: usize) -> Self {
        self.offset += base;
        self
    }
}

/// A single finding located in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Check identifier (e.g., "LINK001")
    pub check_id:   &'static str,
    /// Human-readable check name
    pub check_name: &'static str,
    /// Effective severity after configuration overrides
    pub severity:   Severity,
    /// Category for grouping findings
    pub category:   CheckCategory,
    /// Detailed description of the problem
    pub message:    String,
    /// Optional hint for fixing the problem
    pub suggestion: Option<String>,
    /// Path of the document, as discovered under the corpus root
    pub path:       PathBuf,
    /// One-based line number
    pub line:       usize,
    /// One-based column, counted in characters
    pub column:     usize,
    /// Byte offset in the original document
    pub offset:     usize
}

/// Complete lint report.
///
/// Findings are ordered by document, then line, then column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// All findings, ordered
    pub findings:        Vec<Finding>,
    /// Number of documents examined
    pub documents_count: usize,
    /// Number of SQL fragments examined
    pub fragments_count: usize,
    /// Number of links examined
    pub links_count:     usize
}

impl Report {
    pub fn new(documents_count: usize) -> Self {
        Self {
            findings: Vec::new(),
            documents_count,
            fragments_count: 0,
            links_count: 0
        }
    }

    pub fn add_finding(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn info_count(&self) -> usize {
        self.count(Severity::Info)
    }

    /// Whether the run fails; strict mode also fails on warnings
    pub fn is_failure(&self, strict: bool) -> bool {
        self.error_count() > 0 || (strict && self.warning_count() > 0)
    }

    fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }
}
