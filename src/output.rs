//! Report formatting.
//!
//! - `text` - One line per finding, `<path>:<line>: <severity>: <message> [<id>]`
//! - `json` / `yaml` - The report with summary counts
//! - `sarif` - SARIF 2.1.0 for code-scanning upload

use colored::Colorize;
use serde::Serialize;
use serde_json::{Value, json};

use crate::checks::{
    Finding, Report, Severity,
    catalog::ALL_CHECKS,
    links::{AnchorSet, AnchorSource}
};

const SARIF_SCHEMA: &str = "https://json.schemastore.org/sarif-2.1.0.json";

/// Output format for results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
    Sarif
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:  OutputFormat,
    pub colored: bool,
    pub verbose: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true,
            verbose: false
        }
    }
}

/// Summary counts of a report
#[derive(Debug, Serialize)]
pub struct Summary {
    pub documents: usize,
    pub fragments: usize,
    pub links:     usize,
    pub errors:    usize,
    pub warnings:  usize,
    pub infos:     usize
}

impl From<&Report> for Summary {
    fn from(report: &Report) -> Self {
        Self {
            documents: report.documents_count,
            fragments: report.fragments_count,
            links:     report.links_count,
            errors:    report.error_count(),
            warnings:  report.warning_count(),
            infos:     report.info_count()
        }
    }
}

#[derive(Serialize)]
struct ReportOutput<'a> {
    summary:  Summary,
    findings: &'a [Finding]
}

/// Format the findings of a report
pub fn format_report(report: &Report, opts: &OutputOptions) -> String {
    let output = ReportOutput {
        summary:  Summary::from(report),
        findings: &report.findings
    };
    match opts.format {
        OutputFormat::Json => to_json(&output),
        OutputFormat::Yaml => serde_yaml::to_string(&output).unwrap_or_default(),
        OutputFormat::Sarif => to_json(&to_sarif(report)),
        OutputFormat::Text => format_text(report, opts)
    }
}

/// One-line summary for standard error
pub fn format_summary(report: &Report, opts: &OutputOptions) -> String {
    let s = Summary::from(report);
    let line = format!(
        "{} documents, {} SQL blocks, {} links checked: {} errors, {} warnings, {} infos",
        s.documents, s.fragments, s.links, s.errors, s.warnings, s.infos
    );
    if !opts.colored {
        return line;
    }
    if s.errors > 0 {
        line.red().bold().to_string()
    } else if s.warnings > 0 {
        line.yellow().to_string()
    } else {
        line.green().to_string()
    }
}

/// Pretty JSON terminated by a newline
fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    let mut out = serde_json::to_string_pretty(value).unwrap_or_default();
    out.push('\n');
    out
}

fn format_text(report: &Report, opts: &OutputOptions) -> String {
    let mut output = String::new();
    for finding in &report.findings {
        let severity = severity_label(finding.severity, opts.colored);
        output.push_str(&format!(
            "{}:{}: {}: {} [{}]\n",
            finding.path.display(),
            finding.line,
            severity,
            finding.message,
            finding.check_id
        ));
        if opts.verbose
            && let Some(suggestion) = &finding.suggestion
        {
            let help = if opts.colored {
                "help".cyan().bold().to_string()
            } else {
                String::from("help")
            };
            output.push_str(&format!("    {}: {}\n", help, suggestion));
        }
    }
    output
}

fn severity_label(severity: Severity, colored: bool) -> String {
    let label = severity.to_string();
    if !colored {
        return label;
    }
    match severity {
        Severity::Error => label.red().bold().to_string(),
        Severity::Warning => label.yellow().to_string(),
        Severity::Info => label.blue().to_string()
    }
}

/// SARIF 2.1.0 log with the check catalog as rule metadata
pub fn to_sarif(report: &Report) -> Value {
    let rules: Vec<Value> = ALL_CHECKS
        .iter()
        .map(|check| {
            json!({
                "id": check.id,
                "name": check.name,
                "shortDescription": { "text": check.name },
                "fullDescription": { "text": check.description },
                "defaultConfiguration": { "level": check.severity.sarif_level() }
            })
        })
        .collect();
    let results: Vec<Value> = report
        .findings
        .iter()
        .map(|finding| {
            let rule_index = ALL_CHECKS
                .iter()
                .position(|check| check.id == finding.check_id);
            let mut result = json!({
                "ruleId": finding.check_id,
                "level": finding.severity.sarif_level(),
                "message": { "text": finding.message },
                "locations": [{
                    "physicalLocation": {
                        "artifactLocation": {
                            "uri": finding.path.to_string_lossy().replace('\\', "/")
                        },
                        "region": {
                            "startLine": finding.line,
                            "startColumn": finding.column
                        }
                    }
                }]
            });
            if let Some(index) = rule_index {
                result["ruleIndex"] = json!(index);
            }
            if let Some(suggestion) = &finding.suggestion {
                result["properties"] = json!({ "suggestion": suggestion });
            }
            result
        })
        .collect();
    json!({
        "$schema": SARIF_SCHEMA,
        "version": "2.1.0",
        "runs": [{
            "tool": {
                "driver": {
                    "name": env!("CARGO_PKG_NAME"),
                    "version": env!("CARGO_PKG_VERSION"),
                    "rules": rules
                }
            },
            "results": results
        }]
    })
}

/// Format the anchors of one document
pub fn format_anchors(anchors: &AnchorSet, json: bool) -> String {
    if json {
        let rows: Vec<_> = anchors.values().collect();
        return to_json(&rows);
    }
    let mut output = String::new();
    for anchor in anchors.values() {
        let source = match anchor.source {
            AnchorSource::Heading => "heading",
            AnchorSource::Html => "html"
        };
        output.push_str(&format!("{:>5}  #{}  ({})\n", anchor.line, anchor.slug, source));
    }
    output
}
