// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use sql_doc_lint::{
    checks::{Linter, Report, Severity},
    config::{ChecksConfig, Config},
    corpus::{Corpus, Document, DocumentKind}
};

fn md(path: &str, text: &str) -> Document {
    Document::new(path, DocumentKind::Markdown, text)
}

fn lint(docs: Vec<Document>) -> Report {
    Linter::new().lint(&Corpus::from_documents("virtual-docs", docs))
}

fn ids(report: &Report) -> Vec<&'static str> {
    report.findings.iter().map(|f| f.check_id).collect()
}

#[test]
fn test_paired_variable_is_clean() {
    let report = lint(vec![md(
        "virtual-docs/filters.md",
        "# Filters\n\n```sql\nSELECT * FROM products WHERE category = {{category}}\n```\n"
    )]);
    assert!(report.findings.is_empty());
    assert_eq!(report.documents_count, 1);
    assert_eq!(report.fragments_count, 1);
}

#[test]
fn test_optional_clause_with_variable_is_clean() {
    let report = lint(vec![md(
        "virtual-docs/filters.md",
        "```sql\nSELECT * FROM products WHERE 1 = 1\n[[AND price > {{min_price}}]]\n```\n"
    )]);
    assert!(report.findings.is_empty(), "{:?}", report.findings);
}

#[test]
fn test_unclosed_optional_clause_reported_at_opening_line() {
    let report = lint(vec![md(
        "virtual-docs/filters.md",
        "# Filters\n\n```sql\nSELECT * FROM products\n[[WHERE category = {{category}}\n```\n"
    )]);
    assert_eq!(ids(&report), vec!["TPL002"]);
    let finding = &report.findings[0];
    assert_eq!(finding.severity, Severity::Error);
    assert_eq!(finding.line, 5);
    assert_eq!(finding.column, 1);
    assert!(report.is_failure(false));
}

#[test]
fn test_unclosed_variable_is_exactly_one_finding() {
    let report = lint(vec![md(
        "virtual-docs/a.md",
        "```sql\nSELECT * FROM t WHERE a = {{a AND (b\n```\n"
    )]);
    assert_eq!(ids(&report), vec!["TPL002"]);
}

#[test]
fn test_stray_closing_marker() {
    let report = lint(vec![md("virtual-docs/a.md", "```sql\nSELECT a}} FROM t\n```\n")]);
    assert_eq!(ids(&report), vec!["TPL001"]);
    assert_eq!(report.findings[0].column, 9);
}

#[test]
fn test_nested_optional_clause() {
    let report = lint(vec![md(
        "virtual-docs/a.md",
        "```sql\nSELECT 1 [[AND a [[AND {{b}}]]]]\n```\n"
    )]);
    assert_eq!(ids(&report), vec!["TPL003"]);
}

#[test]
fn test_advisory_marker_findings() {
    let report = lint(vec![md(
        "virtual-docs/a.md",
        "```sql\nSELECT {{ }} FROM t [[WHERE active]]\n```\n"
    )]);
    assert_eq!(ids(&report), vec!["TPL004", "TPL005"]);
    assert_eq!(report.findings[0].severity, Severity::Warning);
    assert_eq!(report.findings[1].severity, Severity::Info);
    assert!(!report.is_failure(false));
}

#[test]
fn test_markers_do_not_count_as_sql_punctuation() {
    let report = lint(vec![md(
        "virtual-docs/a.md",
        "```sql\nSELECT * FROM t WHERE name = {{name}} [[AND note = {{note}}]]\n```\n"
    )]);
    assert!(report.findings.is_empty());
}

#[test]
fn test_shape_findings_positioned_in_document() {
    let report = lint(vec![md(
        "virtual-docs/a.md",
        "# Orders\n\n```sql\nSELECT count(*\nFROM orders\nWHERE note = 'open\n```\n"
    )]);
    assert_eq!(ids(&report), vec!["SQL001", "SQL002"]);
    assert_eq!((report.findings[0].line, report.findings[0].column), (4, 13));
    assert_eq!((report.findings[1].line, report.findings[1].column), (6, 14));
}

#[test]
fn test_leading_keyword_checked_only_for_sql_fences() {
    let report = lint(vec![md(
        "virtual-docs/a.md",
        "```sql\nUPDATE t SET a = 1\n```\n\n```python\nUPDATE = 1\n```\n"
    )]);
    assert_eq!(ids(&report), vec!["SQL003"]);
    assert_eq!(report.fragments_count, 1);
}

#[test]
fn test_leading_variable_is_not_judged() {
    let report = lint(vec![md(
        "virtual-docs/a.md",
        "```sql\n{{snippet: top_customers}} LIMIT 10\n```\n"
    )]);
    assert!(report.findings.is_empty());
}

#[test]
fn test_empty_block_is_info() {
    let report = lint(vec![md("virtual-docs/a.md", "```sql\n```\n")]);
    assert_eq!(ids(&report), vec!["SQL004"]);
    assert!(!report.is_failure(true));
}

#[test]
fn test_broken_self_anchor() {
    let report = lint(vec![md(
        "virtual-docs/a.md",
        "# Intro\n\n[see](#nonexistent-heading)\n"
    )]);
    assert_eq!(ids(&report), vec!["LINK001"]);
    assert_eq!(report.findings[0].severity, Severity::Error);
    assert_eq!(report.findings[0].line, 3);
    assert_eq!(report.links_count, 1);
}

#[test]
fn test_self_anchor_to_heading_is_clean() {
    let report = lint(vec![md(
        "virtual-docs/a.md",
        "# Intro\n\nSee [below](#field-filters).\n\n## Field Filters\n"
    )]);
    assert!(report.findings.is_empty());
}

#[test]
fn test_unclosed_fence_does_not_stop_next_document() {
    let report = lint(vec![
        md("virtual-docs/a.md", "# A\n\n```sql\nSELECT 1\n"),
        md("virtual-docs/b.md", "```sql\nSELECT (1\n```\n"),
    ]);
    assert_eq!(ids(&report), vec!["DOC001", "SQL001"]);
    assert_eq!(report.findings[0].line, 3);
    assert!(report.findings[0].suggestion.is_some());
}

#[test]
fn test_malformed_document_keeps_earlier_fragment_findings() {
    let report = lint(vec![md(
        "virtual-docs/a.md",
        "```sql\nSELECT {{x\n```\n\n[x](#nowhere)\n\n```sql\nSELECT 1\n"
    )]);
    assert_eq!(ids(&report), vec!["TPL002", "DOC001"]);
}

#[test]
fn test_links_into_malformed_document_not_verified() {
    let report = lint(vec![
        md("virtual-docs/a.md", "[x](bad.md#anything)\n"),
        md("virtual-docs/bad.md", "# Bad\n```sql\n"),
    ]);
    assert_eq!(ids(&report), vec!["DOC001"]);
}

#[test]
fn test_cross_document_links() {
    let report = lint(vec![
        md(
            "virtual-docs/a.md",
            "[ok](b.md#setup)\n[case](b.md#Setup)\n[gone](c.md)\n[web](https://example.com/x.md#y)\n"
        ),
        md("virtual-docs/b.md", "# Guide\n\n## Setup\n"),
    ]);
    assert_eq!(ids(&report), vec!["LINK001", "LINK002"]);
    assert_eq!(report.findings[0].line, 2);
    assert_eq!(
        report.findings[0].suggestion.as_deref(),
        Some("Did you mean `#setup`?")
    );
    assert_eq!(report.findings[1].line, 3);
    assert_eq!(report.links_count, 4);
}

#[test]
fn test_relative_links_resolve_from_document_directory() {
    let report = lint(vec![
        md("virtual-docs/guide/a.md", "[up](../ref/b.md#joins)\n"),
        md("virtual-docs/ref/b.md", "Joins\n=====\n"),
    ]);
    assert!(report.findings.is_empty(), "{:?}", report.findings);
}

#[test]
fn test_duplicate_heading_slugs_are_suffixed() {
    let report = lint(vec![md(
        "virtual-docs/a.md",
        "## Example\n\n## Example\n\n[second](#example-1)\n"
    )]);
    assert!(report.findings.is_empty());
}

#[test]
fn test_duplicate_html_anchor() {
    let report = lint(vec![md(
        "virtual-docs/a.md",
        "# Setup\n\n<a name=\"setup\"></a>\n"
    )]);
    assert_eq!(ids(&report), vec!["LINK003"]);
    assert_eq!(report.findings[0].severity, Severity::Warning);
}

#[test]
fn test_sql_document_is_one_fragment() {
    let report = lint(vec![Document::new(
        "virtual-docs/q.sql",
        DocumentKind::Sql,
        "-- delete old rows\nDELETE FROM t WHERE id = {{id}}\n"
    )]);
    assert_eq!(ids(&report), vec!["SQL003"]);
    assert_eq!(report.findings[0].line, 2);
}

#[test]
fn test_findings_ordered_by_document_line_column() {
    let report = lint(vec![
        md(
            "virtual-docs/a.md",
            "[x](#nope)\n\n```sql\nSELECT (1\n```\n\n```sql\nSELECT {{\n```\n"
        ),
        md("virtual-docs/b.md", "```sql\nSELECT 'x\n```\n"),
    ]);
    assert_eq!(ids(&report), vec!["LINK001", "SQL001", "TPL002", "SQL002"]);
    let lines: Vec<_> = report.findings.iter().map(|f| f.line).collect();
    assert_eq!(lines, vec![1, 4, 8, 2]);
}

#[test]
fn test_runs_are_idempotent() {
    let docs = || {
        vec![
            md("virtual-docs/a.md", "# A\n[b](b.md#missing)\n```sql\nUPDATE t\n```\n"),
            md("virtual-docs/b.md", "# B\n```sql\nSELECT [[x\n```\n"),
            md("virtual-docs/c.md", "```sql\n"),
        ]
    };
    let first = lint(docs());
    let second = lint(docs());
    assert_eq!(first, second);
    assert!(!first.findings.is_empty());
}

#[test]
fn test_disabled_checks_and_severity_overrides() {
    let mut severity = HashMap::new();
    severity.insert("SQL001".to_string(), "error".to_string());
    severity.insert("link001".to_string(), "info".to_string());
    let config = Config {
        checks: ChecksConfig {
            disabled: vec!["SQL003".to_string()],
            severity
        },
        ..Default::default()
    };
    let corpus = Corpus::from_documents(
        "virtual-docs",
        vec![md(
            "virtual-docs/a.md",
            "[x](#nope)\n```sql\nUPDATE t SET a = (1\n```\n"
        )]
    );
    let report = Linter::with_config(&config).lint(&corpus);
    assert_eq!(ids(&report), vec!["LINK001", "SQL001"]);
    assert_eq!(report.findings[0].severity, Severity::Info);
    assert_eq!(report.findings[1].severity, Severity::Error);
}

#[test]
fn test_custom_fence_languages() {
    let config = Config::from_toml("[markdown]\nlanguages = [\"pgsql\"]\n").unwrap();
    let corpus = Corpus::from_documents(
        "virtual-docs",
        vec![md(
            "virtual-docs/a.md",
            "```sql\nSELECT (\n```\n```pgsql\nSELECT )\n```\n"
        )]
    );
    let report = Linter::with_config(&config).lint(&corpus);
    assert_eq!(report.fragments_count, 1);
    assert_eq!(ids(&report), vec!["SQL001"]);
    assert_eq!(report.findings[0].line, 5);
}

#[test]
fn test_footnotes_are_not_links() {
    let report = lint(vec![md(
        "virtual-docs/notes.md",
        "# Notes\n\nSee the note.[^1]\n\n[^1]: Metabase caches results.\n"
    )]);
    assert!(report.findings.is_empty(), "{:?}", report.findings);
    assert!(!report.is_failure(true));
}

#[test]
fn test_anchor_to_emphasized_heading() {
    let report = lint(vec![md(
        "virtual-docs/a.md",
        "## _Optional_ clauses\n\n[x](#optional-clauses)\n"
    )]);
    assert!(report.findings.is_empty(), "{:?}", report.findings);
}

#[test]
fn test_broken_anchor_behind_linked_badge() {
    let report = lint(vec![md("virtual-docs/a.md", "# A\n\n[![badge](#a)](#missing)\n")]);
    assert_eq!(ids(&report), vec!["LINK001"]);
    assert_eq!((report.findings[0].line, report.findings[0].column), (3, 16));
    assert_eq!(report.links_count, 2);
}

#[test]
fn test_commented_out_link_is_ignored() {
    let report = lint(vec![md(
        "virtual-docs/a.md",
        "# A\n\n<!-- [x](#later) -->\n"
    )]);
    assert!(report.findings.is_empty(), "{:?}", report.findings);
}

#[test]
fn test_heading_repeating_its_anchor_is_clean() {
    let report = lint(vec![md(
        "virtual-docs/a.md",
        "## Field filters <a id=\"field-filters\"></a>\n\n[x](#field-filters)\n"
    )]);
    assert!(report.findings.is_empty(), "{:?}", report.findings);
}

#[test]
fn test_byte_order_mark_in_sql_document() {
    let report = lint(vec![Document::new(
        "virtual-docs/q.sql",
        DocumentKind::Sql,
        "\u{feff}SELECT * FROM orders\n"
    )]);
    assert!(report.findings.is_empty(), "{:?}", report.findings);
}
