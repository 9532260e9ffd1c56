//! Lint engine for SQL documentation corpora.
//!
//! The [`Linter`] runs every check over a [`Corpus`] and aggregates the
//! results into a [`Report`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────────┐     ┌──────────────────┐
//! │  Documents  │────▶│  analyze (parallel)  │────▶│  resolve links   │
//! └─────────────┘     │  fragments, anchors  │     │    (parallel)    │
//!                     └──────────────────────┘     └────────┬─────────┘
//!                                                           ▼
//!                                                    ┌─────────────┐
//!                                                    │   Report    │
//!                                                    └─────────────┘
//! ```
//!
//! Per document, in source order:
//!
//! 1. [`extract`](crate::extract) yields SQL fragments; an unclosed fence
//!    stops the document with a `DOC001` finding
//! 2. [`template`] validates `{{ }}` / `[[ ]]` markers of each fragment
//! 3. [`shape`] checks the neutralized SQL of fragments with valid markers
//! 4. [`links`] collects anchors and link targets of Markdown documents
//!
//! Links are then resolved against the anchors of every document. Findings
//! are ordered by document, line and column, so the report does not depend
//! on scheduling.
//!
//! # Check Categories
//!
//! - **Structure** (`DOC001`) - Unterminated code fences
//! - **Template** (`TPL001`-`TPL005`) - Marker pairing and nesting
//! - **Shape** (`SQL001`-`SQL004`) - Parentheses, quotes, leading keyword
//! - **Link** (`LINK001`-`LINK003`) - Anchors and link targets
//!
//! # Configuration
//!
//! ```toml
//! [checks]
//! disabled = ["SQL003"]
//!
//! [checks.severity]
//! SQL001 = "error"
//! ```
//!
//! # Example
//!
//! ```
//! use sql_doc_lint::{
//!     checks::Linter,
//!     corpus::{Corpus, Document, DocumentKind}
//! };
//!
//! let doc = Document::new(
//!     "docs/filters.md",
//!     DocumentKind::Markdown,
//!     "# Filters\n\n```sql\nSELECT * FROM products WHERE category = {{category}}\n```\n"
//! );
//! let corpus = Corpus::from_documents("docs", vec![doc]);
//! let report = Linter::new().lint(&corpus);
//!
//! assert!(report.findings.is_empty());
//! assert_eq!(report.fragments_count, 1);
//! ```

pub mod catalog;
pub mod links;
pub mod shape;
pub mod slug;
pub mod template;
mod types;

use std::{
    collections::{HashMap, HashSet},
    ops::Range,
    path::{Path, PathBuf}
};

use compact_str::CompactString;
use rayon::prelude::*;
use tracing::{debug, warn};
pub use types::{CheckCategory, CheckInfo, Finding, Issue, Report, Severity};

use self::{
    catalog::{BROKEN_ANCHOR, MALFORMED_DOCUMENT, MISSING_TARGET},
    links::{AnchorSet, Link, LinkTarget}
};
use crate::{
    config::Config,
    corpus::{Corpus, Document, DocumentKind, normalize_path},
    extract::Fragment
};

/// Per-document results of the first pass
#[derive(Debug, Default)]
struct DocumentAnalysis {
    issues:    Vec<Issue>,
    /// `None` when the document is malformed and its anchors are unknown
    anchors:   Option<AnchorSet>,
    links:     Vec<Link>,
    fragments: usize
}

/// Corpus-wide lint engine.
///
/// Holds the effective configuration: enabled checks, severity overrides,
/// SQL fence languages and allowed leading keywords.
pub struct Linter {
    disabled:         HashSet<&'static str>,
    severity_cache:   HashMap<&'static str, Severity>,
    languages:        Vec<CompactString>,
    leading_keywords: Vec<CompactString>
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}

impl Linter {
    /// Create a linter with the default configuration
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Create a linter from configuration
    ///
    /// # Notes
    ///
    /// - Unknown check IDs and severity names are logged and ignored
    pub fn with_config(config: &Config) -> Self {
        let mut disabled = HashSet::new();
        for id in &config.checks.disabled {
            match catalog::lookup(id) {
                Some(check) => {
                    disabled.insert(check.id);
                }
                None => warn!(check = %id, "unknown check id in `disabled`")
            }
        }
        let mut severity_cache = HashMap::new();
        for (id, severity) in &config.checks.severity {
            let Some(check) = catalog::lookup(id) else {
                warn!(check = %id, "unknown check id in severity overrides");
                continue;
            };
            match Severity::parse(severity) {
                Some(sev) => {
                    severity_cache.insert(check.id, sev);
                }
                None => warn!(check = %id, severity = %severity, "unknown severity")
            }
        }
        Self {
            disabled,
            severity_cache,
            languages: config.markdown.languages.clone(),
            leading_keywords: config.sql.leading_keywords.clone()
        }
    }

    /// Lint every document of the corpus
    pub fn lint(&self, corpus: &Corpus) -> Report {
        let documents = corpus.documents();
        let analyses: Vec<DocumentAnalysis> = documents
            .par_iter()
            .map(|doc| self.analyze_document(doc))
            .collect();

        let index: HashMap<PathBuf, Option<&AnchorSet>> = documents
            .iter()
            .zip(&analyses)
            .map(|(doc, analysis)| (normalize_path(doc.path()), analysis.anchors.as_ref()))
            .collect();
        let link_issues: Vec<Vec<Issue>> = documents
            .par_iter()
            .zip(analyses.par_iter())
            .map(|(doc, analysis)| {
                analysis
                    .links
                    .iter()
                    .filter_map(|link| self.resolve_link(corpus, &index, doc, link))
                    .collect()
            })
            .collect();

        let mut report = Report::new(documents.len());
        let mut located = Vec::new();
        for (doc_index, ((doc, analysis), links)) in documents
            .iter()
            .zip(analyses)
            .zip(link_issues)
            .enumerate()
        {
            report.fragments_count += analysis.fragments;
            report.links_count += analysis.links.len();
            for issue in analysis.issues.into_iter().chain(links) {
                if let Some(finding) = self.locate(doc, issue) {
                    located.push((doc_index, finding));
                }
            }
        }
        located.sort_by(|(a, fa), (b, fb)| {
            a.cmp(b)
                .then_with(|| fa.line.cmp(&fb.line))
                .then_with(|| fa.column.cmp(&fb.column))
        });
        for (_, finding) in located {
            report.add_finding(finding);
        }
        report
    }

    /// Template and shape checks of one fragment.
    ///
    /// Offsets of the returned issues are relative to the owning document.
    pub fn check_fragment(&self, fragment: &Fragment<'_>) -> Vec<Issue> {
        let markers = match template::validate(fragment.text) {
            Ok(markers) => markers,
            Err(err) => return vec![err.to_issue().shifted(fragment.offset)]
        };
        let mut issues = template::lint_markers(fragment.text, &markers);
        let neutral = template::neutralize(fragment.text, &markers);
        let opaque: Vec<Range<usize>> = markers
            .iter()
            .filter(|m| m.kind == template::MarkerKind::Variable)
            .map(|m| m.span.clone())
            .collect();
        issues.extend(shape::check(&neutral, &self.leading_keywords, &opaque));
        issues
            .into_iter()
            .map(|issue| issue.shifted(fragment.offset))
            .collect()
    }

    fn analyze_document(&self, doc: &Document) -> DocumentAnalysis {
        let mut analysis = DocumentAnalysis::default();
        for fragment in doc.fragments(&self.languages) {
            match fragment {
                Ok(fragment) => {
                    analysis.fragments += 1;
                    analysis.issues.extend(self.check_fragment(&fragment));
                }
                Err(malformed) => {
                    debug!(path = %doc.path().display(), line = malformed.line, "malformed document");
                    analysis.issues.push(
                        Issue::new(&MALFORMED_DOCUMENT, malformed.to_string(), malformed.offset)
                            .with_suggestion(format!("Close the block with `{}`", malformed.fence))
                    );
                    return analysis;
                }
            }
        }
        match doc.kind() {
            DocumentKind::Markdown => {
                let scan = links::scan(doc.text());
                analysis.issues.extend(scan.issues);
                analysis.links = scan.links;
                analysis.anchors = Some(scan.anchors);
            }
            DocumentKind::Sql => analysis.anchors = Some(AnchorSet::default())
        }
        analysis
    }

    fn resolve_link(
        &self,
        corpus: &Corpus,
        index: &HashMap<PathBuf, Option<&AnchorSet>>,
        doc: &Document,
        link: &Link
    ) -> Option<Issue> {
        let LinkTarget::Local {
            path,
            fragment
        } = links::parse_target(&link.target)
        else {
            return None;
        };
        let (target_path, shown) = match &path {
            None => (normalize_path(doc.path()), doc.path().display().to_string()),
            Some(rel) => {
                let base = match rel.strip_prefix('/') {
                    Some(from_root) => corpus.link_base().join(from_root),
                    None => doc.path().parent().unwrap_or(Path::new("")).join(rel)
                };
                (normalize_path(&base), rel.clone())
            }
        };

        let anchors = match index.get(&target_path) {
            Some(Some(anchors)) => *anchors,
            Some(None) => {
                debug!(target = %shown, "target document is malformed, anchor not checked");
                return None;
            }
            None => {
                if !target_path.exists() {
                    return Some(
                        Issue::new(
                            &MISSING_TARGET,
                            format!("link target `{}` does not exist", shown),
                            link.offset
                        )
                        .with_suggestion(format!(
                            "Resolved to `{}`",
                            target_path.display()
                        ))
                    );
                }
                if fragment.is_some() {
                    debug!(target = %shown, "target outside corpus, anchor not checked");
                }
                return None;
            }
        };

        let fragment = fragment?;
        if anchors.contains_key(fragment.as_str()) {
            return None;
        }
        let mut issue = Issue::new(
            &BROKEN_ANCHOR,
            format!("anchor `#{}` not found in `{}`", fragment, shown),
            link.offset
        );
        let normalized = slug::slugify(&fragment);
        if normalized != fragment.as_str() && anchors.contains_key(normalized.as_str()) {
            issue = issue.with_suggestion(format!("Did you mean `#{}`?", normalized));
        }
        Some(issue)
    }

    /// Apply configuration and resolve the issue to a line and column
    fn locate(&self, doc: &Document, issue: Issue) -> Option<Finding> {
        let check = issue.check;
        if self.disabled.contains(check.id) {
            return None;
        }
        let severity = self
            .severity_cache
            .get(check.id)
            .copied()
            .unwrap_or(check.severity);
        let location = doc.location(issue.offset);
        Some(Finding {
            check_id: check.id,
            check_name: check.name,
            severity,
            category: check.category,
            message: issue.message,
            suggestion: issue.suggestion,
            path: doc.path().to_path_buf(),
            line: location.line,
            column: location.column,
            offset: issue.offset
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChecksConfig;

    fn markdown(path: &str, text: &str) -> Document {
        Document::new(path, DocumentKind::Markdown, text)
    }

    #[test]
    fn test_check_fragment_offsets_are_document_relative() {
        let doc = markdown("a.md", "# T\n\n```sql\nSELECT (1\n```\n");
        let linter = Linter::new();
        let fragment = doc.fragments(&linter.languages).next().unwrap().unwrap();
        let issues = linter.check_fragment(&fragment);
        assert_eq!(issues.len(), 1);
        assert_eq!(&doc.text()[issues[0].offset..issues[0].offset + 1], "(");
    }

    #[test]
    fn test_marker_error_skips_shape_checks() {
        let doc = markdown("a.md", "```sql\nUPDATE t SET a = {{a\n```\n");
        let linter = Linter::new();
        let fragment = doc.fragments(&linter.languages).next().unwrap().unwrap();
        let ids: Vec<_> = linter
            .check_fragment(&fragment)
            .iter()
            .map(|i| i.check.id)
            .collect();
        assert_eq!(ids, vec!["TPL002"]);
    }

    #[test]
    fn test_malformed_document_has_no_anchors() {
        let doc = markdown("a.md", "# T\n```sql\nSELECT 1\n");
        let analysis = Linter::new().analyze_document(&doc);
        assert!(analysis.anchors.is_none());
        assert_eq!(analysis.issues.len(), 1);
        assert_eq!(analysis.issues[0].check.id, "DOC001");
    }

    #[test]
    fn test_unknown_config_entries_ignored() {
        let mut severity = HashMap::new();
        severity.insert("NOPE001".to_string(), "error".to_string());
        severity.insert("SQL001".to_string(), "fatal".to_string());
        let config = Config {
            checks: ChecksConfig {
                disabled: vec!["bogus".to_string(), "sql003".to_string()],
                severity
            },
            ..Default::default()
        };
        let linter = Linter::with_config(&config);
        assert!(linter.severity_cache.is_empty());
        assert_eq!(linter.disabled.len(), 1);
        assert!(linter.disabled.contains("SQL003"));
    }
}
