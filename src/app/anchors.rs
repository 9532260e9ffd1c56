//! The `anchors` command.

use std::path::Path;

use crate::{
    checks::links,
    corpus::{Document, DocumentKind},
    error::{AppResult, corpus_error},
    output::format_anchors
};

/// Lists the anchors a Markdown document defines, in document order.
///
/// # Errors
///
/// Returns an error if the file is not Markdown or cannot be read.
pub fn run_anchors(path: &Path, json: bool) -> AppResult<String> {
    if DocumentKind::from_path(path) != Some(DocumentKind::Markdown) {
        return Err(corpus_error(format!(
            "'{}' is not a Markdown file",
            path.display()
        )));
    }
    let doc = Document::read(path, DocumentKind::Markdown)?;
    let scan = links::scan(doc.text());
    Ok(format_anchors(&scan.anchors, json))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_lists_headings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("guide.md");
        fs::write(&path, "# Guide\n\n## Setup\n").unwrap();
        let out = run_anchors(&path, false).unwrap();
        assert!(out.contains("#guide"));
        assert!(out.contains("#setup"));
    }

    #[test]
    fn test_rejects_sql_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("q.sql");
        fs::write(&path, "SELECT 1").unwrap();
        assert!(run_anchors(&path, false).is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(run_anchors(&dir.path().join("nope.md"), true).is_err());
    }
}
