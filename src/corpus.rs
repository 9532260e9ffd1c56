//! Documentation corpus loading.
//!
//! A [`Corpus`] is every Markdown and SQL file found under a root
//! directory, loaded in a stable order (directory entries sorted by file
//! name). Each [`Document`] owns its text; fragments and findings refer
//! back to it by byte offset.

use std::{
    fs,
    path::{Component, Path, PathBuf}
};

use compact_str::CompactString;
use serde::Serialize;
use tracing::debug;
use walkdir::WalkDir;

use crate::{
    config::CorpusConfig,
    error::{AppResult, corpus_error, file_read_error, walk_error},
    extract::Fragments
};

/// Kind of document, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DocumentKind {
    Markdown,
    Sql
}

impl DocumentKind {
    /// Kind for `path`, or `None` for files the linter ignores
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown") {
            Some(Self::Markdown)
        } else if ext.eq_ignore_ascii_case("sql") {
            Some(Self::Sql)
        } else {
            None
        }
    }
}

/// One-based position in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub line:   usize,
    /// Counted in characters, not bytes
    pub column: usize
}

/// A single Markdown or SQL file.
#[derive(Debug, Clone)]
pub struct Document {
    path:        PathBuf,
    kind:        DocumentKind,
    text:        String,
    line_starts: Vec<usize>
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, kind: DocumentKind, text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(idx, _)| idx + 1))
            .collect();
        Self {
            path: path.into(),
            kind,
            text,
            line_starts
        }
    }

    /// Read a document from disk
    pub fn read(path: &Path, kind: DocumentKind) -> AppResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| file_read_error(&path.display().to_string(), e))?;
        Ok(Self::new(path, kind, text))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Start a fresh scan over the SQL fragments of this document
    pub fn fragments<'a>(&'a self, languages: &'a [CompactString]) -> Fragments<'a> {
        match self.kind {
            DocumentKind::Markdown => Fragments::markdown(&self.text, languages),
            DocumentKind::Sql => Fragments::standalone(&self.text)
        }
    }

    /// Map a byte offset to a line and column
    pub fn location(&self, offset: usize) -> Location {
        let offset = offset.min(self.text.len());
        let idx = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let start = self.line_starts.get(idx).copied().unwrap_or(0);
        let column = self
            .text
            .get(start..offset)
            .map_or(offset - start, |prefix| prefix.chars().count());
        Location {
            line:   idx + 1,
            column: column + 1
        }
    }
}

/// All documents under one root.
#[derive(Debug, Clone)]
pub struct Corpus {
    root:      PathBuf,
    documents: Vec<Document>
}

impl Corpus {
    /// Load every document under `root`.
    ///
    /// `root` may also name a single Markdown or SQL file. Any I/O failure
    /// aborts loading with an error naming the unreadable path.
    pub fn load(root: &Path, config: &CorpusConfig) -> AppResult<Self> {
        let metadata =
            fs::metadata(root).map_err(|e| file_read_error(&root.display().to_string(), e))?;
        let mut documents = Vec::new();
        if metadata.is_file() {
            let kind = DocumentKind::from_path(root).ok_or_else(|| {
                corpus_error(format!(
                    "'{}' is neither a directory nor a Markdown or SQL file",
                    root.display()
                ))
            })?;
            documents.push(Document::read(root, kind)?);
        } else {
            let walker = WalkDir::new(root)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| entry.depth() == 0 || !config.is_excluded(entry.file_name()));
            for entry in walker {
                let entry = entry.map_err(walk_error)?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let Some(kind) = DocumentKind::from_path(entry.path()) else {
                    continue;
                };
                debug!(path = %entry.path().display(), ?kind, "loading document");
                documents.push(Document::read(entry.path(), kind)?);
            }
        }
        debug!(root = %root.display(), documents = documents.len(), "corpus loaded");
        Ok(Self::from_documents(root, documents))
    }

    /// Build a corpus from documents already in memory
    pub fn from_documents(root: impl Into<PathBuf>, documents: Vec<Document>) -> Self {
        Self {
            root: root.into(),
            documents
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Directory that root-relative links (`/docs/x.md`) resolve from
    pub fn link_base(&self) -> &Path {
        if DocumentKind::from_path(&self.root).is_some() {
            self.root.parent().unwrap_or(Path::new(""))
        } else {
            &self.root
        }
    }
}

/// Lexically normalize a path: drop `.` components and fold `..`.
///
/// The filesystem is not consulted, so symlinks are not resolved.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last = out.components().next_back();
                match last {
                    Some(Component::Normal(_)) => {
                        out.pop();
                    }
                    Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                    _ => out.push("..")
                }
            }
            other => out.push(other.as_os_str())
        }
    }
    out
}
