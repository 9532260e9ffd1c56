//! SQL fragment extraction.
//!
//! A [`Fragment`] is a borrowed view of the SQL text inside a document:
//! the body of every fenced code block tagged with a SQL language in
//! Markdown, or the whole file for `.sql` documents.
//!
//! Extraction is lazy. [`Fragments`] scans the document one fence at a time
//! and yields fragments in document order. It is cheap to clone, and a new
//! scan can always be started from the owning document, so consumers can
//! walk the same document as many times as they need.
//!
//! # Example
//!
//! ```
//! use compact_str::CompactString;
//! use sql_doc_lint::extract::{Fragments, FragmentSource};
//!
//! let text = "# Orders\n\n```sql\nSELECT * FROM orders\n```\n";
//! let languages = [CompactString::from("sql")];
//! let fragments: Vec<_> = Fragments::markdown(text, &languages)
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(fragments.len(), 1);
//! assert_eq!(fragments[0].text, "SELECT * FROM orders\n");
//! assert_eq!(fragments[0].start_line, 4);
//! assert!(matches!(fragments[0].source, FragmentSource::Fenced { .. }));
//! ```

pub mod fence;

use compact_str::CompactString;
use fence::Lines;
use serde::Serialize;

/// Where a fragment came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FragmentSource {
    /// Body of a fenced Markdown code block
    Fenced {
        language:   CompactString,
        fence_line: usize
    },
    /// A whole `.sql` file
    Standalone
}

/// Contiguous span of SQL text inside a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment<'a> {
    /// SQL text, borrowed from the document
    pub text:       &'a str,
    /// Byte offset of `text` in the document
    pub offset:     usize,
    /// One-based line of the first SQL line
    pub start_line: usize,
    /// One-based line of the last SQL line
    pub end_line:   usize,
    pub source:     FragmentSource
}

/// A fence opened at `line` that is never closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedDocument {
    /// One-based line of the opening fence
    pub line:   usize,
    /// Byte offset of the opening fence line
    pub offset: usize,
    /// The fence run itself, e.g. "```"
    pub fence:  String
}

impl std::fmt::Display for MalformedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "code fence `{}` opened on line {} is never closed",
            self.fence, self.line
        )
    }
}

#[derive(Debug, Clone, Copy)]
enum Mode {
    Markdown,
    Standalone
}

/// Lazy iterator over the SQL fragments of one document.
///
/// Yields `Err(MalformedDocument)` at most once, after which it is
/// exhausted.
#[derive(Debug, Clone)]
pub struct Fragments<'a> {
    text:      &'a str,
    lines:     Lines<'a>,
    languages: &'a [CompactString],
    mode:      Mode,
    finished:  bool
}

impl<'a> Fragments<'a> {
    /// Fragments of a Markdown document, keeping fences tagged with one of
    /// `languages`
    pub fn markdown(text: &'a str, languages: &'a [CompactString]) -> Self {
        Self {
            text,
            lines: Lines::new(text),
            languages,
            mode: Mode::Markdown,
            finished: false
        }
    }

    /// The single fragment of a `.sql` file
    pub fn standalone(text: &'a str) -> Self {
        Self {
            text,
            lines: Lines::new(text),
            languages: &[],
            mode: Mode::Standalone,
            finished: false
        }
    }

    fn accepts(&self, language: &str) -> bool {
        self.languages
            .iter()
            .any(|lang| lang.eq_ignore_ascii_case(language))
    }

    fn next_standalone(&mut self) -> Option<Result<Fragment<'a>, MalformedDocument>> {
        self.finished = true;
        let end_line = self.lines.by_ref().count().max(1);
        Some(Ok(Fragment {
            text: self.text,
            offset: 0,
            start_line: 1,
            end_line,
            source: FragmentSource::Standalone
        }))
    }

    fn next_fenced(&mut self) -> Option<Result<Fragment<'a>, MalformedDocument>> {
        while let Some(line) = self.lines.next() {
            let Some(open) = fence::parse_open(line.text) else {
                continue;
            };
            let content_start = self.lines.position();
            let close = self
                .lines
                .by_ref()
                .find(|inner| fence::is_close(inner.text, &open));
            let Some(close) = close else {
                self.finished = true;
                let fence = line.text.trim_start()[..open.len].to_string();
                return Some(Err(MalformedDocument {
                    line: line.number,
                    offset: line.offset,
                    fence
                }));
            };
            let language = fence::language(open.info);
            if !self.accepts(&language) {
                continue;
            }
            let start_line = line.number + 1;
            return Some(Ok(Fragment {
                text: &self.text[content_start..close.offset],
                offset: content_start,
                start_line,
                end_line: close.number.saturating_sub(1).max(start_line),
                source: FragmentSource::Fenced {
                    language,
                    fence_line: line.number
                }
            }));
        }
        self.finished = true;
        None
    }
}

impl<'a> Iterator for Fragments<'a> {
    type Item = Result<Fragment<'a>, MalformedDocument>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.mode {
            Mode::Markdown => self.next_fenced(),
            Mode::Standalone => self.next_standalone()
        }
    }
}
