//! Template marker validation.
//!
//! SQL examples use two kinds of markers understood by the query layer
//! they document:
//!
//! - `{{name}}` - a variable, substituted with a value
//! - `[[ ... ]]` - an optional clause, dropped when its variables are unset
//!
//! [`validate`] checks that markers pair up and nest legally (a variable may
//! sit inside an optional clause, nothing else nests). [`neutralize`] then
//! blanks the markers out so the SQL shape checks see plain SQL with the
//! same byte layout as the original text.

use std::ops::Range;

use serde::Serialize;
use smallvec::SmallVec;

use super::{
    catalog::{
        EMPTY_VARIABLE, INVALID_NESTING, OPTIONAL_WITHOUT_VARIABLE, UNBALANCED_MARKER,
        UNCLOSED_MARKER
    },
    types::{CheckInfo, Issue}
};

/// Byte written over every byte of a `{{...}}` span by [`neutralize`]
pub const PLACEHOLDER: char = '_';

/// Kind of template marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerKind {
    /// `{{...}}`
    Variable,
    /// `[[...]]`
    OptionalClause
}

impl MarkerKind {
    pub fn open(&self) -> &'static str {
        match self {
            Self::Variable => "{{",
            Self::OptionalClause => "[["
        }
    }

    pub fn close(&self) -> &'static str {
        match self {
            Self::Variable => "}}",
            Self::OptionalClause => "]]"
        }
    }
}

impl std::fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Variable => write!(f, "variable"),
            Self::OptionalClause => write!(f, "optional clause")
        }
    }
}

/// A matched delimiter pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateMarker {
    pub kind:  MarkerKind,
    /// Byte span from the opening to the end of the closing delimiter
    pub span:  Range<usize>,
    /// Number of markers enclosing this one
    pub depth: usize
}

impl TemplateMarker {
    /// Text between the delimiters
    pub fn inner<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.span.start + 2..self.span.end - 2)
            .unwrap_or_default()
    }
}

/// Why marker validation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerErrorKind {
    /// A closing delimiter with no matching opener on top of the stack
    Unbalanced,
    /// An opener still on the stack at the end of the fragment
    Unclosed,
    /// An opener that may not appear inside the enclosing marker
    InvalidNesting
}

/// First structural marker error of a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerError {
    pub kind:      MarkerErrorKind,
    /// Marker whose delimiter is at fault
    pub marker:    MarkerKind,
    /// Innermost open marker at the point of failure, if any
    pub enclosing: Option<MarkerKind>,
    /// Byte offset of the offending delimiter within the fragment
    pub offset:    usize
}

impl MarkerError {
    pub fn check(&self) -> &'static CheckInfo {
        match self.kind {
            MarkerErrorKind::Unbalanced => &UNBALANCED_MARKER,
            MarkerErrorKind::Unclosed => &UNCLOSED_MARKER,
            MarkerErrorKind::InvalidNesting => &INVALID_NESTING
        }
    }

    pub fn message(&self) -> String {
        match (self.kind, self.enclosing) {
            (MarkerErrorKind::Unbalanced, None) => format!(
                "closing `{}` has no matching `{}`",
                self.marker.close(),
                self.marker.open()
            ),
            (MarkerErrorKind::Unbalanced, Some(open)) => format!(
                "closing `{}` found while {} `{}` is still open",
                self.marker.close(),
                open,
                open.open()
            ),
            (MarkerErrorKind::Unclosed, _) => format!(
                "{} `{}` is never closed with `{}`",
                self.marker,
                self.marker.open(),
                self.marker.close()
            ),
            (MarkerErrorKind::InvalidNesting, enclosing) => {
                let enclosing = enclosing.unwrap_or(self.marker);
                format!(
                    "{} `{}` cannot appear inside {} `{}`",
                    self.marker,
                    self.marker.open(),
                    enclosing,
                    enclosing.open()
                )
            }
        }
    }

    pub fn to_issue(&self) -> Issue {
        Issue::new(self.check(), self.message(), self.offset)
    }
}

/// Validate the markers of one fragment.
///
/// Scans left to right with a stack of open markers and stops at the first
/// structural error. On success returns every marker, sorted by start.
pub fn validate(text: &str) -> Result<Vec<TemplateMarker>, MarkerError> {
    let bytes = text.as_bytes();
    let mut stack: SmallVec<[(MarkerKind, usize); 4]> = SmallVec::new();
    let mut markers = Vec::new();
    let mut i = 0;
    while i + 1 < bytes.len() {
        let pair = &bytes[i..i + 2];
        let opened = match pair {
            b"{{" => Some(MarkerKind::Variable),
            b"[[" => Some(MarkerKind::OptionalClause),
            _ => None
        };
        if let Some(kind) = opened {
            if let Some(&(top, _)) = stack.last()
                && (top == MarkerKind::Variable || kind == MarkerKind::OptionalClause)
            {
                return Err(MarkerError {
                    kind:      MarkerErrorKind::InvalidNesting,
                    marker:    kind,
                    enclosing: Some(top),
                    offset:    i
                });
            }
            stack.push((kind, i));
            i += 2;
            continue;
        }
        let closed = match pair {
            b"}}" => Some(MarkerKind::Variable),
            b"]]" => Some(MarkerKind::OptionalClause),
            _ => None
        };
        if let Some(kind) = closed {
            match stack.pop() {
                Some((top, start)) if top == kind => markers.push(TemplateMarker {
                    kind,
                    span: start..i + 2,
                    depth: stack.len()
                }),
                other => {
                    return Err(MarkerError {
                        kind:      MarkerErrorKind::Unbalanced,
                        marker:    kind,
                        enclosing: other.map(|(top, _)| top),
                        offset:    i
                    });
                }
            }
            i += 2;
            continue;
        }
        i += 1;
    }
    if let Some(&(kind, offset)) = stack.last() {
        return Err(MarkerError {
            kind: MarkerErrorKind::Unclosed,
            marker: kind,
            enclosing: None,
            offset
        });
    }
    markers.sort_by_key(|m| m.span.start);
    Ok(markers)
}

/// Advisory checks on well-formed markers
pub fn lint_markers(text: &str, markers: &[TemplateMarker]) -> Vec<Issue> {
    let mut issues = Vec::new();
    for marker in markers {
        match marker.kind {
            MarkerKind::Variable if marker.inner(text).trim().is_empty() => {
                issues.push(
                    Issue::new(&EMPTY_VARIABLE, "variable `{{ }}` has no name", marker.span.start)
                        .with_suggestion("Name the variable, e.g. `{{category}}`")
                );
            }
            MarkerKind::OptionalClause => {
                let has_variable = markers.iter().any(|m| {
                    m.kind == MarkerKind::Variable
                        && m.span.start > marker.span.start
                        && m.span.end < marker.span.end
                });
                if !has_variable {
                    issues.push(Issue::new(
                        &OPTIONAL_WITHOUT_VARIABLE,
                        "optional clause `[[ ]]` contains no variable",
                        marker.span.start
                    ));
                }
            }
            _ => {}
        }
    }
    issues
}

/// Replace markers with neutral text of identical byte length.
///
/// `[[` and `]]` become spaces and the clause body is kept; a whole `{{...}}`
/// span becomes [`PLACEHOLDER`] bytes. Newlines are preserved, so offsets,
/// line numbers and columns of the neutral text match the original.
pub fn neutralize(text: &str, markers: &[TemplateMarker]) -> String {
    #[derive(Clone, Copy, PartialEq)]
    enum Action {
        Keep,
        Blank,
        Placeholder
    }

    let mut actions = vec![Action::Keep; text.len()];
    for marker in markers {
        let span = marker.span.clone();
        match marker.kind {
            MarkerKind::Variable => actions[span].fill(Action::Placeholder),
            MarkerKind::OptionalClause => {
                actions[span.start..span.start + 2].fill(Action::Blank);
                actions[span.end - 2..span.end].fill(Action::Blank);
            }
        }
    }

    let mut out = String::with_capacity(text.len());
    for (idx, ch) in text.char_indices() {
        let fill = match actions[idx] {
            Action::Keep => {
                out.push(ch);
                continue;
            }
            _ if ch == '\n' || ch == '\r' => {
                out.push(ch);
                continue;
            }
            Action::Blank => ' ',
            Action::Placeholder => PLACEHOLDER
        };
        out.extend(std::iter::repeat_n(fill, ch.len_utf8()));
    }
    out
}
