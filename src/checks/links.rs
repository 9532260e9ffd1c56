//! Markdown anchors and internal links.
//!
//! [`scan`] walks a Markdown document once, outside fenced code and front
//! matter, and collects:
//!
//! - anchors from ATX and setext headings (slugged, de-duplicated) and from
//!   explicit HTML `id`/`name` attributes
//! - link targets from inline links, images and reference definitions,
//!   ignoring anything inside inline code spans and HTML comments
//!
//! Resolving a link against other documents needs the whole corpus and
//! happens in [`super::Linter`].

use std::{borrow::Cow, sync::LazyLock};

use compact_str::CompactString;
use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;

use super::{
    catalog::DUPLICATE_ANCHOR,
    slug::{SlugCounter, slugify},
    types::Issue
};
use crate::extract::fence::{self, Lines};

/// `[label]: target`; footnote definitions (`[^1]: text`) are not links.
static REFERENCE_DEFINITION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {0,3}\[[^\]^][^\]]*\]:\s*<?([^\s>]+)>?").expect("valid regex")
});

static HTML_ANCHOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<[a-zA-Z][^>]*?\s(?:id|name)\s*=\s*["']([^"']+)["']"#).expect("valid regex")
});

/// Where an anchor was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorSource {
    Heading,
    Html
}

/// A link target inside a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Anchor {
    pub slug:   CompactString,
    /// One-based line of the declaration
    pub line:   usize,
    pub source: AnchorSource
}

/// Anchors of one document by slug, in document order.
pub type AnchorSet = IndexMap<CompactString, Anchor>;

/// A link found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Target exactly as written
    pub target: CompactString,
    /// Byte offset of the target in the document
    pub offset: usize
}

/// Everything [`scan`] collects from one document.
#[derive(Debug, Default)]
pub struct LinkScan {
    pub anchors: AnchorSet,
    pub links:   Vec<Link>,
    pub issues:  Vec<Issue>
}

impl LinkScan {
    fn add_anchor(&mut self, slug: CompactString, line: usize, source: AnchorSource) {
        self.anchors.insert(
            slug.clone(),
            Anchor {
                slug,
                line,
                source
            }
        );
    }
}

/// Scan a Markdown document for anchors and links
pub fn scan(text: &str) -> LinkScan {
    let mut result = LinkScan::default();
    let mut slugs = SlugCounter::new();
    let mut lines = Lines::new(text).peekable();
    let mut paragraph: Option<&str> = None;
    let mut in_comment = false;

    skip_front_matter(&mut lines);

    while let Some(line) = lines.next() {
        let starts_in_comment = in_comment;
        if !starts_in_comment && let Some(open) = fence::parse_open(line.text) {
            for inner in lines.by_ref() {
                if fence::is_close(inner.text, &open) {
                    break;
                }
            }
            paragraph = None;
            continue;
        }

        let mut heading_slug = None;
        if starts_in_comment {
            paragraph = None;
        } else if let Some(heading) = atx_heading(line.text) {
            let slug = slugify(heading);
            if !slug.is_empty() {
                let slug = slugs.unique(slug);
                heading_slug = Some(slug.clone());
                result.add_anchor(slug, line.number, AnchorSource::Heading);
            }
            paragraph = None;
        } else if let Some(heading) = paragraph
            && is_setext_underline(line.text)
        {
            let slug = slugify(heading);
            if !slug.is_empty() {
                let slug = slugs.unique(slug);
                result.add_anchor(slug, line.number - 1, AnchorSource::Heading);
            }
            paragraph = None;
            continue;
        } else {
            paragraph = (!line.text.trim().is_empty()).then_some(line.text);
        }

        let code_free = blank_code_spans(line.text);
        let visible = blank_comments(&code_free, &mut in_comment);

        for cap in HTML_ANCHOR_REGEX.captures_iter(&visible) {
            let Some(id) = cap.get(1) else { continue };
            let slug = CompactString::from(id.as_str());
            if slugs.contains(&slug) {
                // `## Title <a id="title"></a>` names the heading it sits on
                if heading_slug.as_ref() == Some(&slug) {
                    continue;
                }
                result.issues.push(Issue::new(
                    &DUPLICATE_ANCHOR,
                    format!("anchor `{}` is already defined in this document", slug),
                    line.offset + id.start()
                ));
                continue;
            }
            slugs.unique(slug.clone());
            result.add_anchor(slug, line.number, AnchorSource::Html);
        }

        let definitions = REFERENCE_DEFINITION_REGEX
            .captures_iter(&visible)
            .filter_map(|cap| cap.get(1))
            .map(|m| (m.start(), m.as_str()));
        for (start, target) in inline_targets(&visible).into_iter().chain(definitions) {
            if target.is_empty() {
                continue;
            }
            result.links.push(Link {
                target: CompactString::from(target),
                offset: line.offset + start
            });
        }
    }
    result
}

fn skip_front_matter<'a, I>(lines: &mut std::iter::Peekable<I>)
where
    I: Iterator<Item = fence::Line<'a>>
{
    if lines.peek().map(|l| l.text.trim_end()) != Some("---") {
        return;
    }
    lines.next();
    for line in lines.by_ref() {
        let text = line.text.trim_end();
        if text == "---" || text == "..." {
            break;
        }
    }
}

/// Text of an ATX heading (`## Title ##`), without the markers
fn atx_heading(line: &str) -> Option<&str> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > 3 {
        return None;
    }
    let rest = &line[indent..];
    let level = rest.bytes().take_while(|&b| b == b'#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let after = &rest[level..];
    if !after.is_empty() && !after.starts_with([' ', '\t']) {
        return None;
    }
    let content = after.trim();
    let stripped = content.trim_end_matches('#');
    if stripped.len() < content.len() && (stripped.is_empty() || stripped.ends_with([' ', '\t'])) {
        Some(stripped.trim_end())
    } else {
        Some(content)
    }
}

fn is_setext_underline(line: &str) -> bool {
    let indent = line.len() - line.trim_start_matches(' ').len();
    let trimmed = line.trim();
    indent <= 3
        && !trimmed.is_empty()
        && (trimmed.bytes().all(|b| b == b'=') || trimmed.bytes().all(|b| b == b'-'))
}

/// Replace inline code spans with spaces, keeping byte offsets
fn blank_code_spans(line: &str) -> Cow<'_, str> {
    if !line.contains('`') {
        return Cow::Borrowed(line);
    }
    let bytes = line.as_bytes();
    let mut blank = vec![false; bytes.len()];
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'`' {
            i += 1;
            continue;
        }
        let run = bytes[i..].iter().take_while(|&&b| b == b'`').count();
        let mut j = i + run;
        let mut end = None;
        while j < bytes.len() {
            if bytes[j] == b'`' {
                let close = bytes[j..].iter().take_while(|&&b| b == b'`').count();
                if close == run {
                    end = Some(j + close);
                    break;
                }
                j += close;
            } else {
                j += 1;
            }
        }
        match end {
            Some(end) => {
                blank[i..end].fill(true);
                i = end;
            }
            None => i += run
        }
    }
    let mut out = String::with_capacity(line.len());
    for (idx, ch) in line.char_indices() {
        if blank[idx] {
            out.extend(std::iter::repeat_n(' ', ch.len_utf8()));
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

/// Replace HTML comments with spaces, keeping byte offsets.
///
/// `in_comment` carries an unterminated `<!--` over to the next line.
fn blank_comments<'a>(line: &'a str, in_comment: &mut bool) -> Cow<'a, str> {
    if !*in_comment && !line.contains("<!--") {
        return Cow::Borrowed(line);
    }
    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    loop {
        if *in_comment {
            match rest.find("-->") {
                Some(end) => {
                    out.extend(std::iter::repeat_n(' ', end + 3));
                    rest = &rest[end + 3..];
                    *in_comment = false;
                }
                None => {
                    out.extend(std::iter::repeat_n(' ', rest.len()));
                    break;
                }
            }
        } else {
            match rest.find("<!--") {
                Some(start) => {
                    out.push_str(&rest[..start]);
                    out.push_str("    ");
                    rest = &rest[start + 4..];
                    *in_comment = true;
                }
                None => {
                    out.push_str(rest);
                    break;
                }
            }
        }
    }
    Cow::Owned(out)
}

/// Targets of inline links and images, with their byte offsets.
///
/// Link text may hold brackets of its own, as in `[![badge](a.svg)](b.md)`.
fn inline_targets(line: &str) -> Vec<(usize, &str)> {
    let bytes = line.as_bytes();
    let mut opens = Vec::new();
    let mut found = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                i += 2;
                continue;
            }
            b'[' => opens.push(i),
            b']' => {
                if opens.pop().is_some()
                    && bytes.get(i + 1) == Some(&b'(')
                    && let Some((start, end)) = link_destination(bytes, i + 2)
                {
                    found.push((start, &line[start..end]));
                }
            }
            _ => {}
        }
        i += 1;
    }
    found
}

/// Destination span of `(dest "title")` starting just after the `(`
fn link_destination(bytes: &[u8], from: usize) -> Option<(usize, usize)> {
    let skip_blanks = |mut i: usize| {
        while matches!(bytes.get(i), Some(b' ' | b'\t')) {
            i += 1;
        }
        i
    };
    let mut i = skip_blanks(from);
    let (start, end) = if bytes.get(i) == Some(&b'<') {
        let close = i + 1 + bytes[i + 1..].iter().position(|&b| b == b'>')?;
        let span = (i + 1, close);
        i = close + 1;
        span
    } else {
        let start = i;
        let mut depth = 0usize;
        while let Some(&b) = bytes.get(i) {
            match b {
                b'(' => depth += 1,
                b')' if depth == 0 => break,
                b')' => depth -= 1,
                b' ' | b'\t' => break,
                _ => {}
            }
            i += 1;
        }
        (start, i)
    };
    i = skip_blanks(i);
    if let Some(&quote @ (b'"' | b'\'')) = bytes.get(i) {
        i += 1 + bytes[i + 1..].iter().position(|&b| b == quote)? + 1;
        i = skip_blanks(i);
    }
    (bytes.get(i) == Some(&b')')).then_some((start, end))
}

/// A link target, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Has a URI scheme or is protocol-relative; never checked
    External,
    /// Path and/or fragment within the documentation, percent-decoded
    Local {
        path:     Option<String>,
        fragment: Option<String>
    }
}

/// Classify a raw link target
pub fn parse_target(raw: &str) -> LinkTarget {
    if raw.starts_with("//") || has_scheme(raw) {
        return LinkTarget::External;
    }
    let (before, fragment) = match raw.split_once('#') {
        Some((before, fragment)) => (before, Some(fragment)),
        None => (raw, None)
    };
    let path = before.split_once('?').map_or(before, |(path, _)| path);
    LinkTarget::Local {
        path:     (!path.is_empty()).then(|| percent_decode(path)),
        fragment: fragment
            .filter(|f| !f.is_empty())
            .map(percent_decode)
    }
}

fn has_scheme(raw: &str) -> bool {
    match raw.find(':') {
        Some(idx) if idx > 0 => raw[..idx].chars().enumerate().all(|(n, c)| {
            if n == 0 {
                c.is_ascii_alphabetic()
            } else {
                c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-')
            }
        }),
        _ => false
    }
}

/// Decode `%XX` escapes; invalid escapes are kept as written
pub fn percent_decode(s: &str) -> String {
    if !s.contains('%') {
        return s.to_string();
    }
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && let Some(hex) = s.get(i + 1..i + 3)
            && hex.bytes().all(|b| b.is_ascii_hexdigit())
            && let Ok(byte) = u8::from_str_radix(hex, 16)
        {
            out.push(byte);
            i += 3;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8(out).unwrap_or_else(|_| s.to_string())
}
