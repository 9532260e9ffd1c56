//! Lightweight SQL shape checks.
//!
//! This is a token scan, not a parser: it looks for unbalanced parentheses,
//! unterminated quoted literals and block comments, and checks the first
//! keyword of the block. Input is expected to be neutralized text (see
//! [`super::template::neutralize`]), so template markers never count as
//! SQL punctuation.

use std::ops::Range;

use compact_str::CompactString;
use smallvec::SmallVec;

use super::{
    catalog::{EMPTY_FRAGMENT, UNBALANCED_PARENS, UNEXPECTED_LEADING_KEYWORD, UNTERMINATED_QUOTE},
    types::Issue
};

/// Run all shape checks.
///
/// `opaque` lists byte spans whose content is substituted later (template
/// variables); a leading token inside one of them is not judged.
pub fn check(text: &str, leading_keywords: &[CompactString], opaque: &[Range<usize>]) -> Vec<Issue> {
    let mut issues = check_balance(text);
    match leading_token(text) {
        None => issues.push(Issue::new(
            &EMPTY_FRAGMENT,
            "SQL block contains no statement",
            0
        )),
        Some((offset, _)) if opaque.iter().any(|span| span.contains(&offset)) => {}
        Some((offset, token)) => {
            let allowed = leading_keywords
                .iter()
                .any(|kw| kw.eq_ignore_ascii_case(token));
            if !allowed {
                let expected = leading_keywords
                    .iter()
                    .map(|kw| kw.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                issues.push(
                    Issue::new(
                        &UNEXPECTED_LEADING_KEYWORD,
                        format!("SQL block starts with `{}`", token),
                        offset
                    )
                    .with_suggestion(format!("Start the example with one of: {}", expected))
                );
            }
        }
    }
    issues.sort_by_key(|issue| issue.offset);
    issues
}

/// Parenthesis and quote balance, ignoring comments
fn check_balance(text: &str) -> Vec<Issue> {
    let bytes = text.as_bytes();
    let mut issues = Vec::new();
    let mut parens: SmallVec<[usize; 8]> = SmallVec::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'-' if bytes.get(i + 1) == Some(&b'-') => {
                i = find_from(bytes, i, b"\n").unwrap_or(bytes.len());
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => match find_from(bytes, i + 2, b"*/") {
                Some(end) => i = end + 2,
                None => {
                    issues.push(Issue::new(
                        &UNTERMINATED_QUOTE,
                        "block comment `/*` is never closed",
                        i
                    ));
                    i = bytes.len();
                }
            },
            quote @ (b'\'' | b'"') => {
                let start = i;
                i += 1;
                let mut closed = false;
                while i < bytes.len() {
                    if bytes[i] == quote {
                        // doubled quote is an escaped quote
                        if bytes.get(i + 1) == Some(&quote) {
                            i += 2;
                            continue;
                        }
                        i += 1;
                        closed = true;
                        break;
                    }
                    i += 1;
                }
                if !closed {
                    issues.push(Issue::new(
                        &UNTERMINATED_QUOTE,
                        format!("quote `{}` is never closed", quote as char),
                        start
                    ));
                }
            }
            b'(' => {
                parens.push(i);
                i += 1;
            }
            b')' => {
                if parens.pop().is_none() {
                    issues.push(Issue::new(
                        &UNBALANCED_PARENS,
                        "closing `)` has no matching `(`",
                        i
                    ));
                }
                i += 1;
            }
            _ => i += 1
        }
    }
    for open in parens {
        issues.push(Issue::new(
            &UNBALANCED_PARENS,
            "opening `(` is never closed",
            open
        ));
    }
    issues
}

const BYTE_ORDER_MARK: &[u8] = "\u{feff}".as_bytes();

/// First token after whitespace and comments, with its byte offset.
///
/// A token is a run of word characters, or a single other character.
fn leading_token(text: &str) -> Option<(usize, &str)> {
    let bytes = text.as_bytes();
    let mut i = 0;
    loop {
        loop {
            if bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
                i += 1;
            } else if bytes[i..].starts_with(BYTE_ORDER_MARK) {
                i += BYTE_ORDER_MARK.len();
            } else {
                break;
            }
        }
        if bytes[i..].starts_with(b"--") {
            i = find_from(bytes, i, b"\n")?;
        } else if bytes[i..].starts_with(b"/*") {
            i = find_from(bytes, i + 2, b"*/")? + 2;
        } else {
            break;
        }
    }
    let rest = text.get(i..)?;
    let first = rest.chars().next()?;
    let len = if first.is_alphanumeric() || first == '_' {
        rest.find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(rest.len())
    } else {
        first.len_utf8()
    };
    Some((i, &rest[..len]))
}

fn find_from(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|pos| pos + from)
}
