//! Heading slugs, following the GitHub flavored Markdown rules.

use std::{collections::HashMap, sync::LazyLock};

use compact_str::{CompactString, format_compact};
use regex::Regex;

/// Inline links and images: keep the text, drop the target.
static LINK_MARKUP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!?\[([^\]]*)\]\([^)]*\)").expect("valid regex"));

static HTML_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

/// Slug of a heading: lower-cased, punctuation stripped, spaces to hyphens.
///
/// Runs of spaces are not collapsed, so `a  b` becomes `a--b`.
pub fn slugify(heading: &str) -> CompactString {
    let text = LINK_MARKUP_REGEX.replace_all(heading, "$1");
    let text = HTML_TAG_REGEX.replace_all(&text, "");
    let text = strip_emphasis(&text);
    text.trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '-' | '_' => Some(c),
            c if c.is_alphanumeric() => Some(c),
            _ => None
        })
        .collect()
}

/// Drop `_` emphasis delimiters; intraword underscores and code spans stay.
fn strip_emphasis(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_code = false;
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '`' {
            in_code = !in_code;
        }
        if c != '_' || in_code {
            out.push(c);
            i += 1;
            continue;
        }
        let end = i + chars[i..].iter().take_while(|&&c| c == '_').count();
        let before = i.checked_sub(1).map(|j| chars[j]);
        let after = chars.get(end).copied();
        if before.is_some_and(char::is_alphanumeric) && after.is_some_and(char::is_alphanumeric) {
            out.extend(&chars[i..end]);
        }
        i = end;
    }
    out
}

/// Hands out unique slugs, suffixing repeats with `-1`, `-2`, ...
#[derive(Debug, Default)]
pub struct SlugCounter {
    seen: HashMap<CompactString, usize>
}

impl SlugCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unique(&mut self, base: CompactString) -> CompactString {
        let Some(&count) = self.seen.get(&base) else {
            self.seen.insert(base.clone(), 0);
            return base;
        };
        let mut n = count + 1;
        let mut candidate = format_compact!("{}-{}", base, n);
        while self.seen.contains_key(&candidate) {
            n += 1;
            candidate = format_compact!("{}-{}", base, n);
        }
        self.seen.insert(base, n);
        self.seen.insert(candidate.clone(), 0);
        candidate
    }

    /// Whether `slug` was already handed out
    pub fn contains(&self, slug: &str) -> bool {
        self.seen.contains_key(slug)
    }
}
