//! Line-level Markdown scanning shared by the extractor and link checker.

use compact_str::CompactString;

/// One line of a document, without its line terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// One-based line number
    pub number: usize,
    /// Byte offset of the first character of the line
    pub offset: usize,
    pub text:   &'a str
}

/// Iterator over the lines of a text, tracking line numbers and offsets.
///
/// Handles both `\n` and `\r\n` terminators.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    text:   &'a str,
    pos:    usize,
    number: usize
}

impl<'a> Lines<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            number: 1
        }
    }

    /// Byte offset of the next line to be yielded
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Line<'a>> {
        if self.pos >= self.text.len() {
            return None;
        }
        let rest = &self.text[self.pos..];
        let (raw, advance) = match rest.find('\n') {
            Some(idx) => (&rest[..idx], idx + 1),
            None => (rest, rest.len())
        };
        let line = Line {
            number: self.number,
            offset: self.pos,
            text:   raw.strip_suffix('\r').unwrap_or(raw)
        };
        self.pos += advance;
        self.number += 1;
        Some(line)
    }
}

/// Opening line of a fenced code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceOpen<'a> {
    /// Fence character, either `` ` `` or `~`
    pub marker: u8,
    /// Length of the opening run
    pub len:    usize,
    /// Info string after the run, trimmed
    pub info:   &'a str
}

/// Recognize a fence opening line.
///
/// Indentation is not limited, so fences nested in list items are found.
pub fn parse_open(line: &str) -> Option<FenceOpen<'_>> {
    let trimmed = line.trim_start();
    let marker = *trimmed.as_bytes().first()?;
    if marker != b'`' && marker != b'~' {
        return None;
    }
    let len = trimmed.bytes().take_while(|&b| b == marker).count();
    if len < 3 {
        return None;
    }
    let info = trimmed[len..].trim();
    if marker == b'`' && info.contains('`') {
        return None;
    }
    Some(FenceOpen {
        marker,
        len,
        info
    })
}

/// Whether `line` closes the block opened by `open`
pub fn is_close(line: &str, open: &FenceOpen<'_>) -> bool {
    let trimmed = line.trim();
    let len = trimmed.bytes().take_while(|&b| b == open.marker).count();
    len >= open.len && len == trimmed.len()
}

/// Language named by a fence info string: first token, lower-cased.
///
/// Pandoc attribute syntax such as `{.sql}` is unwrapped.
pub fn language(info: &str) -> CompactString {
    let token = info.split_whitespace().next().unwrap_or_default();
    let token = token.trim_start_matches(['{', '.']);
    token
        .chars()
        .take_while(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '+'))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_offsets_and_crlf() {
        let lines: Vec<_> = Lines::new("a\r\nbc\n\nd").collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].text, "a");
        assert_eq!(lines[1].offset, 3);
        assert_eq!(lines[1].text, "bc");
        assert_eq!(lines[2].text, "");
        assert_eq!(lines[3].number, 4);
        assert_eq!(lines[3].offset, 7);
    }

    #[test]
    fn test_lines_trailing_newline_adds_no_line() {
        assert_eq!(Lines::new("x\n").count(), 1);
        assert_eq!(Lines::new("").count(), 0);
    }

    #[test]
    fn test_parse_open_backticks_and_tildes() {
        let open = parse_open("```sql").unwrap();
        assert_eq!(open.marker, b'`');
        assert_eq!(open.len, 3);
        assert_eq!(open.info, "sql");
        let open = parse_open("  ~~~~ SQL title=x").unwrap();
        assert_eq!(open.len, 4);
        assert_eq!(open.info, "SQL title=x");
    }

    #[test]
    fn test_parse_open_rejects_short_runs_and_inline_code() {
        assert!(parse_open("``sql").is_none());
        assert!(parse_open("```a`b```").is_none());
        assert!(parse_open("SELECT 1").is_none());
    }

    #[test]
    fn test_is_close_requires_same_marker_and_length() {
        let open = parse_open("````sql").unwrap();
        assert!(!is_close("```", &open));
        assert!(is_close("`````  ", &open));
        assert!(!is_close("~~~~", &open));
        assert!(!is_close("```` sql", &open));
    }

    #[test]
    fn test_language_normalization() {
        assert_eq!(language("SQL"), "sql");
        assert_eq!(language("{.sql}"), "sql");
        assert_eq!(language("sql title=\"q\""), "sql");
        assert_eq!(language(""), "");
    }
}
