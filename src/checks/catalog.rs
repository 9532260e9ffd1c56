//! Catalog of every check the linter can report.

use super::types::{CheckCategory, CheckInfo, Severity};

pub static MALFORMED_DOCUMENT: CheckInfo = CheckInfo {
    id:          "DOC001",
    name:        "Malformed document",
    severity:    Severity::Error,
    category:    CheckCategory::Structure,
    description: "A code fence is opened but never closed"
};

pub static UNBALANCED_MARKER: CheckInfo = CheckInfo {
    id:          "TPL001",
    name:        "Unbalanced marker",
    severity:    Severity::Error,
    category:    CheckCategory::Template,
    description: "A closing `}}` or `]]` does not match the innermost open marker"
};

pub static UNCLOSED_MARKER: CheckInfo = CheckInfo {
    id:          "TPL002",
    name:        "Unclosed marker",
    severity:    Severity::Error,
    category:    CheckCategory::Template,
    description: "A `{{` or `[[` is still open at the end of the SQL block"
};

pub static INVALID_NESTING: CheckInfo = CheckInfo {
    id:          "TPL003",
    name:        "Invalid nesting",
    severity:    Severity::Error,
    category:    CheckCategory::Template,
    description: "Markers may only nest as a variable inside an optional clause"
};

pub static EMPTY_VARIABLE: CheckInfo = CheckInfo {
    id:          "TPL004",
    name:        "Empty variable name",
    severity:    Severity::Warning,
    category:    CheckCategory::Template,
    description: "A `{{ }}` variable marker has no name"
};

pub static OPTIONAL_WITHOUT_VARIABLE: CheckInfo = CheckInfo {
    id:          "TPL005",
    name:        "Optional clause without variable",
    severity:    Severity::Info,
    category:    CheckCategory::Template,
    description: "An optional clause contains no variable, so it can never be toggled"
};

pub static UNBALANCED_PARENS: CheckInfo = CheckInfo {
    id:          "SQL001",
    name:        "Unbalanced parentheses",
    severity:    Severity::Warning,
    category:    CheckCategory::Shape,
    description: "Parentheses outside strings and comments do not pair up"
};

pub static UNTERMINATED_QUOTE: CheckInfo = CheckInfo {
    id:          "SQL002",
    name:        "Unterminated quote",
    severity:    Severity::Warning,
    category:    CheckCategory::Shape,
    description: "A quoted literal or block comment runs to the end of the SQL block"
};

pub static UNEXPECTED_LEADING_KEYWORD: CheckInfo = CheckInfo {
    id:          "SQL003",
    name:        "Unexpected leading keyword",
    severity:    Severity::Warning,
    category:    CheckCategory::Shape,
    description: "The SQL block does not start with an allowed statement keyword"
};

pub static EMPTY_FRAGMENT: CheckInfo = CheckInfo {
    id:          "SQL004",
    name:        "Empty SQL block",
    severity:    Severity::Info,
    category:    CheckCategory::Shape,
    description: "The SQL block contains only whitespace and comments"
};

pub static BROKEN_ANCHOR: CheckInfo = CheckInfo {
    id:          "LINK001",
    name:        "Broken anchor",
    severity:    Severity::Error,
    category:    CheckCategory::Link,
    description: "A link fragment does not match any anchor of the target document"
};

pub static MISSING_TARGET: CheckInfo = CheckInfo {
    id:          "LINK002",
    name:        "Missing link target",
    severity:    Severity::Error,
    category:    CheckCategory::Link,
    description: "A relative link points at a file that does not exist"
};

pub static DUPLICATE_ANCHOR: CheckInfo = CheckInfo {
    id:          "LINK003",
    name:        "Duplicate anchor",
    severity:    Severity::Warning,
    category:    CheckCategory::Link,
    description: "An explicit HTML anchor repeats a slug that already exists in the document"
};

/// Every check, in report order of their identifiers
pub static ALL_CHECKS: &[&CheckInfo] = &[
    &MALFORMED_DOCUMENT,
    &UNBALANCED_MARKER,
    &UNCLOSED_MARKER,
    &INVALID_NESTING,
    &EMPTY_VARIABLE,
    &OPTIONAL_WITHOUT_VARIABLE,
    &UNBALANCED_PARENS,
    &UNTERMINATED_QUOTE,
    &UNEXPECTED_LEADING_KEYWORD,
    &EMPTY_FRAGMENT,
    &BROKEN_ANCHOR,
    &MISSING_TARGET,
    &DUPLICATE_ANCHOR
];

/// Look up a check by identifier, ignoring case
pub fn lookup(id: &str) -> Option<&'static CheckInfo> {
    ALL_CHECKS
        .iter()
        .copied()
        .find(|check| check.id.eq_ignore_ascii_case(id))
}
