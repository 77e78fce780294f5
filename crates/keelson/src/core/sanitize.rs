//! Mermaid identifier sanitizer
//!
//! Turns an arbitrary display name into an identifier Mermaid accepts as a
//! node or table name. Hiragana, Katakana and CJK ideographs are kept as-is.

use std::collections::BTreeSet;

/// Identifier used when the name is missing or blank
pub const FALLBACK_IDENTIFIER: &str = "node_unnamed";

/// Prefix applied to names that collide with Mermaid keywords
pub const RESERVED_PREFIX: &str = "node_";

/// Words that cannot be used verbatim as identifiers.
///
/// Matching lowercases the candidate but compares against these entries as
/// written, so the mixed-case `classDef` and `linkStyle` never match.
pub const RESERVED_WORDS: [&str; 20] = [
    "end",
    "start",
    "subgraph",
    "class",
    "classDef",
    "click",
    "style",
    "linkStyle",
    "direction",
    "flowchart",
    "graph",
    "if",
    "else",
    "elseif",
    "while",
    "for",
    "function",
    "return",
    "break",
    "continue",
];

/// Returns a fresh copy of the reserved word set
pub fn reserved_words() -> BTreeSet<&'static str> {
    RESERVED_WORDS.iter().copied().collect()
}

/// Hiragana, Katakana or CJK Unified Ideographs (U+4E00..=U+9FAF)
pub fn is_cjk(c: char) -> bool {
    matches!(
        c,
        '\u{3040}'..='\u{309F}' | '\u{30A0}'..='\u{30FF}' | '\u{4E00}'..='\u{9FAF}'
    )
}

/// ASCII word character or CJK character
pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || is_cjk(c)
}

/// Map a display name to a legal Mermaid identifier.
///
/// The reserved-word and leading-digit checks look at the trimmed name before
/// any character substitution; the substituted result is not checked again.
///
/// ```
/// use keelson::core::sanitize_identifier;
///
/// assert_eq!(sanitize_identifier("end"), "node_end");
/// assert_eq!(sanitize_identifier("1x"), "_1x");
/// assert_eq!(sanitize_identifier("a b"), "a_b");
/// assert_eq!(sanitize_identifier("開始"), "開始");
/// assert_eq!(sanitize_identifier("  "), "node_unnamed");
/// ```
pub fn sanitize_identifier(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return FALLBACK_IDENTIFIER.to_string();
    }

    let mut candidate = if RESERVED_WORDS.contains(&trimmed.to_lowercase().as_str()) {
        format!("{}{}", RESERVED_PREFIX, trimmed)
    } else {
        trimmed.to_string()
    };

    if candidate.starts_with(|c: char| c.is_ascii_digit()) {
        candidate.insert(0, '_');
    }

    let mut sanitized = String::with_capacity(candidate.len());
    let mut in_whitespace = false;
    for c in candidate.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                sanitized.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        sanitized.push(if is_identifier_char(c) { c } else { '_' });
    }

    sanitized
}

/// [`sanitize_identifier`] for a name that may be absent
pub fn sanitize_optional_identifier(name: Option<&str>) -> String {
    sanitize_identifier(name.unwrap_or_default())
}
