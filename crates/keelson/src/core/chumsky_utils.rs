//! Shared chumsky parser utilities for Mermaid line grammars
//!
//! Both diagram families parse one trimmed line at a time, so these helpers
//! deal with inline whitespace only and never consume newlines.

use chumsky::prelude::*;

use super::sanitize::is_identifier_char;

/// Identifier: ASCII letters, digits, `_` and CJK characters
pub fn identifier<'src>() -> impl Parser<'src, &'src str, &'src str> + Clone {
    any()
        .filter(|c: &char| is_identifier_char(*c))
        .repeated()
        .at_least(1)
        .to_slice()
}

/// ASCII word (`\w+`): letters, digits and `_`
pub fn word<'src>() -> impl Parser<'src, &'src str, &'src str> + Clone {
    any()
        .filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_')
        .repeated()
        .at_least(1)
        .to_slice()
}

/// Parse inline whitespace only (spaces and tabs, no newlines).
pub fn inline_whitespace<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    just(' ').or(just('\t')).repeated().ignored()
}

/// Parse at least one space or tab.
pub fn inline_whitespace_required<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    just(' ').or(just('\t')).repeated().at_least(1).ignored()
}

/// Double-quoted string with `\"` escapes; yields the unescaped content
pub fn quoted_string<'src>() -> impl Parser<'src, &'src str, String> + Clone {
    let escaped_quote = just("\\\"").to('"');

    just('"')
        .ignore_then(escaped_quote.or(none_of('"')).repeated().collect::<String>())
        .then_ignore(just('"'))
}

/// Everything up to (not including) the first occurrence of `terminator`
pub fn text_until<'src>(terminator: &'static str) -> impl Parser<'src, &'src str, &'src str> + Clone {
    any().and_is(just(terminator).not()).repeated().to_slice()
}

/// Everything up to a `terminator` that ends the input
pub fn text_until_final<'src>(
    terminator: &'static str,
) -> impl Parser<'src, &'src str, &'src str> + Clone {
    any()
        .and_is(just(terminator).then(end()).not())
        .repeated()
        .to_slice()
}

/// Strip one pair of surrounding double quotes and unescape `\"`
pub fn unquote(text: &str) -> String {
    let text = text.trim();
    match text
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\\\"", "\""),
        _ => text.to_string(),
    }
}
