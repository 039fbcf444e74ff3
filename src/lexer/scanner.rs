//! Regex-classification tokenizer.
//!
//! Tokenization is a flat classification step with no state machine: a single
//! alternation of named groups is matched repeatedly over the source text,
//! and each match becomes one token. Group order encodes priority — keywords
//! win over identifiers, compound operators over their prefixes. Whitespace
//! matches are dropped; characters matched by no group are skipped.

use super::token::{Token, TokenKind};
use regex::Regex;

lazy_static::lazy_static! {
    static ref TOKEN_RE: Regex = Regex::new(concat!(
        r"(?P<KEYWORD>\b(?:if|else|while|for|function|return|int|float|string|void)\b)",
        r#"|(?P<STRING>"(?:[^"\\]|\\.)*")"#,
        r"|(?P<INTEGER>\b\d+\b)",
        r"|(?P<IDENTIFIER>\b[a-zA-Z_][a-zA-Z0-9_]*\b)",
        r"|(?P<OPERATOR>!=|==|<=|>=|&&|\|\||[+\-*/<>]=?|=|!)",
        r"|(?P<SYMBOL>[;(),{}])",
        r"|(?P<WHITESPACE>\s+)",
    ))
    .expect("token regex is valid");
}

/// Classification table: named group to token kind, in priority order.
const GROUPS: &[(&str, TokenKind)] = &[
    ("KEYWORD", TokenKind::Keyword),
    ("STRING", TokenKind::String),
    ("INTEGER", TokenKind::Integer),
    ("IDENTIFIER", TokenKind::Identifier),
    ("OPERATOR", TokenKind::Operator),
    ("SYMBOL", TokenKind::Symbol),
];

/// Tokenizes source text into an ordered sequence of classified lexemes.
///
/// Never fails: unrecognized characters are silently skipped, matching the
/// regex-scan semantics the rest of the pipeline expects.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut result = Vec::new();

    for caps in TOKEN_RE.captures_iter(source) {
        for (group, kind) in GROUPS {
            if let Some(m) = caps.name(group) {
                result.push(Token::new(*kind, m.as_str()));
                break;
            }
        }
        // WHITESPACE falls through the table and is discarded.
    }

    result
}
