use serde::{Deserialize, Serialize};
use std::fmt;

/// Lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// Reserved word: `if else while for function return int float string void`
    Keyword,
    /// Double-quoted, backslash-escaped string literal (quotes included in text)
    String,
    /// Unsigned decimal integer literal
    Integer,
    /// `[A-Za-z_][A-Za-z0-9_]*`, when not a keyword
    Identifier,
    /// `!= == <= >= && || + - * / < > = !` and the `=`-suffixed compound forms
    Operator,
    /// One of `; ( ) , { }`
    Symbol,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenKind::Keyword => write!(f, "keyword"),
            TokenKind::String => write!(f, "string"),
            TokenKind::Integer => write!(f, "integer"),
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::Operator => write!(f, "operator"),
            TokenKind::Symbol => write!(f, "symbol"),
        }
    }
}

/// A single classified lexeme.
///
/// Tokens are immutable and consumed positionally by the parser via an
/// integer cursor; whitespace is never emitted as a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The lexical class
    pub kind: TokenKind,
    /// Original text of the lexeme
    pub text: String,
}

impl Token {
    /// Creates a new token of the given class.
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
