//! Lexer: raw source text to an ordered token stream.

mod scanner;
mod token;

pub use scanner::tokenize;
pub use token::{Token, TokenKind};
