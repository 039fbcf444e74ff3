#![allow(dead_code, unused_imports, missing_docs)]
//! # Minicc - A Miniature C-like Language Front End
//!
//! [![License: MIT](https://img.shields.io/badge/License-MIT-yellow.svg)](https://opensource.org/licenses/MIT)
//!
//! A compact compiler front end for a **C-like procedural language**:
//! regex-driven tokenizer, recursive-descent parser, scope-aware semantic
//! analyzer, and a three-address-code generator with a naive RISC-V
//! emitter on the back.
//!
//! ## Quick Start
//!
//! Run the whole pipeline with [`compile`]:
//!
//! ```rust
//! use minicc::{compile, render};
//!
//! # fn main() -> minicc::Result<()> {
//! let code = compile("int x = 2; int y; y = x + 3;")?;
//! let listing = render(&code);
//! assert!(listing.contains("t1 = t1 + 3"));
//! # Ok(())
//! # }
//! ```
//!
//! Or drive the stages individually:
//!
//! ```rust
//! use minicc::{analyze, generate, parse, tokenize};
//!
//! # fn main() -> minicc::Result<()> {
//! let tokens = tokenize("int soma(int a, int b) { return a + b; }");
//! let program = parse(tokens)?;
//! analyze(&program)?;
//! let code = generate(&program);
//! assert!(!code.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Source → Tokenizer → Tokens → Parser → AST → Analyzer → AST → Generator → TAC → Emitter → Assembly
//! ```
//!
//! ### Main Components
//!
//! - [`tokenize`] - Regex-alternation tokenizer; never fails, unknown
//!   characters are skipped
//! - [`parse`] / [`Parser`] - Recursive-descent parser with two-token
//!   lookahead producing the [`Program`] AST
//! - [`analyze`] / [`SemanticAnalyzer`] - Declare-before-use checking and
//!   bottom-up type inference over a parent-linked scope arena
//! - [`generate`] / [`IrGenerator`] - Lowering to flat three-address code
//!   with a six-slot temporary pool
//! - [`emit_assembly`] - RISC-V-flavored assembler text from the TAC
//!   listing
//!
//! ## Language Overview
//!
//! Declarations are typed (`int`, `float`, `string`, `void`), statements
//! are semicolon-terminated, and blocks are brace-delimited. The language
//! has `if`/`else`, `for` and `while` loops, function declarations with
//! typed positional parameters, calls in statement and expression
//! position, and `return` inside function bodies. Expressions cover
//! arithmetic (`+ - * /`), non-associative comparison
//! (`== != < > <= >=`), logical connectives (`&& ||`), and negation
//! (`!`).

use tracing::debug;

/// Crate version, from the manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod backend;
pub mod error;
pub mod ir;
pub mod lexer;
pub mod parser;
pub mod semantics;

// Re-export main types for convenience
pub use backend::emit_assembly;
pub use error::{Error, Result};
pub use ir::{generate, render, Instruction, IrGenerator, Operand};
pub use lexer::{tokenize, Token, TokenKind};
pub use parser::{Expression, Param, Parser, Program, Statement, Type, parse};
pub use semantics::{analyze, SemanticAnalyzer, SymbolTable};

/// Runs the full front end over `source`: tokenize, parse, analyze, and
/// lower to TAC. Returns the instruction list, or the first error the
/// parser or analyzer reports. No IR is produced for a program that fails
/// analysis.
pub fn compile(source: &str) -> Result<Vec<Instruction>> {
    let tokens = tokenize(source);
    debug!(tokens = tokens.len(), "tokenized source");

    let program = parse(tokens)?;
    debug!(statements = program.body.len(), "parsed program");

    analyze(&program)?;

    let code = generate(&program);
    debug!(instructions = code.len(), "generated TAC");
    Ok(code)
}
