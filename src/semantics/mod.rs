//! Semantic analysis: scopes, declaration-before-use, and type checking.

mod analyzer;
mod symbol_table;

pub use analyzer::{analyze, SemanticAnalyzer};
pub use symbol_table::{Scope, ScopeId, Symbol, SymbolTable};
