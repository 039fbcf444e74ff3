//! Lexical scope tree backed by an arena.
//!
//! Scopes live in a flat `Vec` and refer to their enclosing scope by index,
//! never by owning pointer. Lookup walks outward through parents; the first
//! match wins, so inner declarations shadow outer ones. The whole tree is
//! built and discarded within one analysis pass.

use crate::parser::ast::{Param, Type};
use std::collections::HashMap;

/// A declared name: variable, parameter, or function.
#[derive(Debug, Clone)]
pub struct Symbol {
    /// Declared name
    pub name: String,
    /// Declared type (`Type::Function` for functions)
    pub ty: Type,
    /// Typed parameter list, empty for non-functions
    pub params: Vec<Param>,
    /// Declared return type, `None` for non-functions
    pub return_type: Option<Type>,
}

impl Symbol {
    /// Creates a variable or parameter symbol.
    pub fn variable(name: impl Into<String>, ty: Type) -> Self {
        Symbol {
            name: name.into(),
            ty,
            params: Vec::new(),
            return_type: None,
        }
    }

    /// Creates a function symbol carrying its signature.
    pub fn function(name: impl Into<String>, params: Vec<Param>, return_type: Type) -> Self {
        Symbol {
            name: name.into(),
            ty: Type::Function,
            params,
            return_type: Some(return_type),
        }
    }
}

/// Index of a scope in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeId(usize);

/// One scope record: a name map plus a parent index.
#[derive(Debug, Default)]
pub struct Scope {
    symbols: HashMap<String, Symbol>,
    parent: Option<ScopeId>,
}

/// Arena of scope records rooted at the global scope.
#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
}

impl SymbolTable {
    /// Creates a table containing only the global scope.
    pub fn new() -> Self {
        SymbolTable {
            scopes: vec![Scope::default()],
        }
    }

    /// The root scope, parent of everything.
    pub fn global() -> ScopeId {
        ScopeId(0)
    }

    /// Opens a fresh child scope of `parent`.
    pub fn new_scope(&mut self, parent: ScopeId) -> ScopeId {
        self.scopes.push(Scope {
            symbols: HashMap::new(),
            parent: Some(parent),
        });
        ScopeId(self.scopes.len() - 1)
    }

    /// Declares a symbol in `scope`. A repeated name within the same scope
    /// overwrites the previous entry; redeclaration policy is the analyzer's
    /// concern, not the table's.
    pub fn declare(&mut self, scope: ScopeId, symbol: Symbol) {
        self.scopes[scope.0]
            .symbols
            .insert(symbol.name.clone(), symbol);
    }

    /// Resolves `name` starting at `scope` and walking outward through
    /// parents; first match wins.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<&Symbol> {
        let mut cursor = Some(scope);

        while let Some(id) = cursor {
            let record = &self.scopes[id.0];
            if let Some(symbol) = record.symbols.get(name) {
                return Some(symbol);
            }
            cursor = record.parent;
        }

        None
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_walks_parent_chain() {
        let mut table = SymbolTable::new();
        let global = SymbolTable::global();
        table.declare(global, Symbol::variable("x", Type::Int));

        let inner = table.new_scope(global);
        let innermost = table.new_scope(inner);

        assert_eq!(table.lookup(innermost, "x").unwrap().ty, Type::Int);
        assert!(table.lookup(innermost, "y").is_none());
    }

    #[test]
    fn test_inner_declaration_shadows_outer() {
        let mut table = SymbolTable::new();
        let global = SymbolTable::global();
        table.declare(global, Symbol::variable("x", Type::Int));

        let inner = table.new_scope(global);
        table.declare(inner, Symbol::variable("x", Type::String));

        assert_eq!(table.lookup(inner, "x").unwrap().ty, Type::String);
        assert_eq!(table.lookup(global, "x").unwrap().ty, Type::Int);
    }

    #[test]
    fn test_sibling_scopes_do_not_leak() {
        let mut table = SymbolTable::new();
        let global = SymbolTable::global();

        let then_scope = table.new_scope(global);
        let else_scope = table.new_scope(global);
        table.declare(then_scope, Symbol::variable("y", Type::Int));

        assert!(table.lookup(else_scope, "y").is_none());
        assert!(table.lookup(global, "y").is_none());
    }

    #[test]
    fn test_function_symbol_carries_signature() {
        let mut table = SymbolTable::new();
        let global = SymbolTable::global();
        table.declare(
            global,
            Symbol::function(
                "soma",
                vec![
                    Param {
                        name: "a".to_string(),
                        var_type: Type::Int,
                    },
                    Param {
                        name: "b".to_string(),
                        var_type: Type::Int,
                    },
                ],
                Type::Int,
            ),
        );

        let soma = table.lookup(global, "soma").unwrap();
        assert_eq!(soma.ty, Type::Function);
        assert_eq!(soma.params.len(), 2);
        assert_eq!(soma.return_type, Some(Type::Int));
    }
}
