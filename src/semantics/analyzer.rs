//! Semantic analysis: scope building, declaration checking, type inference.
//!
//! A single pre-order, left-to-right walk over the AST, threading the current
//! scope. Names must be declared before the use is visited — there is no
//! hoisting and no forward reference. Analysis fails fast with the first
//! violation found and never mutates the AST.
//!
//! A function's `return` value type is deliberately not checked against the
//! declared return type (untyped return contract).

use super::symbol_table::{ScopeId, Symbol, SymbolTable};
use crate::error::{Error, Result};
use crate::parser::ast::{ArithOp, Expression, Program, Statement, Type};

/// Analyzes a program against a fresh symbol table.
pub fn analyze(program: &Program) -> Result<()> {
    SemanticAnalyzer::new().analyze(program)
}

/// Tree-walking analyzer over a validated-by-parsing AST.
pub struct SemanticAnalyzer {
    table: SymbolTable,
}

impl SemanticAnalyzer {
    /// Creates an analyzer with an empty global scope.
    pub fn new() -> Self {
        SemanticAnalyzer {
            table: SymbolTable::new(),
        }
    }

    /// Checks the whole program. The scope tree is rebuilt from scratch on
    /// every call, so repeated runs over the same AST give the same outcome.
    pub fn analyze(&mut self, program: &Program) -> Result<()> {
        self.table = SymbolTable::new();
        let global = SymbolTable::global();

        for stmt in &program.body {
            self.check_statement(stmt, global)?;
        }

        Ok(())
    }

    fn check_statement(&mut self, stmt: &Statement, scope: ScopeId) -> Result<()> {
        match stmt {
            Statement::VarDecl {
                var_type,
                name,
                init,
            } => {
                // Declared before the initializer is inferred; same-scope
                // variable redeclaration overwrites and is permitted.
                self.table
                    .declare(scope, Symbol::variable(name.clone(), *var_type));

                if let Some(init) = init {
                    let found = self.infer_type(init, scope)?;
                    if found != *var_type {
                        return Err(Error::InitTypeMismatch {
                            name: name.clone(),
                            expected: *var_type,
                            found,
                        });
                    }
                    self.check_expression(init, scope)?;
                }

                Ok(())
            }

            Statement::Assign { name, value, .. } => {
                let declared = match self.table.lookup(scope, name) {
                    Some(symbol) => symbol.ty,
                    None => {
                        return Err(Error::Undeclared { name: name.clone() });
                    }
                };

                let found = self.infer_type(value, scope)?;
                if found != declared {
                    return Err(Error::AssignTypeMismatch {
                        name: name.clone(),
                        expected: declared,
                        found,
                    });
                }

                self.check_expression(value, scope)
            }

            Statement::FuncDecl {
                return_type,
                name,
                params,
                body,
            } => {
                if self.table.lookup(scope, name).is_some() {
                    return Err(Error::Redeclared { name: name.clone() });
                }

                // Declared before the body is visited, so the body may
                // recurse into the function.
                self.table.declare(
                    scope,
                    Symbol::function(name.clone(), params.clone(), *return_type),
                );

                let inner = self.table.new_scope(scope);
                for param in params {
                    self.table
                        .declare(inner, Symbol::variable(param.name.clone(), param.var_type));
                }

                for stmt in body {
                    self.check_statement(stmt, inner)?;
                }

                Ok(())
            }

            Statement::Call { name, args } => {
                self.check_call(name, args, scope)?;
                Ok(())
            }

            Statement::Return { value } => {
                // The inferred type is not compared against the declared
                // return type, but inference still surfaces operand errors.
                self.infer_type(value, scope)?;
                self.check_expression(value, scope)?;

                // Redundant with the expression check above; kept as a final
                // guard on the bare-identifier case.
                if let Expression::Ident(name) = value {
                    if self.table.lookup(scope, name).is_none() {
                        return Err(Error::Undeclared { name: name.clone() });
                    }
                }

                Ok(())
            }

            Statement::If {
                condition,
                body,
                else_body,
            } => {
                self.check_expression(condition, scope)?;

                let then_scope = self.table.new_scope(scope);
                for stmt in body {
                    self.check_statement(stmt, then_scope)?;
                }

                // The else branch gets its own sibling scope, not a child of
                // the then branch.
                if let Some(else_body) = else_body {
                    let else_scope = self.table.new_scope(scope);
                    for stmt in else_body {
                        self.check_statement(stmt, else_scope)?;
                    }
                }

                Ok(())
            }

            Statement::Loop {
                init,
                condition,
                increment,
                body,
                ..
            } => {
                // One scope for the whole loop: a counter declared in the
                // init is visible to the condition, increment, and body.
                let inner = self.table.new_scope(scope);

                if let Some(init) = init {
                    self.check_statement(init, inner)?;
                }
                if let Some(condition) = condition {
                    self.check_expression(condition, inner)?;
                }
                if let Some(increment) = increment {
                    self.check_statement(increment, inner)?;
                }
                for stmt in body {
                    self.check_statement(stmt, inner)?;
                }

                Ok(())
            }
        }
    }

    fn check_expression(&self, expr: &Expression, scope: ScopeId) -> Result<()> {
        match expr {
            Expression::Number(_) | Expression::Str(_) => Ok(()),

            Expression::Ident(name) => {
                if self.table.lookup(scope, name).is_none() {
                    return Err(Error::Undeclared { name: name.clone() });
                }
                Ok(())
            }

            Expression::Arith { left, right, .. }
            | Expression::Relational { left, right, .. }
            | Expression::Logical { left, right, .. } => {
                self.check_expression(left, scope)?;
                self.check_expression(right, scope)
            }

            Expression::Not(value) => self.check_expression(value, scope),

            Expression::Call { name, args } => {
                self.check_call(name, args, scope)?;
                Ok(())
            }
        }
    }

    /// Validates a call site and yields the callee's declared return type.
    /// Shared between statement-position calls and call expressions.
    fn check_call(&self, name: &str, args: &[Expression], scope: ScopeId) -> Result<Type> {
        let func = self
            .table
            .lookup(scope, name)
            .ok_or_else(|| Error::Undeclared {
                name: name.to_string(),
            })?;

        if func.ty != Type::Function {
            return Err(Error::NotCallable {
                name: name.to_string(),
            });
        }

        if args.len() != func.params.len() {
            return Err(Error::Arity {
                name: name.to_string(),
                expected: func.params.len(),
                received: args.len(),
            });
        }

        for (index, (arg, param)) in args.iter().zip(&func.params).enumerate() {
            let found = self.infer_type(arg, scope)?;
            if found != param.var_type {
                return Err(Error::ArgumentType {
                    name: name.to_string(),
                    index: index + 1,
                    expected: param.var_type,
                    found,
                });
            }
        }

        Ok(func.return_type.unwrap_or(Type::Void))
    }

    /// Infers the type of an expression without mutating any state.
    fn infer_type(&self, expr: &Expression, scope: ScopeId) -> Result<Type> {
        match expr {
            Expression::Number(_) => Ok(Type::Int),
            Expression::Str(_) => Ok(Type::String),

            Expression::Ident(name) => self
                .table
                .lookup(scope, name)
                .map(|symbol| symbol.ty)
                .ok_or_else(|| Error::Undeclared { name: name.clone() }),

            Expression::Arith { op, left, right } => {
                let left = self.infer_type(left, scope)?;
                let right = self.infer_type(right, scope)?;

                if *op == ArithOp::Add {
                    // `+` doubles as concatenation, but never mixes types.
                    return match (left, right) {
                        (Type::Int, Type::Int) => Ok(Type::Int),
                        (Type::String, Type::String) => Ok(Type::String),
                        _ => Err(Error::InvalidOperands {
                            op: *op,
                            left,
                            right,
                        }),
                    };
                }

                if left != Type::Int || right != Type::Int {
                    return Err(Error::InvalidOperands {
                        op: *op,
                        left,
                        right,
                    });
                }
                Ok(Type::Int)
            }

            Expression::Relational { left, right, .. } => {
                let left = self.infer_type(left, scope)?;
                let right = self.infer_type(right, scope)?;

                if left != right {
                    return Err(Error::InvalidComparison { left, right });
                }
                Ok(Type::Bool)
            }

            Expression::Logical { op, left, right } => {
                let left = self.infer_type(left, scope)?;
                let right = self.infer_type(right, scope)?;

                if left != Type::Bool || right != Type::Bool {
                    return Err(Error::LogicalOperands {
                        op: *op,
                        left,
                        right,
                    });
                }
                Ok(Type::Bool)
            }

            Expression::Not(value) => {
                let found = self.infer_type(value, scope)?;
                if found != Type::Bool {
                    return Err(Error::InvalidNegation { found });
                }
                Ok(Type::Bool)
            }

            Expression::Call { name, args } => self.check_call(name, args, scope),
        }
    }
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
