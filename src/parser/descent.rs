//! Recursive-descent parser with two tokens of lookahead.
//!
//! Statement dispatch disambiguates on the token after the next one: a type
//! keyword followed by an identifier and `(` opens a function declaration,
//! otherwise a variable declaration; an identifier followed by `(` is a call
//! statement, otherwise an assignment. Expressions use precedence climbing,
//! lowest to highest binding: logical, relational (non-associative), `!`,
//! additive, multiplicative, primary. Parsing stops at the first failure —
//! there is no error recovery.

use super::ast::{
    ArithOp, AssignOp, Expression, LogicOp, LoopKind, Param, Program, RelOp, Statement, Type,
};
use crate::error::{Error, Result};
use crate::lexer::{Token, TokenKind};

/// Recursive-descent parser over a classified token stream.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    /// Creates a parser positioned at the first token.
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, current: 0 }
    }

    /// Parses the whole token stream into a program.
    pub fn parse(&mut self) -> Result<Program> {
        let mut body = Vec::new();

        while let Some(token) = self.peek() {
            if token.text == "}" {
                break;
            }
            body.push(self.parse_statement()?);
        }

        Ok(Program { body })
    }

    // === Statements ===

    fn parse_statement(&mut self) -> Result<Statement> {
        let token = match self.peek() {
            Some(token) => token,
            None => {
                return Err(Error::UnexpectedEof {
                    expected: "a statement".to_string(),
                })
            }
        };

        match token.kind {
            TokenKind::Keyword => match token.text.as_str() {
                "int" | "float" | "string" | "void" => {
                    let declares_function = matches!(
                        self.peek_at(1),
                        Some(next) if next.kind == TokenKind::Identifier
                    ) && matches!(self.peek_at(2), Some(next) if next.text == "(");

                    if declares_function {
                        self.parse_func_decl()
                    } else {
                        self.parse_var_decl()
                    }
                }
                "if" => self.parse_if(),
                "while" | "for" => self.parse_loop(),
                _ => Err(self.syntax_error("a statement")),
            },
            TokenKind::Identifier => {
                if matches!(self.peek_at(1), Some(next) if next.text == "(") {
                    self.parse_call_statement()
                } else {
                    self.parse_assign(true)
                }
            }
            _ => Err(self.syntax_error("a statement")),
        }
    }

    fn parse_var_decl(&mut self) -> Result<Statement> {
        let var_type = self.parse_type()?;
        let name = self.consume_kind(TokenKind::Identifier)?.text;

        let init = if self.check_text("=") {
            self.advance();
            Some(self.parse_additive()?)
        } else {
            None
        };

        self.consume_text(";")?;
        Ok(Statement::VarDecl {
            var_type,
            name,
            init,
        })
    }

    /// Parses `name op value`; the trailing `;` is skipped for the increment
    /// slot of a `for` header.
    fn parse_assign(&mut self, consume_semi: bool) -> Result<Statement> {
        let name = self.consume_kind(TokenKind::Identifier)?.text;
        let op_token = self.consume_kind(TokenKind::Operator)?;
        let op = AssignOp::from_symbol(&op_token.text).ok_or_else(|| Error::Syntax {
            expected: "an assignment operator".to_string(),
            found: op_token.text.clone(),
        })?;

        let value = self.parse_additive()?;
        if consume_semi {
            self.consume_text(";")?;
        }

        Ok(Statement::Assign { name, op, value })
    }

    fn parse_if(&mut self) -> Result<Statement> {
        self.consume_text("if")?;
        self.consume_text("(")?;
        let condition = self.parse_logical()?;
        self.consume_text(")")?;

        let body = self.parse_block()?;

        let else_body = if self.check_text("else") {
            self.advance();
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Statement::If {
            condition,
            body,
            else_body,
        })
    }

    fn parse_loop(&mut self) -> Result<Statement> {
        let keyword = self.consume_kind(TokenKind::Keyword)?;

        match keyword.text.as_str() {
            "for" => {
                self.consume_text("(")?;

                // Init: declaration or assignment, each consuming its own `;`.
                let init = match self.peek() {
                    Some(token) if token.kind == TokenKind::Keyword => {
                        Some(Box::new(self.parse_var_decl()?))
                    }
                    Some(token) if token.kind == TokenKind::Identifier => {
                        Some(Box::new(self.parse_assign(true)?))
                    }
                    _ => {
                        self.consume_text(";")?;
                        None
                    }
                };

                let condition = if self.check_text(";") {
                    None
                } else {
                    Some(self.parse_logical()?)
                };
                self.consume_text(";")?;

                let increment = if self.check_text(")") {
                    None
                } else {
                    Some(Box::new(self.parse_assign(false)?))
                };
                self.consume_text(")")?;

                let body = self.parse_block()?;

                Ok(Statement::Loop {
                    kind: LoopKind::For,
                    init,
                    condition,
                    increment,
                    body,
                })
            }
            "while" => {
                self.consume_text("(")?;
                let condition = self.parse_logical()?;
                self.consume_text(")")?;

                let body = self.parse_block()?;

                Ok(Statement::Loop {
                    kind: LoopKind::While,
                    init: None,
                    condition: Some(condition),
                    increment: None,
                    body,
                })
            }
            _ => Err(Error::Syntax {
                expected: "`for` or `while`".to_string(),
                found: keyword.text,
            }),
        }
    }

    fn parse_func_decl(&mut self) -> Result<Statement> {
        let return_type = self.parse_type()?;
        let name = self.consume_kind(TokenKind::Identifier)?.text;
        self.consume_text("(")?;

        let mut params = Vec::new();
        while !self.check_text(")") {
            let var_type = self.parse_type()?;
            let param_name = self.consume_kind(TokenKind::Identifier)?.text;
            params.push(Param {
                name: param_name,
                var_type,
            });

            if self.check_text(",") {
                self.advance();
            } else {
                break;
            }
        }

        self.consume_text(")")?;
        self.consume_text("{")?;

        // Only function bodies admit `return`, distinguished syntactically
        // from generic statements.
        let mut body = Vec::new();
        while let Some(token) = self.peek() {
            if token.text == "}" {
                break;
            }
            if token.text == "return" {
                body.push(self.parse_return()?);
            } else {
                body.push(self.parse_statement()?);
            }
        }

        self.consume_text("}")?;

        Ok(Statement::FuncDecl {
            return_type,
            name,
            params,
            body,
        })
    }

    fn parse_return(&mut self) -> Result<Statement> {
        self.consume_text("return")?;
        let value = self.parse_additive()?;
        self.consume_text(";")?;
        Ok(Statement::Return { value })
    }

    fn parse_call_statement(&mut self) -> Result<Statement> {
        let name = self.consume_kind(TokenKind::Identifier)?.text;
        let args = self.parse_call_args()?;
        self.consume_text(";")?;
        Ok(Statement::Call { name, args })
    }

    /// Parses `( expr, expr, ... )` after a callee name.
    fn parse_call_args(&mut self) -> Result<Vec<Expression>> {
        self.consume_text("(")?;

        let mut args = Vec::new();
        while !self.check_text(")") {
            args.push(self.parse_additive()?);

            if self.check_text(",") {
                self.advance();
            } else {
                break;
            }
        }

        self.consume_text(")")?;
        Ok(args)
    }

    // === Expressions, lowest to highest binding ===

    fn parse_logical(&mut self) -> Result<Expression> {
        let mut left = self.parse_relational()?;

        while let Some(op) = self.peek().and_then(|t| LogicOp::from_symbol(&t.text)) {
            self.advance();
            let right = self.parse_relational()?;
            left = Expression::Logical {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Non-associative: at most one relational operator per expression.
    fn parse_relational(&mut self) -> Result<Expression> {
        let left = self.parse_not()?;

        if let Some(op) = self.peek().and_then(|t| RelOp::from_symbol(&t.text)) {
            self.advance();
            let right = self.parse_not()?;
            return Ok(Expression::Relational {
                op,
                left: Box::new(left),
                right: Box::new(right),
            });
        }

        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expression> {
        if self.check_text("!") {
            self.advance();
            let value = self.parse_not()?;
            return Ok(Expression::Not(Box::new(value)));
        }

        self.parse_additive()
    }

    fn parse_additive(&mut self) -> Result<Expression> {
        let mut left = self.parse_multiplicative()?;

        while let Some(op) = self
            .peek()
            .and_then(|t| ArithOp::from_symbol(&t.text))
            .filter(|op| matches!(op, ArithOp::Add | ArithOp::Sub))
        {
            self.advance();
            let right = self.parse_multiplicative()?;
            left = Expression::Arith {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expression> {
        let mut left = self.parse_primary()?;

        while let Some(op) = self
            .peek()
            .and_then(|t| ArithOp::from_symbol(&t.text))
            .filter(|op| matches!(op, ArithOp::Mul | ArithOp::Div))
        {
            self.advance();
            let right = self.parse_primary()?;
            left = Expression::Arith {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        let token = match self.peek() {
            Some(token) => token,
            None => {
                return Err(Error::UnexpectedEof {
                    expected: "an expression".to_string(),
                })
            }
        };

        if token.text == "(" {
            self.advance();
            let inner = self.parse_additive()?;
            self.consume_text(")")?;
            return Ok(inner);
        }

        match token.kind {
            TokenKind::Integer => {
                let text = self.advance().expect("peeked").text;
                Ok(Expression::Number(text))
            }
            TokenKind::String => {
                let text = self.advance().expect("peeked").text;
                Ok(Expression::Str(strip_quotes(&text)))
            }
            TokenKind::Identifier => {
                // An identifier followed by `(` is a nested call expression,
                // letting call results feed arithmetic and assignments.
                if matches!(self.peek_at(1), Some(next) if next.text == "(") {
                    let name = self.advance().expect("peeked").text;
                    let args = self.parse_call_args()?;
                    return Ok(Expression::Call { name, args });
                }
                let name = self.advance().expect("peeked").text;
                Ok(Expression::Ident(name))
            }
            _ => Err(self.syntax_error("an expression")),
        }
    }

    // === Cursor helpers ===

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.current + offset)
    }

    fn check_text(&self, text: &str) -> bool {
        matches!(self.peek(), Some(token) if token.text == text)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.current).cloned();
        if token.is_some() {
            self.current += 1;
        }
        token
    }

    fn consume_kind(&mut self, kind: TokenKind) -> Result<Token> {
        match self.peek() {
            Some(token) if token.kind == kind => Ok(self.advance().expect("peeked")),
            Some(token) => Err(Error::Syntax {
                expected: kind.to_string(),
                found: token.text.clone(),
            }),
            None => Err(Error::UnexpectedEof {
                expected: kind.to_string(),
            }),
        }
    }

    fn consume_text(&mut self, text: &str) -> Result<Token> {
        match self.peek() {
            Some(token) if token.text == text => Ok(self.advance().expect("peeked")),
            Some(token) => Err(Error::Syntax {
                expected: format!("`{text}`"),
                found: token.text.clone(),
            }),
            None => Err(Error::UnexpectedEof {
                expected: format!("`{text}`"),
            }),
        }
    }

    fn parse_type(&mut self) -> Result<Type> {
        let keyword = self.consume_kind(TokenKind::Keyword)?;
        Type::from_keyword(&keyword.text).ok_or(Error::Syntax {
            expected: "a type keyword".to_string(),
            found: keyword.text,
        })
    }

    fn parse_block(&mut self) -> Result<Vec<Statement>> {
        self.consume_text("{")?;

        let mut body = Vec::new();
        while let Some(token) = self.peek() {
            if token.text == "}" {
                break;
            }
            body.push(self.parse_statement()?);
        }

        self.consume_text("}")?;
        Ok(body)
    }

    fn syntax_error(&self, expected: impl Into<String>) -> Error {
        match self.peek() {
            Some(token) => Error::Syntax {
                expected: expected.into(),
                found: token.text.clone(),
            },
            None => Error::UnexpectedEof {
                expected: expected.into(),
            },
        }
    }
}

/// Parses a token stream into a program.
pub fn parse(tokens: Vec<Token>) -> Result<Program> {
    Parser::new(tokens).parse()
}

fn strip_quotes(text: &str) -> String {
    text.trim_start_matches('"')
        .trim_end_matches('"')
        .to_string()
}
