use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a variable, parameter, or return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
    /// Signed integer
    Int,
    /// Floating-point number
    Float,
    /// Character string
    String,
    /// Boolean (produced by relational and logical expressions)
    Bool,
    /// No value (declarable as a return type only)
    Void,
    /// Callable function symbol
    Function,
}

impl Type {
    /// Maps a type keyword to its type, `None` for non-type keywords.
    pub fn from_keyword(keyword: &str) -> Option<Type> {
        match keyword {
            "int" => Some(Type::Int),
            "float" => Some(Type::Float),
            "string" => Some(Type::String),
            "void" => Some(Type::Void),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::String => write!(f, "string"),
            Type::Bool => write!(f, "bool"),
            Type::Void => write!(f, "void"),
            Type::Function => write!(f, "function"),
        }
    }
}

/// Complete program: the ordered list of top-level statements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Top-level statements in source order
    pub body: Vec<Statement>,
}

/// A typed function parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    /// Parameter name
    pub name: String,
    /// Declared parameter type
    pub var_type: Type,
}

/// Statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// Typed variable declaration: `int x;` or `int x = expr;`
    VarDecl {
        /// Declared type
        var_type: Type,
        /// Variable name
        name: String,
        /// Optional initializer expression
        init: Option<Expression>,
    },

    /// Assignment to a previously declared variable: `x = expr;`, `x += expr;`
    Assign {
        /// Target variable name
        name: String,
        /// Assignment operator (compound forms carry the arithmetic flavor)
        op: AssignOp,
        /// Value expression
        value: Expression,
    },

    /// Function declaration with a typed parameter list
    FuncDecl {
        /// Declared return type
        return_type: Type,
        /// Function name
        name: String,
        /// Typed parameters in positional order
        params: Vec<Param>,
        /// Body statements
        body: Vec<Statement>,
    },

    /// Statement-position call: `foo(a, b);`
    Call {
        /// Callee name
        name: String,
        /// Argument expressions in positional order
        args: Vec<Expression>,
    },

    /// Return statement inside a function body
    Return {
        /// Value expression
        value: Expression,
    },

    /// Conditional with optional else branch
    If {
        /// Condition expression
        condition: Expression,
        /// Then-branch statements
        body: Vec<Statement>,
        /// Optional else-branch statements (a sibling scope, not nested)
        else_body: Option<Vec<Statement>>,
    },

    /// `for` or `while` loop
    Loop {
        /// Which loop form this is
        kind: LoopKind,
        /// Optional init statement (declaration or assignment; `for` only)
        init: Option<Box<Statement>>,
        /// Optional condition expression
        condition: Option<Expression>,
        /// Optional increment assignment without trailing `;` (`for` only)
        increment: Option<Box<Statement>>,
        /// Body statements
        body: Vec<Statement>,
    },
}

/// Loop forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopKind {
    /// `for (init; condition; increment) { ... }`
    For,
    /// `while (condition) { ... }`
    While,
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Integer literal, original text preserved
    Number(String),
    /// String literal with the surrounding quotes stripped
    Str(String),
    /// Identifier reference
    Ident(String),

    /// Nested call expression: `soma(x, 10)` feeding an enclosing expression
    Call {
        /// Callee name
        name: String,
        /// Argument expressions in positional order
        args: Vec<Expression>,
    },

    /// Binary arithmetic: `+ - * /`
    Arith {
        /// Arithmetic operator
        op: ArithOp,
        /// Left operand
        left: Box<Expression>,
        /// Right operand
        right: Box<Expression>,
    },

    /// Relational comparison, non-associative: at most one per expression
    Relational {
        /// Relational operator
        op: RelOp,
        /// Left operand
        left: Box<Expression>,
        /// Right operand
        right: Box<Expression>,
    },

    /// Logical connective: `&&` or `||`
    Logical {
        /// Logical operator
        op: LogicOp,
        /// Left operand
        left: Box<Expression>,
        /// Right operand
        right: Box<Expression>,
    },

    /// Logical negation: `!expr`, right-associative
    Not(Box<Expression>),
}

/// Assignment operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignOp {
    /// Plain store (=)
    Set,
    /// Add-assign (+=)
    Add,
    /// Subtract-assign (-=)
    Sub,
    /// Multiply-assign (*=)
    Mul,
    /// Divide-assign (/=)
    Div,
}

impl AssignOp {
    /// Maps operator text to an assignment operator.
    pub fn from_symbol(text: &str) -> Option<AssignOp> {
        match text {
            "=" => Some(AssignOp::Set),
            "+=" => Some(AssignOp::Add),
            "-=" => Some(AssignOp::Sub),
            "*=" => Some(AssignOp::Mul),
            "/=" => Some(AssignOp::Div),
            _ => None,
        }
    }
}

impl fmt::Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AssignOp::Set => write!(f, "="),
            AssignOp::Add => write!(f, "+="),
            AssignOp::Sub => write!(f, "-="),
            AssignOp::Mul => write!(f, "*="),
            AssignOp::Div => write!(f, "/="),
        }
    }
}

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArithOp {
    /// Addition (+); also string concatenation between two strings
    Add,
    /// Subtraction (-)
    Sub,
    /// Multiplication (*)
    Mul,
    /// Division (/)
    Div,
}

impl ArithOp {
    /// Maps operator text to an arithmetic operator.
    pub fn from_symbol(text: &str) -> Option<ArithOp> {
        match text {
            "+" => Some(ArithOp::Add),
            "-" => Some(ArithOp::Sub),
            "*" => Some(ArithOp::Mul),
            "/" => Some(ArithOp::Div),
            _ => None,
        }
    }
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArithOp::Add => write!(f, "+"),
            ArithOp::Sub => write!(f, "-"),
            ArithOp::Mul => write!(f, "*"),
            ArithOp::Div => write!(f, "/"),
        }
    }
}

/// Relational operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelOp {
    /// Equality (==)
    Eq,
    /// Inequality (!=)
    NotEq,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    LtEq,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    GtEq,
}

impl RelOp {
    /// Maps operator text to a relational operator.
    pub fn from_symbol(text: &str) -> Option<RelOp> {
        match text {
            "==" => Some(RelOp::Eq),
            "!=" => Some(RelOp::NotEq),
            "<" => Some(RelOp::Lt),
            "<=" => Some(RelOp::LtEq),
            ">" => Some(RelOp::Gt),
            ">=" => Some(RelOp::GtEq),
            _ => None,
        }
    }
}

impl fmt::Display for RelOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RelOp::Eq => write!(f, "=="),
            RelOp::NotEq => write!(f, "!="),
            RelOp::Lt => write!(f, "<"),
            RelOp::LtEq => write!(f, "<="),
            RelOp::Gt => write!(f, ">"),
            RelOp::GtEq => write!(f, ">="),
        }
    }
}

/// Logical operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicOp {
    /// Logical AND (&&)
    And,
    /// Logical OR (||)
    Or,
}

impl LogicOp {
    /// Maps operator text to a logical operator.
    pub fn from_symbol(text: &str) -> Option<LogicOp> {
        match text {
            "&&" => Some(LogicOp::And),
            "||" => Some(LogicOp::Or),
            _ => None,
        }
    }
}

impl fmt::Display for LogicOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LogicOp::And => write!(f, "&&"),
            LogicOp::Or => write!(f, "||"),
        }
    }
}
