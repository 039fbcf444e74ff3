//! Error types for the minicc compilation pipeline

use crate::parser::ast::{ArithOp, LogicOp, Type};
use thiserror::Error;

/// Compilation errors, one variant family per pipeline stage.
///
/// Every stage fails fast: the first violation encountered in source order
/// aborts the compilation attempt, and downstream stages never run.
#[derive(Error, Debug, Clone)]
pub enum Error {
    // Parse errors
    /// Expected token class or text absent at the cursor
    ///
    /// **Triggered by:** a statement or expression missing a required token
    /// **Example:** `int x 5;` (missing `=` between name and initializer)
    #[error("syntax error: expected {expected}, found `{found}`")]
    Syntax {
        /// Description of the expected token class or text
        expected: String,
        /// Text of the token actually found
        found: String,
    },

    /// Token stream exhausted while a construct was still open
    #[error("syntax error: unexpected end of input (expected {expected})")]
    UnexpectedEof {
        /// Description of the expected token class or text
        expected: String,
    },

    // Semantic errors
    /// Identifier or function used without a prior declaration
    ///
    /// **Triggered by:** using a name before its declaration is visited, or
    /// after its enclosing block scope has ended
    #[error("undeclared identifier `{name}`")]
    Undeclared {
        /// The unresolved name
        name: String,
    },

    /// Function name declared twice in the same scope chain
    #[error("function `{name}` is already declared")]
    Redeclared {
        /// The function name
        name: String,
    },

    /// Call target resolves to a non-function symbol
    #[error("identifier `{name}` is not a function")]
    NotCallable {
        /// The callee name
        name: String,
    },

    /// Declared type and initializer type disagree
    ///
    /// **Example:** `int x = "a";`
    #[error("variable `{name}` of type `{expected}` cannot be initialized with a value of type `{found}`")]
    InitTypeMismatch {
        /// Variable being declared
        name: String,
        /// Declared type
        expected: Type,
        /// Inferred initializer type
        found: Type,
    },

    /// Assigned value type disagrees with the symbol's declared type
    #[error("variable `{name}` of type `{expected}` cannot be assigned a value of type `{found}`")]
    AssignTypeMismatch {
        /// Variable being assigned
        name: String,
        /// Declared type
        expected: Type,
        /// Inferred value type
        found: Type,
    },

    /// Arithmetic operator applied to incompatible operand types
    ///
    /// `+` accepts `int + int` or `string + string`; every other arithmetic
    /// operator requires both operands to be `int`.
    #[error("operator `{op}` is not valid between `{left}` and `{right}`")]
    InvalidOperands {
        /// The offending operator
        op: ArithOp,
        /// Left operand type
        left: Type,
        /// Right operand type
        right: Type,
    },

    /// Relational comparison between operands of different types
    #[error("comparison between incompatible types `{left}` and `{right}`")]
    InvalidComparison {
        /// Left operand type
        left: Type,
        /// Right operand type
        right: Type,
    },

    /// Logical operator applied to non-boolean operands
    #[error("logical operator `{op}` requires `bool` operands, received `{left}` and `{right}`")]
    LogicalOperands {
        /// The offending operator
        op: LogicOp,
        /// Left operand type
        left: Type,
        /// Right operand type
        right: Type,
    },

    /// Negation applied to a non-boolean operand
    #[error("negation `!` requires a `bool` operand, received `{found}`")]
    InvalidNegation {
        /// Inferred operand type
        found: Type,
    },

    /// Call argument count differs from the parameter count
    #[error("function `{name}` expects {expected} argument(s), received {received}")]
    Arity {
        /// The callee name
        name: String,
        /// Declared parameter count
        expected: usize,
        /// Argument count at the call site
        received: usize,
    },

    /// Call argument type differs from the parameter's declared type
    ///
    /// Positions are 1-indexed in the message.
    #[error("argument {index} in call to `{name}` has the wrong type: expected `{expected}`, received `{found}`")]
    ArgumentType {
        /// The callee name
        name: String,
        /// 1-indexed argument position
        index: usize,
        /// Parameter's declared type
        expected: Type,
        /// Inferred argument type
        found: Type,
    },
}

/// Result type for minicc operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for errors raised by the parser rather than the analyzer.
    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::Syntax { .. } | Error::UnexpectedEof { .. })
    }
}
