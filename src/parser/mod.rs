//! Parser: token stream to abstract syntax tree.

pub mod ast;
mod descent;

pub use ast::{
    ArithOp, AssignOp, Expression, LogicOp, LoopKind, Param, Program, RelOp, Statement, Type,
};
pub use descent::{parse, Parser};
