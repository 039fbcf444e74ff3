//! Three-address-code instruction definitions.

use crate::parser::ast::{ArithOp, LogicOp, RelOp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value position in a TAC instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    /// Literal carried through from the source text
    Immediate(String),
    /// Generator-synthesized register name (`t1..t6`, or `a0..a6` for a
    /// call result and parameter bindings)
    Temporary(String),
    /// Program identifier resolved by the backend
    Named(String),
}

impl Operand {
    /// True for generator-synthesized registers.
    pub fn is_temporary(&self) -> bool {
        matches!(self, Operand::Temporary(_))
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operand::Immediate(text) | Operand::Temporary(text) | Operand::Named(text) => {
                write!(f, "{text}")
            }
        }
    }
}

/// TAC instruction: at most one operation, explicit operands, explicit
/// destination. Emitted append-only in generation order; the backend must
/// process the list in order and resolve label targets itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    /// Bind a variable name to its initial value
    Decl {
        /// Variable name
        name: String,
        /// Lowered initial value (`0` when the source omits one)
        value: Operand,
    },
    /// Store a value into a name (or into a materialized address temporary)
    Assign {
        /// Store target
        name: String,
        /// Lowered value
        value: Operand,
    },
    /// Binary arithmetic: `dest = left op right`
    Arith {
        /// Arithmetic operator
        op: ArithOp,
        /// Left operand
        left: Operand,
        /// Right operand
        right: Operand,
        /// Destination temporary
        dest: String,
    },
    /// Logical connective: `dest = left op right`
    Logical {
        /// Logical operator
        op: LogicOp,
        /// Left operand
        left: Operand,
        /// Right operand
        right: Operand,
        /// Destination temporary
        dest: String,
    },
    /// Relational comparison: `dest = left op right`
    Relational {
        /// Relational operator
        op: RelOp,
        /// Left operand
        left: Operand,
        /// Right operand
        right: Operand,
        /// Destination temporary
        dest: String,
    },
    /// Logical negation: `dest = !value`
    Not {
        /// Operand being negated
        value: Operand,
        /// Destination temporary
        dest: String,
    },
    /// Define a jump target
    Label {
        /// Label name, globally unique within one generation pass
        name: String,
    },
    /// Unconditional jump
    Jump {
        /// Target label
        target: String,
    },
    /// Conditional jump, also used for loop back-edges
    IfGoto {
        /// Condition operand (non-zero takes the jump)
        cond: Operand,
        /// Target label
        target: String,
    },
    /// Load a named variable into a temporary
    Load {
        /// Source variable name
        source: String,
        /// Destination temporary
        dest: String,
    },
    /// Materialize a store target's address into a temporary before an
    /// immediate-valued `Assign`
    Init {
        /// Destination temporary holding the address
        dest: String,
        /// Variable whose address is taken
        target: String,
    },
    /// Bind an argument slot before a call
    Param {
        /// Argument slot (`a0..a6`)
        slot: String,
        /// Lowered argument value
        value: Operand,
    },
    /// Transfer control to a function entry label
    Call {
        /// Entry label (`func_<name>`)
        target: String,
    },
    /// Place a return value into an argument slot
    Return {
        /// Return slot (`a0..a6`)
        slot: String,
        /// Lowered return value
        value: Operand,
    },
    /// Return from the current function
    Ret,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Instruction::Decl { name, value } => write!(f, "{name} = {value}"),
            Instruction::Assign { name, value } => write!(f, "{name} = {value}"),
            Instruction::Arith {
                op,
                left,
                right,
                dest,
            } => write!(f, "{dest} = {left} {op} {right}"),
            Instruction::Logical {
                op,
                left,
                right,
                dest,
            } => write!(f, "{dest} = {left} {op} {right}"),
            Instruction::Relational {
                op,
                left,
                right,
                dest,
            } => write!(f, "{dest} = {left} {op} {right}"),
            Instruction::Not { value, dest } => write!(f, "{dest} = !{value}"),
            Instruction::Label { name } => write!(f, "{name}:"),
            Instruction::Jump { target } => write!(f, "jump {target}"),
            Instruction::IfGoto { cond, target } => write!(f, "if {cond} goto {target}"),
            Instruction::Load { source, dest } => write!(f, "{dest} = {source}"),
            Instruction::Init { dest, target } => write!(f, "{dest} = {target}"),
            Instruction::Param { slot, value } => write!(f, "param {slot}: {value}"),
            Instruction::Call { target } => write!(f, "call {target}"),
            Instruction::Return { value, .. } => write!(f, "return {value}"),
            Instruction::Ret => write!(f, "ret"),
        }
    }
}

/// Renders an instruction list as a newline-separated TAC listing.
pub fn render(code: &[Instruction]) -> String {
    code.iter()
        .map(|instr| instr.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
