//! Three-address-code intermediate representation and its generator.

pub mod generator;
pub mod instruction;

pub use generator::{generate, IrGenerator};
pub use instruction::{render, Instruction, Operand};
