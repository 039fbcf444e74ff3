//! Assembly emission from the TAC listing.

pub mod riscv;

pub use riscv::emit_assembly;
