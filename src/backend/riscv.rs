//! Naive RISC-V text emission from a TAC listing.
//!
//! The emitter keeps the generator's temporary and argument names as
//! register names, spills every variable to a `.data` word, and routes all
//! memory traffic through `t0`. Output is assembler text, two sections:
//! `.data` with one word per declared variable, then `.text` starting at
//! `main`.

use crate::ir::instruction::{Instruction, Operand};
use crate::parser::ast::{ArithOp, LogicOp, RelOp};

/// Emits assembler text for a TAC listing.
pub fn emit_assembly(code: &[Instruction]) -> String {
    let mut data = String::from(".data\n");
    for instr in code {
        if let Instruction::Decl { name, value } = instr {
            // Non-literal initializers are stored by a later Assign; the
            // word itself starts at zero.
            match value {
                Operand::Immediate(text) => {
                    data.push_str(&format!("    {name}: .word {text}\n"));
                }
                _ => data.push_str(&format!("    {name}: .word 0\n")),
            }
        }
    }

    let mut text = String::from(".text\nmain:\n");
    for instr in code {
        emit_instruction(&mut text, instr);
    }

    format!("{data}\n{text}")
}

fn arith_mnemonic(op: ArithOp) -> &'static str {
    match op {
        ArithOp::Add => "add",
        ArithOp::Sub => "sub",
        ArithOp::Mul => "mul",
        ArithOp::Div => "div",
    }
}

fn emit_instruction(text: &mut String, instr: &Instruction) {
    match instr {
        // Declarations live entirely in .data.
        Instruction::Decl { .. } => {}

        Instruction::Arith {
            op,
            left,
            right,
            dest,
        } => {
            if let Operand::Immediate(value) = left {
                text.push_str(&format!("    li {dest}, {value}\n"));
            }
            match (right, op) {
                (Operand::Immediate(value), ArithOp::Add) => {
                    text.push_str(&format!("    addi {dest}, {dest}, {value}\n"));
                }
                (Operand::Immediate(value), _) => {
                    text.push_str(&format!("    li t0, {value}\n"));
                    text.push_str(&format!(
                        "    {} {dest}, {dest}, t0\n",
                        arith_mnemonic(*op)
                    ));
                }
                (other, _) => {
                    text.push_str(&format!(
                        "    {} {dest}, {dest}, {other}\n",
                        arith_mnemonic(*op)
                    ));
                }
            }
        }

        Instruction::Logical {
            op,
            left,
            right,
            dest,
        } => {
            let left = materialize(text, left, "t0");
            let right = materialize(text, right, dest);
            let mnemonic = match op {
                LogicOp::And => "and",
                LogicOp::Or => "or",
            };
            text.push_str(&format!("    {mnemonic} {dest}, {left}, {right}\n"));
        }

        Instruction::Relational {
            op,
            left,
            right,
            dest,
        } => {
            let left = materialize(text, left, "t0");
            let right = materialize(text, right, dest);
            match op {
                RelOp::Eq => {
                    text.push_str(&format!("    sub t0, {left}, {right}\n"));
                    text.push_str(&format!("    seqz {dest}, t0\n"));
                }
                RelOp::NotEq => {
                    text.push_str(&format!("    sub t0, {left}, {right}\n"));
                    text.push_str(&format!("    snez {dest}, t0\n"));
                }
                RelOp::Lt => text.push_str(&format!("    slt {dest}, {left}, {right}\n")),
                RelOp::Gt => text.push_str(&format!("    slt {dest}, {right}, {left}\n")),
                RelOp::LtEq => {
                    text.push_str(&format!("    slt t0, {right}, {left}\n"));
                    text.push_str(&format!("    xori {dest}, t0, 1\n"));
                }
                RelOp::GtEq => {
                    text.push_str(&format!("    slt t0, {left}, {right}\n"));
                    text.push_str(&format!("    xori {dest}, t0, 1\n"));
                }
            }
        }

        Instruction::Not { value, dest } => {
            let value = materialize(text, value, "t0");
            text.push_str(&format!("    seqz {dest}, {value}\n"));
        }

        Instruction::Label { name } => text.push_str(&format!("{name}:\n")),
        Instruction::Jump { target } => text.push_str(&format!("    j {target}\n")),
        Instruction::IfGoto { cond, target } => {
            text.push_str(&format!("    bnez {cond}, {target}\n"));
        }

        // The generator emits Init immediately before a literal Assign, so
        // t0 still holds the target address here.
        Instruction::Assign { name, value } => match value {
            Operand::Immediate(text_value) => {
                text.push_str(&format!("    li {name}, {text_value}\n"));
                text.push_str(&format!("    sw {name}, (t0)\n"));
            }
            other => {
                text.push_str(&format!("    la t0, {name}\n"));
                text.push_str(&format!("    sw {other}, (t0)\n"));
            }
        },

        Instruction::Load { source, dest } => {
            text.push_str(&format!("    la t0, {source}\n"));
            text.push_str(&format!("    lw {dest}, (t0)\n"));
        }

        Instruction::Init { target, .. } => {
            text.push_str(&format!("    la t0, {target}\n"));
        }

        Instruction::Param { slot, value } => match value {
            Operand::Named(name) => {
                text.push_str(&format!("    la t0, {name}\n"));
                text.push_str(&format!("    lw {slot}, (t0)\n"));
            }
            Operand::Temporary(temp) => {
                text.push_str(&format!("    mv {slot}, {temp}\n"));
            }
            Operand::Immediate(value) => {
                text.push_str(&format!("    li {slot}, {value}\n"));
            }
        },

        Instruction::Call { target } => {
            text.push_str(&format!("    jal ra, {target}\n"));
        }

        Instruction::Return { slot, value } => match value {
            Operand::Temporary(temp) => text.push_str(&format!("    mv {slot}, {temp}\n")),
            other => text.push_str(&format!("    li {slot}, {other}\n")),
        },

        Instruction::Ret => text.push_str("    jr ra\n"),
    }
}

/// Ensures an operand sits in a register, loading immediates into
/// `scratch` first.
fn materialize(text: &mut String, operand: &Operand, scratch: &str) -> String {
    match operand {
        Operand::Immediate(value) => {
            text.push_str(&format!("    li {scratch}, {value}\n"));
            scratch.to_string()
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::generate;
    use crate::lexer::tokenize;
    use crate::parser::parse;

    fn assemble(source: &str) -> String {
        let program = parse(tokenize(source)).expect("source should parse");
        emit_assembly(&generate(&program))
    }

    #[test]
    fn test_declared_variables_land_in_data_section() {
        let asm = assemble("int x = 5; int y;");
        let data = asm.split("\n\n").next().unwrap();
        assert!(data.contains("x: .word 5"));
        assert!(data.contains("y: .word 0"));
    }

    #[test]
    fn test_addi_used_for_add_with_immediate() {
        let asm = assemble("int x = 1; int y; y = x + 10;");
        assert!(asm.contains("addi t1, t1, 10"));
    }

    #[test]
    fn test_comparison_lowers_to_slt() {
        let asm = assemble("int x = 1; if (x < 2) { x = x; }");
        assert!(asm.contains("slt t2, t1, t2"));
        assert!(asm.contains("bnez t2, if_body1"));
    }

    #[test]
    fn test_call_and_return_sequence() {
        let asm = assemble(
            "int soma(int a, int b) { return a + b; }\
             int r;\
             r = soma(1, 2);",
        );
        assert!(asm.contains("func_soma:"));
        assert!(asm.contains("    li a0, 1\n"));
        assert!(asm.contains("    li a1, 2\n"));
        assert!(asm.contains("    jal ra, func_soma\n"));
        assert!(asm.contains("    jr ra\n"));
    }

    #[test]
    fn test_text_section_opens_with_main() {
        let asm = assemble("int x;");
        assert!(asm.contains(".text\nmain:\n"));
    }
}
