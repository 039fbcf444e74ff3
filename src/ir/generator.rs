//! Lowering from the checked AST to three-address code.
//!
//! The generator walks the program once and appends instructions in source
//! order. It owns three counters: a six-slot temporary pool (`t1..t6`,
//! wrapping), a strictly increasing label counter shared by every label
//! prefix, and a seven-slot argument counter (`a0..a6`) that resets after
//! each call and each return. All counter state is scoped to a single
//! [`IrGenerator::generate`] invocation, so repeated runs over the same
//! program produce identical listings.

use crate::ir::instruction::{Instruction, Operand};
use crate::parser::ast::{Expression, Program, Statement};

/// Lowers a program to a TAC instruction list with a fresh generator.
pub fn generate(program: &Program) -> Vec<Instruction> {
    IrGenerator::new().generate(program)
}

/// Stateful TAC generator.
#[derive(Debug)]
pub struct IrGenerator {
    code: Vec<Instruction>,
    temp_count: usize,
    label_count: usize,
    arg_count: usize,
}

impl IrGenerator {
    pub fn new() -> Self {
        IrGenerator {
            code: Vec::new(),
            temp_count: 1,
            label_count: 1,
            arg_count: 0,
        }
    }

    /// Lowers `program` and returns the instruction list. Counters and the
    /// output buffer are reset first, so each call starts from `t1`, label
    /// suffix `1`, and slot `a0`.
    pub fn generate(&mut self, program: &Program) -> Vec<Instruction> {
        self.code.clear();
        self.temp_count = 1;
        self.label_count = 1;
        self.arg_count = 0;

        for statement in &program.body {
            self.lower_statement(statement);
        }
        std::mem::take(&mut self.code)
    }

    /// Next temporary from the six-slot pool. Slot 7 wraps back to `t1`;
    /// no liveness tracking, long expression chains simply reuse names.
    fn new_temp(&mut self) -> String {
        if self.temp_count == 7 {
            self.temp_count = 1;
        }
        let name = format!("t{}", self.temp_count);
        self.temp_count += 1;
        name
    }

    /// Next label for `prefix`. The numeric suffix is shared across all
    /// prefixes and never reused within one generation pass.
    fn new_label(&mut self, prefix: &str) -> String {
        let name = format!("{prefix}{}", self.label_count);
        self.label_count += 1;
        name
    }

    /// Next argument slot. Slot 7 wraps back to `a0`.
    fn new_arg(&mut self) -> String {
        if self.arg_count == 7 {
            self.arg_count = 0;
        }
        let name = format!("a{}", self.arg_count);
        self.arg_count += 1;
        name
    }

    fn lower_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::VarDecl { name, init, .. } => {
                let value = match init {
                    Some(expr) => self.lower_expression(expr),
                    None => Operand::Immediate("0".to_string()),
                };
                self.code.push(Instruction::Decl {
                    name: name.clone(),
                    value,
                });
            }

            // Compound assignment operators passed semantic checking as
            // plain stores and lower the same way.
            Statement::Assign { name, value, .. } => {
                let value = self.lower_expression(value);
                if matches!(value, Operand::Immediate(_)) {
                    // Literal stores go through an address temporary.
                    let temp = self.new_temp();
                    self.code.push(Instruction::Init {
                        dest: temp.clone(),
                        target: name.clone(),
                    });
                    self.code.push(Instruction::Assign { name: temp, value });
                } else {
                    self.code.push(Instruction::Assign {
                        name: name.clone(),
                        value,
                    });
                }
            }

            Statement::FuncDecl {
                name, params, body, ..
            } => {
                let end_label = self.new_label("func_end");
                self.code.push(Instruction::Jump {
                    target: end_label.clone(),
                });
                self.code.push(Instruction::Label {
                    name: format!("func_{name}"),
                });

                // Prologue: bind each positional slot to a fresh local.
                for (index, param) in params.iter().enumerate() {
                    self.code.push(Instruction::Decl {
                        name: param.name.clone(),
                        value: Operand::Immediate("0".to_string()),
                    });
                    self.code.push(Instruction::Assign {
                        name: param.name.clone(),
                        value: Operand::Temporary(format!("a{index}")),
                    });
                }

                for statement in body {
                    self.lower_statement(statement);
                }

                self.code.push(Instruction::Ret);
                self.code.push(Instruction::Label { name: end_label });
            }

            Statement::Call { name, args } => {
                self.lower_call(name, args);
            }

            Statement::Return { value } => {
                let value = self.lower_expression(value);
                let slot = self.new_arg();
                self.code.push(Instruction::Return { slot, value });
                self.arg_count = 0;
            }

            Statement::If {
                condition,
                body,
                else_body,
            } => {
                // Labels are allocated before the condition is lowered, so
                // the branch suffixes always precede any labels produced
                // inside the arms.
                let if_label = self.new_label("if_body");
                let else_label = else_body.as_ref().map(|_| self.new_label("else_body"));
                let end_label = self.new_label("if_end");

                let cond = self.lower_expression(condition);
                self.code.push(Instruction::IfGoto {
                    cond,
                    target: if_label.clone(),
                });
                self.code.push(Instruction::Jump {
                    target: else_label.clone().unwrap_or_else(|| end_label.clone()),
                });
                self.code.push(Instruction::Label { name: if_label });

                for statement in body {
                    self.lower_statement(statement);
                }

                if let (Some(else_body), Some(else_label)) = (else_body, else_label) {
                    self.code.push(Instruction::Jump {
                        target: end_label.clone(),
                    });
                    self.code.push(Instruction::Label { name: else_label });
                    for statement in else_body {
                        self.lower_statement(statement);
                    }
                }

                self.code.push(Instruction::Label { name: end_label });
            }

            // `for` and `while` share one bottom-tested shape; `while`
            // simply arrives with no init or increment.
            Statement::Loop {
                init,
                condition,
                increment,
                body,
                ..
            } => {
                let start_label = self.new_label("loop_start");
                let cond_label = self.new_label("loop_cond");

                if let Some(init) = init {
                    self.lower_statement(init);
                }
                self.code.push(Instruction::Jump {
                    target: cond_label.clone(),
                });
                self.code.push(Instruction::Label { name: start_label.clone() });

                for statement in body {
                    self.lower_statement(statement);
                }
                if let Some(increment) = increment {
                    self.lower_statement(increment);
                }

                self.code.push(Instruction::Label { name: cond_label });
                match condition {
                    Some(expr) => {
                        let cond = self.lower_expression(expr);
                        self.code.push(Instruction::IfGoto {
                            cond,
                            target: start_label,
                        });
                    }
                    // `for (i = 0;;)` loops forever.
                    None => self.code.push(Instruction::Jump {
                        target: start_label,
                    }),
                }
            }
        }
    }

    fn lower_expression(&mut self, expression: &Expression) -> Operand {
        match expression {
            Expression::Number(text) | Expression::Str(text) => {
                Operand::Immediate(text.clone())
            }

            Expression::Ident(name) => {
                let temp = self.new_temp();
                self.code.push(Instruction::Load {
                    source: name.clone(),
                    dest: temp.clone(),
                });
                Operand::Temporary(temp)
            }

            Expression::Arith { op, left, right } => {
                let left = self.lower_expression(left);
                let right = self.lower_expression(right);
                // Reuse the left temporary as the destination, which keeps
                // chained arithmetic inside the six-slot pool.
                let dest = match &left {
                    Operand::Temporary(name) => name.clone(),
                    _ => self.new_temp(),
                };
                self.code.push(Instruction::Arith {
                    op: *op,
                    left,
                    right,
                    dest: dest.clone(),
                });
                Operand::Temporary(dest)
            }

            Expression::Relational { op, left, right } => {
                let left = self.lower_expression(left);
                let right = self.lower_expression(right);
                let dest = self.new_temp();
                self.code.push(Instruction::Relational {
                    op: *op,
                    left,
                    right,
                    dest: dest.clone(),
                });
                Operand::Temporary(dest)
            }

            Expression::Logical { op, left, right } => {
                let left = self.lower_expression(left);
                let right = self.lower_expression(right);
                let dest = self.new_temp();
                self.code.push(Instruction::Logical {
                    op: *op,
                    left,
                    right,
                    dest: dest.clone(),
                });
                Operand::Temporary(dest)
            }

            Expression::Not(value) => {
                let value = self.lower_expression(value);
                let dest = self.new_temp();
                self.code.push(Instruction::Not {
                    value,
                    dest: dest.clone(),
                });
                Operand::Temporary(dest)
            }

            Expression::Call { name, args } => self.lower_call(name, args),
        }
    }

    /// Lowers a call in either statement or expression position. Each
    /// argument value is materialized before its slot is allocated, so a
    /// nested call in argument position cannot clobber the outer slots.
    fn lower_call(&mut self, name: &str, args: &[Expression]) -> Operand {
        for arg in args {
            let value = self.lower_argument(arg);
            let slot = self.new_arg();
            self.code.push(Instruction::Param { slot, value });
        }
        self.arg_count = 0;
        self.code.push(Instruction::Call {
            target: format!("func_{name}"),
        });
        // The callee leaves its result in the first slot.
        Operand::Temporary("a0".to_string())
    }

    /// Leaf arguments pass through without a load; anything else lowers as
    /// a normal expression first.
    fn lower_argument(&mut self, arg: &Expression) -> Operand {
        match arg {
            Expression::Number(text) | Expression::Str(text) => {
                Operand::Immediate(text.clone())
            }
            Expression::Ident(name) => Operand::Named(name.clone()),
            other => self.lower_expression(other),
        }
    }
}

impl Default for IrGenerator {
    fn default() -> Self {
        IrGenerator::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::parse;

    fn lower(source: &str) -> Vec<Instruction> {
        generate(&parse(tokenize(source)).expect("source should parse"))
    }

    fn listing(source: &str) -> Vec<String> {
        lower(source).iter().map(|i| i.to_string()).collect()
    }

    #[test]
    fn test_decl_without_initializer_defaults_to_zero() {
        assert_eq!(listing("int x;"), vec!["x = 0"]);
    }

    #[test]
    fn test_arith_reuses_left_temporary() {
        assert_eq!(
            listing("int x = 5; int y = x + 10;"),
            vec!["x = 5", "t1 = x", "t1 = t1 + 10", "y = t1"]
        );
    }

    #[test]
    fn test_literal_assign_materializes_address_temp() {
        assert_eq!(
            listing("int x; x = 7;"),
            vec!["x = 0", "t1 = x", "t1 = 7"]
        );
    }

    #[test]
    fn test_non_literal_assign_stores_directly() {
        assert_eq!(
            listing("int x; int y; x = y + 1;"),
            vec!["x = 0", "y = 0", "t1 = y", "t1 = t1 + 1", "x = t1"]
        );
    }

    #[test]
    fn test_if_else_label_order() {
        let code = listing("int x = 1; if (x < 2) { x = x; } else { x = x; }");
        assert_eq!(
            code,
            vec![
                "x = 1",
                "t1 = x",
                "t2 = t1 < 2",
                "if t2 goto if_body1",
                "jump else_body2",
                "if_body1:",
                "t3 = x",
                "x = t3",
                "jump if_end3",
                "else_body2:",
                "t4 = x",
                "x = t4",
                "if_end3:",
            ]
        );
    }

    #[test]
    fn test_if_without_else_jumps_to_end() {
        let code = listing("int x = 1; if (x < 2) { x = x; }");
        assert_eq!(
            code,
            vec![
                "x = 1",
                "t1 = x",
                "t2 = t1 < 2",
                "if t2 goto if_body1",
                "jump if_end2",
                "if_body1:",
                "t3 = x",
                "x = t3",
                "if_end2:",
            ]
        );
    }

    #[test]
    fn test_for_loop_shape() {
        let code = listing("for (int i = 0; i < 10; i = i + 1) { int x = i; }");
        assert_eq!(
            code,
            vec![
                "i = 0",
                "jump loop_cond2",
                "loop_start1:",
                "t1 = i",
                "x = t1",
                "t2 = i",
                "t2 = t2 + 1",
                "i = t2",
                "loop_cond2:",
                "t3 = i",
                "t4 = t3 < 10",
                "if t4 goto loop_start1",
            ]
        );
    }

    #[test]
    fn test_while_loop_shape() {
        let code = listing("int x = 3; while (x > 0) { x = x - 1; }");
        assert_eq!(
            code,
            vec![
                "x = 3",
                "jump loop_cond2",
                "loop_start1:",
                "t1 = x",
                "t1 = t1 - 1",
                "x = t1",
                "loop_cond2:",
                "t2 = x",
                "t3 = t2 > 0",
                "if t3 goto loop_start1",
            ]
        );
    }

    #[test]
    fn test_function_prologue_and_call() {
        let code = listing(
            "int x = 5;\
             int soma(int a, int b) { return a + b; }\
             int resultado;\
             resultado = 4 + soma(x, 10);",
        );
        assert_eq!(
            code,
            vec![
                "x = 5",
                "jump func_end1",
                "func_soma:",
                "a = 0",
                "a = a0",
                "b = 0",
                "b = a1",
                "t1 = a",
                "t2 = b",
                "t1 = t1 + t2",
                "return t1",
                "ret",
                "func_end1:",
                "resultado = 0",
                "param a0: x",
                "param a1: 10",
                "call func_soma",
                "t3 = 4 + a0",
                "resultado = t3",
            ]
        );
    }

    #[test]
    fn test_argument_slots_reset_between_calls() {
        let code = lower(
            "void f(int a) { return a; }\
             f(1);\
             f(2);",
        );
        let slots: Vec<&str> = code
            .iter()
            .filter_map(|instr| match instr {
                Instruction::Param { slot, .. } => Some(slot.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(slots, vec!["a0", "a0"]);
    }

    #[test]
    fn test_temporary_pool_wraps_after_six() {
        let code = lower("int a; int b = a + a + a + a + a + a + a + a;");
        let loads: Vec<&str> = code
            .iter()
            .filter_map(|instr| match instr {
                Instruction::Load { dest, .. } => Some(dest.as_str()),
                _ => None,
            })
            .collect();
        // Eight loads through a six-slot pool reuse t1 and t2.
        assert_eq!(loads, vec!["t1", "t2", "t3", "t4", "t5", "t6", "t1", "t2"]);
    }

    #[test]
    fn test_counters_reset_between_generate_calls() {
        let program = parse(tokenize("int x; if (1 < 2) { x = 1; }")).unwrap();
        let mut generator = IrGenerator::new();
        let first = generator.generate(&program);
        let second = generator.generate(&program);
        assert_eq!(first, second);
    }

    #[test]
    fn test_for_without_condition_loops_unconditionally() {
        let code = listing("for (int i = 0;;) { i = i; }");
        assert_eq!(
            code,
            vec![
                "i = 0",
                "jump loop_cond2",
                "loop_start1:",
                "t1 = i",
                "i = t1",
                "loop_cond2:",
                "jump loop_start1",
            ]
        );
    }

    #[test]
    fn test_nested_call_argument_lowered_before_slot() {
        let code = listing(
            "int inc(int a) { return a + 1; }\
             int r = inc(inc(1));",
        );
        assert_eq!(
            code,
            vec![
                "jump func_end1",
                "func_inc:",
                "a = 0",
                "a = a0",
                "t1 = a",
                "t1 = t1 + 1",
                "return t1",
                "ret",
                "func_end1:",
                "param a0: 1",
                "call func_inc",
                "param a0: a0",
                "call func_inc",
                "r = a0",
            ]
        );
    }
}
