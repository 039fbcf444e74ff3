//! TAC generation over composed control flow, driven through the parser.

use minicc::{generate, parse, tokenize, Instruction, IrGenerator};

fn lower(source: &str) -> Vec<Instruction> {
    generate(&parse(tokenize(source)).unwrap())
}

fn listing(source: &str) -> Vec<String> {
    lower(source).iter().map(|i| i.to_string()).collect()
}

// ====================
// Control flow composition
// ====================

#[test]
fn test_if_nested_in_while() {
    let code = listing("int x = 0; while (x < 3) { if (x < 2) { x = x + 1; } }");
    assert_eq!(
        code,
        vec![
            "x = 0",
            "jump loop_cond2",
            "loop_start1:",
            "t1 = x",
            "t2 = t1 < 2",
            "if t2 goto if_body3",
            "jump if_end4",
            "if_body3:",
            "t3 = x",
            "t3 = t3 + 1",
            "x = t3",
            "if_end4:",
            "loop_cond2:",
            "t4 = x",
            "t5 = t4 < 3",
            "if t5 goto loop_start1",
        ]
    );
}

#[test]
fn test_loop_nested_in_function() {
    let code = listing(
        "void f(int n) { for (int i = 0; i < n; i = i + 1) { n = n + 1; } }",
    );
    assert_eq!(
        code,
        vec![
            "jump func_end1",
            "func_f:",
            "n = 0",
            "n = a0",
            "i = 0",
            "jump loop_cond3",
            "loop_start2:",
            "t1 = n",
            "t1 = t1 + 1",
            "n = t1",
            "t2 = i",
            "t2 = t2 + 1",
            "i = t2",
            "loop_cond3:",
            "t3 = i",
            "t4 = n",
            "t5 = t3 < t4",
            "if t5 goto loop_start2",
            "ret",
            "func_end1:",
        ]
    );
}

#[test]
fn test_label_suffixes_increase_across_statements() {
    let code = lower("int x = 0; if (x < 1) { x = x; } if (x < 2) { x = x; }");
    let labels: Vec<&str> = code
        .iter()
        .filter_map(|instr| match instr {
            Instruction::Label { name } => Some(name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(labels, vec!["if_body1", "if_end2", "if_body3", "if_end4"]);
}

#[test]
fn test_each_function_gets_its_own_end_label() {
    let code = lower(
        "int f(int a) { return a; }\
         int g(int a) { return a; }",
    );
    let jumps: Vec<&str> = code
        .iter()
        .filter_map(|instr| match instr {
            Instruction::Jump { target } => Some(target.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(jumps, vec!["func_end1", "func_end2"]);
}

// ====================
// Values and slots
// ====================

#[test]
fn test_string_literals_lower_as_immediates() {
    assert_eq!(
        listing(r#"string s; s = "ola";"#),
        vec!["s = 0", "t1 = s", "t1 = ola"]
    );
}

#[test]
fn test_concatenation_reuses_left_temporary() {
    assert_eq!(
        listing(r#"string a = "x"; string b = a + "y";"#),
        vec!["a = x", "t1 = a", "t1 = t1 + y", "b = t1"]
    );
}

#[test]
fn test_literal_return_renders_value() {
    assert_eq!(
        listing("int f() { return 1; }"),
        vec!["jump func_end1", "func_f:", "return 1", "ret", "func_end1:"]
    );
}

#[test]
fn test_argument_slots_wrap_after_seven() {
    let code = lower(
        "void g(int a, int b, int c, int d, int e, int f, int h, int i) { return a; }\
         g(1, 2, 3, 4, 5, 6, 7, 8);",
    );
    let slots: Vec<&str> = code
        .iter()
        .filter_map(|instr| match instr {
            Instruction::Param { slot, .. } => Some(slot.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(slots, vec!["a0", "a1", "a2", "a3", "a4", "a5", "a6", "a0"]);
}

// ====================
// Generator reuse
// ====================

#[test]
fn test_generator_reuse_matches_fresh_generator() {
    let first = parse(tokenize("int x = 1; if (x < 2) { x = x; }")).unwrap();
    let second = parse(tokenize("int y = 2; y = y + 1;")).unwrap();

    let mut shared = IrGenerator::new();
    shared.generate(&first);
    let reused = shared.generate(&second);

    assert_eq!(reused, generate(&second));
}
