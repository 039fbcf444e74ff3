//! Scope and typing rules exercised through the public API.

use minicc::{analyze, parse, tokenize, Error, Result, SemanticAnalyzer};

fn check(source: &str) -> Result<()> {
    analyze(&parse(tokenize(source)).unwrap())
}

// ====================
// Scoping
// ====================

#[test]
fn test_no_hoisting_within_global_scope() {
    let err = check("x = 1; int x;").unwrap_err();
    assert!(matches!(err, Error::Undeclared { name } if name == "x"));
}

#[test]
fn test_block_declarations_invisible_after_if() {
    let source = "int x = 1; if (x < 2) { int y = 3; } x = y;";
    let err = check(source).unwrap_err();
    assert!(matches!(err, Error::Undeclared { name } if name == "y"));
}

#[test]
fn test_else_branch_cannot_see_then_branch() {
    let source = "int x = 1; if (x < 2) { int y = 3; } else { x = y; }";
    let err = check(source).unwrap_err();
    assert!(matches!(err, Error::Undeclared { name } if name == "y"));
}

#[test]
fn test_inner_scopes_read_outer_variables() {
    let source = "int x = 1; if (x < 2) { x = 3; } else { x = 4; }";
    assert!(check(source).is_ok());
}

#[test]
fn test_function_body_sees_globals_declared_earlier() {
    let source = "int x = 1; int f(int a) { return a + x; }";
    assert!(check(source).is_ok());

    let source = "int f(int a) { return a + x; } int x = 1;";
    let err = check(source).unwrap_err();
    assert!(matches!(err, Error::Undeclared { name } if name == "x"));
}

#[test]
fn test_parameters_shadow_globals() {
    let source = r#"string x = "a"; int f(int x) { return x + 1; }"#;
    assert!(check(source).is_ok());
}

// ====================
// Redeclaration
// ====================

#[test]
fn test_variable_redeclaration_in_same_scope_is_permitted() {
    // The newer declaration simply overwrites the older one.
    assert!(check(r#"int x = 1; string x = "a"; x = "b";"#).is_ok());
}

#[test]
fn test_function_redeclaration_is_rejected() {
    let source = "int f(int a) { return a; } int f(int a) { return a; }";
    let err = check(source).unwrap_err();
    assert!(matches!(err, Error::Redeclared { name } if name == "f"));
}

#[test]
fn test_function_name_clashing_with_variable_is_rejected() {
    let err = check("int f = 1; int f(int a) { return a; }").unwrap_err();
    assert!(matches!(err, Error::Redeclared { name } if name == "f"));
}

// ====================
// Calls
// ====================

#[test]
fn test_arity_error_reports_both_counts() {
    let source = "int soma(int a, int b) { return a + b; } soma(1);";
    let err = check(source).unwrap_err();
    match err {
        Error::Arity { name, expected, received } => {
            assert_eq!(name, "soma");
            assert_eq!(expected, 2);
            assert_eq!(received, 1);
        }
        other => panic!("expected arity error, got {other:?}"),
    }
}

#[test]
fn test_argument_type_error_message_is_one_indexed() {
    let source = r#"int soma(int a, int b) { return a + b; } soma("x", 2);"#;
    let err = check(source).unwrap_err();
    assert_eq!(
        err.to_string(),
        "argument 1 in call to `soma` has the wrong type: expected `int`, received `string`"
    );
}

#[test]
fn test_call_result_participates_in_typing() {
    let source = "int f(int a) { return a; } int x = f(1) + 2;";
    assert!(check(source).is_ok());

    let source = r#"string g(string s) { return s; } int x = g("a") + 2;"#;
    let err = check(source).unwrap_err();
    assert!(matches!(err, Error::InvalidOperands { .. }));
}

#[test]
fn test_void_call_cannot_feed_arithmetic() {
    let source = "void f(int a) { return a; } int x = f(1) + 2;";
    let err = check(source).unwrap_err();
    assert!(matches!(err, Error::InvalidOperands { .. }));
}

// ====================
// Typing
// ====================

#[test]
fn test_string_concatenation_stays_homogeneous() {
    assert!(check(r#"string a = "x"; string b = a + "y";"#).is_ok());

    let err = check(r#"string a = "x"; string b = a + 1;"#).unwrap_err();
    assert!(matches!(err, Error::InvalidOperands { .. }));
}

#[test]
fn test_non_add_arithmetic_rejects_strings() {
    let err = check(r#"string a = "x"; string b = a * a;"#).unwrap_err();
    assert!(matches!(err, Error::InvalidOperands { .. }));
}

#[test]
fn test_conditions_resolve_names_but_skip_typing() {
    // Conditions are walked for resolution; their types are never inferred.
    assert!(check("int x = 1; if (!x) { x = 3; }").is_ok());

    let err = check("int x = 1; if (!y) { x = 3; }").unwrap_err();
    assert!(matches!(err, Error::Undeclared { name } if name == "y"));
}

#[test]
fn test_assign_type_mismatch_names_declared_type() {
    let err = check(r#"int x = 1; x = "a";"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "variable `x` of type `int` cannot be assigned a value of type `string`"
    );
}

#[test]
fn test_return_value_type_is_not_checked() {
    // Declared return types are not enforced against the returned value.
    assert!(check(r#"int f(int a) { return "texto"; }"#).is_ok());
}

// ====================
// Idempotence
// ====================

#[test]
fn test_analyze_twice_gives_same_outcome() {
    let program = parse(tokenize("int x = 1; x = x + 1;")).unwrap();
    let mut analyzer = SemanticAnalyzer::new();
    assert!(analyzer.analyze(&program).is_ok());
    assert!(analyzer.analyze(&program).is_ok());
}

#[test]
fn test_analyze_twice_gives_same_diagnostic() {
    let program = parse(tokenize("int x = 1; x = y;")).unwrap();
    let mut analyzer = SemanticAnalyzer::new();
    let first = analyzer.analyze(&program).unwrap_err().to_string();
    let second = analyzer.analyze(&program).unwrap_err().to_string();
    assert_eq!(first, second);
}
