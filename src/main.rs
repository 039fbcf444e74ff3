//! Command-line driver: compiles a source file (or a built-in sample) and
//! prints the AST, the TAC listing, and the emitted assembly.

use std::env;
use std::fs;

use anyhow::{Context, Result};

use minicc::{analyze, emit_assembly, generate, parse, render, tokenize};

const SAMPLE: &str = "\
int x = 5;
int soma(int a, int b) {
    return a + b;
}
int resultado;
resultado = 4 + soma(x, 10);
";

fn main() -> Result<()> {
    let source = match env::args().nth(1) {
        Some(path) => {
            fs::read_to_string(&path).with_context(|| format!("reading `{path}`"))?
        }
        None => SAMPLE.to_string(),
    };

    let tokens = tokenize(&source);
    let program = parse(tokens).context("parsing failed")?;

    println!("AST:");
    println!("{}", serde_json::to_string_pretty(&program)?);

    analyze(&program).context("semantic analysis failed")?;

    let code = generate(&program);
    println!("\nTAC:");
    println!("{}", render(&code));

    println!("\nAssembly:");
    println!("{}", emit_assembly(&code));

    Ok(())
}
