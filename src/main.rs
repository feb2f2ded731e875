use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use kirlang::ast::printer;
use kirlang::interpreter::Interpreter;
use kirlang::parser::Parser as ProgramParser;
use kirlang::{Grammar, LangError, scanner};

#[derive(Parser, Debug)]
#[command(name = "kirlang", about = "Interpreter for the Chains and Sets teaching languages")]
struct Cli {
    /// Program source file
    file: PathBuf,

    /// Grammar the program is written in
    #[arg(long, default_value = "chains")]
    grammar: Grammar,

    /// Dump tokens and exit
    #[arg(long)]
    dump_tokens: bool,

    /// Dump AST and exit
    #[arg(long)]
    dump_ast: bool,

    /// AST output format
    #[arg(long, default_value = "sexp", value_parser = ["sexp", "json"])]
    ast_format: String,
}

/// Print `err` as a miette report against the source and turn it into an exit error.
fn report(err: impl Into<LangError>, cli: &Cli, source: &str) -> anyhow::Error {
    let err = err
        .into()
        .with_source_code(cli.file.display().to_string(), source);
    let message = err.message().to_string();
    eprintln!("{:?}", miette::Report::new(err));
    anyhow!(message)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let source = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("read source file '{}'", cli.file.display()))?;

    let tokens = scanner::tokenize(&source, cli.grammar).map_err(|e| report(e, &cli, &source))?;
    if cli.dump_tokens {
        for token in &tokens {
            println!("{token}");
        }
        return Ok(());
    }

    let program = ProgramParser::new(tokens, cli.grammar)
        .parse()
        .map_err(|e| report(e, &cli, &source))?;
    if cli.dump_ast {
        match cli.ast_format.as_str() {
            "json" => println!("{}", printer::to_json(&program).context("serialize AST to JSON")?),
            _ => print!("{}", printer::to_sexp(&program)),
        }
        return Ok(());
    }

    let value = Interpreter::new()
        .interpret(&program)
        .map_err(|e| report(e, &cli, &source))?;
    println!("{value}");
    Ok(())
}
