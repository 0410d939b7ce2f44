//! milisp CLI
//!
//! Main entry point for the `milisp` command.

mod host;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Report, Result, WrapErr};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use milisp::common::LineCol;
use milisp::config::Config;
use milisp::{Datum, Env, Value};

#[derive(Parser)]
#[command(name = "milisp")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Lex, parse and evaluate milisp expressions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./milisp.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tokens of a source file
    Tokens {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Parse a source file and print its tree
    Parse {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Emit the tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate a source file or expression with the demonstration bindings
    Eval {
        /// Input file
        #[arg(value_name = "FILE", required_unless_present = "expr")]
        input: Option<PathBuf>,

        /// Evaluate this expression instead of a file
        #[arg(short, long, conflicts_with = "input")]
        expr: Option<String>,
    },

    /// Start the interactive REPL
    Repl,

    /// Show information about the language
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    let config = Config::discover(cli.config.as_deref())?;

    match cli.command {
        Commands::Tokens { input } => tokens(&input),
        Commands::Parse { input, json } => parse(&input, json),
        Commands::Eval { input, expr } => eval(input.as_deref(), expr, &config),
        Commands::Repl => repl(&config),
        Commands::Info => info(),
    }
}

fn read_source(input: &Path) -> Result<String> {
    std::fs::read_to_string(input)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read input file {}", input.display()))
}

/// Attach the source so miette can render a labelled excerpt
fn with_source(err: impl miette::Diagnostic + Send + Sync + 'static, source: &str) -> Report {
    Report::new(err).with_source_code(source.to_owned())
}

fn tokens(input: &Path) -> Result<()> {
    let source = read_source(input)?;
    let mut count = 0;
    for token in milisp::tokenize(&source) {
        let token = token.map_err(|e| with_source(e, &source))?;
        let at = LineCol::locate(&source, token.span.start);
        println!("{}\t{}\t{}", at, token.kind.tag(), token.kind);
        count += 1;
    }
    tracing::debug!("Lexed {} tokens", count);
    Ok(())
}

fn parse(input: &Path, json: bool) -> Result<()> {
    let source = read_source(input)?;
    let ast = milisp::parse(&source).map_err(|e| with_source(e, &source))?;
    tracing::debug!(depth = ast.depth(), "Parsed {}", input.display());

    if json {
        let json = serde_json::to_string_pretty(&ast)
            .map_err(|e| miette::miette!("Failed to serialize AST: {}", e))?;
        println!("{}", json);
    } else {
        println!("{}", ast);
    }
    Ok(())
}

fn environment(config: &Config) -> Env<Datum> {
    let mut env = host::demo_env();
    config.apply(&mut env);
    env
}

fn eval(input: Option<&Path>, expr: Option<String>, config: &Config) -> Result<()> {
    let source = match (expr, input) {
        (Some(expr), _) => expr,
        (None, Some(input)) => read_source(input)?,
        (None, None) => return Err(miette::miette!("Nothing to evaluate")),
    };

    let mut env = environment(config);
    let result = milisp::eval_code(&mut env, &source).map_err(|e| with_source(e, &source))?;
    print_value(&result);
    Ok(())
}

fn print_value(value: &Value<Datum, Env<Datum>>) {
    match value {
        Value::Data(Datum::Nil) => {}
        _ => println!("{}", value),
    }
}

fn repl(config: &Config) -> Result<()> {
    use rustyline::error::ReadlineError;

    println!("milisp REPL v{}", env!("CARGO_PKG_VERSION"));
    println!("Type :help for help, :quit to exit");
    println!();

    let mut editor = rustyline::DefaultEditor::new().into_diagnostic()?;
    if let Some(history) = &config.repl.history {
        if editor.load_history(history).is_err() {
            tracing::debug!("No history at {}", history.display());
        }
    }

    let mut env = environment(config);

    loop {
        let line = match editor.readline(&config.repl.prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e).into_diagnostic(),
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(trimmed);

        match trimmed {
            ":quit" | ":q" => break,
            ":help" | ":h" => {
                println!("Commands:");
                println!("  :help, :h    Show this help");
                println!("  :quit, :q    Exit the REPL");
                println!("  :env         List bound names");
                println!("  :ast <expr>  Show the parsed tree of an expression");
                println!();
            }
            ":env" => {
                println!("{}", env.names().collect::<Vec<_>>().join(" "));
            }
            _ if trimmed.starts_with(":ast ") => {
                let expr = &trimmed[5..];
                match milisp::parse(expr) {
                    Ok(ast) => println!("{:?}", ast),
                    Err(e) => eprintln!("{:?}", with_source(e, expr)),
                }
            }
            _ => match milisp::eval_code(&mut env, trimmed) {
                Ok(value) => print_value(&value),
                Err(e) => eprintln!("{:?}", with_source(e, trimmed)),
            },
        }
    }

    if let Some(history) = &config.repl.history {
        editor.save_history(history).into_diagnostic()?;
    }
    println!("Goodbye!");
    Ok(())
}

fn info() -> Result<()> {
    println!("milisp");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Grammar:");
    println!("  (op arg ...)   form; op is evaluated, args are passed unevaluated");
    println!("  1.5 -2 1e3     numbers (f64)");
    println!("  \"text\"         text; \\x stands for x");
    println!("  name           symbol, looked up in the environment");
    println!("  # ...          comment to end of line");
    println!();
    println!("Demonstration bindings:");
    println!("  prog set loop if and or + - * / < = concat list");
    Ok(())
}
