//! Bacon command line entry point.
//!
//! `bacon FILE` parses a file and prints the program, `bacon` alone starts
//! an interactive read-parse-print loop.

use std::{
    env, fs,
    io::{self, BufRead, IsTerminal, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use bacon::{lexer::lexer::tokenize, parser::parser::parse, render_error};
use clap::Parser;
use tracing::info;

const PROMPT: &str = ">> ";

#[derive(Parser, Debug)]
#[command(name = "bacon")]
#[command(version)]
#[command(about = "Scanner and parser for the Bacon language", long_about = None)]
struct Cli {
    /// File to parse. Starts the interactive prompt when omitted
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Print the token stream instead of the parsed program
    #[arg(long)]
    tokens: bool,
}

fn main() -> ExitCode {
    // Structured logging with env-based filter, defaulting to warn
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .try_init();

    let cli = Cli::parse();

    match &cli.file {
        Some(path) => run_file(path, cli.tokens),
        None => match run_repl(cli.tokens) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("error: {}", err);
                ExitCode::FAILURE
            }
        },
    }
}

fn run_file(path: &Path, show_tokens: bool) -> ExitCode {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: could not read {}: {}", path.display(), err);
            return ExitCode::FAILURE;
        }
    };
    info!(file = %path.display(), bytes = source.len(), "read source");

    if show_tokens {
        for token in tokenize(&source) {
            println!("{}", token);
        }
        return ExitCode::SUCCESS;
    }

    let (program, errors) = parse(&source);

    if errors.is_empty() {
        println!("{}", program);
        return ExitCode::SUCCESS;
    }

    let label = path.display().to_string();
    for error in &errors {
        eprint!("{}", render_error(error, &source, &label));
    }

    ExitCode::FAILURE
}

/// Reads one line at a time until end of input. Each line gets a fresh parser.
fn run_repl(show_tokens: bool) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    if stdin.is_terminal() {
        write!(stdout, "{}", banner(&current_user()))?;
    }

    let mut input = stdin.lock();

    loop {
        write!(stdout, "{}", PROMPT)?;
        stdout.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(stdout)?;
            return Ok(());
        }

        if show_tokens {
            for token in tokenize(&line) {
                writeln!(stdout, "{}", token)?;
            }
            continue;
        }

        let (program, errors) = parse(&line);

        if errors.is_empty() {
            writeln!(stdout, "{}", program)?;
        } else {
            for error in &errors {
                write!(stdout, "{}", render_error(error, &line, "repl"))?;
            }
        }
    }
}

fn current_user() -> String {
    env::var("USER")
        .or_else(|_| env::var("USERNAME"))
        .unwrap_or_else(|_| String::from("there"))
}

fn banner(user: &str) -> String {
    format!(
        "Hello {}! This is the Bacon programming language!\nFeel free to type in commands\n",
        user
    )
}
