//! Monkey front end CLI.
//!
//! Without a file, greets the user and starts the REPL. With a file, parses
//! it and prints either the canonical form of the program or every syntax
//! error with the offending line.
//!
//! ```text
//! monkey
//! monkey program.monkey --timings
//! monkey program.monkey --tokens --trace
//! ```

use std::{
    env,
    fs::read_to_string,
    io::{self, stdout},
    path::{Path, PathBuf},
    process,
    time::Instant,
};

use clap::Parser as ClapParser;
use monkey::{
    display_error,
    lexer::{lexer::Lexer, tokens::TokenKind},
    repl, Parser, ParserOptions,
};

#[derive(ClapParser)]
#[command(name = "monkey")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Lexer and parser for the Monkey language", long_about = None)]
struct Cli {
    /// Source file to parse; starts the REPL when omitted
    file: Option<PathBuf>,

    /// Print the parse trace
    #[arg(long)]
    trace: bool,

    /// Print every token before parsing
    #[arg(long)]
    tokens: bool,

    /// Print how long each phase took
    #[arg(long)]
    timings: bool,
}

fn main() {
    let cli = Cli::parse();

    let options = ParserOptions {
        trace: cli.trace,
        ..Default::default()
    };

    match &cli.file {
        Some(file) => run_file(file, &cli, options),
        None => run_repl(options),
    }
}

fn run_repl(options: ParserOptions) {
    let user = env::var("USER").unwrap_or_else(|_| String::from("there"));

    println!("Hello {}! This is the Monkey programming language!", user);
    println!("Feel free to type in commands");

    if let Err(error) = repl::start_with_options(io::stdin().lock(), &mut stdout().lock(), options) {
        eprintln!("REPL stopped: {}", error);
        process::exit(1);
    }
}

fn run_file(file: &Path, cli: &Cli, options: ParserOptions) {
    let source = match read_to_string(file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {}: {}", file.display(), error);
            process::exit(1);
        }
    };

    let file_name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    let start = Instant::now();

    if cli.tokens {
        let mut lexer = Lexer::with_file(&source, &file_name);
        loop {
            let token = lexer.next_token();
            token.debug();
            if token.kind == TokenKind::EOF {
                break;
            }
        }

        if cli.timings {
            println!("Tokenized in {:?}", start.elapsed());
        }
    }

    let parse_start = Instant::now();
    let mut parser = Parser::with_options(Lexer::with_file(&source, &file_name), options);
    let program = parser.parse_program();

    if cli.timings {
        println!("Parsed in {:?}", parse_start.elapsed());
    }

    for line in parser.trace_log() {
        println!("{}", line);
    }

    if !parser.errors().is_empty() {
        for error in parser.errors() {
            print!("{}", display_error(error, &source));
        }
        process::exit(1);
    }

    println!("{}", program);

    if cli.timings {
        println!("Total time: {:?}", start.elapsed());
    }
}
