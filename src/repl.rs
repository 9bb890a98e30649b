//! Line-oriented read-parse-print loop.
//!
//! Each line is parsed on its own and echoed back in canonical form, or
//! answered with the list of syntax errors it produced.

use std::io::{self, BufRead, Write};

use crate::{errors::errors::Error, lexer::lexer::Lexer, parser::parser::Parser, ParserOptions};

pub const PROMPT: &str = ">> ";

pub const MONKEY_FACE: &str = r#"
           __,__
  .--.  .-"     "-.  .--.
 / .. \/  .-. .-.  \/ .. \
| |  '|  /   Y   \  |'  | |
| \   \  \ 0 | 0 /  /   / |
 \ '- ,\.-"""""""-./, -' /
  ''-' /_   ^ ^   _\ '-''
      |  \._   _./  |
      \   \ '~' /   /
       '._ '-=-' _.'
          '-----'
"#;

/// Runs the loop until `input` is exhausted or the user types `exit`/`quit`.
pub fn start<R: BufRead, W: Write>(input: R, output: &mut W) -> io::Result<()> {
    start_with_options(input, output, ParserOptions::default())
}

pub fn start_with_options<R: BufRead, W: Write>(
    mut input: R,
    output: &mut W,
    options: ParserOptions,
) -> io::Result<()> {
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        let trimmed_line = line.trim();
        if trimmed_line == "exit" || trimmed_line == "quit" {
            writeln!(output, "Exiting...")?;
            return Ok(());
        }

        let mut parser = Parser::with_options(Lexer::new(&line), options);
        let program = parser.parse_program();

        for trace_line in parser.trace_log() {
            writeln!(output, "{}", trace_line)?;
        }

        if !parser.errors().is_empty() {
            print_parser_errors(output, parser.errors())?;
            continue;
        }

        writeln!(output, "{}", program)?;
    }
}

fn print_parser_errors<W: Write>(output: &mut W, errors: &[Error]) -> io::Result<()> {
    write!(output, "{}", MONKEY_FACE)?;
    writeln!(output, "Woops! We ran into some monkey business here!")?;
    writeln!(output, " parser errors:")?;
    for error in errors {
        writeln!(output, "\t{}", error)?;
    }
    Ok(())
}
