#![allow(clippy::module_inception)]

use std::{fmt::Write, rc::Rc};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod repl;

pub use ast::ast::{render, Node, Program};
pub use lexer::lexer::{tokenize, Lexer};
pub use parser::parser::{parse, Parser, ParserOptions};

/// A character offset into a named source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Rc<String>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Finds the line containing the character offset `position`.
///
/// Returns the 1-based line number, the text of that line and the 0-based
/// column of the offset within it. Offsets past the end of the source land on
/// the last line. Returns `None` for empty source.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    let mut start = 0;
    let mut last = None;

    for (index, line) in source.split_inclusive('\n').enumerate() {
        let len = line.chars().count();
        let end = start + len;

        if (start..end).contains(&pos) {
            return Some((index + 1, line.to_string(), pos - start));
        }

        last = Some((index + 1, line.to_string(), len));
        start = end;
    }

    last
}

/// Formats an error report pointing at the offending column:
///
/// ```text
/// Error: UnexpectedPeek (Expected ASSIGN, found INT)
/// -> shell
///   |
/// 1 | let x 5;
///   | ------^
/// ```
pub fn display_error(error: &Error, source: &str) -> String {
    let mut report = String::new();
    let position = error.get_position();

    if let ErrorTip::None = error.get_tip() {
        let _ = writeln!(report, "Error: {}", error.get_error_name());
    } else {
        let _ = writeln!(report, "Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    let _ = writeln!(report, "-> {}", position.1);

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.0) else {
        return report;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let _ = writeln!(report, "{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    let _ = writeln!(report, "{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    let _ = writeln!(report, "{:>padding$} {:->arrows$}", "|", "^");

    report
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (string.chars().skip(start).collect(), start)
}
