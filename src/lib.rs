#![allow(clippy::module_inception)]

use std::fmt::Write;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

/// Byte offset into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Finds the line containing byte `position`.
///
/// Returns the 1-based line number, the line text (including its newline)
/// and the offset of `position` within that line. A position at the very
/// end of the source maps onto the last line.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((line_number, line.to_string(), pos - start));
        }

        start = end;
        line_number += 1;
    }

    // End of input: point just past the last character of the last line,
    // ignoring its line break
    match source.split_inclusive('\n').last() {
        Some(line) => {
            let line_pos = line.trim_end_matches(['\r', '\n']).len();
            Some((line_number - 1, line.to_string(), line_pos))
        }
        None => Some((1, String::new(), 0)),
    }
}

/// Renders a caret-style report for `error` against the source it came from.
///
/// ```text
/// Error: UnexpectedToken (expected next token to be IDENT, got = instead)
/// -> repl
///   |
/// 1 | let = 5;
///   | ----^
/// ```
pub fn render_error(error: &Error, source: &str, label: &str) -> String {
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        let _ = writeln!(out, "Error: {} ({})", error.get_error_name(), error);
    } else {
        let _ = writeln!(
            out,
            "Error: {} ({}; {})",
            error.get_error_name(),
            error,
            error.get_tip()
        );
    }
    let _ = writeln!(out, "-> {}", label);

    let Some((line, line_text, line_pos)) = get_line_at_position(source, error.get_position().0)
    else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let _ = writeln!(out, "{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    let _ = writeln!(out, "{} | {}", line_string, line_text_removed.trim_end());

    // Columns count characters, not bytes
    let column = line_text
        .get(removed_whitespace.min(line_pos)..line_pos)
        .map_or(0, |text| text.chars().count());
    let arrows = column + 1;
    let _ = writeln!(out, "{:>padding$} {:->arrows$}", "|", "^");

    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string
        .bytes()
        .take_while(|c| *c == b' ' || *c == b'\t')
        .count();

    (String::from(&string[start..]), start)
}
