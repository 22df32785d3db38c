/*
 * Bracket and quote matching
 */

//! Finds the close bracket matching the first opener at or after a start
//! column, possibly on a later line.
//!
//! The scan commits to the type of the first opener it sees: once a `{` is
//! found, `(` and `[` (and stray closers of other types) are ignored.
//! Quoted spans are skipped wholly, honoring backslash escapes; a quote
//! still open at the end of its line is treated as terminated there, and a
//! newline reached at depth zero before any opener ends the scan.

use super::{char_at, char_len};
use crate::chars;

/// Where a bracket scan stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketMatch {
    /// Line the scan stopped on.
    pub line: usize,
    /// Column of the matching close bracket, or of the character the scan
    /// gave up at.
    pub col: usize,
    /// True when a bracketed span was found and closed.
    pub matched: bool,
}

/// Scan `lines[start_line]` from `start_col` for a bracketed span and
/// return where its close bracket sits. Continues onto following lines
/// while a span is open.
pub fn find_matching_brackets(lines: &[String], start_line: usize, start_col: usize) -> BracketMatch {
    let mut line = start_line;
    let mut col = start_col;
    let mut open: Option<char> = None;
    let mut close = '\0';
    let mut depth = 0usize;

    while line < lines.len() {
        let text = &lines[line];
        let len = char_len(text);
        while col < len {
            let c = match char_at(text, col) {
                Some(c) => c,
                None => break,
            };
            if chars::is_quote(c) {
                col = skip_quoted(text, col, c);
                continue;
            }
            match open {
                None => {
                    if chars::is_open_bracket(c) {
                        open = Some(c);
                        close = chars::close_bracket_for(c);
                        depth = 1;
                    }
                }
                Some(o) => {
                    if c == o {
                        depth += 1;
                    } else if c == close {
                        depth -= 1;
                        if depth == 0 {
                            return BracketMatch {
                                line,
                                col,
                                matched: true,
                            };
                        }
                    }
                }
            }
            col += 1;
        }
        // End of line. With no span open the newline ends the scan.
        if open.is_none() {
            return BracketMatch {
                line,
                col: len,
                matched: false,
            };
        }
        line += 1;
        col = 0;
    }

    // Ran off the end of the input with a span still open.
    let last = lines.len().saturating_sub(1);
    BracketMatch {
        line: last,
        col: lines.last().map(|l| char_len(l)).unwrap_or(0),
        matched: false,
    }
}

/// Skip a quoted span starting at `col` (which holds the quote character)
/// and return the column just past the closing quote. Backslash escapes
/// are honored; an unterminated quote ends at the end of the line.
fn skip_quoted(text: &str, col: usize, quote: char) -> usize {
    let len = char_len(text);
    let mut i = col + 1;
    while i < len {
        match char_at(text, i) {
            Some(chars::BACKSLASH) => i += 2,
            Some(c) if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    len
}
