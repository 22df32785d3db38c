/*
 * Indentation analysis
 */

//! Leading-whitespace measurement and indented-block scanning.
//!
//! Indentation is the number of whitespace characters before the first
//! non-whitespace character; a tab counts as one. A block opened by a line
//! extends over every following line that is more deeply indented, with
//! blank lines belonging to the block they are surrounded by.

/// Indentation of the line containing `pos` in `buffer`: whitespace
/// characters between the preceding newline and the first following
/// non-whitespace character.
pub fn indentation(buffer: &str, pos: usize) -> usize {
    let chars: Vec<char> = buffer.chars().collect();
    let pos = pos.min(chars.len());
    let mut start = pos;
    while start > 0 && chars[start - 1] != '\n' {
        start -= 1;
    }
    let mut count = 0;
    let mut i = start;
    while i < chars.len() && chars[i] != '\n' && chars[i].is_whitespace() {
        count += 1;
        i += 1;
    }
    count
}

/// Indentation of a single line, with the byte offset of the first
/// non-whitespace character.
pub fn line_indent(line: &str) -> (usize, usize) {
    let mut count = 0;
    for (offset, c) in line.char_indices() {
        if !c.is_whitespace() {
            return (count, offset);
        }
        count += 1;
    }
    (count, line.len())
}

/// True when the line contains nothing but whitespace.
pub fn is_blank(line: &str) -> bool {
    line.chars().all(char::is_whitespace)
}

/// Index of the last line of the block opened at `start`: the line just
/// before the first following non-blank line whose indentation is at or
/// below the start line's, or the last line of input when the block runs
/// to the end. Blank lines inside the block belong to it, including a
/// blank run just before the ending dedent.
pub fn find_matching_indent(lines: &[String], start: usize) -> usize {
    let base = line_indent(&lines[start]).0;
    for (i, line) in lines.iter().enumerate().skip(start + 1) {
        if is_blank(line) {
            continue;
        }
        if line_indent(line).0 <= base {
            return i - 1;
        }
    }
    lines.len() - 1
}
