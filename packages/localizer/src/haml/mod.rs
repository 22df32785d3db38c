/*
 * Haml scanning and localization
 */

//! Line-oriented scanner for Haml templates plus the localization driver
//! built on top of it.
//!
//! The scanner never evaluates Ruby and never renders the template; it
//! only separates localizable prose from structure so that everything
//! except the prose can be reproduced byte for byte.

pub mod assembler;
pub mod brackets;
pub mod entities;
pub mod file;
pub mod file_type;
pub mod indent;
pub mod scanner;
pub mod tag;

pub use file::HamlFile;
pub use file_type::HamlFileType;
pub use scanner::Segment;

/// Number of characters in a line. Columns throughout this module are
/// character offsets, not byte offsets.
pub(crate) fn char_len(line: &str) -> usize {
    line.chars().count()
}

/// Character at the given column, if the line is long enough.
pub(crate) fn char_at(line: &str, col: usize) -> Option<char> {
    line.chars().nth(col)
}

/// Byte offset of the given character column. Columns past the end of the
/// line map to the line's length.
pub(crate) fn byte_offset(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}

/// Slice of a line between two character columns.
pub(crate) fn slice_chars(line: &str, from: usize, to: usize) -> &str {
    &line[byte_offset(line, from)..byte_offset(line, to)]
}

/// Slice of a line from a character column to the end.
pub(crate) fn slice_from(line: &str, from: usize) -> &str {
    &line[byte_offset(line, from)..]
}
