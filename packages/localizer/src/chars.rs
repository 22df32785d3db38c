/*
 * Character Codes
 */
#![allow(non_upper_case_globals)]

//! Character constants used throughout the scanner

// Special characters
pub const TAB: char = '\t';
pub const LF: char = '\n'; // Line feed
pub const NEWLINE: char = '\n'; // Alias for LF
pub const CR: char = '\r'; // Carriage return
pub const SPACE: char = ' ';
pub const NBSP: char = '\u{00A0}';

// Punctuation
pub const BANG: char = '!';
pub const DQ: char = '"';
pub const HASH: char = '#';
pub const PERCENT: char = '%';
pub const AMPERSAND: char = '&';
pub const SQ: char = '\'';
pub const LPAREN: char = '(';
pub const RPAREN: char = ')';
pub const COMMA: char = ',';
pub const MINUS: char = '-';
pub const PERIOD: char = '.';
pub const SLASH: char = '/';
pub const COLON: char = ':';
pub const SEMICOLON: char = ';';
pub const LT: char = '<';
pub const EQ: char = '=';
pub const GT: char = '>';

// Brackets
pub const LBRACKET: char = '[';
pub const BACKSLASH: char = '\\';
pub const RBRACKET: char = ']';
pub const LBRACE: char = '{';
pub const BAR: char = '|';
pub const RBRACE: char = '}';

/// True for the characters that may open a bracketed span.
pub fn is_open_bracket(c: char) -> bool {
    matches!(c, LBRACE | LPAREN | LBRACKET)
}

/// Close bracket matching the given open bracket.
pub fn close_bracket_for(open: char) -> char {
    match open {
        LBRACE => RBRACE,
        LPAREN => RPAREN,
        LBRACKET => RBRACKET,
        other => other,
    }
}

/// True for the two Ruby string quote characters.
pub fn is_quote(c: char) -> bool {
    c == SQ || c == DQ
}
