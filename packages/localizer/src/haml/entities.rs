/*
 * HTML character entities
 */

//! Decoding of character references in source text and re-escaping of
//! ampersands in localized output.
//!
//! Ruby interpolations (`#{...}`) are opaque: nothing inside them is ever
//! escaped, so expressions like `#{person&.name}` survive untouched.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Named character references the scanner understands. Unknown names are
/// left as written.
static NAMED_ENTITIES: Lazy<HashMap<&'static str, char>> = Lazy::new(|| {
    HashMap::from([
        ("amp", '&'),
        ("lt", '<'),
        ("gt", '>'),
        ("quot", '"'),
        ("apos", '\''),
        ("nbsp", '\u{00A0}'),
        ("copy", '\u{00A9}'),
        ("reg", '\u{00AE}'),
        ("trade", '\u{2122}'),
        ("deg", '\u{00B0}'),
        ("plusmn", '\u{00B1}'),
        ("times", '\u{00D7}'),
        ("divide", '\u{00F7}'),
        ("laquo", '\u{00AB}'),
        ("raquo", '\u{00BB}'),
        ("lsaquo", '\u{2039}'),
        ("rsaquo", '\u{203A}'),
        ("ldquo", '\u{201C}'),
        ("rdquo", '\u{201D}'),
        ("lsquo", '\u{2018}'),
        ("rsquo", '\u{2019}'),
        ("ndash", '\u{2013}'),
        ("mdash", '\u{2014}'),
        ("hellip", '\u{2026}'),
        ("middot", '\u{00B7}'),
        ("bull", '\u{2022}'),
        ("dagger", '\u{2020}'),
        ("sect", '\u{00A7}'),
        ("para", '\u{00B6}'),
        ("iexcl", '\u{00A1}'),
        ("iquest", '\u{00BF}'),
        ("cent", '\u{00A2}'),
        ("pound", '\u{00A3}'),
        ("yen", '\u{00A5}'),
        ("euro", '\u{20AC}'),
        ("frac12", '\u{00BD}'),
        ("frac14", '\u{00BC}'),
        ("frac34", '\u{00BE}'),
        ("shy", '\u{00AD}'),
    ])
});

/// Replace named and numeric character references with the characters they
/// denote. Anything that does not parse as a reference stays as written.
pub fn decode(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] != '&' {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        match parse_reference(&chars[i..]) {
            Some((c, consumed)) => {
                out.push(c);
                i += consumed;
            }
            None => {
                out.push('&');
                i += 1;
            }
        }
    }
    out
}

/// Parse a character reference at the start of `chars` (which begins with
/// `&`). Returns the character and the number of characters consumed.
fn parse_reference(chars: &[char]) -> Option<(char, usize)> {
    let semi = chars
        .iter()
        .take(10)
        .position(|&c| c == ';')
        .filter(|&p| p > 1)?;
    let body: String = chars[1..semi].iter().collect();
    let decoded = if let Some(rest) = body.strip_prefix('#') {
        let code = if let Some(hex) = rest.strip_prefix(['x', 'X']) {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            rest.parse::<u32>().ok()?
        };
        char::from_u32(code)?
    } else {
        *NAMED_ENTITIES.get(body.as_str())?
    };
    Some((decoded, semi + 1))
}

/// Escape ampersands for emission into a Haml template, leaving the
/// insides of `#{...}` interpolations alone.
pub fn escape(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '#' && i + 1 < chars.len() && chars[i + 1] == '{' {
            let end = interpolation_end(&chars, i + 2);
            for &c in &chars[i..end] {
                out.push(c);
            }
            i = end;
            continue;
        }
        if chars[i] == '&' {
            out.push_str("&amp;");
        } else {
            out.push(chars[i]);
        }
        i += 1;
    }
    out
}

/// Index just past the `}` closing an interpolation whose body starts at
/// `from`. Inner braces nest; an unterminated interpolation runs to the
/// end of the text.
fn interpolation_end(chars: &[char], from: usize) -> usize {
    let mut depth = 1;
    let mut i = from;
    while i < chars.len() {
        match chars[i] {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    chars.len()
}
