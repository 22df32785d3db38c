/*
 * Haml element parsing and HTML tag conversion
 */

//! Parses the element prefix of a Haml line (`%tag`, `.class`/`#id`
//! chains, the `{...}` attribute hash, and the `< > / =` suffixes), finds
//! where trailing text starts, and converts convertible elements to the
//! HTML open tag used when prose is merged across an inline tag.

use std::collections::HashSet;

use bitflags::bitflags;
use once_cell::sync::Lazy;
use smallvec::SmallVec;

use super::brackets::find_matching_brackets;
use super::{char_at, char_len, slice_chars, slice_from};

/// Tags that do not interrupt the flow of a sentence. Text on both sides
/// of one of these merges into a single localizable unit.
static NON_BREAKING_TAGS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "a", "abbr", "b", "bdi", "bdo", "br", "dfn", "del", "em", "i", "ins", "mark", "ruby",
        "rt", "span", "strong", "sub", "sup", "time", "u", "var", "wbr",
    ])
});

/// Tags that never take content.
static SELF_CLOSING_TAGS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["bdi", "bdo", "br"]));

pub fn is_nonbreaking(tag: &str) -> bool {
    NON_BREAKING_TAGS.contains(tag)
}

pub fn is_self_closing(tag: &str) -> bool {
    SELF_CLOSING_TAGS.contains(tag)
}

bitflags! {
    /// Modifiers that may follow the element prefix.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TagSuffix: u8 {
        /// `<`: whitespace removal inside the tag.
        const TRIM_INNER = 1;
        /// `>`: whitespace removal around the tag.
        const TRIM_OUTER = 2;
        /// `/`: explicit self-closing tag.
        const SELF_CLOSE = 4;
        /// `=`, `!=` or `&=`: the rest of the line is Ruby code output.
        const CODE = 8;
    }
}

/// A parsed Haml element prefix.
#[derive(Debug, Clone)]
pub struct Element {
    /// Tag name; `div` for bare `.class`/`#id` elements.
    pub tag: String,
    /// Id from a `#id` shorthand.
    pub id: Option<String>,
    /// Classes from `.class` shorthands, in order.
    pub classes: SmallVec<[String; 4]>,
    /// Raw inside of the attribute hash, without the brackets. Multi-line
    /// hashes are joined with single spaces.
    pub attrs: Option<String>,
    /// The attribute hash was never closed.
    pub unterminated: bool,
    pub suffix: TagSuffix,
    /// Line the trailing text (if any) sits on. Differs from the element's
    /// line when the attribute hash spans lines.
    pub text_line: usize,
    /// First column of trailing text on `text_line`; the line length when
    /// there is none.
    pub text_col: usize,
}

impl Element {
    pub fn is_code(&self) -> bool {
        self.suffix.contains(TagSuffix::CODE)
    }
}

/// Result of converting an element prefix to HTML markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagConversion {
    Converted {
        open: String,
        close: String,
        self_closing: bool,
    },
    /// The element has attributes that cannot be expressed as literal
    /// HTML, e.g. computed values.
    NotConvertible,
}

/// Parse the element prefix starting at `col` on `lines[line]`. Returns
/// `None` when the characters there do not form a valid element.
pub fn scan_element(lines: &[String], line: usize, col: usize) -> Option<Element> {
    let text = &lines[line];
    let mut cur_line = line;
    let mut cur = col;

    let tag;
    match char_at(text, cur)? {
        '%' => {
            let name = scan_name(text, cur + 1);
            if name.is_empty() {
                return None;
            }
            cur += 1 + char_len(&name);
            tag = name;
        }
        '.' | '#' => {
            tag = "div".to_string();
        }
        _ => return None,
    }

    let mut id = None;
    let mut classes: SmallVec<[String; 4]> = SmallVec::new();
    loop {
        match char_at(text, cur) {
            Some('.') => {
                let name = scan_name(text, cur + 1);
                if name.is_empty() {
                    // A bare '.' is punctuation, not an element.
                    if classes.is_empty() && id.is_none() && tag == "div" {
                        return None;
                    }
                    break;
                }
                cur += 1 + char_len(&name);
                classes.push(name);
            }
            Some('#') => {
                let name = scan_name(text, cur + 1);
                if name.is_empty() {
                    if classes.is_empty() && id.is_none() && tag == "div" {
                        return None;
                    }
                    break;
                }
                cur += 1 + char_len(&name);
                id = Some(name);
            }
            _ => break,
        }
    }

    // Attribute hash, possibly spanning lines.
    let mut attrs = None;
    if matches!(char_at(text, cur), Some('{') | Some('(') | Some('[')) {
        let m = find_matching_brackets(lines, cur_line, cur);
        if m.matched {
            let inner = if m.line == cur_line {
                slice_chars(&lines[cur_line], cur + 1, m.col).to_string()
            } else {
                let mut pieces = vec![slice_from(&lines[cur_line], cur + 1).to_string()];
                for l in &lines[cur_line + 1..m.line] {
                    pieces.push(l.trim().to_string());
                }
                pieces.push(slice_chars(&lines[m.line], 0, m.col).trim().to_string());
                pieces.join(" ")
            };
            attrs = Some(inner);
            cur_line = m.line;
            cur = m.col + 1;
        } else {
            // Unterminated hash: nothing after it is text.
            return Some(Element {
                tag,
                id,
                classes,
                attrs: None,
                unterminated: true,
                suffix: TagSuffix::empty(),
                text_line: m.line,
                text_col: m.col,
            });
        }
    }

    // Suffix modifiers.
    let mut suffix = TagSuffix::empty();
    let text = &lines[cur_line];
    loop {
        match char_at(text, cur) {
            Some('<') => suffix |= TagSuffix::TRIM_INNER,
            Some('>') => suffix |= TagSuffix::TRIM_OUTER,
            Some('/') => suffix |= TagSuffix::SELF_CLOSE,
            _ => break,
        }
        cur += 1;
    }
    match char_at(text, cur) {
        Some('=') => {
            suffix |= TagSuffix::CODE;
            cur += 1;
        }
        Some('!') | Some('&') if char_at(text, cur + 1) == Some('=') => {
            suffix |= TagSuffix::CODE;
            cur += 2;
        }
        _ => {}
    }

    // Trailing text starts after any spaces.
    let len = char_len(text);
    while cur < len && matches!(char_at(text, cur), Some(' ') | Some('\t')) {
        cur += 1;
    }

    Some(Element {
        tag,
        id,
        classes,
        attrs,
        unterminated: false,
        suffix,
        text_line: cur_line,
        text_col: cur,
    })
}

/// Column where localizable text starts on the line whose element prefix
/// begins at `col`, following the attribute hash across lines if needed.
/// Returns the (line, column) the text starts at.
pub fn first_localizable(lines: &[String], line: usize, col: usize) -> (usize, usize) {
    match scan_element(lines, line, col) {
        Some(el) => (el.text_line, el.text_col),
        None => (line, col),
    }
}

fn scan_name(text: &str, from: usize) -> String {
    let mut name = String::new();
    let mut i = from;
    while let Some(c) = char_at(text, i) {
        if c.is_alphanumeric() || c == '-' || c == '_' {
            name.push(c);
            i += 1;
        } else {
            break;
        }
    }
    name
}

/// One attribute from the hash: name, the quote character it was written
/// with, and the literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Attribute {
    name: String,
    quote: char,
    value: String,
}

/// Convert an element prefix to an HTML open tag. Shorthand-derived id and
/// class come first (double-quoted); hash attributes keep their source
/// order and quote style. Any attribute value that is not a quoted literal
/// makes the element non-convertible.
pub fn convert(el: &Element) -> TagConversion {
    if el.unterminated {
        return TagConversion::NotConvertible;
    }
    let attrs = match &el.attrs {
        Some(raw) => match parse_attrs(raw) {
            Some(attrs) => attrs,
            None => return TagConversion::NotConvertible,
        },
        None => Vec::new(),
    };

    let mut open = String::from("<");
    open.push_str(&el.tag);

    if let Some(id) = &el.id {
        open.push_str(&format!(" id=\"{}\"", id));
    }

    let explicit_class = attrs.iter().find(|a| a.name == "class");
    if !el.classes.is_empty() {
        let mut joined = el.classes.join(" ");
        if let Some(attr) = explicit_class {
            joined.push(' ');
            joined.push_str(&attr.value);
        }
        open.push_str(&format!(" class=\"{}\"", joined));
    }

    for attr in &attrs {
        if attr.name == "class" && !el.classes.is_empty() {
            continue;
        }
        open.push_str(&format!(
            " {}={}{}{}",
            attr.name, attr.quote, attr.value, attr.quote
        ));
    }

    let self_closing = el.suffix.contains(TagSuffix::SELF_CLOSE) || is_self_closing(&el.tag);
    if self_closing {
        open.push_str("/>");
    } else {
        open.push('>');
    }

    TagConversion::Converted {
        open,
        close: format!("</{}>", el.tag),
        self_closing,
    }
}

/// Parse the inside of an attribute hash. Both `:key => 'value'` and
/// `key: 'value'` forms are accepted; values must be quoted literals.
fn parse_attrs(raw: &str) -> Option<Vec<Attribute>> {
    let mut attrs = Vec::new();
    for pair in split_top_level(raw) {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let (name_part, value_part) = if let Some(idx) = find_outside_quotes(pair, "=>") {
            (&pair[..idx], &pair[idx + 2..])
        } else if let Some(idx) = find_outside_quotes(pair, ":").filter(|&i| i > 0) {
            (&pair[..idx], &pair[idx + 1..])
        } else {
            return None;
        };

        let name = name_part.trim().trim_start_matches(':').trim();
        if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            return None;
        }

        let value = value_part.trim();
        let mut chars = value.chars();
        let quote = chars.next()?;
        if quote != '\'' && quote != '"' {
            return None;
        }
        if !value.ends_with(quote) || char_len(value) < 2 {
            return None;
        }
        let inner = &value[1..value.len() - 1];
        if inner.contains(quote) {
            return None;
        }
        attrs.push(Attribute {
            name: name.to_string(),
            quote,
            value: inner.to_string(),
        });
    }
    Some(attrs)
}

/// Split on commas that sit outside quoted spans.
fn split_top_level(raw: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    for c in raw.chars() {
        match quote {
            Some(q) => {
                current.push(c);
                if c == q {
                    quote = None;
                }
            }
            None => {
                if c == '\'' || c == '"' {
                    quote = Some(c);
                    current.push(c);
                } else if c == ',' {
                    parts.push(std::mem::take(&mut current));
                } else {
                    current.push(c);
                }
            }
        }
    }
    if !current.trim().is_empty() {
        parts.push(current);
    }
    parts
}

/// Byte index of the first occurrence of `needle` outside quoted spans.
fn find_outside_quotes(haystack: &str, needle: &str) -> Option<usize> {
    let bytes = haystack.as_bytes();
    let nbytes = needle.as_bytes();
    let mut quote: Option<u8> = None;
    let mut i = 0;
    while i < bytes.len() {
        match quote {
            Some(q) => {
                if bytes[i] == q {
                    quote = None;
                }
            }
            None => {
                if bytes[i] == b'\'' || bytes[i] == b'"' {
                    quote = Some(bytes[i]);
                } else if bytes[i..].starts_with(nbytes) {
                    return Some(i);
                }
            }
        }
        i += 1;
    }
    None
}
