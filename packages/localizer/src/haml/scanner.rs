/*
 * Segment scanner
 */

//! Splits a Haml template into an ordered list of segments: localizable
//! prose units and verbatim spans (structure, code, comments, blank
//! lines). Concatenating the segments' verbatim spans with the prose
//! re-emitted in place reconstructs the file.
//!
//! Prose merges across lines at the same or deeper indentation and across
//! inline non-breaking tags (`%b`, `%a`, `%span`, ...), so a sentence
//! wrapped over several template lines becomes a single translatable
//! unit. Everything else — Ruby code lines, filters, comments, doctypes,
//! element prefixes — is carried through untouched.

use tracing::trace;

use super::indent::{find_matching_indent, is_blank, line_indent};
use super::{brackets::find_matching_brackets, entities, slice_from, tag};

/// One span of the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// True for prose that should be translated.
    pub localizable: bool,
    /// For prose: the merged, entity-decoded text. For verbatim spans:
    /// identical to `original`.
    pub text: String,
    /// The exact source bytes this segment covers.
    pub original: String,
    /// Indentation of the segment's first line.
    pub indent: usize,
}

impl Segment {
    fn verbatim(original: String, indent: usize) -> Self {
        Segment {
            localizable: false,
            text: original.clone(),
            original,
            indent,
        }
    }
}

/// Scan a template into segments.
pub fn scan(source: &str) -> Vec<Segment> {
    Scanner::new(source).run()
}

/// A prose unit being accumulated across lines.
struct Accumulator {
    indent: usize,
    parts: Vec<String>,
    original: String,
    prefix: Option<Segment>,
}

struct Scanner {
    lines: Vec<String>,
    final_newline: bool,
    segments: Vec<Segment>,
    acc: Option<Accumulator>,
}

impl Scanner {
    fn new(source: &str) -> Self {
        let final_newline = source.ends_with('\n');
        let mut lines: Vec<String> = source.split('\n').map(str::to_string).collect();
        if final_newline {
            lines.pop();
        }
        Scanner {
            lines,
            final_newline,
            segments: Vec::new(),
            acc: None,
        }
    }

    /// The source line plus its newline, if it had one.
    fn raw(&self, i: usize) -> String {
        if i + 1 < self.lines.len() || self.final_newline {
            format!("{}\n", self.lines[i])
        } else {
            self.lines[i].clone()
        }
    }

    fn raw_range(&self, from: usize, to: usize) -> String {
        (from..=to).map(|i| self.raw(i)).collect()
    }

    fn run(mut self) -> Vec<Segment> {
        let mut i = 0;
        while i < self.lines.len() {
            let line = self.lines[i].clone();
            if is_blank(&line) {
                self.flush();
                let seg = Segment::verbatim(self.raw(i), 0);
                self.segments.push(seg);
                i += 1;
                continue;
            }

            let (ind, off) = line_indent(&line);
            let t = &line[off..];

            if t.starts_with("-#")
                || (t.starts_with("- #") && !t.starts_with("- #{"))
                || t.starts_with('/')
            {
                // Comment: the line and its indented block.
                self.flush();
                let end = find_matching_indent(&self.lines, i);
                trace!(line = i, end, "comment block");
                let seg = Segment::verbatim(self.raw_range(i, end), ind);
                self.segments.push(seg);
                i = end + 1;
                continue;
            }

            if is_filter(t) {
                // Filter such as :ruby or :javascript, verbatim with its
                // whole block.
                self.flush();
                let end = find_matching_indent(&self.lines, i);
                trace!(line = i, end, filter = t, "filter block");
                let seg = Segment::verbatim(self.raw_range(i, end), ind);
                self.segments.push(seg);
                i = end + 1;
                continue;
            }

            if t.starts_with("!!!") {
                self.flush();
                let seg = Segment::verbatim(self.raw(i), ind);
                self.segments.push(seg);
                i += 1;
                continue;
            }

            if t.starts_with('-') || t.starts_with('=') || t.starts_with("!=") || t.starts_with("&=")
            {
                // Ruby code line; children are scanned normally.
                self.flush();
                let end = self.consume_code(i, ind);
                let seg = Segment::verbatim(self.raw_range(i, end), ind);
                self.segments.push(seg);
                i = end + 1;
                continue;
            }

            if t.starts_with('%') || t.starts_with('.') || (t.starts_with('#') && !t.starts_with("#{"))
            {
                if let Some(el) = tag::scan_element(&self.lines, i, ind) {
                    i = self.handle_element(i, ind, el);
                    continue;
                }
            }

            self.accumulate_text(i, ind, off);
            i += 1;
        }
        self.flush();
        self.segments
    }

    /// Last line of the code statement starting at `i`: bracket spans may
    /// continue it, and a run of `|`-terminated lines forms one statement.
    fn consume_code(&self, i: usize, ind: usize) -> usize {
        let mut line = i;
        let mut col = ind;
        loop {
            let m = find_matching_brackets(&self.lines, line, col);
            if m.matched {
                line = m.line;
                col = m.col + 1;
            } else {
                line = line.max(m.line);
                break;
            }
        }
        while ends_with_pipe(&self.lines[line])
            && line + 1 < self.lines.len()
            && ends_with_pipe(&self.lines[line + 1])
        {
            line += 1;
        }
        line
    }

    fn handle_element(&mut self, i: usize, ind: usize, el: tag::Element) -> usize {
        if el.is_code() {
            // Code output such as `%p= expr`: the whole line is code.
            self.flush();
            let mut last = el.text_line;
            while ends_with_pipe(&self.lines[last])
                && last + 1 < self.lines.len()
                && ends_with_pipe(&self.lines[last + 1])
            {
                last += 1;
            }
            let seg = Segment::verbatim(self.raw_range(i, last), ind);
            self.segments.push(seg);
            return last + 1;
        }

        let trailing = slice_from(&self.lines[el.text_line], el.text_col)
            .trim_end()
            .to_string();
        let conversion = tag::convert(&el);
        let mergeable = tag::is_nonbreaking(&el.tag)
            && matches!(conversion, tag::TagConversion::Converted { .. })
            && self.acc.as_ref().is_some_and(|acc| acc.indent == ind);

        if let tag::TagConversion::Converted {
            open,
            close,
            self_closing,
        } = conversion
        {
            if mergeable {
                let raw_span = self.raw_range(i, el.text_line);
                let acc = match self.acc.as_mut() {
                    Some(acc) => acc,
                    None => return i + 1,
                };
                if self_closing && trailing.is_empty() {
                    acc.parts.push(open);
                    acc.original.push_str(&raw_span);
                    return el.text_line + 1;
                }
                if !trailing.is_empty() {
                    let text = entities::decode(&trailing);
                    let part = if self_closing {
                        format!("{} {}", open, text)
                    } else {
                        format!("{}{}{}", open, text, close)
                    };
                    acc.parts.push(part);
                    acc.original.push_str(&raw_span);
                    return el.text_line + 1;
                }
                // Non-breaking tag with structural children: verbatim.
            }
        }

        if trailing.is_empty() {
            // Structural element; its children are scanned normally.
            self.flush();
            let seg = Segment::verbatim(self.raw_range(i, el.text_line), ind);
            self.segments.push(seg);
            return el.text_line + 1;
        }

        // Element with trailing text: the prefix stays Haml, the text is
        // its own unit, closed at the end of the line.
        self.flush();
        let mut prefix = String::new();
        if el.text_line > i {
            prefix.push_str(&self.raw_range(i, el.text_line - 1));
        }
        prefix.push_str(&self.lines[el.text_line][..super::byte_offset(&self.lines[el.text_line], el.text_col)]);
        self.segments.push(Segment::verbatim(prefix, ind));

        let unit_original = format!(
            "{}{}",
            slice_from(&self.lines[el.text_line], el.text_col),
            if el.text_line + 1 < self.lines.len() || self.final_newline {
                "\n"
            } else {
                ""
            }
        );
        let text = entities::decode(&trailing);
        if has_localizable_text(&text) {
            self.segments.push(Segment {
                localizable: true,
                text,
                original: unit_original,
                indent: ind,
            });
        } else {
            self.segments.push(Segment::verbatim(unit_original, ind));
        }
        el.text_line + 1
    }

    fn accumulate_text(&mut self, i: usize, ind: usize, off: usize) {
        let trimmed = self.lines[i][off..].trim_end().to_string();
        let decoded = entities::decode(&trimmed);
        let raw = self.raw(i);
        match &mut self.acc {
            Some(acc) if ind >= acc.indent => {
                acc.parts.push(decoded);
                acc.original.push_str(&raw);
            }
            _ => {
                self.flush();
                let line = &self.lines[i];
                let prefix = Segment::verbatim(line[..off].to_string(), ind);
                let original = format!(
                    "{}{}",
                    &line[off..],
                    if i + 1 < self.lines.len() || self.final_newline {
                        "\n"
                    } else {
                        ""
                    }
                );
                self.acc = Some(Accumulator {
                    indent: ind,
                    parts: vec![decoded],
                    original,
                    prefix: Some(prefix),
                });
            }
        }
    }

    /// Close the open prose unit, if any, and emit its segments.
    fn flush(&mut self) {
        let Some(acc) = self.acc.take() else {
            return;
        };
        let text = acc.parts.join(" ");
        if let Some(prefix) = acc.prefix {
            self.segments.push(prefix);
        }
        if has_localizable_text(&text) {
            self.segments.push(Segment {
                localizable: true,
                text,
                original: acc.original,
                indent: acc.indent,
            });
        } else {
            self.segments.push(Segment::verbatim(acc.original, acc.indent));
        }
    }
}

/// A `:name` line introduces a filter block.
fn is_filter(t: &str) -> bool {
    let mut chars = t.chars();
    chars.next() == Some(':')
        && chars.next().map(|c| c.is_ascii_alphabetic()).unwrap_or(false)
        && t[1..].chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn ends_with_pipe(line: &str) -> bool {
    line.trim_end().ends_with('|')
}

/// True when text still contains prose after ignoring interpolations and
/// HTML tags. Punctuation-only and markup-only units are not extracted.
pub fn has_localizable_text(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '#' if i + 1 < chars.len() && chars[i + 1] == '{' => {
                let mut depth = 1;
                i += 2;
                while i < chars.len() && depth > 0 {
                    match chars[i] {
                        '{' => depth += 1,
                        '}' => depth -= 1,
                        _ => {}
                    }
                    i += 1;
                }
            }
            '<' => {
                while i < chars.len() && chars[i] != '>' {
                    i += 1;
                }
                i += 1;
            }
            c if c.is_alphabetic() => return true,
            _ => i += 1,
        }
    }
    false
}
