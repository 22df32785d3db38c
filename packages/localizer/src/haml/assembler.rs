/*
 * Translation assembly
 */

//! Re-emits a scanned template with translations applied.
//!
//! Each localizable unit is first looked up whole; failing that it is
//! split around its inline markup and each prose sub-span is translated
//! on its own, falling back to the source text for spans with no
//! translation. Fully assembled units are recorded in the modern set;
//! units with anything missing are recorded in the new-strings set so
//! they can be sent out for translation.

use tracing::{debug, trace};

use super::entities;
use super::scanner::{has_localizable_text, Segment};
use crate::hash;
use crate::project::Project;
use crate::resource::{ResourceString, ResourceStringBuilder};
use crate::translation_set::TranslationSet;

/// Bookkeeping sets shared by all files of the Haml file type.
pub struct AssemblyContext<'a> {
    pub project: &'a Project,
    pub translations: &'a TranslationSet,
    pub locale: &'a str,
    pub path_name: &'a str,
    pub datatype: &'a str,
    /// Strings with no (complete) translation yet.
    pub newres: &'a mut TranslationSet,
    /// Whole-unit translations assembled from sub-span translations.
    pub modern: &'a mut TranslationSet,
}

impl AssemblyContext<'_> {
    fn lookup(&self, text: &str) -> Option<String> {
        let key = hash::hash_key(text);
        let hk = ResourceString::compose_hash_key(
            &self.project.id,
            self.locale,
            &key,
            self.datatype,
            None,
        );
        self.translations
            .get(&hk)
            .and_then(|r| r.target.clone())
    }
}

/// Emit the localized form of a whole template from its segments.
/// Verbatim segments pass through byte for byte.
pub fn localize_text(segments: &[Segment], ctx: &mut AssemblyContext) -> String {
    let mut out = String::new();
    for segment in segments {
        if !segment.localizable {
            out.push_str(&segment.original);
            continue;
        }
        let text = match ctx.lookup(&segment.text) {
            Some(target) => {
                trace!(key = %hash::hash_key(&segment.text), "whole-unit translation");
                target
            }
            None => assemble_translation(segment, ctx),
        };
        let escaped = entities::escape(&text);
        if ctx.project.settings.identify {
            let key = hash::hash_key(&segment.text);
            out.push_str(&format!(
                "<span loclang=\"haml\" locid=\"{}\">{}</span>",
                key, escaped
            ));
        } else {
            out.push_str(&escaped);
        }
        out.push('\n');
    }
    out
}

/// Translate a unit piece by piece around its inline markup, falling back
/// to the source text where a piece has no translation.
pub fn assemble_translation(segment: &Segment, ctx: &mut AssemblyContext) -> String {
    let pieces = split_markup(&segment.text);
    let mut total = 0usize;
    let mut translated = 0usize;
    let mut rendered: Vec<(String, bool)> = Vec::new(); // (text, is_markup)

    for piece in &pieces {
        match piece {
            Piece::Markup(m) => rendered.push((m.clone(), true)),
            Piece::Text(t) => {
                if has_localizable_text(t) {
                    total += 1;
                    match ctx.lookup(t) {
                        Some(target) => {
                            translated += 1;
                            rendered.push((target, false));
                        }
                        None => {
                            trace!(piece = %t, "no translation for sub-span");
                            rendered.push((t.clone(), false));
                        }
                    }
                } else {
                    rendered.push((t.clone(), false));
                }
            }
        }
    }

    let assembled = join_pieces(&rendered);

    if total > 0 {
        let key = hash::hash_key(&segment.text);
        let resource = ResourceStringBuilder::new(&ctx.project.id, &ctx.project.source_locale, ctx.datatype)
            .key(key)
            .source(segment.text.clone())
            .target(assembled.clone(), ctx.locale)
            .path_name(ctx.path_name)
            .build();
        if translated == total {
            debug!(key = %resource.key, "assembled full translation");
            ctx.modern.add(resource);
        } else {
            debug!(key = %resource.key, translated, total, "incomplete translation");
            ctx.newres.add(resource);
        }
    }

    assembled
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Text(String),
    Markup(String),
}

/// Split unit text into prose sub-spans and markup tokens: HTML tags and
/// lone ampersands act as separators, `#{...}` stays inside its prose.
fn split_markup(text: &str) -> Vec<Piece> {
    let chars: Vec<char> = text.chars().collect();
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    let mut push_text = |buf: &mut String, pieces: &mut Vec<Piece>| {
        let trimmed = buf.trim();
        if !trimmed.is_empty() {
            pieces.push(Piece::Text(trimmed.to_string()));
        }
        buf.clear();
    };

    while i < chars.len() {
        match chars[i] {
            '<' => {
                let mut tag = String::new();
                while i < chars.len() {
                    tag.push(chars[i]);
                    if chars[i] == '>' {
                        i += 1;
                        break;
                    }
                    i += 1;
                }
                push_text(&mut current, &mut pieces);
                pieces.push(Piece::Markup(tag));
            }
            '#' if i + 1 < chars.len() && chars[i + 1] == '{' => {
                let mut depth = 1;
                current.push('#');
                current.push('{');
                i += 2;
                while i < chars.len() && depth > 0 {
                    match chars[i] {
                        '{' => depth += 1,
                        '}' => depth -= 1,
                        _ => {}
                    }
                    current.push(chars[i]);
                    i += 1;
                }
            }
            '&' if standalone_amp(&chars, i) => {
                push_text(&mut current, &mut pieces);
                pieces.push(Piece::Markup("&".to_string()));
                i += 1;
            }
            c => {
                current.push(c);
                i += 1;
            }
        }
    }
    push_text(&mut current, &mut pieces);
    pieces
}

/// A `&` that stands on its own between spaces (a decoded `&amp;` used as
/// a conjunction) separates prose sub-spans.
fn standalone_amp(chars: &[char], i: usize) -> bool {
    let before = i == 0 || chars[i - 1].is_whitespace();
    let after = i + 1 == chars.len() || chars[i + 1].is_whitespace();
    before && after
}

/// Join rendered pieces: a space goes before an opening token and after a
/// closing token or `&`, never just inside a tag's content.
fn join_pieces(rendered: &[(String, bool)]) -> String {
    let mut out = String::new();
    let mut prev: Option<&(String, bool)> = None;
    for piece in rendered {
        if let Some(p) = prev {
            if needs_space(p, piece) {
                out.push(' ');
            }
        }
        out.push_str(&piece.0);
        prev = Some(piece);
    }
    out
}

fn needs_space(prev: &(String, bool), next: &(String, bool)) -> bool {
    let closes = |p: &(String, bool)| p.1 && (p.0.starts_with("</") || p.0 == "&");
    let opens = |p: &(String, bool)| p.1 && !p.0.starts_with("</");
    if next.1 {
        // space before an opening tag or `&`, not before a close tag
        opens(next) || closes(prev)
    } else {
        // text follows: space unless we just opened a tag around it
        !prev.1 || closes(prev)
    }
}
