/*
 * Resource key hashing
 */

//! Stable resource keys derived from source text.
//!
//! Keys are insensitive to whitespace differences and to whether escape
//! sequences appear resolved or in their backslash form, so the same
//! sentence always maps to the same key no matter how the template author
//! wrapped or escaped it.

/// Largest prime below 2^16, used as the hash multiplier.
const HASH_MULTIPLIER: u64 = 65521;

/// Largest prime below 2^30, used as the hash modulus.
const HASH_MODULUS: u64 = 1073741789;

/// Produce the resource key for the given source text: clean it, then hash
/// the result. Keys look like `r654479252`.
pub fn hash_key(text: &str) -> String {
    let cleaned = clean(text);
    let mut hash: u64 = 0;
    for unit in cleaned.encode_utf16() {
        hash = (hash + u64::from(unit)) * HASH_MULTIPLIER % HASH_MODULUS;
    }
    format!("r{}", hash)
}

/// Normalize source text for hashing: resolve backslash escapes, then trim
/// and collapse every run of whitespace to a single space.
pub fn clean(text: &str) -> String {
    let resolved = resolve_escapes(text);
    let mut out = String::with_capacity(resolved.len());
    let mut in_whitespace = false;
    for c in resolved.chars() {
        if c.is_whitespace() {
            in_whitespace = true;
            continue;
        }
        if in_whitespace && !out.is_empty() {
            out.push(' ');
        }
        in_whitespace = false;
        out.push(c);
    }
    out
}

/// Resolve backslash escape sequences to the characters they denote.
/// `\n`, `\t` and `\r` become the control character, `\uXXXX` the code
/// point, and any other escaped character stands for itself.
fn resolve_escapes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] != '\\' || i + 1 >= chars.len() {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        match chars[i + 1] {
            'n' => {
                out.push('\n');
                i += 2;
            }
            't' => {
                out.push('\t');
                i += 2;
            }
            'r' => {
                out.push('\r');
                i += 2;
            }
            'u' if i + 6 <= chars.len() => {
                let hex: String = chars[i + 2..i + 6].iter().collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(c) => {
                        out.push(c);
                        i += 6;
                    }
                    None => {
                        out.push('u');
                        i += 2;
                    }
                }
            }
            other => {
                out.push(other);
                i += 2;
            }
        }
    }
    out
}
