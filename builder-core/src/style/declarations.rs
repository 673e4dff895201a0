//! Best-effort CSS declaration block scanning.
//!
//! The editor's CSS box is parsed on every keystroke, so half-typed input
//! such as `"font-"` must never fail: malformed declarations are skipped
//! and everything else is kept.

use std::collections::BTreeMap;

/// camelCase property name to raw value.
pub type CssMap = BTreeMap<String, String>;

/// A raw slice of the source between top-level semicolons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Segment<'a> {
    /// Source text, leading whitespace and comments included.
    pub raw: &'a str,
    /// Whether a `;` followed it in the source.
    pub terminated: bool,
    /// Whether it ends inside a `/*` that is never closed.
    pub open_comment: bool,
}

/// Parse a declaration block into a camelCase property map.
///
/// Comments are stripped, declarations are split on semicolons outside
/// parentheses and quotes, and each declaration is split on its first
/// colon. Declarations without a colon, property or value are skipped.
/// Later duplicates overwrite earlier ones.
#[must_use]
pub fn parse_declaration_block(text: &str) -> CssMap {
    split_segments(text)
        .into_iter()
        .filter_map(|segment| parse_segment(segment.raw))
        .collect()
}

/// `border-top-color` -> `borderTopColor`.
#[must_use]
pub fn kebab_to_camel(property: &str) -> String {
    let mut out = String::with_capacity(property.len());
    let mut chars = property.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '-' {
            if let Some(next) = chars.peek().copied().filter(char::is_ascii_lowercase) {
                out.push(next.to_ascii_uppercase());
                chars.next();
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// `borderTopColor` -> `border-top-color`.
#[must_use]
pub fn camel_to_kebab(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Remove `/* ... */` comments. An unterminated comment runs to the end.
pub(crate) fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

/// Split on semicolons that sit outside parentheses, quotes and comments.
///
/// A trailing empty segment is dropped; a trailing whitespace-only one is
/// kept so callers can reproduce the source exactly.
pub(crate) fn split_segments(text: &str) -> Vec<Segment<'_>> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut start = 0;
    let mut open_comment = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == b'\\' {
                i += 2;
                continue;
            }
            if b == q {
                quote = None;
            }
            i += 1;
            continue;
        }
        match b {
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                match text[i + 2..].find("*/") {
                    Some(end) => i += 2 + end + 2,
                    None => {
                        open_comment = true;
                        i = bytes.len();
                    }
                }
                continue;
            }
            b'"' | b'\'' => quote = Some(b),
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b';' if depth == 0 => {
                segments.push(Segment {
                    raw: &text[start..i],
                    terminated: true,
                    open_comment: false,
                });
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    if start < text.len() {
        segments.push(Segment {
            raw: &text[start..],
            terminated: false,
            open_comment,
        });
    }
    segments
}

/// Parse one declaration into `(camelCaseProperty, value)`.
///
/// Property names are case-insensitive except for `--custom` properties.
pub(crate) fn parse_segment(raw: &str) -> Option<(String, String)> {
    let clean = strip_comments(raw);
    let (property, value) = clean.split_once(':')?;
    let property = property.trim();
    let value = value.trim();
    if property.is_empty() || value.is_empty() || property.contains(char::is_whitespace) {
        return None;
    }
    if property.starts_with("--") {
        return Some((property.to_string(), value.to_string()));
    }
    Some((kebab_to_camel(&property.to_ascii_lowercase()), value.to_string()))
}
