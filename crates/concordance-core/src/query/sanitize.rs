//! Search query sanitization.
//!
//! Free-form queries are reduced to a safe subset of the full-text query
//! language before they reach the index: words, balanced quoted phrases,
//! parentheses, the boolean keywords `AND`/`OR`/`NOT`, and a little harmless
//! punctuation.
//!
//! # Algorithm
//!
//! 1. Trim; empty input gives an empty query
//! 2. Split into quoted phrases and unquoted text, positionally
//! 3. Clean each piece: operator/control characters (`& ; | < > = + * \`)
//!    become spaces, then anything outside the whitelist becomes a space
//! 4. Re-emit phrases re-wrapped in quotes, in their original positions
//! 5. Collapse whitespace and trim
//!
//! Phrases are split out *before* cleaning so a quote boundary can never be
//! damaged by the character filter, and the filter cannot leak a `"` into the
//! middle of a phrase. Boolean keywords need no special rule: they are plain
//! letters, so they survive as whole words exactly as written.

/// Characters that carry meaning in full-text query syntax or in a host
/// query language; always removed, even inside phrases.
const OPERATOR_CHARS: &[char] = &['&', ';', '|', '<', '>', '=', '+', '*', '\\'];

/// Punctuation that may remain in a sanitized query.
const ALLOWED_PUNCTUATION: &[char] = &['-', '.', ',', '!', '?', ':', '(', ')', '\''];

/// One positional piece of the raw query.
#[derive(Debug, PartialEq)]
enum Segment<'a> {
    Text(&'a str),
    Phrase(&'a str),
}

/// Splits on balanced double quotes. An unmatched trailing quote stays in
/// the text segment, where the whitelist removes it.
fn split_segments(input: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = input;

    while let Some(open) = rest.find('"') {
        let after_open = &rest[open + 1..];
        match after_open.find('"') {
            Some(close) => {
                if open > 0 {
                    segments.push(Segment::Text(&rest[..open]));
                }
                segments.push(Segment::Phrase(&after_open[..close]));
                rest = &after_open[close + 1..];
            }
            None => break,
        }
    }

    if !rest.is_empty() {
        segments.push(Segment::Text(rest));
    }

    segments
}

fn strip_operator_chars(text: &str) -> String {
    text.chars()
        .map(|c| if OPERATOR_CHARS.contains(&c) { ' ' } else { c })
        .collect()
}

fn apply_whitelist(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() || ALLOWED_PUNCTUATION.contains(&c) {
                c
            } else {
                ' '
            }
        })
        .collect()
}

fn clean(text: &str) -> String {
    apply_whitelist(&strip_operator_chars(text))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Sanitizes a raw search query for the full-text index.
///
/// Never fails: input with nothing usable left in it yields an empty string,
/// which callers must treat as "no valid query".
///
/// # Examples
///
/// ```
/// use concordance_core::query::sanitize_query;
///
/// assert_eq!(sanitize_query(r#"love "one another" peace"#), r#"love "one another" peace"#);
/// assert_eq!(sanitize_query("love; DROP TABLE verses;"), "love DROP TABLE verses");
/// assert_eq!(sanitize_query("<<>>"), "");
/// ```
pub fn sanitize_query(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut output = String::with_capacity(trimmed.len());
    for segment in split_segments(trimmed) {
        match segment {
            Segment::Text(text) => output.push_str(&clean(text)),
            Segment::Phrase(phrase) => {
                let phrase = collapse_whitespace(&clean(phrase));
                if !phrase.is_empty() {
                    output.push_str(" \"");
                    output.push_str(&phrase);
                    output.push_str("\" ");
                }
            }
        }
    }

    collapse_whitespace(&output)
}
