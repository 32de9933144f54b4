//! Highlighted snippets.
//!
//! A snippet is a window of at most [`SNIPPET_MAX_TOKENS`] tokens cut from the
//! verse text, with every matched token wrapped in
//! [`SNIPPET_OPEN`]/[`SNIPPET_CLOSE`] and [`SNIPPET_ELLIPSIS`] marking the
//! sides where text was dropped. The window is placed where it covers the
//! most matches (earliest such window wins).

use super::tokenize::Token;
use crate::config::{SNIPPET_CLOSE, SNIPPET_ELLIPSIS, SNIPPET_MAX_TOKENS, SNIPPET_OPEN};
use std::collections::HashSet;

/// Builds a highlighted snippet of `text` for the given matched terms.
pub fn build_snippet(text: &str, tokens: &[Token], terms: &HashSet<&str>) -> String {
    build_snippet_with_width(text, tokens, terms, SNIPPET_MAX_TOKENS)
}

pub(crate) fn build_snippet_with_width(
    text: &str,
    tokens: &[Token],
    terms: &HashSet<&str>,
    width: usize,
) -> String {
    if tokens.is_empty() || width == 0 {
        return text.to_string();
    }

    let hits: Vec<bool> = tokens
        .iter()
        .map(|t| terms.contains(t.term.as_str()))
        .collect();
    let (first, last) = best_window(&hits, width);

    let mut snippet = String::with_capacity(text.len() + 32);
    let mut cursor = if first == 0 {
        snippet.push_str(&text[..tokens[0].start]);
        tokens[0].start
    } else {
        snippet.push_str(SNIPPET_ELLIPSIS);
        tokens[first].start
    };

    for (token, &hit) in tokens[first..=last].iter().zip(&hits[first..=last]) {
        snippet.push_str(&text[cursor..token.start]);
        if hit {
            snippet.push_str(SNIPPET_OPEN);
            snippet.push_str(&text[token.start..token.end]);
            snippet.push_str(SNIPPET_CLOSE);
        } else {
            snippet.push_str(&text[token.start..token.end]);
        }
        cursor = token.end;
    }

    if last + 1 == tokens.len() {
        snippet.push_str(&text[cursor..]);
    } else {
        snippet.push_str(SNIPPET_ELLIPSIS);
    }

    snippet
}

/// Inclusive token range of the window with the most hits.
fn best_window(hits: &[bool], width: usize) -> (usize, usize) {
    if hits.len() <= width {
        return (0, hits.len() - 1);
    }

    let mut count = hits[..width].iter().filter(|&&h| h).count();
    let mut best = (count, 0);
    for start in 1..=hits.len() - width {
        if hits[start - 1] {
            count -= 1;
        }
        if hits[start + width - 1] {
            count += 1;
        }
        if count > best.0 {
            best = (count, start);
        }
    }

    (best.1, best.1 + width - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::tokenize::tokenize;

    fn snippet(text: &str, terms: &[&str], width: usize) -> String {
        let tokens = tokenize(text);
        let terms: HashSet<&str> = terms.iter().copied().collect();
        build_snippet_with_width(text, &tokens, &terms, width)
    }

    #[test]
    fn test_short_text_highlighted_in_full() {
        assert_eq!(
            snippet("For God so loved the world,", &["loved", "world"], 32),
            "For God so <mark>loved</mark> the <mark>world</mark>,"
        );
    }

    #[test]
    fn test_highlight_keeps_original_case() {
        assert_eq!(
            snippet("The LORD is my shepherd", &["lord"], 32),
            "The <mark>LORD</mark> is my shepherd"
        );
    }

    #[test]
    fn test_window_moves_to_matches() {
        let text = "a b c d e f g love h";
        assert_eq!(snippet(text, &["love"], 3), "...f g <mark>love</mark>...");
        assert_eq!(snippet(text, &["a"], 3), "<mark>a</mark> b c...");
    }

    #[test]
    fn test_no_match_gives_leading_window() {
        assert_eq!(snippet("one two three four", &["zzz"], 2), "one two...");
    }

    #[test]
    fn test_window_at_end_keeps_trailing_punctuation() {
        assert_eq!(snippet("a b c end.", &["end"], 2), "...c <mark>end</mark>.");
    }

    #[test]
    fn test_text_without_tokens() {
        assert_eq!(snippet("...", &["x"], 32), "...");
    }

    #[test]
    fn test_best_window_prefers_earliest() {
        assert_eq!(best_window(&[true, false, true, false], 2), (0, 1));
        assert_eq!(best_window(&[false, false, true, true], 2), (2, 3));
    }
}
