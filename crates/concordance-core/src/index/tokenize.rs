//! Verse tokenizer.
//!
//! Splits text on non-alphanumeric characters and lowercases each run. Spans
//! are byte offsets into the *original* text so snippets can be cut from it
//! without re-tokenizing. No stop-word removal: phrase matching needs every
//! position.

/// One token and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lowercased term
    pub term: String,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
}

/// Tokenizes text into lowercased alphanumeric runs with byte spans.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        if c.is_alphanumeric() {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start.take() {
            tokens.push(Token {
                term: text[s..i].to_lowercase(),
                start: s,
                end: i,
            });
        }
    }
    // Last token (no trailing separator)
    if let Some(s) = start {
        tokens.push(Token {
            term: text[s..].to_lowercase(),
            start: s,
            end: text.len(),
        });
    }

    tokens
}
