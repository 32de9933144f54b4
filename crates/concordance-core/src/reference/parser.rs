//! Citation parser.
//!
//! Turns free-form citations ("John 3:16", "1 Cor 13:4-7", "ps 23:1") into a
//! [`Reference`]. Parsing is pure static-grammar work: it never touches the
//! corpus, so every rule here is unit-testable without a store. Checking that
//! the address actually exists is the validator's job
//! (see [`crate::validation`]).
//!
//! # Grammar
//!
//! ```text
//! <book-name> <chapter>:<verse>[-<end-verse>]
//! ```
//!
//! `<book-name>` is everything before the trailing `chapter:verse` group, so
//! book names that contain digits ("1 Corinthians") are captured whole.

use super::books::normalize_book_name;
use super::locator::{Locator, LocatorRange, Reference};
use crate::error::ReferenceError;
use once_cell::sync::Lazy;
use regex::Regex;

// Book name (lazy) + trailing "chapter:verse" with optional "-end"
static REFERENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?)\s+([0-9]+):([0-9]+)(?:-([0-9]+))?$")
        .expect("Invalid reference regex pattern")
});

const FORMAT_HINT: &str =
    "Please use format: 'Book Chapter:Verse' (e.g., 'John 3:16', 'Romans 8:28-30')";

/// Parses a citation into a single verse or a verse range.
///
/// # Errors
///
/// Returns a syntax [`ReferenceError`] (always with a suggestion) when:
/// - the input is empty or whitespace-only
/// - there is no trailing `chapter:verse` group, or no book name before it
/// - the book name is not a known alias
/// - chapter or verse is zero or does not fit in a `u32`
/// - the end verse comes before the start verse
///
/// # Examples
///
/// ```
/// use concordance_core::reference::{parse_reference, Locator, Reference};
///
/// let parsed = parse_reference("John 3:16").unwrap();
/// assert_eq!(parsed, Reference::Single(Locator::new("JHN", 3, 16)));
///
/// let range = parse_reference("Romans 8:28-30").unwrap();
/// assert_eq!(range.end_verse(), Some(30));
/// ```
pub fn parse_reference(text: &str) -> Result<Reference, ReferenceError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ReferenceError::syntax("Empty reference")
            .with_suggestion("Please provide a reference like 'John 3:16' or 'Romans 8:28-30'"));
    }

    let captures = REFERENCE_PATTERN.captures(trimmed).ok_or_else(|| {
        ReferenceError::syntax(format!(
            "Invalid reference format: '{}'. Expected format: 'Book Chapter:Verse'",
            trimmed
        ))
        .with_suggestion(reference_format_suggestion(trimmed))
    })?;

    // Groups 1-3 are mandatory in the pattern
    let book_name = &captures[1];
    let book_code = normalize_book_name(book_name)
        .map_err(|e| ReferenceError::from(e).with_suggestion(unknown_book_suggestion()))?;

    let chapter = parse_number(&captures[2], trimmed)?;
    if chapter < 1 {
        return Err(ReferenceError::syntax(format!("Invalid chapter number: {}", chapter))
            .with_suggestion("Chapter numbers start at 1 (e.g., 'Genesis 1:1')"));
    }

    let start_verse = parse_number(&captures[3], trimmed)?;
    if start_verse < 1 {
        return Err(ReferenceError::syntax(format!("Invalid verse number: {}", start_verse))
            .with_suggestion("Verse numbers start at 1 (e.g., 'Genesis 1:1')"));
    }

    match captures.get(4) {
        Some(end) => {
            let end_verse = parse_number(end.as_str(), trimmed)?;
            let range = LocatorRange::new(book_code, chapter, start_verse, end_verse)
                .map_err(|e| {
                    e.with_suggestion(format!(
                        "Write ranges low to high (e.g., '{} {}:{}-{}')",
                        book_name.trim(),
                        chapter,
                        end_verse,
                        start_verse
                    ))
                })?;
            Ok(Reference::Range(range))
        }
        None => Ok(Reference::Single(Locator::new(
            book_code,
            chapter,
            start_verse,
        ))),
    }
}

fn parse_number(digits: &str, reference: &str) -> Result<u32, ReferenceError> {
    digits.parse::<u32>().map_err(|e| {
        ReferenceError::syntax(format!(
            "Invalid number in reference '{}': {}",
            reference, e
        ))
        .with_suggestion(FORMAT_HINT)
    })
}

fn unknown_book_suggestion() -> String {
    "Check the book name spelling or use a standard abbreviation (e.g., 'Gen', 'Matt', '1 Cor')"
        .to_string()
}

/// Picks the most specific correction for a citation that failed to parse.
///
/// Checks, in order: no digits at all, no colon, more than one colon, and a
/// leading bare number (chapter given without a book).
pub fn reference_format_suggestion(reference: &str) -> String {
    let lower = reference.to_lowercase();

    if !lower.chars().any(|c| c.is_ascii_digit()) {
        return "Biblical references need chapter and verse numbers (e.g., 'John 3:16')"
            .to_string();
    }

    if !lower.contains(':') {
        return "Use colon to separate chapter and verse (e.g., 'John 3:16')".to_string();
    }

    if lower.matches(':').count() > 1 {
        return "Use only one colon between chapter and verse (e.g., 'John 3:16')".to_string();
    }

    match lower.split_whitespace().next() {
        None => "Please include a book name (e.g., 'John', 'Genesis', 'Romans')".to_string(),
        Some(first) if first.chars().all(|c| c.is_ascii_digit() || c == ':' || c == '-') => {
            "Start with book name, not chapter number (e.g., 'John 3:16' not '3:16')".to_string()
        }
        Some(_) => FORMAT_HINT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::books::BOOKS;

    #[test]
    fn test_parse_single_verse() {
        assert_eq!(
            parse_reference("John 3:16").unwrap(),
            Reference::Single(Locator::new("JHN", 3, 16))
        );
        assert_eq!(
            parse_reference("Gen 1:1").unwrap(),
            Reference::Single(Locator::new("GEN", 1, 1))
        );
        assert_eq!(
            parse_reference("  Psalm 23:1  ").unwrap(),
            Reference::Single(Locator::new("PSA", 23, 1))
        );
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(
            parse_reference("Romans 8:28-30").unwrap(),
            Reference::Range(LocatorRange::new("ROM", 8, 28, 30).unwrap())
        );
        assert_eq!(
            parse_reference("1 Cor 13:4-7").unwrap(),
            Reference::Range(LocatorRange::new("1CO", 13, 4, 7).unwrap())
        );
    }

    #[test]
    fn test_parse_numbered_book_names() {
        let parsed = parse_reference("1 John 4:8").unwrap();
        assert_eq!(parsed.book_code(), "1JN");
        let parsed = parse_reference("2Tim 3:16").unwrap();
        assert_eq!(parsed.book_code(), "2TI");
        let parsed = parse_reference("1 Thessalonians 5:17").unwrap();
        assert_eq!(parsed.book_code(), "1TH");
    }

    #[test]
    fn test_parse_end_before_start_is_syntax_error() {
        let err = parse_reference("John 3:16-15").unwrap_err();
        assert!(err.is_syntax());
        assert!(err.message.contains("End verse (15) cannot be before start verse (16)"));
        assert!(err.suggestion.is_some());
    }

    #[test]
    fn test_parse_missing_book() {
        let err = parse_reference("3:16").unwrap_err();
        assert!(err.is_syntax());
        assert!(err.suggestion.unwrap().contains("Start with book name"));
    }

    #[test]
    fn test_parse_empty_input() {
        for input in ["", "   ", "\t\n"] {
            let err = parse_reference(input).unwrap_err();
            assert_eq!(err.message, "Empty reference");
        }
    }

    #[test]
    fn test_parse_unknown_book() {
        let err = parse_reference("Hezekiah 1:1").unwrap_err();
        assert!(err.is_syntax());
        assert_eq!(err.message, "Unknown book name: 'Hezekiah'");
    }

    #[test]
    fn test_parse_zero_chapter_and_verse() {
        let err = parse_reference("John 0:16").unwrap_err();
        assert!(err.message.contains("Invalid chapter number"));
        let err = parse_reference("John 3:0").unwrap_err();
        assert!(err.message.contains("Invalid verse number"));
    }

    #[test]
    fn test_parse_overflowing_number() {
        let err = parse_reference("John 99999999999:1").unwrap_err();
        assert!(err.is_syntax());
        assert!(err.message.contains("Invalid number"));
    }

    #[test]
    fn test_parse_malformed_shapes() {
        for input in ["John", "John 3", "John 3:", "John 3:16:17", "John 3-16", "John3:16"] {
            let err = parse_reference(input).unwrap_err();
            assert!(err.is_syntax(), "{input} should be a syntax error");
        }
    }

    #[test]
    fn test_round_trip_every_display_name() {
        for book in BOOKS.iter() {
            let text = format!("{} {}:{}", book.name, 2, 7);
            let parsed = parse_reference(&text).unwrap();
            assert_eq!(parsed, Reference::Single(Locator::new(book.code, 2, 7)));
        }
    }

    #[test]
    fn test_round_trip_through_locator_display_name() {
        let locator = Locator::new("SNG", 2, 1);
        let parsed = parse_reference(&locator.display_name()).unwrap();
        assert_eq!(parsed, Reference::Single(locator));
    }

    #[test]
    fn test_format_suggestions() {
        assert!(reference_format_suggestion("John").contains("chapter and verse numbers"));
        assert!(reference_format_suggestion("John 3 16").contains("colon"));
        assert!(reference_format_suggestion("John 3:16:1").contains("only one colon"));
        assert!(reference_format_suggestion("3:16").contains("Start with book name"));
        assert!(reference_format_suggestion("John 3:x").contains("Book Chapter:Verse"));
    }
}
