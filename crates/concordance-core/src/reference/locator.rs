//! Structured citation values.
//!
//! A [`Locator`] names exactly one verse; a [`LocatorRange`] names an
//! inclusive span of verses inside one chapter. The parser produces a
//! [`Reference`], which is one or the other.

use super::books::display_name;
use crate::error::ReferenceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single resolved `(book, chapter, verse)` address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Locator {
    /// Canonical book code (e.g. "JHN")
    pub book_code: String,
    pub chapter: u32,
    pub verse: u32,
}

impl Locator {
    pub fn new(book_code: impl Into<String>, chapter: u32, verse: u32) -> Self {
        Self {
            book_code: book_code.into(),
            chapter,
            verse,
        }
    }

    /// Renders the locator with the book's display name ("John 3:16").
    pub fn display_name(&self) -> String {
        format!(
            "{} {}:{}",
            display_name(&self.book_code),
            self.chapter,
            self.verse
        )
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.book_code, self.chapter, self.verse)
    }
}

/// An inclusive span of verses within one chapter of one book.
///
/// Invariant: `start_verse <= end_verse`. The only way to build one is
/// [`LocatorRange::new`], which enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LocatorRange {
    book_code: String,
    chapter: u32,
    start_verse: u32,
    end_verse: u32,
}

impl LocatorRange {
    /// Creates a range, rejecting `end_verse < start_verse`.
    pub fn new(
        book_code: impl Into<String>,
        chapter: u32,
        start_verse: u32,
        end_verse: u32,
    ) -> Result<Self, ReferenceError> {
        if end_verse < start_verse {
            return Err(ReferenceError::syntax(format!(
                "End verse ({}) cannot be before start verse ({})",
                end_verse, start_verse
            )));
        }

        Ok(Self {
            book_code: book_code.into(),
            chapter,
            start_verse,
            end_verse,
        })
    }

    pub fn book_code(&self) -> &str {
        &self.book_code
    }

    pub fn chapter(&self) -> u32 {
        self.chapter
    }

    pub fn start_verse(&self) -> u32 {
        self.start_verse
    }

    pub fn end_verse(&self) -> u32 {
        self.end_verse
    }

    /// Number of verses covered (always at least 1).
    pub fn len(&self) -> usize {
        (self.end_verse - self.start_verse) as usize + 1
    }

    /// A range is never empty; provided for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Expands the range into one locator per verse, ascending.
    pub fn verses(&self) -> Vec<Locator> {
        (self.start_verse..=self.end_verse)
            .map(|verse| Locator::new(self.book_code.clone(), self.chapter, verse))
            .collect()
    }
}

impl fmt::Display for LocatorRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start_verse == self.end_verse {
            write!(f, "{} {}:{}", self.book_code, self.chapter, self.start_verse)
        } else {
            write!(
                f,
                "{} {}:{}-{}",
                self.book_code, self.chapter, self.start_verse, self.end_verse
            )
        }
    }
}

/// Output of the citation parser: one verse or a verse range.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reference {
    Single(Locator),
    Range(LocatorRange),
}

impl Reference {
    pub fn book_code(&self) -> &str {
        match self {
            Reference::Single(locator) => &locator.book_code,
            Reference::Range(range) => range.book_code(),
        }
    }

    pub fn chapter(&self) -> u32 {
        match self {
            Reference::Single(locator) => locator.chapter,
            Reference::Range(range) => range.chapter(),
        }
    }

    pub fn start_verse(&self) -> u32 {
        match self {
            Reference::Single(locator) => locator.verse,
            Reference::Range(range) => range.start_verse(),
        }
    }

    /// End of the span, or `None` for a single verse.
    pub fn end_verse(&self) -> Option<u32> {
        match self {
            Reference::Single(_) => None,
            Reference::Range(range) => Some(range.end_verse()),
        }
    }

    /// Last verse covered (the start verse for a single locator).
    pub fn last_verse(&self) -> u32 {
        self.end_verse().unwrap_or_else(|| self.start_verse())
    }

    pub fn is_range(&self) -> bool {
        matches!(self, Reference::Range(_))
    }

    /// Number of verses covered, without expanding the span.
    pub fn verse_count(&self) -> usize {
        match self {
            Reference::Single(_) => 1,
            Reference::Range(range) => range.len(),
        }
    }

    /// All verses covered by this reference, ascending.
    pub fn locators(&self) -> Vec<Locator> {
        match self {
            Reference::Single(locator) => vec![locator.clone()],
            Reference::Range(range) => range.verses(),
        }
    }

    /// Renders with the book's display name ("Romans 8:28-30").
    pub fn display_name(&self) -> String {
        match self {
            Reference::Single(locator) => locator.display_name(),
            Reference::Range(range) => format!(
                "{} {}:{}-{}",
                display_name(range.book_code()),
                range.chapter(),
                range.start_verse(),
                range.end_verse()
            ),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Single(locator) => fmt::Display::fmt(locator, f),
            Reference::Range(range) => fmt::Display::fmt(range, f),
        }
    }
}
