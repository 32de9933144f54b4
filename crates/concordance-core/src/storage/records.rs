//! Records exchanged with a [`CorpusStore`](super::CorpusStore).

use crate::reference::{Book, Locator, Testament};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A registry row as the store sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Canonical code (e.g. "JHN")
    pub code: String,
    pub name: String,
    pub testament: Testament,
    pub author: String,
    pub genre: String,
    /// Position in the 66-book canon, 1-based
    pub canonical_order: u8,
}

impl From<&Book> for BookRecord {
    fn from(book: &Book) -> Self {
        Self {
            code: book.code.to_string(),
            name: book.name.to_string(),
            testament: book.testament,
            author: book.author.to_string(),
            genre: book.genre.to_string(),
            canonical_order: book.order,
        }
    }
}

/// Whether a text is a translation or an original-language edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationKind {
    Translation,
    Original,
}

impl fmt::Display for TranslationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationKind::Translation => write!(f, "translation"),
            TranslationKind::Original => write!(f, "original"),
        }
    }
}

/// A text edition the corpus can hold verses for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRecord {
    /// 2-5 uppercase alphanumeric characters
    pub code: String,
    pub name: String,
    /// ISO 639-1 language code
    pub language: String,
    pub kind: TranslationKind,
}

impl TranslationRecord {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        language: impl Into<String>,
        kind: TranslationKind,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            language: language.into(),
            kind,
        }
    }
}

/// Editions every store starts with.
pub fn default_translations() -> Vec<TranslationRecord> {
    use TranslationKind::{Original, Translation};

    vec![
        TranslationRecord::new("KJV", "King James Version", "en", Translation),
        TranslationRecord::new("WEB", "World English Bible", "en", Translation),
        TranslationRecord::new("TR", "Textus Receptus", "grc", Original),
        TranslationRecord::new("WH", "Westcott-Hort", "grc", Original),
        TranslationRecord::new("BYZ", "Byzantine Majority Text", "grc", Original),
        TranslationRecord::new("MT", "Masoretic Text", "hbo", Original),
        TranslationRecord::new("WLC", "Westminster Leningrad Codex", "hbo", Original),
    ]
}

/// One verse of one translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRecord {
    pub translation: String,
    pub locator: Locator,
    pub text: String,
}

impl VerseRecord {
    pub fn new(translation: impl Into<String>, locator: Locator, text: impl Into<String>) -> Self {
        Self {
            translation: translation.into(),
            locator,
            text: text.into(),
        }
    }
}

/// A ranked search match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRow {
    pub locator: Locator,
    pub text: String,
    pub book: BookRecord,
    /// Negated BM25 relevance; lower is better
    pub relevance_score: f64,
    /// Verse excerpt with matches wrapped in `<mark>`/`</mark>`
    pub snippet: String,
}
