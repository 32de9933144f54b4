//! Verse and verse-range retrieval.
//!
//! [`retrieve_passage`] parses a citation, validates it against the corpus
//! (fail-open) and fetches the verses it covers from one translation.

use crate::error::ReferenceError;
use crate::reference::{book_by_code, display_name, parse_reference, Reference};
use crate::storage::{BookRecord, CorpusStore, StoreError, VerseRecord};
use crate::validation::{validate_reference, ValidationOutcome};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PassageError {
    /// The citation failed to parse or names an address the corpus lacks
    #[error("{0}")]
    Reference(#[from] ReferenceError),

    #[error("No verses found for reference '{reference}' in {translation}")]
    NotFound {
        reference: String,
        translation: String,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Verses of one translation covered by a reference, ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Passage {
    pub translation: String,
    pub reference: Reference,
    pub book: BookRecord,
    /// Never empty
    pub verses: Vec<VerseRecord>,
}

impl Passage {
    pub fn is_range(&self) -> bool {
        self.verses.len() > 1
    }

    /// Single verse: its text. Range: `"[n] text"` entries joined by spaces.
    pub fn combined_text(&self) -> String {
        if !self.is_range() {
            return self
                .verses
                .first()
                .map(|v| v.text.clone())
                .unwrap_or_default();
        }

        self.verses
            .iter()
            .map(|v| format!("[{}] {}", v.locator.verse, v.text))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// "John 3:16" or "John 3:16-17", from the verses actually returned.
    pub fn heading(&self) -> String {
        let name = display_name(&self.book.code);
        match (self.verses.first(), self.verses.last()) {
            (Some(first), Some(last)) if first.locator.verse != last.locator.verse => format!(
                "{} {}:{}-{}",
                name, first.locator.chapter, first.locator.verse, last.locator.verse
            ),
            (Some(first), _) => {
                format!("{} {}:{}", name, first.locator.chapter, first.locator.verse)
            }
            _ => self.reference.display_name(),
        }
    }
}

/// Retrieves the passage a citation names from `translation`.
#[instrument(skip_all, fields(reference = %reference_text, translation = %translation))]
pub async fn retrieve_passage<S: CorpusStore + ?Sized>(
    store: &S,
    reference_text: &str,
    translation: &str,
) -> Result<Passage, PassageError> {
    let reference = parse_reference(reference_text)?;
    let translation = translation.trim().to_uppercase();

    match validate_reference(store, &reference).await {
        ValidationOutcome::Rejected(err) => return Err(err.into()),
        ValidationOutcome::Unvalidated { reason } => {
            warn!(%reason, "Retrieving unvalidated reference");
        }
        ValidationOutcome::Validated => {}
    }

    let verses = store.get_verses(&translation, &reference).await?;
    if verses.is_empty() {
        return Err(PassageError::NotFound {
            reference: reference_text.trim().to_string(),
            translation,
        });
    }

    let book = book_by_code(reference.book_code())
        .map(BookRecord::from)
        .ok_or_else(|| PassageError::NotFound {
            reference: reference_text.trim().to_string(),
            translation: translation.clone(),
        })?;

    debug!(verses = verses.len(), "Passage retrieved");

    Ok(Passage {
        translation,
        reference,
        book,
        verses,
    })
}
