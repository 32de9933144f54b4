//! Corpus-aware reference validation.
//!
//! A parsed [`Reference`] is well-formed but may still name an address the
//! corpus does not hold ("Jude 2:1", "John 3:99"). The checks here compare it
//! against the *observed* bounds in the store, in order:
//!
//! 1. the book exists ([`check_book`])
//! 2. the chapter is within the book's stored chapters ([`check_chapter`])
//! 3. the verse (and end verse) are within the chapter's stored verses
//!    ([`check_verses`])
//!
//! # Failure policy
//!
//! Validation is **fail-open**: if the store cannot answer, the check logs the
//! error and returns [`ValidationOutcome::Unvalidated`] instead of rejecting
//! the reference. Only a store that positively contradicts the reference
//! produces [`ValidationOutcome::Rejected`].

use crate::config::SUGGESTION_LIMIT;
use crate::error::ReferenceError;
use crate::reference::Reference;
use crate::storage::{CorpusStore, StoreError};
use tracing::{debug, error, instrument};

/// Result of checking a reference against the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Every check passed
    Validated,
    /// The store could not be consulted; the reference was let through
    Unvalidated { reason: String },
    /// The reference names an address the corpus does not have
    Rejected(ReferenceError),
}

impl ValidationOutcome {
    pub fn is_validated(&self) -> bool {
        matches!(self, ValidationOutcome::Validated)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, ValidationOutcome::Rejected(_))
    }

    /// `Err` only for a rejection; both other outcomes let the caller proceed.
    pub fn into_result(self) -> Result<(), ReferenceError> {
        match self {
            ValidationOutcome::Rejected(err) => Err(err),
            ValidationOutcome::Validated | ValidationOutcome::Unvalidated { .. } => Ok(()),
        }
    }
}

fn fail_open(what: String, err: StoreError) -> ValidationOutcome {
    error!(error = %err, "Validation of {} failed, continuing unvalidated", what);
    ValidationOutcome::Unvalidated {
        reason: format!("Unable to validate {}: {}", what, err),
    }
}

fn reject(message: String) -> ValidationOutcome {
    ValidationOutcome::Rejected(ReferenceError::validation(message))
}

/// Checks that a book code exists, suggesting similar books when it does not.
pub async fn check_book<S: CorpusStore + ?Sized>(store: &S, code: &str) -> ValidationOutcome {
    match store.get_book(code).await {
        Ok(Some(_)) => ValidationOutcome::Validated,
        Ok(None) => {
            let similar = match store.find_books_like(code, SUGGESTION_LIMIT).await {
                Ok(similar) => similar,
                Err(e) => return fail_open(format!("book '{}'", code), e),
            };

            let err = ReferenceError::validation(format!("Book '{}' not found", code));
            let err = if similar.is_empty() {
                err.with_suggestion(
                    "Check the book name spelling or use a standard abbreviation",
                )
            } else {
                let names: Vec<String> = similar
                    .iter()
                    .map(|book| format!("{} ({})", book.name, book.code))
                    .collect();
                err.with_suggestion(format!("Did you mean: {}?", names.join(", ")))
            };
            ValidationOutcome::Rejected(err)
        }
        Err(e) => fail_open(format!("book '{}'", code), e),
    }
}

/// Checks a chapter against the book's stored chapters.
pub async fn check_chapter<S: CorpusStore + ?Sized>(
    store: &S,
    code: &str,
    chapter: u32,
) -> ValidationOutcome {
    let (min, max) = match store.chapter_bounds(code).await {
        Ok(Some(bounds)) => bounds,
        Ok(None) => return reject(format!("No chapters found for book '{}'", code)),
        Err(e) => return fail_open(format!("chapter {}", chapter), e),
    };

    if chapter < min || chapter > max {
        return if min == max {
            reject(format!("Book '{}' only has chapter {}", code, min))
        } else {
            reject(format!(
                "Book '{}' has chapters {}-{}, not {}",
                code, min, max, chapter
            ))
        };
    }

    ValidationOutcome::Validated
}

/// Checks a verse, or a verse span, against the chapter's stored verses.
pub async fn check_verses<S: CorpusStore + ?Sized>(
    store: &S,
    code: &str,
    chapter: u32,
    start: u32,
    end: Option<u32>,
) -> ValidationOutcome {
    let (min, max) = match store.verse_bounds(code, chapter).await {
        Ok(Some(bounds)) => bounds,
        Ok(None) => return reject(format!("No verses found for {} {}", code, chapter)),
        Err(e) => return fail_open(format!("verse {}", start), e),
    };

    if start < min || start > max {
        return reject(format!(
            "{} {} has verses {}-{}, not {}",
            code, chapter, min, max, start
        ));
    }

    if let Some(end) = end {
        if end < start {
            return reject(format!(
                "End verse {} cannot be before start verse {}",
                end, start
            ));
        }
        if end > max {
            return reject(format!(
                "{} {} has verses {}-{}, not {}",
                code, chapter, min, max, end
            ));
        }
    }

    ValidationOutcome::Validated
}

/// Runs the book, chapter and verse checks in order, stopping at the first
/// outcome that is not [`ValidationOutcome::Validated`].
#[instrument(skip_all, fields(reference = %reference))]
pub async fn validate_reference<S: CorpusStore + ?Sized>(
    store: &S,
    reference: &Reference,
) -> ValidationOutcome {
    let code = reference.book_code();

    let outcome = check_book(store, code).await;
    if !outcome.is_validated() {
        return outcome;
    }

    let outcome = check_chapter(store, code, reference.chapter()).await;
    if !outcome.is_validated() {
        return outcome;
    }

    let outcome = check_verses(
        store,
        code,
        reference.chapter(),
        reference.start_verse(),
        reference.end_verse(),
    )
    .await;

    if outcome.is_validated() {
        debug!("Reference validated");
    }
    outcome
}
