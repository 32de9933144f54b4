//! Corpus storage.
//!
//! The [`CorpusStore`] trait is the only way the validator, search and
//! passage code reach verse data. It answers registry lookups, observed
//! chapter/verse bounds, verse retrieval and ranked full-text search.
//!
//! # Implementations
//!
//! - [`InMemoryCorpusStore`] - Seeded, non-persistent store for tests and embedding
//! - `RedbCorpusStore` - Persistent store on [redb](https://github.com/cberner/redb)
//!   (feature `redb-store`)
//!
//! Both keep a [`Corpus`] in memory and answer reads from it; the redb store
//! additionally writes every change through to disk before applying it to
//! the in-memory copy. Each store does its own locking.

mod corpus;
mod memory;
mod records;

#[cfg(feature = "redb-store")]
mod redb_store;

pub use corpus::{Corpus, MAX_COORDINATE};
pub use memory::InMemoryCorpusStore;
pub use records::{
    default_translations, BookRecord, SearchRow, TranslationKind, TranslationRecord, VerseRecord,
};

#[cfg(feature = "redb-store")]
pub use redb_store::RedbCorpusStore;

use crate::reference::Reference;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during corpus store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Referenced entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database error (redb)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The search query could not be compiled
    #[error("Invalid search query: {0}")]
    QuerySyntax(String),

    /// A store lock was poisoned by a panicking writer
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),

    /// A record that cannot be stored (unknown book, zero chapter, ...)
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// Read/write access to a verse corpus.
///
/// # Design Notes
///
/// - The trait is `Send + Sync` so one `Arc<dyn CorpusStore>` can serve
///   concurrent tasks.
/// - Bounds are *observed*: they come from the verses actually stored, in any
///   translation, not from a static versification table.
/// - `search_verses` expects an already sanitized query.
#[async_trait]
pub trait CorpusStore: Send + Sync {
    // =========================================================================
    // Registry
    // =========================================================================

    /// Retrieves a book by canonical code. `Ok(None)` if unknown.
    async fn get_book(&self, code: &str) -> Result<Option<BookRecord>, StoreError>;

    /// Retrieves several books in one call, in input order. Unknown codes
    /// are skipped.
    async fn get_books_batch(&self, codes: &[String]) -> Result<Vec<BookRecord>, StoreError>;

    /// Books whose name or code contains `fragment`, case-insensitively, in
    /// canonical order.
    async fn find_books_like(
        &self,
        fragment: &str,
        limit: usize,
    ) -> Result<Vec<BookRecord>, StoreError>;

    // =========================================================================
    // Translations
    // =========================================================================

    /// All translations, ordered by code.
    async fn list_translations(&self) -> Result<Vec<TranslationRecord>, StoreError>;

    async fn get_translation(&self, code: &str) -> Result<Option<TranslationRecord>, StoreError>;

    /// Adds or replaces a translation.
    async fn put_translation(&self, record: &TranslationRecord) -> Result<(), StoreError>;

    // =========================================================================
    // Verses
    // =========================================================================

    /// First and last chapter stored for a book. `Ok(None)` if it has none.
    async fn chapter_bounds(&self, book_code: &str) -> Result<Option<(u32, u32)>, StoreError>;

    /// First and last verse stored for a chapter. `Ok(None)` if it has none.
    async fn verse_bounds(
        &self,
        book_code: &str,
        chapter: u32,
    ) -> Result<Option<(u32, u32)>, StoreError>;

    /// Verses of one translation covered by a reference, ascending.
    async fn get_verses(
        &self,
        translation: &str,
        reference: &Reference,
    ) -> Result<Vec<VerseRecord>, StoreError>;

    /// Adds or replaces verses. All-or-nothing; returns the number stored.
    async fn put_verses(&self, records: &[VerseRecord]) -> Result<usize, StoreError>;

    /// Verses stored for one translation, or for all when `None`.
    async fn verse_count(&self, translation: Option<&str>) -> Result<usize, StoreError>;

    // =========================================================================
    // Search
    // =========================================================================

    /// Ranked full-text search, best (lowest score) first, at most `limit`
    /// rows.
    async fn search_verses(
        &self,
        query: &str,
        translation: &str,
        limit: usize,
    ) -> Result<Vec<SearchRow>, StoreError>;
}

// Lets callers hand out `Arc<dyn CorpusStore>` (or `Arc<S>`) wherever a store
// is expected.
#[async_trait]
impl<T: CorpusStore + ?Sized> CorpusStore for Arc<T> {
    async fn get_book(&self, code: &str) -> Result<Option<BookRecord>, StoreError> {
        (**self).get_book(code).await
    }

    async fn get_books_batch(&self, codes: &[String]) -> Result<Vec<BookRecord>, StoreError> {
        (**self).get_books_batch(codes).await
    }

    async fn find_books_like(
        &self,
        fragment: &str,
        limit: usize,
    ) -> Result<Vec<BookRecord>, StoreError> {
        (**self).find_books_like(fragment, limit).await
    }

    async fn list_translations(&self) -> Result<Vec<TranslationRecord>, StoreError> {
        (**self).list_translations().await
    }

    async fn get_translation(&self, code: &str) -> Result<Option<TranslationRecord>, StoreError> {
        (**self).get_translation(code).await
    }

    async fn put_translation(&self, record: &TranslationRecord) -> Result<(), StoreError> {
        (**self).put_translation(record).await
    }

    async fn chapter_bounds(&self, book_code: &str) -> Result<Option<(u32, u32)>, StoreError> {
        (**self).chapter_bounds(book_code).await
    }

    async fn verse_bounds(
        &self,
        book_code: &str,
        chapter: u32,
    ) -> Result<Option<(u32, u32)>, StoreError> {
        (**self).verse_bounds(book_code, chapter).await
    }

    async fn get_verses(
        &self,
        translation: &str,
        reference: &Reference,
    ) -> Result<Vec<VerseRecord>, StoreError> {
        (**self).get_verses(translation, reference).await
    }

    async fn put_verses(&self, records: &[VerseRecord]) -> Result<usize, StoreError> {
        (**self).put_verses(records).await
    }

    async fn verse_count(&self, translation: Option<&str>) -> Result<usize, StoreError> {
        (**self).verse_count(translation).await
    }

    async fn search_verses(
        &self,
        query: &str,
        translation: &str,
        limit: usize,
    ) -> Result<Vec<SearchRow>, StoreError> {
        (**self).search_verses(query, translation, limit).await
    }
}
