//! Non-persistent corpus store.

use super::{
    BookRecord, Corpus, CorpusStore, SearchRow, StoreError, TranslationRecord, VerseRecord,
};
use crate::reference::Reference;
use async_trait::async_trait;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::instrument;

/// In-memory corpus store.
///
/// Starts with the 66-book registry and the default translations and no
/// verses. Nothing is persisted; useful for tests and for embedding a small
/// corpus.
pub struct InMemoryCorpusStore {
    corpus: RwLock<Corpus>,
}

impl InMemoryCorpusStore {
    /// Creates a seeded store with no verses.
    pub fn new() -> Self {
        Self::with_corpus(Corpus::seeded())
    }

    /// Wraps an existing corpus.
    pub fn with_corpus(corpus: Corpus) -> Self {
        Self {
            corpus: RwLock::new(corpus),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Corpus>, StoreError> {
        self.corpus
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Corpus>, StoreError> {
        self.corpus
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }
}

impl Default for InMemoryCorpusStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CorpusStore for InMemoryCorpusStore {
    async fn get_book(&self, code: &str) -> Result<Option<BookRecord>, StoreError> {
        Ok(self.read()?.book(code).cloned())
    }

    async fn get_books_batch(&self, codes: &[String]) -> Result<Vec<BookRecord>, StoreError> {
        Ok(self.read()?.books_batch(codes))
    }

    async fn find_books_like(
        &self,
        fragment: &str,
        limit: usize,
    ) -> Result<Vec<BookRecord>, StoreError> {
        Ok(self.read()?.books_like(fragment, limit))
    }

    async fn list_translations(&self) -> Result<Vec<TranslationRecord>, StoreError> {
        Ok(self.read()?.translations())
    }

    async fn get_translation(&self, code: &str) -> Result<Option<TranslationRecord>, StoreError> {
        Ok(self.read()?.translation(code).cloned())
    }

    async fn put_translation(&self, record: &TranslationRecord) -> Result<(), StoreError> {
        self.write()?.insert_translation(record.clone());
        Ok(())
    }

    async fn chapter_bounds(&self, book_code: &str) -> Result<Option<(u32, u32)>, StoreError> {
        Ok(self.read()?.chapter_bounds(book_code))
    }

    async fn verse_bounds(
        &self,
        book_code: &str,
        chapter: u32,
    ) -> Result<Option<(u32, u32)>, StoreError> {
        Ok(self.read()?.verse_bounds(book_code, chapter))
    }

    async fn get_verses(
        &self,
        translation: &str,
        reference: &Reference,
    ) -> Result<Vec<VerseRecord>, StoreError> {
        Ok(self.read()?.verses(translation, reference))
    }

    #[instrument(skip_all, fields(count = records.len()))]
    async fn put_verses(&self, records: &[VerseRecord]) -> Result<usize, StoreError> {
        self.write()?.insert_verses(records)
    }

    async fn verse_count(&self, translation: Option<&str>) -> Result<usize, StoreError> {
        Ok(self.read()?.verse_count(translation))
    }

    #[instrument(skip_all, fields(translation = translation, limit = limit))]
    async fn search_verses(
        &self,
        query: &str,
        translation: &str,
        limit: usize,
    ) -> Result<Vec<SearchRow>, StoreError> {
        self.read()?.search(query, translation, limit)
    }
}
