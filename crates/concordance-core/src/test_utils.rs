//! Shared fixtures for unit tests.

use crate::reference::{Locator, Reference};
use crate::storage::{
    BookRecord, Corpus, CorpusStore, InMemoryCorpusStore, SearchRow, StoreError,
    TranslationRecord, VerseRecord,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

const SAMPLE_KJV: &[(&str, u32, u32, &str)] = &[
    ("GEN", 1, 1, "In the beginning God created the heaven and the earth."),
    ("GEN", 1, 2, "And the earth was without form, and void; and darkness was upon the face of the deep. And the Spirit of God moved upon the face of the waters."),
    ("GEN", 1, 3, "And God said, Let there be light: and there was light."),
    ("PSA", 23, 1, "The LORD is my shepherd; I shall not want."),
    ("PSA", 23, 2, "He maketh me to lie down in green pastures: he leadeth me beside the still waters."),
    ("PSA", 23, 3, "He restoreth my soul: he leadeth me in the paths of righteousness for his name's sake."),
    ("PRO", 3, 5, "Trust in the LORD with all thine heart; and lean not unto thine own understanding."),
    ("JHN", 3, 16, "For God so loved the world, that he gave his only begotten Son, that whosoever believeth in him should not perish, but have everlasting life."),
    ("JHN", 3, 17, "For God sent not his Son into the world to condemn the world; but that the world through him might be saved."),
    ("JHN", 13, 34, "A new commandment I give unto you, That ye love one another; as I have loved you, that ye also love one another."),
    ("ROM", 8, 28, "And we know that all things work together for good to them that love God, to them who are the called according to his purpose."),
    ("ROM", 8, 29, "For whom he did foreknow, he also did predestinate to be conformed to the image of his Son, that he might be the firstborn among many brethren."),
    ("ROM", 8, 30, "Moreover whom he did predestinate, them he also called: and whom he called, them he also justified: and whom he justified, them he also glorified."),
    ("1JN", 4, 7, "Beloved, let us love one another: for love is of God; and every one that loveth is born of God, and knoweth God."),
    ("1JN", 4, 8, "He that loveth not knoweth not God; for God is love."),
    ("JUD", 1, 24, "Now unto him that is able to keep you from falling, and to present you faultless before the presence of his glory with exceeding joy,"),
    ("JUD", 1, 25, "To the only wise God our Saviour, be glory and majesty, dominion and power, both now and ever. Amen."),
];

/// A handful of well-known KJV verses plus John 3:16 in the WEB.
pub(crate) fn sample_verses() -> Vec<VerseRecord> {
    let mut verses: Vec<VerseRecord> = SAMPLE_KJV
        .iter()
        .map(|(book, chapter, verse, text)| {
            VerseRecord::new("KJV", Locator::new(*book, *chapter, *verse), *text)
        })
        .collect();
    verses.push(VerseRecord::new(
        "WEB",
        Locator::new("JHN", 3, 16),
        "For God so loved the world, that he gave his one and only Son, that whoever believes in him should not perish, but have eternal life.",
    ));
    verses
}

/// Seeded in-memory store holding [`sample_verses`].
pub(crate) fn sample_store() -> InMemoryCorpusStore {
    let mut corpus = Corpus::seeded();
    corpus
        .insert_verses(&sample_verses())
        .expect("sample verses are valid");
    InMemoryCorpusStore::with_corpus(corpus)
}

fn unavailable<T>() -> Result<T, StoreError> {
    Err(StoreError::DatabaseError("connection refused".to_string()))
}

/// Store whose every operation fails, for fail-open/fail-closed tests.
pub(crate) struct FailingStore;

#[async_trait]
impl CorpusStore for FailingStore {
    async fn get_book(&self, _code: &str) -> Result<Option<BookRecord>, StoreError> {
        unavailable()
    }

    async fn get_books_batch(&self, _codes: &[String]) -> Result<Vec<BookRecord>, StoreError> {
        unavailable()
    }

    async fn find_books_like(
        &self,
        _fragment: &str,
        _limit: usize,
    ) -> Result<Vec<BookRecord>, StoreError> {
        unavailable()
    }

    async fn list_translations(&self) -> Result<Vec<TranslationRecord>, StoreError> {
        unavailable()
    }

    async fn get_translation(&self, _code: &str) -> Result<Option<TranslationRecord>, StoreError> {
        unavailable()
    }

    async fn put_translation(&self, _record: &TranslationRecord) -> Result<(), StoreError> {
        unavailable()
    }

    async fn chapter_bounds(&self, _book_code: &str) -> Result<Option<(u32, u32)>, StoreError> {
        unavailable()
    }

    async fn verse_bounds(
        &self,
        _book_code: &str,
        _chapter: u32,
    ) -> Result<Option<(u32, u32)>, StoreError> {
        unavailable()
    }

    async fn get_verses(
        &self,
        _translation: &str,
        _reference: &Reference,
    ) -> Result<Vec<VerseRecord>, StoreError> {
        unavailable()
    }

    async fn put_verses(&self, _records: &[VerseRecord]) -> Result<usize, StoreError> {
        unavailable()
    }

    async fn verse_count(&self, _translation: Option<&str>) -> Result<usize, StoreError> {
        unavailable()
    }

    async fn search_verses(
        &self,
        _query: &str,
        _translation: &str,
        _limit: usize,
    ) -> Result<Vec<SearchRow>, StoreError> {
        unavailable()
    }
}

/// Wraps a store and counts batched book lookups.
pub(crate) struct CountingStore<S> {
    pub inner: S,
    pub batch_calls: AtomicUsize,
}

impl<S> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            batch_calls: AtomicUsize::new(0),
        }
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<S: CorpusStore> CorpusStore for CountingStore<S> {
    async fn get_book(&self, code: &str) -> Result<Option<BookRecord>, StoreError> {
        self.inner.get_book(code).await
    }

    async fn get_books_batch(&self, codes: &[String]) -> Result<Vec<BookRecord>, StoreError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_books_batch(codes).await
    }

    async fn find_books_like(
        &self,
        fragment: &str,
        limit: usize,
    ) -> Result<Vec<BookRecord>, StoreError> {
        self.inner.find_books_like(fragment, limit).await
    }

    async fn list_translations(&self) -> Result<Vec<TranslationRecord>, StoreError> {
        self.inner.list_translations().await
    }

    async fn get_translation(&self, code: &str) -> Result<Option<TranslationRecord>, StoreError> {
        self.inner.get_translation(code).await
    }

    async fn put_translation(&self, record: &TranslationRecord) -> Result<(), StoreError> {
        self.inner.put_translation(record).await
    }

    async fn chapter_bounds(&self, book_code: &str) -> Result<Option<(u32, u32)>, StoreError> {
        self.inner.chapter_bounds(book_code).await
    }

    async fn verse_bounds(
        &self,
        book_code: &str,
        chapter: u32,
    ) -> Result<Option<(u32, u32)>, StoreError> {
        self.inner.verse_bounds(book_code, chapter).await
    }

    async fn get_verses(
        &self,
        translation: &str,
        reference: &Reference,
    ) -> Result<Vec<VerseRecord>, StoreError> {
        self.inner.get_verses(translation, reference).await
    }

    async fn put_verses(&self, records: &[VerseRecord]) -> Result<usize, StoreError> {
        self.inner.put_verses(records).await
    }

    async fn verse_count(&self, translation: Option<&str>) -> Result<usize, StoreError> {
        self.inner.verse_count(translation).await
    }

    async fn search_verses(
        &self,
        query: &str,
        translation: &str,
        limit: usize,
    ) -> Result<Vec<SearchRow>, StoreError> {
        self.inner.search_verses(query, translation, limit).await
    }
}
