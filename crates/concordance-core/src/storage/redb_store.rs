//! Redb-backed corpus store.
//!
//! Uses [redb](https://github.com/cberner/redb), a pure Rust, ACID-compliant
//! embedded B-tree database, as the durable copy of the corpus. Reads are
//! answered from an in-memory [`Corpus`] that is rebuilt from the tables on
//! open (the full-text index is not persisted).
//!
//! # Tables
//!
//! - `books`: code (string) -> BookRecord (JSON)
//! - `translations`: code (string) -> TranslationRecord (JSON)
//! - `verses`: `"TRN:BOOK:ccc:vvv"` (string) -> VerseRecord (JSON)

use super::{
    BookRecord, Corpus, CorpusStore, SearchRow, StoreError, TranslationRecord, VerseRecord,
};
use crate::reference::{all_books, Reference};
use crate::storage::default_translations;
use async_trait::async_trait;
use redb::{Database, ReadableTable, TableDefinition};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{info, instrument};

const BOOKS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("books");
const TRANSLATIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("translations");
const VERSES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("verses");

fn db_error<E: Display>(context: &'static str) -> impl FnOnce(E) -> StoreError {
    move |e| StoreError::DatabaseError(format!("{}: {}", context, e))
}

fn serialize<T: Serialize>(value: &T, what: &str) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(value).map_err(|e| {
        StoreError::SerializationError(format!("Failed to serialize {}: {}", what, e))
    })
}

fn deserialize<T: DeserializeOwned>(bytes: &[u8], what: &str) -> Result<T, StoreError> {
    serde_json::from_slice(bytes).map_err(|e| {
        StoreError::SerializationError(format!("Failed to deserialize {}: {}", what, e))
    })
}

/// Key of a verse row. Zero-padded so keys sort by chapter and verse within
/// a book.
fn verse_key(record: &VerseRecord) -> String {
    format!(
        "{}:{}:{:03}:{:03}",
        record.translation, record.locator.book_code, record.locator.chapter, record.locator.verse
    )
}

/// Persistent corpus store.
///
/// # Example
///
/// ```ignore
/// use concordance_core::storage::{CorpusStore, RedbCorpusStore};
///
/// let store = RedbCorpusStore::open("./data/corpus.redb")?;
/// let rows = store.search_verses("shepherd", "KJV", 10).await?;
/// ```
pub struct RedbCorpusStore {
    db: Database,
    corpus: RwLock<Corpus>,
}

impl RedbCorpusStore {
    /// Opens or creates a database at the given path.
    ///
    /// Creates missing tables, seeds any missing registry books and default
    /// translations, then loads everything into memory and rebuilds the
    /// full-text indexes.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = Database::create(path.as_ref()).map_err(db_error("Failed to open database"))?;

        Self::seed(&db)?;
        let corpus = Self::hydrate(&db)?;

        info!(
            path = %path.as_ref().display(),
            books = corpus.book_count(),
            verses = corpus.verse_count(None),
            "Opened corpus store"
        );

        Ok(Self {
            db,
            corpus: RwLock::new(corpus),
        })
    }

    fn seed(db: &Database) -> Result<(), StoreError> {
        let write_txn = db
            .begin_write()
            .map_err(db_error("Failed to begin write transaction"))?;

        {
            let mut books = write_txn
                .open_table(BOOKS_TABLE)
                .map_err(db_error("Failed to create books table"))?;
            for book in all_books() {
                let exists = books
                    .get(book.code)
                    .map_err(db_error("Failed to read book"))?
                    .is_some();
                if !exists {
                    let bytes = serialize(&BookRecord::from(book), "book")?;
                    books
                        .insert(book.code, bytes.as_slice())
                        .map_err(db_error("Failed to insert book"))?;
                }
            }

            let mut translations = write_txn
                .open_table(TRANSLATIONS_TABLE)
                .map_err(db_error("Failed to create translations table"))?;
            for translation in default_translations() {
                let exists = translations
                    .get(translation.code.as_str())
                    .map_err(db_error("Failed to read translation"))?
                    .is_some();
                if !exists {
                    let bytes = serialize(&translation, "translation")?;
                    translations
                        .insert(translation.code.as_str(), bytes.as_slice())
                        .map_err(db_error("Failed to insert translation"))?;
                }
            }

            write_txn
                .open_table(VERSES_TABLE)
                .map_err(db_error("Failed to create verses table"))?;
        }

        write_txn
            .commit()
            .map_err(db_error("Failed to commit table creation"))
    }

    fn hydrate(db: &Database) -> Result<Corpus, StoreError> {
        let read_txn = db
            .begin_read()
            .map_err(db_error("Failed to begin read transaction"))?;
        let mut corpus = Corpus::new();

        let books = read_txn
            .open_table(BOOKS_TABLE)
            .map_err(db_error("Failed to open books table"))?;
        for entry in books.iter().map_err(db_error("Failed to iterate books"))? {
            let (_, value) = entry.map_err(db_error("Failed to read book entry"))?;
            corpus.insert_book(deserialize(value.value(), "book")?);
        }

        let translations = read_txn
            .open_table(TRANSLATIONS_TABLE)
            .map_err(db_error("Failed to open translations table"))?;
        for entry in translations
            .iter()
            .map_err(db_error("Failed to iterate translations"))?
        {
            let (_, value) = entry.map_err(db_error("Failed to read translation entry"))?;
            corpus.insert_translation(deserialize(value.value(), "translation")?);
        }

        let verses = read_txn
            .open_table(VERSES_TABLE)
            .map_err(db_error("Failed to open verses table"))?;
        let mut records: Vec<VerseRecord> = Vec::new();
        for entry in verses.iter().map_err(db_error("Failed to iterate verses"))? {
            let (_, value) = entry.map_err(db_error("Failed to read verse entry"))?;
            records.push(deserialize(value.value(), "verse")?);
        }
        corpus.insert_verses(&records)?;

        Ok(corpus)
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

#[async_trait]
impl CorpusStore for RedbCorpusStore {
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
        let bytes = serialize(record, "translation")?;

        // Held across the commit so the mirror applies writes in disk order
        let mut corpus = self.write()?;
        let write_txn = self
            .db
            .begin_write()
            .map_err(db_error("Failed to begin write transaction"))?;
        {
            let mut table = write_txn
                .open_table(TRANSLATIONS_TABLE)
                .map_err(db_error("Failed to open translations table"))?;
            table
                .insert(record.code.as_str(), bytes.as_slice())
                .map_err(db_error("Failed to insert translation"))?;
        }
        write_txn
            .commit()
            .map_err(db_error("Failed to commit translation"))?;

        corpus.insert_translation(record.clone());
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
        // Held across the commit so the mirror applies writes in disk order
        let mut corpus = self.write()?;

        // Reject the batch before anything reaches disk
        for record in records {
            corpus.check_verse(record)?;
        }

        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            rows.push((verse_key(record), serialize(record, "verse")?));
        }

        let write_txn = self
            .db
            .begin_write()
            .map_err(db_error("Failed to begin write transaction"))?;
        {
            let mut table = write_txn
                .open_table(VERSES_TABLE)
                .map_err(db_error("Failed to open verses table"))?;
            for (key, bytes) in &rows {
                table
                    .insert(key.as_str(), bytes.as_slice())
                    .map_err(db_error("Failed to insert verse"))?;
            }
        }
        write_txn
            .commit()
            .map_err(db_error("Failed to commit verses"))?;

        corpus.insert_verses(records)
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
