//! In-memory corpus state shared by the store implementations.
//!
//! [`Corpus`] holds everything a store answers queries from: the book
//! registry rows, the translation catalogue, verse text per translation
//! (with one [`FullTextIndex`] each), and the observed chapter/verse bounds
//! per book. It is synchronous and unlocked; stores own the locking.
//!
//! # Verse ids
//!
//! Verses are keyed by a `u64` that packs `(canonical_order, chapter,
//! verse)` so that ascending id order *is* canonical order. The index uses
//! the same id, which gives search its canonical tie-break.

use super::records::{
    default_translations, BookRecord, SearchRow, TranslationRecord, VerseRecord,
};
use super::StoreError;
use crate::index::FullTextIndex;
use crate::query::compile_query;
use crate::reference::{all_books, Locator, Reference};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Largest chapter or verse number a verse id can hold.
pub const MAX_COORDINATE: u32 = (1 << 24) - 1;

/// Packs a canonical address into an order-preserving id.
pub(crate) fn verse_id(canonical_order: u8, chapter: u32, verse: u32) -> u64 {
    (u64::from(canonical_order) << 48) | (u64::from(chapter) << 24) | u64::from(verse)
}

#[derive(Default)]
struct TranslationText {
    verses: BTreeMap<u64, VerseRecord>,
    index: FullTextIndex,
}

/// Corpus contents and indexes.
#[derive(Default)]
pub struct Corpus {
    books: BTreeMap<String, BookRecord>,
    translations: BTreeMap<String, TranslationRecord>,
    texts: HashMap<String, TranslationText>,
    /// book code -> chapter -> (min verse, max verse), across all translations
    bounds: HashMap<String, BTreeMap<u32, (u32, u32)>>,
}

impl Corpus {
    /// Creates an empty corpus with no books or translations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a corpus seeded with the 66-book registry and the default
    /// translation catalogue, but no verses.
    pub fn seeded() -> Self {
        let mut corpus = Self::new();
        for book in all_books() {
            corpus.insert_book(BookRecord::from(book));
        }
        for translation in default_translations() {
            corpus.insert_translation(translation);
        }
        corpus
    }

    // =========================================================================
    // Books
    // =========================================================================

    pub fn insert_book(&mut self, record: BookRecord) {
        self.books.insert(record.code.clone(), record);
    }

    pub fn book(&self, code: &str) -> Option<&BookRecord> {
        self.books.get(code)
    }

    /// Books for the given codes, in input order; unknown codes are skipped.
    pub fn books_batch(&self, codes: &[String]) -> Vec<BookRecord> {
        codes
            .iter()
            .filter_map(|code| self.books.get(code).cloned())
            .collect()
    }

    /// Books whose name or code contains `fragment` (case-insensitive), in
    /// canonical order, at most `limit`.
    pub fn books_like(&self, fragment: &str, limit: usize) -> Vec<BookRecord> {
        let needle = fragment.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<&BookRecord> = self
            .books
            .values()
            .filter(|book| {
                book.name.to_lowercase().contains(&needle)
                    || book.code.to_lowercase().contains(&needle)
            })
            .collect();
        matches.sort_by_key(|book| book.canonical_order);
        matches.into_iter().take(limit).cloned().collect()
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    // =========================================================================
    // Translations
    // =========================================================================

    pub fn insert_translation(&mut self, record: TranslationRecord) {
        self.translations.insert(record.code.clone(), record);
    }

    pub fn translation(&self, code: &str) -> Option<&TranslationRecord> {
        self.translations.get(code)
    }

    /// All translations, ordered by code.
    pub fn translations(&self) -> Vec<TranslationRecord> {
        self.translations.values().cloned().collect()
    }

    // =========================================================================
    // Verses
    // =========================================================================

    /// Observed `(first, last)` chapter of a book in any translation.
    pub fn chapter_bounds(&self, book_code: &str) -> Option<(u32, u32)> {
        let chapters = self.bounds.get(book_code)?;
        let first = chapters.keys().next()?;
        let last = chapters.keys().next_back()?;
        Some((*first, *last))
    }

    /// Observed `(first, last)` verse of a chapter in any translation.
    pub fn verse_bounds(&self, book_code: &str, chapter: u32) -> Option<(u32, u32)> {
        self.bounds.get(book_code)?.get(&chapter).copied()
    }

    /// Verses of `translation` covered by `reference`, ascending by verse.
    pub fn verses(&self, translation: &str, reference: &Reference) -> Vec<VerseRecord> {
        let (Some(text), Some(book)) = (
            self.texts.get(translation),
            self.books.get(reference.book_code()),
        ) else {
            return Vec::new();
        };

        let chapter = reference.chapter();
        if chapter > MAX_COORDINATE {
            return Vec::new();
        }
        let order = book.canonical_order;
        let start = verse_id(order, chapter, reference.start_verse().min(MAX_COORDINATE));
        let end = verse_id(order, chapter, reference.last_verse().min(MAX_COORDINATE));

        text.verses.range(start..=end).map(|(_, v)| v.clone()).collect()
    }

    /// Checks a verse against the catalogue and returns its id.
    pub fn check_verse(&self, record: &VerseRecord) -> Result<u64, StoreError> {
        if !self.translations.contains_key(&record.translation) {
            return Err(StoreError::NotFound(format!(
                "Translation '{}'",
                record.translation
            )));
        }

        let Locator {
            book_code,
            chapter,
            verse,
        } = &record.locator;
        let book = self.books.get(book_code).ok_or_else(|| {
            StoreError::InvalidRecord(format!("Unknown book code '{}'", book_code))
        })?;

        if *chapter == 0 || *verse == 0 || *chapter > MAX_COORDINATE || *verse > MAX_COORDINATE {
            return Err(StoreError::InvalidRecord(format!(
                "Verse address out of range: {}",
                record.locator
            )));
        }

        Ok(verse_id(book.canonical_order, *chapter, *verse))
    }

    /// Inserts or replaces verses. Either every record is accepted or none is.
    pub fn insert_verses(&mut self, records: &[VerseRecord]) -> Result<usize, StoreError> {
        let ids = records
            .iter()
            .map(|record| self.check_verse(record))
            .collect::<Result<Vec<_>, _>>()?;

        for (id, record) in ids.into_iter().zip(records) {
            let locator = &record.locator;
            self.bounds
                .entry(locator.book_code.clone())
                .or_default()
                .entry(locator.chapter)
                .and_modify(|(min, max)| {
                    *min = (*min).min(locator.verse);
                    *max = (*max).max(locator.verse);
                })
                .or_insert((locator.verse, locator.verse));

            let text = self.texts.entry(record.translation.clone()).or_default();
            text.index.upsert(id, &record.text);
            text.verses.insert(id, record.clone());
        }

        debug!(count = records.len(), "Verses indexed");
        Ok(records.len())
    }

    /// Number of verses stored, for one translation or for all of them.
    pub fn verse_count(&self, translation: Option<&str>) -> usize {
        match translation {
            Some(code) => self.texts.get(code).map_or(0, |t| t.verses.len()),
            None => self.texts.values().map(|t| t.verses.len()).sum(),
        }
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Ranked full-text search over one translation.
    ///
    /// `query` must already be sanitized. An unknown or empty translation
    /// gives no rows rather than an error.
    pub fn search(
        &self,
        query: &str,
        translation: &str,
        limit: usize,
    ) -> Result<Vec<SearchRow>, StoreError> {
        let expr = compile_query(query).map_err(|e| StoreError::QuerySyntax(e.to_string()))?;

        let Some(text) = self.texts.get(translation) else {
            return Ok(Vec::new());
        };

        let rows = text
            .index
            .search(&expr, limit)
            .into_iter()
            .filter_map(|hit| {
                let verse = text.verses.get(&hit.id)?;
                let book = self.books.get(&verse.locator.book_code)?;
                Some(SearchRow {
                    locator: verse.locator.clone(),
                    text: verse.text.clone(),
                    book: book.clone(),
                    relevance_score: hit.score,
                    snippet: hit.snippet,
                })
            })
            .collect();

        Ok(rows)
    }
}
