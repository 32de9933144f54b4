//! End-to-end tests for the lookup and search pipelines.
//!
//! These tests exercise the public API only:
//! 1. Lookup: raw citation → parse → corpus validation → passage
//! 2. Search: raw query → sanitize → ranked store search → facets
//!
//! Run with: `cargo test -p concordance-core --test integration_tests`

use concordance_core::passage::{retrieve_passage, PassageError};
use concordance_core::query::sanitize_query;
use concordance_core::reference::{
    all_books, normalize_book_name, parse_reference, Locator, Reference, Testament,
};
use concordance_core::search::{ScriptureSearch, SearchError, SearchFacets};
use concordance_core::storage::{CorpusStore, InMemoryCorpusStore, VerseRecord};
use concordance_core::validation::{validate_reference, ValidationOutcome};
use std::sync::Arc;

// ============================================================================
// Fixtures
// ============================================================================

const VERSES: &[(&str, u32, u32, &str)] = &[
    ("GEN", 1, 1, "In the beginning God created the heaven and the earth."),
    ("DEU", 6, 5, "And thou shalt love the LORD thy God with all thine heart, and with all thy soul, and with all thy might."),
    ("PSA", 23, 1, "The LORD is my shepherd; I shall not want."),
    ("MAT", 22, 37, "Jesus said unto him, Thou shalt love the Lord thy God with all thy heart, and with all thy soul, and with all thy mind."),
    ("MAT", 22, 39, "And the second is like unto it, Thou shalt love thy neighbour as thyself."),
    ("JHN", 3, 16, "For God so loved the world, that he gave his only begotten Son, that whosoever believeth in him should not perish, but have everlasting life."),
    ("JHN", 13, 34, "A new commandment I give unto you, That ye love one another; as I have loved you, that ye also love one another."),
    ("JHN", 15, 12, "This is my commandment, That ye love one another, as I have loved you."),
    ("ROM", 8, 28, "And we know that all things work together for good to them that love God, to them who are the called according to his purpose."),
    ("ROM", 8, 29, "For whom he did foreknow, he also did predestinate to be conformed to the image of his Son, that he might be the firstborn among many brethren."),
    ("ROM", 8, 30, "Moreover whom he did predestinate, them he also called: and whom he called, them he also justified: and whom he justified, them he also glorified."),
    ("1CO", 13, 13, "And now abideth faith, hope, charity, these three; but the greatest of these is charity."),
    ("1JN", 4, 7, "Beloved, let us love one another: for love is of God; and every one that loveth is born of God, and knoweth God."),
];

async fn corpus() -> Arc<dyn CorpusStore> {
    let store = InMemoryCorpusStore::new();
    let records: Vec<VerseRecord> = VERSES
        .iter()
        .map(|(book, chapter, verse, text)| {
            VerseRecord::new("KJV", Locator::new(*book, *chapter, *verse), *text)
        })
        .collect();
    let inserted = store.put_verses(&records).await.unwrap();
    assert_eq!(inserted, VERSES.len());
    Arc::new(store)
}

// ============================================================================
// Reference pipeline
// ============================================================================

#[test]
fn test_every_book_round_trips_by_display_name() {
    for book in all_books() {
        let text = format!("{} 1:1", book.name);
        let reference = parse_reference(&text).unwrap();
        assert_eq!(reference.book_code(), book.code, "{text}");
        assert_eq!(
            normalize_book_name(&book.name.to_uppercase()).unwrap(),
            book.code
        );
    }
}

#[test]
fn test_canonical_scenarios() {
    assert_eq!(
        parse_reference("John 3:16").unwrap(),
        Reference::Single(Locator::new("JHN", 3, 16))
    );

    match parse_reference("Romans 8:28-30").unwrap() {
        Reference::Range(range) => {
            assert_eq!(range.book_code(), "ROM");
            assert_eq!((range.chapter(), range.start_verse(), range.end_verse()), (8, 28, 30));
        }
        other => panic!("expected range, got {:?}", other),
    }

    assert!(parse_reference("John 3:16-15").unwrap_err().is_syntax());
    assert!(parse_reference("3:16").unwrap_err().is_syntax());
}

#[tokio::test]
async fn test_lookup_pipeline() {
    let store = corpus().await;

    let reference = parse_reference("1 Cor 13:13").unwrap();
    assert!(validate_reference(store.as_ref(), &reference).await.is_validated());

    let passage = retrieve_passage(store.as_ref(), "Romans 8:28-30", "KJV")
        .await
        .unwrap();
    assert_eq!(passage.heading(), "Romans 8:28-30");
    assert_eq!(passage.verses.len(), 3);

    let outcome = validate_reference(store.as_ref(), &parse_reference("Romans 9:1").unwrap()).await;
    assert!(matches!(outcome, ValidationOutcome::Rejected(_)));

    let err = retrieve_passage(store.as_ref(), "John 3:16", "WEB")
        .await
        .unwrap_err();
    assert!(matches!(err, PassageError::NotFound { .. }));
}

// ============================================================================
// Search pipeline
// ============================================================================

#[tokio::test]
async fn test_search_pipeline_facets() {
    let search = ScriptureSearch::new(corpus().await);
    let response = search.search("love", "KJV", 10).await.unwrap();

    let facets = &response.facets;
    assert_eq!(facets.total_results, response.rows.len());
    assert_eq!(
        facets.testament_distribution.values().sum::<usize>(),
        facets.total_results
    );
    assert_eq!(
        facets.genre_distribution.values().sum::<usize>(),
        facets.total_results
    );
    assert_eq!(facets.testament_distribution[&Testament::Old], 1);
    assert!(facets.books_found.iter().any(|b| b.name == "Deuteronomy"));

    assert!(response
        .rows
        .windows(2)
        .all(|w| w[0].relevance_score <= w[1].relevance_score));
}

#[tokio::test]
async fn test_phrase_and_boolean_queries() {
    let search = ScriptureSearch::new(corpus().await);

    let response = search.search("\"love one another\"", "KJV", 10).await.unwrap();
    let found: Vec<String> = response.rows.iter().map(|r| r.locator.to_string()).collect();
    assert_eq!(found.len(), 3);
    for expected in ["JHN 13:34", "JHN 15:12", "1JN 4:7"] {
        assert!(found.contains(&expected.to_string()), "missing {expected}");
    }

    let response = search.search("love NOT another", "KJV", 10).await.unwrap();
    assert!(response
        .rows
        .iter()
        .all(|r| !r.text.to_lowercase().contains("another")));
    assert!(!response.is_empty());

    let response = search.search("faith OR shepherd", "KJV", 10).await.unwrap();
    assert_eq!(response.rows.len(), 2);
}

#[tokio::test]
async fn test_injection_attempt_is_harmless() {
    let raw = "love; DROP TABLE verses;";
    assert!(!sanitize_query(raw).contains(';'));

    let store = corpus().await;
    let search = ScriptureSearch::new(store.clone());
    let response = search.search(raw, "KJV", 10).await.unwrap();
    assert!(!response.sanitized_query.contains(';'));
    assert_eq!(store.verse_count(Some("KJV")).await.unwrap(), VERSES.len());
}

#[tokio::test]
async fn test_missing_word_yields_empty_facets() {
    let search = ScriptureSearch::new(corpus().await);
    let response = search.search("nonexistentxyzword", "KJV", 10).await.unwrap();
    assert!(response.rows.is_empty());
    assert_eq!(response.facets, SearchFacets::empty());
}

#[tokio::test]
async fn test_invalid_requests() {
    let search = ScriptureSearch::new(corpus().await);
    assert_eq!(
        search.search("", "KJV", 10).await.unwrap_err(),
        SearchError::EmptyQuery
    );
    assert!(matches!(
        search.search("love", "KJV", 0).await.unwrap_err(),
        SearchError::InvalidLimit { .. }
    ));
}
