//! Facet aggregation over a page of search results.
//!
//! Facets describe exactly the rows that were returned, not the full match
//! set: a search runs one bounded query and aggregates what came back.

use super::types::{BookSummary, SearchFacets};
use crate::storage::SearchRow;
use std::collections::{BTreeMap, HashMap};

/// Distinct book codes in a page, in canonical order.
///
/// This is the key set for the single batched name lookup a search makes.
pub fn distinct_book_codes(rows: &[SearchRow]) -> Vec<String> {
    let by_order: BTreeMap<u8, &str> = rows
        .iter()
        .map(|row| (row.book.canonical_order, row.book.code.as_str()))
        .collect();

    by_order.into_values().map(str::to_string).collect()
}

/// Computes facets for a result page.
///
/// `book_names` maps book codes to display names, usually from one
/// `get_books_batch` call. A code missing from the map falls back to the name
/// carried on the row.
///
/// # Examples
///
/// ```
/// use concordance_core::search::compute_facets;
/// use std::collections::HashMap;
///
/// let facets = compute_facets(&[], &HashMap::new());
/// assert_eq!(facets.total_results, 0);
/// assert_eq!(facets.testament_distribution.len(), 2);
/// ```
pub fn compute_facets(rows: &[SearchRow], book_names: &HashMap<String, String>) -> SearchFacets {
    let mut facets = SearchFacets::empty();
    facets.total_results = rows.len();

    let mut books: BTreeMap<u8, BookSummary> = BTreeMap::new();

    for row in rows {
        let book = &row.book;

        *facets
            .testament_distribution
            .entry(book.testament)
            .or_default() += 1;
        *facets
            .genre_distribution
            .entry(book.genre.clone())
            .or_default() += 1;
        *facets
            .author_distribution
            .entry(book.author.clone())
            .or_default() += 1;

        books
            .entry(book.canonical_order)
            .or_insert_with(|| BookSummary {
                code: book.code.clone(),
                name: book_names
                    .get(&book.code)
                    .cloned()
                    .unwrap_or_else(|| book.name.clone()),
            });
    }

    facets.books_found = books.into_values().collect();
    facets
}
