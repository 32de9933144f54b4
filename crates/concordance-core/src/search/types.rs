use crate::reference::Testament;
use crate::storage::SearchRow;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur during a search request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Nothing searchable was left after sanitization
    #[error("Empty or invalid search query")]
    EmptyQuery,
    /// Requested page size outside `1..=MAX_SEARCH_LIMIT`
    #[error("Invalid search limit {limit}: must be between 1 and {max}")]
    InvalidLimit {
        /// Limit the caller asked for
        limit: usize,
        /// Largest accepted limit
        max: usize,
    },
    /// Searchable words are present but the boolean syntax is broken
    #[error("Invalid search query: {message}")]
    InvalidQuery {
        message: String,
        /// How to rephrase the query
        suggestion: String,
    },
    /// The store failed
    #[error("Search failed: {0}")]
    Execution(String),
}

/// A distinct book that appears in a result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookSummary {
    pub code: String,
    pub name: String,
}

/// Counts over one page of search results.
///
/// Every distribution sums to `total_results`. `testament_distribution`
/// always carries both testaments, so an empty page reads `{OT: 0, NT: 0}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchFacets {
    pub total_results: usize,
    /// Distinct books in canonical order
    pub books_found: Vec<BookSummary>,
    pub testament_distribution: BTreeMap<Testament, usize>,
    pub genre_distribution: BTreeMap<String, usize>,
    pub author_distribution: BTreeMap<String, usize>,
}

impl SearchFacets {
    /// Facets of a page with no rows.
    pub fn empty() -> Self {
        Self {
            total_results: 0,
            books_found: Vec::new(),
            testament_distribution: BTreeMap::from([(Testament::Old, 0), (Testament::New, 0)]),
            genre_distribution: BTreeMap::new(),
            author_distribution: BTreeMap::new(),
        }
    }
}

/// Result of [`ScriptureSearch::search`](super::ScriptureSearch::search).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    /// Query as the caller typed it
    pub query: String,
    /// Query actually sent to the store
    pub sanitized_query: String,
    pub translation: String,
    /// Ranked ascending by `relevance_score` (lower is better)
    pub rows: Vec<SearchRow>,
    pub facets: SearchFacets,
}

impl SearchResponse {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
