use super::aggregation::{compute_facets, distinct_book_codes};
use super::types::{SearchError, SearchFacets, SearchResponse};
use crate::config::MAX_SEARCH_LIMIT;
use crate::query::{compile_query, sanitize_query, word_tokens};
use crate::storage::{CorpusStore, StoreError};
use std::collections::HashMap;
use tracing::{debug, error, info, instrument, warn};

const QUERY_SYNTAX_SUGGESTION: &str = "Use words, \"quoted phrases\" and AND/OR/NOT between terms \
     (e.g., 'love AND faith', '\"love one another\"')";

fn invalid_query(message: impl Into<String>) -> SearchError {
    SearchError::InvalidQuery {
        message: message.into(),
        suggestion: QUERY_SYNTAX_SUGGESTION.to_string(),
    }
}

/// Ranked verse search with facets, over any [`CorpusStore`].
///
/// The engine holds no state of its own; ranking and snippets come from the
/// store, facets are computed here per request.
pub struct ScriptureSearch<S: CorpusStore> {
    store: S,
}

impl<S: CorpusStore> ScriptureSearch<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Searches one translation and aggregates facets over the returned page.
    ///
    /// # Errors
    ///
    /// - [`SearchError::EmptyQuery`] when no word survives sanitization
    /// - [`SearchError::InvalidQuery`] for dangling operators or unbalanced
    ///   parentheses
    /// - [`SearchError::InvalidLimit`] when `limit` is outside `1..=50`
    /// - [`SearchError::Execution`] for any store failure
    ///
    /// Zero matches is not an error: the response has no rows and empty facets.
    #[instrument(skip_all, fields(translation = %translation, limit = limit))]
    pub async fn search(
        &self,
        query: &str,
        translation: &str,
        limit: usize,
    ) -> Result<SearchResponse, SearchError> {
        let sanitized = sanitize_query(query);
        if word_tokens(&sanitized).is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        if let Err(e) = compile_query(&sanitized) {
            warn!(query = %sanitized, error = %e, "Rejected malformed query");
            return Err(invalid_query(e.0));
        }

        if !(1..=MAX_SEARCH_LIMIT).contains(&limit) {
            return Err(SearchError::InvalidLimit {
                limit,
                max: MAX_SEARCH_LIMIT,
            });
        }

        let translation = translation.trim().to_uppercase();

        let rows = self
            .store
            .search_verses(&sanitized, &translation, limit)
            .await
            .map_err(|e| match e {
                StoreError::QuerySyntax(message) => invalid_query(message),
                e => {
                    error!(error = %e, query = %sanitized, "Search query failed");
                    SearchError::Execution(e.to_string())
                }
            })?;

        let facets = if rows.is_empty() {
            SearchFacets::empty()
        } else {
            let codes = distinct_book_codes(&rows);
            let names: HashMap<String, String> = self
                .store
                .get_books_batch(&codes)
                .await
                .map_err(|e| {
                    error!(error = %e, "Book lookup for facets failed");
                    SearchError::Execution(e.to_string())
                })?
                .into_iter()
                .map(|book| (book.code, book.name))
                .collect();
            compute_facets(&rows, &names)
        };

        if rows.is_empty() {
            debug!(query = %sanitized, "Search returned no results");
        } else {
            info!(
                results = rows.len(),
                books = facets.books_found.len(),
                "Search complete"
            );
        }

        Ok(SearchResponse {
            query: query.to_string(),
            sanitized_query: sanitized,
            translation,
            rows,
            facets,
        })
    }
}
