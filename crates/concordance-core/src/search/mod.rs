//! Ranked verse search with result facets.
//!
//! # Architecture
//!
//! - `types`: Response and error types (SearchResponse, SearchFacets, SearchError)
//! - `engine`: ScriptureSearch, which sanitizes, validates the page size and
//!   queries the store
//! - `aggregation`: Facet computation over the returned page
//!
//! # Usage
//!
//! ```ignore
//! use concordance_core::search::ScriptureSearch;
//! use concordance_core::storage::InMemoryCorpusStore;
//!
//! let search = ScriptureSearch::new(InMemoryCorpusStore::new());
//! let response = search.search("\"love one another\"", "KJV", 10).await?;
//! for row in &response.rows {
//!     println!("{} {}", row.locator.display_name(), row.snippet);
//! }
//! println!("{:?}", response.facets.testament_distribution);
//! ```
//!
//! # Ranking
//!
//! Relevance scores are negated BM25, so **lower is better** and rows come
//! back in ascending score order. Equal scores fall back to canonical order
//! (book, chapter, verse).

pub mod types;

mod aggregation;
mod engine;

pub use aggregation::{compute_facets, distinct_book_codes};
pub use engine::ScriptureSearch;
pub use types::{BookSummary, SearchError, SearchFacets, SearchResponse};
