//! # Concordance Core
//!
//! Platform-independent library for resolving scripture citations and
//! searching a verse corpus.
//!
//! This crate provides the core algorithms and the storage seam used by the
//! Concordance tools, designed to be reusable across different frontends
//! (CLI today, services later).
//!
//! ## Modules
//!
//! - [`reference`] - Book registry, alias normalization, and citation parsing
//! - [`query`] - Search query sanitization and boolean/phrase compilation
//! - [`index`] - In-memory full-text index (BM25 relevance + snippets)
//! - [`storage`] - Async corpus store trait with in-memory and redb backends
//! - [`validation`] - Corpus-aware reference validation and request validators
//! - [`search`] - Ranked search with result facets
//! - [`passage`] - Verse and verse-range retrieval
//! - [`config`] - Production configuration constants
//! - [`error`] - Error types shared across modules

pub mod config;
pub mod error;
pub mod index;
pub mod passage;
pub mod query;
pub mod reference;
pub mod search;
pub mod storage;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_utils;
