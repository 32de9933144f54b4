//! In-memory full-text index for one translation.
//!
//! The index combines two structures built from the same documents:
//!
//! - **Positional postings** (`term -> doc -> positions`) decide *which*
//!   verses match a compiled [`QueryExpr`], including phrases and `NOT`
//! - A [`bm25`](https://crates.io/crates/bm25) search engine decides *how
//!   well* each matching verse scores against the query's positive terms
//!
//! # Score polarity
//!
//! Relevance is reported the way an FTS engine's `bm25()` function reports
//! it: the BM25 score negated, so **lower is better** and results sort
//! ascending. A verse that matches the boolean expression but for which the
//! BM25 engine has no score (for instance a query made only of stop words)
//! gets `0.0` and sorts after every scored match.
//!
//! Document ids are chosen by the caller. Ties in score are broken by
//! ascending id, so callers that encode canonical order into the id get the
//! canonical tie-break for free.

mod snippet;
mod tokenize;

pub use snippet::build_snippet;
pub use tokenize::{tokenize, Token};

use crate::query::QueryExpr;
use bm25::{Document, Language, SearchEngineBuilder};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use tracing::{debug, instrument};

/// One ranked match produced by [`FullTextIndex::search`].
#[derive(Debug, Clone, PartialEq)]
pub struct IndexHit {
    pub id: u64,
    /// Negated BM25 score (lower is better)
    pub score: f64,
    /// Highlighted excerpt of the document
    pub snippet: String,
}

struct IndexedDoc {
    text: String,
    tokens: Vec<Token>,
}

/// Full-text index over a set of documents keyed by `u64`.
///
/// # Thread Safety
///
/// This type is **not thread-safe**. Stores wrap it in a lock.
pub struct FullTextIndex {
    docs: HashMap<u64, IndexedDoc>,
    /// term -> doc id -> ascending token positions
    postings: HashMap<String, BTreeMap<u64, Vec<usize>>>,
    engine: bm25::SearchEngine<u64>,
}

impl FullTextIndex {
    /// Creates an empty index with English BM25 settings.
    pub fn new() -> Self {
        let empty_docs: Vec<Document<u64>> = vec![];
        let engine =
            SearchEngineBuilder::<u64>::with_documents(Language::English, empty_docs).build();

        Self {
            docs: HashMap::new(),
            postings: HashMap::new(),
            engine,
        }
    }

    /// Indexes a document, replacing any previous document with the same id.
    #[instrument(skip_all, fields(id = id, text_len = text.len()))]
    pub fn upsert(&mut self, id: u64, text: &str) {
        if let Some(previous) = self.docs.remove(&id) {
            self.remove_postings(id, &previous.tokens);
        }

        let tokens = tokenize(text);
        for (position, token) in tokens.iter().enumerate() {
            self.postings
                .entry(token.term.clone())
                .or_default()
                .entry(id)
                .or_default()
                .push(position);
        }

        self.engine.upsert(Document {
            id,
            contents: text.to_string(),
        });
        self.docs.insert(
            id,
            IndexedDoc {
                text: text.to_string(),
                tokens,
            },
        );
    }

    fn remove_postings(&mut self, id: u64, tokens: &[Token]) {
        for token in tokens {
            if let Some(docs) = self.postings.get_mut(&token.term) {
                docs.remove(&id);
                if docs.is_empty() {
                    self.postings.remove(&token.term);
                }
            }
        }
    }

    /// Returns the indexed text of a document.
    pub fn text(&self, id: u64) -> Option<&str> {
        self.docs.get(&id).map(|doc| doc.text.as_str())
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Returns `true` if nothing has been indexed.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Runs a compiled query and returns up to `limit` hits, best first.
    #[instrument(skip_all, fields(limit = limit))]
    pub fn search(&self, expr: &QueryExpr, limit: usize) -> Vec<IndexHit> {
        if limit == 0 || self.docs.is_empty() {
            return Vec::new();
        }

        let matched = self.evaluate(expr);
        if matched.is_empty() {
            return Vec::new();
        }

        let terms = expr.positive_terms();
        let bm25_scores: HashMap<u64, f32> = self
            .engine
            .search(&terms.join(" "), self.docs.len())
            .into_iter()
            .map(|result| (result.document.id, result.score))
            .collect();

        let mut ranked: Vec<(u64, f64)> = matched
            .into_iter()
            .map(|id| {
                let score = bm25_scores.get(&id).copied().unwrap_or(0.0);
                (id, -f64::from(score))
            })
            .collect();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        ranked.truncate(limit);

        debug!(
            matched = ranked.len(),
            scored = bm25_scores.len(),
            "Full-text query evaluated"
        );

        let highlight: HashSet<&str> = terms.iter().map(String::as_str).collect();
        ranked
            .into_iter()
            .filter_map(|(id, score)| {
                self.docs.get(&id).map(|doc| IndexHit {
                    id,
                    score,
                    snippet: build_snippet(&doc.text, &doc.tokens, &highlight),
                })
            })
            .collect()
    }

    /// Set of document ids matching the expression.
    fn evaluate(&self, expr: &QueryExpr) -> BTreeSet<u64> {
        match expr {
            QueryExpr::Term(term) => self.docs_with(term),
            QueryExpr::Phrase(tokens) => self.phrase_matches(tokens),
            QueryExpr::And(left, right) => {
                let left = self.evaluate(left);
                if left.is_empty() {
                    return left;
                }
                left.intersection(&self.evaluate(right)).copied().collect()
            }
            QueryExpr::Or(left, right) => {
                let mut left = self.evaluate(left);
                left.extend(self.evaluate(right));
                left
            }
            QueryExpr::Not(include, exclude) => {
                let include = self.evaluate(include);
                if include.is_empty() {
                    return include;
                }
                include.difference(&self.evaluate(exclude)).copied().collect()
            }
        }
    }

    fn docs_with(&self, term: &str) -> BTreeSet<u64> {
        self.postings
            .get(term)
            .map(|docs| docs.keys().copied().collect())
            .unwrap_or_default()
    }

    fn phrase_matches(&self, tokens: &[String]) -> BTreeSet<u64> {
        let Some((first, rest)) = tokens.split_first() else {
            return BTreeSet::new();
        };
        let Some(first_postings) = self.postings.get(first) else {
            return BTreeSet::new();
        };

        let mut following = Vec::with_capacity(rest.len());
        for term in rest {
            match self.postings.get(term) {
                Some(postings) => following.push(postings),
                None => return BTreeSet::new(),
            }
        }

        first_postings
            .iter()
            .filter(|(id, starts)| {
                starts.iter().any(|&start| {
                    following.iter().enumerate().all(|(offset, postings)| {
                        postings.get(id).is_some_and(|positions| {
                            positions.binary_search(&(start + offset + 1)).is_ok()
                        })
                    })
                })
            })
            .map(|(id, _)| *id)
            .collect()
    }
}

impl Default for FullTextIndex {
    fn default() -> Self {
        Self::new()
    }
}
