//! Error types for concordance-core.
//!
//! This module defines the error types that are shared across the reference,
//! validation and passage modules. Storage and search errors live next to
//! the code that produces them ([`crate::storage::StoreError`],
//! [`crate::search::SearchError`]).

use serde::Serialize;
use thiserror::Error;

/// Which stage rejected a citation.
///
/// Callers render these differently: a syntax error means the text could not
/// be read as a citation at all, a validation error means it was read but
/// names an address the corpus does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceErrorKind {
    /// Malformed citation shape (fail-closed, never retried)
    Syntax,
    /// Well-formed citation naming an unknown or out-of-range address
    Validation,
}

/// A rejected citation, with an optional corrective suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ReferenceError {
    /// Stage that rejected the citation
    pub kind: ReferenceErrorKind,
    /// Human-readable description of the problem
    pub message: String,
    /// Corrective hint (an example, a range, or a list of candidate books)
    pub suggestion: Option<String>,
}

impl ReferenceError {
    /// Creates a syntax error without a suggestion.
    pub fn syntax(message: impl Into<String>) -> Self {
        Self {
            kind: ReferenceErrorKind::Syntax,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Creates a validation error without a suggestion.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ReferenceErrorKind::Validation,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Attaches a corrective suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Returns `true` if the citation could not be parsed.
    pub fn is_syntax(&self) -> bool {
        self.kind == ReferenceErrorKind::Syntax
    }

    /// Returns `true` if the citation parsed but failed corpus validation.
    pub fn is_validation(&self) -> bool {
        self.kind == ReferenceErrorKind::Validation
    }
}

/// A book name that is not in the alias table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown book name: '{0}'")]
pub struct UnknownBookError(pub String);

impl From<UnknownBookError> for ReferenceError {
    fn from(err: UnknownBookError) -> Self {
        ReferenceError::syntax(err.to_string())
    }
}

/// A rejected request parameter, tagged with the field it came from.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct ValidationError {
    /// What was wrong with the input
    pub message: String,
    /// How to fix it
    pub suggestion: String,
    /// Name of the offending request field ("reference", "query", ...)
    pub field: &'static str,
}

impl ValidationError {
    pub fn new(
        field: &'static str,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            suggestion: suggestion.into(),
            field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_error_display_is_message() {
        let err = ReferenceError::syntax("Empty reference").with_suggestion("Try 'John 3:16'");
        assert_eq!(err.to_string(), "Empty reference");
        assert_eq!(err.suggestion.as_deref(), Some("Try 'John 3:16'"));
        assert!(err.is_syntax());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_unknown_book_converts_to_syntax_error() {
        let err: ReferenceError = UnknownBookError("Hezekiah".to_string()).into();
        assert!(err.is_syntax());
        assert_eq!(err.message, "Unknown book name: 'Hezekiah'");
    }

    #[test]
    fn test_validation_error_serializes_field() {
        let err = ValidationError::new("limit", "Search limit must be at least 1", "Use 1-50");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["field"], "limit");
        assert_eq!(json["message"], "Search limit must be at least 1");
    }
}
