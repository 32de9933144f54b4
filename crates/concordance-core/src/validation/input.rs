//! Request-level input validators.
//!
//! These run before any core operation and turn bad caller input into a
//! [`ValidationError`] naming the offending field and how to fix it.

use crate::config::{MAX_QUERY_LEN, MAX_REFERENCE_LEN, MAX_SEARCH_LIMIT};
use crate::error::ValidationError;
use crate::query::sanitize_query;
use crate::reference::{parse_reference, reference_format_suggestion, Reference};
use crate::storage::CorpusStore;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::error;

static TRANSLATION_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]{2,5}$").expect("Invalid translation code pattern"));

/// Checks length and syntax of a raw citation and returns the parsed form.
pub fn validate_reference_input(reference: &str) -> Result<Reference, ValidationError> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(ValidationError::new(
            "reference",
            "Biblical reference cannot be empty",
            "Please provide a reference like 'John 3:16' or 'Romans 8:28-30'",
        ));
    }

    if reference.chars().count() > MAX_REFERENCE_LEN {
        return Err(ValidationError::new(
            "reference",
            "Biblical reference is too long",
            "Please use a shorter format like 'John 3:16' or 'Romans 8:28-30'",
        ));
    }

    parse_reference(reference).map_err(|e| {
        let suggestion = e
            .suggestion
            .clone()
            .unwrap_or_else(|| reference_format_suggestion(reference));
        ValidationError::new(
            "reference",
            format!("Invalid biblical reference format: {}", e.message),
            suggestion,
        )
    })
}

/// Normalizes a translation code and checks its shape only.
///
/// Returns the upper-cased code.
pub fn validate_translation_code(translation: &str) -> Result<String, ValidationError> {
    let code = translation.trim().to_uppercase();
    if code.is_empty() {
        return Err(ValidationError::new(
            "translation",
            "Translation cannot be empty",
            "Please specify a translation like 'KJV' or 'WEB'",
        ));
    }

    if !TRANSLATION_CODE.is_match(&code) {
        return Err(ValidationError::new(
            "translation",
            "Invalid translation format",
            "Translation codes should be 2-5 uppercase letters/numbers (e.g., 'KJV', 'WEB')",
        ));
    }

    Ok(code)
}

/// Normalizes a translation code and checks that the store has it.
///
/// Returns the upper-cased code.
pub async fn validate_translation<S: CorpusStore + ?Sized>(
    store: &S,
    translation: &str,
) -> Result<String, ValidationError> {
    let code = validate_translation_code(translation)?;

    let unavailable = |e| {
        error!(error = %e, translation = %code, "Translation validation failed");
        ValidationError::new(
            "translation",
            "Unable to validate translation",
            "Please try again or check if the database is available",
        )
    };

    if store
        .get_translation(&code)
        .await
        .map_err(unavailable)?
        .is_some()
    {
        return Ok(code);
    }

    let available: Vec<String> = store
        .list_translations()
        .await
        .map_err(unavailable)?
        .into_iter()
        .map(|t| t.code)
        .collect();

    Err(ValidationError::new(
        "translation",
        format!("Translation '{}' is not available", code),
        format!("Available translations: {}", available.join(", ")),
    ))
}

/// Checks length of a raw search query and returns it sanitized.
pub fn validate_search_input(query: &str) -> Result<String, ValidationError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(ValidationError::new(
            "query",
            "Search query cannot be empty",
            "Please enter search terms like 'love', 'faith', or \"love one another\"",
        ));
    }

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::new(
            "query",
            "Search query is too long",
            format!(
                "Please use shorter search terms (maximum {} characters)",
                MAX_QUERY_LEN
            ),
        ));
    }

    let sanitized = sanitize_query(query);
    if sanitized.is_empty() {
        return Err(ValidationError::new(
            "query",
            "Search query contains only invalid characters",
            "Please use letters, numbers, and basic punctuation",
        ));
    }

    Ok(sanitized)
}

/// Checks that a result limit is within `1..=MAX_SEARCH_LIMIT`.
pub fn validate_search_limit(limit: usize) -> Result<usize, ValidationError> {
    if limit < 1 {
        return Err(ValidationError::new(
            "limit",
            "Search limit must be at least 1",
            format!("Please use a number between 1 and {}", MAX_SEARCH_LIMIT),
        ));
    }

    if limit > MAX_SEARCH_LIMIT {
        return Err(ValidationError::new(
            "limit",
            format!("Search limit cannot exceed {}", MAX_SEARCH_LIMIT),
            format!(
                "Please use a number between 1 and {} for better performance",
                MAX_SEARCH_LIMIT
            ),
        ));
    }

    Ok(limit)
}
