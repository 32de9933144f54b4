//! Production configuration constants.
//!
//! This module contains the limits and defaults shared by the parser,
//! validators, search pipeline and the CLI, so that every frontend applies
//! the same bounds.
//!
//! # Usage
//!
//! ```
//! use concordance_core::config::{DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};
//!
//! let limit = DEFAULT_SEARCH_LIMIT.min(MAX_SEARCH_LIMIT);
//! assert!(limit >= 1);
//! ```

// =============================================================================
// Search Configuration
// =============================================================================

/// Largest page a single search may return.
pub const MAX_SEARCH_LIMIT: usize = 50;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Translation searched and retrieved when none is given.
pub const DEFAULT_TRANSLATION: &str = "KJV";

/// Maximum accepted length of a raw search query, in characters.
pub const MAX_QUERY_LEN: usize = 200;

// =============================================================================
// Reference Configuration
// =============================================================================

/// Maximum accepted length of a raw citation, in characters.
///
/// The longest legitimate citation ("1 Thessalonians 150:150-176") is well
/// under this.
pub const MAX_REFERENCE_LEN: usize = 50;

/// Maximum number of "did you mean" entries attached to an unknown-book error.
pub const SUGGESTION_LIMIT: usize = 5;

// =============================================================================
// Snippet Configuration
// =============================================================================

/// Maximum number of tokens in a highlighted snippet.
pub const SNIPPET_MAX_TOKENS: usize = 32;

/// Marker inserted before a matched token.
pub const SNIPPET_OPEN: &str = "<mark>";

/// Marker inserted after a matched token.
pub const SNIPPET_CLOSE: &str = "</mark>";

/// Marker used where a snippet cuts the verse text.
pub const SNIPPET_ELLIPSIS: &str = "...";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limit_within_bounds() {
        let (default, max) = (DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT);
        assert!(default >= 1);
        assert!(default <= max);
    }

    #[test]
    fn test_default_translation_is_valid_code() {
        let code = DEFAULT_TRANSLATION;
        assert!((2..=5).contains(&code.len()));
        assert!(code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }
}
