//! Validation.
//!
//! - `reference`: checks a parsed reference against the corpus (fail-open)
//! - `input`: request-level checks on raw caller input

mod input;
mod reference;

pub use input::{
    validate_reference_input, validate_search_input, validate_search_limit, validate_translation,
    validate_translation_code,
};
pub use reference::{check_book, check_chapter, check_verses, validate_reference, ValidationOutcome};
