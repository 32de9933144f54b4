//! Citation resolution: book registry, alias normalization, and parsing.
//!
//! # Architecture
//!
//! - `books`: Canonical Book Registry (66 entries) and the alias table
//! - `locator`: `Locator`, `LocatorRange`, and the parser's `Reference` output
//! - `parser`: `parse_reference` and format suggestions
//!
//! Everything in this module is pure and synchronous; corpus-dependent
//! checks live in [`crate::validation`].

mod books;
mod locator;
mod parser;

pub use books::{
    all_books, book_by_code, display_name, normalize_book_name, Book, Testament, BOOKS,
};
pub use locator::{Locator, LocatorRange, Reference};
pub use parser::{parse_reference, reference_format_suggestion};
