//! Search query handling.
//!
//! - `sanitize`: reduces raw user input to the safe query subset
//! - `expr`: compiles a sanitized query into a boolean/phrase tree

mod expr;
mod sanitize;

pub(crate) use expr::word_tokens;
pub use expr::{compile_query, QueryExpr, QuerySyntaxError};
pub use sanitize::sanitize_query;
