//! Corpus import from JSON Lines.
//!
//! One verse per line:
//!
//! ```text
//! {"book": "John", "chapter": 3, "verse": 16, "text": "For God so loved..."}
//! ```
//!
//! `book` accepts any name or abbreviation the parser accepts. Blank lines are
//! skipped; any other bad line fails the whole import.

use anyhow::{anyhow, Context, Result};
use concordance_core::reference::{normalize_book_name, Locator};
use concordance_core::storage::VerseRecord;
use serde::Deserialize;
use std::io::BufRead;

#[derive(Debug, Deserialize)]
struct ImportLine {
    book: String,
    chapter: u32,
    verse: u32,
    text: String,
}

/// Reads verse records for `translation` from JSON Lines.
pub fn read_verses<R: BufRead>(reader: R, translation: &str) -> Result<Vec<VerseRecord>> {
    let mut verses = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("Failed to read line {}", line_no))?;
        if line.trim().is_empty() {
            continue;
        }

        let entry: ImportLine = serde_json::from_str(&line)
            .with_context(|| format!("Invalid JSON on line {}", line_no))?;

        let code = normalize_book_name(&entry.book)
            .map_err(|e| anyhow!("Line {}: {}", line_no, e))?;

        if entry.text.trim().is_empty() {
            return Err(anyhow!("Line {}: verse text is empty", line_no));
        }

        verses.push(VerseRecord::new(
            translation,
            Locator::new(code, entry.chapter, entry.verse),
            entry.text.trim(),
        ));
    }

    Ok(verses)
}
