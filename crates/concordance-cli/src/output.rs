//! Output formatting for CLI commands.
//!
//! Supports both human-readable terminal output and JSON for scripting.

use concordance_core::config::{SNIPPET_CLOSE, SNIPPET_OPEN};
use concordance_core::error::ReferenceError;
use concordance_core::passage::Passage;
use concordance_core::reference::Reference;
use concordance_core::search::SearchResponse;
use concordance_core::storage::TranslationRecord;
use serde::Serialize;

/// Terminal stand-in for the snippet highlight markers
const HIGHLIGHT: &str = "*";

/// JSON output for `conc parse`
#[derive(Serialize)]
struct JsonReference<'a> {
    input: &'a str,
    display: String,
    #[serde(flatten)]
    reference: &'a Reference,
}

/// JSON output for a rejected citation
#[derive(Serialize)]
struct JsonReferenceError<'a> {
    input: &'a str,
    error: &'a str,
    kind: &'static str,
    suggestion: Option<&'a str>,
}

/// JSON output for `conc verse`
#[derive(Serialize)]
struct JsonPassage<'a> {
    heading: String,
    text: String,
    #[serde(flatten)]
    passage: &'a Passage,
}

/// JSON output for one `conc translations` entry
#[derive(Serialize)]
struct JsonTranslation<'a> {
    #[serde(flatten)]
    translation: &'a TranslationRecord,
    verses: usize,
}

/// JSON output for `conc translations`
#[derive(Serialize)]
struct JsonTranslations<'a> {
    translations: Vec<JsonTranslation<'a>>,
    total_verses: usize,
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_reference_json(input: &str, reference: &Reference) -> String {
    to_json(&JsonReference {
        input,
        display: reference.display_name(),
        reference,
    })
}

pub fn format_reference_human(reference: &Reference) -> String {
    let mut output = format!("{} ({})", reference.display_name(), reference);
    if reference.is_range() {
        output.push_str(&format!("\n{} verses", reference.verse_count()));
    }
    output
}

pub fn format_reference_error_json(input: &str, err: &ReferenceError) -> String {
    to_json(&JsonReferenceError {
        input,
        error: &err.message,
        kind: if err.is_syntax() { "syntax" } else { "validation" },
        suggestion: err.suggestion.as_deref(),
    })
}

pub fn format_reference_error_human(err: &ReferenceError) -> String {
    match &err.suggestion {
        Some(suggestion) => format!("Error: {}\n{}", err.message, suggestion),
        None => format!("Error: {}", err.message),
    }
}

pub fn format_passage_json(passage: &Passage) -> String {
    to_json(&JsonPassage {
        heading: passage.heading(),
        text: passage.combined_text(),
        passage,
    })
}

pub fn format_passage_human(passage: &Passage) -> String {
    format!(
        "{} ({})\n\n{}",
        passage.heading(),
        passage.translation,
        passage.combined_text()
    )
}

pub fn format_search_json(response: &SearchResponse) -> String {
    to_json(response)
}

/// Formats search results for human-readable terminal output.
pub fn format_search_human(response: &SearchResponse) -> String {
    if response.is_empty() {
        return format!(
            "No results found for \"{}\" in {}",
            response.query, response.translation
        );
    }

    let count = response.rows.len();
    let mut output = format!(
        "Found {} verse{} for \"{}\" in {}:\n\n",
        count,
        if count == 1 { "" } else { "s" },
        response.query,
        response.translation
    );

    for (i, row) in response.rows.iter().enumerate() {
        output.push_str(&format!(
            "{}. {} (score: {:.2})\n   {}\n\n",
            i + 1,
            row.locator.display_name(),
            row.relevance_score,
            render_snippet(&row.snippet)
        ));
    }

    let facets = &response.facets;
    let testaments: Vec<String> = facets
        .testament_distribution
        .iter()
        .map(|(testament, n)| format!("{} {}", testament, n))
        .collect();
    let books: Vec<&str> = facets.books_found.iter().map(|b| b.name.as_str()).collect();

    output.push_str(&format!("Testaments: {}\n", testaments.join(", ")));
    output.push_str(&format!("Books: {}", books.join(", ")));
    output
}

/// `translations` pairs each record with its stored verse count.
pub fn format_translations_json(
    translations: &[(TranslationRecord, usize)],
    total_verses: usize,
) -> String {
    to_json(&JsonTranslations {
        translations: translations
            .iter()
            .map(|(translation, verses)| JsonTranslation {
                translation,
                verses: *verses,
            })
            .collect(),
        total_verses,
    })
}

pub fn format_translations_human(
    translations: &[(TranslationRecord, usize)],
    total_verses: usize,
) -> String {
    let mut lines: Vec<String> = translations
        .iter()
        .map(|(t, verses)| {
            format!(
                "{:<5}  {} [{}, {}]  {} {}",
                t.code,
                t.name,
                t.language,
                t.kind,
                verses,
                plural(*verses)
            )
        })
        .collect();
    lines.push(format!("Total: {} {}", total_verses, plural(total_verses)));
    lines.join("\n")
}

fn plural(verses: usize) -> &'static str {
    if verses == 1 {
        "verse"
    } else {
        "verses"
    }
}

/// Swaps snippet highlight markers for plain-terminal ones.
fn render_snippet(snippet: &str) -> String {
    snippet
        .replace(SNIPPET_OPEN, HIGHLIGHT)
        .replace(SNIPPET_CLOSE, HIGHLIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use concordance_core::reference::{book_by_code, parse_reference, Locator};
    use concordance_core::search::compute_facets;
    use concordance_core::storage::{default_translations, BookRecord, SearchRow, VerseRecord};
    use std::collections::HashMap;

    fn make_response(rows: Vec<SearchRow>) -> SearchResponse {
        let facets = compute_facets(&rows, &HashMap::new());
        SearchResponse {
            query: "love".to_string(),
            sanitized_query: "love".to_string(),
            translation: "KJV".to_string(),
            rows,
            facets,
        }
    }

    fn make_row(code: &str, chapter: u32, verse: u32, score: f64) -> SearchRow {
        SearchRow {
            locator: Locator::new(code, chapter, verse),
            text: "for God is love".to_string(),
            book: BookRecord::from(book_by_code(code).unwrap()),
            relevance_score: score,
            snippet: "for God is <mark>love</mark>".to_string(),
        }
    }

    fn make_passage(verses: &[(u32, &str)]) -> Passage {
        Passage {
            translation: "KJV".to_string(),
            reference: parse_reference("Romans 8:28-29").unwrap(),
            book: BookRecord::from(book_by_code("ROM").unwrap()),
            verses: verses
                .iter()
                .map(|(v, text)| VerseRecord::new("KJV", Locator::new("ROM", 8, *v), *text))
                .collect(),
        }
    }

    #[test]
    fn test_format_search_human_empty() {
        let response = make_response(Vec::new());
        let output = format_search_human(&response);
        assert_eq!(output, "No results found for \"love\" in KJV");
    }

    #[test]
    fn test_format_search_human_rows_and_facets() {
        let response = make_response(vec![make_row("1JN", 4, 8, -2.5)]);
        let output = format_search_human(&response);
        assert!(output.contains("Found 1 verse for \"love\" in KJV"));
        assert!(output.contains("1. 1 John 4:8 (score: -2.50)"));
        assert!(output.contains("for God is *love*"));
        assert!(output.contains("Testaments: OT 0, NT 1"));
        assert!(output.contains("Books: 1 John"));
    }

    #[test]
    fn test_format_search_json() {
        let response = make_response(vec![make_row("1JN", 4, 8, -2.5)]);
        let output = format_search_json(&response);
        assert!(output.contains("\"sanitized_query\": \"love\""));
        assert!(output.contains("\"relevance_score\": -2.5"));
        assert!(output.contains("\"NT\": 1"));
    }

    #[test]
    fn test_format_passage() {
        let passage = make_passage(&[(28, "And we know"), (29, "For whom")]);
        assert_eq!(
            format_passage_human(&passage),
            "Romans 8:28-29 (KJV)\n\n[28] And we know [29] For whom"
        );

        let json = format_passage_json(&passage);
        assert!(json.contains("\"heading\": \"Romans 8:28-29\""));
        assert!(json.contains("\"translation\": \"KJV\""));
    }

    #[test]
    fn test_format_reference() {
        let reference = parse_reference("rom 8:28-30").unwrap();
        assert_eq!(
            format_reference_human(&reference),
            "Romans 8:28-30 (ROM 8:28-30)\n3 verses"
        );

        let json = format_reference_json("rom 8:28-30", &reference);
        assert!(json.contains("\"display\": \"Romans 8:28-30\""));
        assert!(json.contains("\"type\": \"range\""));
    }

    #[test]
    fn test_format_reference_widest_range() {
        let reference = parse_reference("John 1:1-4294967295").unwrap();
        assert_eq!(
            format_reference_human(&reference),
            "John 1:1-4294967295 (JHN 1:1-4294967295)\n4294967295 verses"
        );
    }

    #[test]
    fn test_format_reference_error() {
        let err = parse_reference("3:16").unwrap_err();
        let human = format_reference_error_human(&err);
        assert!(human.starts_with("Error: "));
        assert!(human.contains("Start with book name"));

        let json = format_reference_error_json("3:16", &err);
        assert!(json.contains("\"kind\": \"syntax\""));
    }

    #[test]
    fn test_format_translations() {
        let counted: Vec<(TranslationRecord, usize)> = default_translations()
            .into_iter()
            .enumerate()
            .map(|(i, t)| (t, if i == 0 { 3 } else { 0 }))
            .collect();

        let output = format_translations_human(&counted, 3);
        assert!(output.starts_with("KJV    King James Version [en, translation]  3 verses"));
        assert_eq!(output.lines().count(), 8);
        assert_eq!(output.lines().last(), Some("Total: 3 verses"));

        let json = format_translations_json(&counted, 3);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_verses"], 3);
        assert_eq!(value["translations"][0]["code"], "KJV");
        assert_eq!(value["translations"][0]["verses"], 3);
        assert_eq!(value["translations"][1]["verses"], 0);
    }
}
