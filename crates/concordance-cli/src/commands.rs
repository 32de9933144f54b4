//! Command implementations.
//!
//! Each command returns a [`CommandOutput`]: request and lookup problems the
//! user can fix are rendered as output with `success: false`, while
//! infrastructure failures (unreadable files, a broken database) are errors.

use crate::config;
use crate::import;
use crate::output;
use anyhow::{anyhow, Context, Result};
use concordance_core::error::ValidationError;
use concordance_core::passage::{retrieve_passage, PassageError};
use concordance_core::reference::parse_reference;
use concordance_core::search::{ScriptureSearch, SearchError};
use concordance_core::storage::{
    CorpusStore, RedbCorpusStore, TranslationKind, TranslationRecord,
};
use concordance_core::validation::{
    validate_reference_input, validate_search_input, validate_search_limit, validate_translation,
    validate_translation_code,
};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;

/// Rendered command result.
#[derive(Debug)]
pub struct CommandOutput {
    pub text: String,
    pub success: bool,
}

impl CommandOutput {
    fn ok(text: String) -> Self {
        Self {
            text,
            success: true,
        }
    }

    fn failed(text: String) -> Self {
        Self {
            text,
            success: false,
        }
    }
}

fn invalid_request(err: &ValidationError, json: bool) -> CommandOutput {
    let text = if json {
        serde_json::to_string_pretty(err).unwrap_or_else(|_| "{}".to_string())
    } else {
        format!("Error: {}\n{}", err.message, err.suggestion)
    };
    CommandOutput::failed(text)
}

/// Opens an existing corpus; lookups never create one.
fn open_existing(data_dir: Option<&PathBuf>) -> Result<RedbCorpusStore> {
    let db_path = config::database_path(data_dir)?;

    if !db_path.exists() {
        return Err(anyhow!(
            "No corpus found at {}.\n\
             Please import verses with `conc import <FILE> -t <CODE>` first.",
            db_path.display()
        ));
    }

    open_at(&db_path)
}

fn open_or_create(data_dir: Option<&PathBuf>) -> Result<RedbCorpusStore> {
    let db_path = config::database_path(data_dir)?;
    config::ensure_parent(&db_path)?;
    open_at(&db_path)
}

fn open_at(db_path: &Path) -> Result<RedbCorpusStore> {
    info!("Opening corpus: {}", db_path.display());
    RedbCorpusStore::open(db_path)
        .with_context(|| format!("Failed to open corpus: {}", db_path.display()))
}

/// `conc parse`: parses a citation without touching the corpus.
pub fn parse(input: &str, json: bool) -> CommandOutput {
    match parse_reference(input) {
        Ok(reference) => CommandOutput::ok(if json {
            output::format_reference_json(input, &reference)
        } else {
            output::format_reference_human(&reference)
        }),
        Err(err) => CommandOutput::failed(if json {
            output::format_reference_error_json(input, &err)
        } else {
            output::format_reference_error_human(&err)
        }),
    }
}

/// `conc verse`: retrieves a verse or range.
pub async fn verse(
    input: &str,
    translation: &str,
    json: bool,
    data_dir: Option<&PathBuf>,
) -> Result<CommandOutput> {
    if let Err(err) = validate_reference_input(input) {
        return Ok(invalid_request(&err, json));
    }

    let store = open_existing(data_dir)?;
    let translation = match validate_translation(&store, translation).await {
        Ok(code) => code,
        Err(err) => return Ok(invalid_request(&err, json)),
    };

    match retrieve_passage(&store, input, &translation).await {
        Ok(passage) => Ok(CommandOutput::ok(if json {
            output::format_passage_json(&passage)
        } else {
            output::format_passage_human(&passage)
        })),
        Err(PassageError::Reference(err)) => Ok(CommandOutput::failed(if json {
            output::format_reference_error_json(input, &err)
        } else {
            output::format_reference_error_human(&err)
        })),
        Err(err @ PassageError::NotFound { .. }) => {
            Ok(CommandOutput::failed(format!("Error: {}", err)))
        }
        Err(PassageError::Storage(err)) => Err(anyhow!("Failed to retrieve passage: {}", err)),
    }
}

/// `conc search`: ranked search with facets.
pub async fn search(
    query: &str,
    translation: &str,
    limit: usize,
    json: bool,
    data_dir: Option<&PathBuf>,
) -> Result<CommandOutput> {
    let checked = validate_search_input(query).and_then(|_| validate_search_limit(limit));
    if let Err(err) = checked {
        return Ok(invalid_request(&err, json));
    }

    let store = open_existing(data_dir)?;
    let translation = match validate_translation(&store, translation).await {
        Ok(code) => code,
        Err(err) => return Ok(invalid_request(&err, json)),
    };

    let engine = ScriptureSearch::new(store);
    match engine.search(query, &translation, limit).await {
        Ok(response) => Ok(CommandOutput::ok(if json {
            output::format_search_json(&response)
        } else {
            output::format_search_human(&response)
        })),
        Err(SearchError::InvalidQuery {
            message,
            suggestion,
        }) => Ok(invalid_request(
            &ValidationError::new(
                "query",
                format!("Invalid search query: {}", message),
                suggestion,
            ),
            json,
        )),
        Err(err @ (SearchError::EmptyQuery | SearchError::InvalidLimit { .. })) => {
            Ok(CommandOutput::failed(format!("Error: {}", err)))
        }
        Err(err @ SearchError::Execution(_)) => Err(anyhow!(err)),
    }
}

/// `conc import`: loads JSON Lines verses into one translation.
///
/// An unknown translation code is registered first, named after `name` (or
/// the code itself).
pub async fn import(
    file: &Path,
    translation: &str,
    name: Option<&str>,
    language: &str,
    data_dir: Option<&PathBuf>,
) -> Result<CommandOutput> {
    let code = match validate_translation_code(translation) {
        Ok(code) => code,
        Err(err) => return Ok(invalid_request(&err, false)),
    };

    let reader = BufReader::new(
        File::open(file).with_context(|| format!("Failed to open {}", file.display()))?,
    );
    let verses = import::read_verses(reader, &code)?;

    let store = open_or_create(data_dir)?;
    if store.get_translation(&code).await?.is_none() {
        let record = TranslationRecord::new(
            &code,
            name.unwrap_or(&code),
            language,
            TranslationKind::Translation,
        );
        store.put_translation(&record).await?;
        info!(translation = %code, "Registered translation");
    }

    let inserted = store.put_verses(&verses).await?;
    let total = store.verse_count(Some(&code)).await?;

    Ok(CommandOutput::ok(format!(
        "Imported {} verse{} into {} ({} total)",
        inserted,
        if inserted == 1 { "" } else { "s" },
        code,
        total
    )))
}

/// `conc translations`: lists the editions the corpus knows, with how many
/// verses each one holds.
pub async fn translations(json: bool, data_dir: Option<&PathBuf>) -> Result<CommandOutput> {
    let store = open_or_create(data_dir)?;

    let mut counted = Vec::new();
    for translation in store.list_translations().await? {
        let verses = store.verse_count(Some(&translation.code)).await?;
        counted.push((translation, verses));
    }
    let total = store.verse_count(None).await?;

    Ok(CommandOutput::ok(if json {
        output::format_translations_json(&counted, total)
    } else {
        output::format_translations_human(&counted, total)
    }))
}
