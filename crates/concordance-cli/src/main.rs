//! Concordance CLI - scripture lookup and search from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Parse a citation (no corpus needed)
//! conc parse "1 Cor 13:4-7"
//!
//! # Load a translation from JSON Lines, then look things up
//! conc import kjv.jsonl -t KJV
//! conc verse "John 3:16"
//! conc search "\"love one another\"" -n 5 --json
//!
//! # Show help
//! conc --help
//! ```

mod commands;
mod config;
mod import;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use concordance_core::config::{DEFAULT_SEARCH_LIMIT, DEFAULT_TRANSLATION};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Concordance scripture CLI.
///
/// Resolves citations like "Rom 8:28-30" and runs ranked full-text searches
/// over an imported verse corpus.
#[derive(Parser)]
#[command(name = "conc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Custom data directory (default: $CONCORDANCE_DATA_DIR, then platform location)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a citation and show its canonical form
    Parse {
        reference: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a verse or verse range
    Verse {
        reference: String,

        /// Translation code
        #[arg(short, long, default_value = DEFAULT_TRANSLATION)]
        translation: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search verse text (supports "phrases", AND, OR, NOT and parentheses)
    Search {
        query: String,

        /// Translation code
        #[arg(short, long, default_value = DEFAULT_TRANSLATION)]
        translation: String,

        /// Maximum number of results to return
        #[arg(short = 'n', long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Import verses from a JSON Lines file
    Import {
        file: PathBuf,

        /// Translation code the verses belong to
        #[arg(short, long)]
        translation: String,

        /// Display name when registering a new translation
        #[arg(long)]
        name: Option<String>,

        /// Language code when registering a new translation
        #[arg(long, default_value = "en")]
        language: String,
    },

    /// List available translations
    Translations {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let data_dir = cli.data_dir.as_ref();

    let result = match &cli.command {
        Command::Parse { reference, json } => commands::parse(reference, *json),
        Command::Verse {
            reference,
            translation,
            json,
        } => commands::verse(reference, translation, *json, data_dir).await?,
        Command::Search {
            query,
            translation,
            limit,
            json,
        } => commands::search(query, translation, *limit, *json, data_dir).await?,
        Command::Import {
            file,
            translation,
            name,
            language,
        } => commands::import(file, translation, name.as_deref(), language, data_dir).await?,
        Command::Translations { json } => commands::translations(*json, data_dir).await?,
    };

    if result.success {
        println!("{}", result.text);
    } else {
        eprintln!("{}", result.text);
        std::process::exit(1);
    }

    Ok(())
}
