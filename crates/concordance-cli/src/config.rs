//! Data directory resolution for the CLI.
//!
//! The corpus lives in a single redb file inside the data directory:
//! - `--data-dir` when given
//! - `$CONCORDANCE_DATA_DIR` when set
//! - otherwise the platform data directory

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Database file name inside the data directory
const DATABASE_FILENAME: &str = "corpus.redb";

/// Environment variable for a custom data directory
pub const DATA_DIR_ENV: &str = "CONCORDANCE_DATA_DIR";

/// Returns the data directory, without creating it.
///
/// Platform locations:
/// - macOS: `~/Library/Application Support/rs.concordance.Concordance/`
/// - Linux: `~/.local/share/concordance/`
/// - Windows: `%APPDATA%\concordance\Concordance\data\`
pub fn get_data_dir(custom_dir: Option<&PathBuf>) -> Result<PathBuf> {
    resolve_data_dir(custom_dir, std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
}

fn resolve_data_dir(custom_dir: Option<&PathBuf>, env_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = custom_dir {
        return Ok(dir.clone());
    }

    if let Some(dir) = env_dir.filter(|d| !d.as_os_str().is_empty()) {
        return Ok(dir);
    }

    ProjectDirs::from("rs", "concordance", "Concordance")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| anyhow!("Could not determine data directory"))
}

/// Returns the path to the database file.
pub fn database_path(custom_dir: Option<&PathBuf>) -> Result<PathBuf> {
    let data_dir = get_data_dir(custom_dir)?;
    Ok(data_dir.join(DATABASE_FILENAME))
}

/// Creates the directory holding `db_path` if needed.
pub fn ensure_parent(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory: {}", parent.display()))?;
    }
    Ok(())
}
