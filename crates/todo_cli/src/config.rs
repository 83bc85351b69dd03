//! Runtime configuration resolution.
//!
//! # Invariants
//! - All resolved paths are absolute.

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "todo";
const DB_FILE_NAME: &str = "todo.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

/// Resolves overrides against platform defaults.
///
/// `data_dir` defaults to `<platform data dir>/todo`; a relative override is
/// resolved against the current directory. `log_level` defaults to
/// [`todo_core::default_log_level`].
pub fn resolve_config(data_dir: Option<&Path>, log_level: Option<&str>) -> Result<AppConfig> {
    let data_dir = match data_dir {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => std::env::current_dir()
            .context("failed to read current directory")?
            .join(dir),
        None => dirs::data_dir()
            .ok_or_else(|| anyhow!("could not determine platform data directory"))?
            .join(APP_DIR_NAME),
    };

    let log_level = log_level
        .map(str::trim)
        .filter(|level| !level.is_empty())
        .unwrap_or_else(|| todo_core::default_log_level())
        .to_string();

    Ok(AppConfig {
        db_path: data_dir.join(DB_FILE_NAME),
        log_dir: data_dir.join(LOG_DIR_NAME),
        data_dir,
        log_level,
    })
}
