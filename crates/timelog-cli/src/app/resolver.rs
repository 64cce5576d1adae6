//! Path resolution for the config and database files.

use std::path::PathBuf;

use tracing::debug;

use crate::cli::Cli;
use crate::config::{default_config_path, default_db_path, read_config, TimelogConfig};

/// Resolve the config file path, checking TIMELOG_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("TIMELOG_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Load the config file, falling back to defaults when it does not exist.
pub fn load_config() -> anyhow::Result<TimelogConfig> {
    let path = resolve_config_path()?;
    if !path.exists() {
        debug!(path = %path.display(), "No config file, using defaults");
        return Ok(TimelogConfig::default());
    }
    read_config(&path)
}

/// Resolve the database path: `--db`/TIMELOG_DB, then the config, then the
/// XDG data dir.
pub fn resolve_db_path(cli: &Cli, config: &TimelogConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.db.clone() {
        return Ok(path);
    }
    if let Some(path) = config.storage.path.as_deref() {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    default_db_path()
}
