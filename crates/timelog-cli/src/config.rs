use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use timelog_core::TimezoneMode;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TimelogConfig {
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub ui: UiSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StorageSection {
    /// Database path; the XDG data dir is used when absent.
    pub path: Option<String>,
    /// Upper bound on a single stored collection, in bytes.
    pub quota_bytes: Option<usize>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UiSection {
    /// IANA zone name for local display; the system zone when absent.
    pub timezone: Option<String>,
    #[serde(default)]
    pub display: TimezoneMode,
}

impl TimelogConfig {
    pub fn new(db_path: PathBuf, timezone: Option<String>, display: TimezoneMode) -> Self {
        Self {
            storage: StorageSection {
                path: Some(db_path.to_string_lossy().to_string()),
                quota_bytes: None,
            },
            ui: UiSection { timezone, display },
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_db_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("timelog.db"))
}

pub fn read_config(path: &Path) -> anyhow::Result<TimelogConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &TimelogConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", &[".config"])
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    xdg_dir("XDG_DATA_HOME", &[".local", "share"])
}

fn xdg_dir(var: &str, fallback: &[&str]) -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(var) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("timelog"));
        }
    }
    let mut dir = home_dir()?;
    for part in fallback {
        dir.push(part);
    }
    Ok(dir.join("timelog"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: TimelogConfig = toml::from_str("").unwrap();
        assert!(config.storage.path.is_none());
        assert!(config.storage.quota_bytes.is_none());
        assert!(config.ui.timezone.is_none());
        assert_eq!(config.ui.display, TimezoneMode::Local);
    }

    #[test]
    fn test_parse_full_config() {
        let config: TimelogConfig = toml::from_str(
            r#"
[storage]
path = "/tmp/work.db"
quota_bytes = 5242880

[ui]
timezone = "Europe/Berlin"
display = "utc"
"#,
        )
        .unwrap();
        assert_eq!(config.storage.path.as_deref(), Some("/tmp/work.db"));
        assert_eq!(config.storage.quota_bytes, Some(5_242_880));
        assert_eq!(config.ui.timezone.as_deref(), Some("Europe/Berlin"));
        assert_eq!(config.ui.display, TimezoneMode::Utc);
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = TimelogConfig::new(
            PathBuf::from("/data/timelog.db"),
            Some("Asia/Tokyo".to_string()),
            TimezoneMode::Utc,
        );
        write_config(&path, &config).unwrap();

        let read = read_config(&path).unwrap();
        assert_eq!(read.storage.path.as_deref(), Some("/data/timelog.db"));
        assert_eq!(read.ui.timezone.as_deref(), Some("Asia/Tokyo"));
        assert_eq!(read.ui.display, TimezoneMode::Utc);
    }

    #[test]
    fn test_unknown_display_mode_is_rejected() {
        let result: Result<TimelogConfig, _> = toml::from_str("[ui]\ndisplay = \"mars\"\n");
        assert!(result.is_err());
    }
}
