//! Configuration management
//!
//! Load user preferences from a TOML config file. The file is only ever
//! read; nothing from a session is written back.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub export: ExportPreferences,
    pub ui: UiPreferences,
    pub log: LogPreferences,
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        let config: Config =
            toml::from_str(&contents).with_context(|| format!("Invalid config: {:?}", path))?;
        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        match project_dirs() {
            Some(dirs) => dirs.config_dir().join("config.toml"),
            None => PathBuf::from("mrqr.toml"),
        }
    }
}

pub(crate) fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "mrqr", "mrqr")
}

/// Export preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportPreferences {
    /// Directory exported PNGs are written to
    pub directory: PathBuf,
}

impl Default for ExportPreferences {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

/// UI preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UiPreferences {
    pub start_dark: bool,
}

/// Logging preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogPreferences {
    /// Filter used when RUST_LOG is unset
    pub level: String,
    /// Log file; defaults to `mrqr.log` in the data directory
    pub file: Option<PathBuf>,
}

impl Default for LogPreferences {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.export.directory, PathBuf::from("."));
        assert!(!config.ui.start_dark);
        assert_eq!(config.log.level, "info");
        assert!(config.log.file.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.export.directory, config.export.directory);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: Config = toml::from_str("[ui]\nstart_dark = true\n").unwrap();
        assert!(parsed.ui.start_dark);
        assert_eq!(parsed.log.level, "info");
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::load_from(&tmp.path().join("absent.toml")).unwrap();
        assert_eq!(config.export.directory, PathBuf::from("."));
    }

    #[test]
    fn test_load_malformed_file_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[export\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
