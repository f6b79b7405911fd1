//! Optional user configuration (~/.speakdrill/config.toml)
//!
//! Everything has a sensible default; a missing or unreadable file is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Override for the progress database location.
    pub database_path: Option<PathBuf>,

    /// Path to a custom question bank JSON file. The built-in bank is used
    /// when unset or unreadable.
    pub question_bank_path: Option<PathBuf>,

    pub reminder: ReminderConfig,
}

/// Daily practice reminder settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReminderConfig {
    pub enabled: bool,
    /// Local hour (0-23) the reminder fires.
    pub hour: u32,
    pub minute: u32,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            hour: 19,
            minute: 0,
        }
    }
}

impl Config {
    /// Default config file location (`~/.speakdrill/config.toml`).
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".speakdrill")
            .join("config.toml")
    }

    /// Load from the default location. Missing or broken files yield the
    /// defaults; a parse failure is logged.
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    /// Load from an explicit path with the same fallback behavior.
    pub fn load_from(path: &Path) -> Self {
        let Ok(raw) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("invalid config at {}, using defaults: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml"));
        assert_eq!(config, Config::default());
        assert_eq!(config.reminder.hour, 19);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[reminder]\nenabled = true\nhour = 8\n").unwrap();

        let config = Config::load_from(&path);
        assert!(config.reminder.enabled);
        assert_eq!(config.reminder.hour, 8);
        assert_eq!(config.reminder.minute, 0);
        assert!(config.database_path.is_none());
    }

    #[test]
    fn test_broken_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not valid toml [[[").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }
}
