//! Engine Configuration
//!
//! Optional JSON file tuning defaults for the editor helpers. Every field
//! has a built-in default, so an empty object is a valid configuration.

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{LoFieldError, Result};
use crate::history::{DEFAULT_DEBOUNCE_MS, DEFAULT_MAX_UNDO_LEVELS};
use crate::share::{DEFAULT_TOKEN_LENGTH, MAX_TOKEN_LENGTH, MIN_TOKEN_LENGTH};
use crate::tweaks::{TweaksConfig, DEFAULT_TWEAKS};

/// Undo history limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub max_levels: usize,
    pub debounce_ms: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_levels: DEFAULT_MAX_UNDO_LEVELS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

/// Share link settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    pub token_length: usize,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            token_length: DEFAULT_TOKEN_LENGTH,
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Values used to heal partial TWEAKS metadata
    pub default_tweaks: TweaksConfig,
    pub history: HistoryConfig,
    pub share: ShareConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_tweaks: DEFAULT_TWEAKS,
            history: HistoryConfig::default(),
            share: ShareConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LoFieldError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| LoFieldError::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        config.validate()?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Check values are within supported bounds
    pub fn validate(&self) -> Result<()> {
        if self.history.max_levels == 0 {
            return Err(LoFieldError::InvalidConfig {
                reason: "history.max_levels must be at least 1".to_string(),
            });
        }

        let len = self.share.token_length;
        if !(MIN_TOKEN_LENGTH..=MAX_TOKEN_LENGTH).contains(&len) {
            return Err(LoFieldError::InvalidConfig {
                reason: format!(
                    "share.token_length must be between {} and {}, got {}",
                    MIN_TOKEN_LENGTH, MAX_TOKEN_LENGTH, len
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::History;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let file = write_config("{}");
        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let file = write_config(
            r#"{"history": {"debounce_ms": 250}, "default_tweaks": {"bpm": 90, "swing": 10, "filter": 5000, "reverb": 20, "delay": 0}}"#,
        );
        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.history.debounce_ms, 250);
        assert_eq!(config.history.max_levels, DEFAULT_MAX_UNDO_LEVELS);
        assert_eq!(config.default_tweaks.bpm, 90);
    }

    #[test]
    fn test_loaded_limits_drive_history() {
        let file = write_config(r#"{"history": {"max_levels": 1, "debounce_ms": 0}}"#);
        let config = EngineConfig::load(file.path()).unwrap();

        let mut history = History::from_config("a", &config.history);
        assert!(history.set("b"));
        assert!(history.set("c"));
        assert_eq!(history.undo_count(), 1);
        assert_eq!(history.undo(), Some(&"b"));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_invalid_token_length() {
        let file = write_config(r#"{"share": {"token_length": 4}}"#);
        let err = EngineConfig::load(file.path()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_zero_history_rejected() {
        let file = write_config(r#"{"history": {"max_levels": 0}}"#);
        assert!(EngineConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::load(Path::new("/nonexistent/lofield.json")).unwrap_err();
        assert!(matches!(err, LoFieldError::FileNotFound { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let file = write_config("{ nope");
        let err = EngineConfig::load(file.path()).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
