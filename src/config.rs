//! User configuration and preferences

use crate::domain::SwipeConfig;
use crate::error::{Result, TuneSwipeError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct UserConfig {
    /// Whether the welcome dialog has been shown
    pub welcome_shown: bool,
    /// Persisted swipe tuning; command-line flags take precedence
    pub swipe: Option<SwipeConfig>,
}

impl UserConfig {
    /// Get the config file path (~/.config/tuneswipe/config.json)
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tuneswipe").join("config.json"))
    }

    /// Load config from the default location, or default if it doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path().ok_or_else(|| {
            TuneSwipeError::ConfigError("Could not determine config directory".to_string())
        })?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            TuneSwipeError::ConfigError(format!("Failed to read config file: {}", e))
        })?;

        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            TuneSwipeError::ConfigError(format!("Failed to parse config file: {}", e))
        })?;

        if let Some(swipe) = &config.swipe {
            swipe.validate().map_err(|e| {
                TuneSwipeError::ConfigError(format!("Invalid swipe settings: {}", e))
            })?;
        }

        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().ok_or_else(|| {
            TuneSwipeError::ConfigError("Could not determine config directory".to_string())
        })?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                TuneSwipeError::ConfigError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            TuneSwipeError::ConfigError(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, contents).map_err(|e| {
            TuneSwipeError::ConfigError(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Swipe tuning to start from before command-line overrides.
    pub fn swipe_config(&self) -> SwipeConfig {
        self.swipe.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = UserConfig::default();
        assert!(!config.welcome_shown);
        assert!(config.swipe.is_none());
        assert_eq!(config.swipe_config(), SwipeConfig::default());
    }

    #[test]
    fn test_config_serialization() {
        let config = UserConfig {
            welcome_shown: true,
            swipe: None,
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: UserConfig = serde_json::from_str(&json).unwrap();
        assert!(deserialized.welcome_shown);
    }

    #[test]
    fn test_legacy_config_without_swipe_section() {
        let config: UserConfig = serde_json::from_str(r#"{"welcome_shown": true}"#).unwrap();
        assert!(config.welcome_shown);
        assert!(config.swipe.is_none());
    }

    #[test]
    fn test_load_missing_file_gives_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = UserConfig::load_from(&temp_dir.path().join("config.json")).unwrap();
        assert_eq!(config, UserConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.json");

        let config = UserConfig {
            welcome_shown: true,
            swipe: Some(SwipeConfig {
                threshold_fraction: 0.35,
                ..SwipeConfig::default()
            }),
        };
        config.save_to(&path).unwrap();

        let loaded = UserConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.swipe_config().threshold_fraction, 0.35);
    }

    #[test]
    fn test_load_rejects_invalid_swipe_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"swipe": {"threshold_fraction": 3.0}}"#).unwrap();

        let err = UserConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid swipe settings"));
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "welcome_shown = true").unwrap();

        let err = UserConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, TuneSwipeError::ConfigError(_)));
    }
}
