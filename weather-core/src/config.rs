use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::provider::openweather::DEFAULT_BASE_URL;

/// City fetched automatically when the panel first activates.
pub const DEFAULT_CITY: &str = "London";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_city = "Paris"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// OpenWeather API key (`appid`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_city: Option<String>,

    /// Upstream host override, mostly useful for testing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-panel", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Let an explicitly supplied key (flag or environment) win over the stored one.
    pub fn with_api_key_override(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    /// Returns the API key, if present and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    pub fn default_city(&self) -> &str {
        self.default_city
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CITY)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fall_back_to_london_and_openweather() {
        let cfg = Config::default();

        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.default_city(), "London");
        assert_eq!(cfg.base_url(), "https://api.openweathermap.org");
    }

    #[test]
    fn parses_toml_file_contents() {
        let cfg = Config::from_toml(
            r#"
            api_key = "OPEN_KEY"
            default_city = "Paris"
            "#,
        )
        .expect("valid toml");

        assert_eq!(cfg.api_key(), Some("OPEN_KEY"));
        assert_eq!(cfg.default_city(), "Paris");
        assert_eq!(cfg.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn empty_file_is_default_config() {
        let cfg = Config::from_toml("").expect("empty toml");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn blank_default_city_falls_back_to_london() {
        let cfg = Config {
            default_city: Some("   ".into()),
            ..Default::default()
        };

        assert_eq!(cfg.default_city(), "London");

        let cfg = Config {
            default_city: Some(" Paris ".into()),
            ..Default::default()
        };
        assert_eq!(cfg.default_city(), "Paris");
    }

    #[test]
    fn override_replaces_stored_key() {
        let cfg = Config {
            api_key: Some("FILE_KEY".into()),
            ..Default::default()
        }
        .with_api_key_override(Some("ENV_KEY".into()));

        assert_eq!(cfg.api_key(), Some("ENV_KEY"));
    }

    #[test]
    fn blank_override_keeps_stored_key() {
        let cfg = Config {
            api_key: Some("FILE_KEY".into()),
            ..Default::default()
        }
        .with_api_key_override(Some("  ".into()));

        assert_eq!(cfg.api_key(), Some("FILE_KEY"));
    }

    #[test]
    fn blank_stored_key_counts_as_missing() {
        let cfg = Config {
            api_key: Some(String::new()),
            ..Default::default()
        };

        assert_eq!(cfg.api_key(), None);
    }

    #[test]
    fn toml_roundtrip_skips_unset_fields() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            ..Default::default()
        };

        let text = toml::to_string_pretty(&cfg).expect("serializable");
        assert!(text.contains("api_key"));
        assert!(!text.contains("default_city"));
        assert_eq!(Config::from_toml(&text).expect("parseable"), cfg);
    }
}
