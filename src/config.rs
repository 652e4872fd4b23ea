//! Configuration file parser for ~/.config/feedboard/config.toml.
//!
//! The config file is optional; a missing file yields `Config::default()`.
//! Unknown keys are accepted by serde but logged as warnings so typos surface.
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::store::UserPreferences;
use crate::theme::ThemeVariant;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// "light" or "dark". Unrecognized names fall back to light.
    pub theme: String,

    /// Categories used for the personalized feed.
    pub categories: Vec<String>,

    pub language: String,

    pub notifications_enabled: bool,

    /// Quiet period before a typed search is issued.
    pub search_debounce_ms: u64,

    /// Lifetime of toast notifications.
    pub notification_ttl_secs: u64,

    /// Fixed seed for trending selection (reproducible output).
    pub trending_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        let prefs = UserPreferences::default();
        Self {
            theme: ThemeVariant::default().as_str().to_string(),
            categories: prefs.categories,
            language: prefs.language,
            notifications_enabled: prefs.notifications_enabled,
            search_debounce_ms: 500,
            notification_ttl_secs: 3,
            trending_seed: None,
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 7] = [
        "theme",
        "categories",
        "language",
        "notifications_enabled",
        "search_debounce_ms",
        "notification_ttl_secs",
        "trending_seed",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            tracing::debug!("Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        tracing::info!(
            theme = %config.theme,
            categories = ?config.categories,
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn theme_variant(&self) -> ThemeVariant {
        ThemeVariant::from_str_name(&self.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %self.theme, "Unknown theme in config, using light");
            ThemeVariant::Light
        })
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notification_ttl_secs)
    }

    /// Preferences implied by this config alone (before DB overrides).
    pub fn user_preferences(&self) -> UserPreferences {
        UserPreferences {
            categories: self.categories.clone(),
            dark_mode: self.theme_variant().is_dark(),
            language: self.language.clone(),
            notifications_enabled: self.notifications_enabled,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_config(name: &str, content: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("feedboard_config_test_{name}"));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    fn cleanup(path: &Path) {
        if let Some(dir) = path.parent() {
            std::fs::remove_dir_all(dir).ok();
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, "light");
        assert_eq!(config.categories, vec!["technology", "sports", "finance"]);
        assert_eq!(config.language, "en");
        assert!(config.notifications_enabled);
        assert_eq!(config.search_debounce(), Duration::from_millis(500));
        assert_eq!(config.notification_ttl(), Duration::from_secs(3));
        assert!(config.trending_seed.is_none());
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/feedboard_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.theme, "light");
    }

    #[test]
    fn test_whitespace_only_file_returns_default() {
        let path = write_config("whitespace", "   \n  \n  ");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.categories.len(), 3);
        cleanup(&path);
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let path = write_config("partial", "theme = \"dark\"\n");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.theme_variant(), ThemeVariant::Dark);
        assert_eq!(config.language, "en");
        assert_eq!(config.search_debounce_ms, 500);
        cleanup(&path);
    }

    #[test]
    fn test_full_config() {
        let content = r#"
theme = "dark"
categories = ["science", "health"]
language = "de"
notifications_enabled = false
search_debounce_ms = 250
notification_ttl_secs = 5
trending_seed = 42
"#;
        let path = write_config("full", content);
        let config = Config::load(&path).unwrap();
        assert_eq!(config.categories, vec!["science", "health"]);
        assert_eq!(config.trending_seed, Some(42));

        let prefs = config.user_preferences();
        assert_eq!(
            prefs,
            UserPreferences {
                categories: vec!["science".to_string(), "health".to_string()],
                dark_mode: true,
                language: "de".to_string(),
                notifications_enabled: false,
            }
        );
        cleanup(&path);
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let err = Config::parse("this is not [valid toml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));
    }

    #[test]
    fn test_wrong_type_returns_error() {
        assert!(Config::parse("categories = \"technology\"\n").is_err());
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let config = Config::parse("theme = \"dark\"\ntotally_fake_key = 1\n").unwrap();
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_unknown_theme_falls_back_to_light() {
        let config = Config::parse("theme = \"solarized\"\n").unwrap();
        assert_eq!(config.theme_variant(), ThemeVariant::Light);
    }

    #[test]
    fn test_too_large_file_rejected() {
        let path = write_config("too_large", &"a".repeat(1_048_577));
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        assert!(err.to_string().contains("too large"));
        cleanup(&path);
    }
}
