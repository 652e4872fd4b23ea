//! Preference manager that merges config.toml defaults with DB overrides.
//!
//! Config values serve as defaults; DB values (user_preferences table) override them.
//! Writes always go to the DB, never to the config file.
use std::collections::HashMap;

use anyhow::Result;

use crate::config::Config;
use crate::storage::Database;
use crate::store::{UserPreferences, UserProfile};
use crate::theme::ThemeVariant;

const KEY_THEME: &str = "theme";
const KEY_CATEGORIES: &str = "categories";
const KEY_LANGUAGE: &str = "language";
const KEY_NOTIFICATIONS: &str = "notifications_enabled";
const KEY_PROFILE_ID: &str = "profile.id";
const KEY_PROFILE_NAME: &str = "profile.name";
const KEY_PROFILE_EMAIL: &str = "profile.email";
const KEY_PROFILE_AVATAR: &str = "profile.avatar";

// ============================================================================
// PreferenceManager
// ============================================================================

/// Merged preference store: config.toml defaults + DB overrides.
///
/// Reads are in-memory. Writes persist to the DB first and only then update
/// the in-memory map, so a failed write leaves both unchanged.
pub struct PreferenceManager {
    prefs: HashMap<String, String>,
}

impl PreferenceManager {
    /// Load preferences by merging config defaults with DB overrides.
    pub async fn load(config: &Config, db: &Database) -> Result<Self> {
        let mut prefs = Self::flatten_config(config);

        for (key, value) in db.get_all_preferences().await? {
            prefs.insert(key, value);
        }

        Ok(Self { prefs })
    }

    /// Create from config only (no DB). Fallback for when DB load fails.
    pub fn from_config(config: &Config) -> Self {
        Self {
            prefs: Self::flatten_config(config),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.prefs.get(key).map(String::as_str)
    }

    /// Set a preference: writes to DB and updates in-memory map.
    pub async fn set(&mut self, db: &Database, key: &str, value: &str) -> Result<()> {
        db.set_preference(key, value).await?;
        self.prefs.insert(key.to_string(), value.to_string());
        Ok(())
    }

    // ========================================================================
    // Type-safe Accessors
    // ========================================================================

    pub fn theme_variant(&self) -> ThemeVariant {
        self.get(KEY_THEME)
            .and_then(ThemeVariant::from_str_name)
            .unwrap_or_default()
    }

    /// Feed categories. Stored as a JSON array; an unreadable value falls
    /// back to the defaults.
    pub fn categories(&self) -> Vec<String> {
        self.get(KEY_CATEGORIES)
            .and_then(|v| serde_json::from_str(v).ok())
            .unwrap_or_else(|| UserPreferences::default().categories)
    }

    pub fn language(&self) -> &str {
        self.get(KEY_LANGUAGE).unwrap_or("en")
    }

    pub fn notifications_enabled(&self) -> bool {
        self.get(KEY_NOTIFICATIONS)
            .and_then(|v| v.parse().ok())
            .unwrap_or(true)
    }

    /// The stored profile, with the demo profile filling any missing field.
    pub fn user_profile(&self) -> UserProfile {
        let demo = UserProfile::demo();
        UserProfile {
            id: self.get(KEY_PROFILE_ID).map_or(demo.id, str::to_string),
            name: self.get(KEY_PROFILE_NAME).map_or(demo.name, str::to_string),
            email: self
                .get(KEY_PROFILE_EMAIL)
                .map_or(demo.email, str::to_string),
            avatar: match self.get(KEY_PROFILE_AVATAR) {
                Some("") => None,
                Some(url) => Some(url.to_string()),
                None => demo.avatar,
            },
            preferences: UserPreferences {
                categories: self.categories(),
                dark_mode: self.theme_variant().is_dark(),
                language: self.language().to_string(),
                notifications_enabled: self.notifications_enabled(),
            },
        }
    }

    // ========================================================================
    // Bulk Writes
    // ========================================================================

    /// Persist the whole profile (identity, preferences and theme) in one
    /// transaction.
    pub async fn save_profile(&mut self, db: &Database, profile: &UserProfile) -> Result<()> {
        let prefs = &profile.preferences;
        let entries = [
            (KEY_PROFILE_ID, profile.id.clone()),
            (KEY_PROFILE_NAME, profile.name.clone()),
            (KEY_PROFILE_EMAIL, profile.email.clone()),
            (KEY_PROFILE_AVATAR, profile.avatar.clone().unwrap_or_default()),
            (KEY_CATEGORIES, serde_json::to_string(&prefs.categories)?),
            (KEY_LANGUAGE, prefs.language.clone()),
            (KEY_NOTIFICATIONS, prefs.notifications_enabled.to_string()),
            (
                KEY_THEME,
                ThemeVariant::from_dark_flag(prefs.dark_mode)
                    .as_str()
                    .to_string(),
            ),
        ];

        db.set_preferences(&entries).await?;
        for (key, value) in entries {
            self.prefs.insert(key.to_string(), value);
        }
        tracing::debug!(user = %profile.id, "Saved profile preferences");
        Ok(())
    }

    pub async fn set_theme(&mut self, db: &Database, variant: ThemeVariant) -> Result<()> {
        self.set(db, KEY_THEME, variant.as_str()).await
    }

    pub async fn set_categories(&mut self, db: &Database, categories: &[String]) -> Result<()> {
        let encoded = serde_json::to_string(categories)?;
        self.set(db, KEY_CATEGORIES, &encoded).await
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    fn flatten_config(config: &Config) -> HashMap<String, String> {
        let mut map = HashMap::new();

        map.insert(
            KEY_THEME.to_string(),
            config.theme_variant().as_str().to_string(),
        );
        // Vec<String> always serializes
        if let Ok(encoded) = serde_json::to_string(&config.categories) {
            map.insert(KEY_CATEGORIES.to_string(), encoded);
        }
        map.insert(KEY_LANGUAGE.to_string(), config.language.clone());
        map.insert(
            KEY_NOTIFICATIONS.to_string(),
            config.notifications_enabled.to_string(),
        );

        map
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    async fn test_db() -> Database {
        Database::open(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_load_defaults_from_config() {
        let db = test_db().await;
        let pm = PreferenceManager::load(&Config::default(), &db).await.unwrap();

        assert_eq!(pm.theme_variant(), ThemeVariant::Light);
        assert_eq!(pm.categories(), vec!["technology", "sports", "finance"]);
        assert_eq!(pm.language(), "en");
        assert!(pm.notifications_enabled());
    }

    #[tokio::test]
    async fn test_db_overrides_config() {
        let db = test_db().await;
        db.set_preference("theme", "dark").await.unwrap();
        db.set_preference("categories", r#"["science"]"#)
            .await
            .unwrap();

        let pm = PreferenceManager::load(&Config::default(), &db).await.unwrap();
        assert_eq!(pm.theme_variant(), ThemeVariant::Dark);
        assert_eq!(pm.categories(), vec!["science"]);
    }

    #[tokio::test]
    async fn test_corrupt_categories_fall_back() {
        let db = test_db().await;
        db.set_preference("categories", "not json").await.unwrap();

        let pm = PreferenceManager::load(&Config::default(), &db).await.unwrap();
        assert_eq!(pm.categories(), UserPreferences::default().categories);
    }

    #[tokio::test]
    async fn test_set_theme_persists() {
        let db = test_db().await;
        let mut pm = PreferenceManager::load(&Config::default(), &db).await.unwrap();

        pm.set_theme(&db, ThemeVariant::Dark).await.unwrap();
        assert_eq!(pm.theme_variant(), ThemeVariant::Dark);
        assert_eq!(
            db.get_preference("theme").await.unwrap(),
            Some("dark".to_string())
        );
    }

    #[tokio::test]
    async fn test_default_profile_is_demo() {
        let pm = PreferenceManager::from_config(&Config::default());
        assert_eq!(pm.user_profile(), UserProfile::demo());
    }

    #[tokio::test]
    async fn test_profile_round_trip() {
        let db = test_db().await;
        let config = Config::default();
        let mut pm = PreferenceManager::load(&config, &db).await.unwrap();

        let profile = UserProfile {
            id: "7".to_string(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            avatar: None,
            preferences: UserPreferences {
                categories: vec!["science".to_string(), "world".to_string()],
                dark_mode: true,
                language: "fr".to_string(),
                notifications_enabled: false,
            },
        };
        pm.save_profile(&db, &profile).await.unwrap();
        assert_eq!(pm.user_profile(), profile);

        // Fresh session reads the same profile back
        let reloaded = PreferenceManager::load(&config, &db).await.unwrap();
        assert_eq!(reloaded.user_profile(), profile);
        assert_eq!(reloaded.theme_variant(), ThemeVariant::Dark);
    }

    #[tokio::test]
    async fn test_config_file_load_and_merge() {
        let db = test_db().await;
        let config = Config::parse("theme = \"dark\"\ncategories = [\"health\"]\n").unwrap();

        let mut pm = PreferenceManager::load(&config, &db).await.unwrap();
        assert_eq!(pm.theme_variant(), ThemeVariant::Dark);
        assert_eq!(pm.categories(), vec!["health"]);

        pm.set_categories(&db, &["sports".to_string()]).await.unwrap();
        let pm2 = PreferenceManager::load(&config, &db).await.unwrap();
        assert_eq!(pm2.categories(), vec!["sports"]);
        // Config-only value is still present
        assert_eq!(pm2.theme_variant(), ThemeVariant::Dark);
    }
}
