//! Dashboard coordinator.
//!
//! Glues the state store to persistence, theme, toasts and search debouncing.
//! Front ends (the CLI here) drive a [`Dashboard`]; they never touch the
//! database or the store's background channel directly.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::content::ContentProvider;
use crate::debounce::{SearchDebouncer, SearchIntent};
use crate::notifications::{NotificationKind, NotificationQueue};
use crate::preferences::PreferenceManager;
use crate::storage::Database;
use crate::store::{
    DashboardState, DashboardStore, EventOutcome, FilterPatch, StoreEvent, UserProfile,
};
use crate::theme::ThemeVariant;

pub const PREFERENCES_SAVED: &str = "Preferences saved! Your feed has been updated.";

pub struct Dashboard {
    store: DashboardStore,
    db: Database,
    prefs: PreferenceManager,
    theme: ThemeVariant,
    notifications: NotificationQueue,
    debouncer: SearchDebouncer,
}

impl Dashboard {
    /// Build a dashboard over `provider`, layering DB preferences on `config`.
    ///
    /// A preference load failure is logged and falls back to config values.
    pub async fn open(
        provider: Arc<dyn ContentProvider>,
        config: &Config,
        db: Database,
    ) -> Self {
        let prefs = match PreferenceManager::load(config, &db).await {
            Ok(prefs) => prefs,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load preferences, using config defaults");
                PreferenceManager::from_config(config)
            }
        };

        let store = match config.trending_seed {
            Some(seed) => DashboardStore::with_seed(provider, seed),
            None => DashboardStore::new(provider),
        };

        Self {
            store,
            db,
            theme: prefs.theme_variant(),
            prefs,
            notifications: NotificationQueue::new(config.notification_ttl()),
            debouncer: SearchDebouncer::new(config.search_debounce()),
        }
    }

    pub fn state(&self) -> &DashboardState {
        self.store.state()
    }

    pub fn store(&self) -> &DashboardStore {
        &self.store
    }

    pub fn theme(&self) -> ThemeVariant {
        self.theme
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationQueue {
        &mut self.notifications
    }

    /// The active profile: the store's user once set, else the stored one.
    pub fn user_profile(&self) -> UserProfile {
        self.store
            .state()
            .user
            .clone()
            .unwrap_or_else(|| self.prefs.user_profile())
    }

    // ========================================================================
    // Startup
    // ========================================================================

    /// Restore favorites and the profile, then start the feed and trending
    /// requests. Call [`settle`](Self::settle) (or pump events) afterwards.
    pub async fn bootstrap(&mut self) {
        match self.db.load_favorites().await {
            Ok(favorites) => {
                tracing::debug!(count = favorites.len(), "Restored favorites");
                self.store.restore_favorites(favorites);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load favorites, starting empty");
            }
        }

        let user = self.prefs.user_profile();
        let categories = user.preferences.categories.clone();
        self.store.set_user(user);
        self.store
            .set_filters(FilterPatch::categories(categories.clone()));
        self.store.fetch_personalized_content(&categories);
        self.store.refresh_trending();
    }

    // ========================================================================
    // Event Pump
    // ========================================================================

    /// Apply one background completion, raising an error toast on failure.
    pub fn handle_event(&mut self, event: StoreEvent) -> EventOutcome {
        let outcome = self.store.handle_event(event);
        if let EventOutcome::Failed(err) = &outcome {
            self.notify(NotificationKind::Error, err.to_string());
        }
        outcome
    }

    /// Wait for the next completion and apply it.
    pub async fn pump(&mut self) -> Option<EventOutcome> {
        let event = self.store.next_event().await?;
        Some(self.handle_event(event))
    }

    /// Apply completions until no request is pending.
    pub async fn settle(&mut self) -> Vec<EventOutcome> {
        let mut outcomes = Vec::new();
        while !self.store.is_idle() {
            match self.pump().await {
                Some(outcome) => outcomes.push(outcome),
                None => break,
            }
        }
        outcomes
    }

    /// Periodic housekeeping: expire toasts and dispatch a settled search.
    ///
    /// Returns true if anything visible changed.
    pub fn tick(&mut self) -> bool {
        let mut changed = self.notifications.expire();
        match self.debouncer.poll() {
            Some(SearchIntent::Search(query)) => {
                self.store.search_content(&query);
                changed = true;
            }
            Some(SearchIntent::Clear) => {
                self.store.clear_search_results();
                changed = true;
            }
            None => {}
        }
        changed
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Record a keystroke in the search box. The search itself is issued by
    /// [`tick`](Self::tick) once typing pauses.
    pub fn type_search(&mut self, query: &str) {
        self.store
            .set_filters(FilterPatch::search_query(query.to_string()));
        self.debouncer.keystroke(query);
    }

    /// Search immediately. A blank query clears results instead.
    pub fn search_now(&mut self, query: &str) {
        self.debouncer.cancel();
        self.store
            .set_filters(FilterPatch::search_query(query.to_string()));
        let trimmed = query.trim();
        if trimmed.is_empty() {
            self.store.clear_search_results();
        } else {
            self.store.search_content(trimmed);
        }
    }

    /// Load the feed for `categories` without saving them to the profile.
    pub async fn preview_categories(&mut self, categories: &[String]) {
        self.store.fetch_personalized_content(categories);
        self.settle().await;
    }

    pub fn refresh_trending(&mut self) -> u64 {
        self.store.refresh_trending()
    }

    // ========================================================================
    // Favorites
    // ========================================================================

    /// Favorite a feed item and persist the list. Returns false if nothing
    /// changed.
    pub async fn add_favorite(&mut self, item_id: &str) -> Result<bool> {
        if !self.store.add_to_favorites(item_id) {
            return Ok(false);
        }
        self.persist_favorites().await?;
        self.notify(NotificationKind::Success, "Added to favorites");
        Ok(true)
    }

    pub async fn remove_favorite(&mut self, item_id: &str) -> Result<bool> {
        if !self.store.remove_from_favorites(item_id) {
            return Ok(false);
        }
        self.persist_favorites().await?;
        self.notify(NotificationKind::Info, "Removed from favorites");
        Ok(true)
    }

    pub async fn reorder_favorites(&mut self, source: usize, destination: usize) -> Result<()> {
        self.store.reorder_favorites(source, destination)?;
        self.persist_favorites().await
    }

    /// Feed order is session-only; nothing is persisted.
    pub fn reorder_content(&mut self, source: usize, destination: usize) -> Result<()> {
        self.store.reorder_content(source, destination)?;
        Ok(())
    }

    async fn persist_favorites(&mut self) -> Result<()> {
        let result = self
            .db
            .save_favorites(&self.store.state().favorites)
            .await
            .context("Failed to save favorites");
        if let Err(e) = &result {
            tracing::warn!(error = %e, "Favorites not persisted");
            self.notify(NotificationKind::Error, "Could not save favorites");
        }
        result
    }

    // ========================================================================
    // Theme and Preferences
    // ========================================================================

    pub async fn toggle_theme(&mut self) -> Result<ThemeVariant> {
        let next = self.theme.toggled();
        self.set_theme(next).await?;
        Ok(next)
    }

    /// Apply and persist a theme, mirroring it into the profile's dark-mode flag.
    pub async fn set_theme(&mut self, variant: ThemeVariant) -> Result<()> {
        self.prefs
            .set_theme(&self.db, variant)
            .await
            .context("Failed to save theme")?;
        self.theme = variant;

        let mut user = self.user_profile();
        user.preferences.dark_mode = variant.is_dark();
        self.store.set_user(user);
        tracing::debug!(theme = variant.name(), "Theme changed");
        Ok(())
    }

    /// Save an edited profile: persist it, apply it, refetch the feed for its
    /// categories and confirm with a toast once the feed has loaded.
    ///
    /// Nothing is applied in memory unless the profile was persisted.
    pub async fn save_preferences(&mut self, profile: UserProfile) -> Result<()> {
        if let Err(e) = self.prefs.save_profile(&self.db, &profile).await {
            tracing::warn!(error = %e, "Preferences not persisted");
            self.notify(NotificationKind::Error, "Could not save preferences");
            return Err(e.context("Failed to save preferences"));
        }

        let categories = profile.preferences.categories.clone();
        self.theme = ThemeVariant::from_dark_flag(profile.preferences.dark_mode);
        self.store.set_user(profile);
        self.store
            .set_filters(FilterPatch::categories(categories.clone()));

        self.store.fetch_personalized_content(&categories);
        self.settle().await;
        self.notify(NotificationKind::Success, PREFERENCES_SAVED);
        Ok(())
    }

    /// Replace just the feed categories and refetch.
    pub async fn set_categories(&mut self, categories: Vec<String>) -> Result<()> {
        let mut user = self.user_profile();
        user.preferences.categories = categories;
        self.save_preferences(user).await
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    /// Queue a toast. Non-error toasts are suppressed when the user has
    /// turned notifications off.
    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        let enabled = self.user_profile().preferences.notifications_enabled;
        if !enabled && kind != NotificationKind::Error {
            return;
        }
        self.notifications.push(kind, message);
    }
}
