use serde::{Deserialize, Serialize};

use crate::content::{ContentItem, SearchResult, TrendingItem};

// ============================================================================
// User Profile
// ============================================================================

/// Preferences edited through the settings form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub categories: Vec<String>,
    pub dark_mode: bool,
    pub language: String,
    pub notifications_enabled: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            categories: vec![
                "technology".to_string(),
                "sports".to_string(),
                "finance".to_string(),
            ],
            dark_mode: false,
            language: "en".to_string(),
            notifications_enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub preferences: UserPreferences,
}

impl UserProfile {
    /// Profile used until the user saves their own details.
    pub fn demo() -> Self {
        Self {
            id: "1".to_string(),
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            avatar: Some(
                "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=150".to_string(),
            ),
            preferences: UserPreferences::default(),
        }
    }
}

// ============================================================================
// Filters
// ============================================================================

/// Session-scoped view filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub categories: Vec<String>,
    pub search_query: String,
}

/// Shallow patch for [`Filters`]. `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub categories: Option<Vec<String>>,
    pub search_query: Option<String>,
}

impl FilterPatch {
    pub fn categories(categories: Vec<String>) -> Self {
        Self {
            categories: Some(categories),
            search_query: None,
        }
    }

    pub fn search_query(query: impl Into<String>) -> Self {
        Self {
            categories: None,
            search_query: Some(query.into()),
        }
    }
}

impl Filters {
    pub fn apply(&mut self, patch: FilterPatch) {
        if let Some(categories) = patch.categories {
            self.categories = categories;
        }
        if let Some(query) = patch.search_query {
            self.search_query = query;
        }
    }
}

// ============================================================================
// Dashboard State
// ============================================================================

/// Everything the view renders. Only the store mutates it; the view reads a
/// shared reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub user: Option<UserProfile>,
    pub content: Vec<ContentItem>,
    pub favorites: Vec<ContentItem>,
    pub trending: Vec<TrendingItem>,
    /// `None` means "not searched" (or cleared); `Some` with empty sets means
    /// the last search matched nothing.
    pub search_results: Option<SearchResult>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub filters: Filters,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_patch_is_shallow() {
        let mut filters = Filters {
            categories: vec!["sports".to_string()],
            search_query: "old".to_string(),
        };

        filters.apply(FilterPatch::search_query("mars"));
        assert_eq!(filters.categories, vec!["sports".to_string()]);
        assert_eq!(filters.search_query, "mars");

        filters.apply(FilterPatch::categories(vec![]));
        assert!(filters.categories.is_empty());
        assert_eq!(filters.search_query, "mars");
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let mut filters = Filters {
            categories: vec!["world".to_string()],
            search_query: "summit".to_string(),
        };
        let before = filters.clone();
        filters.apply(FilterPatch::default());
        assert_eq!(filters, before);
    }

    #[test]
    fn test_initial_state() {
        let state = DashboardState::default();
        assert!(state.content.is_empty());
        assert!(state.search_results.is_none());
        assert!(!state.is_loading);
        assert!(state.error.is_none());
    }
}
