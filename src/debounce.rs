//! Search input debouncing.
//!
//! Keystrokes only record the latest query; a search is issued once input has
//! been quiet for the configured delay. Polled from the view's tick.

use std::time::Duration;
use tokio::time::Instant;

/// Default quiet period before a search is issued.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// What the view should dispatch once input settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchIntent {
    /// Run a search for this query.
    Search(String),
    /// The box was emptied: return to the unfiltered feed.
    Clear,
}

pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record the current contents of the search box.
    pub fn keystroke(&mut self, query: impl Into<String>) {
        self.pending = Some((query.into(), Instant::now()));
    }

    /// Return the settled intent if the quiet period has elapsed.
    pub fn poll(&mut self) -> Option<SearchIntent> {
        let (_, last) = self.pending.as_ref()?;
        if last.elapsed() < self.delay {
            return None;
        }
        let (query, _) = self.pending.take()?;
        let trimmed = query.trim();
        if trimmed.is_empty() {
            Some(SearchIntent::Clear)
        } else {
            Some(SearchIntent::Search(trimmed.to_string()))
        }
    }

    /// Drop any pending query (e.g. the search box was closed).
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time;

    #[tokio::test]
    async fn test_not_ready_before_delay() {
        time::pause();
        let mut debouncer = SearchDebouncer::default();
        debouncer.keystroke("ma");
        time::advance(Duration::from_millis(499)).await;
        assert_eq!(debouncer.poll(), None);
        assert!(debouncer.is_pending());
    }

    #[tokio::test]
    async fn test_latest_keystroke_wins() {
        time::pause();
        let mut debouncer = SearchDebouncer::default();
        debouncer.keystroke("m");
        time::advance(Duration::from_millis(300)).await;
        debouncer.keystroke("mars");
        time::advance(Duration::from_millis(300)).await;
        // Only 300ms since the last keystroke
        assert_eq!(debouncer.poll(), None);

        time::advance(Duration::from_millis(200)).await;
        assert_eq!(debouncer.poll(), Some(SearchIntent::Search("mars".to_string())));
        assert_eq!(debouncer.poll(), None);
    }

    #[tokio::test]
    async fn test_empty_box_clears() {
        time::pause();
        let mut debouncer = SearchDebouncer::default();
        debouncer.keystroke("  ");
        time::advance(DEFAULT_DEBOUNCE).await;
        assert_eq!(debouncer.poll(), Some(SearchIntent::Clear));
    }

    #[tokio::test]
    async fn test_cancel() {
        time::pause();
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(100));
        debouncer.keystroke("rover");
        debouncer.cancel();
        time::advance(Duration::from_secs(1)).await;
        assert_eq!(debouncer.poll(), None);
    }
}
