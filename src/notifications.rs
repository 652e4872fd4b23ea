//! Transient toast queue.
//!
//! Toasts expire after their duration; the view calls [`NotificationQueue::expire`]
//! on each tick, the same way status messages are cleared in the event loop.

use std::time::Duration;
use tokio::time::Instant;

/// Default toast lifetime.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub duration: Duration,
    pub created_at: Instant,
}

impl Notification {
    fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.duration
    }
}

pub struct NotificationQueue {
    items: Vec<Notification>,
    next_id: u64,
    ttl: Duration,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl NotificationQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            ttl,
        }
    }

    /// Queue a toast with the default lifetime. Returns its id.
    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        self.push_for(kind, message, self.ttl)
    }

    pub fn push_for(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        duration: Duration,
    ) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.items.push(Notification {
            id,
            kind,
            message: message.into(),
            duration,
            created_at: Instant::now(),
        });
        id
    }

    /// Remove a toast by id. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    /// Drop expired toasts. Returns true if anything was removed.
    pub fn expire(&mut self) -> bool {
        let now = Instant::now();
        let before = self.items.len();
        self.items.retain(|n| !n.is_expired(now));
        self.items.len() != before
    }

    /// Active toasts, oldest first.
    pub fn active(&self) -> &[Notification] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time;

    #[tokio::test]
    async fn test_push_assigns_increasing_ids() {
        let mut queue = NotificationQueue::default();
        let a = queue.push(NotificationKind::Info, "first");
        let b = queue.push(NotificationKind::Success, "second");
        assert!(b > a);
        assert_eq!(queue.active().len(), 2);
        assert_eq!(queue.active()[0].message, "first");
    }

    #[tokio::test]
    async fn test_dismiss() {
        let mut queue = NotificationQueue::default();
        let id = queue.push(NotificationKind::Error, "oops");
        assert!(queue.dismiss(id));
        assert!(!queue.dismiss(id));
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_expires_after_ttl() {
        time::pause();
        let mut queue = NotificationQueue::default();
        queue.push(NotificationKind::Success, "saved");

        time::advance(Duration::from_millis(2999)).await;
        assert!(!queue.expire());
        assert_eq!(queue.active().len(), 1);

        time::advance(Duration::from_millis(1)).await;
        assert!(queue.expire());
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_custom_duration_outlives_default() {
        time::pause();
        let mut queue = NotificationQueue::default();
        queue.push(NotificationKind::Info, "short");
        queue.push_for(NotificationKind::Warning, "long", Duration::from_secs(10));

        time::advance(Duration::from_secs(5)).await;
        queue.expire();
        assert_eq!(queue.active().len(), 1);
        assert_eq!(queue.active()[0].kind, NotificationKind::Warning);
    }
}
