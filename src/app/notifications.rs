//! Transient notifications (toasts).
//!
//! A notification lives for [`NOTIFICATION_TTL`] from the moment it is pushed.
//! Time only advances through `Tick` events, so expiry is driven by the event
//! loop and stays deterministic in tests.

use std::time::{Duration, Instant};

/// How long a notification stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: Instant,
}

/// Notifications currently on screen, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    items: Vec<Notification>,
}

impl Notifications {
    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>, now: Instant) {
        let message = message.into();
        match kind {
            NotificationKind::Success => tracing::debug!(%message, "notification"),
            NotificationKind::Error => tracing::warn!(%message, "error notification"),
        }
        self.items.push(Notification {
            message,
            kind,
            created_at: now,
        });
    }

    /// Drops every notification older than the TTL. Returns whether any was
    /// removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.items.len();
        self.items
            .retain(|n| now.saturating_duration_since(n.created_at) < NOTIFICATION_TTL);
        self.items.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
