//! Driving port for a user's notification inbox.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, InboxLimit, NotificationFeed, UserId};

/// Inbox use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationInbox: Send + Sync {
    /// Newest notifications for `viewer` plus the unread total.
    async fn list(
        &self,
        viewer: &UserId,
        limit: InboxLimit,
        unread_only: bool,
    ) -> Result<NotificationFeed, Error>;

    /// Mark one notification read. Unknown or foreign ids yield `not_found`.
    async fn mark_read(&self, viewer: &UserId, id: Uuid) -> Result<(), Error>;

    /// Mark every notification read; returns how many changed.
    async fn mark_all_read(&self, viewer: &UserId) -> Result<u64, Error>;
}

/// Always-empty inbox.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNotificationInbox;

#[async_trait]
impl NotificationInbox for FixtureNotificationInbox {
    async fn list(
        &self,
        _viewer: &UserId,
        _limit: InboxLimit,
        _unread_only: bool,
    ) -> Result<NotificationFeed, Error> {
        Ok(NotificationFeed {
            notifications: Vec::new(),
            unread_count: 0,
        })
    }

    async fn mark_read(&self, _viewer: &UserId, id: Uuid) -> Result<(), Error> {
        Err(Error::not_found(format!("notification {id} not found")))
    }

    async fn mark_all_read(&self, _viewer: &UserId) -> Result<u64, Error> {
        Ok(0)
    }
}
