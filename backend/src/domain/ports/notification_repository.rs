//! Port for notification storage.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Notification, RecipeId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by notification repository adapters.
    pub enum NotificationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "notification repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } => "notification repository query failed: {message}",
    }
}

/// Storage for per-user notifications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Store a notification.
    async fn insert(&self, notification: &Notification) -> Result<(), NotificationRepositoryError>;

    /// Newest notifications for `recipient`, optionally only unread ones.
    async fn list_for(
        &self,
        recipient: &UserId,
        limit: u32,
        unread_only: bool,
    ) -> Result<Vec<Notification>, NotificationRepositoryError>;

    /// Number of unread notifications for `recipient`.
    async fn unread_count(&self, recipient: &UserId) -> Result<u64, NotificationRepositoryError>;

    /// Mark one of `recipient`'s notifications read. Returns `false` when no
    /// notification with `id` belongs to `recipient`.
    async fn mark_read(
        &self,
        recipient: &UserId,
        id: Uuid,
    ) -> Result<bool, NotificationRepositoryError>;

    /// Mark all of `recipient`'s notifications read; returns how many changed.
    async fn mark_all_read(&self, recipient: &UserId) -> Result<u64, NotificationRepositoryError>;

    /// Remove every notification about `recipe`; returns how many were removed.
    async fn delete_for_recipe(&self, recipe: &RecipeId)
        -> Result<u64, NotificationRepositoryError>;
}
