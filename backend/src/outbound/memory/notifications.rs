//! In-memory `NotificationRepository`.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::ports::{NotificationRepository, NotificationRepositoryError};
use crate::domain::{Notification, RecipeId, UserId};

/// Notifications in insertion order.
#[derive(Debug, Default)]
pub struct MemoryNotificationRepository {
    notifications: RwLock<Vec<Notification>>,
}

impl MemoryNotificationRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationRepository for MemoryNotificationRepository {
    async fn insert(&self, notification: &Notification) -> Result<(), NotificationRepositoryError> {
        self.notifications.write().await.push(notification.clone());
        Ok(())
    }

    async fn list_for(
        &self,
        recipient: &UserId,
        limit: u32,
        unread_only: bool,
    ) -> Result<Vec<Notification>, NotificationRepositoryError> {
        let guard = self.notifications.read().await;
        let mut selected: Vec<Notification> = guard
            .iter()
            .filter(|n| n.recipient == *recipient && (!unread_only || !n.read))
            .cloned()
            .collect();
        // Same total order as the SQL adapter: newest first, then id descending.
        selected.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        selected.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(selected)
    }

    async fn unread_count(&self, recipient: &UserId) -> Result<u64, NotificationRepositoryError> {
        let guard = self.notifications.read().await;
        let count = guard
            .iter()
            .filter(|n| n.recipient == *recipient && !n.read)
            .count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn mark_read(
        &self,
        recipient: &UserId,
        id: Uuid,
    ) -> Result<bool, NotificationRepositoryError> {
        let mut guard = self.notifications.write().await;
        match guard
            .iter_mut()
            .find(|n| n.id == id && n.recipient == *recipient)
        {
            Some(notification) => {
                notification.read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_all_read(&self, recipient: &UserId) -> Result<u64, NotificationRepositoryError> {
        let mut guard = self.notifications.write().await;
        let mut updated = 0_u64;
        for notification in guard
            .iter_mut()
            .filter(|n| n.recipient == *recipient && !n.read)
        {
            notification.read = true;
            updated += 1;
        }
        Ok(updated)
    }

    async fn delete_for_recipe(
        &self,
        recipe: &RecipeId,
    ) -> Result<u64, NotificationRepositoryError> {
        let mut guard = self.notifications.write().await;
        let before = guard.len();
        guard.retain(|n| n.recipe_id != *recipe);
        Ok(u64::try_from(before - guard.len()).unwrap_or(u64::MAX))
    }
}
