//! Notification inbox service.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::port_errors::{map_notification_error, map_user_error};
use crate::domain::ports::{NotificationInbox, NotificationRepository, UserRepository};
use crate::domain::{
    Error, InboxLimit, NotificationFeed, NotificationView, UserId, index_profiles,
};

/// Inbox service implementing [`NotificationInbox`].
#[derive(Clone)]
pub struct NotificationInboxService<N, U> {
    notifications: Arc<N>,
    users: Arc<U>,
}

impl<N, U> NotificationInboxService<N, U> {
    /// Create a new service with the given repositories.
    pub fn new(notifications: Arc<N>, users: Arc<U>) -> Self {
        Self {
            notifications,
            users,
        }
    }
}

#[async_trait]
impl<N, U> NotificationInbox for NotificationInboxService<N, U>
where
    N: NotificationRepository,
    U: UserRepository,
{
    async fn list(
        &self,
        viewer: &UserId,
        limit: InboxLimit,
        unread_only: bool,
    ) -> Result<NotificationFeed, Error> {
        let stored = self
            .notifications
            .list_for(viewer, limit.get(), unread_only)
            .await
            .map_err(map_notification_error)?;
        let unread_count = self
            .notifications
            .unread_count(viewer)
            .await
            .map_err(map_notification_error)?;

        let mut initiators: Vec<UserId> = stored.iter().map(|n| n.initiator).collect();
        initiators.sort();
        initiators.dedup();
        let profiles = if initiators.is_empty() {
            Default::default()
        } else {
            index_profiles(
                self.users
                    .find_many(&initiators)
                    .await
                    .map_err(map_user_error)?,
            )
        };

        Ok(NotificationFeed {
            notifications: stored
                .into_iter()
                .map(|n| NotificationView::render(n, &profiles))
                .collect(),
            unread_count,
        })
    }

    async fn mark_read(&self, viewer: &UserId, id: Uuid) -> Result<(), Error> {
        let found = self
            .notifications
            .mark_read(viewer, id)
            .await
            .map_err(map_notification_error)?;
        if found {
            Ok(())
        } else {
            Err(Error::not_found(format!("notification {id} not found")))
        }
    }

    async fn mark_all_read(&self, viewer: &UserId) -> Result<u64, Error> {
        self.notifications
            .mark_all_read(viewer)
            .await
            .map_err(map_notification_error)
    }
}
