//! PostgreSQL-backed `NotificationRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{NotificationRepository, NotificationRepositoryError};
use crate::domain::{Notification, RecipeId, UserId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::NotificationRow;
use super::pool::{DbPool, PoolError};
use super::schema::notifications;

/// Diesel-backed implementation of the `NotificationRepository` port.
#[derive(Clone)]
pub struct DieselNotificationRepository {
    pool: DbPool,
}

impl DieselNotificationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> NotificationRepositoryError {
    map_pool_error(error, NotificationRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> NotificationRepositoryError {
    map_diesel_error(
        error,
        NotificationRepositoryError::query,
        NotificationRepositoryError::connection,
    )
}

fn affected(count: usize) -> u64 {
    u64::try_from(count).unwrap_or(u64::MAX)
}

#[async_trait]
impl NotificationRepository for DieselNotificationRepository {
    async fn insert(&self, notification: &Notification) -> Result<(), NotificationRepositoryError> {
        let row = NotificationRow::from(notification);
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(notifications::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn list_for(
        &self,
        recipient: &UserId,
        limit: u32,
        unread_only: bool,
    ) -> Result<Vec<Notification>, NotificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let mut query = notifications::table
            .filter(notifications::recipient_id.eq(*recipient.as_uuid()))
            .into_boxed();
        if unread_only {
            query = query.filter(notifications::read.eq(false));
        }
        let rows: Vec<NotificationRow> = query
            .order((notifications::created_at.desc(), notifications::id.desc()))
            .limit(i64::from(limit))
            .select(NotificationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter()
            .map(|row| {
                row.into_domain()
                    .map_err(|err| NotificationRepositoryError::query(err.to_string()))
            })
            .collect()
    }

    async fn unread_count(&self, recipient: &UserId) -> Result<u64, NotificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let count: i64 = notifications::table
            .filter(notifications::recipient_id.eq(recipient.as_uuid()))
            .filter(notifications::read.eq(false))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn mark_read(
        &self,
        recipient: &UserId,
        id: Uuid,
    ) -> Result<bool, NotificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let target = notifications::table
            .filter(notifications::id.eq(id))
            .filter(notifications::recipient_id.eq(recipient.as_uuid()));
        let updated = diesel::update(target)
            .set(notifications::read.eq(true))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(updated > 0)
    }

    async fn mark_all_read(&self, recipient: &UserId) -> Result<u64, NotificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let target = notifications::table
            .filter(notifications::recipient_id.eq(recipient.as_uuid()))
            .filter(notifications::read.eq(false));
        let updated = diesel::update(target)
            .set(notifications::read.eq(true))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(affected(updated))
    }

    async fn delete_for_recipe(
        &self,
        recipe: &RecipeId,
    ) -> Result<u64, NotificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = diesel::delete(
            notifications::table.filter(notifications::recipe_id.eq(recipe.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;
        Ok(affected(removed))
    }
}
