//! PostgreSQL-backed `IngredientRepository`.
//!
//! Case-insensitive uniqueness is enforced by the unique `name_key` column;
//! a violation surfaces as `IngredientRepositoryError::Conflict`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::IngredientEntry;
use crate::domain::ports::{IngredientRepository, IngredientRepositoryError};

use super::error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{IngredientRow, NewIngredientRow};
use super::pool::{DbPool, PoolError};
use super::schema::ingredients;

/// Diesel-backed implementation of the `IngredientRepository` port.
#[derive(Clone)]
pub struct DieselIngredientRepository {
    pool: DbPool,
}

impl DieselIngredientRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> IngredientRepositoryError {
    map_pool_error(error, IngredientRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> IngredientRepositoryError {
    map_diesel_error(
        error,
        IngredientRepositoryError::query,
        IngredientRepositoryError::connection,
    )
}

#[async_trait]
impl IngredientRepository for DieselIngredientRepository {
    async fn list(&self) -> Result<Vec<IngredientEntry>, IngredientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<IngredientRow> = ingredients::table
            .order(ingredients::name_key.asc())
            .select(IngredientRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter()
            .map(|row| {
                row.into_domain()
                    .map_err(|err| IngredientRepositoryError::query(err.to_string()))
            })
            .collect()
    }

    async fn insert(&self, entry: &IngredientEntry) -> Result<(), IngredientRepositoryError> {
        let row = NewIngredientRow::from(entry);
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        match diesel::insert_into(ingredients::table)
            .values(&row)
            .execute(&mut conn)
            .await
        {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => {
                Err(IngredientRepositoryError::conflict(entry.name.as_str()))
            }
            Err(err) => Err(diesel_error(err)),
        }
    }
}
