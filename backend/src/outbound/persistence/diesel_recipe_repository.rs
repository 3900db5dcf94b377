//! PostgreSQL-backed `RecipeRepository`.
//!
//! Feed queries mirror `domain::select_page`: the search term is matched
//! case-insensitively against the name, ingredient names, dietary labels, and
//! tags; ordering always ends on the id so pages never overlap.
//!
//! Likes and comments lock the row with `SELECT ... FOR UPDATE`, apply the
//! domain change, and write the social columns back inside one transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::sql;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Bool, Text};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{RecipeRepository, RecipeRepositoryError};
use crate::domain::{
    Comment, FeedQuery, LikeOutcome, Recipe, RecipeId, SearchTerm, SortOption, TagCount, UserId,
};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{RecipeEditRecord, RecipeRecord, RecipeRow, RecipeSocialRecord, TagCountRow};
use super::pool::{DbPool, PoolError};
use super::schema::recipes;

/// Diesel-backed implementation of the `RecipeRepository` port.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> RecipeRepositoryError {
    map_pool_error(error, RecipeRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> RecipeRepositoryError {
    map_diesel_error(
        error,
        RecipeRepositoryError::query,
        RecipeRepositoryError::connection,
    )
}

fn rows_to_recipes(rows: Vec<RecipeRow>) -> Result<Vec<Recipe>, RecipeRepositoryError> {
    rows.into_iter()
        .map(|row| {
            row.into_domain()
                .map_err(|err| RecipeRepositoryError::query(err.to_string()))
        })
        .collect()
}

fn record(recipe: &Recipe) -> Result<RecipeRecord<'_>, RecipeRepositoryError> {
    RecipeRecord::from_domain(recipe)
        .map_err(|err| RecipeRepositoryError::query(format!("recipe encoding failed: {err}")))
}

fn stored_recipe(row: RecipeRow) -> Result<Recipe, diesel::result::Error> {
    row.into_domain()
        .map_err(|err| diesel::result::Error::DeserializationError(Box::new(err)))
}

fn social_record(recipe: &Recipe) -> Result<RecipeSocialRecord, diesel::result::Error> {
    RecipeSocialRecord::from_domain(recipe)
        .map_err(|err| diesel::result::Error::SerializationError(Box::new(err)))
}

/// `ILIKE` pattern matching `term` anywhere, with wildcards escaped.
fn contains_pattern(term: &SearchTerm) -> String {
    let escaped = term
        .as_str()
        .replace('\\', r"\\")
        .replace('%', r"\%")
        .replace('_', r"\_");
    format!("%{escaped}%")
}

type BoxedRecipes = recipes::BoxedQuery<'static, Pg>;

fn filtered(query: &FeedQuery) -> BoxedRecipes {
    let base = recipes::table.into_boxed();
    let Some(term) = &query.search else {
        return base;
    };
    let pattern = contains_pattern(term);
    base.filter(
        sql::<Bool>("(recipes.name ILIKE ")
            .bind::<Text, _>(pattern.clone())
            .sql(
                " OR EXISTS (SELECT 1 FROM jsonb_array_elements(recipes.ingredients) AS line \
                 WHERE line->>'name' ILIKE ",
            )
            .bind::<Text, _>(pattern.clone())
            .sql(
                ") OR EXISTS (SELECT 1 FROM unnest(recipes.dietary_preference) AS label \
                 WHERE label ILIKE ",
            )
            .bind::<Text, _>(pattern.clone())
            .sql(") OR EXISTS (SELECT 1 FROM unnest(recipes.tags) AS tag WHERE tag ILIKE ")
            .bind::<Text, _>(pattern)
            .sql("))"),
    )
}

fn ordered(query: BoxedRecipes, sort: SortOption) -> BoxedRecipes {
    match sort {
        SortOption::Popular => query.order((
            recipes::like_count.desc(),
            recipes::created_at.desc(),
            recipes::id.asc(),
        )),
        SortOption::Recent => query.order((recipes::created_at.desc(), recipes::id.asc())),
    }
}

impl DieselRecipeRepository {
    /// Lock one row, apply `change`, and store its likes and comments.
    async fn mutate_social<T, F>(
        &self,
        id: &RecipeId,
        change: F,
    ) -> Result<Option<(Recipe, T)>, RecipeRepositoryError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Recipe) -> T + Send + 'static,
    {
        let id: Uuid = *id.as_uuid();
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        conn.transaction(|conn| {
            async move {
                let row: Option<RecipeRow> = recipes::table
                    .filter(recipes::id.eq(id))
                    .select(RecipeRow::as_select())
                    .for_update()
                    .get_result(conn)
                    .await
                    .optional()?;
                let Some(row) = row else {
                    return Ok(None);
                };
                let mut recipe = stored_recipe(row)?;
                let outcome = change(&mut recipe);
                diesel::update(recipes::table.filter(recipes::id.eq(id)))
                    .set(&social_record(&recipe)?)
                    .execute(conn)
                    .await?;
                Ok(Some((recipe, outcome)))
            }
            .scope_boxed()
        })
        .await
        .map_err(diesel_error)
    }
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn insert_many(&self, batch: &[Recipe]) -> Result<(), RecipeRepositoryError> {
        if batch.is_empty() {
            return Ok(());
        }
        let rows = batch
            .iter()
            .map(record)
            .collect::<Result<Vec<_>, _>>()?;
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(recipes::table)
            .values(&rows)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<RecipeRow> = recipes::table
            .filter(recipes::id.eq(id.as_uuid()))
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(|row| {
            row.into_domain()
                .map_err(|err| RecipeRepositoryError::query(err.to_string()))
        })
        .transpose()
    }

    async fn update(&self, recipe: &Recipe) -> Result<(), RecipeRepositoryError> {
        let changes = RecipeEditRecord::from_domain(recipe).map_err(|err| {
            RecipeRepositoryError::query(format!("recipe encoding failed: {err}"))
        })?;
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let updated = diesel::update(recipes::table.filter(recipes::id.eq(recipe.id.as_uuid())))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        if updated == 0 {
            return Err(RecipeRepositoryError::not_found(recipe.id.to_string()));
        }
        Ok(())
    }

    async fn toggle_like(
        &self,
        id: &RecipeId,
        user: &UserId,
        at: DateTime<Utc>,
    ) -> Result<Option<(Recipe, LikeOutcome)>, RecipeRepositoryError> {
        let user = *user;
        self.mutate_social(id, move |recipe| recipe.toggle_like(user, at))
            .await
    }

    async fn push_comment(
        &self,
        id: &RecipeId,
        comment: &Comment,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let comment = comment.clone();
        let at = comment.created_at;
        let stored = self
            .mutate_social(id, move |recipe| recipe.add_comment(comment, at))
            .await?;
        Ok(stored.map(|(recipe, ())| recipe))
    }

    async fn delete(&self, id: &RecipeId) -> Result<bool, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = diesel::delete(recipes::table.filter(recipes::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(removed > 0)
    }

    async fn query_feed(
        &self,
        query: &FeedQuery,
    ) -> Result<(Vec<Recipe>, u64), RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let total: i64 = filtered(query)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        let rows: Vec<RecipeRow> = ordered(filtered(query), query.sort)
            .select(RecipeRow::as_select())
            .offset(i64::try_from(query.page.offset()).unwrap_or(i64::MAX))
            .limit(i64::from(query.page.limit()))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok((rows_to_recipes(rows)?, u64::try_from(total).unwrap_or(0)))
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<RecipeRow> = recipes::table
            .filter(recipes::owner_id.eq(owner.as_uuid()))
            .order((recipes::created_at.desc(), recipes::id.asc()))
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows_to_recipes(rows)
    }

    async fn list_liked_by(&self, user: &UserId) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<RecipeRow> = recipes::table
            .filter(recipes::liked_by.contains(vec![*user.as_uuid()]))
            .order((recipes::created_at.desc(), recipes::id.asc()))
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows_to_recipes(rows)
    }

    async fn popular_tags(&self, limit: usize) -> Result<Vec<TagCount>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<TagCountRow> = diesel::sql_query(
            "SELECT tag, COUNT(*) AS count FROM recipes, unnest(recipes.tags) AS tag \
             GROUP BY tag ORDER BY count DESC, tag ASC LIMIT $1",
        )
        .bind::<BigInt, _>(i64::try_from(limit).unwrap_or(i64::MAX))
        .load(&mut conn)
        .await
        .map_err(diesel_error)?;
        Ok(rows
            .into_iter()
            .map(|row| TagCount {
                tag: row.tag,
                count: u64::try_from(row.count).unwrap_or(0),
            })
            .collect())
    }
}
