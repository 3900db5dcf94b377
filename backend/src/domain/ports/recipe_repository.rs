//! Port for recipe storage and feed queries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Comment, FeedQuery, LikeOutcome, Recipe, RecipeId, TagCount, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by recipe repository adapters.
    pub enum RecipeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "recipe repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } => "recipe repository query failed: {message}",
        /// The recipe to update does not exist.
        NotFound { id: String } => "recipe {id} not found",
    }
}

/// Storage for recipes.
///
/// `query_feed` must honour [`FeedQuery`] exactly as
/// [`crate::domain::select_page`] defines it: search filter first, then the
/// sort option's total order, then the page window.
///
/// Likes and comments are written by many users at once, so adapters apply
/// them as a single atomic step against the stored row. `update` only writes
/// the owner-editable fields and never touches likes or comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Store new recipes atomically.
    async fn insert_many(&self, recipes: &[Recipe]) -> Result<(), RecipeRepositoryError>;

    /// Fetch one recipe.
    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError>;

    /// Write the owner-editable fields of `recipe`. Fails with `NotFound`
    /// when absent.
    async fn update(&self, recipe: &Recipe) -> Result<(), RecipeRepositoryError>;

    /// Toggle `user`'s like on the stored recipe and return the result.
    /// `None` when the recipe does not exist.
    async fn toggle_like(
        &self,
        id: &RecipeId,
        user: &UserId,
        at: DateTime<Utc>,
    ) -> Result<Option<(Recipe, LikeOutcome)>, RecipeRepositoryError>;

    /// Append `comment` to the stored recipe and return the result.
    /// `None` when the recipe does not exist.
    async fn push_comment(
        &self,
        id: &RecipeId,
        comment: &Comment,
    ) -> Result<Option<Recipe>, RecipeRepositoryError>;

    /// Remove a recipe; returns whether it existed.
    async fn delete(&self, id: &RecipeId) -> Result<bool, RecipeRepositoryError>;

    /// One page of the feed plus the number of matching recipes.
    async fn query_feed(
        &self,
        query: &FeedQuery,
    ) -> Result<(Vec<Recipe>, u64), RecipeRepositoryError>;

    /// Recipes saved by `owner`, newest first.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Recipe>, RecipeRepositoryError>;

    /// Recipes liked by `user`, newest first.
    async fn list_liked_by(&self, user: &UserId) -> Result<Vec<Recipe>, RecipeRepositoryError>;

    /// Most frequent tags across all recipes.
    async fn popular_tags(&self, limit: usize) -> Result<Vec<TagCount>, RecipeRepositoryError>;
}
