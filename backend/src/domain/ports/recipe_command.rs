//! Driving port for recipe mutations.

use async_trait::async_trait;

use crate::domain::{CommentText, Error, RecipeDraft, RecipeEdit, RecipeId, RecipeView, UserId};

/// Largest number of recipes saved in one call.
pub const MAX_RECIPES_PER_SAVE: usize = 10;

/// Write-side use-cases over recipes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeCommand: Send + Sync {
    /// Save drafts as recipes owned by `viewer`.
    async fn save(&self, viewer: &UserId, drafts: Vec<RecipeDraft>) -> Result<Vec<RecipeId>, Error>;

    /// Like or unlike a recipe.
    async fn toggle_like(&self, viewer: &UserId, id: &RecipeId) -> Result<RecipeView, Error>;

    /// Comment on a recipe.
    async fn add_comment(
        &self,
        viewer: &UserId,
        id: &RecipeId,
        text: CommentText,
    ) -> Result<RecipeView, Error>;

    /// Edit a recipe the viewer owns.
    async fn update(
        &self,
        viewer: &UserId,
        id: &RecipeId,
        edit: RecipeEdit,
    ) -> Result<RecipeView, Error>;

    /// Delete a recipe the viewer owns.
    async fn delete(&self, viewer: &UserId, id: &RecipeId) -> Result<(), Error>;
}

/// Command stub rejecting every mutation as not found.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecipeCommand;

#[async_trait]
impl RecipeCommand for FixtureRecipeCommand {
    async fn save(
        &self,
        _viewer: &UserId,
        drafts: Vec<RecipeDraft>,
    ) -> Result<Vec<RecipeId>, Error> {
        Ok(drafts.iter().map(|_| RecipeId::random()).collect())
    }

    async fn toggle_like(&self, _viewer: &UserId, id: &RecipeId) -> Result<RecipeView, Error> {
        Err(Error::not_found(format!("recipe {id} not found")))
    }

    async fn add_comment(
        &self,
        _viewer: &UserId,
        id: &RecipeId,
        _text: CommentText,
    ) -> Result<RecipeView, Error> {
        Err(Error::not_found(format!("recipe {id} not found")))
    }

    async fn update(
        &self,
        _viewer: &UserId,
        id: &RecipeId,
        _edit: RecipeEdit,
    ) -> Result<RecipeView, Error> {
        Err(Error::not_found(format!("recipe {id} not found")))
    }

    async fn delete(&self, _viewer: &UserId, id: &RecipeId) -> Result<(), Error> {
        Err(Error::not_found(format!("recipe {id} not found")))
    }
}
