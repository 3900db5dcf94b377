//! Driving port for reading the recipe feed and profiles.

use async_trait::async_trait;
use pagination::Page;
use serde::Serialize;

use crate::domain::{Error, FeedQuery, RecipeId, RecipeView, TagCount, User, UserId};

/// One feed page with the tag cloud.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPage {
    /// Recipes rendered for the viewer.
    pub recipes: Page<RecipeView>,
    /// Most frequent tags across all recipes.
    pub popular_tags: Vec<TagCount>,
}

/// A user's own and liked recipes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileOverview {
    /// The viewer.
    pub user: User,
    /// Recipes the viewer saved.
    pub created: Vec<RecipeView>,
    /// Recipes the viewer likes.
    pub liked: Vec<RecipeView>,
}

/// Read-side use-cases over recipes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeFeedQuery: Send + Sync {
    /// One page of the shared feed.
    async fn feed(&self, viewer: &UserId, query: FeedQuery) -> Result<FeedPage, Error>;

    /// A single recipe.
    async fn recipe(&self, viewer: &UserId, id: &RecipeId) -> Result<RecipeView, Error>;

    /// The viewer's profile overview.
    async fn profile(&self, viewer: &UserId) -> Result<ProfileOverview, Error>;

    /// The viewer's own user record.
    async fn current_user(&self, viewer: &UserId) -> Result<User, Error>;
}

/// Empty feed used where recipe reads are not exercised.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecipeFeedQuery;

#[async_trait]
impl RecipeFeedQuery for FixtureRecipeFeedQuery {
    async fn feed(&self, _viewer: &UserId, query: FeedQuery) -> Result<FeedPage, Error> {
        Ok(FeedPage {
            recipes: Page::new(Vec::new(), query.page, 0),
            popular_tags: Vec::new(),
        })
    }

    async fn recipe(&self, _viewer: &UserId, id: &RecipeId) -> Result<RecipeView, Error> {
        Err(Error::not_found(format!("recipe {id} not found")))
    }

    async fn profile(&self, viewer: &UserId) -> Result<ProfileOverview, Error> {
        Err(Error::not_found(format!("user {viewer} not found")))
    }

    async fn current_user(&self, viewer: &UserId) -> Result<User, Error> {
        Err(Error::not_found(format!("user {viewer} not found")))
    }
}
