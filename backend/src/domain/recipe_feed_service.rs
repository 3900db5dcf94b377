//! Read-side recipe service: the shared feed, single recipes, and profiles.
//!
//! Every recipe leaving this service has passed through
//! [`visible_recipes`](crate::domain::visible_recipes), so the viewer only
//! sees other users' public profiles and their own email.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use pagination::Page;

use crate::domain::port_errors::{map_recipe_error, map_user_error};
use crate::domain::ports::{
    FeedPage, ProfileOverview, RecipeFeedQuery, RecipeRepository, UserRepository,
};
use crate::domain::{
    Error, FeedQuery, POPULAR_TAG_LIMIT, Recipe, RecipeId, RecipeView, User, UserId,
    index_profiles, referenced_users, visible_recipe, visible_recipes,
};

/// Recipe read service implementing [`RecipeFeedQuery`].
#[derive(Clone)]
pub struct RecipeFeedService<R, U> {
    recipes: Arc<R>,
    users: Arc<U>,
}

impl<R, U> RecipeFeedService<R, U> {
    /// Create a new service with the given repositories.
    pub fn new(recipes: Arc<R>, users: Arc<U>) -> Self {
        Self { recipes, users }
    }
}

/// Load the profiles `recipes` reference, keyed by id.
pub(crate) async fn load_profiles<'a, U, I>(
    users: &U,
    recipes: I,
) -> Result<HashMap<UserId, User>, Error>
where
    U: UserRepository + ?Sized,
    I: IntoIterator<Item = &'a Recipe>,
{
    let ids = referenced_users(recipes);
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let found = users.find_many(&ids).await.map_err(map_user_error)?;
    Ok(index_profiles(found))
}

/// Render one recipe for `viewer`.
pub(crate) async fn render_recipe<U>(
    users: &U,
    recipe: Recipe,
    viewer: &UserId,
) -> Result<RecipeView, Error>
where
    U: UserRepository + ?Sized,
{
    let profiles = load_profiles(users, [&recipe]).await?;
    Ok(visible_recipe(recipe, &profiles, viewer))
}

fn recipe_not_found(id: &RecipeId) -> Error {
    Error::not_found(format!("recipe {id} not found"))
}

impl<R, U> RecipeFeedService<R, U>
where
    R: RecipeRepository,
    U: UserRepository,
{
    async fn require_user(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }
}

#[async_trait]
impl<R, U> RecipeFeedQuery for RecipeFeedService<R, U>
where
    R: RecipeRepository,
    U: UserRepository,
{
    async fn feed(&self, viewer: &UserId, query: FeedQuery) -> Result<FeedPage, Error> {
        let (recipes, total) = self
            .recipes
            .query_feed(&query)
            .await
            .map_err(map_recipe_error)?;
        let popular_tags = self
            .recipes
            .popular_tags(POPULAR_TAG_LIMIT)
            .await
            .map_err(map_recipe_error)?;
        let profiles = load_profiles(self.users.as_ref(), &recipes).await?;
        let views = visible_recipes(recipes, &profiles, viewer);
        Ok(FeedPage {
            recipes: Page::new(views, query.page, total),
            popular_tags,
        })
    }

    async fn recipe(&self, viewer: &UserId, id: &RecipeId) -> Result<RecipeView, Error> {
        let recipe = self
            .recipes
            .find_by_id(id)
            .await
            .map_err(map_recipe_error)?
            .ok_or_else(|| recipe_not_found(id))?;
        render_recipe(self.users.as_ref(), recipe, viewer).await
    }

    async fn profile(&self, viewer: &UserId) -> Result<ProfileOverview, Error> {
        let user = self.require_user(viewer).await?;
        let created = self
            .recipes
            .list_by_owner(viewer)
            .await
            .map_err(map_recipe_error)?;
        let liked = self
            .recipes
            .list_liked_by(viewer)
            .await
            .map_err(map_recipe_error)?;
        let profiles =
            load_profiles(self.users.as_ref(), created.iter().chain(liked.iter())).await?;
        Ok(ProfileOverview {
            user,
            created: visible_recipes(created, &profiles, viewer),
            liked: visible_recipes(liked, &profiles, viewer),
        })
    }

    async fn current_user(&self, viewer: &UserId) -> Result<User, Error> {
        self.require_user(viewer).await
    }
}
