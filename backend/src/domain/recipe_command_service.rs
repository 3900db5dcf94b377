//! Write-side recipe service.
//!
//! Likes and comments go through the repository's atomic operations so
//! concurrent callers never overwrite each other. Owner edits load the
//! recipe, apply the change on the aggregate, and write the editable fields
//! back. Likes, comments, and edits notify the recipe owner; a notification
//! that cannot be stored is logged and does not fail the mutation that
//! caused it.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::warn;
use uuid::Uuid;

use crate::domain::port_errors::{map_notification_error, map_recipe_error, map_user_error};
use crate::domain::ports::{
    MAX_RECIPES_PER_SAVE, NotificationRepository, RecipeCommand, RecipeRepository,
    UserRepository,
};
use crate::domain::recipe_feed_service::render_recipe;
use crate::domain::{
    Comment, CommentText, Error, Notification, Recipe, RecipeDraft, RecipeEdit, RecipeId,
    RecipeView, User, UserId,
};

/// Recipe mutation service implementing [`RecipeCommand`].
#[derive(Clone)]
pub struct RecipeCommandService<R, U, N> {
    recipes: Arc<R>,
    users: Arc<U>,
    notifications: Arc<N>,
    clock: Arc<dyn Clock>,
}

impl<R, U, N> RecipeCommandService<R, U, N> {
    /// Create a new service with the given repositories and clock.
    pub fn new(
        recipes: Arc<R>,
        users: Arc<U>,
        notifications: Arc<N>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            recipes,
            users,
            notifications,
            clock,
        }
    }
}

impl<R, U, N> RecipeCommandService<R, U, N>
where
    R: RecipeRepository,
    U: UserRepository,
    N: NotificationRepository,
{
    async fn load(&self, id: &RecipeId) -> Result<Recipe, Error> {
        self.recipes
            .find_by_id(id)
            .await
            .map_err(map_recipe_error)?
            .ok_or_else(|| Self::missing(id))
    }

    async fn load_owned(&self, viewer: &UserId, id: &RecipeId) -> Result<Recipe, Error> {
        let recipe = self.load(id).await?;
        if !recipe.is_owned_by(viewer) {
            return Err(Error::forbidden("only the recipe owner may change it"));
        }
        Ok(recipe)
    }

    async fn actor(&self, viewer: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(viewer)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized(format!("user {viewer} is not registered")))
    }

    fn missing(id: &RecipeId) -> Error {
        Error::not_found(format!("recipe {id} not found"))
    }

    async fn notify(&self, notification: Option<Notification>) {
        let Some(notification) = notification else {
            return;
        };
        if let Err(err) = self.notifications.insert(&notification).await {
            let mapped = map_notification_error(err);
            warn!(
                recipe_id = %notification.recipe_id,
                kind = notification.kind.as_str(),
                error = %mapped,
                "failed to store notification"
            );
        }
    }

    fn validate_batch(drafts: Vec<RecipeDraft>) -> Result<Vec<RecipeDraft>, Error> {
        if drafts.is_empty() {
            return Err(Error::invalid_request("at least one recipe is required"));
        }
        if drafts.len() > MAX_RECIPES_PER_SAVE {
            return Err(Error::invalid_request(format!(
                "at most {MAX_RECIPES_PER_SAVE} recipes may be saved at once"
            )));
        }
        drafts
            .into_iter()
            .enumerate()
            .map(|(index, draft)| {
                draft.validated().map_err(|err| {
                    Error::invalid_request(format!("recipe {index} is invalid: {err}"))
                        .with_details(serde_json::json!({ "index": index }))
                })
            })
            .collect()
    }
}

#[async_trait]
impl<R, U, N> RecipeCommand for RecipeCommandService<R, U, N>
where
    R: RecipeRepository,
    U: UserRepository,
    N: NotificationRepository,
{
    async fn save(
        &self,
        viewer: &UserId,
        drafts: Vec<RecipeDraft>,
    ) -> Result<Vec<RecipeId>, Error> {
        let drafts = Self::validate_batch(drafts)?;
        let now = self.clock.utc();
        let recipes: Vec<Recipe> = drafts
            .into_iter()
            .map(|draft| Recipe::from_draft(RecipeId::random(), *viewer, draft, now))
            .collect();
        self.recipes
            .insert_many(&recipes)
            .await
            .map_err(map_recipe_error)?;
        Ok(recipes.iter().map(|recipe| recipe.id).collect())
    }

    async fn toggle_like(&self, viewer: &UserId, id: &RecipeId) -> Result<RecipeView, Error> {
        let actor = self.actor(viewer).await?;
        let now = self.clock.utc();
        let (recipe, outcome) = self
            .recipes
            .toggle_like(id, viewer, now)
            .await
            .map_err(map_recipe_error)?
            .ok_or_else(|| Self::missing(id))?;
        if outcome.liked {
            self.notify(Notification::liked(&recipe, &actor, now)).await;
        }
        render_recipe(self.users.as_ref(), recipe, viewer).await
    }

    async fn add_comment(
        &self,
        viewer: &UserId,
        id: &RecipeId,
        text: CommentText,
    ) -> Result<RecipeView, Error> {
        let actor = self.actor(viewer).await?;
        let now = self.clock.utc();
        let comment = Comment {
            id: Uuid::new_v4(),
            author: *viewer,
            text,
            created_at: now,
        };
        let recipe = self
            .recipes
            .push_comment(id, &comment)
            .await
            .map_err(map_recipe_error)?
            .ok_or_else(|| Self::missing(id))?;
        self.notify(Notification::commented(&recipe, &actor, now)).await;
        render_recipe(self.users.as_ref(), recipe, viewer).await
    }

    async fn update(
        &self,
        viewer: &UserId,
        id: &RecipeId,
        edit: RecipeEdit,
    ) -> Result<RecipeView, Error> {
        let mut recipe = self.load_owned(viewer, id).await?;
        let now = self.clock.utc();
        let changed = recipe
            .apply_edit(edit, now)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        if changed {
            self.recipes
                .update(&recipe)
                .await
                .map_err(map_recipe_error)?;
            self.notify(Some(Notification::updated(&recipe, now))).await;
        }
        render_recipe(self.users.as_ref(), recipe, viewer).await
    }

    async fn delete(&self, viewer: &UserId, id: &RecipeId) -> Result<(), Error> {
        self.load_owned(viewer, id).await?;
        // Notifications go first so a failed cleanup leaves the recipe intact.
        self.notifications
            .delete_for_recipe(id)
            .await
            .map_err(map_notification_error)?;
        let existed = self.recipes.delete(id).await.map_err(map_recipe_error)?;
        if !existed {
            return Err(Self::missing(id));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "recipe_command_service_tests.rs"]
mod tests;
