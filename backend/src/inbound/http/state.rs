//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureIngredientCatalogue, FixtureLoginService, FixtureNotificationInbox,
    FixtureRecipeCommand, FixtureRecipeFeedQuery, FixtureRecipeGeneration, IngredientCatalogue,
    LoginService, NotificationInbox, RecipeCommand, RecipeFeedQuery, RecipeGeneration,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub feed: Arc<dyn RecipeFeedQuery>,
    pub recipes: Arc<dyn RecipeCommand>,
    pub generation: Arc<dyn RecipeGeneration>,
    pub ingredients: Arc<dyn IngredientCatalogue>,
    pub notifications: Arc<dyn NotificationInbox>,
}

impl HttpState {
    /// State backed entirely by fixture ports.
    ///
    /// Tests start here and swap in the one port they exercise.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::FixtureRecipeCommand;
    /// use backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::fixtures().with_recipes(Arc::new(FixtureRecipeCommand));
    /// let _feed = state.feed.clone();
    /// ```
    pub fn fixtures() -> Self {
        Self {
            login: Arc::new(FixtureLoginService),
            feed: Arc::new(FixtureRecipeFeedQuery),
            recipes: Arc::new(FixtureRecipeCommand),
            generation: Arc::new(FixtureRecipeGeneration),
            ingredients: Arc::new(FixtureIngredientCatalogue),
            notifications: Arc::new(FixtureNotificationInbox),
        }
    }

    /// Replace the login port.
    pub fn with_login(mut self, login: Arc<dyn LoginService>) -> Self {
        self.login = login;
        self
    }

    /// Replace the feed query port.
    pub fn with_feed(mut self, feed: Arc<dyn RecipeFeedQuery>) -> Self {
        self.feed = feed;
        self
    }

    /// Replace the recipe command port.
    pub fn with_recipes(mut self, recipes: Arc<dyn RecipeCommand>) -> Self {
        self.recipes = recipes;
        self
    }

    /// Replace the generation port.
    pub fn with_generation(mut self, generation: Arc<dyn RecipeGeneration>) -> Self {
        self.generation = generation;
        self
    }

    /// Replace the ingredient catalogue port.
    pub fn with_ingredients(mut self, ingredients: Arc<dyn IngredientCatalogue>) -> Self {
        self.ingredients = ingredients;
        self
    }

    /// Replace the notification inbox port.
    pub fn with_notifications(mut self, notifications: Arc<dyn NotificationInbox>) -> Self {
        self.notifications = notifications;
        self
    }
}
