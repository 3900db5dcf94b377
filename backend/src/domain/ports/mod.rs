//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`RecipeGenerator`], [`LoginService`]) are
//! implemented by outbound adapters. Driving ports ([`RecipeFeedQuery`],
//! [`RecipeCommand`], and friends) are implemented by domain services and
//! called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod ingredient_catalogue;
mod ingredient_repository;
mod login_service;
mod notification_inbox;
mod notification_repository;
mod recipe_command;
mod recipe_feed_query;
mod recipe_generation;
mod recipe_generator;
mod recipe_repository;
mod user_repository;

#[cfg(test)]
pub use ingredient_catalogue::MockIngredientCatalogue;
pub use ingredient_catalogue::{FixtureIngredientCatalogue, IngredientCatalogue};
#[cfg(test)]
pub use ingredient_repository::MockIngredientRepository;
pub use ingredient_repository::{IngredientRepository, IngredientRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use notification_inbox::MockNotificationInbox;
pub use notification_inbox::{FixtureNotificationInbox, NotificationInbox};
#[cfg(test)]
pub use notification_repository::MockNotificationRepository;
pub use notification_repository::{NotificationRepository, NotificationRepositoryError};
#[cfg(test)]
pub use recipe_command::MockRecipeCommand;
pub use recipe_command::{FixtureRecipeCommand, MAX_RECIPES_PER_SAVE, RecipeCommand};
#[cfg(test)]
pub use recipe_feed_query::MockRecipeFeedQuery;
pub use recipe_feed_query::{FeedPage, FixtureRecipeFeedQuery, ProfileOverview, RecipeFeedQuery};
#[cfg(test)]
pub use recipe_generation::MockRecipeGeneration;
pub use recipe_generation::{FixtureRecipeGeneration, RecipeGeneration};
#[cfg(test)]
pub use recipe_generator::MockRecipeGenerator;
pub use recipe_generator::{FixtureRecipeGenerator, RecipeGenerator, RecipeGeneratorError};
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{RecipeRepository, RecipeRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
