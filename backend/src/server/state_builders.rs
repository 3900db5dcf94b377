//! Builders wiring repository adapters and services into [`HttpState`].
//!
//! A configured database pool selects the Diesel adapters for every
//! repository; otherwise the in-memory adapters back the whole state. The
//! generator follows the same pattern: a configured API selects the
//! chat-completions client, otherwise recipes come from the fixture.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use backend::domain::ports::{
    FixtureLoginService, FixtureRecipeGenerator, IngredientRepository, NotificationRepository,
    RecipeGeneration, RecipeRepository, UserRepository,
};
use backend::domain::{
    IngredientCatalogueService, NotificationInboxService, RecipeCommandService,
    RecipeFeedService, RecipeGenerationService, RegisteringLoginService,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::{
    MemoryIngredientRepository, MemoryNotificationRepository, MemoryRecipeRepository,
    MemoryUserRepository,
};
use backend::outbound::openai::{ChatGeneratorConfig, ChatRecipeGenerator};
use backend::outbound::persistence::{
    DbPool, DieselIngredientRepository, DieselNotificationRepository, DieselRecipeRepository,
    DieselUserRepository,
};

use super::config::{ServerConfig, Storage};

/// One adapter per repository port.
struct Repositories<R, U, I, N> {
    recipes: Arc<R>,
    users: Arc<U>,
    ingredients: Arc<I>,
    notifications: Arc<N>,
}

type DieselRepositories = Repositories<
    DieselRecipeRepository,
    DieselUserRepository,
    DieselIngredientRepository,
    DieselNotificationRepository,
>;

type MemoryRepositories = Repositories<
    MemoryRecipeRepository,
    MemoryUserRepository,
    MemoryIngredientRepository,
    MemoryNotificationRepository,
>;

fn diesel_repositories(pool: &DbPool) -> DieselRepositories {
    Repositories {
        recipes: Arc::new(DieselRecipeRepository::new(pool.clone())),
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        ingredients: Arc::new(DieselIngredientRepository::new(pool.clone())),
        notifications: Arc::new(DieselNotificationRepository::new(pool.clone())),
    }
}

fn memory_repositories() -> MemoryRepositories {
    Repositories {
        recipes: Arc::new(MemoryRecipeRepository::new()),
        users: Arc::new(MemoryUserRepository::new()),
        ingredients: Arc::new(MemoryIngredientRepository::new()),
        notifications: Arc::new(MemoryNotificationRepository::new()),
    }
}

/// Wrap `repos` in the domain services and collect them as HTTP state.
fn assemble_state<R, U, I, N>(
    repos: Repositories<R, U, I, N>,
    generation: Arc<dyn RecipeGeneration>,
    clock: Arc<dyn Clock>,
) -> HttpState
where
    R: RecipeRepository + 'static,
    U: UserRepository + 'static,
    I: IngredientRepository + 'static,
    N: NotificationRepository + 'static,
{
    let Repositories {
        recipes,
        users,
        ingredients,
        notifications,
    } = repos;

    HttpState {
        login: Arc::new(RegisteringLoginService::new(
            Arc::new(FixtureLoginService),
            users.clone(),
        )),
        feed: Arc::new(RecipeFeedService::new(recipes.clone(), users.clone())),
        recipes: Arc::new(RecipeCommandService::new(
            recipes,
            users.clone(),
            notifications.clone(),
            clock.clone(),
        )),
        generation,
        ingredients: Arc::new(IngredientCatalogueService::new(ingredients, clock)),
        notifications: Arc::new(NotificationInboxService::new(notifications, users)),
    }
}

/// Build the generation use-case over the configured generator.
///
/// # Errors
/// Returns [`std::io::Error`] when the chat-completions client cannot be
/// constructed from `generator`.
fn build_generation(
    generator: Option<&ChatGeneratorConfig>,
) -> std::io::Result<Arc<dyn RecipeGeneration>> {
    match generator {
        Some(config) => {
            let client = ChatRecipeGenerator::new(config.clone()).map_err(|err| {
                std::io::Error::other(format!("recipe generator setup failed: {err}"))
            })?;
            info!(model = %config.model, "recipe generation uses the chat-completions API");
            Ok(Arc::new(RecipeGenerationService::new(Arc::new(client))))
        }
        None => {
            info!("recipe generation uses the offline fixture generator");
            Ok(Arc::new(RecipeGenerationService::new(Arc::new(
                FixtureRecipeGenerator,
            ))))
        }
    }
}

/// Build the shared HTTP state from `config`.
///
/// # Errors
/// Propagates generator construction failures from [`build_generation`].
pub(crate) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let generation = build_generation(config.generator.as_ref())?;
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = match &config.storage {
        Storage::Postgres(pool) => assemble_state(diesel_repositories(pool), generation, clock),
        Storage::Memory => {
            info!("no database configured; recipes are kept in memory");
            assemble_state(memory_repositories(), generation, clock)
        }
    };
    Ok(web::Data::new(state))
}
