//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every handler of the inbound HTTP adapter
//! - **Schemas**: domain type wrappers from
//!   [`crate::inbound::http::schemas`] plus the request and response DTOs
//! - **Security**: session cookie authentication scheme
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::generation::{GenerateRecipesRequest, GenerateRecipesResponse};
use crate::inbound::http::ingredients::AddIngredientRequest;
use crate::inbound::http::notifications::{
    InboxResponse, ReadAllResponse, ReadNotificationRequest,
};
use crate::inbound::http::recipes::{
    CommentRequest, FeedResponse, ProfileResponse, RecipeIdRequest, SaveRecipesRequest,
    SaveRecipesResponse, UpdateRecipeRequest,
};
use crate::inbound::http::schemas::{
    AdditionalInformationSchema, CommentViewSchema, DietaryPreferenceSchema, ErrorCodeSchema,
    ErrorSchema, IngredientEntrySchema, NotificationKindSchema, NotificationViewSchema,
    OwnerViewSchema, PublicProfileSchema, RecipeDraftSchema, RecipeIngredientSchema,
    RecipeViewSchema, TagCountSchema, UserSchema,
};
use crate::inbound::http::users::LoginRequest;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Recipe backend API",
        description = "Recipe generation, the shared recipe feed, and per-user notifications."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::recipes::get_recipes,
        crate::inbound::http::recipes::get_single_recipe,
        crate::inbound::http::recipes::profile,
        crate::inbound::http::recipes::save_recipes,
        crate::inbound::http::recipes::like_recipe,
        crate::inbound::http::recipes::add_comment,
        crate::inbound::http::recipes::update_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::generation::generate_recipes,
        crate::inbound::http::ingredients::get_ingredients,
        crate::inbound::http::ingredients::add_ingredient,
        crate::inbound::http::notifications::get_notifications,
        crate::inbound::http::notifications::read_notification,
        crate::inbound::http::notifications::read_all_notifications,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        PublicProfileSchema,
        OwnerViewSchema,
        DietaryPreferenceSchema,
        RecipeIngredientSchema,
        AdditionalInformationSchema,
        RecipeDraftSchema,
        CommentViewSchema,
        RecipeViewSchema,
        TagCountSchema,
        IngredientEntrySchema,
        NotificationKindSchema,
        NotificationViewSchema,
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        FeedResponse,
        ProfileResponse,
        SaveRecipesRequest,
        SaveRecipesResponse,
        RecipeIdRequest,
        CommentRequest,
        UpdateRecipeRequest,
        GenerateRecipesRequest,
        GenerateRecipesResponse,
        AddIngredientRequest,
        InboxResponse,
        ReadNotificationRequest,
        ReadAllResponse,
    )),
    tags(
        (name = "users", description = "Sign-in and the current session"),
        (name = "recipes", description = "The shared recipe feed and recipe interactions"),
        (name = "generation", description = "AI-assisted recipe generation"),
        (name = "ingredients", description = "Ingredient catalogue"),
        (name = "notifications", description = "Per-user activity inbox"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
