//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, plus the services implementing the driving ports.
//! Keep types immutable and document invariants and serialisation contracts
//! (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Recipe, RecipeDraft, RecipeView: saved recipes and their per-viewer
//!   rendering.
//! - FeedQuery: filter, order, and page of the shared feed.
//! - Notification: per-user activity records.
//! - `*Service`: driving port implementations over the driven ports.

pub mod auth;
pub mod error;
pub mod feed;
pub mod generation;
pub mod ingredient;
pub mod notification;
pub mod ports;
pub mod recipe;
pub mod trace_id;
pub mod user;
pub mod visibility;

mod ingredient_catalogue_service;
mod login_registration;
mod notification_inbox_service;
mod port_errors;
mod recipe_command_service;
mod recipe_feed_service;
mod recipe_generation_service;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::feed::{
    FeedCursorKey, FeedQuery, FeedValidationError, POPULAR_TAG_LIMIT, SEARCH_TERM_MAX,
    SearchTerm, SortOption, TagCount, count_tags, select_page,
};
pub use self::generation::{
    GeneratedRecipe, GenerationPrompt, GenerationRequest, GenerationValidationError,
    MAX_GENERATION_INGREDIENTS, RECIPES_PER_GENERATION, build_generation_prompt,
};
pub use self::ingredient::{
    INGREDIENT_NAME_MAX, IngredientEntry, IngredientName, IngredientValidationError,
    RecipeIngredient,
};
pub use self::ingredient_catalogue_service::IngredientCatalogueService;
pub use self::login_registration::RegisteringLoginService;
pub use self::notification::{
    INBOX_DEFAULT_LIMIT, INBOX_MAX_LIMIT, InboxLimit, Notification, NotificationFeed,
    NotificationKind, NotificationView,
};
pub use self::notification_inbox_service::NotificationInboxService;
pub use self::recipe::{
    AdditionalInformation, COMMENT_MAX, Comment, CommentText, DietaryPreference, LikeOutcome,
    MAX_TAGS, RECIPE_NAME_MAX, Recipe, RecipeDraft, RecipeEdit, RecipeId, RecipeName,
    RecipeValidationError, derive_tags,
};
pub use self::recipe_command_service::RecipeCommandService;
pub use self::recipe_feed_service::RecipeFeedService;
pub use self::recipe_generation_service::RecipeGenerationService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    DISPLAY_NAME_MAX, DisplayName, EmailAddress, FORMER_MEMBER_NAME, PublicProfile, User,
    UserId, UserValidationError,
};
pub use self::visibility::{
    CommentView, OwnerView, RecipeView, index_profiles, referenced_users, visible_recipe,
    visible_recipes,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
