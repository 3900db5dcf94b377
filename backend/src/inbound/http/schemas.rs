//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the serialised shape of their corresponding
//! domain types but live in the inbound adapter layer where framework
//! concerns belong.

#![expect(
    dead_code,
    reason = "Schema wrappers are only used for OpenAPI generation via utoipa"
)]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The resource does not support the request method.
    #[schema(rename = "method_not_allowed")]
    MethodNotAllowed,
    /// The request clashes with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A dependency is temporarily unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Something went wrong")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
///
/// The signed-in user's own record, including their email.
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
pub struct UserSchema {
    /// Stable user identifier.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    /// Display name shown to other users.
    #[schema(example = "Ada Lovelace")]
    name: String,
    /// Contact address.
    #[schema(example = "ada@example.com")]
    email: String,
    /// Avatar URL.
    image: Option<String>,
}

/// OpenAPI schema for [`crate::domain::PublicProfile`].
#[derive(ToSchema)]
#[schema(as = crate::domain::PublicProfile)]
pub struct PublicProfileSchema {
    /// Stable user identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    /// Display name, or "Former member" for removed users.
    #[schema(example = "Ada Lovelace")]
    name: String,
    /// Avatar URL.
    image: Option<String>,
}

/// OpenAPI schema for [`crate::domain::OwnerView`].
#[derive(ToSchema)]
#[schema(as = crate::domain::OwnerView)]
pub struct OwnerViewSchema {
    /// Stable user identifier.
    id: String,
    /// Display name.
    name: String,
    /// Avatar URL.
    image: Option<String>,
    /// Present only when the viewer owns the recipe.
    email: Option<String>,
}

/// OpenAPI schema for [`crate::domain::DietaryPreference`].
#[derive(ToSchema)]
#[schema(as = crate::domain::DietaryPreference)]
pub enum DietaryPreferenceSchema {
    #[schema(rename = "Vegetarian")]
    Vegetarian,
    #[schema(rename = "Vegan")]
    Vegan,
    #[schema(rename = "Gluten-Free")]
    GlutenFree,
    #[schema(rename = "Dairy-Free")]
    DairyFree,
    #[schema(rename = "Keto")]
    Keto,
    #[schema(rename = "Paleo")]
    Paleo,
    #[schema(rename = "Low-Carb")]
    LowCarb,
}

/// OpenAPI schema for [`crate::domain::RecipeIngredient`].
#[derive(ToSchema)]
#[schema(as = crate::domain::RecipeIngredient)]
pub struct RecipeIngredientSchema {
    /// Ingredient name.
    #[schema(example = "tomato")]
    name: String,
    /// Free-form amount.
    #[schema(example = "2 cups")]
    quantity: Option<String>,
}

/// OpenAPI schema for [`crate::domain::AdditionalInformation`].
#[derive(ToSchema)]
#[schema(as = crate::domain::AdditionalInformation)]
#[schema(rename_all = "camelCase")]
pub struct AdditionalInformationSchema {
    tips: String,
    variations: String,
    serving_suggestions: String,
    nutritional_information: String,
}

/// OpenAPI schema for [`crate::domain::RecipeDraft`], the shape of
/// generated recipes and of recipes submitted for saving.
#[derive(ToSchema)]
#[schema(as = crate::domain::RecipeDraft)]
#[schema(rename_all = "camelCase")]
pub struct RecipeDraftSchema {
    #[schema(example = "Tomato Skillet")]
    name: String,
    ingredients: Vec<RecipeIngredientSchema>,
    instructions: Vec<String>,
    dietary_preference: Vec<DietaryPreferenceSchema>,
    additional_information: AdditionalInformationSchema,
    image_url: Option<String>,
}

/// OpenAPI schema for [`crate::domain::CommentView`].
#[derive(ToSchema)]
#[schema(as = crate::domain::CommentView)]
#[schema(rename_all = "camelCase")]
pub struct CommentViewSchema {
    id: String,
    user: PublicProfileSchema,
    comment: String,
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::RecipeView`].
///
/// A recipe as rendered for the signed-in viewer.
#[derive(ToSchema)]
#[schema(as = crate::domain::RecipeView)]
#[schema(rename_all = "camelCase")]
pub struct RecipeViewSchema {
    id: String,
    owner: OwnerViewSchema,
    name: String,
    ingredients: Vec<RecipeIngredientSchema>,
    instructions: Vec<String>,
    dietary_preference: Vec<DietaryPreferenceSchema>,
    additional_information: AdditionalInformationSchema,
    image_url: Option<String>,
    tags: Vec<String>,
    liked_by: Vec<PublicProfileSchema>,
    comments: Vec<CommentViewSchema>,
    created_at: String,
    updated_at: String,
    /// Whether the viewer likes the recipe.
    liked: bool,
    /// Whether the viewer owns the recipe.
    owns: bool,
}

/// OpenAPI schema for [`crate::domain::TagCount`].
#[derive(ToSchema)]
#[schema(as = crate::domain::TagCount)]
pub struct TagCountSchema {
    #[schema(example = "tomato")]
    tag: String,
    #[schema(example = 12)]
    count: u64,
}

/// OpenAPI schema for [`crate::domain::IngredientEntry`].
#[derive(ToSchema)]
#[schema(as = crate::domain::IngredientEntry)]
#[schema(rename_all = "camelCase")]
pub struct IngredientEntrySchema {
    id: String,
    #[schema(example = "saffron")]
    name: String,
    created_by: Option<String>,
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::NotificationKind`].
#[derive(ToSchema)]
#[schema(as = crate::domain::NotificationKind)]
pub enum NotificationKindSchema {
    #[schema(rename = "like")]
    Like,
    #[schema(rename = "comment")]
    Comment,
    #[schema(rename = "update")]
    Update,
}

/// OpenAPI schema for [`crate::domain::NotificationView`].
#[derive(ToSchema)]
#[schema(as = crate::domain::NotificationView)]
#[schema(rename_all = "camelCase")]
pub struct NotificationViewSchema {
    id: String,
    initiator: PublicProfileSchema,
    #[schema(rename = "type")]
    kind: NotificationKindSchema,
    recipe_id: String,
    message: String,
    read: bool,
    created_at: String,
}
