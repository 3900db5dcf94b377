//! Recipe feed, profile, and recipe mutation handlers.
//!
//! ```text
//! GET    /api/get-recipes?page=1&limit=12&sortOption=popular&query=basil
//! GET    /api/get-single-recipe?recipeId=<uuid>
//! GET    /api/profile
//! POST   /api/save-recipes {"recipes":[...]}
//! PUT    /api/like-recipe {"recipeId":"<uuid>"}
//! POST   /api/add-comment {"recipeId":"<uuid>","comment":"Lovely"}
//! PUT    /api/update-recipe {"recipeId":"<uuid>","name":"New title"}
//! DELETE /api/delete-recipe?recipeId=<uuid>
//! ```

use actix_web::{HttpResponse, web};
use pagination::{Cursor, DEFAULT_LIMIT, PageRequest, PageRequestError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    AdditionalInformation, CommentText, Error, FeedCursorKey, FeedQuery, RecipeDraft, RecipeEdit,
    RecipeId, RecipeName, RecipeView, SearchTerm, SortOption, TagCount, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{
    AdditionalInformationSchema, ErrorSchema, RecipeDraftSchema, RecipeViewSchema, TagCountSchema,
    UserSchema,
};
use crate::inbound::http::session::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_field_error, missing_field_error, parse_uuid,
};

const PAGE: FieldName = FieldName::new("page");
const LIMIT: FieldName = FieldName::new("limit");
const SORT_OPTION: FieldName = FieldName::new("sortOption");
const QUERY: FieldName = FieldName::new("query");
const CURSOR: FieldName = FieldName::new("cursor");
const RECIPE_ID: FieldName = FieldName::new("recipeId");
const COMMENT: FieldName = FieldName::new("comment");
const NAME: FieldName = FieldName::new("name");
const RECIPES: FieldName = FieldName::new("recipes");

/// Query parameters for `GET /api/get-recipes`.
///
/// A `cursor` from a previous response replaces every other parameter.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FeedParams {
    /// One-based page number. Defaults to 1.
    pub page: Option<u32>,
    /// Page size. Defaults to 12, at most 100.
    pub limit: Option<u32>,
    /// `popular` (default) or `recent`.
    pub sort_option: Option<String>,
    /// Case-insensitive search text.
    pub query: Option<String>,
    /// Opaque continuation token.
    pub cursor: Option<String>,
}

/// Query parameter naming one recipe.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RecipeIdParams {
    /// Recipe identifier.
    pub recipe_id: Option<String>,
}

/// One page of the shared feed.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    #[schema(value_type = Vec<RecipeViewSchema>)]
    pub recipes: Vec<RecipeView>,
    pub total_recipes: u64,
    pub total_pages: u32,
    pub current_page: u32,
    #[schema(value_type = Vec<TagCountSchema>)]
    pub popular_tags: Vec<TagCount>,
    /// Present while a later page exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// The viewer's profile overview.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[schema(value_type = UserSchema)]
    pub user: User,
    #[schema(value_type = Vec<RecipeViewSchema>)]
    pub created_recipes: Vec<RecipeView>,
    #[schema(value_type = Vec<RecipeViewSchema>)]
    pub liked_recipes: Vec<RecipeView>,
}

/// Request body for `POST /api/save-recipes`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecipesRequest {
    #[schema(value_type = Vec<RecipeDraftSchema>)]
    pub recipes: Option<Vec<RecipeDraft>>,
}

/// Identifiers assigned to newly saved recipes.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecipesResponse {
    #[schema(value_type = Vec<uuid::Uuid>)]
    pub recipe_ids: Vec<RecipeId>,
}

/// Request body naming one recipe.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIdRequest {
    #[schema(value_type = String, format = Uuid)]
    pub recipe_id: Option<String>,
}

/// Request body for `POST /api/add-comment`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    #[schema(value_type = String, format = Uuid)]
    pub recipe_id: Option<String>,
    #[schema(value_type = String, example = "Made this twice already")]
    pub comment: Option<String>,
}

/// Request body for `PUT /api/update-recipe`. Absent fields are unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecipeRequest {
    #[schema(value_type = String, format = Uuid)]
    pub recipe_id: Option<String>,
    pub name: Option<String>,
    pub instructions: Option<Vec<String>>,
    #[schema(value_type = Option<AdditionalInformationSchema>)]
    pub additional_information: Option<AdditionalInformation>,
}

fn page_request(page: u32, limit: u32) -> Result<PageRequest, Error> {
    PageRequest::new(page, limit).map_err(|err| match err {
        PageRequestError::ZeroPage => invalid_field_error(PAGE, err),
        PageRequestError::ZeroLimit | PageRequestError::LimitTooLarge { .. } => {
            invalid_field_error(LIMIT, err)
        }
    })
}

fn feed_query(
    page: u32,
    limit: u32,
    sort: SortOption,
    search: Option<&str>,
) -> Result<FeedQuery, Error> {
    Ok(FeedQuery {
        page: page_request(page, limit)?,
        sort,
        search: SearchTerm::parse(search.unwrap_or_default())
            .map_err(|err| invalid_field_error(QUERY, err))?,
    })
}

/// Resolve feed parameters, letting a cursor override the explicit values.
pub(crate) fn parse_feed_params(params: FeedParams) -> Result<FeedQuery, Error> {
    if let Some(token) = params.cursor.as_deref().filter(|t| !t.trim().is_empty()) {
        let key = Cursor::<FeedCursorKey>::decode(token)
            .map_err(|err| invalid_field_error(CURSOR, err))?
            .into_key();
        return feed_query(key.page, key.limit, key.sort, key.query.as_deref());
    }
    let sort = params
        .sort_option
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map(str::parse::<SortOption>)
        .transpose()
        .map_err(|err| invalid_field_error(SORT_OPTION, err))?
        .unwrap_or_default();
    feed_query(
        params.page.unwrap_or(1),
        params.limit.unwrap_or(DEFAULT_LIMIT),
        sort,
        params.query.as_deref(),
    )
}

fn parse_recipe_id(raw: Option<String>) -> Result<RecipeId, Error> {
    parse_uuid(raw, RECIPE_ID).map(RecipeId::from)
}

fn parse_edit(request: UpdateRecipeRequest) -> Result<RecipeEdit, Error> {
    Ok(RecipeEdit {
        name: request
            .name
            .map(RecipeName::new)
            .transpose()
            .map_err(|err| invalid_field_error(NAME, err))?,
        instructions: request.instructions,
        additional_information: request.additional_information,
    })
}

/// List the shared feed for the signed-in viewer.
#[utoipa::path(
    get,
    path = "/api/get-recipes",
    params(FeedParams),
    responses(
        (status = 200, description = "Feed page", body = FeedResponse),
        (status = 400, description = "Invalid parameters", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Recipe store unavailable", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "getRecipes"
)]
pub async fn get_recipes(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    params: web::Query<FeedParams>,
) -> ApiResult<HttpResponse> {
    let viewer = user.id();
    let query = parse_feed_params(params.into_inner())?;
    let next_key = FeedCursorKey::following(&query);
    let feed = state.feed.feed(&viewer, query).await?;
    let next_cursor = if feed.recipes.has_next() {
        let token = Cursor::new(next_key)
            .encode()
            .map_err(|err| Error::internal(format!("failed to encode feed cursor: {err}")))?;
        Some(token)
    } else {
        None
    };
    let body = FeedResponse {
        total_recipes: feed.recipes.total_items,
        total_pages: feed.recipes.total_pages,
        current_page: feed.recipes.current_page,
        recipes: feed.recipes.items,
        popular_tags: feed.popular_tags,
        next_cursor,
    };
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(body))
}

/// Fetch one recipe.
#[utoipa::path(
    get,
    path = "/api/get-single-recipe",
    params(RecipeIdParams),
    responses(
        (status = 200, description = "Recipe", body = RecipeViewSchema),
        (status = 400, description = "Invalid recipe id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No such recipe", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "getSingleRecipe"
)]
pub async fn get_single_recipe(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    params: web::Query<RecipeIdParams>,
) -> ApiResult<HttpResponse> {
    let viewer = user.id();
    let id = parse_recipe_id(params.into_inner().recipe_id)?;
    let recipe = state.feed.recipe(&viewer, &id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(recipe))
}

/// The viewer's own and liked recipes.
#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Profile overview", body = ProfileResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "User record missing", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "getProfile"
)]
pub async fn profile(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let viewer = user.id();
    let overview = state.feed.profile(&viewer).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(ProfileResponse {
            user: overview.user,
            created_recipes: overview.created,
            liked_recipes: overview.liked,
        }))
}

/// Save generated or hand-written drafts as recipes owned by the viewer.
#[utoipa::path(
    post,
    path = "/api/save-recipes",
    request_body = SaveRecipesRequest,
    responses(
        (status = 201, description = "Recipes saved", body = SaveRecipesResponse),
        (status = 400, description = "Invalid drafts", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "saveRecipes"
)]
pub async fn save_recipes(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<SaveRecipesRequest>,
) -> ApiResult<HttpResponse> {
    let viewer = user.id();
    let drafts = payload
        .into_inner()
        .recipes
        .ok_or_else(|| missing_field_error(RECIPES))?;
    let recipe_ids = state.recipes.save(&viewer, drafts).await?;
    Ok(HttpResponse::Created()
        .insert_header(private_no_cache_header())
        .json(SaveRecipesResponse { recipe_ids }))
}

/// Toggle the viewer's like on a recipe.
#[utoipa::path(
    put,
    path = "/api/like-recipe",
    request_body = RecipeIdRequest,
    responses(
        (status = 200, description = "Updated recipe", body = RecipeViewSchema),
        (status = 400, description = "Invalid recipe id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No such recipe", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "likeRecipe"
)]
pub async fn like_recipe(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<RecipeIdRequest>,
) -> ApiResult<HttpResponse> {
    let viewer = user.id();
    let id = parse_recipe_id(payload.into_inner().recipe_id)?;
    let recipe = state.recipes.toggle_like(&viewer, &id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(recipe))
}

/// Comment on a recipe.
#[utoipa::path(
    post,
    path = "/api/add-comment",
    request_body = CommentRequest,
    responses(
        (status = 200, description = "Updated recipe", body = RecipeViewSchema),
        (status = 400, description = "Invalid comment", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No such recipe", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "addComment"
)]
pub async fn add_comment(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CommentRequest>,
) -> ApiResult<HttpResponse> {
    let viewer = user.id();
    let CommentRequest { recipe_id, comment } = payload.into_inner();
    let id = parse_recipe_id(recipe_id)?;
    let text = comment.ok_or_else(|| missing_field_error(COMMENT))?;
    let text = CommentText::new(text).map_err(|err| invalid_field_error(COMMENT, err))?;
    let recipe = state.recipes.add_comment(&viewer, &id, text).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(recipe))
}

/// Edit a recipe the viewer owns.
#[utoipa::path(
    put,
    path = "/api/update-recipe",
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Updated recipe", body = RecipeViewSchema),
        (status = 400, description = "Invalid edit", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "No such recipe", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "updateRecipe"
)]
pub async fn update_recipe(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<UpdateRecipeRequest>,
) -> ApiResult<HttpResponse> {
    let viewer = user.id();
    let mut request = payload.into_inner();
    let id = parse_recipe_id(request.recipe_id.take())?;
    let edit = parse_edit(request)?;
    let recipe = state.recipes.update(&viewer, &id, edit).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(recipe))
}

/// Delete a recipe the viewer owns.
#[utoipa::path(
    delete,
    path = "/api/delete-recipe",
    params(RecipeIdParams),
    responses(
        (status = 200, description = "Recipe deleted"),
        (status = 400, description = "Invalid recipe id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "No such recipe", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe"
)]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    params: web::Query<RecipeIdParams>,
) -> ApiResult<HttpResponse> {
    let viewer = user.id();
    let id = parse_recipe_id(params.into_inner().recipe_id)?;
    state.recipes.delete(&viewer, &id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(json!({ "message": "Recipe deleted" })))
}

#[cfg(test)]
#[path = "recipes_tests.rs"]
mod tests;
