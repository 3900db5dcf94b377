//! Recipe generation handler.
//!
//! ```text
//! POST /api/generate-recipes
//! {"ingredients":["tomato",{"name":"basil","quantity":"1 bunch"}],"dietaryPreferences":["Vegan"]}
//! ```
//!
//! Generated recipes are drafts; clients save the ones they keep through
//! `POST /api/save-recipes`.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    DietaryPreference, Error, GeneratedRecipe, GenerationRequest, IngredientName, RecipeIngredient,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{ErrorSchema, RecipeDraftSchema};
use crate::inbound::http::session::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_element_error, invalid_field_error, missing_field_error,
};

const INGREDIENTS: FieldName = FieldName::new("ingredients");
const DIETARY_PREFERENCES: FieldName = FieldName::new("dietaryPreferences");

/// An ingredient given either as a bare name or as a name with a quantity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum IngredientInput {
    Name(String),
    Line {
        name: String,
        #[serde(default)]
        quantity: Option<String>,
    },
}

impl IngredientInput {
    fn into_parts(self) -> (String, Option<String>) {
        match self {
            Self::Name(name) => (name, None),
            Self::Line { name, quantity } => (name, quantity),
        }
    }
}

/// Request body for `POST /api/generate-recipes`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRecipesRequest {
    /// Ingredient names or `{name, quantity}` objects.
    #[schema(value_type = Vec<serde_json::Value>)]
    pub ingredients: Option<Vec<IngredientInput>>,
    /// Dietary preference labels such as `"Gluten-Free"`.
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
}

/// Generated drafts.
#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateRecipesResponse {
    #[schema(value_type = Vec<RecipeDraftSchema>)]
    pub recipes: Vec<GeneratedRecipe>,
}

impl TryFrom<GenerateRecipesRequest> for GenerationRequest {
    type Error = Error;

    fn try_from(value: GenerateRecipesRequest) -> Result<Self, Self::Error> {
        let inputs = value
            .ingredients
            .ok_or_else(|| missing_field_error(INGREDIENTS))?;
        let ingredients = inputs
            .into_iter()
            .enumerate()
            .map(|(index, input)| {
                let (name, quantity) = input.into_parts();
                let name = IngredientName::new(name)
                    .map_err(|err| invalid_element_error(INGREDIENTS, index, err))?;
                let quantity = quantity
                    .map(|q| q.trim().to_owned())
                    .filter(|q| !q.is_empty());
                Ok(RecipeIngredient { name, quantity })
            })
            .collect::<Result<Vec<_>, Error>>()?;
        let preferences = value
            .dietary_preferences
            .iter()
            .enumerate()
            .map(|(index, label)| {
                label
                    .parse::<DietaryPreference>()
                    .map_err(|err| invalid_element_error(DIETARY_PREFERENCES, index, err))
            })
            .collect::<Result<Vec<_>, Error>>()?;
        GenerationRequest::new(ingredients, preferences)
            .map_err(|err| invalid_field_error(INGREDIENTS, err))
    }
}

/// Generate recipe drafts from ingredients and dietary preferences.
#[utoipa::path(
    post,
    path = "/api/generate-recipes",
    request_body = GenerateRecipesRequest,
    responses(
        (status = 200, description = "Generated drafts", body = GenerateRecipesResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Generator unavailable", body = ErrorSchema)
    ),
    tags = ["generation"],
    operation_id = "generateRecipes"
)]
pub async fn generate_recipes(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<GenerateRecipesRequest>,
) -> ApiResult<HttpResponse> {
    let viewer = user.id();
    let request = GenerationRequest::try_from(payload.into_inner())?;
    let recipes = state.generation.generate(&viewer, request).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(GenerateRecipesResponse { recipes }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MAX_GENERATION_INGREDIENTS;
    use crate::domain::ports::MockRecipeGeneration;
    use crate::domain::test_fixtures::make_draft;
    use crate::inbound::http::test_utils::{init_app, login_cookie};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn request(body: Value) -> Result<GenerationRequest, Error> {
        let parsed: GenerateRecipesRequest = serde_json::from_value(body).expect("request shape");
        GenerationRequest::try_from(parsed)
    }

    #[rstest]
    fn accepts_bare_names_and_quantified_lines() {
        let parsed = request(json!({
            "ingredients": ["  tomato ", {"name": "basil", "quantity": " 1 bunch "}],
            "dietaryPreferences": ["vegan", "Vegan", "gluten-free"]
        }))
        .expect("valid request");
        let names: Vec<&str> = parsed.ingredients().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["tomato", "basil"]);
        assert_eq!(parsed.ingredients()[1].quantity.as_deref(), Some("1 bunch"));
        assert_eq!(
            parsed.dietary_preferences(),
            &[DietaryPreference::Vegan, DietaryPreference::GlutenFree]
        );
    }

    #[rstest]
    #[case(json!({}), "ingredients", None)]
    #[case(json!({"ingredients": []}), "ingredients", None)]
    #[case(json!({"ingredients": ["ok", "123"]}), "ingredients", Some(1))]
    #[case(
        json!({"ingredients": ["ok"], "dietaryPreferences": ["Carnivore"]}),
        "dietaryPreferences",
        Some(0)
    )]
    fn rejects_invalid_requests(
        #[case] body: Value,
        #[case] field: &str,
        #[case] index: Option<usize>,
    ) {
        let err = request(body).expect_err("invalid request");
        let details = err.details().expect("details");
        assert_eq!(details["field"], field);
        assert_eq!(details.get("index").and_then(Value::as_u64), index.map(|i| i as u64));
    }

    #[rstest]
    fn rejects_too_many_ingredients() {
        let names: Vec<String> = (0..=MAX_GENERATION_INGREDIENTS)
            .map(|i| format!("item {i} x"))
            .collect();
        let err = request(json!({ "ingredients": names })).expect_err("too many");
        assert!(err.message().contains("at most"));
    }

    #[actix_web::test]
    async fn returns_generated_drafts() {
        let mut generation = MockRecipeGeneration::new();
        generation
            .expect_generate()
            .withf(|_, request| request.ingredients().len() == 1)
            .times(1)
            .returning(|_, _| Ok(vec![make_draft("Tomato toast"), make_draft("Tomato soup")]));
        let app = init_app(HttpState::fixtures().with_generation(Arc::new(generation))).await;
        let cookie = login_cookie(&app, "ada").await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/generate-recipes")
                .cookie(cookie)
                .set_json(json!({ "ingredients": ["tomato"] }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["recipes"][0]["name"], "Tomato toast");
        assert_eq!(body["recipes"].as_array().map(Vec::len), Some(2));
    }

    #[actix_web::test]
    async fn unconfigured_generator_is_unavailable() {
        let app = init_app(HttpState::fixtures()).await;
        let cookie = login_cookie(&app, "ada").await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/generate-recipes")
                .cookie(cookie)
                .set_json(json!({ "ingredients": ["tomato"] }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn requires_a_session() {
        let app = init_app(HttpState::fixtures()).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/generate-recipes")
                .set_json(json!({ "ingredients": ["tomato"] }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
