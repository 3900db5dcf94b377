//! Ingredient catalogue handlers.
//!
//! ```text
//! GET  /api/get-ingredients
//! POST /api/add-ingredient {"ingredientName":"Sweet potato"}
//! ```

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::IngredientName;
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{ErrorSchema, IngredientEntrySchema};
use crate::inbound::http::session::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_field_error, missing_field_error};

const INGREDIENT_NAME: FieldName = FieldName::new("ingredientName");

/// Request body for `POST /api/add-ingredient`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddIngredientRequest {
    #[schema(value_type = String, example = "Sweet potato")]
    pub ingredient_name: Option<String>,
}

/// List the shared ingredient catalogue, sorted by name.
#[utoipa::path(
    get,
    path = "/api/get-ingredients",
    responses(
        (status = 200, description = "Catalogue entries", body = [IngredientEntrySchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Catalogue unavailable", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "getIngredients"
)]
pub async fn get_ingredients(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let entries = state.ingredients.list().await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(entries))
}

/// Add an ingredient to the catalogue. Names are unique ignoring case.
#[utoipa::path(
    post,
    path = "/api/add-ingredient",
    request_body = AddIngredientRequest,
    responses(
        (status = 201, description = "Entry created", body = IngredientEntrySchema),
        (status = 400, description = "Invalid name", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Already in the catalogue", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "addIngredient"
)]
pub async fn add_ingredient(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<AddIngredientRequest>,
) -> ApiResult<HttpResponse> {
    let viewer = user.id();
    let raw = payload
        .into_inner()
        .ingredient_name
        .ok_or_else(|| missing_field_error(INGREDIENT_NAME))?;
    let name = IngredientName::new(raw).map_err(|err| invalid_field_error(INGREDIENT_NAME, err))?;
    let entry = state.ingredients.add(&viewer, name).await?;
    Ok(HttpResponse::Created()
        .insert_header(private_no_cache_header())
        .json(entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockIngredientCatalogue;
    use crate::domain::test_fixtures::fixture_timestamp;
    use crate::domain::{Error, IngredientEntry};
    use crate::inbound::http::test_utils::{init_app, login_cookie};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use uuid::Uuid;

    fn entry(name: &str) -> IngredientEntry {
        IngredientEntry {
            id: Uuid::new_v4(),
            name: IngredientName::new(name).expect("name"),
            created_by: None,
            created_at: fixture_timestamp(),
        }
    }

    #[actix_web::test]
    async fn lists_catalogue_entries() {
        let mut catalogue = MockIngredientCatalogue::new();
        catalogue
            .expect_list()
            .times(1)
            .returning(|| Ok(vec![entry("Basil"), entry("Tomato")]));
        let app = init_app(HttpState::fixtures().with_ingredients(Arc::new(catalogue))).await;
        let cookie = login_cookie(&app, "ada").await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/get-ingredients")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body[0]["name"], "Basil");
        assert_eq!(body[1]["name"], "Tomato");
        assert!(body[0]["createdBy"].is_null());
    }

    #[actix_web::test]
    async fn add_creates_a_normalised_entry() {
        let mut catalogue = MockIngredientCatalogue::new();
        catalogue
            .expect_add()
            .withf(|_, name| name.as_str() == "Sweet Potato")
            .times(1)
            .returning(|viewer, name| {
                Ok(IngredientEntry {
                    created_by: Some(*viewer),
                    ..entry(name.as_str())
                })
            });
        let app = init_app(HttpState::fixtures().with_ingredients(Arc::new(catalogue))).await;
        let cookie = login_cookie(&app, "ada").await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/add-ingredient")
                .cookie(cookie)
                .set_json(json!({ "ingredientName": "  Sweet   Potato " }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["createdBy"], "123e4567-e89b-12d3-a456-426614174000");
    }

    #[rstest]
    #[case(json!({}), "missing_field")]
    #[case(json!({"ingredientName": "   "}), "invalid_value")]
    #[case(json!({"ingredientName": "42"}), "invalid_value")]
    #[actix_web::test]
    async fn add_validates_the_name(#[case] body: Value, #[case] code: &str) {
        let app = init_app(HttpState::fixtures()).await;
        let cookie = login_cookie(&app, "ada").await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/add-ingredient")
                .cookie(cookie)
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["details"]["field"], "ingredientName");
        assert_eq!(value["details"]["code"], code);
    }

    #[actix_web::test]
    async fn duplicate_names_conflict() {
        let mut catalogue = MockIngredientCatalogue::new();
        catalogue
            .expect_add()
            .returning(|_, name| Err(Error::conflict(format!("{} already exists", name.as_str()))));
        let app = init_app(HttpState::fixtures().with_ingredients(Arc::new(catalogue))).await;
        let cookie = login_cookie(&app, "ada").await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/add-ingredient")
                .cookie(cookie)
                .set_json(json!({ "ingredientName": "basil" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
