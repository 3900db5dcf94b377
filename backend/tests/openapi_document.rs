//! Checks on the generated OpenAPI document served by Swagger UI and
//! exported by `openapi-dump`.

use backend::ApiDoc;
use rstest::rstest;
use utoipa::OpenApi;

#[rstest]
#[case("crate.domain.RecipeView")]
#[case("crate.domain.NotificationView")]
#[case("crate.domain.IngredientEntry")]
#[case("crate.domain.Error")]
fn domain_schemas_are_registered(#[case] name: &str) {
    let doc = ApiDoc::openapi();
    let components = doc.components.expect("components");
    assert!(components.schemas.contains_key(name), "missing {name}");
}

#[rstest]
#[case("/api/login", "login")]
#[case("/api/save-recipes", "saveRecipes")]
#[case("/api/delete-recipe", "deleteRecipe")]
#[case("/api/get-notifications", "getNotifications")]
#[case("/api/read-all-notifications", "readAllNotifications")]
fn operations_carry_stable_ids(#[case] path: &str, #[case] operation_id: &str) {
    let json = ApiDoc::openapi().to_json().expect("document serialises");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    let item = value["paths"][path].as_object().expect("path item");
    assert!(
        item.values()
            .any(|operation| operation["operationId"] == operation_id),
        "{path} should expose {operation_id}"
    );
}

#[test]
fn session_cookie_scheme_is_documented() {
    let doc = ApiDoc::openapi();
    let components = doc.components.expect("components");
    assert!(components.security_schemes.contains_key("SessionCookie"));
}
