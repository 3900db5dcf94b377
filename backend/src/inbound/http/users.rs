//! Session and account handlers.
//!
//! ```text
//! POST /api/login {"username":"ada","password":"password"}
//! POST /api/logout
//! GET  /api/me
//! ```

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::session::{AuthenticatedUser, SessionContext};
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/login`.
///
/// Example JSON:
/// `{"username":"ada","password":"password"}`
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": err.field(), "code": err.code() }))
}

/// Authenticate a user and establish a session.
///
/// Responds with the signed-in user's own record.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = UserSchema,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user = state.login.authenticate(&credentials).await?;
    session.sign_in(&user.id)?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(user))
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout"
)]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.sign_out();
    HttpResponse::NoContent().finish()
}

/// Return the signed-in user's own record.
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Current user", body = UserSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "User record missing", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
pub async fn current_user(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let user = state.feed.current_user(&user.id()).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{LoginService, MockRecipeFeedQuery};
    use crate::domain::{DisplayName, EmailAddress, User};
    use crate::inbound::http::test_utils::{init_app, login_cookie};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::Value;
    use std::sync::Arc;

    async fn post_login(username: &str, password: &str) -> actix_web::dev::ServiceResponse {
        let app = init_app(HttpState::fixtures()).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/login")
            .set_json(&LoginRequest {
                username: username.into(),
                password: password.into(),
            })
            .to_request();
        actix_test::call_service(&app, request).await
    }

    #[rstest]
    #[case::blank_username("   ", "password", "username", "empty_username")]
    #[case::empty_password("ada", "", "password", "empty_password")]
    #[actix_web::test]
    async fn blank_credentials_name_the_field(
        #[case] username: &str,
        #[case] password: &str,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let response = post_login(username, password).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["code"], "invalid_request");
        assert_eq!(value["message"], format!("{field} must not be empty"));
        assert_eq!(value["details"], serde_json::json!({ "field": field, "code": code }));
    }

    #[actix_web::test]
    async fn wrong_password_is_unauthorised() {
        let response = post_login("ada", "wrong-password").await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["code"], "unauthorized");
    }

    #[actix_web::test]
    async fn login_returns_the_user_privately() {
        let response = post_login("ada", "password").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.response().cookies().any(|c| c.name() == "session"));
        assert_eq!(
            response
                .headers()
                .get("Cache-Control")
                .and_then(|v| v.to_str().ok()),
            Some("private, no-cache, must-revalidate")
        );
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["name"], "Ada Lovelace");
        assert_eq!(value["email"], "ada@example.com");
    }

    #[actix_web::test]
    async fn me_requires_a_session() {
        let app = init_app(HttpState::fixtures()).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/me").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn me_returns_the_session_user() {
        let mut feed = MockRecipeFeedQuery::new();
        feed.expect_current_user().times(1).returning(|id| {
            Ok(User {
                id: *id,
                name: DisplayName::new("Ada Lovelace").expect("name"),
                email: EmailAddress::new("ada@example.com").expect("email"),
                image: None,
            })
        });
        let app = init_app(HttpState::fixtures().with_feed(Arc::new(feed))).await;
        let cookie = login_cookie(&app, "ada").await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/me")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["id"], "123e4567-e89b-12d3-a456-426614174000");
    }

    #[actix_web::test]
    async fn logout_clears_the_session() {
        let app = init_app(HttpState::fixtures()).await;
        let cookie = login_cookie(&app, "ada").await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let cleared = response
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("removal cookie");
        assert_eq!(cleared.value(), "");
    }

    #[actix_web::test]
    async fn login_uses_the_configured_port() {
        struct Rejecting;

        #[async_trait::async_trait]
        impl LoginService for Rejecting {
            async fn authenticate(&self, _: &LoginCredentials) -> Result<User, Error> {
                Err(Error::service_unavailable("identity provider down"))
            }
        }

        let app = init_app(HttpState::fixtures().with_login(Arc::new(Rejecting))).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/login")
            .set_json(&LoginRequest {
                username: "ada".into(),
                password: "password".into(),
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
