//! Test helpers for inbound HTTP components.

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};

use crate::Trace;
use crate::inbound::http::routes::{api_routes, health_routes};
use crate::inbound::http::health::HealthState;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::LoginRequest;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Initialise the full route table over `state`, wired like the server.
pub async fn init_app(
    state: HttpState,
) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    let health = HealthState::new();
    health.mark_ready();
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(web::Data::new(health))
            .wrap(Trace)
            .service(
                web::scope("/api")
                    .wrap(test_session_middleware())
                    .configure(api_routes),
            )
            .configure(health_routes),
    )
    .await
}

/// Log in as one of the fixture accounts and return the session cookie.
pub async fn login_cookie<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri("/api/login")
        .set_json(&LoginRequest {
            username: username.to_owned(),
            password: "password".to_owned(),
        })
        .to_request();
    let response = test::call_service(app, request).await;
    assert!(response.status().is_success(), "fixture login succeeds");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}
