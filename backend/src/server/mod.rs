//! Builds the actix application and binds the HTTP server.
//!
//! Layout: `/api/*` behind the session cookie, `/health/*` open, and in debug
//! builds Swagger UI at `/docs`. [`Trace`] wraps everything so every
//! response, errors included, carries a `trace-id`.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod settings;
mod state_builders;

pub use config::ServerConfig;
#[cfg(feature = "metrics")]
pub use metrics::build_prometheus;
pub use settings::AppSettings;

use actix_session::storage::CookieSessionStore;
use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
};
use actix_web::cookie::time::Duration;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::health::HealthState;
use backend::inbound::http::routes::{api_routes, health_routes};
use backend::inbound::http::session_config::SessionSettings;
use backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(feature = "metrics")]
use metrics::MetricsLayer;
use state_builders::build_http_state;

const SESSION_COOKIE: &str = "session";
const SESSION_TTL: Duration = Duration::hours(2);

/// Encrypted cookie session lasting [`SESSION_TTL`] from the last change.
fn cookie_sessions(session: &SessionSettings) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), session.key.clone())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_path("/".to_owned())
        .cookie_http_only(true)
        .cookie_secure(session.cookie_secure)
        .cookie_same_site(session.same_site)
        .cookie_content_security(CookieContentSecurity::Private)
        .session_lifecycle(PersistentSession::default().session_ttl(SESSION_TTL))
        .build()
}

/// One worker's application; called once per worker thread.
fn recipe_app(
    health: web::Data<HealthState>,
    state: web::Data<HttpState>,
    session: &SessionSettings,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let app = App::new()
        .app_data(health)
        .app_data(state)
        .wrap(Trace)
        .service(
            web::scope("/api")
                .wrap(cookie_sessions(session))
                .configure(api_routes),
        )
        .configure(health_routes);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the listener and mark `health` ready.
///
/// The returned [`Server`] does nothing until awaited.
///
/// # Errors
///
/// Fails when the generator client cannot be built or the address cannot be
/// bound.
pub fn create_server(
    health: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let state = build_http_state(&config)?;
    #[cfg(feature = "metrics")]
    let metrics = MetricsLayer::from_option(config.prometheus.clone());
    let session = config.session;
    let worker_health = health.clone();

    let server = HttpServer::new(move || {
        let app = recipe_app(worker_health.clone(), state.clone(), &session);
        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics.clone());
        app
    })
    .bind(config.bind_addr)?
    .run();

    health.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::{Key, SameSite};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::json;

    fn lax_session() -> SessionSettings {
        SessionSettings {
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        }
    }

    #[actix_web::test]
    async fn login_cookie_is_private_and_expires() {
        let app = test::init_service(recipe_app(
            web::Data::new(HealthState::new()),
            web::Data::new(HttpState::fixtures()),
            &lax_session(),
        ))
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/login")
                .set_json(json!({ "username": "ada", "password": "password" }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let cookie = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE)
            .expect("session cookie");
        assert_eq!(
            (cookie.http_only(), cookie.path(), cookie.max_age()),
            (Some(true), Some("/"), Some(SESSION_TTL))
        );
    }

    #[actix_web::test]
    async fn health_routes_sit_outside_the_session_scope() {
        let health = web::Data::new(HealthState::new());
        let app = test::init_service(recipe_app(
            health.clone(),
            web::Data::new(HttpState::fixtures()),
            &lax_session(),
        ))
        .await;
        let ready = || test::TestRequest::get().uri("/health/ready").to_request();

        let before = test::call_service(&app, ready()).await;
        health.mark_ready();
        let after = test::call_service(&app, ready()).await;

        assert_eq!(before.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(after.status(), StatusCode::OK);
        assert!(after.response().cookies().next().is_none());
    }
}
