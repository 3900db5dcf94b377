//! Route table for the HTTP adapter.
//!
//! Every path is registered as a resource so that a known path called with
//! the wrong verb answers `405 method_not_allowed` instead of `404`.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, Route, web};

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::{generation, health, ingredients, notifications, recipes, users};

async fn method_not_allowed(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(Error::method_not_allowed(format!(
        "{} is not supported on {}",
        req.method(),
        req.path()
    )))
}

fn resource(path: &str, route: Route) -> actix_web::Resource {
    web::resource(path)
        .route(route)
        .default_service(web::to(method_not_allowed))
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid JSON body: {err}")).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid query string: {err}")).into()
}

/// Register every `/api` endpoint. Paths are relative to the enclosing scope.
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .service(resource("/login", web::post().to(users::login)))
        .service(resource("/logout", web::post().to(users::logout)))
        .service(resource("/me", web::get().to(users::current_user)))
        .service(resource("/get-recipes", web::get().to(recipes::get_recipes)))
        .service(resource(
            "/get-single-recipe",
            web::get().to(recipes::get_single_recipe),
        ))
        .service(resource("/profile", web::get().to(recipes::profile)))
        .service(resource(
            "/generate-recipes",
            web::post().to(generation::generate_recipes),
        ))
        .service(resource("/save-recipes", web::post().to(recipes::save_recipes)))
        .service(resource("/like-recipe", web::put().to(recipes::like_recipe)))
        .service(resource("/add-comment", web::post().to(recipes::add_comment)))
        .service(resource("/update-recipe", web::put().to(recipes::update_recipe)))
        .service(resource(
            "/delete-recipe",
            web::delete().to(recipes::delete_recipe),
        ))
        .service(resource(
            "/get-ingredients",
            web::get().to(ingredients::get_ingredients),
        ))
        .service(resource(
            "/add-ingredient",
            web::post().to(ingredients::add_ingredient),
        ))
        .service(resource(
            "/get-notifications",
            web::get().to(notifications::get_notifications),
        ))
        .service(resource(
            "/read-notification",
            web::put().to(notifications::read_notification),
        ))
        .service(resource(
            "/read-all-notifications",
            web::put().to(notifications::read_all_notifications),
        ));
}

/// Register the unauthenticated health endpoints.
pub fn health_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(resource("/health/ready", web::get().to(health::ready)))
        .service(resource("/health/live", web::get().to(health::live)));
}
