//! Translation of driven-port failures into domain errors.
//!
//! Connection failures surface as `service_unavailable` so clients can retry;
//! everything else unexpected is `internal` and gets redacted at the edge.

use tracing::error;

use super::Error;
use super::ports::{
    IngredientRepositoryError, NotificationRepositoryError, RecipeGeneratorError,
    RecipeRepositoryError, UserPersistenceError,
};

pub(crate) fn map_user_error(err: UserPersistenceError) -> Error {
    match err {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

pub(crate) fn map_recipe_error(err: RecipeRepositoryError) -> Error {
    match err {
        RecipeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("recipe repository unavailable: {message}"))
        }
        RecipeRepositoryError::Query { message } => {
            Error::internal(format!("recipe repository error: {message}"))
        }
        RecipeRepositoryError::NotFound { id } => {
            Error::not_found(format!("recipe {id} not found"))
        }
    }
}

pub(crate) fn map_ingredient_error(err: IngredientRepositoryError) -> Error {
    match err {
        IngredientRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("ingredient repository unavailable: {message}"))
        }
        IngredientRepositoryError::Query { message } => {
            Error::internal(format!("ingredient repository error: {message}"))
        }
        IngredientRepositoryError::Conflict { name } => {
            Error::conflict(format!("ingredient {name} already exists"))
        }
    }
}

pub(crate) fn map_notification_error(err: NotificationRepositoryError) -> Error {
    match err {
        NotificationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("notification repository unavailable: {message}"))
        }
        NotificationRepositoryError::Query { message } => {
            Error::internal(format!("notification repository error: {message}"))
        }
    }
}

pub(crate) fn map_generator_error(err: RecipeGeneratorError) -> Error {
    error!(error = %err, "recipe generation failed");
    Error::service_unavailable("recipe generation is temporarily unavailable")
}
