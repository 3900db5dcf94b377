//! HTTP inbound adapter exposing the recipe REST endpoints.

pub mod cache_control;
pub mod error;
pub mod generation;
pub mod health;
pub mod ingredients;
pub mod notifications;
pub mod recipes;
pub mod routes;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;
