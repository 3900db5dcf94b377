//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories translate between Diesel rows and domain types and contain
//! no business logic. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module. Connections come from a `bb8`
//! pool through `diesel-async`; every database failure is mapped to the
//! owning port's error type.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselRecipeRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/recipes")).await?;
//! let recipes = DieselRecipeRepository::new(pool);
//! ```

mod diesel_ingredient_repository;
mod diesel_notification_repository;
mod diesel_recipe_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_ingredient_repository::DieselIngredientRepository;
pub use diesel_notification_repository::DieselNotificationRepository;
pub use diesel_recipe_repository::DieselRecipeRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
