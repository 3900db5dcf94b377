//! Port for the shared ingredient catalogue.

use async_trait::async_trait;

use crate::domain::IngredientEntry;

use super::define_port_error;

define_port_error! {
    /// Errors raised by ingredient repository adapters.
    pub enum IngredientRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "ingredient repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } => "ingredient repository query failed: {message}",
        /// An entry with the same case-insensitive name exists.
        Conflict { name: String } => "ingredient {name} already exists",
    }
}

/// Storage for ingredient catalogue entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// Every entry, sorted by name ignoring case.
    async fn list(&self) -> Result<Vec<IngredientEntry>, IngredientRepositoryError>;

    /// Store a new entry. Duplicate keys fail with `Conflict`.
    async fn insert(&self, entry: &IngredientEntry) -> Result<(), IngredientRepositoryError>;
}
