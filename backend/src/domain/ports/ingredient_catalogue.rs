//! Driving port for the ingredient catalogue.

use async_trait::async_trait;

use crate::domain::{Error, IngredientEntry, IngredientName, UserId};

/// Ingredient catalogue use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngredientCatalogue: Send + Sync {
    /// Every entry, sorted by name.
    async fn list(&self) -> Result<Vec<IngredientEntry>, Error>;

    /// Add an entry on behalf of `viewer`.
    async fn add(&self, viewer: &UserId, name: IngredientName) -> Result<IngredientEntry, Error>;
}

/// Empty catalogue that refuses additions.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIngredientCatalogue;

#[async_trait]
impl IngredientCatalogue for FixtureIngredientCatalogue {
    async fn list(&self) -> Result<Vec<IngredientEntry>, Error> {
        Ok(Vec::new())
    }

    async fn add(&self, _viewer: &UserId, _name: IngredientName) -> Result<IngredientEntry, Error> {
        Err(Error::service_unavailable("ingredient catalogue is read-only"))
    }
}
