//! Shared ingredient catalogue service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::port_errors::map_ingredient_error;
use crate::domain::ports::{IngredientCatalogue, IngredientRepository};
use crate::domain::{Error, IngredientEntry, IngredientName, UserId};

/// Catalogue service implementing [`IngredientCatalogue`].
#[derive(Clone)]
pub struct IngredientCatalogueService<I> {
    ingredients: Arc<I>,
    clock: Arc<dyn Clock>,
}

impl<I> IngredientCatalogueService<I> {
    /// Create a new service over `ingredients`.
    pub fn new(ingredients: Arc<I>, clock: Arc<dyn Clock>) -> Self {
        Self { ingredients, clock }
    }
}

#[async_trait]
impl<I> IngredientCatalogue for IngredientCatalogueService<I>
where
    I: IngredientRepository,
{
    async fn list(&self) -> Result<Vec<IngredientEntry>, Error> {
        let mut entries = self.ingredients.list().await.map_err(map_ingredient_error)?;
        entries.sort_by(|a, b| a.name.key().cmp(&b.name.key()));
        Ok(entries)
    }

    async fn add(&self, viewer: &UserId, name: IngredientName) -> Result<IngredientEntry, Error> {
        let entry = IngredientEntry {
            id: Uuid::new_v4(),
            name,
            created_by: Some(*viewer),
            created_at: self.clock.utc(),
        };
        self.ingredients
            .insert(&entry)
            .await
            .map_err(map_ingredient_error)?;
        Ok(entry)
    }
}
