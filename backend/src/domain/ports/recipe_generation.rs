//! Driving port for generating recipe drafts.

use async_trait::async_trait;

use crate::domain::{Error, GeneratedRecipe, GenerationRequest, UserId};

/// Generation use-case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeGeneration: Send + Sync {
    /// Generate unsaved recipe drafts for `viewer`.
    async fn generate(
        &self,
        viewer: &UserId,
        request: GenerationRequest,
    ) -> Result<Vec<GeneratedRecipe>, Error>;
}

/// Generation stub that always reports the generator as unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecipeGeneration;

#[async_trait]
impl RecipeGeneration for FixtureRecipeGeneration {
    async fn generate(
        &self,
        _viewer: &UserId,
        _request: GenerationRequest,
    ) -> Result<Vec<GeneratedRecipe>, Error> {
        Err(Error::service_unavailable("recipe generation is not configured"))
    }
}
