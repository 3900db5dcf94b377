//! Recipe generation service.
//!
//! Builds the prompt, asks the configured generator for drafts, and keeps
//! only the drafts that pass recipe validation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::port_errors::map_generator_error;
use crate::domain::ports::{RecipeGeneration, RecipeGenerator};
use crate::domain::{
    Error, GeneratedRecipe, GenerationRequest, RECIPES_PER_GENERATION, UserId,
    build_generation_prompt,
};

/// Generation service implementing [`RecipeGeneration`].
#[derive(Clone)]
pub struct RecipeGenerationService<G> {
    generator: Arc<G>,
}

impl<G> RecipeGenerationService<G> {
    /// Create a new service backed by `generator`.
    pub fn new(generator: Arc<G>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl<G> RecipeGeneration for RecipeGenerationService<G>
where
    G: RecipeGenerator,
{
    async fn generate(
        &self,
        viewer: &UserId,
        request: GenerationRequest,
    ) -> Result<Vec<GeneratedRecipe>, Error> {
        let prompt = build_generation_prompt(&request);
        let drafts = self
            .generator
            .generate(&prompt, &request)
            .await
            .map_err(map_generator_error)?;
        let received = drafts.len();
        let valid: Vec<GeneratedRecipe> = drafts
            .into_iter()
            .filter_map(|draft| match draft.validated() {
                Ok(draft) => Some(draft),
                Err(err) => {
                    warn!(error = %err, "discarding invalid generated recipe");
                    None
                }
            })
            .take(RECIPES_PER_GENERATION)
            .collect();
        if valid.is_empty() {
            return Err(Error::service_unavailable(
                "the recipe generator returned no usable recipes",
            ));
        }
        info!(user_id = %viewer, received, kept = valid.len(), "generated recipes");
        Ok(valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{FixtureRecipeGenerator, MockRecipeGenerator, RecipeGeneratorError};
    use crate::domain::test_fixtures::make_draft;
    use crate::domain::{ErrorCode, IngredientName, RecipeIngredient};

    fn request() -> GenerationRequest {
        let tomato = RecipeIngredient::named(IngredientName::new("tomato").expect("name"));
        GenerationRequest::new(vec![tomato], Vec::new()).expect("request")
    }

    #[tokio::test]
    async fn fixture_generator_yields_three_drafts() {
        let service = RecipeGenerationService::new(Arc::new(FixtureRecipeGenerator));
        let drafts = service
            .generate(&UserId::random(), request())
            .await
            .expect("drafts");
        assert_eq!(drafts.len(), RECIPES_PER_GENERATION);
    }

    #[tokio::test]
    async fn generator_failures_are_unavailable() {
        let mut generator = MockRecipeGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .return_once(|_, _| Err(RecipeGeneratorError::status(502_u16, "bad gateway")));
        let err = RecipeGenerationService::new(Arc::new(generator))
            .generate(&UserId::random(), request())
            .await
            .expect_err("unavailable");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[tokio::test]
    async fn invalid_drafts_are_dropped() {
        let mut empty = make_draft("Air");
        empty.instructions.clear();
        let mut generator = MockRecipeGenerator::new();
        generator
            .expect_generate()
            .return_once(move |_, _| Ok(vec![empty, make_draft("Salad")]));
        let drafts = RecipeGenerationService::new(Arc::new(generator))
            .generate(&UserId::random(), request())
            .await
            .expect("drafts");
        assert_eq!(drafts.len(), 1);
    }

    #[tokio::test]
    async fn all_invalid_drafts_are_unavailable() {
        let mut empty = make_draft("Air");
        empty.ingredients.clear();
        let mut generator = MockRecipeGenerator::new();
        generator
            .expect_generate()
            .return_once(move |_, _| Ok(vec![empty]));
        let err = RecipeGenerationService::new(Arc::new(generator))
            .generate(&UserId::random(), request())
            .await
            .expect_err("nothing usable");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
