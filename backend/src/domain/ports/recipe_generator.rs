//! Port for the external recipe generator, plus a deterministic fixture.

use async_trait::async_trait;

use crate::domain::{
    AdditionalInformation, GeneratedRecipe, GenerationPrompt, GenerationRequest,
    RECIPES_PER_GENERATION, RecipeName,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by generator adapters.
    pub enum RecipeGeneratorError {
        /// The request could not be sent or timed out.
        Transport { message: String } => "recipe generator transport failed: {message}",
        /// The generator answered with a non-success status.
        Status { status: u16, message: String } =>
            "recipe generator returned status {status}: {message}",
        /// The response could not be decoded into recipes.
        Decode { message: String } => "recipe generator response invalid: {message}",
    }
}

/// Source of AI-generated recipes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    /// Generate recipes for `request` using `prompt`.
    async fn generate(
        &self,
        prompt: &GenerationPrompt,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedRecipe>, RecipeGeneratorError>;
}

/// Offline generator producing predictable recipes from the request alone.
///
/// Used when no generator API key is configured and in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecipeGenerator;

const STYLES: [&str; RECIPES_PER_GENERATION] = ["Skillet", "Traybake", "Salad"];

#[async_trait]
impl RecipeGenerator for FixtureRecipeGenerator {
    async fn generate(
        &self,
        _prompt: &GenerationPrompt,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedRecipe>, RecipeGeneratorError> {
        let lead = request
            .ingredients()
            .first()
            .map(|line| line.name.as_str())
            .ok_or_else(|| RecipeGeneratorError::decode("request has no ingredients"))?;
        STYLES
            .iter()
            .map(|style| {
                let name = RecipeName::new(format!("{lead} {style}"))
                    .map_err(|err| RecipeGeneratorError::decode(err.to_string()))?;
                Ok(GeneratedRecipe {
                    name,
                    ingredients: request.ingredients().to_vec(),
                    instructions: vec![
                        "Prepare the ingredients.".to_owned(),
                        format!("Cook everything {}-style until done.", style.to_lowercase()),
                        "Season to taste and serve.".to_owned(),
                    ],
                    dietary_preference: request.dietary_preferences().to_vec(),
                    additional_information: AdditionalInformation {
                        tips: "Taste as you go.".to_owned(),
                        variations: "Swap in seasonal produce.".to_owned(),
                        serving_suggestions: "Serve warm.".to_owned(),
                        nutritional_information: "Varies with quantities used.".to_owned(),
                    },
                    image_url: None,
                })
            })
            .collect()
    }
}
