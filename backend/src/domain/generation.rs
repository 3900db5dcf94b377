//! Recipe generation requests and the prompt sent to the generator.

use std::collections::HashSet;

use serde::Serialize;

use super::{DietaryPreference, RecipeDraft, RecipeIngredient};

/// Largest number of ingredients accepted in one request.
pub const MAX_GENERATION_INGREDIENTS: usize = 20;
/// Number of recipes the generator is asked for.
pub const RECIPES_PER_GENERATION: usize = 3;

/// Recipe produced by a generator; identical in shape to a draft.
pub type GeneratedRecipe = RecipeDraft;

/// Validation errors for generation requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationValidationError {
    /// No ingredients were supplied.
    #[error("at least one ingredient is required")]
    NoIngredients,
    /// Too many ingredients were supplied.
    #[error("at most {max} ingredients are allowed")]
    TooManyIngredients {
        /// The enforced maximum.
        max: usize,
    },
}

/// Ingredients and preferences to generate recipes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    ingredients: Vec<RecipeIngredient>,
    dietary_preferences: Vec<DietaryPreference>,
}

impl GenerationRequest {
    /// Validate ingredient count and de-duplicate preferences.
    pub fn new(
        ingredients: Vec<RecipeIngredient>,
        dietary_preferences: Vec<DietaryPreference>,
    ) -> Result<Self, GenerationValidationError> {
        if ingredients.is_empty() {
            return Err(GenerationValidationError::NoIngredients);
        }
        if ingredients.len() > MAX_GENERATION_INGREDIENTS {
            return Err(GenerationValidationError::TooManyIngredients {
                max: MAX_GENERATION_INGREDIENTS,
            });
        }
        let mut seen = HashSet::new();
        let dietary_preferences = dietary_preferences
            .into_iter()
            .filter(|pref| seen.insert(*pref))
            .collect();
        Ok(Self {
            ingredients,
            dietary_preferences,
        })
    }

    /// Requested ingredients.
    pub fn ingredients(&self) -> &[RecipeIngredient] {
        &self.ingredients
    }

    /// Requested preferences, without duplicates.
    pub fn dietary_preferences(&self) -> &[DietaryPreference] {
        &self.dietary_preferences
    }
}

/// Chat-style prompt for a generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPrompt {
    /// Instructions describing the output contract.
    pub system: String,
    /// The user's ingredients and preferences.
    pub user: String,
}

/// Build the prompt asking for [`RECIPES_PER_GENERATION`] recipes as JSON.
pub fn build_generation_prompt(request: &GenerationRequest) -> GenerationPrompt {
    let system = format!(
        "You are a culinary assistant. Reply with a JSON object of the form \
         {{\"recipes\":[...]}} containing exactly {RECIPES_PER_GENERATION} recipes. \
         Each recipe has: name (string), ingredients (array of {{name, quantity}}), \
         instructions (array of strings), dietaryPreference (array of strings drawn \
         from: {labels}), \
         additionalInformation (object with tips, variations, servingSuggestions, \
         nutritionalInformation strings). Do not include any text outside the JSON.",
        labels = DietaryPreference::ALL
            .iter()
            .map(|pref| pref.label())
            .collect::<Vec<_>>()
            .join(", "),
    );

    let ingredients = request
        .ingredients()
        .iter()
        .map(|line| match &line.quantity {
            Some(quantity) => format!("{} ({quantity})", line.name.as_str()),
            None => line.name.as_str().to_owned(),
        })
        .collect::<Vec<_>>()
        .join(", ");
    let preferences = if request.dietary_preferences().is_empty() {
        "none".to_owned()
    } else {
        request
            .dietary_preferences()
            .iter()
            .map(|pref| pref.label())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let user = format!(
        "Create {RECIPES_PER_GENERATION} different recipes using these ingredients: {ingredients}. \
         Dietary preferences: {preferences}."
    );

    GenerationPrompt { system, user }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IngredientName;
    use rstest::rstest;

    fn line(name: &str, quantity: Option<&str>) -> RecipeIngredient {
        RecipeIngredient {
            name: IngredientName::new(name).expect("ingredient"),
            quantity: quantity.map(str::to_owned),
        }
    }

    #[rstest]
    fn rejects_empty_requests() {
        assert_eq!(
            GenerationRequest::new(Vec::new(), Vec::new()),
            Err(GenerationValidationError::NoIngredients)
        );
    }

    #[rstest]
    fn rejects_oversized_requests() {
        let lines = (0..21).map(|i| line(&format!("item {i}"), None)).collect();
        assert_eq!(
            GenerationRequest::new(lines, Vec::new()),
            Err(GenerationValidationError::TooManyIngredients { max: 20 })
        );
    }

    #[rstest]
    fn deduplicates_preferences() {
        let request = GenerationRequest::new(
            vec![line("tofu", None)],
            vec![DietaryPreference::Vegan, DietaryPreference::Vegan],
        )
        .expect("valid request");
        assert_eq!(request.dietary_preferences(), &[DietaryPreference::Vegan]);
    }

    #[rstest]
    fn prompt_names_ingredients_and_output_contract() {
        let request = GenerationRequest::new(
            vec![line("tofu", Some("200 g")), line("rice", None)],
            vec![DietaryPreference::GlutenFree],
        )
        .expect("valid request");
        let prompt = build_generation_prompt(&request);
        assert!(prompt.system.contains("{\"recipes\":[...]}"));
        assert!(prompt.system.contains("exactly 3 recipes"));
        assert!(prompt.user.contains("tofu (200 g), rice"));
        assert!(prompt.user.contains("Gluten-Free"));
    }

    #[rstest]
    fn prompt_reports_missing_preferences() {
        let request = GenerationRequest::new(vec![line("egg", None)], Vec::new()).expect("valid");
        assert!(build_generation_prompt(&request).user.ends_with("Dietary preferences: none."));
    }
}
