//! Ingredient catalogue entries and recipe ingredient lines.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Maximum ingredient name length in characters.
pub const INGREDIENT_NAME_MAX: usize = 50;

/// Validation errors for ingredient names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IngredientValidationError {
    /// The name is blank.
    #[error("ingredient name must not be empty")]
    Empty,
    /// The name exceeds [`INGREDIENT_NAME_MAX`].
    #[error("ingredient name must be at most {max} characters")]
    TooLong {
        /// The enforced maximum.
        max: usize,
    },
    /// The name contains no letters.
    #[error("ingredient name must contain at least one letter")]
    NoLetters,
}

/// Ingredient name with whitespace trimmed and collapsed.
///
/// Equality of catalogue entries is decided by [`IngredientName::key`], so
/// `"Basil"` and `"basil"` are the same ingredient.
///
/// # Examples
/// ```
/// use backend::domain::IngredientName;
///
/// let name = IngredientName::new("  Sweet   Potato ").expect("valid name");
/// assert_eq!(name.as_str(), "Sweet Potato");
/// assert_eq!(name.key(), "sweet potato");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IngredientName(String);

impl IngredientName {
    /// Validate and normalise an ingredient name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, IngredientValidationError> {
        let collapsed = raw.as_ref().split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            return Err(IngredientValidationError::Empty);
        }
        if collapsed.chars().count() > INGREDIENT_NAME_MAX {
            return Err(IngredientValidationError::TooLong {
                max: INGREDIENT_NAME_MAX,
            });
        }
        if !collapsed.chars().any(char::is_alphabetic) {
            return Err(IngredientValidationError::NoLetters);
        }
        Ok(Self(collapsed))
    }

    /// Borrow the display form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive uniqueness key.
    pub fn key(&self) -> String {
        self.0.to_lowercase()
    }
}

impl From<IngredientName> for String {
    fn from(value: IngredientName) -> Self {
        value.0
    }
}

impl TryFrom<String> for IngredientName {
    type Error = IngredientValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Entry in the shared ingredient catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientEntry {
    /// Identifier.
    pub id: Uuid,
    /// Normalised name.
    pub name: IngredientName,
    /// User who added the entry; `None` for seeded entries.
    pub created_by: Option<UserId>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// One ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    /// Ingredient name.
    pub name: IngredientName,
    /// Free-form amount such as `"2 cups"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
}

impl RecipeIngredient {
    /// Ingredient line without a quantity.
    pub fn named(name: IngredientName) -> Self {
        Self {
            name,
            quantity: None,
        }
    }
}
