//! Recipe aggregate: content, social state, and tag derivation.
//!
//! A [`Recipe`] is created from a [`RecipeDraft`] (usually produced by the
//! generator) and from then on only changes through the methods here:
//! likes toggle, comments append, and owner edits replace text fields.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{RecipeIngredient, UserId};

/// Maximum number of tags stored on a recipe.
pub const MAX_TAGS: usize = 10;
/// Maximum recipe name length in characters.
pub const RECIPE_NAME_MAX: usize = 120;
/// Maximum comment length in characters.
pub const COMMENT_MAX: usize = 500;

/// Validation errors for recipe content.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeValidationError {
    /// The identifier is not a UUID.
    #[error("recipe id must be a valid UUID")]
    InvalidId,
    /// The recipe name is blank.
    #[error("recipe name must not be empty")]
    EmptyName,
    /// The recipe name exceeds [`RECIPE_NAME_MAX`].
    #[error("recipe name must be at most {max} characters")]
    NameTooLong {
        /// The enforced maximum.
        max: usize,
    },
    /// The recipe lists no ingredients.
    #[error("recipe must list at least one ingredient")]
    NoIngredients,
    /// The recipe has no non-blank instruction steps.
    #[error("recipe must include at least one instruction")]
    NoInstructions,
    /// The comment is blank.
    #[error("comment must not be empty")]
    EmptyComment,
    /// The comment exceeds [`COMMENT_MAX`].
    #[error("comment must be at most {max} characters")]
    CommentTooLong {
        /// The enforced maximum.
        max: usize,
    },
    /// The dietary preference label is unknown.
    #[error("unknown dietary preference: {label}")]
    UnknownPreference {
        /// Label as supplied.
        label: String,
    },
}

/// Stable recipe identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(Uuid);

impl RecipeId {
    /// Parse an identifier from its textual form.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, RecipeValidationError> {
        Uuid::parse_str(raw.as_ref().trim())
            .map(Self)
            .map_err(|_| RecipeValidationError::InvalidId)
    }

    /// Generate a random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for RecipeId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dietary preference a recipe satisfies.
///
/// The wire form is the human label, parsed case-insensitively.
///
/// # Examples
/// ```
/// use backend::domain::DietaryPreference;
///
/// let pref: DietaryPreference = "gluten-free".parse().expect("known label");
/// assert_eq!(pref, DietaryPreference::GlutenFree);
/// assert_eq!(pref.label(), "Gluten-Free");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DietaryPreference {
    /// No meat or fish.
    Vegetarian,
    /// No animal products.
    Vegan,
    /// No gluten.
    GlutenFree,
    /// No dairy.
    DairyFree,
    /// Very low carbohydrate, high fat.
    Keto,
    /// Paleolithic diet.
    Paleo,
    /// Reduced carbohydrate.
    LowCarb,
}

impl DietaryPreference {
    /// Every preference, in display order.
    pub const ALL: [Self; 7] = [
        Self::Vegetarian,
        Self::Vegan,
        Self::GlutenFree,
        Self::DairyFree,
        Self::Keto,
        Self::Paleo,
        Self::LowCarb,
    ];

    /// Wire and display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vegetarian => "Vegetarian",
            Self::Vegan => "Vegan",
            Self::GlutenFree => "Gluten-Free",
            Self::DairyFree => "Dairy-Free",
            Self::Keto => "Keto",
            Self::Paleo => "Paleo",
            Self::LowCarb => "Low-Carb",
        }
    }
}

impl fmt::Display for DietaryPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DietaryPreference {
    type Err = RecipeValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|pref| pref.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| RecipeValidationError::UnknownPreference {
                label: trimmed.to_owned(),
            })
    }
}

impl From<DietaryPreference> for String {
    fn from(value: DietaryPreference) -> Self {
        value.label().to_owned()
    }
}

impl TryFrom<String> for DietaryPreference {
    type Error = RecipeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Free-text extras attached to a recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdditionalInformation {
    /// Cooking tips.
    pub tips: String,
    /// Suggested variations.
    pub variations: String,
    /// How to serve.
    pub serving_suggestions: String,
    /// Nutrition summary.
    pub nutritional_information: String,
}

/// Recipe title, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecipeName(String);

impl RecipeName {
    /// Validate a recipe name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, RecipeValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RecipeValidationError::EmptyName);
        }
        if trimmed.chars().count() > RECIPE_NAME_MAX {
            return Err(RecipeValidationError::NameTooLong {
                max: RECIPE_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<RecipeName> for String {
    fn from(value: RecipeName) -> Self {
        value.0
    }
}

impl TryFrom<String> for RecipeName {
    type Error = RecipeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Comment body, trimmed, 1 to [`COMMENT_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommentText(String);

impl CommentText {
    /// Validate comment text.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, RecipeValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RecipeValidationError::EmptyComment);
        }
        if trimmed.chars().count() > COMMENT_MAX {
            return Err(RecipeValidationError::CommentTooLong { max: COMMENT_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<CommentText> for String {
    fn from(value: CommentText) -> Self {
        value.0
    }
}

impl TryFrom<String> for CommentText {
    type Error = RecipeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A comment left on a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Identifier.
    pub id: Uuid,
    /// Author.
    pub author: UserId,
    /// Body.
    pub text: CommentText,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Recipe content without identity or social state.
///
/// Generators produce drafts; saving a draft turns it into a [`Recipe`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    /// Title.
    pub name: RecipeName,
    /// Ingredient lines.
    pub ingredients: Vec<RecipeIngredient>,
    /// Ordered preparation steps.
    pub instructions: Vec<String>,
    /// Preferences the recipe satisfies.
    #[serde(default)]
    pub dietary_preference: Vec<DietaryPreference>,
    /// Extras.
    #[serde(default)]
    pub additional_information: AdditionalInformation,
    /// Illustration URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl RecipeDraft {
    /// Check the structural rules a saved recipe must satisfy and drop blank
    /// instruction steps.
    pub fn validated(mut self) -> Result<Self, RecipeValidationError> {
        if self.ingredients.is_empty() {
            return Err(RecipeValidationError::NoIngredients);
        }
        self.instructions = normalise_steps(self.instructions);
        if self.instructions.is_empty() {
            return Err(RecipeValidationError::NoInstructions);
        }
        self.dietary_preference = dedupe(self.dietary_preference);
        Ok(self)
    }
}

fn normalise_steps(steps: Vec<String>) -> Vec<String> {
    steps
        .into_iter()
        .map(|step| step.trim().to_owned())
        .filter(|step| !step.is_empty())
        .collect()
}

fn dedupe<T: Copy + Eq + std::hash::Hash>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(*item)).collect()
}

/// Partial update applied by a recipe's owner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeEdit {
    /// Replacement title.
    pub name: Option<RecipeName>,
    /// Replacement steps.
    pub instructions: Option<Vec<String>>,
    /// Replacement extras.
    pub additional_information: Option<AdditionalInformation>,
}

impl RecipeEdit {
    /// Whether the edit changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.instructions.is_none() && self.additional_information.is_none()
    }
}

/// Result of [`Recipe::toggle_like`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeOutcome {
    /// Whether the user likes the recipe after the toggle.
    pub liked: bool,
}

/// Saved recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Identifier.
    pub id: RecipeId,
    /// User who saved the recipe.
    pub owner: UserId,
    /// Title.
    pub name: RecipeName,
    /// Ingredient lines.
    pub ingredients: Vec<RecipeIngredient>,
    /// Ordered preparation steps.
    pub instructions: Vec<String>,
    /// Preferences the recipe satisfies.
    pub dietary_preference: Vec<DietaryPreference>,
    /// Extras.
    pub additional_information: AdditionalInformation,
    /// Illustration URL.
    pub image_url: Option<String>,
    /// Search tags, see [`derive_tags`].
    pub tags: Vec<String>,
    /// Users who like the recipe, without duplicates.
    pub liked_by: Vec<UserId>,
    /// Comments in the order they were added.
    pub comments: Vec<Comment>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Create a recipe owned by `owner` from a validated draft.
    pub fn from_draft(id: RecipeId, owner: UserId, draft: RecipeDraft, now: DateTime<Utc>) -> Self {
        let tags = derive_tags(&draft.ingredients, &draft.dietary_preference);
        Self {
            id,
            owner,
            name: draft.name,
            ingredients: draft.ingredients,
            instructions: draft.instructions,
            dietary_preference: draft.dietary_preference,
            additional_information: draft.additional_information,
            image_url: draft.image_url,
            tags,
            liked_by: Vec::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `user` owns the recipe.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        self.owner == *user
    }

    /// Whether `user` likes the recipe.
    pub fn is_liked_by(&self, user: &UserId) -> bool {
        self.liked_by.contains(user)
    }

    /// Number of likes.
    pub fn like_count(&self) -> usize {
        self.liked_by.len()
    }

    /// Add `user` to the likes if absent, otherwise remove them.
    ///
    /// # Examples
    /// ```
    /// # use backend::domain::{
    /// #     IngredientName, Recipe, RecipeDraft, RecipeId, RecipeIngredient, RecipeName, UserId,
    /// # };
    /// # use chrono::Utc;
    /// # let draft = RecipeDraft {
    /// #     name: RecipeName::new("Toast").expect("name"),
    /// #     ingredients: vec![RecipeIngredient::named(
    /// #         IngredientName::new("bread").expect("name"),
    /// #     )],
    /// #     instructions: vec!["Toast it".to_owned()],
    /// #     dietary_preference: Vec::new(),
    /// #     additional_information: Default::default(),
    /// #     image_url: None,
    /// # };
    /// let owner = UserId::random();
    /// let mut recipe = Recipe::from_draft(RecipeId::random(), owner, draft, Utc::now());
    /// let fan = UserId::random();
    /// assert!(recipe.toggle_like(fan, Utc::now()).liked);
    /// assert!(!recipe.toggle_like(fan, Utc::now()).liked);
    /// assert_eq!(recipe.like_count(), 0);
    /// ```
    pub fn toggle_like(&mut self, user: UserId, now: DateTime<Utc>) -> LikeOutcome {
        let before = self.liked_by.len();
        self.liked_by.retain(|id| *id != user);
        let liked = self.liked_by.len() == before;
        if liked {
            self.liked_by.push(user);
        }
        self.updated_at = now;
        LikeOutcome { liked }
    }

    /// Append a comment.
    pub fn add_comment(&mut self, comment: Comment, now: DateTime<Utc>) {
        self.comments.push(comment);
        self.updated_at = now;
    }

    /// Apply an owner edit. Returns `false` when nothing changed.
    pub fn apply_edit(
        &mut self,
        edit: RecipeEdit,
        now: DateTime<Utc>,
    ) -> Result<bool, RecipeValidationError> {
        if edit.is_empty() {
            return Ok(false);
        }
        if let Some(steps) = edit.instructions {
            let cleaned = normalise_steps(steps);
            if cleaned.is_empty() {
                return Err(RecipeValidationError::NoInstructions);
            }
            self.instructions = cleaned;
        }
        if let Some(name) = edit.name {
            self.name = name;
        }
        if let Some(info) = edit.additional_information {
            self.additional_information = info;
        }
        self.updated_at = now;
        Ok(true)
    }
}

/// Derive search tags: lower-cased ingredient names followed by lower-cased
/// preference labels, de-duplicated in first-seen order and capped at
/// [`MAX_TAGS`].
///
/// # Examples
/// ```
/// use backend::domain::{derive_tags, DietaryPreference, IngredientName, RecipeIngredient};
///
/// let ingredients = [
///     RecipeIngredient::named(IngredientName::new("Basil").expect("name")),
///     RecipeIngredient::named(IngredientName::new("basil").expect("name")),
/// ];
/// let tags = derive_tags(&ingredients, &[DietaryPreference::Vegan]);
/// assert_eq!(tags, vec!["basil".to_owned(), "vegan".to_owned()]);
/// ```
pub fn derive_tags(
    ingredients: &[RecipeIngredient],
    preferences: &[DietaryPreference],
) -> Vec<String> {
    let mut seen = HashSet::new();
    ingredients
        .iter()
        .map(|line| line.name.key())
        .chain(preferences.iter().map(|pref| pref.label().to_lowercase()))
        .filter(|tag| seen.insert(tag.clone()))
        .take(MAX_TAGS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IngredientName;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    fn line(name: &str) -> RecipeIngredient {
        RecipeIngredient::named(IngredientName::new(name).expect("ingredient"))
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[fixture]
    fn draft() -> RecipeDraft {
        RecipeDraft {
            name: RecipeName::new("Pesto Pasta").expect("name"),
            ingredients: vec![line("Basil"), line("Pasta")],
            instructions: vec!["Boil pasta".to_owned(), "  ".to_owned(), "Mix".to_owned()],
            dietary_preference: vec![DietaryPreference::Vegetarian, DietaryPreference::Vegetarian],
            additional_information: AdditionalInformation::default(),
            image_url: None,
        }
    }

    #[fixture]
    fn recipe(draft: RecipeDraft) -> Recipe {
        let valid = draft.validated().expect("valid draft");
        Recipe::from_draft(RecipeId::random(), UserId::random(), valid, at(9))
    }

    #[rstest]
    fn validation_drops_blank_steps_and_duplicate_preferences(draft: RecipeDraft) {
        let valid = draft.validated().expect("valid draft");
        assert_eq!(valid.instructions, vec!["Boil pasta", "Mix"]);
        assert_eq!(valid.dietary_preference, vec![DietaryPreference::Vegetarian]);
    }

    #[rstest]
    fn validation_requires_ingredients(mut draft: RecipeDraft) {
        draft.ingredients.clear();
        assert_eq!(draft.validated(), Err(RecipeValidationError::NoIngredients));
    }

    #[rstest]
    fn validation_requires_instructions(mut draft: RecipeDraft) {
        draft.instructions = vec![" ".to_owned()];
        assert_eq!(draft.validated(), Err(RecipeValidationError::NoInstructions));
    }

    #[rstest]
    fn from_draft_derives_tags(recipe: Recipe) {
        assert_eq!(recipe.tags, vec!["basil", "pasta", "vegetarian"]);
        assert_eq!(recipe.created_at, recipe.updated_at);
    }

    #[rstest]
    fn toggle_like_never_duplicates(mut recipe: Recipe) {
        let fan = UserId::random();
        assert!(recipe.toggle_like(fan, at(10)).liked);
        assert_eq!(recipe.liked_by, vec![fan]);
        assert!(!recipe.toggle_like(fan, at(11)).liked);
        assert!(recipe.liked_by.is_empty());
        assert_eq!(recipe.updated_at, at(11));
    }

    #[rstest]
    fn add_comment_appends_and_touches(mut recipe: Recipe) {
        let comment = Comment {
            id: Uuid::new_v4(),
            author: UserId::random(),
            text: CommentText::new(" Lovely ").expect("text"),
            created_at: at(12),
        };
        recipe.add_comment(comment, at(12));
        assert_eq!(recipe.comments.len(), 1);
        assert_eq!(recipe.comments.first().map(|c| c.text.as_str()), Some("Lovely"));
        assert_eq!(recipe.updated_at, at(12));
    }

    #[rstest]
    fn empty_edit_changes_nothing(mut recipe: Recipe) {
        let before = recipe.clone();
        assert_eq!(recipe.apply_edit(RecipeEdit::default(), at(13)), Ok(false));
        assert_eq!(recipe, before);
    }

    #[rstest]
    fn edit_rejects_blank_instructions(mut recipe: Recipe) {
        let edit = RecipeEdit {
            instructions: Some(vec![String::new()]),
            ..RecipeEdit::default()
        };
        assert_eq!(
            recipe.apply_edit(edit, at(13)),
            Err(RecipeValidationError::NoInstructions)
        );
    }

    #[rstest]
    fn edit_replaces_fields(mut recipe: Recipe) {
        let edit = RecipeEdit {
            name: Some(RecipeName::new("Better Pesto").expect("name")),
            ..RecipeEdit::default()
        };
        assert_eq!(recipe.apply_edit(edit, at(14)), Ok(true));
        assert_eq!(recipe.name.as_str(), "Better Pesto");
        assert_eq!(recipe.updated_at, at(14));
    }

    #[rstest]
    #[case("vegan", DietaryPreference::Vegan)]
    #[case("LOW-CARB", DietaryPreference::LowCarb)]
    #[case(" Dairy-Free ", DietaryPreference::DairyFree)]
    fn preferences_parse_case_insensitively(
        #[case] raw: &str,
        #[case] expected: DietaryPreference,
    ) {
        assert_eq!(raw.parse::<DietaryPreference>(), Ok(expected));
    }

    #[rstest]
    fn unknown_preferences_are_rejected() {
        assert!(matches!(
            "carnivore".parse::<DietaryPreference>(),
            Err(RecipeValidationError::UnknownPreference { .. })
        ));
    }

    #[rstest]
    fn tags_are_capped() {
        let names = ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k"];
        let lines: Vec<_> = names.iter().map(|n| line(n)).collect();
        let tags = derive_tags(&lines, &[DietaryPreference::Keto]);
        assert_eq!(tags.len(), MAX_TAGS);
        assert!(!tags.contains(&"keto".to_owned()));
    }

    #[rstest]
    #[case("".to_owned(), RecipeValidationError::EmptyComment)]
    #[case("x".repeat(501), RecipeValidationError::CommentTooLong { max: 500 })]
    fn comment_text_is_bounded(#[case] raw: String, #[case] expected: RecipeValidationError) {
        assert_eq!(CommentText::new(raw), Err(expected));
    }
}
