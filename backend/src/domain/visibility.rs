//! Viewer-relative projection of recipes.
//!
//! Recipes store bare user ids. Before a recipe leaves the domain it is
//! rendered for a specific viewer: user ids become public profiles, the
//! owner's email is kept only when the viewer is the owner, and `owns` /
//! `liked` flags are computed. The transform is pure and order preserving.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{
    AdditionalInformation, DietaryPreference, PublicProfile, Recipe, RecipeId, RecipeIngredient,
    User, UserId,
};

/// Recipe owner as shown to a viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerView {
    /// Public identity.
    #[serde(flatten)]
    pub profile: PublicProfile,
    /// Present only when the viewer owns the recipe.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Comment as shown to a viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    /// Identifier.
    pub id: Uuid,
    /// Author identity.
    pub user: PublicProfile,
    /// Body.
    pub comment: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Recipe rendered for one viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeView {
    /// Identifier.
    pub id: RecipeId,
    /// Owner identity.
    pub owner: OwnerView,
    /// Title.
    pub name: String,
    /// Ingredient lines.
    pub ingredients: Vec<RecipeIngredient>,
    /// Preparation steps.
    pub instructions: Vec<String>,
    /// Preferences satisfied.
    pub dietary_preference: Vec<DietaryPreference>,
    /// Extras.
    pub additional_information: AdditionalInformation,
    /// Illustration URL.
    pub image_url: Option<String>,
    /// Search tags.
    pub tags: Vec<String>,
    /// Users who like the recipe.
    pub liked_by: Vec<PublicProfile>,
    /// Comments in insertion order.
    pub comments: Vec<CommentView>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// Whether the viewer likes the recipe.
    pub liked: bool,
    /// Whether the viewer owns the recipe.
    pub owns: bool,
}

/// Every user id referenced by `recipes`, for batch profile lookups.
pub fn referenced_users<'a, I>(recipes: I) -> Vec<UserId>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    let mut ids = BTreeSet::new();
    for recipe in recipes {
        ids.insert(recipe.owner);
        ids.extend(recipe.liked_by.iter().copied());
        ids.extend(recipe.comments.iter().map(|comment| comment.author));
    }
    ids.into_iter().collect()
}

/// Index users by id.
pub fn index_profiles(users: Vec<User>) -> HashMap<UserId, User> {
    users.into_iter().map(|user| (user.id, user)).collect()
}

/// Render `recipes` for `viewer`.
///
/// Ids missing from `profiles` render as "Former member".
pub fn visible_recipes(
    recipes: Vec<Recipe>,
    profiles: &HashMap<UserId, User>,
    viewer: &UserId,
) -> Vec<RecipeView> {
    recipes
        .into_iter()
        .map(|recipe| visible_recipe(recipe, profiles, viewer))
        .collect()
}

/// Render a single recipe for `viewer`.
pub fn visible_recipe(
    recipe: Recipe,
    profiles: &HashMap<UserId, User>,
    viewer: &UserId,
) -> RecipeView {
    let public = |id: &UserId| {
        profiles
            .get(id)
            .map_or_else(|| PublicProfile::former_member(*id), User::public_profile)
    };
    let owns = recipe.is_owned_by(viewer);
    let liked = recipe.is_liked_by(viewer);
    let owner = OwnerView {
        profile: public(&recipe.owner),
        email: owns
            .then(|| profiles.get(&recipe.owner))
            .flatten()
            .map(|user| user.email.as_str().to_owned()),
    };
    let liked_by = recipe.liked_by.iter().map(public).collect();
    let comments = recipe
        .comments
        .into_iter()
        .map(|comment| CommentView {
            id: comment.id,
            user: public(&comment.author),
            comment: comment.text.into(),
            created_at: comment.created_at,
        })
        .collect();

    RecipeView {
        id: recipe.id,
        owner,
        name: recipe.name.into(),
        ingredients: recipe.ingredients,
        instructions: recipe.instructions,
        dietary_preference: recipe.dietary_preference,
        additional_information: recipe.additional_information,
        image_url: recipe.image_url,
        tags: recipe.tags,
        liked_by,
        comments,
        created_at: recipe.created_at,
        updated_at: recipe.updated_at,
        liked,
        owns,
    }
}
