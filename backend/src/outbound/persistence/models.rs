//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer. Conversions to and from
//! domain types live here so each repository stays a thin query wrapper.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{
    Comment, DietaryPreference, DisplayName, EmailAddress, IngredientEntry, IngredientName,
    Notification, NotificationKind, Recipe, RecipeId, RecipeName, User, UserId,
};

use super::schema::{ingredients, notifications, recipes, users};

/// Failure turning a stored row back into a domain value.
#[derive(Debug, thiserror::Error)]
#[error("invalid stored {entity} {id}: {reason}")]
pub(crate) struct RowConversionError {
    entity: &'static str,
    id: Uuid,
    reason: String,
}

impl RowConversionError {
    fn new(entity: &'static str, id: Uuid, reason: impl ToString) -> Self {
        Self {
            entity,
            id,
            reason: reason.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub image: Option<String>,
}

impl UserRow {
    pub(crate) fn into_domain(self) -> Result<User, RowConversionError> {
        let id = self.id;
        Ok(User {
            id: UserId::from(id),
            name: DisplayName::new(self.display_name)
                .map_err(|err| RowConversionError::new("user", id, err))?,
            email: EmailAddress::new(self.email)
                .map_err(|err| RowConversionError::new("user", id, err))?,
            image: self.image,
        })
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub display_name: &'a str,
    pub email: &'a str,
    pub image: Option<&'a str>,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: *user.id.as_uuid(),
            display_name: user.name.as_str(),
            email: user.email.as_str(),
            image: user.image.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Recipes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipeRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub ingredients: Value,
    pub instructions: Value,
    pub dietary_preference: Vec<String>,
    pub additional_information: Value,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub liked_by: Vec<Uuid>,
    pub comments: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecipeRow {
    pub(crate) fn into_domain(self) -> Result<Recipe, RowConversionError> {
        let id = self.id;
        let invalid = |err: &dyn std::fmt::Display| RowConversionError::new("recipe", id, err);
        let dietary_preference = self
            .dietary_preference
            .iter()
            .map(|label| label.parse::<DietaryPreference>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| invalid(&err))?;
        let comments: Vec<Comment> =
            serde_json::from_value(self.comments).map_err(|err| invalid(&err))?;
        Ok(Recipe {
            id: RecipeId::from(id),
            owner: UserId::from(self.owner_id),
            name: RecipeName::new(&self.name).map_err(|err| invalid(&err))?,
            ingredients: serde_json::from_value(self.ingredients).map_err(|err| invalid(&err))?,
            instructions: serde_json::from_value(self.instructions)
                .map_err(|err| invalid(&err))?,
            dietary_preference,
            additional_information: serde_json::from_value(self.additional_information)
                .map_err(|err| invalid(&err))?,
            image_url: self.image_url,
            tags: self.tags,
            liked_by: self.liked_by.into_iter().map(UserId::from).collect(),
            comments,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Full recipe row for inserts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipes)]
pub(crate) struct RecipeRecord<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: &'a str,
    pub ingredients: Value,
    pub instructions: Value,
    pub dietary_preference: Vec<String>,
    pub additional_information: Value,
    pub image_url: Option<&'a str>,
    pub tags: Vec<String>,
    pub liked_by: Vec<Uuid>,
    pub like_count: i32,
    pub comments: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> RecipeRecord<'a> {
    pub(crate) fn from_domain(recipe: &'a Recipe) -> Result<Self, serde_json::Error> {
        Ok(Self {
            id: *recipe.id.as_uuid(),
            owner_id: *recipe.owner.as_uuid(),
            name: recipe.name.as_str(),
            ingredients: serde_json::to_value(&recipe.ingredients)?,
            instructions: serde_json::to_value(&recipe.instructions)?,
            dietary_preference: recipe
                .dietary_preference
                .iter()
                .map(|p| p.label().to_owned())
                .collect(),
            additional_information: serde_json::to_value(&recipe.additional_information)?,
            image_url: recipe.image_url.as_deref(),
            tags: recipe.tags.clone(),
            liked_by: recipe.liked_by.iter().map(|id| *id.as_uuid()).collect(),
            like_count: i32::try_from(recipe.liked_by.len()).unwrap_or(i32::MAX),
            comments: serde_json::to_value(&recipe.comments)?,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        })
    }
}

/// Owner-editable recipe columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = recipes)]
pub(crate) struct RecipeEditRecord<'a> {
    pub name: &'a str,
    pub instructions: Value,
    pub additional_information: Value,
    pub updated_at: DateTime<Utc>,
}

impl<'a> RecipeEditRecord<'a> {
    pub(crate) fn from_domain(recipe: &'a Recipe) -> Result<Self, serde_json::Error> {
        Ok(Self {
            name: recipe.name.as_str(),
            instructions: serde_json::to_value(&recipe.instructions)?,
            additional_information: serde_json::to_value(&recipe.additional_information)?,
            updated_at: recipe.updated_at,
        })
    }
}

/// Like and comment columns, written under a row lock.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = recipes)]
pub(crate) struct RecipeSocialRecord {
    pub liked_by: Vec<Uuid>,
    pub like_count: i32,
    pub comments: Value,
    pub updated_at: DateTime<Utc>,
}

impl RecipeSocialRecord {
    pub(crate) fn from_domain(recipe: &Recipe) -> Result<Self, serde_json::Error> {
        Ok(Self {
            liked_by: recipe.liked_by.iter().map(|id| *id.as_uuid()).collect(),
            like_count: i32::try_from(recipe.liked_by.len()).unwrap_or(i32::MAX),
            comments: serde_json::to_value(&recipe.comments)?,
            updated_at: recipe.updated_at,
        })
    }
}

/// Result row of the popular-tags aggregate.
#[derive(Debug, QueryableByName)]
pub(crate) struct TagCountRow {
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub tag: String,
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub count: i64,
}

// ---------------------------------------------------------------------------
// Ingredients
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IngredientRow {
    pub id: Uuid,
    pub name: String,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl IngredientRow {
    pub(crate) fn into_domain(self) -> Result<IngredientEntry, RowConversionError> {
        let id = self.id;
        Ok(IngredientEntry {
            id,
            name: IngredientName::new(&self.name)
                .map_err(|err| RowConversionError::new("ingredient", id, err))?,
            created_by: self.created_by.map(UserId::from),
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ingredients)]
pub(crate) struct NewIngredientRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub name_key: String,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a IngredientEntry> for NewIngredientRow<'a> {
    fn from(entry: &'a IngredientEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name.as_str(),
            name_key: entry.name.key(),
            created_by: entry.created_by.map(|id| *id.as_uuid()),
            created_at: entry.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NotificationRow {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub initiator_id: Uuid,
    pub kind: String,
    pub recipe_id: Uuid,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl NotificationRow {
    pub(crate) fn into_domain(self) -> Result<Notification, RowConversionError> {
        let kind = NotificationKind::parse(&self.kind).ok_or_else(|| {
            RowConversionError::new("notification", self.id, format!("unknown kind {}", self.kind))
        })?;
        Ok(Notification {
            id: self.id,
            recipient: UserId::from(self.recipient_id),
            initiator: UserId::from(self.initiator_id),
            kind,
            recipe_id: RecipeId::from(self.recipe_id),
            message: self.message,
            read: self.read,
            created_at: self.created_at,
        })
    }
}

impl From<&Notification> for NotificationRow {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id,
            recipient_id: *notification.recipient.as_uuid(),
            initiator_id: *notification.initiator.as_uuid(),
            kind: notification.kind.as_str().to_owned(),
            recipe_id: *notification.recipe_id.as_uuid(),
            message: notification.message.clone(),
            read: notification.read,
            created_at: notification.created_at,
        }
    }
}
