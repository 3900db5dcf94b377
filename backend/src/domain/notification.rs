//! Per-user notifications about activity on owned recipes.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PublicProfile, Recipe, RecipeId, User, UserId};

/// Inbox page size used when the caller does not ask for one.
pub const INBOX_DEFAULT_LIMIT: u32 = 20;
/// Largest inbox page a caller may request.
pub const INBOX_MAX_LIMIT: u32 = 100;

/// Kind of activity a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Someone liked the recipe.
    Like,
    /// Someone commented on the recipe.
    Comment,
    /// The owner edited the recipe.
    Update,
}

impl NotificationKind {
    /// Storage and wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Comment => "comment",
            Self::Update => "update",
        }
    }

    /// Parse a stored kind.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "like" => Some(Self::Like),
            "comment" => Some(Self::Comment),
            "update" => Some(Self::Update),
            _ => None,
        }
    }
}

/// Stored notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Identifier.
    pub id: Uuid,
    /// User the notification is for.
    pub recipient: UserId,
    /// User whose action caused it.
    pub initiator: UserId,
    /// Activity kind.
    pub kind: NotificationKind,
    /// Recipe the activity concerns.
    pub recipe_id: RecipeId,
    /// Rendered message.
    pub message: String,
    /// Whether the recipient has read it.
    pub read: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    fn new(
        recipient: UserId,
        initiator: UserId,
        kind: NotificationKind,
        recipe: &Recipe,
        message: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient,
            initiator,
            kind,
            recipe_id: recipe.id,
            message,
            read: false,
            created_at: now,
        }
    }

    /// Tell the owner that `actor` liked their recipe. Owners liking their
    /// own recipe are not notified.
    pub fn liked(recipe: &Recipe, actor: &User, now: DateTime<Utc>) -> Option<Self> {
        (!recipe.is_owned_by(&actor.id)).then(|| {
            let message = format!(
                "{} liked your recipe \"{}\"",
                actor.name.as_str(),
                recipe.name.as_str()
            );
            Self::new(recipe.owner, actor.id, NotificationKind::Like, recipe, message, now)
        })
    }

    /// Tell the owner that `actor` commented on their recipe. Owners
    /// commenting on their own recipe are not notified.
    pub fn commented(recipe: &Recipe, actor: &User, now: DateTime<Utc>) -> Option<Self> {
        (!recipe.is_owned_by(&actor.id)).then(|| {
            let message = format!(
                "{} commented on your recipe \"{}\"",
                actor.name.as_str(),
                recipe.name.as_str()
            );
            Self::new(recipe.owner, actor.id, NotificationKind::Comment, recipe, message, now)
        })
    }

    /// Confirm to the owner that their edit was saved.
    pub fn updated(recipe: &Recipe, now: DateTime<Utc>) -> Self {
        let message = format!("Your recipe \"{}\" was updated", recipe.name.as_str());
        Self::new(recipe.owner, recipe.owner, NotificationKind::Update, recipe, message, now)
    }
}

/// Notification as shown to its recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
    /// Identifier.
    pub id: Uuid,
    /// Who caused the notification.
    pub initiator: PublicProfile,
    /// Activity kind.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Recipe concerned.
    pub recipe_id: RecipeId,
    /// Rendered message.
    pub message: String,
    /// Read flag.
    pub read: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl NotificationView {
    /// Render a stored notification, resolving the initiator's profile.
    pub fn render(notification: Notification, profiles: &HashMap<UserId, User>) -> Self {
        let initiator = profiles.get(&notification.initiator).map_or_else(
            || PublicProfile::former_member(notification.initiator),
            User::public_profile,
        );
        Self {
            id: notification.id,
            initiator,
            kind: notification.kind,
            recipe_id: notification.recipe_id,
            message: notification.message,
            read: notification.read,
            created_at: notification.created_at,
        }
    }
}

/// One inbox listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationFeed {
    /// Newest first.
    pub notifications: Vec<NotificationView>,
    /// Unread notifications across the whole inbox.
    pub unread_count: u64,
}

/// Validated inbox page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InboxLimit(u32);

impl InboxLimit {
    /// Accept `1..=INBOX_MAX_LIMIT`; `None` yields the default.
    pub fn new(raw: Option<u32>) -> Option<Self> {
        match raw {
            None => Some(Self(INBOX_DEFAULT_LIMIT)),
            Some(value) if (1..=INBOX_MAX_LIMIT).contains(&value) => Some(Self(value)),
            Some(_) => None,
        }
    }

    /// The limit.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for InboxLimit {
    fn default() -> Self {
        Self(INBOX_DEFAULT_LIMIT)
    }
}
