//! Shared fixtures for domain service unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use super::{
    DisplayName, EmailAddress, IngredientName, Recipe, RecipeDraft, RecipeId, RecipeIngredient,
    RecipeName, User, UserId,
};

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn make_user(name: &str) -> User {
    let handle = name.to_lowercase().replace(' ', ".");
    User {
        id: UserId::random(),
        name: DisplayName::new(name).expect("display name"),
        email: EmailAddress::new(format!("{handle}@example.com")).expect("email"),
        image: None,
    }
}

pub(crate) fn make_draft(name: &str) -> RecipeDraft {
    RecipeDraft {
        name: RecipeName::new(name).expect("recipe name"),
        ingredients: vec![RecipeIngredient::named(
            IngredientName::new("tomato").expect("ingredient"),
        )],
        instructions: vec!["Slice".to_owned(), "Serve".to_owned()],
        dietary_preference: Vec::new(),
        additional_information: Default::default(),
        image_url: None,
    }
}

pub(crate) fn make_recipe(owner: &User, name: &str) -> Recipe {
    Recipe::from_draft(RecipeId::random(), owner.id, make_draft(name), fixture_timestamp())
}
