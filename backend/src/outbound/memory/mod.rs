//! In-memory repositories.
//!
//! Used when no database is configured and by end-to-end tests. Each
//! collection sits behind one `tokio::sync::RwLock`, so every port call is
//! atomic with respect to the others on the same collection.

mod ingredients;
mod notifications;
mod recipes;
mod users;

pub use ingredients::MemoryIngredientRepository;
pub use notifications::MemoryNotificationRepository;
pub use recipes::MemoryRecipeRepository;
pub use users::MemoryUserRepository;
