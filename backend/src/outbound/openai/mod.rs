//! OpenAI-compatible outbound adapter.
//!
//! Provides an HTTP implementation of the `RecipeGenerator` port.

mod chat_generator;
mod dto;

pub use chat_generator::{ChatGeneratorConfig, ChatRecipeGenerator};
