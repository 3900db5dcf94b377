//! DTOs for the chat-completions wire format.
//!
//! Responses decode into these transport types first; recipe entries are then
//! converted one at a time so a single malformed entry does not sink the rest.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::domain::GeneratedRecipe;

#[derive(Debug, Serialize)]
pub(super) struct ChatRequestDto<'a> {
    pub(super) model: &'a str,
    pub(super) messages: [ChatMessageDto<'a>; 2],
    pub(super) response_format: ResponseFormatDto,
    pub(super) temperature: f32,
}

#[derive(Debug, Serialize)]
pub(super) struct ChatMessageDto<'a> {
    pub(super) role: &'static str,
    pub(super) content: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct ResponseFormatDto {
    #[serde(rename = "type")]
    pub(super) kind: &'static str,
}

impl ResponseFormatDto {
    pub(super) const fn json_object() -> Self {
        Self {
            kind: "json_object",
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatResponseDto {
    #[serde(default)]
    pub(super) choices: Vec<ChoiceDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChoiceDto {
    pub(super) message: ChoiceMessageDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChoiceMessageDto {
    #[serde(default)]
    pub(super) content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RecipeListDto {
    recipes: Vec<Value>,
}

impl ChatResponseDto {
    /// Text of the first choice.
    pub(super) fn into_content(self) -> Result<String, String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| "response contained no message content".to_owned())
    }
}

/// Decode the assistant's JSON reply into recipes, skipping entries that do
/// not match the recipe shape.
pub(super) fn parse_recipes(content: &str) -> Result<Vec<GeneratedRecipe>, String> {
    let list: RecipeListDto = serde_json::from_str(strip_code_fence(content))
        .map_err(|err| format!("reply is not a recipe list: {err}"))?;
    let recipes: Vec<GeneratedRecipe> = list
        .recipes
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(recipe) => Some(recipe),
            Err(err) => {
                warn!(index, error = %err, "skipping malformed generated recipe");
                None
            }
        })
        .collect();
    if recipes.is_empty() {
        return Err("reply contained no well-formed recipes".to_owned());
    }
    Ok(recipes)
}

// Some models wrap JSON in a markdown fence even in JSON mode.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map_or(trimmed, str::trim)
}
