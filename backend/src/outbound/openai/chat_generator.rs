//! Reqwest-backed recipe generator using a chat-completions endpoint.
//!
//! This adapter owns transport details only: request serialisation, bearer
//! authentication, timeout and HTTP error mapping, and JSON decoding into
//! generated recipes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;
use zeroize::Zeroizing;

use super::dto::{ChatMessageDto, ChatRequestDto, ChatResponseDto, ResponseFormatDto, parse_recipes};
use crate::domain::ports::{RecipeGenerator, RecipeGeneratorError};
use crate::domain::{GeneratedRecipe, GenerationPrompt, GenerationRequest};

const COMPLETIONS_PATH: &str = "chat/completions";
const TEMPERATURE: f32 = 0.7;

/// Connection settings for [`ChatRecipeGenerator`].
#[derive(Clone)]
pub struct ChatGeneratorConfig {
    /// API root, for example `https://api.openai.com/v1/`.
    pub base_url: Url,
    /// Bearer token.
    pub api_key: Zeroizing<String>,
    /// Model name sent with every request.
    pub model: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

/// Recipe generator calling an OpenAI-compatible chat-completions API.
pub struct ChatRecipeGenerator {
    client: Client,
    endpoint: Url,
    api_key: Zeroizing<String>,
    model: String,
}

impl ChatRecipeGenerator {
    /// Build a generator with a reqwest client bound to the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the endpoint cannot be derived from the base URL
    /// or the reqwest client cannot be constructed.
    pub fn new(config: ChatGeneratorConfig) -> Result<Self, RecipeGeneratorError> {
        let endpoint = completions_endpoint(&config.base_url)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| RecipeGeneratorError::transport(err.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key,
            model: config.model,
        })
    }
}

#[async_trait]
impl RecipeGenerator for ChatRecipeGenerator {
    async fn generate(
        &self,
        prompt: &GenerationPrompt,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedRecipe>, RecipeGeneratorError> {
        let body = ChatRequestDto {
            model: &self.model,
            messages: [
                ChatMessageDto {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessageDto {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            response_format: ResponseFormatDto::json_object(),
            temperature: TEMPERATURE,
        };
        debug!(
            model = %self.model,
            ingredients = request.ingredients().len(),
            "requesting generated recipes"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.api_key.as_str())
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, bytes.as_ref()));
        }
        decode_recipes(bytes.as_ref())
    }
}

fn completions_endpoint(base: &Url) -> Result<Url, RecipeGeneratorError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(COMPLETIONS_PATH)
        .map_err(|err| RecipeGeneratorError::transport(format!("invalid generator URL: {err}")))
}

fn decode_recipes(body: &[u8]) -> Result<Vec<GeneratedRecipe>, RecipeGeneratorError> {
    let response: ChatResponseDto = serde_json::from_slice(body).map_err(|err| {
        RecipeGeneratorError::decode(format!("invalid chat completion payload: {err}"))
    })?;
    let content = response
        .into_content()
        .map_err(RecipeGeneratorError::decode)?;
    parse_recipes(&content).map_err(RecipeGeneratorError::decode)
}

fn map_transport_error(error: reqwest::Error) -> RecipeGeneratorError {
    if error.is_timeout() {
        RecipeGeneratorError::transport(format!("request timed out: {error}"))
    } else {
        RecipeGeneratorError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RecipeGeneratorError {
    RecipeGeneratorError::status(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
