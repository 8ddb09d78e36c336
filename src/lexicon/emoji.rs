//! Emoji rendering through a hosted chat-completion model

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::EmojiGenerator;
use crate::error::{ChatError, ChatResult};
use crate::types::Outcome;

/// Default Mistral API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.mistral.ai";

/// Default model used for emoji rendering
pub const DEFAULT_MODEL: &str = "mistral-small-latest";

const EMOJI_PROMPT: &str = "Convert this text message into a sequence of emojis that represents \
the sentence. Reply with the emojis only, no words. Example: The hiker went parachuting -> \
🗻🧍‍♂️🪂. Message: ";

/// Connection settings for the Mistral chat-completions API
#[derive(Debug, Clone)]
pub struct MistralConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl MistralConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CompletionMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<CompletionMessage>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

/// [`EmojiGenerator`] backed by Mistral chat completions
pub struct MistralEmojiGenerator {
    config: MistralConfig,
    client: reqwest::Client,
}

impl MistralEmojiGenerator {
    pub fn new(config: MistralConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Create a generator with a shared HTTP client
    pub fn with_client(config: MistralConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    fn build_headers(&self) -> ChatResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.config.api_key))
            .map_err(|e| ChatError::Config(format!("invalid Mistral API key header: {}", e)))?;
        headers.insert(AUTHORIZATION, bearer);
        Ok(headers)
    }

    async fn complete(&self, text: &str) -> ChatResult<String> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let request = CompletionRequest {
            model: &self.config.model,
            messages: vec![CompletionMessage {
                role: "user".to_string(),
                content: format!("{}{}", EMOJI_PROMPT, text),
            }],
            stream: false,
        };

        debug!(model = %self.config.model, chars = text.len(), "requesting emoji rendering");

        let response: CompletionResponse = self
            .client
            .post(url)
            .headers(self.build_headers()?)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ChatError::Pipeline("completion returned no choices".to_string()))
    }
}

/// Accept only non-empty content with no ASCII letters or digits
fn validate_emoji(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() || trimmed.chars().any(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(trimmed.to_string())
}

#[async_trait]
impl EmojiGenerator for MistralEmojiGenerator {
    async fn generate(&self, text: &str) -> Outcome {
        match self.complete(text).await {
            Ok(content) => match validate_emoji(&content) {
                Some(emoji) => Outcome::Replaced(emoji),
                None => {
                    warn!(response_len = content.len(), "emoji response was not emoji-only");
                    Outcome::failed(text, "malformed emoji response")
                }
            },
            Err(e) => {
                warn!(error = %e, "emoji generation failed");
                Outcome::failed(text, e.to_string())
            }
        }
    }
}

/// Stand-in used when no API key is configured
#[derive(Debug, Default, Clone)]
pub struct DisabledEmojiGenerator;

#[async_trait]
impl EmojiGenerator for DisabledEmojiGenerator {
    async fn generate(&self, text: &str) -> Outcome {
        Outcome::failed(text, "emoji generation disabled")
    }
}
