//! Chat-completion client for OpenAI-compatible endpoints.

use advocate_core::chat::ChatMessage;
use advocate_core::config::{env_opt, env_or, env_parse, env_required};
use advocate_core::error::CoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GenAiError;
use crate::http::{self, RetryPolicy};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini-2024-07-18";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// A language model that answers a chat conversation with one message.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, GenAiError>;
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Chat model configuration.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub api_key: String,
    /// Base URL without trailing slash, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub retry: RetryPolicy,
}

impl ChatConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var              | Default                      |
    /// |----------------------|------------------------------|
    /// | `OPENAI_API_KEY`     | required                     |
    /// | `OPENAI_BASE_URL`    | `https://api.openai.com/v1`  |
    /// | `OPENAI_MODEL`       | `gpt-4o-mini-2024-07-18`     |
    /// | `OPENAI_TEMPERATURE` | `0.7`                        |
    /// | `OPENAI_MAX_TOKENS`  | unset                        |
    /// | `HTTP_MAX_RETRIES`   | `2`                          |
    pub fn from_env() -> Result<Self, CoreError> {
        let max_tokens = match env_opt("OPENAI_MAX_TOKENS") {
            Some(_) => Some(env_parse("OPENAI_MAX_TOKENS", 0u32)?),
            None => None,
        };

        Ok(Self {
            api_key: env_required("OPENAI_API_KEY")?,
            base_url: trim_base_url(&env_or("OPENAI_BASE_URL", DEFAULT_BASE_URL)),
            model: env_or("OPENAI_MODEL", DEFAULT_MODEL),
            temperature: env_parse("OPENAI_TEMPERATURE", DEFAULT_TEMPERATURE)?,
            max_tokens,
            retry: RetryPolicy {
                max_retries: env_parse("HTTP_MAX_RETRIES", http::DEFAULT_MAX_RETRIES)?,
                ..RetryPolicy::default()
            },
        })
    }
}

/// Strip trailing slashes so paths can be appended with `format!`.
pub(crate) fn trim_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Pull the first choice's text out of a completion response.
fn first_choice_content(response: ChatCompletionResponse) -> Result<String, GenAiError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| GenAiError::InvalidResponse("completion has no message content".into()))
}

// ---------------------------------------------------------------------------
// OpenAiChat
// ---------------------------------------------------------------------------

/// HTTP client for `POST {base_url}/chat/completions`.
pub struct OpenAiChat {
    client: reqwest::Client,
    config: ChatConfig,
}

impl OpenAiChat {
    pub fn new(config: ChatConfig) -> Result<Self, GenAiError> {
        Ok(Self {
            client: http::build_client()?,
            config,
        })
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across services).
    pub fn with_client(client: reqwest::Client, config: ChatConfig) -> Self {
        Self { client, config }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl ChatModel for OpenAiChat {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, GenAiError> {
        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        tracing::debug!(
            model = %self.config.model,
            message_count = messages.len(),
            "Requesting chat completion"
        );

        let request = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body);

        let response = http::send_with_retry(request, &self.config.retry).await?;
        let parsed: ChatCompletionResponse = http::parse_json(response).await?;
        let content = first_choice_content(parsed)?;

        tracing::debug!(
            model = %self.config.model,
            chars = content.len(),
            "Chat completion received"
        );
        Ok(content)
    }
}
