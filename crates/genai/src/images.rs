//! Image generation client for OpenAI-compatible `images/generations`
//! endpoints.

use std::io::Cursor;

use advocate_core::config::{env_opt, env_or, env_parse, env_required};
use advocate_core::error::CoreError;
use advocate_core::text::{truncate_text, MAX_IMAGE_PROMPT_LENGTH};
use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::chat::trim_base_url;
use crate::error::GenAiError;
use crate::http::{self, RetryPolicy};

pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";
pub const DEFAULT_IMAGE_SIZE: &str = "1024x1024";

/// A decoded image returned by a generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    /// File extension matching the sniffed format, without the dot.
    pub extension: &'static str,
    pub width: u32,
    pub height: u32,
}

impl GeneratedImage {
    /// Sniff format and dimensions from raw image bytes.
    ///
    /// Only the header is decoded. Bytes that are not a supported image
    /// format are rejected as an invalid response.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, GenAiError> {
        let reader = ::image::ImageReader::new(Cursor::new(&bytes))
            .with_guessed_format()
            .map_err(|e| GenAiError::InvalidResponse(format!("unreadable image: {e}")))?;

        let format = reader
            .format()
            .ok_or_else(|| GenAiError::InvalidResponse("unrecognized image format".into()))?;
        let extension = format.extensions_str().first().copied().unwrap_or("img");

        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| GenAiError::InvalidResponse(format!("corrupt image header: {e}")))?;

        Ok(Self {
            bytes,
            extension,
            width,
            height,
        })
    }
}

/// Turns a text prompt into an image.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, GenAiError>;
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ImageConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Requested size, e.g. `1024x1024`.
    pub size: String,
    pub retry: RetryPolicy,
}

impl ImageConfig {
    /// Load configuration from environment variables.
    ///
    /// `IMAGE_API_KEY` and `IMAGE_BASE_URL` fall back to the chat
    /// settings so a single OpenAI account covers both services.
    ///
    /// | Env Var            | Default                              |
    /// |--------------------|--------------------------------------|
    /// | `IMAGE_API_KEY`    | `OPENAI_API_KEY`                     |
    /// | `IMAGE_BASE_URL`   | `OPENAI_BASE_URL`, then OpenAI       |
    /// | `IMAGE_MODEL`      | `dall-e-3`                           |
    /// | `IMAGE_SIZE`       | `1024x1024`                          |
    /// | `HTTP_MAX_RETRIES` | `2`                                  |
    pub fn from_env() -> Result<Self, CoreError> {
        let api_key = match env_opt("IMAGE_API_KEY") {
            Some(key) => key,
            None => env_required("OPENAI_API_KEY")?,
        };
        let base_url = env_opt("IMAGE_BASE_URL")
            .unwrap_or_else(|| env_or("OPENAI_BASE_URL", crate::chat::DEFAULT_BASE_URL));

        Ok(Self {
            api_key,
            base_url: trim_base_url(&base_url),
            model: env_or("IMAGE_MODEL", DEFAULT_IMAGE_MODEL),
            size: env_or("IMAGE_SIZE", DEFAULT_IMAGE_SIZE),
            retry: RetryPolicy {
                max_retries: env_parse("HTTP_MAX_RETRIES", http::DEFAULT_MAX_RETRIES)?,
                ..RetryPolicy::default()
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
    response_format: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    b64_json: Option<String>,
    url: Option<String>,
}

/// How the service delivered the image.
#[derive(Debug, PartialEq, Eq)]
enum ImagePayload {
    Inline(Vec<u8>),
    Remote(String),
}

fn decode_payload(response: ImageResponse) -> Result<ImagePayload, GenAiError> {
    let datum = response
        .data
        .into_iter()
        .next()
        .ok_or_else(|| GenAiError::InvalidResponse("image response has no data".into()))?;

    match (datum.b64_json, datum.url) {
        (Some(encoded), _) => Ok(ImagePayload::Inline(
            base64::engine::general_purpose::STANDARD.decode(encoded.trim())?,
        )),
        (None, Some(url)) => Ok(ImagePayload::Remote(url)),
        (None, None) => Err(GenAiError::InvalidResponse(
            "image response has neither b64_json nor url".into(),
        )),
    }
}

// ---------------------------------------------------------------------------
// OpenAiImages
// ---------------------------------------------------------------------------

/// HTTP client for `POST {base_url}/images/generations`.
pub struct OpenAiImages {
    client: reqwest::Client,
    config: ImageConfig,
}

impl OpenAiImages {
    pub fn new(config: ImageConfig) -> Result<Self, GenAiError> {
        Ok(Self {
            client: http::build_client()?,
            config,
        })
    }

    pub fn with_client(client: reqwest::Client, config: ImageConfig) -> Self {
        Self { client, config }
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, GenAiError> {
        let response = http::send_with_retry(self.client.get(url), &self.config.retry).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImages {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, GenAiError> {
        let prompt = truncate_text(prompt, MAX_IMAGE_PROMPT_LENGTH);
        let body = ImageRequest {
            model: &self.config.model,
            prompt: &prompt,
            n: 1,
            size: &self.config.size,
            response_format: "b64_json",
        };

        tracing::info!(
            model = %self.config.model,
            size = %self.config.size,
            prompt_chars = prompt.chars().count(),
            "Requesting image generation"
        );

        let request = self
            .client
            .post(format!("{}/images/generations", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body);

        let response = http::send_with_retry(request, &self.config.retry).await?;
        let parsed: ImageResponse = http::parse_json(response).await?;

        let bytes = match decode_payload(parsed)? {
            ImagePayload::Inline(bytes) => bytes,
            ImagePayload::Remote(url) => self.download(&url).await?,
        };

        let image = GeneratedImage::from_bytes(bytes)?;
        tracing::info!(
            width = image.width,
            height = image.height,
            format = image.extension,
            "Image generated"
        );
        Ok(image)
    }
}
