//! Web search used by the research stage.

use advocate_core::config::{env_opt, env_or, env_parse};
use advocate_core::error::CoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::chat::trim_base_url;
use crate::error::GenAiError;
use crate::http::{self, RetryPolicy};

pub const DEFAULT_TAVILY_BASE_URL: &str = "https://api.tavily.com";
pub const DEFAULT_MAX_RESULTS: u32 = 5;

/// One web search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub content: String,
}

#[async_trait]
pub trait WebSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, GenAiError>;
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub api_key: String,
    pub base_url: String,
    pub max_results: u32,
    pub retry: RetryPolicy,
}

impl SearchConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `Ok(None)` when `TAVILY_API_KEY` is unset: web search is
    /// optional and research then relies on the model alone.
    ///
    /// | Env Var              | Default                  |
    /// |----------------------|--------------------------|
    /// | `TAVILY_API_KEY`     | unset (search disabled)  |
    /// | `TAVILY_BASE_URL`    | `https://api.tavily.com` |
    /// | `SEARCH_MAX_RESULTS` | `5`                      |
    pub fn from_env() -> Result<Option<Self>, CoreError> {
        let Some(api_key) = env_opt("TAVILY_API_KEY") else {
            return Ok(None);
        };

        Ok(Some(Self {
            api_key,
            base_url: trim_base_url(&env_or("TAVILY_BASE_URL", DEFAULT_TAVILY_BASE_URL)),
            max_results: env_parse("SEARCH_MAX_RESULTS", DEFAULT_MAX_RESULTS)?,
            retry: RetryPolicy {
                max_retries: env_parse("HTTP_MAX_RETRIES", http::DEFAULT_MAX_RETRIES)?,
                ..RetryPolicy::default()
            },
        }))
    }
}

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: u32,
    search_depth: &'a str,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

/// Client for the Tavily search API (`POST {base_url}/search`).
pub struct TavilySearch {
    client: reqwest::Client,
    config: SearchConfig,
}

impl TavilySearch {
    pub fn new(config: SearchConfig) -> Result<Self, GenAiError> {
        Ok(Self {
            client: http::build_client()?,
            config,
        })
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: SearchConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl WebSearch for TavilySearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, GenAiError> {
        let body = TavilyRequest {
            api_key: &self.config.api_key,
            query,
            max_results: self.config.max_results,
            search_depth: "basic",
        };

        let request = self
            .client
            .post(format!("{}/search", self.config.base_url))
            .json(&body);

        let response = http::send_with_retry(request, &self.config.retry).await?;
        let parsed: TavilyResponse = http::parse_json(response).await?;

        tracing::debug!(query, hits = parsed.results.len(), "Web search completed");
        Ok(parsed.results)
    }
}
