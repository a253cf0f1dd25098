//! HTTP clients for the external generative-AI services.
//!
//! Each service sits behind a small async trait so the pipeline can be
//! driven by any implementation:
//!
//! - [`ChatModel`] with [`OpenAiChat`] for OpenAI-compatible chat completions.
//! - [`ImageGenerator`] with [`OpenAiImages`] for OpenAI-compatible image generation.
//! - [`WebSearch`] with [`TavilySearch`] for web research.

pub mod chat;
pub mod error;
pub mod http;
pub mod images;
pub mod search;

#[cfg(test)]
pub(crate) mod test_server;

pub use chat::{ChatConfig, ChatModel, OpenAiChat};
pub use error::GenAiError;
pub use http::RetryPolicy;
pub use images::{GeneratedImage, ImageConfig, ImageGenerator, OpenAiImages};
pub use search::{SearchConfig, SearchHit, TavilySearch, WebSearch};
