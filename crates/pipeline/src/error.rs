use advocate_core::error::CoreError;
use advocate_genai::GenAiError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// An external model, image, or search call failed.
    #[error(transparent)]
    GenAi(#[from] GenAiError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The marketing stage produced nothing that parses as a campaign idea.
    #[error("No campaign ideas could be parsed from the marketing output")]
    NoCampaignIdeas,
}
