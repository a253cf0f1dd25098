//! Marketing stage: campaign ideas from a research summary.

use std::sync::Arc;

use advocate_core::campaign::extract_campaign_ideas;
use advocate_core::prompts::CAMPAIGN_GENERATION;
use advocate_genai::ChatModel;
use async_trait::async_trait;

use crate::agent::{ask, Agent};
use crate::error::PipelineError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketingInput {
    pub company_summary: String,
    pub target_audience: String,
    pub brand_values: String,
}

pub struct MarketingAgent {
    llm: Arc<dyn ChatModel>,
}

impl MarketingAgent {
    pub fn new(llm: Arc<dyn ChatModel>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Agent for MarketingAgent {
    type Input = MarketingInput;
    /// The campaign ideas text, with any reasoning preamble removed.
    type Output = String;

    async fn execute(&self, input: &MarketingInput) -> Result<String, PipelineError> {
        tracing::info!(
            summary_chars = input.company_summary.chars().count(),
            audience = %input.target_audience,
            "Analyzing company for campaign ideas"
        );

        let content = ask(
            self.llm.as_ref(),
            &CAMPAIGN_GENERATION,
            &[
                ("company_summary", input.company_summary.as_str()),
                ("target_audience", input.target_audience.as_str()),
                ("brand_values", input.brand_values.as_str()),
            ],
        )
        .await?;

        let ideas = extract_campaign_ideas(&content);
        tracing::info!(chars = ideas.len(), "Campaign ideas generated");
        Ok(ideas)
    }
}
