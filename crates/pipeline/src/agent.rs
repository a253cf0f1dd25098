//! The agent abstraction: a typed step backed by prompt templates.

use advocate_core::prompts::PromptTemplate;
use advocate_genai::ChatModel;
use async_trait::async_trait;

use crate::error::PipelineError;

#[async_trait]
pub trait Agent: Send + Sync {
    type Input: Send + Sync;
    type Output: Send + Sync;

    async fn execute(&self, input: &Self::Input) -> Result<Self::Output, PipelineError>;
}

/// Render `template` with `vars` and send it to `llm`.
pub(crate) async fn ask(
    llm: &dyn ChatModel,
    template: &PromptTemplate,
    vars: &[(&str, &str)],
) -> Result<String, PipelineError> {
    let messages = template.render(vars)?;
    tracing::debug!(prompt = template.name, "Sending prompt");
    let reply = llm.complete(&messages).await?;
    tracing::debug!(prompt = template.name, chars = reply.len(), "Prompt answered");
    Ok(reply)
}
