//! Research stage: questions, retrieval, and analysis.

use std::sync::Arc;

use advocate_core::prompts::{DATA_ANALYSIS, QUESTION_GENERATION, RESEARCH_RETRIEVAL};
use advocate_core::research::ResearchReport;
use advocate_genai::{ChatModel, SearchHit, WebSearch};
use async_trait::async_trait;

use crate::agent::{ask, Agent};
use crate::error::PipelineError;

/// Context handed to the retrieval prompt when search returned nothing.
pub const NO_SEARCH_RESULTS: &str = "No web search results were available.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchInput {
    pub company_name: String,
    pub target_audience: String,
}

/// Researches a company for a target audience.
///
/// When a [`WebSearch`] provider is configured its hits ground the
/// retrieval prompt; otherwise the model answers from its own knowledge.
pub struct ResearchAgent {
    llm: Arc<dyn ChatModel>,
    search: Option<Arc<dyn WebSearch>>,
}

impl ResearchAgent {
    pub fn new(llm: Arc<dyn ChatModel>, search: Option<Arc<dyn WebSearch>>) -> Self {
        Self { llm, search }
    }

    async fn generate_questions(&self, input: &ResearchInput) -> Result<String, PipelineError> {
        ask(
            self.llm.as_ref(),
            &QUESTION_GENERATION,
            &[
                ("company_name", input.company_name.as_str()),
                ("target_audience", input.target_audience.as_str()),
            ],
        )
        .await
    }

    async fn retrieve_data(&self, input: &ResearchInput) -> Result<String, PipelineError> {
        let query = format!("{} for {}", input.company_name, input.target_audience);
        let search_context = self.search_context(&query).await;
        ask(
            self.llm.as_ref(),
            &RESEARCH_RETRIEVAL,
            &[
                ("input", query.as_str()),
                ("search_context", search_context.as_str()),
            ],
        )
        .await
    }

    /// Search failures never stop the research stage.
    async fn search_context(&self, query: &str) -> String {
        let Some(search) = &self.search else {
            return NO_SEARCH_RESULTS.to_string();
        };

        match search.search(query).await {
            Ok(hits) if !hits.is_empty() => {
                tracing::debug!(hits = hits.len(), "Web search returned results");
                format_hits(&hits)
            }
            Ok(_) => {
                tracing::info!(query, "Web search returned no results");
                NO_SEARCH_RESULTS.to_string()
            }
            Err(e) => {
                tracing::warn!(error = %e, query, "Web search failed, continuing without it");
                NO_SEARCH_RESULTS.to_string()
            }
        }
    }

    async fn analyze_data(&self, raw_findings: &str) -> Result<String, PipelineError> {
        ask(
            self.llm.as_ref(),
            &DATA_ANALYSIS,
            &[("collected_data", raw_findings)],
        )
        .await
    }
}

#[async_trait]
impl Agent for ResearchAgent {
    type Input = ResearchInput;
    type Output = ResearchReport;

    async fn execute(&self, input: &ResearchInput) -> Result<ResearchReport, PipelineError> {
        tracing::info!(
            company = %input.company_name,
            audience = %input.target_audience,
            "Starting research"
        );

        let questions = self.generate_questions(input).await?;
        let raw_findings = self.retrieve_data(input).await?;
        let analysis = self.analyze_data(&raw_findings).await?;

        tracing::info!(company = %input.company_name, "Research complete");
        Ok(ResearchReport {
            questions,
            raw_findings,
            analysis,
        })
    }
}

/// Render search hits as a numbered list for the retrieval prompt.
fn format_hits(hits: &[SearchHit]) -> String {
    hits.iter()
        .enumerate()
        .map(|(i, hit)| format!("[{}] {} ({})\n{}", i + 1, hit.title, hit.url, hit.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}
