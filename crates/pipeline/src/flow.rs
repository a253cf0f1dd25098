//! End-to-end campaign flow: research, marketing, then ad generation.

use std::path::Path;
use std::sync::Arc;

use advocate_core::campaign::parse_campaign_details;
use advocate_core::error::CoreError;
use advocate_core::record::CampaignRecord;
use advocate_core::research::parse_research_results;
use advocate_core::stage::Stage;
use advocate_genai::{ChatModel, ImageGenerator, WebSearch};
use chrono::Utc;
use uuid::Uuid;

use crate::adgen::{AdGenAgent, AdGenInput};
use crate::agent::Agent;
use crate::assets::CampaignOrchestrator;
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::marketing::{MarketingAgent, MarketingInput};
use crate::research::{ResearchAgent, ResearchInput};

pub struct CampaignFlow {
    research: ResearchAgent,
    marketing: MarketingAgent,
    orchestrator: CampaignOrchestrator,
    campaign_goals: String,
}

impl CampaignFlow {
    pub fn new(
        llm: Arc<dyn ChatModel>,
        images: Arc<dyn ImageGenerator>,
        search: Option<Arc<dyn WebSearch>>,
        config: &PipelineConfig,
    ) -> Self {
        Self {
            research: ResearchAgent::new(llm.clone(), search),
            marketing: MarketingAgent::new(llm.clone()),
            orchestrator: CampaignOrchestrator::new(
                AdGenAgent::new(llm, config.max_regenerations),
                images,
                config.output_dir.clone(),
            ),
            campaign_goals: config.campaign_goals.clone(),
        }
    }

    pub fn research(&self) -> &ResearchAgent {
        &self.research
    }

    pub fn marketing(&self) -> &MarketingAgent {
        &self.marketing
    }

    pub fn orchestrator(&self) -> &CampaignOrchestrator {
        &self.orchestrator
    }

    pub fn campaign_goals(&self) -> &str {
        &self.campaign_goals
    }

    pub fn output_dir(&self) -> &Path {
        self.orchestrator.output_dir()
    }

    /// Run every stage for one company and audience.
    ///
    /// Each stage's text output feeds the next; the ad stage runs for every
    /// campaign idea the marketing stage produced.
    pub async fn run(
        &self,
        company_name: &str,
        target_audience: &str,
    ) -> Result<CampaignRecord, PipelineError> {
        let company_name = company_name.trim();
        let target_audience = target_audience.trim();
        if company_name.is_empty() || target_audience.is_empty() {
            return Err(CoreError::Validation(
                "Both company name and target audience are required".into(),
            )
            .into());
        }

        let created_at = Utc::now();

        tracing::info!(stage = ?Stage::Research, company = company_name, "Starting research phase");
        let report = self
            .research
            .execute(&ResearchInput {
                company_name: company_name.to_string(),
                target_audience: target_audience.to_string(),
            })
            .await?;
        let research_results = report.to_text();

        tracing::info!(stage = ?Stage::Marketing, "Starting marketing strategy phase");
        let summary = parse_research_results(&research_results);
        let marketing_results = self
            .marketing
            .execute(&MarketingInput {
                company_summary: summary.company_summary.clone(),
                target_audience: target_audience.to_string(),
                brand_values: summary.analysis,
            })
            .await?;

        let ideas = parse_campaign_details(&marketing_results);
        if ideas.is_empty() {
            return Err(PipelineError::NoCampaignIdeas);
        }

        tracing::info!(
            stage = ?Stage::Campaign,
            ideas = ideas.len(),
            "Starting ad generation phase"
        );
        let brand_info = if summary.company_summary.is_empty() {
            company_name.to_string()
        } else {
            summary.company_summary
        };
        let campaign_results = self
            .orchestrator
            .generate_campaigns(&AdGenInput {
                brand_info,
                target_audience: target_audience.to_string(),
                campaign_goals: self.campaign_goals.clone(),
                briefs: ideas.iter().map(|idea| idea.to_brief()).collect(),
            })
            .await?;

        tracing::info!(
            company = company_name,
            campaigns = campaign_results.len(),
            "Campaign flow complete"
        );
        Ok(CampaignRecord {
            id: Uuid::new_v4(),
            company_name: company_name.to_string(),
            target_audience: target_audience.to_string(),
            created_at,
            research_results,
            marketing_results,
            campaign_results,
        })
    }
}
