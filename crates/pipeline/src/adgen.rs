//! Ad generation stage.
//!
//! Runs a strategy analysis and a creative direction once, then writes a
//! tagline, story, and image prompt for every brief and has each set
//! reviewed. A failed review triggers another round of asset generation,
//! bounded by `max_regenerations`.

use std::sync::Arc;

use advocate_core::campaign::CampaignBrief;
use advocate_core::prompts::{
    CREATIVE_DIRECTION, IMAGE_PROMPT_GENERATION, QUALITY_CHECK, STORY_GENERATION,
    STRATEGY_ANALYSIS, TAGLINE_GENERATION,
};
use advocate_core::record::{AdAssets, CreativeDirection, StrategyAnalysis};
use advocate_core::text::{quality_check_failed, truncate_text};
use advocate_genai::ChatModel;
use async_trait::async_trait;

use crate::agent::{ask, Agent};
use crate::error::PipelineError;

const NAME_PROMPT_CHARS: usize = 100;
const SUMMARY_PROMPT_CHARS: usize = 200;
const CONTEXT_PROMPT_CHARS: usize = 400;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdGenInput {
    pub brand_info: String,
    pub target_audience: String,
    pub campaign_goals: String,
    pub briefs: Vec<CampaignBrief>,
}

/// Everything the ad stage produced. `assets[i]` belongs to `briefs[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdGenOutput {
    pub strategy: StrategyAnalysis,
    pub direction: CreativeDirection,
    pub assets: Vec<AdAssets>,
}

pub struct AdGenAgent {
    llm: Arc<dyn ChatModel>,
    max_regenerations: u32,
}

impl AdGenAgent {
    pub fn new(llm: Arc<dyn ChatModel>, max_regenerations: u32) -> Self {
        Self {
            llm,
            max_regenerations,
        }
    }

    async fn analyze_strategy(
        &self,
        input: &AdGenInput,
    ) -> Result<StrategyAnalysis, PipelineError> {
        let analysis = ask(
            self.llm.as_ref(),
            &STRATEGY_ANALYSIS,
            &[
                ("brand_info", input.brand_info.as_str()),
                ("target_audience", input.target_audience.as_str()),
                ("campaign_goals", input.campaign_goals.as_str()),
            ],
        )
        .await?;

        Ok(StrategyAnalysis {
            brand_info: input.brand_info.clone(),
            target_audience: input.target_audience.clone(),
            campaign_goals: input.campaign_goals.clone(),
            analysis,
        })
    }

    async fn creative_direction(
        &self,
        strategy: &StrategyAnalysis,
    ) -> Result<CreativeDirection, PipelineError> {
        let direction = ask(
            self.llm.as_ref(),
            &CREATIVE_DIRECTION,
            &[("strategy_analysis", strategy.analysis.as_str())],
        )
        .await?;
        Ok(CreativeDirection { direction })
    }

    async fn generate_assets(&self, brief: &CampaignBrief) -> Result<AdAssets, PipelineError> {
        let copy_vars = [
            ("core_message", brief.core_message.as_str()),
            ("visual_theme", brief.visual_theme_description.as_str()),
            ("emotional_appeal", brief.key_emotional_appeal.as_str()),
        ];
        let tagline = ask(self.llm.as_ref(), &TAGLINE_GENERATION, &copy_vars).await?;
        let story = ask(self.llm.as_ref(), &STORY_GENERATION, &copy_vars).await?;

        let prompts = image_prompt_parts(brief);
        let image_prompt = ask(
            self.llm.as_ref(),
            &IMAGE_PROMPT_GENERATION,
            &[
                ("summary_prompt", prompts.summary.as_str()),
                ("product_prompt", prompts.product.as_str()),
                ("brand_prompt", prompts.brand.as_str()),
                ("social_prompt", prompts.social.as_str()),
            ],
        )
        .await?;

        Ok(AdAssets {
            tagline,
            story,
            image_prompt,
            quality_check: None,
        })
    }

    async fn quality_check(&self, assets: &mut AdAssets) -> Result<(), PipelineError> {
        let review = ask(
            self.llm.as_ref(),
            &QUALITY_CHECK,
            &[
                ("tagline", assets.tagline.as_str()),
                ("story", assets.story.as_str()),
                ("image_prompt", assets.image_prompt.as_str()),
            ],
        )
        .await?;
        assets.quality_check = Some(review);
        Ok(())
    }

    /// One full round of asset generation and review over every brief.
    async fn generate_round(
        &self,
        briefs: &[CampaignBrief],
    ) -> Result<Vec<AdAssets>, PipelineError> {
        let mut round = Vec::with_capacity(briefs.len());
        for brief in briefs {
            tracing::debug!(campaign = %brief.campaign_name, "Generating assets");
            let mut assets = self.generate_assets(brief).await?;
            self.quality_check(&mut assets).await?;
            round.push(assets);
        }
        Ok(round)
    }
}

#[async_trait]
impl Agent for AdGenAgent {
    type Input = AdGenInput;
    type Output = AdGenOutput;

    async fn execute(&self, input: &AdGenInput) -> Result<AdGenOutput, PipelineError> {
        tracing::info!(briefs = input.briefs.len(), "Starting ad generation");

        let strategy = self.analyze_strategy(input).await?;
        let direction = self.creative_direction(&strategy).await?;

        let mut regenerations = 0;
        let assets = loop {
            let assets = self.generate_round(&input.briefs).await?;
            if !needs_regeneration(&assets) {
                break assets;
            }
            if regenerations >= self.max_regenerations {
                tracing::warn!(
                    regenerations,
                    "Quality check still failing, keeping the last round"
                );
                break assets;
            }
            regenerations += 1;
            tracing::warn!(regenerations, "Quality check failed, regenerating assets");
        };

        tracing::info!(assets = assets.len(), "Ad generation complete");
        Ok(AdGenOutput {
            strategy,
            direction,
            assets,
        })
    }
}

/// True when any reviewed asset set was flagged by its quality check.
fn needs_regeneration(assets: &[AdAssets]) -> bool {
    assets
        .iter()
        .filter_map(|a| a.quality_check.as_deref())
        .any(quality_check_failed)
}

// ---------------------------------------------------------------------------
// Image prompt inputs
// ---------------------------------------------------------------------------

struct ImagePromptParts {
    summary: String,
    product: String,
    brand: String,
    social: String,
}

/// Clamp the brief's fields into the image prompt inputs.
///
/// Briefs carry no product-focused suggestion of their own, so the visual
/// suggestion stands in for it when it is empty.
fn image_prompt_parts(brief: &CampaignBrief) -> ImagePromptParts {
    let suggestions = &brief.prompt_suggestions;
    let name = truncate_text(&brief.campaign_name, NAME_PROMPT_CHARS);
    let product = if suggestions.product_focused.trim().is_empty() {
        &suggestions.visual_focused
    } else {
        &suggestions.product_focused
    };

    ImagePromptParts {
        summary: truncate_text(
            &format!("{name}: {}", brief.core_message),
            SUMMARY_PROMPT_CHARS,
        ),
        product: truncate_text(product, CONTEXT_PROMPT_CHARS),
        brand: truncate_text(&suggestions.brand_focused, CONTEXT_PROMPT_CHARS),
        social: truncate_text(&suggestions.social_media, CONTEXT_PROMPT_CHARS),
    }
}
