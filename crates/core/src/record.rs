//! Ad-generation outputs and the persisted campaign record.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::campaign::CampaignBrief;
use crate::types::{RecordId, Timestamp};

/// Inputs and output of the strategy analysis step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyAnalysis {
    pub brand_info: String,
    pub target_audience: String,
    pub campaign_goals: String,
    /// Model-written analysis; empty until the step has run.
    #[serde(default)]
    pub analysis: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreativeDirection {
    pub direction: String,
}

/// Copy and prompts generated for one campaign brief.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdAssets {
    pub tagline: String,
    pub story: String,
    pub image_prompt: String,
    pub quality_check: Option<String>,
}

/// Where a campaign's assets were written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPaths {
    pub tagline: PathBuf,
    pub story: PathBuf,
    pub image: PathBuf,
    pub quality_check: Option<PathBuf>,
    pub details: PathBuf,
}

/// One campaign whose assets have been generated and saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCampaign {
    pub campaign_name: String,
    pub campaign_dir: PathBuf,
    pub assets: AssetPaths,
}

/// Generated asset paths plus their text content, as stored in
/// `campaign_details.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedAssetDetails {
    pub tagline: PathBuf,
    pub story: PathBuf,
    pub image: PathBuf,
    pub quality_check_path: Option<PathBuf>,
    pub tagline_content: String,
    pub story_content: String,
    pub image_prompt: String,
    pub quality_check: Option<String>,
}

/// Contents of a campaign directory's `campaign_details.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignDetails {
    #[serde(flatten)]
    pub brief: CampaignBrief,
    pub strategy_analysis: StrategyAnalysis,
    pub creative_direction: CreativeDirection,
    pub generated_assets: GeneratedAssetDetails,
}

/// The aggregated output of one end-to-end pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub id: RecordId,
    pub company_name: String,
    pub target_audience: String,
    pub created_at: Timestamp,
    pub research_results: String,
    pub marketing_results: String,
    pub campaign_results: Vec<GeneratedCampaign>,
}
