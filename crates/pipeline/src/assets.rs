//! Runs the ad stage and writes each campaign's assets to disk.
//!
//! Every campaign gets its own directory under the output root:
//!
//! ```text
//! {output_dir}/{Campaign_Name}_{YYYYmmdd_HHMMSS}/
//!     tagline.txt
//!     story.txt
//!     quality_check.txt
//!     campaign_image.{png,jpg,webp}
//!     campaign_details.json
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use advocate_core::campaign::CampaignBrief;
use advocate_core::error::CoreError;
use advocate_core::naming::campaign_dir_name;
use advocate_core::record::{
    AdAssets, AssetPaths, CampaignDetails, CreativeDirection, GeneratedAssetDetails,
    GeneratedCampaign, StrategyAnalysis,
};
use advocate_genai::ImageGenerator;
use chrono::Utc;
use tokio::fs;

use crate::adgen::{AdGenAgent, AdGenInput};
use crate::agent::Agent;
use crate::error::PipelineError;

pub const TAGLINE_FILE: &str = "tagline.txt";
pub const STORY_FILE: &str = "story.txt";
pub const QUALITY_CHECK_FILE: &str = "quality_check.txt";
pub const DETAILS_FILE: &str = "campaign_details.json";
pub const IMAGE_FILE_STEM: &str = "campaign_image";

pub struct CampaignOrchestrator {
    adgen: AdGenAgent,
    images: Arc<dyn ImageGenerator>,
    output_dir: PathBuf,
}

impl CampaignOrchestrator {
    pub fn new(
        adgen: AdGenAgent,
        images: Arc<dyn ImageGenerator>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            adgen,
            images,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Generate and save assets for every brief in `input`.
    pub async fn generate_campaigns(
        &self,
        input: &AdGenInput,
    ) -> Result<Vec<GeneratedCampaign>, PipelineError> {
        let output = self.adgen.execute(input).await?;

        let mut campaigns = Vec::with_capacity(output.assets.len());
        for (brief, assets) in input.briefs.iter().zip(&output.assets) {
            let campaign = self
                .save_campaign(brief, assets, &output.strategy, &output.direction)
                .await?;
            campaigns.push(campaign);
        }
        Ok(campaigns)
    }

    /// Run the whole ad stage for a single brief.
    pub async fn generate_single_campaign(
        &self,
        brief: &CampaignBrief,
        brand_info: &str,
        target_audience: &str,
        campaign_goals: &str,
    ) -> Result<GeneratedCampaign, PipelineError> {
        let input = AdGenInput {
            brand_info: brand_info.to_string(),
            target_audience: target_audience.to_string(),
            campaign_goals: campaign_goals.to_string(),
            briefs: vec![brief.clone()],
        };

        self.generate_campaigns(&input).await?.pop().ok_or_else(|| {
            CoreError::Internal(format!(
                "No assets were generated for campaign '{}'",
                brief.campaign_name
            ))
            .into()
        })
    }

    async fn save_campaign(
        &self,
        brief: &CampaignBrief,
        assets: &AdAssets,
        strategy: &StrategyAnalysis,
        direction: &CreativeDirection,
    ) -> Result<GeneratedCampaign, PipelineError> {
        let campaign_dir = create_campaign_dir(&self.output_dir, &brief.campaign_name).await?;

        let tagline = campaign_dir.join(TAGLINE_FILE);
        fs::write(&tagline, &assets.tagline).await?;

        let story = campaign_dir.join(STORY_FILE);
        fs::write(&story, &assets.story).await?;

        let quality_check = match &assets.quality_check {
            Some(review) => {
                let path = campaign_dir.join(QUALITY_CHECK_FILE);
                fs::write(&path, review).await?;
                Some(path)
            }
            None => None,
        };

        let generated = self.images.generate(&assets.image_prompt).await?;
        let image = campaign_dir.join(format!("{IMAGE_FILE_STEM}.{}", generated.extension));
        fs::write(&image, &generated.bytes).await?;
        tracing::debug!(
            path = %image.display(),
            width = generated.width,
            height = generated.height,
            "Campaign image saved"
        );

        let details = CampaignDetails {
            brief: brief.clone(),
            strategy_analysis: strategy.clone(),
            creative_direction: direction.clone(),
            generated_assets: GeneratedAssetDetails {
                tagline: tagline.clone(),
                story: story.clone(),
                image: image.clone(),
                quality_check_path: quality_check.clone(),
                tagline_content: assets.tagline.clone(),
                story_content: assets.story.clone(),
                image_prompt: assets.image_prompt.clone(),
                quality_check: assets.quality_check.clone(),
            },
        };
        let details_path = campaign_dir.join(DETAILS_FILE);
        fs::write(&details_path, serde_json::to_vec_pretty(&details)?).await?;

        tracing::info!(
            campaign = %brief.campaign_name,
            dir = %campaign_dir.display(),
            "Campaign assets saved"
        );

        Ok(GeneratedCampaign {
            campaign_name: brief.campaign_name.clone(),
            campaign_dir,
            assets: AssetPaths {
                tagline,
                story,
                image,
                quality_check,
                details: details_path,
            },
        })
    }
}

/// Create a fresh directory for a campaign.
///
/// Two campaigns with the same name saved within one second would share a
/// timestamped name, so later ones get a numeric suffix.
async fn create_campaign_dir(output_dir: &Path, campaign_name: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(output_dir).await?;

    let base = campaign_dir_name(campaign_name, Utc::now());
    let mut candidate = output_dir.join(&base);
    let mut suffix = 1;
    loop {
        match fs::create_dir(&candidate).await {
            Ok(()) => return Ok(candidate),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                suffix += 1;
                candidate = output_dir.join(format!("{base}_{suffix}"));
            }
            Err(e) => return Err(e),
        }
    }
}
