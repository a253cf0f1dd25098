//! `advocate-flow`: run the whole campaign pipeline from the command line
//! and save the campaign record as JSON.

use std::path::PathBuf;
use std::sync::Arc;

use advocate_genai::{
    ChatConfig, ImageConfig, OpenAiChat, OpenAiImages, SearchConfig, TavilySearch, WebSearch,
};
use advocate_pipeline::{CampaignFlow, CampaignStore, PipelineConfig};
use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "advocate-flow")]
#[command(about = "Run end-to-end campaign generation flow")]
#[command(version)]
struct Cli {
    /// Name of the company
    company_name: String,

    /// Description of target audience
    target_audience: String,

    /// Output file to save results (default: a timestamped file in OUTPUT_DIR)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "advocate_flow=info,advocate_pipeline=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = PipelineConfig::from_env().context("Invalid pipeline configuration")?;
    let llm = OpenAiChat::new(ChatConfig::from_env()?)?;
    let images = OpenAiImages::new(ImageConfig::from_env()?)?;
    let search: Option<Arc<dyn WebSearch>> = match SearchConfig::from_env()? {
        Some(search_config) => {
            let client: Arc<dyn WebSearch> = Arc::new(TavilySearch::new(search_config)?);
            Some(client)
        }
        None => None,
    };

    let flow = CampaignFlow::new(Arc::new(llm), Arc::new(images), search, &config);
    let record = flow
        .run(&cli.company_name, &cli.target_audience)
        .await
        .context("Campaign flow failed")?;

    tracing::info!("=== Research Results ===\n{}", record.research_results);
    tracing::info!("=== Marketing Campaign Ideas ===\n{}", record.marketing_results);
    for campaign in &record.campaign_results {
        tracing::info!(
            campaign = %campaign.campaign_name,
            dir = %campaign.campaign_dir.display(),
            "Campaign assets generated"
        );
    }

    let path = CampaignStore::new(&config.output_dir)
        .save(&record, cli.output.as_deref())
        .await
        .context("Failed to save campaign record")?;
    tracing::info!(path = %path.display(), "Results saved");

    Ok(())
}
