//! The campaign generation pipeline.
//!
//! Three agents run strictly in sequence, each one a set of prompt
//! templates sent to a [`ChatModel`](advocate_genai::ChatModel):
//!
//! 1. [`ResearchAgent`] writes a research report on the company.
//! 2. [`MarketingAgent`] turns the report into campaign ideas.
//! 3. [`AdGenAgent`] writes copy and image prompts per idea, which the
//!    [`CampaignOrchestrator`] renders and saves to disk.
//!
//! [`CampaignFlow`] chains all three and [`CampaignStore`] persists the
//! resulting [`CampaignRecord`](advocate_core::record::CampaignRecord).

pub mod adgen;
pub mod agent;
pub mod assets;
pub mod config;
pub mod error;
pub mod flow;
pub mod marketing;
pub mod research;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use adgen::{AdGenAgent, AdGenInput, AdGenOutput};
pub use agent::Agent;
pub use assets::CampaignOrchestrator;
pub use config::PipelineConfig;
pub use error::PipelineError;
pub use flow::CampaignFlow;
pub use marketing::{MarketingAgent, MarketingInput};
pub use research::{ResearchAgent, ResearchInput};
pub use store::CampaignStore;
