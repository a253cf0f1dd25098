use std::path::PathBuf;

use advocate_core::config::{env_or, env_parse};
use advocate_core::error::CoreError;

pub const DEFAULT_OUTPUT_DIR: &str = "Outputs";
pub const DEFAULT_MAX_REGENERATIONS: u32 = 1;
pub const DEFAULT_CAMPAIGN_GOALS: &str = "Increase brand awareness and drive product adoption";

/// Pipeline settings shared by the server and the CLI.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root directory for campaign asset folders and campaign records.
    pub output_dir: PathBuf,
    /// How many times assets are regenerated after a failed quality check.
    pub max_regenerations: u32,
    /// Goals handed to the strategy analysis step.
    pub campaign_goals: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            max_regenerations: DEFAULT_MAX_REGENERATIONS,
            campaign_goals: DEFAULT_CAMPAIGN_GOALS.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var             | Default                                                |
    /// |---------------------|--------------------------------------------------------|
    /// | `OUTPUT_DIR`        | `Outputs`                                              |
    /// | `MAX_REGENERATIONS` | `1`                                                    |
    /// | `CAMPAIGN_GOALS`    | `Increase brand awareness and drive product adoption`  |
    pub fn from_env() -> Result<Self, CoreError> {
        Ok(Self {
            output_dir: PathBuf::from(env_or("OUTPUT_DIR", DEFAULT_OUTPUT_DIR)),
            max_regenerations: env_parse("MAX_REGENERATIONS", DEFAULT_MAX_REGENERATIONS)?,
            campaign_goals: env_or("CAMPAIGN_GOALS", DEFAULT_CAMPAIGN_GOALS),
        })
    }
}
