//! Workflow stages of an interactive campaign session.

use serde::{Deserialize, Serialize};

/// Where a session currently is in the research → marketing → campaign
/// workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Start,
    Research,
    Marketing,
    Campaign,
}

impl Stage {
    /// Progress percentage shown in the UI for this stage.
    pub fn progress(self) -> u8 {
        match self {
            Stage::Start => 0,
            Stage::Research => 33,
            Stage::Marketing => 66,
            Stage::Campaign => 100,
        }
    }
}
