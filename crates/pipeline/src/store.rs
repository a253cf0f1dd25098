//! Campaign record persistence as pretty-printed JSON files.

use std::path::{Path, PathBuf};

use advocate_core::naming::record_file_name;
use advocate_core::record::CampaignRecord;
use tokio::fs;

use crate::error::PipelineError;

#[derive(Debug, Clone)]
pub struct CampaignStore {
    output_dir: PathBuf,
}

impl CampaignStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Default location for a record:
    /// `{output_dir}/campaign_{company}_{YYYYmmdd_HHMMSS}.json`.
    pub fn default_path(&self, record: &CampaignRecord) -> PathBuf {
        self.output_dir
            .join(record_file_name(&record.company_name, record.created_at))
    }

    /// Write `record` to `path` (or its default path), creating parent
    /// directories. An existing file is overwritten.
    pub async fn save(
        &self,
        record: &CampaignRecord,
        path: Option<&Path>,
    ) -> Result<PathBuf, PipelineError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => self.default_path(record),
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&path, serde_json::to_vec_pretty(record)?).await?;
        tracing::info!(id = %record.id, path = %path.display(), "Campaign record saved");
        Ok(path)
    }

    pub async fn load(path: &Path) -> Result<CampaignRecord, PipelineError> {
        let raw = fs::read(path).await?;
        Ok(serde_json::from_slice(&raw)?)
    }
}
