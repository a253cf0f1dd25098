//! Handler for running the whole pipeline in one request.

use std::path::PathBuf;

use advocate_core::record::CampaignRecord;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FlowRequest {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub target_audience: String,
}

#[derive(Debug, Serialize)]
pub struct FlowResponse {
    #[serde(flatten)]
    pub record: CampaignRecord,
    /// Where the campaign record JSON was written.
    pub record_path: PathBuf,
}

/// POST /api/v1/flows
///
/// Runs research, marketing, and ad generation for every idea, then
/// persists the campaign record.
pub async fn run_flow(
    State(state): State<AppState>,
    Json(input): Json<FlowRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<FlowResponse>>)> {
    let record = state
        .flow
        .run(&input.company_name, &input.target_audience)
        .await?;
    let record_path = state.store.save(&record, None).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: FlowResponse {
                record,
                record_path,
            },
        }),
    ))
}
