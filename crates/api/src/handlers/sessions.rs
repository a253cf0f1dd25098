//! Handlers for the `/sessions` resource.
//!
//! A session drives the UI workflow one stage at a time: research, then
//! marketing, then asset generation for individual campaign ideas. Model
//! calls run against a snapshot of the session; results are written back
//! once the call returns.

use std::path::Path as FsPath;

use advocate_core::campaign::{parse_campaign_details, CampaignIdea};
use advocate_core::error::CoreError;
use advocate_core::record::GeneratedCampaign;
use advocate_core::research::parse_research_results;
use advocate_core::types::RecordId;
use advocate_pipeline::{Agent, MarketingInput, ResearchInput};
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::bundle::{build_asset_bundle, bundle_file_name};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::sessions::{
    marketing_cache_key, research_cache_key, CacheEntry, CacheSource, Session, SessionView,
};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ResearchRequest {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub target_audience: String,
    /// Ignore any cached result and run the stage again.
    #[serde(default)]
    pub force_new: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct MarketingRequest {
    #[serde(default)]
    pub force_new: bool,
}

/// Result of a research or marketing run.
#[derive(Debug, Serialize)]
pub struct StageResponse {
    #[serde(flatten)]
    pub entry: CacheEntry,
    /// Whether the result came from the session cache.
    pub cached: bool,
    pub session: SessionView,
}

/// A parsed campaign idea as shown on a campaign card.
#[derive(Debug, Serialize)]
pub struct CampaignCard {
    pub index: usize,
    #[serde(flatten)]
    pub idea: CampaignIdea,
    pub assets_generated: bool,
}

/// Generated assets for one campaign, ready for display.
#[derive(Debug, Serialize)]
pub struct CampaignAssetsView {
    pub index: usize,
    pub campaign_name: String,
    pub tagline: String,
    pub story: String,
    pub quality_check: Option<String>,
    /// URL of the image under `/outputs`, when it lies in the output directory.
    pub image_url: Option<String>,
    pub download_url: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/sessions
pub async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<DataResponse<SessionView>>) {
    let session = state.sessions.create().await;
    (
        StatusCode::CREATED,
        Json(DataResponse {
            data: session.view(),
        }),
    )
}

/// GET /api/v1/sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Json<DataResponse<SessionView>>> {
    let session = state.sessions.get(id).await?;
    Ok(Json(DataResponse {
        data: session.view(),
    }))
}

/// POST /api/v1/sessions/{id}/research
///
/// Results are cached per company and audience.
pub async fn run_research(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(input): Json<ResearchRequest>,
) -> AppResult<Json<DataResponse<StageResponse>>> {
    let company = input.company_name.trim();
    let audience = input.target_audience.trim();
    if company.is_empty() || audience.is_empty() {
        return Err(CoreError::Validation(
            "Please enter both company name and target audience".into(),
        )
        .into());
    }

    let session = state.sessions.get(id).await?;
    let key = research_cache_key(company, audience);
    let (entry, cached) = match session.research_cache.get(&key) {
        Some(entry) if !input.force_new => (entry.clone(), true),
        _ => {
            state.sessions.update(id, Session::begin_research).await?;
            let report = state
                .flow
                .research()
                .execute(&ResearchInput {
                    company_name: company.to_string(),
                    target_audience: audience.to_string(),
                })
                .await?;
            (CacheEntry::new(report.to_text(), CacheSource::NewResearch), false)
        }
    };
    tracing::info!(session_id = %id, company, cached, "Research stage finished");

    let view = state
        .sessions
        .update(id, |s| {
            s.record_research(company, audience, entry.clone());
            s.view()
        })
        .await?;

    Ok(Json(DataResponse {
        data: StageResponse {
            entry,
            cached,
            session: view,
        },
    }))
}

/// POST /api/v1/sessions/{id}/marketing
///
/// Builds on the latest research result. Results are cached per company.
pub async fn run_marketing(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(input): Json<MarketingRequest>,
) -> AppResult<Json<DataResponse<StageResponse>>> {
    let session = state.sessions.get(id).await?;
    let research = session
        .latest_research()
        .cloned()
        .ok_or_else(|| AppError::BadRequest("Please complete the research phase first".into()))?;

    let key = marketing_cache_key(&research.company);
    let (entry, cached) = match session.marketing_cache.get(&key) {
        Some(entry) if !input.force_new => (entry.clone(), true),
        _ => {
            let summary = parse_research_results(&research.result);
            let ideas = state
                .flow
                .marketing()
                .execute(&MarketingInput {
                    company_summary: summary.company_summary,
                    target_audience: session.audience.clone(),
                    brand_values: summary.analysis,
                })
                .await?;
            (CacheEntry::new(ideas, CacheSource::NewAnalysis), false)
        }
    };
    tracing::info!(
        session_id = %id,
        company = %research.company,
        cached,
        "Marketing stage finished"
    );

    let view = state
        .sessions
        .update(id, |s| {
            s.record_marketing(&research.company, entry.clone());
            s.view()
        })
        .await?;

    Ok(Json(DataResponse {
        data: StageResponse {
            entry,
            cached,
            session: view,
        },
    }))
}

/// GET /api/v1/sessions/{id}/campaigns
pub async fn list_campaigns(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Json<DataResponse<Vec<CampaignCard>>>> {
    let session = state.sessions.get(id).await?;
    let cards = current_ideas(&session)?
        .into_iter()
        .enumerate()
        .map(|(index, idea)| CampaignCard {
            index,
            idea,
            assets_generated: session.ad_assets.contains_key(&index),
        })
        .collect();
    Ok(Json(DataResponse { data: cards }))
}

/// POST /api/v1/sessions/{id}/campaigns/{index}/assets
///
/// Runs the ad stage for one campaign idea and keeps the result in the
/// session for download.
pub async fn generate_assets(
    State(state): State<AppState>,
    Path((id, index)): Path<(RecordId, usize)>,
) -> AppResult<Json<DataResponse<CampaignAssetsView>>> {
    let session = state.sessions.get(id).await?;
    let ideas = current_ideas(&session)?;
    let marketing_at = session.current_marketing().map(|entry| entry.timestamp);
    let idea = ideas.get(index).ok_or_else(|| CoreError::NotFound {
        entity: "Campaign",
        id: index.to_string(),
    })?;

    let brand_info = session
        .latest_research()
        .map(|r| parse_research_results(&r.result).company_summary)
        .filter(|summary| !summary.is_empty())
        .unwrap_or_else(|| session.company.clone());

    let campaign = state
        .flow
        .orchestrator()
        .generate_single_campaign(
            &idea.to_brief(),
            &brand_info,
            &session.audience,
            state.flow.campaign_goals(),
        )
        .await?;
    let view = assets_view(&id, index, &campaign, state.flow.output_dir()).await?;

    // A marketing rerun while the assets were generated renumbers the ideas.
    state
        .sessions
        .update(id, |s| {
            if s.current_marketing().map(|entry| entry.timestamp) != marketing_at {
                return Err(CoreError::Conflict(
                    "Marketing results changed while assets were generated; please generate again"
                        .into(),
                ));
            }
            s.ad_assets.insert(index, campaign);
            Ok(())
        })
        .await??;

    Ok(Json(DataResponse { data: view }))
}

/// GET /api/v1/sessions/{id}/campaigns/{index}/download
///
/// Zip of the campaign's image, tagline, and story.
pub async fn download_assets(
    State(state): State<AppState>,
    Path((id, index)): Path<(RecordId, usize)>,
) -> AppResult<impl IntoResponse> {
    let session = state.sessions.get(id).await?;
    let campaign = session
        .ad_assets
        .get(&index)
        .ok_or_else(|| CoreError::NotFound {
            entity: "Campaign assets",
            id: index.to_string(),
        })?;

    let n = index + 1;
    let bytes = build_asset_bundle(n, campaign).await?;

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, "application/zip".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", bundle_file_name(n)),
            ),
        ],
        bytes,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Campaign ideas parsed from the session's current marketing result.
fn current_ideas(session: &Session) -> AppResult<Vec<CampaignIdea>> {
    let marketing = session
        .current_marketing()
        .ok_or_else(|| AppError::BadRequest("Please run the marketing analysis first".into()))?;
    Ok(parse_campaign_details(&marketing.result))
}

async fn assets_view(
    session_id: &RecordId,
    index: usize,
    campaign: &GeneratedCampaign,
    output_dir: &FsPath,
) -> AppResult<CampaignAssetsView> {
    let assets = &campaign.assets;
    let quality_check = match &assets.quality_check {
        Some(path) => Some(read_text(path).await?),
        None => None,
    };

    Ok(CampaignAssetsView {
        index,
        campaign_name: campaign.campaign_name.clone(),
        tagline: read_text(&assets.tagline).await?,
        story: read_text(&assets.story).await?,
        quality_check,
        image_url: output_url(output_dir, &assets.image),
        download_url: format!("/api/v1/sessions/{session_id}/campaigns/{index}/download"),
    })
}

async fn read_text(path: &FsPath) -> AppResult<String> {
    tokio::fs::read_to_string(path)
        .await
        .map(|text| text.trim().to_string())
        .map_err(|e| AppError::InternalError(format!("Failed to read {}: {e}", path.display())))
}

/// `/outputs/...` URL for a file inside the output directory.
pub fn output_url(output_dir: &FsPath, file: &FsPath) -> Option<String> {
    let relative = file.strip_prefix(output_dir).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(format!("/outputs/{}", parts.join("/")))
}
