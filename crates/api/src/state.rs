use std::sync::Arc;

use advocate_pipeline::{CampaignFlow, CampaignStore};

use crate::config::ServerConfig;
use crate::sessions::SessionStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The research, marketing, and ad generation agents.
    pub flow: Arc<CampaignFlow>,
    /// Persists campaign records produced by full flow runs.
    pub store: CampaignStore,
    /// Interactive UI sessions.
    pub sessions: Arc<SessionStore>,
}
