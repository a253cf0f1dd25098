//! In-memory UI sessions.
//!
//! A session walks one user through research, marketing, and per-campaign
//! asset generation. Stage results are cached per session so revisiting a
//! stage does not call the models again unless a fresh run is requested.

use std::collections::{BTreeMap, HashMap};

use advocate_core::error::CoreError;
use advocate_core::record::GeneratedCampaign;
use advocate_core::stage::Stage;
use advocate_core::types::{RecordId, Timestamp};
use chrono::Utc;
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Session data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheSource {
    NewResearch,
    NewAnalysis,
}

/// A cached stage result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheEntry {
    pub result: String,
    pub timestamp: Timestamp,
    pub source: CacheSource,
}

impl CacheEntry {
    pub fn new(result: String, source: CacheSource) -> Self {
        Self {
            result,
            timestamp: Utc::now(),
            source,
        }
    }
}

/// One completed research request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResearchHistoryEntry {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub company: String,
    pub audience: String,
    pub result: String,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub id: RecordId,
    pub created_at: Timestamp,
    pub stage: Stage,
    pub company: String,
    pub audience: String,
    pub research_cache: HashMap<String, CacheEntry>,
    pub marketing_cache: HashMap<String, CacheEntry>,
    pub research_history: Vec<ResearchHistoryEntry>,
    /// Generated campaigns keyed by campaign idea index.
    pub ad_assets: BTreeMap<usize, GeneratedCampaign>,
}

pub fn research_cache_key(company: &str, audience: &str) -> String {
    format!("{company}_{audience}")
}

pub fn marketing_cache_key(company: &str) -> String {
    format!("marketing_{company}")
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            stage: Stage::Start,
            company: String::new(),
            audience: String::new(),
            research_cache: HashMap::new(),
            marketing_cache: HashMap::new(),
            research_history: Vec::new(),
            ad_assets: BTreeMap::new(),
        }
    }

    pub fn latest_research(&self) -> Option<&ResearchHistoryEntry> {
        self.research_history.last()
    }

    /// The marketing result for the session's current company.
    pub fn current_marketing(&self) -> Option<&CacheEntry> {
        self.marketing_cache.get(&marketing_cache_key(&self.company))
    }

    /// Mark the session as researching while a fresh research run is in
    /// flight.
    pub fn begin_research(&mut self) {
        self.stage = Stage::Research;
    }

    /// Record a research result and move on to the marketing stage.
    pub fn record_research(&mut self, company: &str, audience: &str, entry: CacheEntry) {
        self.company = company.to_string();
        self.audience = audience.to_string();
        self.research_history.push(ResearchHistoryEntry {
            kind: "research",
            company: company.to_string(),
            audience: audience.to_string(),
            result: entry.result.clone(),
            timestamp: entry.timestamp,
        });
        self.research_cache
            .insert(research_cache_key(company, audience), entry);
        self.stage = Stage::Marketing;
    }

    /// Record a marketing result and move on to the campaign stage.
    ///
    /// Assets generated from an earlier marketing result no longer match
    /// the campaign indices and are dropped.
    pub fn record_marketing(&mut self, company: &str, entry: CacheEntry) {
        let key = marketing_cache_key(company);
        if self.marketing_cache.get(&key) != Some(&entry) {
            self.ad_assets.clear();
        }
        self.marketing_cache.insert(key, entry);
        self.stage = Stage::Campaign;
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            id: self.id,
            created_at: self.created_at,
            stage: self.stage,
            progress: self.stage.progress(),
            company: self.company.clone(),
            audience: self.audience.clone(),
            research_history: self.research_history.clone(),
            marketing: self.current_marketing().cloned(),
            generated_campaigns: self.ad_assets.keys().copied().collect(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// The client-facing projection of a [`Session`].
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: RecordId,
    pub created_at: Timestamp,
    pub stage: Stage,
    pub progress: u8,
    pub company: String,
    pub audience: String,
    pub research_history: Vec<ResearchHistoryEntry>,
    pub marketing: Option<CacheEntry>,
    /// Indices of campaign ideas that already have generated assets.
    pub generated_campaigns: Vec<usize>,
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Sessions keyed by id. Nothing is persisted across restarts.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<RecordId, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> Session {
        let session = Session::new();
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        tracing::info!(session_id = %session.id, "Session created");
        session
    }

    /// A snapshot of the session. Long-running work happens on the
    /// snapshot so the store is never locked across model calls.
    pub async fn get(&self, id: RecordId) -> Result<Session, CoreError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Apply `f` to the stored session and return its result.
    pub async fn update<T>(
        &self,
        id: RecordId,
        f: impl FnOnce(&mut Session) -> T,
    ) -> Result<T, CoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        Ok(f(session))
    }
}

fn not_found(id: RecordId) -> CoreError {
    CoreError::NotFound {
        entity: "Session",
        id: id.to_string(),
    }
}
