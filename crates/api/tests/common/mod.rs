#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use advocate_api::config::ServerConfig;
use advocate_api::router::build_app_router;
use advocate_api::sessions::SessionStore;
use advocate_api::state::AppState;
use advocate_core::chat::{ChatMessage, ChatRole};
use advocate_genai::{ChatModel, GenAiError, GeneratedImage, ImageGenerator};
use advocate_pipeline::{CampaignFlow, CampaignStore, PipelineConfig};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

pub const CAMPAIGN_IDEAS: &str = "Campaign Idea 1:
1. Campaign Name: Green Pulse
2. Core Message: Sustainable energy for every home.
3. Visual Theme Description: Bright greens and sunlit rooftops.
4. Key Emotional Appeal: Pride.
5. Social Media Focus: Instagram reels.
6. Campaign Timeline: 8 weeks.
7. Success Metrics: reach, sign-ups
8. Budget Allocation: 60% social
9. Risk Mitigation: verify claims.

Campaign Idea 2:
1. Campaign Name: Night Shift
2. Core Message: Power that never sleeps.
";

/// Chat model that answers by matching a fragment of the system prompt.
pub struct ScriptedChat {
    rules: Vec<(&'static str, String)>,
    calls: Mutex<Vec<String>>,
    fail: bool,
    delay: Option<Duration>,
}

impl ScriptedChat {
    pub fn pipeline() -> Self {
        let rules = vec![
            ("market research analyst", "1. Who buys solar?".to_string()),
            ("research assistant", "Solara sells rooftop solar kits.".to_string()),
            ("strategic analyst", "Values: sustainability.".to_string()),
            ("creative marketing director", CAMPAIGN_IDEAS.to_string()),
            ("impactful advertising taglines", "Power your tomorrow.".to_string()),
            ("brand storytelling", "A family installs panels.".to_string()),
            ("art director", "Sunlit rooftop.".to_string()),
            ("quality assurance", "Consistent and on brand.".to_string()),
        ];
        Self {
            rules,
            calls: Mutex::new(Vec::new()),
            fail: false,
            delay: None,
        }
    }

    pub fn failing() -> Self {
        Self {
            rules: Vec::new(),
            calls: Mutex::new(Vec::new()),
            fail: true,
            delay: None,
        }
    }

    /// Wait `delay` before answering each call.
    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of calls whose system prompt contains `needle`.
    pub fn count(&self, needle: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|system| system.contains(needle))
            .count()
    }
}

#[async_trait]
impl ChatModel for ScriptedChat {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, GenAiError> {
        let system: String = messages
            .iter()
            .filter(|m| m.role == ChatRole::System)
            .map(|m| m.content.as_str())
            .collect();
        self.calls.lock().unwrap().push(system.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(GenAiError::Api {
                status: 401,
                body: "invalid api key sk-secret".into(),
            });
        }
        Ok(self
            .rules
            .iter()
            .find(|(needle, _)| system.contains(needle))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| "ok".to_string()))
    }
}

/// Image generator returning fixed bytes, optionally after a delay.
#[derive(Default)]
pub struct FakeImages {
    pub delay: Option<Duration>,
}

#[async_trait]
impl ImageGenerator for FakeImages {
    async fn generate(&self, _prompt: &str) -> Result<GeneratedImage, GenAiError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(GeneratedImage {
            bytes: b"png bytes".to_vec(),
            extension: "png",
            width: 1,
            height: 1,
        })
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
    }
}

/// A router plus the temporary output directory it writes into.
pub struct TestApp {
    pub router: Router,
    pub llm: Arc<ScriptedChat>,
    pub output_dir: PathBuf,
    _tmp: TempDir,
}

/// Build the full application router with fake AI services.
///
/// Uses the same [`build_app_router`] as `main.rs` so integration tests
/// exercise the production middleware stack.
pub fn build_test_app() -> TestApp {
    build_test_app_with(ScriptedChat::pipeline())
}

pub fn build_test_app_with(llm: ScriptedChat) -> TestApp {
    build_test_app_with_images(llm, FakeImages::default())
}

pub fn build_test_app_with_images(llm: ScriptedChat, images: FakeImages) -> TestApp {
    let tmp = tempfile::tempdir().unwrap();
    let output_dir = tmp.path().join("Outputs");
    let llm = Arc::new(llm);

    let pipeline_config = PipelineConfig {
        output_dir: output_dir.clone(),
        ..Default::default()
    };
    let flow = CampaignFlow::new(llm.clone(), Arc::new(images), None, &pipeline_config);
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        flow: Arc::new(flow),
        store: CampaignStore::new(output_dir.clone()),
        sessions: Arc::new(SessionStore::new()),
    };

    TestApp {
        router: build_app_router(state, &config),
        llm,
        output_dir,
        _tmp: tmp,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: &TestApp, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn post_empty(app: &TestApp, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn post_json(app: &TestApp, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Create a session and return its id.
pub async fn create_session(app: &TestApp) -> String {
    let json = body_json(post_empty(app, "/api/v1/sessions").await).await;
    json["data"]["id"].as_str().unwrap().to_string()
}
