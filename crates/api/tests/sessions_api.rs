//! HTTP-level integration tests for the session workflow endpoints.

mod common;

use std::io::Cursor;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    body_bytes, body_json, create_session, get, post_empty, post_json, FakeImages, ScriptedChat,
    TestApp,
};
use serde_json::json;
use tower::ServiceExt;

async fn research(app: &TestApp, id: &str, force_new: bool) -> serde_json::Value {
    let response = post_json(
        app,
        &format!("/api/v1/sessions/{id}/research"),
        json!({
            "company_name": "Solara",
            "target_audience": "homeowners",
            "force_new": force_new,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

async fn marketing(app: &TestApp, id: &str) -> serde_json::Value {
    let response = post_json(app, &format!("/api/v1/sessions/{id}/marketing"), json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_session_returns_201_at_start() {
    let app = common::build_test_app();
    let response = post_empty(&app, "/api/v1/sessions").await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["stage"], "start");
    assert_eq!(json["data"]["progress"], 0);
    assert!(json["data"]["id"].is_string());
}

#[tokio::test]
async fn unknown_session_returns_404() {
    let app = common::build_test_app();
    let response = get(&app, "/api/v1/sessions/00000000-0000-0000-0000-000000000000").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Research
// ---------------------------------------------------------------------------

#[tokio::test]
async fn research_requires_company_and_audience() {
    let app = common::build_test_app();
    let id = create_session(&app).await;

    let response = post_json(
        &app,
        &format!("/api/v1/sessions/{id}/research"),
        json!({"company_name": "Solara", "target_audience": "  "}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(app.llm.count("market research analyst"), 0);
}

#[tokio::test]
async fn research_advances_session_and_records_history() {
    let app = common::build_test_app();
    let id = create_session(&app).await;

    let json = research(&app, &id, false).await;

    let data = &json["data"];
    assert_eq!(data["source"], "new_research");
    assert_eq!(data["cached"], false);
    assert!(data["result"]
        .as_str()
        .unwrap()
        .contains("Raw Findings:\nSolara sells rooftop solar kits."));
    assert_eq!(data["session"]["stage"], "marketing");
    assert_eq!(data["session"]["progress"], 66);
    assert_eq!(data["session"]["company"], "Solara");

    let session = body_json(get(&app, &format!("/api/v1/sessions/{id}")).await).await;
    let history = session["data"]["research_history"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["type"], "research");
    assert_eq!(history[0]["audience"], "homeowners");
}

#[tokio::test]
async fn session_shows_research_stage_while_research_runs() {
    let app = common::build_test_app_with(
        ScriptedChat::pipeline().slow(Duration::from_millis(100)),
    );
    let id = create_session(&app).await;

    let router = app.router.clone();
    let uri = format!("/api/v1/sessions/{id}/research");
    let running = tokio::spawn(async move {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(
                json!({"company_name": "Solara", "target_audience": "homeowners"}).to_string(),
            ))
            .unwrap();
        router.oneshot(request).await.unwrap()
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    let during = body_json(get(&app, &format!("/api/v1/sessions/{id}")).await).await;
    assert_eq!(during["data"]["stage"], "research");
    assert_eq!(during["data"]["progress"], 33);

    assert_eq!(running.await.unwrap().status(), StatusCode::OK);
    let after = body_json(get(&app, &format!("/api/v1/sessions/{id}")).await).await;
    assert_eq!(after["data"]["stage"], "marketing");
}

#[tokio::test]
async fn repeated_research_is_served_from_cache() {
    let app = common::build_test_app();
    let id = create_session(&app).await;

    research(&app, &id, false).await;
    let second = research(&app, &id, false).await;

    assert_eq!(second["data"]["cached"], true);
    assert_eq!(app.llm.count("market research analyst"), 1);

    let forced = research(&app, &id, true).await;
    assert_eq!(forced["data"]["cached"], false);
    assert_eq!(app.llm.count("market research analyst"), 2);
}

#[tokio::test]
async fn upstream_failure_returns_502() {
    let app = common::build_test_app_with(common::ScriptedChat::failing());
    let id = create_session(&app).await;

    let response = post_json(
        &app,
        &format!("/api/v1/sessions/{id}/research"),
        json!({"company_name": "Solara", "target_audience": "homeowners"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert!(!json["error"].as_str().unwrap().contains("sk-secret"));
}

// ---------------------------------------------------------------------------
// Marketing and campaigns
// ---------------------------------------------------------------------------

#[tokio::test]
async fn marketing_requires_research() {
    let app = common::build_test_app();
    let id = create_session(&app).await;

    let response = post_json(&app, &format!("/api/v1/sessions/{id}/marketing"), json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn marketing_produces_campaign_cards() {
    let app = common::build_test_app();
    let id = create_session(&app).await;
    research(&app, &id, false).await;

    let json = marketing(&app, &id).await;
    assert_eq!(json["data"]["source"], "new_analysis");
    assert_eq!(json["data"]["session"]["stage"], "campaign");
    assert_eq!(json["data"]["session"]["progress"], 100);

    let again = marketing(&app, &id).await;
    assert_eq!(again["data"]["cached"], true);
    assert_eq!(app.llm.count("creative marketing director"), 1);

    let cards = body_json(get(&app, &format!("/api/v1/sessions/{id}/campaigns")).await).await;
    let cards = cards["data"].as_array().unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0]["index"], 0);
    assert_eq!(cards[0]["name"], "Green Pulse");
    assert_eq!(cards[0]["success_metrics"], json!(["reach", "sign-ups"]));
    assert_eq!(cards[1]["name"], "Night Shift");
    assert_eq!(cards[1]["assets_generated"], false);
}

#[tokio::test]
async fn campaigns_require_marketing() {
    let app = common::build_test_app();
    let id = create_session(&app).await;
    research(&app, &id, false).await;

    let response = get(&app, &format!("/api/v1/sessions/{id}/campaigns")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Assets and download
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generate_assets_then_download_zip() {
    let app = common::build_test_app();
    let id = create_session(&app).await;
    research(&app, &id, false).await;
    marketing(&app, &id).await;

    let response = post_empty(&app, &format!("/api/v1/sessions/{id}/campaigns/1/assets")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let assets = body_json(response).await;
    let data = &assets["data"];
    assert_eq!(data["campaign_name"], "Night Shift");
    assert_eq!(data["tagline"], "Power your tomorrow.");
    assert_eq!(data["story"], "A family installs panels.");
    assert_eq!(data["quality_check"], "Consistent and on brand.");
    let image_url = data["image_url"].as_str().unwrap();
    assert!(image_url.starts_with("/outputs/Night_Shift_"));
    assert!(image_url.ends_with("/campaign_image.png"));

    // The image is served from the output directory.
    let image = get(&app, image_url).await;
    assert_eq!(image.status(), StatusCode::OK);
    assert_eq!(body_bytes(image).await, b"png bytes");

    let session = body_json(get(&app, &format!("/api/v1/sessions/{id}")).await).await;
    assert_eq!(session["data"]["generated_campaigns"], json!([1]));

    let download = get(&app, data["download_url"].as_str().unwrap()).await;
    assert_eq!(download.status(), StatusCode::OK);
    assert_eq!(download.headers()["content-type"], "application/zip");
    assert_eq!(
        download.headers()["content-disposition"],
        "attachment; filename=\"campaign_2_assets.zip\""
    );

    let bytes = body_bytes(download).await;
    let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut names: Vec<_> = archive.file_names().map(str::to_string).collect();
    names.sort();
    assert_eq!(
        names,
        [
            "campaign_2_image.png",
            "campaign_2_story.txt",
            "campaign_2_tagline.txt"
        ]
    );
}

#[tokio::test]
async fn marketing_rerun_during_generation_discards_stale_assets() {
    let app = common::build_test_app_with_images(
        ScriptedChat::pipeline(),
        FakeImages {
            delay: Some(Duration::from_millis(300)),
        },
    );
    let id = create_session(&app).await;
    research(&app, &id, false).await;
    marketing(&app, &id).await;

    let router = app.router.clone();
    let uri = format!("/api/v1/sessions/{id}/campaigns/0/assets");
    let generation = tokio::spawn(async move {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        router.oneshot(request).await.unwrap()
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    let rerun = post_json(
        &app,
        &format!("/api/v1/sessions/{id}/marketing"),
        json!({"force_new": true}),
    )
    .await;
    assert_eq!(rerun.status(), StatusCode::OK);
    let rerun = body_json(rerun).await;
    assert_eq!(rerun["data"]["session"]["generated_campaigns"], json!([]));

    let response = generation.await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");

    let session = body_json(get(&app, &format!("/api/v1/sessions/{id}")).await).await;
    assert_eq!(session["data"]["generated_campaigns"], json!([]));
    let download = get(&app, &format!("/api/v1/sessions/{id}/campaigns/0/download")).await;
    assert_eq!(download.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn assets_for_unknown_campaign_return_404() {
    let app = common::build_test_app();
    let id = create_session(&app).await;
    research(&app, &id, false).await;
    marketing(&app, &id).await;

    let response = post_empty(&app, &format!("/api/v1/sessions/{id}/campaigns/7/assets")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.llm.count("impactful advertising taglines"), 0);
}

#[tokio::test]
async fn download_before_generation_returns_404() {
    let app = common::build_test_app();
    let id = create_session(&app).await;

    let response = get(&app, &format!("/api/v1/sessions/{id}/campaigns/0/download")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}
