pub mod flows;
pub mod health;
pub mod sessions;
pub mod ui;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /sessions                                        create (POST)
/// /sessions/{id}                                   get
/// /sessions/{id}/research                          run research (POST)
/// /sessions/{id}/marketing                         run marketing (POST)
/// /sessions/{id}/campaigns                         parsed campaign ideas
/// /sessions/{id}/campaigns/{index}/assets          generate assets (POST)
/// /sessions/{id}/campaigns/{index}/download        zip of generated assets
///
/// /flows                                           run the full flow (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/sessions", sessions::router())
        .nest("/flows", flows::router())
}
