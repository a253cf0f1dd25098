//! Route definitions for interactive UI sessions.
//!
//! Mounted by `api_routes()` at `/sessions`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::sessions;
use crate::state::AppState;

/// Session routes.
///
/// ```text
/// POST   /                                  -> create_session
/// GET    /{id}                              -> get_session
/// POST   /{id}/research                     -> run_research
/// POST   /{id}/marketing                    -> run_marketing
/// GET    /{id}/campaigns                    -> list_campaigns
/// POST   /{id}/campaigns/{index}/assets     -> generate_assets
/// GET    /{id}/campaigns/{index}/download   -> download_assets
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(sessions::create_session))
        .route("/{id}", get(sessions::get_session))
        .route("/{id}/research", post(sessions::run_research))
        .route("/{id}/marketing", post(sessions::run_marketing))
        .route("/{id}/campaigns", get(sessions::list_campaigns))
        .route(
            "/{id}/campaigns/{index}/assets",
            post(sessions::generate_assets),
        )
        .route(
            "/{id}/campaigns/{index}/download",
            get(sessions::download_assets),
        )
}
