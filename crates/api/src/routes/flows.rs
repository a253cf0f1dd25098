use axum::routing::post;
use axum::Router;

use crate::handlers::flows;
use crate::state::AppState;

/// Full flow routes, mounted at `/flows`.
///
/// ```text
/// POST   /                  -> run_flow
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(flows::run_flow))
}
