use axum::response::Html;
use axum::{routing::get, Router};

use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET / -- the single-page campaign generator UI.
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}
