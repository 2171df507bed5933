pub mod announcements;

use axum::{Router, routing::get};

use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .nest("/api", announcements::router())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
