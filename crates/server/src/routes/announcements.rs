use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::post,
};
use serde::Deserialize;
use services::services::notifier::AnnouncementData;

use crate::{AppState, error::ApiError};

/// Document-created event for `groups/{group_id}/announcements/{announcement_id}`.
/// `data` carries the new document's field snapshot; null when the document
/// had no readable data.
#[derive(Debug, Deserialize)]
pub struct AnnouncementCreatedEvent {
    pub data: Option<AnnouncementData>,
}

pub async fn announcement_created(
    State(state): State<AppState>,
    Path((group_id, announcement_id)): Path<(String, String)>,
    Json(event): Json<AnnouncementCreatedEvent>,
) -> Result<StatusCode, ApiError> {
    tracing::debug!("announcement {announcement_id} created in group {group_id}");

    // Delivery failures are log-only; the trigger always sees completion.
    state.notifier.handle_created(&group_id, event.data).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/groups/{group_id}/announcements/{announcement_id}",
        post(announcement_created),
    )
}
