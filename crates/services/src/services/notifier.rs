use std::sync::Arc;

use db::{DBService, models::user::User};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::services::push::{
    DeliveryResult, Notification, NotificationPayload, PushError, PushGateway,
};

/// Title used when the announcement carries none.
pub const DEFAULT_TITLE: &str = "New Announcement";

#[derive(Debug, Error)]
pub enum NotifierError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Push(#[from] PushError),
}

/// Field data of a newly created announcement document, decoded at the
/// trigger boundary. An absent field and an empty string are equivalent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnouncementData {
    pub title: Option<String>,
    pub message: Option<String>,
}

impl AnnouncementData {
    pub fn resolved_title(&self) -> String {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TITLE)
            .to_string()
    }

    pub fn resolved_body(&self) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or("")
            .to_string()
    }
}

/// Reacts to announcement creation: resolves the group's notification
/// audience and dispatches one best-effort multicast push.
#[derive(Clone)]
pub struct AnnouncementNotifier {
    db: DBService,
    gateway: Arc<dyn PushGateway>,
}

impl AnnouncementNotifier {
    pub fn new(db: DBService, gateway: Arc<dyn PushGateway>) -> Self {
        Self { db, gateway }
    }

    /// Handle one "announcement created" event for a group.
    ///
    /// A missing document snapshot and an empty audience are both
    /// non-error no-ops. Per-token delivery failures are logged and
    /// collected, never returned; only database or gateway transport
    /// faults surface as errors, with no retry here.
    pub async fn handle_created(
        &self,
        group_id: &str,
        data: Option<AnnouncementData>,
    ) -> Result<(), NotifierError> {
        let Some(data) = data else {
            return Ok(());
        };

        let users = User::find_by_group_id(&self.db.pool, group_id).await?;
        let tokens: Vec<String> = users
            .into_iter()
            .filter_map(|u| u.fcm_token)
            .filter(|t| !t.is_empty())
            .collect();

        if tokens.is_empty() {
            info!("no tokens found for group {group_id}");
            return Ok(());
        }

        info!(
            "sending announcement to {} users in group {group_id}",
            tokens.len()
        );

        let payload = NotificationPayload {
            notification: Notification {
                title: data.resolved_title(),
                body: data.resolved_body(),
            },
            tokens,
        };

        let results = self.gateway.send_multicast(&payload).await?;

        let failed = failed_tokens(&payload.tokens, &results);
        if !failed.is_empty() {
            warn!("failed tokens: {failed:?}");
        }

        Ok(())
    }
}

/// Tokens whose delivery result reports failure, in submitted order.
/// Each failure is logged with the gateway's error detail.
fn failed_tokens(tokens: &[String], results: &[DeliveryResult]) -> Vec<String> {
    let mut failed = Vec::new();
    for (token, result) in tokens.iter().zip(results) {
        if !result.success {
            error!(
                "failed sending to {token}: {}",
                result.error.as_deref().unwrap_or("unknown error")
            );
            failed.push(token.clone());
        }
    }
    failed
}
