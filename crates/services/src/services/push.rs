use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PushError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Push gateway rejected the request: {0}")]
    Gateway(String),
    #[error("Push gateway returned {got} results for {expected} tokens")]
    ResultCountMismatch { expected: usize, got: usize },
}

/// Notification content shown to the recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

/// One multicast dispatch request. Serializes to the gateway wire shape:
/// `{"notification":{"title":...,"body":...},"tokens":[...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub notification: Notification,
    pub tokens: Vec<String>,
}

/// Per-token send outcome, in submitted token order.
#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryResult {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MulticastResponse {
    responses: Vec<DeliveryResult>,
}

/// Push-messaging dependency of the notifier. Injected so tests can
/// substitute a fake for the real gateway.
#[async_trait]
pub trait PushGateway: Send + Sync {
    /// Send one notification to every token in the payload in a single
    /// call. Returns one result per token, preserving input order.
    async fn send_multicast(
        &self,
        payload: &NotificationPayload,
    ) -> Result<Vec<DeliveryResult>, PushError>;
}

#[derive(Clone)]
pub struct FcmConfig {
    pub api_url: String,
    pub server_key: String,
}

impl FcmConfig {
    /// Load config from environment variables
    ///
    /// - FCM_API_URL - batch-send endpoint of the push gateway
    /// - FCM_SERVER_KEY - bearer key for the gateway
    pub fn from_env() -> Option<Self> {
        let api_url = std::env::var("FCM_API_URL").ok()?;
        let server_key = std::env::var("FCM_SERVER_KEY").ok()?;
        Some(Self {
            api_url,
            server_key,
        })
    }
}

/// HTTP client for the push-messaging gateway's batch-send endpoint.
#[derive(Clone)]
pub struct FcmGateway {
    config: FcmConfig,
    client: Client,
}

impl FcmGateway {
    pub fn new(config: FcmConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl PushGateway for FcmGateway {
    async fn send_multicast(
        &self,
        payload: &NotificationPayload,
    ) -> Result<Vec<DeliveryResult>, PushError> {
        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.server_key)
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(PushError::Gateway(text));
        }

        let multicast: MulticastResponse = response
            .json()
            .await
            .map_err(|e| PushError::Gateway(format!("Failed to parse gateway response: {e}")))?;

        if multicast.responses.len() != payload.tokens.len() {
            return Err(PushError::ResultCountMismatch {
                expected: payload.tokens.len(),
                got: multicast.responses.len(),
            });
        }

        Ok(multicast.responses)
    }
}
