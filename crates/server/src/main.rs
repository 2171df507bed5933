mod error;
mod routes;

use std::sync::Arc;

use anyhow::Context;
use db::DBService;
use services::services::{
    notifier::AnnouncementNotifier,
    push::{FcmConfig, FcmGateway},
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
pub struct AppState {
    pub notifier: AnnouncementNotifier,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls crypto provider"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:notifier.db?mode=rwc".to_string());
    let db = DBService::new(&database_url).await?;

    let fcm_config = FcmConfig::from_env()
        .context("missing push gateway configuration (FCM_API_URL, FCM_SERVER_KEY)")?;
    let gateway = Arc::new(FcmGateway::new(fcm_config));
    let notifier = AnnouncementNotifier::new(db, gateway);

    let app = routes::router(AppState { notifier }).layer(TraceLayer::new_for_http());

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
