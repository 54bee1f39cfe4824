//! fakelink API Server
//!
//! Main entry point for the link preview service.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fakelink_api::{AppState, create_router};
use fakelink_core::images::{ImageStore, InMemoryImageStore, S3ImageStore, S3StoreConfig};
use fakelink_core::preview::PreviewRenderer;
use fakelink_shared::AppConfig;
use fakelink_shared::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fakelink=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    let renderer = PreviewRenderer::new()?;

    // Pick the image store; a bucket that cannot be provisioned aborts startup
    match config.storage.s3_settings()? {
        Some(settings) => {
            let store = S3ImageStore::connect(S3StoreConfig::from(settings.clone())).await?;
            info!(
                host = %settings.host,
                port = settings.port,
                bucket = store.bucket(),
                "Using object storage for images"
            );
            serve(&config.server, AppState::new(store, renderer)).await
        }
        None => {
            info!("Using in-memory image store");
            serve(&config.server, AppState::new(InMemoryImageStore::new(), renderer)).await
        }
    }
}

async fn serve<S: ImageStore + 'static>(
    server: &ServerConfig,
    state: AppState<S>,
) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("{}:{}", server.host, server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
