//! Best Papers API Server
//!
//! Main entry point for the Best Papers upload service.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bestpapers_api::{AppState, create_router};
use bestpapers_core::upload::{StorageBackends, UploadPolicy, UploadService};
use bestpapers_shared::{AppConfig, StorageStrategy};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bestpapers=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;

    // Resolve storage once; a bad strategy stops startup here
    let backends = StorageBackends::from_settings(&config.storage)
        .context("failed to initialize storage")?;
    info!(
        configured = config.storage.strategy.as_str(),
        effective = backends.strategy().as_str(),
        primary = config.storage.primary.as_ref().map_or("none", |p| p.name()),
        "Storage resolved"
    );
    if backends.strategy() != StorageStrategy::PrimaryOnly {
        warn!(
            dir = %config.storage.fallback_dir.display(),
            "Local upload fallback enabled; its files are development-only and vanish with the temp directory"
        );
    }

    let policy = UploadPolicy::from_config(&config.upload);
    info!(
        max_file_size = policy.max_file_size(),
        extensions = ?config.upload.allowed_extensions,
        "Upload policy configured"
    );

    // Create application state
    let state = AppState::new(UploadService::new(policy, backends));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
