//! HTTP server for the manuals catalog.
//!
//! This server:
//! - Authenticates to Google Drive with a service-account key
//! - Walks the configured folder tree and lists every PDF under it
//! - Serves the list as JSON on /api/manuals and a search page on /

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod handlers;

use config::Config;
use handlers::{router, AppState, CatalogSettings};
use manuals_gdrive::{DriveCatalog, GDriveClient, TokenManager};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();

    info!("Starting manuals-web v{}", env!("CARGO_PKG_VERSION"));
    info!("  Host: {}", config.host);
    info!("  Port: {}", config.port);
    info!("  Drive API: {}", config.drive_api_url);
    info!("  MIME type: {}", config.mime_type);

    let settings = CatalogSettings::new(
        config.google_service_key.clone(),
        config.google_drive_folder_id.clone(),
        config.mime_type.clone(),
    );

    if settings.is_configured() {
        info!(
            "  Root folder: {}",
            settings.folder_id.as_deref().unwrap_or_default()
        );
    } else {
        warn!("  Catalog: NOT CONFIGURED");
        warn!("  Set GOOGLE_SERVICE_KEY and GOOGLE_DRIVE_FOLDER_ID; /api/manuals answers 500 until then");
    }

    // Shared HTTP client for Drive calls and token exchange
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?;

    let catalog = DriveCatalog::new(
        Arc::new(GDriveClient::with_base_url(
            http_client.clone(),
            &config.drive_api_url,
        )),
        Arc::new(TokenManager::new(http_client)),
    );

    let state = AppState {
        settings: Arc::new(settings),
        catalog: Arc::new(catalog),
    };

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Bind and serve
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, initiating shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
        info!("Received SIGTERM, initiating shutdown");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
