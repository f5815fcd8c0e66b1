//! shopfront-catalog - Storefront Catalog Service
//!
//! Serves the catalog snapshot with its category assignment, the admin
//! CRUD surface, and the SSE event stream. On first load (or whenever
//! no assignment is persisted) a reconciliation pass categorizes the
//! catalog via the configured classifier, falling back to keyword rules.

use anyhow::Result;
use shopfront_catalog::persistence::SnapshotStore;
use shopfront_catalog::reconcile::ReconcileEngine;
use shopfront_catalog::retry::RetryPolicy;
use shopfront_catalog::service::CatalogService;
use shopfront_catalog::{build_router, config, AppState};
use shopfront_common::events::EventBus;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting shopfront-catalog");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Optional positional argument overrides the data folder
    let cli_data_dir = std::env::args().nth(1);
    let catalog_config = config::resolve(cli_data_dir.as_deref())?;
    info!("Data folder: {}", catalog_config.data_dir.display());

    let event_bus = EventBus::new(100);
    let classifier = config::build_classifier(&catalog_config.classifier);
    let engine = ReconcileEngine::new(classifier, event_bus.clone());
    let persistence = SnapshotStore::new(&catalog_config.data_dir);
    let service = Arc::new(CatalogService::new(
        persistence,
        engine,
        event_bus.clone(),
        RetryPolicy::default(),
    ));

    let state = AppState::new(service, event_bus);
    let app = build_router(state);

    let bind_addr = format!("{}:{}", catalog_config.host, catalog_config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Listening on http://{bind_addr}");
    info!("Health check: http://{bind_addr}/health");

    axum::serve(listener, app).await?;

    Ok(())
}
