//! shopfront-catalog library interface
//!
//! Storefront catalog service: admin CRUD over items and categories,
//! AI-assisted categorization with a deterministic keyword fallback, and
//! durable JSON snapshot persistence with corruption recovery.

pub mod api;
pub mod classifier;
pub mod config;
pub mod error;
pub mod persistence;
pub mod reconcile;
pub mod retry;
pub mod service;
pub mod store;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use shopfront_common::events::EventBus;
use std::sync::Arc;

use service::CatalogService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// The catalog service (serialized mutations, reconciliation, saves)
    pub service: Arc<CatalogService>,
    /// Event bus for SSE broadcasting
    pub event_bus: EventBus,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(service: Arc<CatalogService>, event_bus: EventBus) -> Self {
        Self {
            service,
            event_bus,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .merge(api::catalog_routes())
        .merge(api::item_routes())
        .merge(api::category_routes())
        .merge(api::health_routes())
        .route("/events", get(api::event_stream))
        .with_state(state)
}
