//! Catalog snapshot endpoints
//!
//! `GET /api/catalog` returns the current snapshot with its assignment,
//! running a reconciliation pass first when none is persisted. The
//! optional `q` parameter filters the returned copy by item-name
//! substring; it is display-only and never mutates the assignment.
//!
//! `POST /api/catalog` replaces the full snapshot after validation.

use crate::{ApiResult, AppState};
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use shopfront_common::model::Snapshot;

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// Case-insensitive substring filter on item names
    q: Option<String>,
}

/// GET /api/catalog
pub async fn get_catalog(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> ApiResult<Json<Snapshot>> {
    let snapshot = state.service.catalog().await?;
    let snapshot = match query.q.as_deref().map(str::trim) {
        Some(needle) if !needle.is_empty() => filter_by_name(&snapshot, needle),
        _ => snapshot,
    };
    Ok(Json(snapshot))
}

/// POST /api/catalog
pub async fn replace_catalog(
    State(state): State<AppState>,
    Json(snapshot): Json<Snapshot>,
) -> ApiResult<Json<Value>> {
    state.service.replace(snapshot).await?;
    Ok(Json(json!({ "success": true })))
}

/// Filter a snapshot copy for display
///
/// Keeps items whose name contains the needle (case-insensitive), both
/// in the item list and inside each category's list. Categories stay
/// present even when their filtered list is empty.
fn filter_by_name(snapshot: &Snapshot, needle: &str) -> Snapshot {
    let needle = needle.to_lowercase();
    let matches = |name: &str| name.to_lowercase().contains(&needle);

    let mut filtered = snapshot.clone();
    filtered.items.retain(|item| matches(&item.name));
    for list in filtered.assignment.values_mut() {
        list.retain(|item| matches(&item.name));
    }
    filtered
}

/// Build catalog snapshot routes
pub fn catalog_routes() -> Router<AppState> {
    Router::new().route("/api/catalog", get(get_catalog).post(replace_catalog))
}
