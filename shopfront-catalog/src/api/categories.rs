//! Category CRUD endpoints
//!
//! Deleting a category cascades: every item assigned to it is removed
//! from the catalog as well. Admin confirmation dialogs must surface
//! this before calling the endpoint.

use crate::{ApiResult, AppState};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use shopfront_common::model::Snapshot;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCategoryRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameCategoryRequest {
    pub new_name: String,
}

/// POST /api/categories
pub async fn add_category(
    State(state): State<AppState>,
    Json(request): Json<AddCategoryRequest>,
) -> ApiResult<(StatusCode, Json<Snapshot>)> {
    let snapshot = state.service.add_category(&request.name).await?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// PUT /api/categories/{name}
pub async fn rename_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<RenameCategoryRequest>,
) -> ApiResult<Json<Snapshot>> {
    let snapshot = state
        .service
        .rename_category(&name, &request.new_name)
        .await?;
    Ok(Json(snapshot))
}

/// DELETE /api/categories/{name}
pub async fn delete_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Snapshot>> {
    let snapshot = state.service.delete_category(&name).await?;
    Ok(Json(snapshot))
}

/// Build category CRUD routes
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/api/categories", post(add_category))
        .route(
            "/api/categories/:name",
            axum::routing::put(rename_category).delete(delete_category),
        )
}
