//! Item CRUD endpoints

use crate::store::{ItemUpdate, NewItem};
use crate::{ApiResult, AppState};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use shopfront_common::model::{FeaturedTag, Item, Snapshot};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub name: String,
    pub price: f64,
    pub image: String,
    #[serde(default)]
    pub featured: Option<FeaturedTag>,
    pub category: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub name: String,
    pub price: f64,
    pub image: String,
    #[serde(default)]
    pub featured: Option<FeaturedTag>,
    /// Target category; omit to leave membership unchanged
    #[serde(default)]
    pub category: Option<String>,
}

/// POST /api/items
pub async fn add_item(
    State(state): State<AppState>,
    Json(request): Json<AddItemRequest>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    let item = state
        .service
        .add_item(
            NewItem {
                name: request.name,
                price: request.price,
                image: request.image,
                featured: request.featured,
            },
            &request.category,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/items/{id}
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateItemRequest>,
) -> ApiResult<Json<Snapshot>> {
    let snapshot = state
        .service
        .update_item(
            &id,
            ItemUpdate {
                name: request.name,
                price: request.price,
                image: request.image,
                featured: request.featured,
            },
            request.category.as_deref(),
        )
        .await?;
    Ok(Json(snapshot))
}

/// DELETE /api/items/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Snapshot>> {
    let snapshot = state.service.delete_item(&id).await?;
    Ok(Json(snapshot))
}

/// Build item CRUD routes
pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/api/items", post(add_item))
        .route(
            "/api/items/:id",
            axum::routing::put(update_item).delete(delete_item),
        )
}
