//! 画作 API - 搜索与单文档增删查 / Painting search and CRUD handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;
use paintlist_backend::models::{NewPainting, Painting};
use paintlist_backend::search::PaintingSearchOptions;

use super::types::ApiResponse;

#[derive(Debug, Serialize)]
pub struct CreatedPainting {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct DeletePaintingRequest {
    pub id: String,
}

/// 按过滤条件搜索画作 / Search paintings by filter options
///
/// 空过滤条件返回索引中的全部画作 / An empty body returns every painting.
pub async fn search_paintings(
    State(state): State<Arc<AppState>>,
    Json(options): Json<PaintingSearchOptions>,
) -> Json<ApiResponse<Vec<Painting>>> {
    match state.index.search(&options).await {
        Ok(paintings) => Json(ApiResponse::success(paintings)),
        Err(e) => {
            tracing::warn!("Painting search failed: {}", e);
            Json(ApiResponse::error(&e.to_string()))
        }
    }
}

/// 新建画作 / Create a painting
pub async fn create_painting(
    State(state): State<Arc<AppState>>,
    Json(painting): Json<NewPainting>,
) -> Json<ApiResponse<CreatedPainting>> {
    match state.index.create(painting).await {
        Ok(id) => Json(ApiResponse::success(CreatedPainting { id })),
        Err(e) => {
            tracing::warn!("Painting creation failed: {}", e);
            Json(ApiResponse::error(&e.to_string()))
        }
    }
}

/// 按 id 获取画作 / Fetch one painting
pub async fn get_painting(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<ApiResponse<Painting>> {
    match state.index.get(&id).await {
        Ok(Some(painting)) => Json(ApiResponse::success(painting)),
        Ok(None) => Json(ApiResponse::error("画作不存在 / painting not found")),
        Err(e) => {
            tracing::warn!("Painting lookup failed: {}", e);
            Json(ApiResponse::error(&e.to_string()))
        }
    }
}

/// 按 id 删除画作 / Delete one painting
pub async fn delete_painting(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DeletePaintingRequest>,
) -> Json<ApiResponse<()>> {
    match state.index.delete(&req.id).await {
        Ok(()) => Json(ApiResponse::success(())),
        Err(e) => {
            tracing::warn!("Painting deletion failed: {}", e);
            Json(ApiResponse::error(&e.to_string()))
        }
    }
}
