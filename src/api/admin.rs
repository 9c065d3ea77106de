//! 索引管理 API / Index administration handlers

use axum::{extract::State, Json};
use chrono::{TimeZone, Utc};
use std::sync::Arc;

use crate::state::AppState;
use paintlist_backend::models::NewPainting;

use super::types::ApiResponse;

/// 重建索引并写入示例数据 / Drop, recreate and seed the search index
pub async fn reinit(State(state): State<Arc<AppState>>) -> Json<ApiResponse<Vec<String>>> {
    if let Err(e) = state.index.delete_index().await {
        tracing::warn!("Index deletion failed: {}", e);
        return Json(ApiResponse::error(&e.to_string()));
    }
    if let Err(e) = state.index.initialize().await {
        tracing::warn!("Index creation failed: {}", e);
        return Json(ApiResponse::error(&e.to_string()));
    }

    let mut ids = Vec::new();
    for painting in seed_paintings() {
        match state.index.create(painting).await {
            Ok(id) => ids.push(id),
            Err(e) => {
                tracing::warn!("Seeding painting failed: {}", e);
                return Json(ApiResponse::error(&e.to_string()));
            }
        }
    }

    tracing::info!("Search index reinitialized with {} seed paintings", ids.len());
    Json(ApiResponse::success(ids))
}

/// 示例画作 / Sample paintings written after a reinit
fn seed_paintings() -> Vec<NewPainting> {
    let millis = |y, m, d| {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
            .single()
            .map(|dt| dt.timestamp_millis())
            .unwrap_or_default()
    };
    vec![
        NewPainting {
            name: "Bulop".to_string(),
            price: 50,
            is_sold: false,
            created_date: millis(2023, 1, 3),
            author: None,
            content_description: None,
            materials_description: None,
        },
        NewPainting {
            name: "Bruh".to_string(),
            price: 100,
            is_sold: false,
            created_date: millis(2019, 6, 17),
            author: None,
            content_description: None,
            materials_description: None,
        },
    ]
}
