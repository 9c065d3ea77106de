pub mod admin;
pub mod paintings;
pub mod types;

use axum::Json;
use serde_json::{json, Value};

/// 健康检查 / Health check
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
