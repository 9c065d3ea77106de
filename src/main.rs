use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod state;

use paintlist_backend::config;
use paintlist_backend::search::PaintingsIndex;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paintlist_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration / 加载配置
    config::init_config().map_err(anyhow::Error::msg)?;
    let app_config = config::config();

    let index = PaintingsIndex::new(
        &app_config.elasticsearch.node,
        app_config.elasticsearch.index.clone(),
    )?;

    // Ensure the search index exists (mappings + analyzers); the server still
    // starts when the backend is down, handlers will surface the error.
    // 启动时确保索引存在；后端不可达时仍然启动，由各接口报告错误。
    if let Err(e) = index.initialize().await {
        tracing::warn!(
            "Search index initialization failed (backend at {} unreachable?): {}",
            app_config.elasticsearch.node,
            e
        );
    }

    let state = Arc::new(AppState { index });

    let app = Router::new()
        .route("/api/health", get(api::health_check))
        .route("/api/paintings/search", post(api::paintings::search_paintings))
        .route(
            "/api/paintings",
            post(api::paintings::create_painting).delete(api::paintings::delete_painting),
        )
        .route("/api/paintings/:id", get(api::paintings::get_painting))
        .route("/api/reinit", post(api::admin::reinit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let bind_addr = app_config.get_bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server running at http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
