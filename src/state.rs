use paintlist_backend::search::PaintingsIndex;

/// Shared application state / 共享应用状态
pub struct AppState {
    /// Painting search index client / 画作搜索索引客户端
    pub index: PaintingsIndex,
}
