pub mod focus;
pub mod search;
pub mod server;

use axum::{
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: 200,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            code: 400,
            message: message.to_string(),
            data: None,
        }
    }
}

/// Build the application router / 构建路由
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(server::health_check))
        .route("/api/version", get(server::get_version_info))
        .route("/api/sessions/stats", get(server::get_session_stats))
        .route("/api/focus", get(focus::get_focus).post(focus::set_focus))
        // 搜索页面：搜索 / 命中 / 表单
        .route("/search/search2", get(search::search_page).post(search::select_bible))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::SqlitePool;
    use std::sync::Arc;

    use biblesearch_backend::config::AppConfig;
    use biblesearch_backend::corpus::MemoryCorpus;

    use crate::state::AppState;

    /// Two-book corpus, only Genesis 3:7 mentions grace / 测试语料
    pub fn corpus() -> MemoryCorpus {
        let corpus = MemoryCorpus::new();
        corpus.store_chapter("KJV", 1, 3, "\\c 3\n\\v 6 And when the woman saw that the tree was good for food\n\\v 7 And Grace opened the eyes of them both");
        corpus.store_chapter("KJV", 2, 1, "\\c 1\n\\v 1 Now these are the names of the children of Israel");
        corpus.store_chapter("WEB", 40, 5, "\\c 5\n\\v 3 Blessed are the poor in spirit: for theirs is the kingdom of heaven.");
        corpus
    }

    pub async fn state_with(config: AppConfig) -> Arc<AppState> {
        let db = SqlitePool::connect("sqlite::memory:").await.unwrap();
        Arc::new(AppState::new(db, Arc::new(corpus()), &config))
    }

    pub async fn state() -> Arc<AppState> {
        state_with(AppConfig::default()).await
    }
}
