use axum::{
    extract::State,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use biblesearch_backend::search::SessionStats;

use crate::state::AppState;
use crate::api::ApiResponse;

/// GET /api/health - 健康检查
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Json<Value> {
    let database = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => "ok".to_string(),
        Err(e) => {
            tracing::warn!("Database health check failed: {}", e);
            e.to_string()
        }
    };
    Json(json!({
        "status": "ok",
        "message": "BibleSearch 服务运行正常",
        "database": database,
        "bibles": state.readable_bibles().len(),
        "chapters": state.corpus.chapter_count(),
    }))
}

/// GET /api/version - 版本信息
pub async fn get_version_info() -> Json<Value> {
    Json(json!({
        "code": 200,
        "data": {
            "backend_version": env!("CARGO_PKG_VERSION"),
            "build_time": env!("BUILD_TIME"),
        }
    }))
}

/// GET /api/sessions/stats - 会话缓存状态
pub async fn get_session_stats(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<SessionStats>> {
    Json(ApiResponse::success(state.sessions.stats()))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::api::{router, test_support};

    async fn get_json(uri: &str) -> serde_json::Value {
        let app = router(test_support::state().await);
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let value = get_json("/api/health").await;
        assert_eq!(value["status"], "ok");
        assert_eq!(value["database"], "ok");
        assert_eq!(value["bibles"], 2);
        assert_eq!(value["chapters"], 3);
    }

    #[tokio::test]
    async fn test_version_info() {
        let value = get_json("/api/version").await;
        assert_eq!(value["data"]["backend_version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_session_stats_defaults() {
        let value = get_json("/api/sessions/stats").await;
        assert_eq!(value["data"]["entries"], 0);
        assert_eq!(value["data"]["max_sessions"], 1000);
        assert_eq!(value["data"]["ttl_secs"], 3600);
    }
}
