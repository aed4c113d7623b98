use axum::{
    extract::State,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use biblesearch_backend::books;
use biblesearch_backend::focus::FocusTracker;

use crate::state::AppState;
use crate::api::ApiResponse;

#[derive(Debug, Serialize)]
pub struct FocusInfo {
    pub book: i32,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SetFocusRequest {
    pub book: i32,
}

fn focus_info(book: i32) -> FocusInfo {
    FocusInfo {
        book,
        name: books::english_name(book),
    }
}

/// GET /api/focus - 当前书卷
pub async fn get_focus(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<FocusInfo>> {
    Json(ApiResponse::success(focus_info(state.focus.book())))
}

/// POST /api/focus - 切换当前书卷
pub async fn set_focus(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetFocusRequest>,
) -> Json<ApiResponse<FocusInfo>> {
    if books::usfm_code(req.book).is_none() {
        return Json(ApiResponse::error("无效的书卷编号"));
    }
    state.focus.set_book(req.book);
    tracing::debug!("Focus moved to book {}", req.book);
    Json(ApiResponse::success(focus_info(req.book)))
}
