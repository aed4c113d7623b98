use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;

use biblesearch_backend::corpus::CorpusError;
use biblesearch_backend::passage::Passage;
use biblesearch_backend::search::{format_hit, HitError, SearchQuery};
use biblesearch_backend::utils::escape_html;

use crate::state::AppState;
use super::page;
use super::types::*;

/// GET /search/search2 - 搜索 / 命中 / 表单，由参数决定
pub async fn search_page(
    State(state): State<Arc<AppState>>,
    Query(raw): Query<RawSearchParams>,
) -> Response {
    match raw.parse(|| state.current_book()) {
        SearchPageRequest::Search(req) => run_search(state, req).await,
        SearchPageRequest::Hit(req) => render_hit(&state, req),
        SearchPageRequest::Page { bible } => page::render(&state, bible.as_deref()).into_response(),
    }
}

/// Scan, filter by scope, then combine with the session's stored hits / 执行搜索
async fn run_search(state: Arc<AppState>, req: SearchRequest) -> Response {
    let bible = state.resolve_bible(req.bible.as_deref());
    let id = req.id;
    let combine = req.combine;

    let task_state = state.clone();
    let result = tokio::task::spawn_blocking(move || -> Result<(usize, Vec<String>), CorpusError> {
        let state = task_state;
        // 无读取权限时视为没有命中
        let passages = if state.access.can_read(&bible) {
            let query = SearchQuery::new(&bible, &req.params.query)
                .case_sensitive(req.params.case_sensitive)
                .mode(req.params.content_mode());
            req.scope.filter(state.engine.search(&query)?)
        } else {
            tracing::debug!("Bible {} is not readable, search yields no hits", bible);
            Vec::new()
        };
        let found = passages.len();
        let hits = state.sessions.commit_query(req.id, req.params, &passages, req.combine);
        Ok((found, hits))
    })
    .await;

    match result {
        Ok(Ok((found, hits))) => {
            tracing::debug!(
                "Search session {}: {} new hits, {} stored after {}",
                id, found, hits.len(), combine
            );
            hits.join("\n").into_response()
        }
        Ok(Err(e)) => {
            tracing::warn!("Search session {} failed: {}", id, e);
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        Err(e) => {
            tracing::error!("Search task panicked: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "搜索失败").into_response()
        }
    }
}

fn error_fragment(status: StatusCode, message: &str) -> Response {
    (status, Html(format!("<div class=\"error\">{}</div>", escape_html(message)))).into_response()
}

fn hit_error(token: &str, err: HitError) -> Response {
    match err {
        HitError::Decode(e) => {
            tracing::warn!("Bad passage token {:?}: {}", token, e);
            error_fragment(StatusCode::BAD_REQUEST, &e.to_string())
        }
        HitError::Corpus(e) => {
            tracing::warn!("Hit {:?} unavailable: {}", token, e);
            error_fragment(StatusCode::NOT_FOUND, &e.to_string())
        }
    }
}

/// Render one hit with the query stored for its session / 渲染单个命中
///
/// An unknown session renders the verse with default parameters and nothing highlighted.
fn render_hit(state: &AppState, req: HitRequest) -> Response {
    let passage = match Passage::decode(&req.token) {
        Ok(passage) => passage,
        Err(e) => return hit_error(&req.token, e.into()),
    };
    if !state.access.can_read(&passage.bible) {
        return error_fragment(StatusCode::FORBIDDEN, "没有读取该圣经的权限");
    }

    let params = state.sessions.params(req.id);
    match format_hit(state.engine.source().as_ref(), &passage, &params, &state.editor_url) {
        Ok(html) => Html(html).into_response(),
        Err(e) => hit_error(&req.token, e.into()),
    }
}

#[derive(Debug, Deserialize)]
pub struct BibleSelectForm {
    pub bibleselect: String,
}

/// POST /search/search2 - 切换当前圣经
pub async fn select_bible(
    State(state): State<Arc<AppState>>,
    Form(form): Form<BibleSelectForm>,
) -> Response {
    if !state.access.can_read(&form.bibleselect) {
        return StatusCode::FORBIDDEN.into_response();
    }
    state.select_bible(&form.bibleselect);
    tracing::info!("Current bible set to {}", form.bibleselect);
    StatusCode::OK.into_response()
}
