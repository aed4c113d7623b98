use sqlx::SqlitePool;
use biblesearch_backend::config::{AccessConfig, AppConfig};
use biblesearch_backend::corpus::{MemoryCorpus, TextSource};
use biblesearch_backend::focus::{FocusTracker, SharedFocus};
use biblesearch_backend::search::{SearchEngine, SessionCache};
use std::sync::Arc;
use parking_lot::RwLock;

pub struct AppState {
    pub db: SqlitePool,
    pub corpus: Arc<MemoryCorpus>,
    pub engine: SearchEngine,
    /// Per-identifier query params and hit lists / 会话结果缓存
    pub sessions: Arc<SessionCache>,
    pub focus: SharedFocus,
    /// Bible chosen on the search page / 当前选择的圣经
    pub current_bible: RwLock<Option<String>>,
    pub editor_url: String,
    pub default_bible: String,
    pub access: AccessConfig,
}

impl AppState {
    pub fn new(db: SqlitePool, corpus: Arc<MemoryCorpus>, config: &AppConfig) -> Self {
        let engine = SearchEngine::new(corpus.clone());
        Self {
            db,
            corpus,
            engine,
            sessions: Arc::new(SessionCache::new(config.search.session_cache())),
            focus: SharedFocus::default(),
            current_bible: RwLock::new(None),
            editor_url: config.search.editor_url.clone(),
            default_bible: config.search.default_bible.clone(),
            access: config.access.clone(),
        }
    }

    /// Bibles the user may read, sorted / 可读圣经
    pub fn readable_bibles(&self) -> Vec<String> {
        self.access.readable(self.corpus.bibles())
    }

    /// 解析要搜索的圣经：请求参数 → 当前选择 → 默认配置 → 第一本可读圣经
    pub fn resolve_bible(&self, requested: Option<&str>) -> String {
        if let Some(bible) = requested.filter(|b| !b.is_empty()) {
            return bible.to_string();
        }
        if let Some(bible) = self.current_bible.read().clone() {
            return bible;
        }
        if !self.default_bible.is_empty() {
            return self.default_bible.clone();
        }
        self.readable_bibles().into_iter().next().unwrap_or_default()
    }

    pub fn select_bible(&self, bible: &str) {
        *self.current_bible.write() = Some(bible.to_string());
    }

    pub fn current_book(&self) -> i32 {
        self.focus.book()
    }
}
