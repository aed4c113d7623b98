//! Session result cache / 会话结果缓存
//!
//! Holds, per caller-chosen identifier, the parameters of the last query and the hit list
//! committed for it. Lifecycle: created once at startup and shared through `Arc`, swept
//! periodically for idle entries, cleared at shutdown.
//!
//! Consistency: [`SessionCache::commit_query`] stores parameters and hits under a single
//! write lock, so a reader never sees the parameters of one query next to the hits of
//! another.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::Serialize;

use super::combine::{combine, CombineMode};
use super::schema::{QueryParams, SessionState};
use crate::passage::Passage;
use crate::utils::bool_to_string;

/// Cache limits / 缓存限制
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCacheConfig {
    /// 0 means unbounded / 最大会话数
    pub max_sessions: usize,
    /// None means entries never expire / 空闲过期时间
    pub ttl: Option<Duration>,
}

impl Default for SessionCacheConfig {
    fn default() -> Self {
        Self {
            max_sessions: 1000,
            ttl: Some(Duration::from_secs(3600)),
        }
    }
}

/// Cache statistics / 缓存统计
#[derive(Debug, Clone, Serialize)]
pub struct SessionStats {
    pub entries: usize,
    pub max_sessions: usize,
    pub ttl_secs: Option<u64>,
}

struct SessionEntry {
    state: SessionState,
    /// Milliseconds since cache creation, updated on reads too
    last_access: AtomicU64,
}

/// Ephemeral per-identifier search state / 会话结果缓存
pub struct SessionCache {
    entries: RwLock<HashMap<i64, SessionEntry>>,
    config: SessionCacheConfig,
    epoch: Instant,
}

impl SessionCache {
    pub fn new(config: SessionCacheConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            config,
            epoch: Instant::now(),
        }
    }

    /// Cache without eviction / 无淘汰策略的缓存
    pub fn unbounded() -> Self {
        Self::new(SessionCacheConfig { max_sessions: 0, ttl: None })
    }

    fn now_millis(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    fn is_expired(&self, entry: &SessionEntry, now: u64) -> bool {
        match self.config.ttl {
            Some(ttl) => now.saturating_sub(entry.last_access.load(Ordering::Relaxed)) > ttl.as_millis() as u64,
            None => false,
        }
    }

    /// Entry for `id`, created (with eviction) if missing, reset if expired
    fn entry_mut<'a>(&self, entries: &'a mut HashMap<i64, SessionEntry>, id: i64) -> &'a mut SessionEntry {
        let now = self.now_millis();

        let expired = entries.get(&id).map(|e| self.is_expired(e, now)).unwrap_or(false);
        if expired {
            entries.remove(&id);
        }

        if !entries.contains_key(&id) && self.config.max_sessions > 0 && entries.len() >= self.config.max_sessions {
            entries.retain(|_, e| !self.is_expired(e, now));
            while entries.len() >= self.config.max_sessions {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, e)| e.last_access.load(Ordering::Relaxed))
                    .map(|(key, _)| *key);
                match oldest {
                    Some(key) => {
                        entries.remove(&key);
                        tracing::debug!("Session cache full, evicted session {}", key);
                    }
                    None => break,
                }
            }
        }

        let entry = entries.entry(id).or_insert_with(|| SessionEntry {
            state: SessionState::default(),
            last_access: AtomicU64::new(now),
        });
        entry.last_access.store(now, Ordering::Relaxed);
        entry
    }

    /// Read a live entry, touching its access time
    fn read<T>(&self, id: i64, f: impl FnOnce(&SessionState) -> T) -> Option<T> {
        let entries = self.entries.read();
        let entry = entries.get(&id)?;
        let now = self.now_millis();
        if self.is_expired(entry, now) {
            return None;
        }
        entry.last_access.store(now, Ordering::Relaxed);
        Some(f(&entry.state))
    }

    /// Overwrite the query parameters of `id` / 保存查询参数
    pub fn store_query_params(&self, id: i64, query: &str, case_sensitive: bool, plaintext: bool) {
        let mut entries = self.entries.write();
        self.entry_mut(&mut entries, id).state.params = QueryParams::new(query, case_sensitive, plaintext);
    }

    /// Combine `new_hits` with the stored hits of `id` and store the result / 提交命中
    pub fn commit_hits(&self, id: i64, new_hits: &[Passage], mode: CombineMode) -> Vec<String> {
        let new_hits: Vec<String> = new_hits.iter().map(Passage::encode).collect();
        let mut entries = self.entries.write();
        Self::apply_hits(&mut self.entry_mut(&mut entries, id).state, &new_hits, mode)
    }

    /// Store parameters and combined hits of one query atomically / 原子地保存一次查询
    pub fn commit_query(&self, id: i64, params: QueryParams, new_hits: &[Passage], mode: CombineMode) -> Vec<String> {
        let new_hits: Vec<String> = new_hits.iter().map(Passage::encode).collect();
        let mut entries = self.entries.write();
        let state = &mut self.entry_mut(&mut entries, id).state;
        state.params = params;
        Self::apply_hits(state, &new_hits, mode)
    }

    fn apply_hits(state: &mut SessionState, new_hits: &[String], mode: CombineMode) -> Vec<String> {
        let result = combine(&state.hits, new_hits, mode);
        state.hits = result.clone();
        result
    }

    /// Read one stored value as a string / 读取参数
    ///
    /// Keys: `query`, `casesensitive`, `plaintext`, `hits` (newline-joined). Unknown
    /// identifiers and unknown keys read as the empty string.
    pub fn get_query_param(&self, id: i64, key: &str) -> String {
        self.read(id, |state| match key {
            "query" => state.params.query.clone(),
            "casesensitive" => bool_to_string(state.params.case_sensitive),
            "plaintext" => bool_to_string(state.params.plaintext),
            "hits" => state.hits.join("\n"),
            _ => String::new(),
        })
        .unwrap_or_default()
    }

    /// Snapshot of everything stored for `id` / 会话快照
    pub fn get_state(&self, id: i64) -> Option<SessionState> {
        self.read(id, SessionState::clone)
    }

    /// Query parameters of `id`, defaults when unknown
    pub fn params(&self, id: i64) -> QueryParams {
        self.read(id, |state| state.params.clone()).unwrap_or_default()
    }

    /// Drop idle entries, returns how many were removed / 清理过期会话
    pub fn purge_expired(&self) -> usize {
        if self.config.ttl.is_none() {
            return 0;
        }
        let now = self.now_millis();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, e| !self.is_expired(e, now));
        before - entries.len()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            entries: self.len(),
            max_sessions: self.config.max_sessions,
            ttl_secs: self.config.ttl.map(|t| t.as_secs()),
        }
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new(SessionCacheConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn passage(verse: &str) -> Passage {
        Passage::new("KJV", 1, 1, verse)
    }

    fn tokens(verses: &[&str]) -> Vec<String> {
        verses.iter().map(|v| passage(v).encode()).collect()
    }

    #[test]
    fn test_unknown_session_reads_empty() {
        let cache = SessionCache::default();
        assert_eq!(cache.get_query_param(99, "query"), "");
        assert_eq!(cache.get_query_param(99, "hits"), "");
        assert!(cache.get_state(99).is_none());
        assert_eq!(cache.params(99), QueryParams::default());
    }

    #[test]
    fn test_store_and_read_params() {
        let cache = SessionCache::default();
        cache.store_query_params(1, "grace", true, false);
        assert_eq!(cache.get_query_param(1, "query"), "grace");
        assert_eq!(cache.get_query_param(1, "casesensitive"), "true");
        assert_eq!(cache.get_query_param(1, "plaintext"), "false");
        assert_eq!(cache.get_query_param(1, "unknown"), "");

        cache.store_query_params(1, "faith", false, true);
        assert_eq!(cache.params(1), QueryParams::new("faith", false, true));
    }

    #[test]
    fn test_commit_hits_combines_with_stored() {
        let cache = SessionCache::default();
        let abc = [passage("1"), passage("2"), passage("3")];
        let bcd = [passage("2"), passage("3"), passage("4")];

        assert_eq!(cache.commit_hits(5, &abc, CombineMode::Load), tokens(&["1", "2", "3"]));
        assert_eq!(cache.commit_hits(5, &bcd, CombineMode::Intersect), tokens(&["2", "3"]));
        assert_eq!(cache.commit_hits(5, &abc, CombineMode::Add), tokens(&["1", "2", "3"]));
        assert_eq!(cache.commit_hits(5, &bcd, CombineMode::Remove), tokens(&["1"]));
        assert_eq!(cache.get_query_param(5, "hits"), passage("1").encode());
    }

    #[test]
    fn test_add_into_fresh_session() {
        let cache = SessionCache::default();
        let hits = cache.commit_hits(7, &[passage("1"), passage("1")], CombineMode::Add);
        assert_eq!(hits, tokens(&["1"]));
    }

    #[test]
    fn test_commit_query_stores_both() {
        let cache = SessionCache::default();
        let params = QueryParams::new("light", false, true);
        cache.commit_query(3, params.clone(), &[passage("3")], CombineMode::Load);
        let state = cache.get_state(3).unwrap();
        assert_eq!(state.params, params);
        assert_eq!(state.hits, tokens(&["3"]));
    }

    #[test]
    fn test_sessions_are_independent() {
        let cache = SessionCache::default();
        cache.commit_query(1, QueryParams::new("a", false, true), &[passage("1")], CombineMode::Load);
        cache.commit_query(2, QueryParams::new("b", false, true), &[passage("2")], CombineMode::Load);
        assert_eq!(cache.get_query_param(1, "query"), "a");
        assert_eq!(cache.get_state(2).unwrap().hits, tokens(&["2"]));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_capacity_evicts_least_recently_used() {
        let cache = SessionCache::new(SessionCacheConfig { max_sessions: 2, ttl: None });
        cache.store_query_params(1, "one", false, true);
        std::thread::sleep(Duration::from_millis(5));
        cache.store_query_params(2, "two", false, true);
        std::thread::sleep(Duration::from_millis(5));
        // 读取会刷新访问时间
        assert_eq!(cache.get_query_param(1, "query"), "one");
        std::thread::sleep(Duration::from_millis(5));
        cache.store_query_params(3, "three", false, true);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get_query_param(1, "query"), "one");
        assert_eq!(cache.get_query_param(2, "query"), "");
        assert_eq!(cache.get_query_param(3, "query"), "three");
    }

    #[test]
    fn test_ttl_expiry() {
        let cache = SessionCache::new(SessionCacheConfig {
            max_sessions: 0,
            ttl: Some(Duration::from_millis(30)),
        });
        cache.commit_query(1, QueryParams::new("old", false, true), &[passage("1")], CombineMode::Load);
        std::thread::sleep(Duration::from_millis(60));

        assert_eq!(cache.get_query_param(1, "query"), "");
        // 过期的命中不参与合并
        let hits = cache.commit_hits(1, &[passage("2")], CombineMode::Add);
        assert_eq!(hits, tokens(&["2"]));

        cache.store_query_params(2, "idle", false, true);
        std::thread::sleep(Duration::from_millis(60));
        assert_eq!(cache.purge_expired(), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_unbounded_never_purges() {
        let cache = SessionCache::unbounded();
        cache.store_query_params(1, "q", false, true);
        assert_eq!(cache.purge_expired(), 0);
        assert_eq!(cache.stats().max_sessions, 0);
        assert_eq!(cache.stats().ttl_secs, None);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_queries_stay_consistent() {
        let cache = Arc::new(SessionCache::unbounded());
        let handles: Vec<_> = (0..8)
            .map(|id| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    for round in 0..50 {
                        let query = format!("q{}-{}", id, round);
                        let verse = round.to_string();
                        cache.commit_query(id, QueryParams::new(query.clone(), false, true), &[passage(&verse)], CombineMode::Load);
                        let state = cache.get_state(id).unwrap();
                        assert_eq!(state.params.query, query);
                        assert_eq!(state.hits, vec![passage(&verse).encode()]);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 8);
    }
}
