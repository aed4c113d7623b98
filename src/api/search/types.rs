use serde::Deserialize;

use biblesearch_backend::search::{CombineMode, QueryParams, Scope};
use biblesearch_backend::utils::{convert_to_bool, convert_to_int};

/// Query string of /search/search2, every field optional / 原始请求参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchParams {
    /// Session identifier / 会话标识
    pub i: Option<String>,
    /// Passage token, selects hit mode / 经文令牌
    pub h: Option<String>,
    /// Query text, selects search mode / 搜索词
    pub q: Option<String>,
    /// Case sensitive flag / 区分大小写
    pub c: Option<String>,
    /// Plain text flag / 纯文本
    pub p: Option<String>,
    /// Scope tag / 搜索范围
    pub b: Option<String>,
    /// Combine mode / 合并方式
    pub s: Option<String>,
    pub bible: Option<String>,
}

/// Run a search and commit the hits / 搜索请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub id: i64,
    pub bible: Option<String>,
    pub params: QueryParams,
    pub scope: Scope,
    pub combine: CombineMode,
}

/// Render one stored hit / 命中请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitRequest {
    pub id: i64,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPageRequest {
    Hit(HitRequest),
    Search(SearchRequest),
    /// Neither `h` nor `q`: the search form / 搜索表单
    Page { bible: Option<String> },
}

impl RawSearchParams {
    /// Validate into a typed request / 解析为类型化请求
    ///
    /// `h` wins over `q`. Malformed numbers and unknown modes fall back to defaults.
    pub fn parse(self, current_book: impl FnOnce() -> i32) -> SearchPageRequest {
        let id = self.i.as_deref().map(convert_to_int).unwrap_or(0);
        let bible = self.bible.filter(|b| !b.trim().is_empty());

        if let Some(token) = self.h {
            return SearchPageRequest::Hit(HitRequest { id, token });
        }

        match self.q {
            Some(query) => SearchPageRequest::Search(SearchRequest {
                id,
                bible,
                params: QueryParams::new(
                    query,
                    self.c.as_deref().map(convert_to_bool).unwrap_or(false),
                    self.p.as_deref().map(convert_to_bool).unwrap_or(false),
                ),
                scope: Scope::from_param(self.b.as_deref().unwrap_or(""), current_book),
                combine: CombineMode::from(self.s.as_deref().unwrap_or("")),
            }),
            None => SearchPageRequest::Page { bible },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawSearchParams {
        let mut params = RawSearchParams::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "i" => params.i = value,
                "h" => params.h = value,
                "q" => params.q = value,
                "c" => params.c = value,
                "p" => params.p = value,
                "b" => params.b = value,
                "s" => params.s = value,
                "bible" => params.bible = value,
                _ => unreachable!(),
            }
        }
        params
    }

    #[test]
    fn test_parse_search() {
        let request = raw(&[("i", "42"), ("q", "grace"), ("c", "false"), ("p", "true"), ("b", ""), ("s", "load")])
            .parse(|| 1);
        assert_eq!(
            request,
            SearchPageRequest::Search(SearchRequest {
                id: 42,
                bible: None,
                params: QueryParams::new("grace", false, true),
                scope: Scope::All,
                combine: CombineMode::Load,
            })
        );
    }

    #[test]
    fn test_parse_degrades_to_defaults() {
        let request = raw(&[("i", "forty"), ("q", "x"), ("c", "yes"), ("s", "merge"), ("b", "currentbook")])
            .parse(|| 19);
        match request {
            SearchPageRequest::Search(req) => {
                assert_eq!(req.id, 0);
                assert!(!req.params.case_sensitive);
                assert!(!req.params.plaintext);
                assert_eq!(req.combine, CombineMode::Load);
                assert_eq!(req.scope, Scope::CurrentBook(19));
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_flags_and_modes_compare_exactly() {
        let request = raw(&[("q", "x"), ("c", "TRUE"), ("p", "True"), ("s", "Intersect"), ("b", "OTbooks")])
            .parse(|| 1);
        match request {
            SearchPageRequest::Search(req) => {
                assert!(!req.params.case_sensitive);
                assert!(!req.params.plaintext);
                assert_eq!(req.combine, CombineMode::Load);
                assert_eq!(req.scope, Scope::All);
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_hit_wins_over_query() {
        let request = raw(&[("i", "7"), ("h", "1:3:7:KJV"), ("q", "grace")]).parse(|| 1);
        assert_eq!(
            request,
            SearchPageRequest::Hit(HitRequest { id: 7, token: "1:3:7:KJV".to_string() })
        );
    }

    #[test]
    fn test_page_mode() {
        assert_eq!(raw(&[]).parse(|| 1), SearchPageRequest::Page { bible: None });
        assert_eq!(
            raw(&[("bible", "KJV")]).parse(|| 1),
            SearchPageRequest::Page { bible: Some("KJV".to_string()) }
        );
    }

    #[test]
    fn test_current_book_only_read_when_needed() {
        let request = raw(&[("q", "x"), ("b", "ntbooks")]).parse(|| panic!("focus should not be read"));
        assert!(matches!(request, SearchPageRequest::Search(SearchRequest { scope: Scope::NewTestament, .. })));
    }
}
