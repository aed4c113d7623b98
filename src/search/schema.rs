//! Search data types / 搜索数据类型

use serde::{Deserialize, Serialize};

use crate::corpus::ContentMode;

/// Scan request / 搜索请求选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Bible to scan / 要搜索的圣经
    pub bible: String,
    /// Literal text, empty matches nothing / 搜索关键词
    pub query: String,
    pub case_sensitive: bool,
    pub mode: ContentMode,
}

impl SearchQuery {
    pub fn new(bible: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            bible: bible.into(),
            query: query.into(),
            case_sensitive: false,
            mode: ContentMode::Plain,
        }
    }

    pub fn case_sensitive(mut self, enabled: bool) -> Self {
        self.case_sensitive = enabled;
        self
    }

    pub fn mode(mut self, mode: ContentMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Parameters of the last query of a session / 会话最近一次查询的参数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    pub query: String,
    pub case_sensitive: bool,
    pub plaintext: bool,
}

impl QueryParams {
    pub fn new(query: impl Into<String>, case_sensitive: bool, plaintext: bool) -> Self {
        Self {
            query: query.into(),
            case_sensitive,
            plaintext,
        }
    }

    pub fn content_mode(&self) -> ContentMode {
        ContentMode::from_plaintext(self.plaintext)
    }
}

/// Everything stored for one session identifier / 会话状态
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub params: QueryParams,
    /// Encoded passage tokens, unique, in insertion order / 命中列表
    pub hits: Vec<String>,
}
