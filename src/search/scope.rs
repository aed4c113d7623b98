//! Search scope - restrict hits to one book or one testament / 搜索范围

use serde::{Deserialize, Serialize};

use crate::books::{book_type, BookType};
use crate::passage::Passage;

/// Scope of a search / 搜索范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Whole bible / 整本圣经
    All,
    /// Only the given book / 当前书卷
    CurrentBook(i32),
    /// 旧约
    OldTestament,
    /// 新约
    NewTestament,
}

impl Scope {
    /// Parse the `b` request parameter / 解析范围参数
    ///
    /// `current_book` is only consulted for "currentbook". Anything unrecognised is the whole bible.
    pub fn from_param(tag: &str, current_book: impl FnOnce() -> i32) -> Self {
        match tag {
            "currentbook" => Scope::CurrentBook(current_book()),
            "otbooks" => Scope::OldTestament,
            "ntbooks" => Scope::NewTestament,
            _ => Scope::All,
        }
    }

    pub fn includes(&self, book: i32) -> bool {
        match self {
            Scope::All => true,
            Scope::CurrentBook(current) => *current == book,
            Scope::OldTestament => book_type(book) == BookType::OldTestament,
            Scope::NewTestament => book_type(book) == BookType::NewTestament,
        }
    }

    /// Stable filter, input order is kept / 稳定过滤
    pub fn filter(&self, passages: Vec<Passage>) -> Vec<Passage> {
        if *self == Scope::All {
            return passages;
        }
        passages.into_iter().filter(|p| self.includes(p.book)).collect()
    }
}

impl Default for Scope {
    fn default() -> Self {
        Scope::All
    }
}
