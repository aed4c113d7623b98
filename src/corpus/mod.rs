//! Text source - verse content provider / 经文文本源
//!
//! Architecture principles / 架构原则：
//! - The search engine only reads through [`TextSource`], it never touches storage directly
//! - Two representations per verse: rendered plain text and raw USFM markup
//! - Enumeration only yields addressable passages (chapter >= 1, verse >= 1)

pub mod memory;
pub mod store;
pub mod usfm;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use memory::MemoryCorpus;

/// Which representation of a verse to read / 读取的文本形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentMode {
    /// Rendered text, markers and notes removed / 纯文本
    Plain,
    /// Raw USFM / 原始标记
    Markup,
}

impl ContentMode {
    pub fn from_plaintext(plaintext: bool) -> Self {
        if plaintext {
            ContentMode::Plain
        } else {
            ContentMode::Markup
        }
    }
}

/// Lookup failures of a text source / 文本源查找错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorpusError {
    #[error("bible not found: {0}")]
    BibleNotFound(String),
    #[error("book {book} not found in {bible}")]
    BookNotFound { bible: String, book: i32 },
    #[error("chapter {book}:{chapter} not found in {bible}")]
    ChapterNotFound { bible: String, book: i32, chapter: i32 },
    #[error("verse {book}:{chapter}:{verse} not found in {bible}")]
    VerseNotFound {
        bible: String,
        book: i32,
        chapter: i32,
        verse: String,
    },
}

/// Verse content provider used by the search engine / 搜索引擎使用的经文提供者
///
/// All listings are returned in canonical order (ascending book, chapter, verse number).
pub trait TextSource: Send + Sync {
    /// Names of all bibles held by the source
    fn bibles(&self) -> Vec<String>;

    fn books(&self, bible: &str) -> Result<Vec<i32>, CorpusError>;

    fn chapters(&self, bible: &str, book: i32) -> Result<Vec<i32>, CorpusError>;

    /// Verse labels of a chapter ("1", "2", "3-4", ...)
    fn verses(&self, bible: &str, book: i32, chapter: i32) -> Result<Vec<String>, CorpusError>;

    /// Plain text of one verse / 纯文本
    fn verse_text(&self, bible: &str, book: i32, chapter: i32, verse: &str) -> Result<String, CorpusError>;

    /// Raw USFM of one verse / USFM 原文
    fn verse_usfm(&self, bible: &str, book: i32, chapter: i32, verse: &str) -> Result<String, CorpusError>;

    fn verse_content(
        &self,
        bible: &str,
        book: i32,
        chapter: i32,
        verse: &str,
        mode: ContentMode,
    ) -> Result<String, CorpusError> {
        match mode {
            ContentMode::Plain => self.verse_text(bible, book, chapter, verse),
            ContentMode::Markup => self.verse_usfm(bible, book, chapter, verse),
        }
    }
}
