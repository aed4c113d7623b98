//! In-memory text source / 内存文本源
//!
//! Chapters are stored as USFM and split into verses once, at store time, so that a
//! full scan only walks prepared strings.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use super::usfm::{split_verses, usfm_to_plain};
use super::{CorpusError, TextSource};
use crate::passage::leading_number;

/// Prepared verse / 预处理后的经文
#[derive(Debug, Clone)]
struct VerseEntry {
    label: String,
    number: i32,
    usfm: String,
    plain: String,
}

#[derive(Debug, Clone, Default)]
struct ChapterEntry {
    verses: Vec<VerseEntry>,
}

impl ChapterEntry {
    fn from_usfm(usfm: &str) -> Self {
        let mut verses: Vec<VerseEntry> = Vec::new();
        for (label, usfm) in split_verses(usfm) {
            // 重复的节号合并为一节，每个标签只对应一段经文
            if let Some(existing) = verses.iter_mut().find(|v| v.label == label) {
                existing.usfm.push('\n');
                existing.usfm.push_str(&usfm);
                existing.plain = usfm_to_plain(&existing.usfm);
                continue;
            }
            verses.push(VerseEntry {
                number: leading_number(&label),
                plain: usfm_to_plain(&usfm),
                label,
                usfm,
            });
        }
        // 稳定排序，保持同号经文的出现顺序
        verses.sort_by_key(|v| v.number);
        Self { verses }
    }

    /// Exact label first, then the first verse with the same number ("3" finds "3-4")
    fn find(&self, verse: &str) -> Option<&VerseEntry> {
        self.verses.iter().find(|v| v.label == verse).or_else(|| {
            let number = leading_number(verse);
            self.verses.iter().find(|v| v.number == number)
        })
    }
}

/// bible -> (book, chapter) -> chapter
type Bibles = BTreeMap<String, BTreeMap<(i32, i32), ChapterEntry>>;

/// Thread-safe in-memory corpus / 线程安全的内存经文库
#[derive(Default)]
pub struct MemoryCorpus {
    bibles: RwLock<Bibles>,
}

impl MemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store (or replace) one chapter of USFM / 存储一章
    pub fn store_chapter(&self, bible: &str, book: i32, chapter: i32, usfm: &str) {
        let entry = ChapterEntry::from_usfm(usfm);
        self.bibles
            .write()
            .entry(bible.to_string())
            .or_default()
            .insert((book, chapter), entry);
    }

    /// Number of stored chapters across all bibles / 章节总数
    pub fn chapter_count(&self) -> usize {
        self.bibles.read().values().map(|b| b.len()).sum()
    }

    fn with_verse<T>(
        &self,
        bible: &str,
        book: i32,
        chapter: i32,
        verse: &str,
        f: impl FnOnce(&VerseEntry) -> T,
    ) -> Result<T, CorpusError> {
        let bibles = self.bibles.read();
        let chapters = bibles
            .get(bible)
            .ok_or_else(|| CorpusError::BibleNotFound(bible.to_string()))?;
        let entry = chapters
            .get(&(book, chapter))
            .ok_or_else(|| CorpusError::ChapterNotFound {
                bible: bible.to_string(),
                book,
                chapter,
            })?;
        entry
            .find(verse)
            .map(f)
            .ok_or_else(|| CorpusError::VerseNotFound {
                bible: bible.to_string(),
                book,
                chapter,
                verse: verse.to_string(),
            })
    }
}

impl TextSource for MemoryCorpus {
    fn bibles(&self) -> Vec<String> {
        self.bibles.read().keys().cloned().collect()
    }

    fn books(&self, bible: &str) -> Result<Vec<i32>, CorpusError> {
        let bibles = self.bibles.read();
        let chapters = bibles
            .get(bible)
            .ok_or_else(|| CorpusError::BibleNotFound(bible.to_string()))?;
        let mut books: Vec<i32> = chapters.keys().map(|(book, _)| *book).collect();
        books.dedup();
        Ok(books)
    }

    fn chapters(&self, bible: &str, book: i32) -> Result<Vec<i32>, CorpusError> {
        let bibles = self.bibles.read();
        let chapters = bibles
            .get(bible)
            .ok_or_else(|| CorpusError::BibleNotFound(bible.to_string()))?;
        let numbers: Vec<i32> = chapters
            .range((book, i32::MIN)..=(book, i32::MAX))
            .map(|((_, chapter), _)| *chapter)
            .collect();
        if numbers.is_empty() {
            return Err(CorpusError::BookNotFound {
                bible: bible.to_string(),
                book,
            });
        }
        Ok(numbers.into_iter().filter(|c| *c >= 1).collect())
    }

    fn verses(&self, bible: &str, book: i32, chapter: i32) -> Result<Vec<String>, CorpusError> {
        let bibles = self.bibles.read();
        let chapters = bibles
            .get(bible)
            .ok_or_else(|| CorpusError::BibleNotFound(bible.to_string()))?;
        let entry = chapters
            .get(&(book, chapter))
            .ok_or_else(|| CorpusError::ChapterNotFound {
                bible: bible.to_string(),
                book,
                chapter,
            })?;
        Ok(entry
            .verses
            .iter()
            .filter(|v| v.number >= 1)
            .map(|v| v.label.clone())
            .collect())
    }

    fn verse_text(&self, bible: &str, book: i32, chapter: i32, verse: &str) -> Result<String, CorpusError> {
        self.with_verse(bible, book, chapter, verse, |v| v.plain.clone())
    }

    fn verse_usfm(&self, bible: &str, book: i32, chapter: i32, verse: &str) -> Result<String, CorpusError> {
        self.with_verse(bible, book, chapter, verse, |v| v.usfm.clone())
    }
}
