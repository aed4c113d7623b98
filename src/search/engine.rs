//! Search engine - linear scan over a text source / 搜索引擎
//!
//! No index: every query walks every verse of the bible in canonical order and tests
//! literal containment. One verse yields at most one passage.

use std::sync::Arc;

use super::matcher;
use super::schema::SearchQuery;
use crate::corpus::{CorpusError, TextSource};
use crate::passage::Passage;

/// Scanning search engine / 扫描式搜索引擎
#[derive(Clone)]
pub struct SearchEngine {
    source: Arc<dyn TextSource>,
}

impl SearchEngine {
    pub fn new(source: Arc<dyn TextSource>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &Arc<dyn TextSource> {
        &self.source
    }

    /// Matching passages in scan order / 按扫描顺序返回匹配经文
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<Passage>, CorpusError> {
        let mut passages = Vec::new();
        self.search_with(query, |passage| passages.push(passage))?;
        Ok(passages)
    }

    /// Stream matches to `on_hit` as they are found / 流式返回匹配
    ///
    /// Returns the number of matches. Adapter failures abort the scan.
    pub fn search_with(
        &self,
        query: &SearchQuery,
        mut on_hit: impl FnMut(Passage),
    ) -> Result<usize, CorpusError> {
        if query.query.is_empty() {
            return Ok(0);
        }

        let bible = query.bible.as_str();
        let mut count = 0;
        for book in self.source.books(bible)? {
            for chapter in self.source.chapters(bible, book)? {
                for verse in self.source.verses(bible, book, chapter)? {
                    let content = self
                        .source
                        .verse_content(bible, book, chapter, &verse, query.mode)?;
                    if matcher::contains(&content, &query.query, query.case_sensitive) {
                        on_hit(Passage::new(bible, book, chapter, verse));
                        count += 1;
                    }
                }
            }
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{ContentMode, MemoryCorpus};

    fn engine() -> SearchEngine {
        let corpus = MemoryCorpus::new();
        corpus.store_chapter("KJV", 1, 1, "\\c 1\n\\v 1 And God said, Let there be light.\n\\v 2 And God saw the light.\n\\v 10 Said and said again.");
        corpus.store_chapter("KJV", 1, 2, "\\c 2\n\\v 1 He \\add said\\add* nothing.");
        corpus.store_chapter("KJV", 40, 5, "\\c 5\n\\v 3 Blessed are the poor.\n\\v 22 But I Say unto you.");
        SearchEngine::new(Arc::new(corpus))
    }

    fn refs(passages: &[Passage]) -> Vec<(i32, i32, String)> {
        passages.iter().map(|p| (p.book, p.chapter, p.verse.clone())).collect()
    }

    #[test]
    fn test_case_insensitive_scan() {
        let hits = engine().search(&SearchQuery::new("KJV", "said")).unwrap();
        assert_eq!(
            refs(&hits),
            vec![(1, 1, "1".to_string()), (1, 1, "10".to_string()), (1, 2, "1".to_string())]
        );
        assert!(hits.iter().all(|p| p.bible == "KJV"));
    }

    #[test]
    fn test_case_sensitive_scan() {
        let query = SearchQuery::new("KJV", "Said").case_sensitive(true);
        let hits = engine().search(&query).unwrap();
        assert_eq!(refs(&hits), vec![(1, 1, "10".to_string())]);

        let query = SearchQuery::new("KJV", "say").case_sensitive(false);
        assert_eq!(refs(&engine().search(&query).unwrap()), vec![(40, 5, "22".to_string())]);
    }

    #[test]
    fn test_markup_mode_sees_markers() {
        let plain = SearchQuery::new("KJV", "\\add");
        assert!(engine().search(&plain).unwrap().is_empty());

        let markup = SearchQuery::new("KJV", "\\add").mode(ContentMode::Markup);
        assert_eq!(refs(&engine().search(&markup).unwrap()), vec![(1, 2, "1".to_string())]);
    }

    #[test]
    fn test_scan_order_is_canonical() {
        let hits = engine().search(&SearchQuery::new("KJV", " ")).unwrap();
        assert!(hits.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(hits.len(), 6);
    }

    #[test]
    fn test_repeated_verse_marker_yields_one_passage() {
        let corpus = MemoryCorpus::new();
        corpus.store_chapter("KJV", 1, 1, "\\c 1\n\\v 1 alpha\n\\v 1 omega");
        let engine = SearchEngine::new(Arc::new(corpus));

        let omega = engine.search(&SearchQuery::new("KJV", "omega")).unwrap();
        assert_eq!(refs(&omega), vec![(1, 1, "1".to_string())]);

        let alpha = engine.search(&SearchQuery::new("KJV", "alpha")).unwrap();
        assert_eq!(refs(&alpha), vec![(1, 1, "1".to_string())]);
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        assert!(engine().search(&SearchQuery::new("KJV", "")).unwrap().is_empty());
        // 空查询不触达文本源
        assert!(engine().search(&SearchQuery::new("missing", "")).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_bible_is_an_error() {
        let result = engine().search(&SearchQuery::new("NIV", "light"));
        assert_eq!(result, Err(CorpusError::BibleNotFound("NIV".to_string())));
    }

    #[test]
    fn test_streaming_matches_collected() {
        let mut streamed = Vec::new();
        let engine = engine();
        let query = SearchQuery::new("KJV", "light");
        let count = engine.search_with(&query, |p| streamed.push(p)).unwrap();
        assert_eq!(count, 2);
        assert_eq!(streamed, engine.search(&query).unwrap());
    }
}
