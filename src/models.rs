use serde::{Deserialize, Serialize};

/// One stored chapter of USFM / 存储的章节
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChapterRow {
    pub bible: String,
    pub book: i64,
    pub chapter: i64,
    pub usfm: String,
    pub updated_at: String,
}

/// Result of importing a directory of USFM files / 导入统计
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportStats {
    pub bibles: usize,
    pub books: usize,
    pub chapters: usize,
    pub failed_files: usize,
}
