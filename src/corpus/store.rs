//! SQLite chapter store / SQLite 章节存储
//!
//! The database is the durable copy of the text; the search engine reads from a
//! [`MemoryCorpus`] filled from it at startup.

use std::path::Path;

use anyhow::{anyhow, Result};
use chrono::Utc;
use sqlx::SqlitePool;

use super::usfm::{book_code, split_chapters};
use super::MemoryCorpus;
use crate::books;
use crate::models::{ChapterRow, ImportStats};

/// Create the chapter table / 创建章节表
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bible_chapters (
            bible TEXT NOT NULL,
            book INTEGER NOT NULL,
            chapter INTEGER NOT NULL,
            usfm TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            PRIMARY KEY (bible, book, chapter)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Insert or replace one chapter / 保存章节
pub async fn save_chapter(pool: &SqlitePool, bible: &str, book: i32, chapter: i32, usfm: &str) -> Result<()> {
    let now = Utc::now().to_rfc3339();
    sqlx::query(
        "INSERT INTO bible_chapters (bible, book, chapter, usfm, updated_at) VALUES (?, ?, ?, ?, ?)
         ON CONFLICT(bible, book, chapter) DO UPDATE SET usfm = excluded.usfm, updated_at = excluded.updated_at",
    )
    .bind(bible)
    .bind(book)
    .bind(chapter)
    .bind(usfm)
    .bind(&now)
    .execute(pool)
    .await?;
    Ok(())
}

/// Fill a memory corpus with every stored chapter, returns the chapter count / 加载全部章节
pub async fn load_into(pool: &SqlitePool, corpus: &MemoryCorpus) -> Result<usize> {
    let rows: Vec<ChapterRow> = sqlx::query_as(
        "SELECT bible, book, chapter, usfm, updated_at FROM bible_chapters ORDER BY bible, book, chapter",
    )
    .fetch_all(pool)
    .await?;

    for row in &rows {
        corpus.store_chapter(&row.bible, row.book as i32, row.chapter as i32, &row.usfm);
    }
    Ok(rows.len())
}

/// Import one USFM book into a bible, returns the number of chapters / 导入一卷书
pub async fn import_usfm_book(pool: &SqlitePool, bible: &str, usfm: &str) -> Result<usize> {
    let code = book_code(usfm).ok_or_else(|| anyhow!("USFM has no \\id marker"))?;
    let book = books::from_usfm_code(&code).ok_or_else(|| anyhow!("unknown book code: {}", code))?;

    let chapters = split_chapters(usfm);
    for (chapter, text) in &chapters {
        save_chapter(pool, bible, book, *chapter, text).await?;
    }
    tracing::debug!("Imported {} ({}) into {}: {} chapters", code, book, bible, chapters.len());
    Ok(chapters.len())
}

/// Import `<dir>/<bible>/*.usfm` / 导入目录
///
/// Every sub-directory is a bible, every `.usfm` or `.sfm` file in it one book. Files that
/// fail to import are logged and skipped.
pub async fn import_dir(pool: &SqlitePool, dir: &Path) -> Result<ImportStats> {
    let mut stats = ImportStats::default();

    for bible_entry in std::fs::read_dir(dir)? {
        let bible_path = bible_entry?.path();
        if !bible_path.is_dir() {
            continue;
        }
        let Some(bible) = bible_path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
            continue;
        };

        let mut files: Vec<_> = std::fs::read_dir(&bible_path)?
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.eq_ignore_ascii_case("usfm") || e.eq_ignore_ascii_case("sfm"))
                    .unwrap_or(false)
            })
            .collect();
        files.sort();

        let mut imported_books = 0;
        for file in files {
            let result = match std::fs::read_to_string(&file) {
                Ok(content) => import_usfm_book(pool, &bible, &content).await,
                Err(e) => Err(e.into()),
            };
            match result {
                Ok(chapters) => {
                    imported_books += 1;
                    stats.chapters += chapters;
                }
                Err(e) => {
                    tracing::warn!("Failed to import {:?}: {}", file, e);
                    stats.failed_files += 1;
                }
            }
        }

        if imported_books > 0 {
            stats.bibles += 1;
            stats.books += imported_books;
        }
    }

    tracing::info!(
        "USFM import from {:?}: {} bibles, {} books, {} chapters, {} failed",
        dir, stats.bibles, stats.books, stats.chapters, stats.failed_files
    );
    Ok(stats)
}
