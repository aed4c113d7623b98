//! Canonical book table / 书卷元数据
//!
//! Book ordinals follow the Protestant canon order: 1..=39 Old Testament, 40..=66 New Testament.

use serde::{Deserialize, Serialize};

/// Book classification / 书卷分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookType {
    OldTestament,
    NewTestament,
    Unknown,
}

/// (USFM code, English name), indexed by ordinal - 1
const BOOKS: [(&str, &str); 66] = [
    ("GEN", "Genesis"),
    ("EXO", "Exodus"),
    ("LEV", "Leviticus"),
    ("NUM", "Numbers"),
    ("DEU", "Deuteronomy"),
    ("JOS", "Joshua"),
    ("JDG", "Judges"),
    ("RUT", "Ruth"),
    ("1SA", "1 Samuel"),
    ("2SA", "2 Samuel"),
    ("1KI", "1 Kings"),
    ("2KI", "2 Kings"),
    ("1CH", "1 Chronicles"),
    ("2CH", "2 Chronicles"),
    ("EZR", "Ezra"),
    ("NEH", "Nehemiah"),
    ("EST", "Esther"),
    ("JOB", "Job"),
    ("PSA", "Psalms"),
    ("PRO", "Proverbs"),
    ("ECC", "Ecclesiastes"),
    ("SNG", "Song of Solomon"),
    ("ISA", "Isaiah"),
    ("JER", "Jeremiah"),
    ("LAM", "Lamentations"),
    ("EZK", "Ezekiel"),
    ("DAN", "Daniel"),
    ("HOS", "Hosea"),
    ("JOL", "Joel"),
    ("AMO", "Amos"),
    ("OBA", "Obadiah"),
    ("JON", "Jonah"),
    ("MIC", "Micah"),
    ("NAM", "Nahum"),
    ("HAB", "Habakkuk"),
    ("ZEP", "Zephaniah"),
    ("HAG", "Haggai"),
    ("ZEC", "Zechariah"),
    ("MAL", "Malachi"),
    ("MAT", "Matthew"),
    ("MRK", "Mark"),
    ("LUK", "Luke"),
    ("JHN", "John"),
    ("ACT", "Acts"),
    ("ROM", "Romans"),
    ("1CO", "1 Corinthians"),
    ("2CO", "2 Corinthians"),
    ("GAL", "Galatians"),
    ("EPH", "Ephesians"),
    ("PHP", "Philippians"),
    ("COL", "Colossians"),
    ("1TH", "1 Thessalonians"),
    ("2TH", "2 Thessalonians"),
    ("1TI", "1 Timothy"),
    ("2TI", "2 Timothy"),
    ("TIT", "Titus"),
    ("PHM", "Philemon"),
    ("HEB", "Hebrews"),
    ("JAS", "James"),
    ("1PE", "1 Peter"),
    ("2PE", "2 Peter"),
    ("1JN", "1 John"),
    ("2JN", "2 John"),
    ("3JN", "3 John"),
    ("JUD", "Jude"),
    ("REV", "Revelation"),
];

const LAST_OLD_TESTAMENT: i32 = 39;

fn entry(book: i32) -> Option<&'static (&'static str, &'static str)> {
    if book < 1 {
        return None;
    }
    BOOKS.get((book - 1) as usize)
}

/// Testament of a book ordinal / 获取书卷所属约
pub fn book_type(book: i32) -> BookType {
    match book {
        1..=LAST_OLD_TESTAMENT => BookType::OldTestament,
        40..=66 => BookType::NewTestament,
        _ => BookType::Unknown,
    }
}

pub fn usfm_code(book: i32) -> Option<&'static str> {
    entry(book).map(|(code, _)| *code)
}

/// English name, falls back to the ordinal for books outside the canon
pub fn english_name(book: i32) -> String {
    entry(book)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| format!("Book {}", book))
}

/// Resolve a USFM `\id` code to a book ordinal / 由 USFM 代码查找书卷序号
pub fn from_usfm_code(code: &str) -> Option<i32> {
    let code = code.trim().to_uppercase();
    BOOKS
        .iter()
        .position(|(c, _)| *c == code)
        .map(|idx| idx as i32 + 1)
}
