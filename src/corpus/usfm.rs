//! USFM helpers - split books into chapters and chapters into verses / USFM 处理
//!
//! Only what the search engine needs: locating `\id`, `\c` and `\v` markers and
//! rendering a verse as plain text.

use once_cell::sync::Lazy;
use regex::Regex;

static ID_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\id\s+(\S+)").unwrap());
static CHAPTER_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\c\s+(\d+)").unwrap());
static VERSE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\v\s+(\S+)").unwrap());
/// Footnotes, endnotes and cross references including their content / 脚注与交叉引用
static NOTES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\\(?:fe|f|x)\s.*?\\(?:fe|f|x)\*").unwrap());
/// Word-level attributes such as `\w grace|strong="H2580"\w*`
static ATTRIBUTES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\|[^\\]*").unwrap());
static MARKERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\\+?[A-Za-z0-9]+\*?").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Book code from the `\id` line / 读取书卷代码
pub fn book_code(usfm: &str) -> Option<String> {
    ID_MARKER
        .captures(usfm)
        .map(|caps| caps[1].to_uppercase())
}

/// Split a book into chapters in order of appearance / 按章拆分
///
/// Content before the first `\c` is returned as chapter 0.
pub fn split_chapters(usfm: &str) -> Vec<(i32, String)> {
    let mut chapters = Vec::new();
    let mut start = 0;
    let mut number = 0;
    for caps in CHAPTER_MARKER.captures_iter(usfm) {
        let marker = caps.get(0).map(|m| m.start()).unwrap_or(start);
        let head = &usfm[start..marker];
        if number != 0 || !head.trim().is_empty() {
            chapters.push((number, head.to_string()));
        }
        number = caps[1].parse().unwrap_or(0);
        start = marker;
    }
    let tail = &usfm[start..];
    if number != 0 || !tail.trim().is_empty() {
        chapters.push((number, tail.to_string()));
    }
    chapters
}

/// Split a chapter into verses in order of appearance / 按节拆分
///
/// Every verse keeps its own `\v` marker. Content before the first `\v` is verse "0".
pub fn split_verses(usfm: &str) -> Vec<(String, String)> {
    let mut verses = Vec::new();
    let mut start = 0;
    let mut label = "0".to_string();
    for caps in VERSE_MARKER.captures_iter(usfm) {
        let marker = caps.get(0).map(|m| m.start()).unwrap_or(start);
        let head = &usfm[start..marker];
        if label != "0" || !head.trim().is_empty() {
            verses.push((label, head.trim_end().to_string()));
        }
        label = caps[1].to_string();
        start = marker;
    }
    let tail = &usfm[start..];
    if label != "0" || !tail.trim().is_empty() {
        verses.push((label, tail.trim_end().to_string()));
    }
    verses
}

/// Render USFM as plain text / 转为纯文本
///
/// Notes and cross references are dropped, verse numbers are dropped, remaining markers
/// are stripped and whitespace collapsed.
pub fn usfm_to_plain(usfm: &str) -> String {
    let text = NOTES.replace_all(usfm, "");
    let text = VERSE_MARKER.replace_all(&text, "");
    let text = CHAPTER_MARKER.replace_all(&text, "");
    let text = ATTRIBUTES.replace_all(&text, "");
    let text = MARKERS.replace_all(&text, "");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}
