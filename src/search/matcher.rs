//! Literal substring matching / 字面子串匹配
//!
//! Shared by the scan and the hit highlighter so both agree on what a match is.
//! Case-insensitive matching folds each character with `char::to_lowercase`, and
//! reported ranges are always byte ranges into the original text.

use std::ops::Range;

/// Whether `query` occurs in `text` / 是否包含
pub fn contains(text: &str, query: &str, case_sensitive: bool) -> bool {
    if query.is_empty() {
        return false;
    }
    if case_sensitive {
        return text.contains(query);
    }
    let needle = fold(query);
    text.char_indices()
        .any(|(start, _)| match_at(&text[start..], &needle).is_some())
}

/// Non-overlapping occurrences, left to right / 所有不重叠的匹配位置
pub fn find_matches(text: &str, query: &str, case_sensitive: bool) -> Vec<Range<usize>> {
    if query.is_empty() {
        return Vec::new();
    }
    if case_sensitive {
        return text
            .match_indices(query)
            .map(|(start, m)| start..start + m.len())
            .collect();
    }

    let needle = fold(query);
    let mut ranges = Vec::new();
    let mut start = 0;
    while start < text.len() {
        match match_at(&text[start..], &needle) {
            Some(len) => {
                ranges.push(start..start + len);
                start += len;
            }
            None => {
                start += text[start..].chars().next().map(char::len_utf8).unwrap_or(1);
            }
        }
    }
    ranges
}

fn fold(text: &str) -> Vec<char> {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Byte length of the prefix of `haystack` that folds to `needle`
fn match_at(haystack: &str, needle: &[char]) -> Option<usize> {
    let mut matched = 0;
    for (idx, c) in haystack.char_indices() {
        for folded in c.to_lowercase() {
            if matched == needle.len() || needle[matched] != folded {
                return None;
            }
            matched += 1;
        }
        if matched == needle.len() {
            return Some(idx + c.len_utf8());
        }
    }
    None
}
