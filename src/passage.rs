//! Passage reference and its token codec / 经文引用及其编码
//!
//! Token layout: `book:chapter:verse:bible`, with `verse` and `bible` percent-encoded so neither
//! can carry the `:` separator (or a newline, which separates tokens in hit lists).

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const SEPARATOR: char = ':';

/// Reference to one verse of a bible / 单节经文引用
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Passage {
    pub bible: String,
    pub book: i32,
    pub chapter: i32,
    /// "3", "3-4", "3a"
    pub verse: String,
}

/// Malformed passage token / 无效的经文编码
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("passage token {0:?} does not have four fields")]
    FieldCount(String),
    #[error("passage token field {field} is not a number: {value:?}")]
    NotANumber { field: &'static str, value: String },
    #[error("passage token field {field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: i32 },
    #[error("passage token field {0} is empty")]
    Empty(&'static str),
    #[error("passage token field {field} has an invalid escape: {value:?}")]
    InvalidEscape { field: &'static str, value: String },
}

impl Passage {
    pub fn new(bible: impl Into<String>, book: i32, chapter: i32, verse: impl Into<String>) -> Self {
        Self {
            bible: bible.into(),
            book,
            chapter,
            verse: verse.into(),
        }
    }

    /// Leading number of the verse label: "3-4" -> 3, "12a" -> 12
    pub fn verse_number(&self) -> i32 {
        leading_number(&self.verse)
    }

    /// Encode into an opaque token / 编码
    pub fn encode(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}{sep}{}",
            self.book,
            self.chapter,
            urlencoding::encode(&self.verse),
            urlencoding::encode(&self.bible),
            sep = SEPARATOR
        )
    }

    /// Decode a token produced by [`Passage::encode`] / 解码
    pub fn decode(token: &str) -> Result<Self, DecodeError> {
        let fields: Vec<&str> = token.trim().split(SEPARATOR).collect();
        let [book, chapter, verse, bible] = fields.as_slice() else {
            return Err(DecodeError::FieldCount(token.to_string()));
        };

        let book = parse_ordinal("book", book)?;
        let chapter = parse_ordinal("chapter", chapter)?;

        let verse = unescape("verse", verse)?;
        if verse.is_empty() {
            return Err(DecodeError::Empty("verse"));
        }
        if !verse.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(DecodeError::NotANumber { field: "verse", value: verse });
        }

        let bible = unescape("bible", bible)?;
        if bible.is_empty() {
            return Err(DecodeError::Empty("bible"));
        }

        Ok(Self { bible, book, chapter, verse })
    }
}

impl Ord for Passage {
    fn cmp(&self, other: &Self) -> Ordering {
        self.book
            .cmp(&other.book)
            .then(self.chapter.cmp(&other.chapter))
            .then(self.verse_number().cmp(&other.verse_number()))
            .then_with(|| self.verse.cmp(&other.verse))
            .then_with(|| self.bible.cmp(&other.bible))
    }
}

impl PartialOrd for Passage {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Passage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", crate::books::english_name(self.book), self.chapter, self.verse)
    }
}

/// Parse the leading decimal digits of a verse label, 0 if there are none
pub fn leading_number(label: &str) -> i32 {
    let digits: String = label.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

fn parse_ordinal(field: &'static str, value: &str) -> Result<i32, DecodeError> {
    let number: i32 = value.parse().map_err(|_| DecodeError::NotANumber {
        field,
        value: value.to_string(),
    })?;
    if number < 1 {
        return Err(DecodeError::OutOfRange { field, value: number });
    }
    Ok(number)
}

fn unescape(field: &'static str, value: &str) -> Result<String, DecodeError> {
    urlencoding::decode(value)
        .map(|v| v.into_owned())
        .map_err(|_| DecodeError::InvalidEscape {
            field,
            value: value.to_string(),
        })
}
