//! Hit rendering - one passage as a link plus highlighted text / 命中渲染

use thiserror::Error;

use super::matcher::find_matches;
use super::schema::QueryParams;
use crate::corpus::{CorpusError, TextSource};
use crate::passage::{DecodeError, Passage};
use crate::utils::escape_html;

/// Failures while rendering one hit / 渲染命中失败
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HitError {
    #[error("invalid passage token: {0}")]
    Decode(#[from] DecodeError),
    #[error("passage text unavailable: {0}")]
    Corpus(#[from] CorpusError),
}

/// Escape `text` and wrap every occurrence of `query` in `<mark>` / 高亮
pub fn highlight(text: &str, query: &str, case_sensitive: bool) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut last = 0;
    for range in find_matches(text, query, case_sensitive) {
        out.push_str(&escape_html(&text[last..range.start]));
        out.push_str("<mark>");
        out.push_str(&escape_html(&text[range.clone()]));
        out.push_str("</mark>");
        last = range.end;
    }
    out.push_str(&escape_html(&text[last..]));
    out
}

/// Link that opens the editor at the passage / 打开编辑器的链接
pub fn editor_link(passage: &Passage, editor_url: &str) -> String {
    format!(
        "<a href=\"{}?switchbook={}&amp;switchchapter={}&amp;switchverse={}\">{}</a>",
        escape_html(editor_url),
        passage.book,
        passage.chapter,
        urlencoding::encode(&passage.verse),
        escape_html(&passage.to_string())
    )
}

/// Render one hit as an HTML fragment / 渲染单个命中
///
/// The verse is read in the representation recorded for the session and the session's
/// query is highlighted with the session's case sensitivity.
pub fn format_hit(
    source: &dyn TextSource,
    passage: &Passage,
    params: &QueryParams,
    editor_url: &str,
) -> Result<String, CorpusError> {
    let text = source.verse_content(
        &passage.bible,
        passage.book,
        passage.chapter,
        &passage.verse,
        params.content_mode(),
    )?;

    Ok(format!(
        "<div>{} {}</div>",
        editor_link(passage, editor_url),
        highlight(&text, &params.query, params.case_sensitive)
    ))
}
