use axum::response::Html;

use biblesearch_backend::utils::escape_html;

use crate::state::AppState;

/// Search form listing every readable bible / 搜索表单页面
pub fn render(state: &AppState, requested: Option<&str>) -> Html<String> {
    let current = state.resolve_bible(requested);
    let options: String = state
        .readable_bibles()
        .iter()
        .map(|bible| {
            let selected = if *bible == current { " selected" } else { "" };
            format!("<option value=\"{0}\"{1}>{0}</option>", escape_html(bible), selected)
        })
        .collect();
    // 会话标识只需在单个用户内唯一
    let session_id = chrono::Utc::now().timestamp_millis();

    Html(format!(r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Search</title>
</head>
<body>
    <form method="get" action="/search/search2">
        <input type="hidden" name="i" value="{session_id}">
        <select name="bible">{options}</select>
        <input type="text" name="q">
        <label><input type="checkbox" name="c" value="true"> Case sensitive</label>
        <label><input type="checkbox" name="p" value="true" checked> Plain text</label>
        <select name="b">
            <option value="">Whole Bible</option>
            <option value="currentbook">Current book</option>
            <option value="otbooks">Old Testament</option>
            <option value="ntbooks">New Testament</option>
        </select>
        <select name="s">
            <option value="load">Load</option>
            <option value="add">Add</option>
            <option value="remove">Remove</option>
            <option value="intersect">Intersect</option>
        </select>
        <button type="submit">Search</button>
    </form>
</body>
</html>"#))
}

#[cfg(test)]
mod tests {
    use biblesearch_backend::config::AppConfig;

    use super::*;
    use crate::api::test_support;

    #[tokio::test]
    async fn test_lists_readable_bibles() {
        let state = test_support::state().await;
        let html = render(&state, Some("WEB")).0;
        assert!(html.contains("<option value=\"KJV\">KJV</option>"));
        assert!(html.contains("<option value=\"WEB\" selected>WEB</option>"));
    }

    #[tokio::test]
    async fn test_hides_unreadable_bibles() {
        let mut config = AppConfig::default();
        config.access.readable_bibles = vec!["KJV".to_string()];
        let state = test_support::state_with(config).await;
        let html = render(&state, None).0;
        assert!(html.contains("<option value=\"KJV\" selected>KJV</option>"));
        assert!(!html.contains("WEB"));
    }
}
