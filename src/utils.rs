//! String helpers shared by the engine and the HTTP layer / 字符串工具函数

/// Escape text for inclusion in HTML / HTML 转义
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Exactly "true" is true, everything else false / 字符串转布尔
pub fn convert_to_bool(value: &str) -> bool {
    value == "true"
}

pub fn bool_to_string(value: bool) -> String {
    if value { "true" } else { "false" }.to_string()
}

/// Parse an integer, falling back to 0 for anything malformed / 字符串转整数
pub fn convert_to_int(value: &str) -> i64 {
    value.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_conversions() {
        assert!(convert_to_bool("true"));
        assert!(!convert_to_bool("TRUE"));
        assert!(!convert_to_bool(" true"));
        assert!(!convert_to_bool("1"));
        assert!(!convert_to_bool(""));
        assert_eq!(bool_to_string(false), "false");
        assert_eq!(convert_to_int("42"), 42);
        assert_eq!(convert_to_int(" 7 "), 7);
        assert_eq!(convert_to_int("abc"), 0);
        assert_eq!(convert_to_int(""), 0);
    }
}
