//! Small shared helpers: URL/XML text handling, JSON field extraction, and
//! width-aware truncation for the TUI.

use serde_json::Value;
use unicode_width::UnicodeWidthChar;

pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(b as char);
            }
            b' ' => out.push_str("%20"),
            _ => {
                out.push('%');
                out.push_str(&format!("{b:02X}"));
            }
        }
    }
    out
}

/// Return the substring strictly between `start` and `end` markers (if present).
pub fn extract_between(s: &str, start: &str, end: &str) -> Option<String> {
    let i = s.find(start)? + start.len();
    let j = s[i..].find(end)? + i;
    Some(s[i..j].to_string())
}

pub fn s(v: &Value, key: &str) -> String {
    v.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

pub fn str_arr(v: &Value, key: &str) -> Vec<String> {
    v.get(key)
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|e| e.as_str().map(|s| s.to_owned()))
                .collect()
        })
        .unwrap_or_default()
}

/// Decode the five predefined XML entities. Feed payloads escape the nested
/// description markup, so this runs before any fragment parsing.
pub fn xml_unescape(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Strip a CDATA wrapper when present, otherwise return the trimmed input.
pub fn unwrap_cdata(s: &str) -> String {
    let t = s.trim();
    if let Some(inner) = t.strip_prefix("<![CDATA[").and_then(|r| r.strip_suffix("]]>")) {
        return inner.trim().to_string();
    }
    t.to_string()
}

/// Truncate `text` to at most `max` terminal cells, appending an ellipsis when
/// anything was cut. Wide (CJK) glyphs count as two cells.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let mut width = 0usize;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max.saturating_sub(1) {
            out.push('…');
            return out;
        }
        width += w;
        out.push(ch);
    }
    text.to_string()
}

/// Timestamp suitable for artifact file names, e.g. `2025-11-03T14-22-07`.
pub fn file_stamp() -> String {
    chrono::Local::now().format("%Y-%m-%dT%H-%M-%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_encode_covers_reserved_and_wide_chars() {
        assert_eq!(percent_encode(""), "");
        assert_eq!(percent_encode("abc-_.~"), "abc-_.~");
        assert_eq!(percent_encode("a b"), "a%20b");
        assert_eq!(percent_encode("C++"), "C%2B%2B");
        assert_eq!(percent_encode("김"), "%EA%B9%80");
    }

    #[test]
    fn extract_between_finds_inner_text() {
        assert_eq!(
            extract_between("<title>hi</title>", "<title>", "</title>").as_deref(),
            Some("hi")
        );
        assert!(extract_between("nope", "<a>", "</a>").is_none());
    }

    #[test]
    fn xml_unescape_and_cdata() {
        assert_eq!(xml_unescape("a &lt;b&gt; &amp;c"), "a <b> &c");
        assert_eq!(unwrap_cdata("<![CDATA[ text ]]>"), "text");
        assert_eq!(unwrap_cdata(" plain "), "plain");
    }

    #[test]
    fn truncate_respects_cell_width() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
        // Two-cell glyphs: the budget runs out twice as fast.
        assert_eq!(truncate_to_width("대한민국", 5), "대한…");
    }

    #[test]
    fn json_extractors() {
        let v: Value = serde_json::json!({"a": "x", "tags": ["t1", 2, "t2"]});
        assert_eq!(s(&v, "a"), "x");
        assert_eq!(s(&v, "missing"), "");
        assert_eq!(str_arr(&v, "tags"), vec!["t1".to_string(), "t2".to_string()]);
        assert!(str_arr(&v, "missing").is_empty());
    }
}
