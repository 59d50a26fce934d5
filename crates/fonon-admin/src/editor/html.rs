//! HTML helpers for editor content.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static MEDIA_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(img|video|iframe|audio)\b").expect("valid media tag regex"));

static TABLE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<table\b").expect("valid table tag regex"));

static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

static LINK_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:src|href)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid link attribute regex")
});

/// Normalise editor output: content with no media, no table and no visible
/// text is the empty string, anything else is kept as is.
pub fn sanitize_html(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }
    if MEDIA_TAG.is_match(html) || TABLE_TAG.is_match(html) {
        return html.to_string();
    }
    if text_content(html).trim().is_empty() {
        return String::new();
    }
    html.to_string()
}

/// Visible text of an HTML fragment, with non-breaking spaces as spaces.
pub fn text_content(html: &str) -> String {
    let stripped = ANY_TAG.replace_all(html, "");
    decode_entities(&stripped).replace('\u{a0}', " ")
}

/// Decoded `src` and `href` values of every element in the document.
pub fn referenced_urls(html: &str) -> HashSet<String> {
    LINK_ATTR
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|value| decode_entities(value.as_str()))
        .collect()
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", "\u{a0}")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

/// Paragraphs for plain text inserted after pasted files.
pub fn text_paragraphs(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                "<p><br></p>".to_string()
            } else {
                format!("<p>{}</p>", escape_text(line))
            }
        })
        .collect()
}

/// Whether a byte offset sits between tags, not inside one.
pub fn is_insertion_point(html: &str, offset: usize) -> bool {
    if offset > html.len() || !html.is_char_boundary(offset) {
        return false;
    }
    let before = &html[..offset];
    match (before.rfind('<'), before.rfind('>')) {
        (Some(open), Some(close)) => close > open,
        (Some(_), None) => false,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_empty_markup() {
        assert_eq!(sanitize_html(""), "");
        assert_eq!(sanitize_html("<p><br></p>"), "");
        assert_eq!(sanitize_html("<p>&nbsp; </p>"), "");
        assert_eq!(sanitize_html("<p>\u{a0}</p>"), "");
    }

    #[test]
    fn test_sanitize_keeps_media_and_tables() {
        let image = r#"<p><img src="/files/a.png"></p>"#;
        assert_eq!(sanitize_html(image), image);
        let table = "<table><tbody><tr><td><br></td></tr></tbody></table>";
        assert_eq!(sanitize_html(table), table);
        assert_eq!(sanitize_html("<p>Salom</p>"), "<p>Salom</p>");
    }

    #[test]
    fn test_text_content_decodes_entities() {
        assert_eq!(text_content("<p>a &amp; b</p>"), "a & b");
    }

    #[test]
    fn test_referenced_urls_are_decoded_and_exact() {
        let html = concat!(
            r#"<p><img src="https://cdn.test/a.png?v=1&amp;sig=abc"></p>"#,
            r#"<iframe class="ql-video" src='https://cdn.test/b.mp4'></iframe>"#,
            r#"<p><a href="https://cdn.test/c.png.bak">c</a></p>"#,
        );
        let urls = referenced_urls(html);
        assert!(urls.contains("https://cdn.test/a.png?v=1&sig=abc"));
        assert!(urls.contains("https://cdn.test/b.mp4"));
        assert!(!urls.contains("https://cdn.test/c.png"));
        assert_eq!(urls.len(), 3);
    }

    #[test]
    fn test_insertion_point() {
        let html = "<p>ab</p><p>cd</p>";
        assert!(is_insertion_point(html, 0));
        assert!(is_insertion_point(html, 9));
        assert!(is_insertion_point(html, html.len()));
        assert!(!is_insertion_point(html, 1));
        assert!(!is_insertion_point(html, html.len() + 1));
    }

    #[test]
    fn test_text_paragraphs_escape() {
        assert_eq!(text_paragraphs("a<b\n\nc"), "<p>a&lt;b</p><p><br></p><p>c</p>");
    }
}
