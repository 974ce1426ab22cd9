//! Escaping helpers for generated XML and HTML.

/// Escape text for XML element content and attribute values.
///
/// Control characters that XML 1.0 forbids are dropped.
#[must_use]
pub fn escape_xml(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 8);

    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&apos;"),
            '\t' | '\n' | '\r' => result.push(c),
            c if c.is_control() => {}
            c => result.push(c),
        }
    }

    result
}

/// Escape text for HTML element content and quoted attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 8);

    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            c => result.push(c),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xml_escapes_markup_characters() {
        assert_eq!(
            escape_xml(r#"Bass & Pike <Tips> "2024" it's"#),
            "Bass &amp; Pike &lt;Tips&gt; &quot;2024&quot; it&apos;s"
        );
    }

    #[test]
    fn xml_drops_forbidden_control_characters() {
        assert_eq!(escape_xml("a\u{0}b\u{1b}c\nd"), "abc\nd");
    }

    #[test]
    fn html_escapes_quotes_for_attributes() {
        assert_eq!(escape_html(r#"<img alt="x">"#), "&lt;img alt=&quot;x&quot;&gt;");
        assert_eq!(escape_html("O'Neil"), "O&#39;Neil");
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(escape_xml("Trout fishing in Montana"), "Trout fishing in Montana");
    }
}
