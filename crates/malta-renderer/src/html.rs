//! HTML string helpers.

use std::collections::HashSet;

/// Escape `& < > " '` for use in HTML text and attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

/// Wrap every table in `<div class="table-wrapper">` for horizontal scrolling.
#[must_use]
pub fn wrap_tables(html: &str) -> String {
    html.replace("<table>", "<div class=\"table-wrapper\"><table>")
        .replace("</table>", "</table></div>")
}

/// Generates unique heading anchors within one document.
///
/// ASCII letters and digits are kept (lowercased), whitespace, `-` and `_`
/// become `-`, everything else is dropped. Repeats get `-1`, `-2`, ….
#[derive(Debug, Default)]
pub(crate) struct HeadingIds {
    used: HashSet<String>,
}

impl HeadingIds {
    pub(crate) fn generate(&mut self, text: &str) -> String {
        let mut base: String = text
            .trim()
            .chars()
            .filter_map(|c| match c {
                c if c.is_ascii_alphanumeric() => Some(c.to_ascii_lowercase()),
                c if c.is_ascii_whitespace() || c == '-' || c == '_' => Some('-'),
                _ => None,
            })
            .collect();
        if base.is_empty() {
            base.push_str("heading");
        }

        if self.used.insert(base.clone()) {
            return base;
        }
        let mut n = 1;
        loop {
            let candidate = format!("{base}-{n}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("$$Foo"), "$$Foo");
    }

    #[test]
    fn test_wrap_tables() {
        let html = "<p>x</p>\n<table>\n<tr><td>1</td></tr>\n</table>\n<table></table>";
        assert_eq!(
            wrap_tables(html),
            "<p>x</p>\n<div class=\"table-wrapper\"><table>\n<tr><td>1</td></tr>\n</table></div>\n\
             <div class=\"table-wrapper\"><table></table></div>"
        );
    }

    #[test]
    fn test_wrap_tables_without_tables() {
        assert_eq!(wrap_tables("<p>none</p>"), "<p>none</p>");
    }

    #[test]
    fn test_heading_ids() {
        let mut ids = HeadingIds::default();
        assert_eq!(ids.generate("Getting Started"), "getting-started");
        assert_eq!(ids.generate("  API_v2 -- Reference! "), "api-v2----reference");
        assert_eq!(ids.generate("Café"), "caf");
        assert_eq!(ids.generate("???"), "heading");
    }

    #[test]
    fn test_heading_ids_deduplicate() {
        let mut ids = HeadingIds::default();
        assert_eq!(ids.generate("Usage"), "usage");
        assert_eq!(ids.generate("Usage"), "usage-1");
        assert_eq!(ids.generate("Usage"), "usage-2");
        assert_eq!(ids.generate("usage-1"), "usage-1-1");
    }
}
