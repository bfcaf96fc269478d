//! HTML escaping utilities.

use std::borrow::Cow;

/// Escape HTML special characters for safe rendering.
///
/// Borrows the input unchanged when there is nothing to escape.
pub fn html_escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape_borrows_clean_input() {
        assert!(matches!(html_escape("just text"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_html_escape_comment_payload() {
        assert_eq!(
            html_escape("<img src=x onerror='boom'> & \"more\""),
            "&lt;img src=x onerror=&#x27;boom&#x27;&gt; &amp; &quot;more&quot;"
        );
    }
}
