//! Plain-text extraction from markup.

use sift_html::escape::{escape_text, unescape};

/// Line-ending markup that survives as a newline.
const LINE_BREAKS: [&str; 4] = ["</p>", "<br>", "</br>", "<br/>"];

/// Typographic entities flattened before general unescaping.
const PLAIN_ENTITIES: [(&str, &str); 7] = [
    ("&#8216;", "'"),
    ("&#8217;", "'"),
    ("&#8220;", "\""),
    ("&#8221;", "\""),
    ("&nbsp;", " "),
    ("&quot;", "\""),
    ("&apos;", "'"),
];

/// Escapes put back after the final escaping pass. Order matters: `&amp; ` is
/// replaced before `&amp;amp; ` can match.
const HARMLESS_ESCAPES: [(&str, &str); 4] = [
    ("&#34;", "\""),
    ("&#39;", "'"),
    ("&amp; ", "& "),
    ("&amp;amp; ", "& "),
];

/// Strip tags from `s`, leaving readable text.
///
/// Input with no `<` or `>` skips tag removal. Otherwise newlines are removed,
/// paragraph ends and line breaks become newlines, and everything from each
/// `<` to the next `>` is dropped whether or not it forms a valid tag.
/// Entities are then decoded and the result escaped again, apart from quotes
/// and an ampersand followed by a space. The output never contains a raw `<`
/// or `>`.
///
/// ```
/// use sift_sanitize::text::strip_html;
///
/// assert_eq!(strip_html("<p>Fish &amp; chips</p><p>Peas</p>"), "Fish & chips\nPeas\n");
/// assert_eq!(strip_html("&ldquo;1 &lt; 2&rdquo;"), "\u{201C}1 &lt; 2\u{201D}");
/// ```
#[must_use]
pub fn strip_html(s: &str) -> String {
    let mut output = if s.contains(['<', '>']) {
        remove_tags(s)
    } else {
        s.to_string()
    };

    for (entity, plain) in PLAIN_ENTITIES {
        output = output.replace(entity, plain);
    }

    let mut output = escape_text(&unescape(&output));

    for (escaped, plain) in HARMLESS_ESCAPES {
        output = output.replace(escaped, plain);
    }
    output
}

fn remove_tags(s: &str) -> String {
    let mut text = s.replace('\n', "");
    for line_break in LINE_BREAKS {
        text = text.replace(line_break, "\n");
    }

    let mut stripped = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => stripped.push(c),
            _ => {}
        }
    }
    stripped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_without_tags_skips_removal() {
        assert_eq!(strip_html("line one\nline two"), "line one\nline two");
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(strip_html("a\n<br>b<br/>c</br>d"), "a\nb\nc\nd");
    }

    #[test]
    fn test_unbalanced_angle_brackets() {
        assert_eq!(strip_html("a > b < c"), "a  b ");
        assert_eq!(strip_html("<<b>>x"), "x");
    }

    #[test]
    fn test_remove_tags_keeps_text_between_tags() {
        assert_eq!(remove_tags("<i>x</i><b>y</b>"), "xy");
    }
}
