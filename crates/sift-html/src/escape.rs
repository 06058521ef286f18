//! Character reference escaping outside the tokenizer.
//!
//! [`escape_markup`] is what token serialization uses for text and attribute
//! values; [`escape_text`] is the same minus carriage returns. [`unescape`] decodes references anywhere in a string with the same
//! named and numeric tables the tokenizer uses, without the attribute-value
//! special cases of § 13.2.5.73.

use crate::tokenizer::character_reference::numeric_reference_to_char;
use crate::tokenizer::named_character_references::longest_entity_prefix;

/// Escape the five markup-significant characters.
///
/// `&`, `'`, `<`, `>` and `"` become `&amp;`, `&#39;`, `&lt;`, `&gt;` and
/// `&#34;`. The numeric forms for the quotes are shorter than `&apos;` and
/// `&quot;` and are understood by every HTML version.
///
/// ```
/// use sift_html::escape::escape_text;
///
/// assert_eq!(escape_text(r#"<a href="x">"#), "&lt;a href=&#34;x&#34;&gt;");
/// ```
#[must_use]
pub fn escape_text(s: &str) -> String {
    escape(s, false)
}

/// Escape like [`escape_text`], and also write `\r` as `&#13;`.
///
/// Input preprocessing turns a literal carriage return into a line feed, so
/// one decoded from `&#13;` has to go back out as a reference to re-tokenize
/// unchanged.
///
/// ```
/// use sift_html::escape::escape_markup;
///
/// assert_eq!(escape_markup("a\r\nb & c"), "a&#13;\nb &amp; c");
/// ```
#[must_use]
pub fn escape_markup(s: &str) -> String {
    escape(s, true)
}

fn escape(s: &str, carriage_return: bool) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '\'' => escaped.push_str("&#39;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\r' if carriage_return => escaped.push_str("&#13;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Decode every named and numeric character reference in `s`.
///
/// The trailing semicolon is optional for numeric references and for the
/// legacy named references that allow it. An `&` that does not start a known
/// reference is kept as is.
///
/// ```
/// use sift_html::escape::unescape;
///
/// assert_eq!(unescape("fish &amp; chips"), "fish & chips");
/// assert_eq!(unescape("&#65;&#x42;&#67"), "ABC");
/// assert_eq!(unescape("&bogus; &"), "&bogus; &");
/// ```
#[must_use]
pub fn unescape(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut unescaped = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        unescaped.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        let decoded = if let Some(numeric) = after.strip_prefix('#') {
            decode_numeric(numeric).map(|(consumed, c)| (consumed + 1, DecodedReference::Char(c)))
        } else {
            longest_entity_prefix(after)
                .map(|(consumed, replacement)| (consumed, DecodedReference::Str(replacement)))
        };

        match decoded {
            Some((consumed, reference)) => {
                match reference {
                    DecodedReference::Char(c) => unescaped.push(c),
                    DecodedReference::Str(replacement) => unescaped.push_str(replacement),
                }
                rest = &after[consumed..];
            }
            None => {
                unescaped.push('&');
                rest = after;
            }
        }
    }
    unescaped.push_str(rest);
    unescaped
}

enum DecodedReference {
    Char(char),
    Str(&'static str),
}

/// Decode the part of a numeric reference after `&#`.
///
/// Returns the number of bytes consumed (including a closing `;`) and the
/// character, or `None` when there are no digits.
fn decode_numeric(s: &str) -> Option<(usize, char)> {
    let (radix, prefix_len) = match s.as_bytes().first() {
        Some(b'x' | b'X') => (16, 1),
        _ => (10, 0),
    };

    let digits = &s[prefix_len..];
    let digit_len = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if digit_len == 0 {
        return None;
    }

    let code = digits[..digit_len]
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0u32, |code, digit| {
            code.saturating_mul(radix).saturating_add(digit)
        });

    let mut consumed = prefix_len + digit_len;
    if digits[digit_len..].starts_with(';') {
        consumed += 1;
    }
    Some((consumed, numeric_reference_to_char(code)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text_leaves_plain_text() {
        assert_eq!(escape_text("plain text"), "plain text");
        assert_eq!(escape_text("it's"), "it&#39;s");
        assert_eq!(escape_text("a & b"), "a &amp; b");
    }

    #[test]
    fn test_carriage_return_only_escaped_for_markup() {
        assert_eq!(escape_text("a\rb"), "a\rb");
        assert_eq!(escape_markup("a\rb"), "a&#13;b");
        assert_eq!(unescape(&escape_markup("x\r'y'\r")), "x\r'y'\r");
    }

    #[test]
    fn test_unescape_named() {
        assert_eq!(unescape("&lt;b&gt;"), "<b>");
        assert_eq!(unescape("&copy 2024"), "\u{00A9} 2024");
        assert_eq!(unescape("caf&eacute;"), "caf\u{00E9}");
    }

    #[test]
    fn test_unescape_numeric() {
        assert_eq!(unescape("&#8216;x&#8217;"), "\u{2018}x\u{2019}");
        assert_eq!(unescape("&#X41;"), "A");
        assert_eq!(unescape("&#0;"), "\u{FFFD}");
        assert_eq!(unescape("&#x110000;"), "\u{FFFD}");
        assert_eq!(unescape("&#128;"), "\u{20AC}");
    }

    #[test]
    fn test_unescape_without_digits_is_literal() {
        assert_eq!(unescape("&#;"), "&#;");
        assert_eq!(unescape("&#x;"), "&#x;");
        assert_eq!(unescape("a&"), "a&");
    }

    #[test]
    fn test_unescape_reverses_escape() {
        let original = r#"<p class="x">Tom & 'Jerry'</p>"#;
        assert_eq!(unescape(&escape_text(original)), original);
    }
}
