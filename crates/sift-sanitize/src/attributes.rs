//! Attribute cleaning for emitted tags.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use sift_html::Attribute;

/// `data:` or `javascript:` anywhere in a value, with any whitespace between
/// the letters. Matched against the lowercased value.
static SCHEME_INJECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(d\s*a\s*t\s*a|j\s*a\s*v\s*a\s*s\s*c\s*r\s*i\s*p\s*t\s*)\s*:")
        .expect("valid regex")
});

/// Root-relative paths (but not protocol-relative `//host` or `/\host`) and
/// the three permitted absolute schemes, anchored at the start of the value.
static LEGAL_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A(?:/(?:[^/\\]|\z)|mailto://|http://|https://)").expect("valid regex")
});

/// Returns the attributes worth keeping, in their original order.
///
/// An attribute survives when its key is allowlisted and its value is still
/// non-empty after two checks on the lowercased value:
/// - any value containing a `data:` or `javascript:` scheme is emptied
/// - an `href` must start with a root-relative path or `mailto://`,
///   `http://` or `https://`, or it is emptied
///
/// Values are never rewritten otherwise; the kept value is the original text.
///
/// ```
/// use sift_html::Attribute;
/// use sift_sanitize::attributes::clean_attributes;
/// use std::collections::BTreeSet;
///
/// let allowed = BTreeSet::from(["href".to_string()]);
/// let cleaned = clean_attributes(
///     &[
///         Attribute::new("href", "JavaScript:alert(1)"),
///         Attribute::new("onclick", "x()"),
///         Attribute::new("href", "/Home"),
///     ],
///     &allowed,
/// );
/// assert_eq!(cleaned, vec![Attribute::new("href", "/Home")]);
/// ```
#[must_use]
pub fn clean_attributes(attributes: &[Attribute], allowed: &BTreeSet<String>) -> Vec<Attribute> {
    attributes
        .iter()
        .filter(|attr| allowed.contains(&attr.name))
        .filter(|attr| is_safe_value(&attr.name, &attr.value))
        .cloned()
        .collect()
}

/// Returns false if the value would be emptied (or already is empty).
fn is_safe_value(key: &str, value: &str) -> bool {
    if value.is_empty() {
        return false;
    }

    let lowered = value.to_lowercase();
    if SCHEME_INJECTION.is_match(&lowered) {
        log::debug!("[Sanitizer] dropping {key} attribute with a script or data scheme");
        return false;
    }
    if key == "href" && !LEGAL_HREF.is_match(&lowered) {
        log::debug!("[Sanitizer] dropping href that is not root-relative, mailto or http(s)");
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed(keys: &[&str]) -> BTreeSet<String> {
        keys.iter().map(ToString::to_string).collect()
    }

    fn href(value: &str) -> Vec<Attribute> {
        clean_attributes(&[Attribute::new("href", value)], &allowed(&["href"]))
    }

    #[test]
    fn test_disallowed_keys_are_dropped() {
        let cleaned = clean_attributes(
            &[
                Attribute::new("id", "a"),
                Attribute::new("style", "color: red"),
                Attribute::new("class", "b"),
            ],
            &allowed(&["id", "class"]),
        );
        assert_eq!(
            cleaned,
            vec![Attribute::new("id", "a"), Attribute::new("class", "b")]
        );
    }

    #[test]
    fn test_empty_values_are_dropped() {
        let cleaned = clean_attributes(&[Attribute::new("title", "")], &allowed(&["title"]));
        assert!(cleaned.is_empty());
    }

    #[test]
    fn test_scheme_injection_with_whitespace() {
        let keys = allowed(&["src", "title"]);
        for value in [
            "javascript:alert(1)",
            "JAVASCRIPT:x",
            "jav a   script:x",
            "j\ta\nv\ra s c r i p t :x",
            "data:text/html;base64,AAAA",
            "D A T A :x",
            "see javascript:this",
        ] {
            assert!(
                clean_attributes(&[Attribute::new("src", value)], &keys).is_empty(),
                "{value:?} should be dropped"
            );
        }
        assert_eq!(
            clean_attributes(&[Attribute::new("title", "metadata")], &keys).len(),
            1
        );
    }

    #[test]
    fn test_legal_hrefs() {
        for value in [
            "/",
            "/path/to",
            "/?q=1",
            "http://example.com",
            "HTTPS://EXAMPLE.COM",
            "mailto://someone@example.com",
        ] {
            assert_eq!(href(value).len(), 1, "{value:?} should be kept");
        }
    }

    #[test]
    fn test_illegal_hrefs() {
        for value in [
            "//evil.example",
            "/\\evil.example",
            "relative/path",
            "#fragment",
            "ftp://example.com",
            "mailto:someone@example.com",
            " http://leading-space",
            "x http://late-scheme",
        ] {
            assert!(href(value).is_empty(), "{value:?} should be dropped");
        }
    }

    #[test]
    fn test_kept_value_keeps_original_case() {
        assert_eq!(href("/Docs"), vec![Attribute::new("href", "/Docs")]);
    }

    #[test]
    fn test_only_href_is_restricted_to_legal_urls() {
        let cleaned = clean_attributes(
            &[Attribute::new("src", "relative.png")],
            &allowed(&["src"]),
        );
        assert_eq!(cleaned.len(), 1);
    }
}
