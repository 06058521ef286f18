//! URL path and file name slugs.
//!
//! Slugs are lowercase ASCII. Separators (`space & _ = + :`) become `-`,
//! accented letters are transliterated, and anything else outside the allowed
//! class is removed. A slug may come out empty; callers must handle that.

use std::sync::LazyLock;

use regex::Regex;

use crate::accents::transliterate;

/// Characters replaced with `-` rather than removed.
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ &_=+:]").expect("valid regex"));

/// Everything a path slug may not contain.
static ILLEGAL_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^[:alnum:]\-./]").expect("valid regex"));

/// Everything a file name slug may not contain.
static ILLEGAL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^[:alnum:]\-.]").expect("valid regex"));

/// Make `text` safe to use as a URL path.
///
/// Parent references are removed before the path is cleaned, so the result
/// never climbs out of wherever it is joined.
///
/// ```
/// use sift_sanitize::slug::path;
///
/// assert_eq!(path("/Blog/My Post: Ça va?"), "/blog/my-post-ca-va");
/// assert_eq!(path("../../etc/passwd"), "/etc/passwd");
/// ```
#[must_use]
pub fn path(text: &str) -> String {
    let lowered = text.to_lowercase().replace("..", "");
    clean_string(&clean_path(&lowered), &ILLEGAL_PATH)
}

/// Make `text` safe to use as a file name.
///
/// Only the last path element is kept.
///
/// ```
/// use sift_sanitize::slug::name;
///
/// assert_eq!(name("uploads/Résumé Final.PDF"), "resume-final.pdf");
/// assert_eq!(name("../.."), "");
/// ```
#[must_use]
pub fn name(text: &str) -> String {
    let lowered = text.to_lowercase();
    clean_string(&clean_path(base_name(&lowered)), &ILLEGAL_NAME)
}

/// Replace separators with `-` and remove characters matching `illegal`.
///
/// Surrounding spaces are trimmed first and accents transliterated. Afterwards
/// `--` is collapsed and `..` removed until neither remains, so removing
/// characters cannot bring a doubled dash or a parent reference back.
#[must_use]
pub fn clean_string(s: &str, illegal: &Regex) -> String {
    let flattened = transliterate(s.trim_matches(' '));
    let dashed = SEPARATORS.replace_all(&flattened, "-");
    let mut cleaned = illegal.replace_all(&dashed, "").into_owned();

    while cleaned.contains("--") || cleaned.contains("..") {
        cleaned = cleaned.replace("--", "-").replace("..", "");
    }
    cleaned
}

/// Lexically clean a slash-separated path.
///
/// Repeated slashes collapse, `.` elements go, `name/..` pairs cancel, `..`
/// at the root is dropped and trailing slashes are removed. An empty result
/// is `.`.
fn clean_path(p: &str) -> String {
    let rooted = p.starts_with('/');
    let mut elements: Vec<&str> = Vec::new();

    for element in p.split('/') {
        match element {
            "" | "." => {}
            ".." => {
                if elements.last().is_some_and(|last| *last != "..") {
                    let _ = elements.pop();
                } else if !rooted {
                    elements.push("..");
                }
            }
            _ => elements.push(element),
        }
    }

    let joined = elements.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// The last element of a slash-separated path, ignoring trailing slashes.
///
/// An empty path gives `.` and a path of only slashes gives `/`.
fn base_name(p: &str) -> &str {
    if p.is_empty() {
        return ".";
    }
    let trimmed = p.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path(""), ".");
        assert_eq!(clean_path("a//b/./c/"), "a/b/c");
        assert_eq!(clean_path("a/b/../c"), "a/c");
        assert_eq!(clean_path("../a"), "../a");
        assert_eq!(clean_path("/../a"), "/a");
        assert_eq!(clean_path("//"), "/");
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name(""), ".");
        assert_eq!(base_name("a/b/"), "b");
        assert_eq!(base_name("///"), "/");
        assert_eq!(base_name("file.txt"), "file.txt");
    }

    #[test]
    fn test_clean_string_collapses_until_stable() {
        assert_eq!(clean_string("a - b", &ILLEGAL_NAME), "a-b");
        assert_eq!(clean_string("a.!.b", &ILLEGAL_NAME), "ab");
        assert_eq!(clean_string("a-.!.-b", &ILLEGAL_NAME), "a-b");
        assert_eq!(clean_string("  x  ", &ILLEGAL_NAME), "x");
    }

    #[test]
    fn test_separators() {
        assert_eq!(clean_string("a&b_c=d+e:f", &ILLEGAL_NAME), "a-b-c-d-e-f");
    }
}
