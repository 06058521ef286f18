//! Integration tests for path and name slugs.

use sift_sanitize::accents::transliterate;
use sift_sanitize::slug::{name, path};

#[test]
fn test_path_lowercases_and_dashes() {
    assert_eq!(path("/Hello World"), "/hello-world");
    assert_eq!(path("News & Events/2024"), "news-events/2024");
}

#[test]
fn test_path_removes_parent_references() {
    assert_eq!(path("a/../../b"), "a/b");
    assert_eq!(path("/..."), "/");
    assert_eq!(path("...."), ".");
}

#[test]
fn test_path_keeps_dots_and_slashes() {
    assert_eq!(path("/docs/v1.2/index.html"), "/docs/v1.2/index.html");
}

#[test]
fn test_path_drops_tilde_and_punctuation() {
    assert_eq!(path("/~user/it's (mine)!"), "/user/its-mine");
}

#[test]
fn test_path_cleans_redundant_elements() {
    assert_eq!(path("a//b/./c/"), "a/b/c");
    assert_eq!(path(""), ".");
}

#[test]
fn test_path_transliterates() {
    assert_eq!(path("Crème Brûlée"), "creme-brulee");
}

#[test]
fn test_name_uses_last_element() {
    assert_eq!(name("/var/www/Index.HTML"), "index.html");
    assert_eq!(name("dir/sub/"), "sub");
}

#[test]
fn test_name_removes_slashes_and_specials() {
    assert_eq!(name("my_file (1).txt"), "my-file-1.txt");
    assert_eq!(name("/"), "");
}

#[test]
fn test_name_never_contains_parent_reference() {
    assert_eq!(name(".."), "");
    assert_eq!(name("a..b"), "ab");
}

#[test]
fn test_slugs_can_be_empty() {
    assert_eq!(name("???"), "");
    assert_eq!(path("日本語"), "");
}

#[test]
fn test_transliterate_before_filtering() {
    assert_eq!(transliterate("Ærøskøbing"), "AEroeskoebing");
    assert_eq!(name("Ærøskøbing.jpg"), "aeroeskoebing.jpg");
}
