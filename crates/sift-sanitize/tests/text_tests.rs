//! Integration tests for plain-text extraction.

use sift_sanitize::text::strip_html;

#[test]
fn test_paragraphs_become_lines() {
    assert_eq!(
        strip_html("<p>First\nparagraph</p>\n<p>Second</p>"),
        "Firstparagraph\nSecond\n"
    );
}

#[test]
fn test_typographic_entities_are_flattened() {
    assert_eq!(
        strip_html("&#8220;Quote&#8221; &#8216;single&#8217;"),
        "\"Quote\" 'single'"
    );
    assert_eq!(strip_html("a&nbsp;b &quot;c&quot; &apos;d&apos;"), "a b \"c\" 'd'");
}

#[test]
fn test_accented_entities_are_decoded() {
    assert_eq!(strip_html("<b>Caf&eacute;</b>"), "Caf\u{00E9}");
}

#[test]
fn test_markup_characters_stay_escaped() {
    assert_eq!(strip_html("&lt;script&gt;"), "&lt;script&gt;");
    assert_eq!(strip_html("<i>x</i> &amp;&amp; y"), "x &amp;& y");
}

#[test]
fn test_ampersand_followed_by_space() {
    assert_eq!(strip_html("Salt & pepper"), "Salt & pepper");
    assert_eq!(strip_html("Salt &amp; pepper"), "Salt & pepper");
    assert_eq!(strip_html("Salt &amp;amp; pepper"), "Salt & pepper");
}

#[test]
fn test_script_text_is_kept_but_tags_are_not() {
    assert_eq!(strip_html("<script>alert(1)</script>"), "alert(1)");
}

#[test]
fn test_output_never_contains_angle_brackets() {
    for input in ["a<b", "a>b", "<<<>>>", "&lt;&gt;", "x <y z", "<p>1 &#60; 2</p>"] {
        let text = strip_html(input);
        assert!(!text.contains(['<', '>']), "{input:?} gave {text:?}");
    }
}

#[test]
fn test_empty_input() {
    assert_eq!(strip_html(""), "");
}
