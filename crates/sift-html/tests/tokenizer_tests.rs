//! Integration tests for the HTML tokenizer.

use std::io::{self, Read};

use sift_html::{Attribute, HtmlTokenizer, Token, TokenKind, TokenizeError};

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<Token> {
    HtmlTokenizer::new(input)
        .collect::<Result<_, _>>()
        .expect("string input never fails")
}

/// Helper to re-serialize every token
fn serialize(tokens: &[Token]) -> String {
    tokens.iter().map(ToString::to_string).collect()
}

#[test]
fn test_plain_text() {
    let tokens = tokenize("Hello");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0], Token::new_text("Hello"));
    assert!(matches!(tokens[1], Token::EndOfFile));
}

#[test]
fn test_empty_input() {
    let tokens = tokenize("");
    assert_eq!(tokens, vec![Token::EndOfFile]);
}

#[test]
fn test_simple_tag() {
    let tokens = tokenize("<div>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::StartTag {
            name,
            self_closing,
            attributes,
        } => {
            assert_eq!(name, "div");
            assert!(!self_closing);
            assert!(attributes.is_empty());
        }
        _ => panic!("Expected StartTag"),
    }
}

#[test]
fn test_tag_names_are_lowercased() {
    let tokens = tokenize("<DiV></SPAN>");
    assert_eq!(tokens[0].tag_name(), Some("div"));
    assert_eq!(tokens[1].tag_name(), Some("span"));
    assert_eq!(tokens[1].kind(), TokenKind::EndTag);
}

#[test]
fn test_self_closing_tag() {
    let tokens = tokenize("<br/>");
    assert_eq!(tokens[0].kind(), TokenKind::SelfClosingTag);
    assert_eq!(tokens[0].tag_name(), Some("br"));
}

#[test]
fn test_attributes_double_quoted() {
    let tokens = tokenize(r#"<a href="/x" CLASS="big">"#);
    assert_eq!(
        tokens[0].attributes(),
        &[Attribute::new("href", "/x"), Attribute::new("class", "big")]
    );
}

#[test]
fn test_attributes_single_quoted_and_unquoted() {
    let tokens = tokenize("<img src='a.png' alt=hi title>");
    assert_eq!(
        tokens[0].attributes(),
        &[
            Attribute::new("src", "a.png"),
            Attribute::new("alt", "hi"),
            Attribute::new("title", ""),
        ]
    );
}

#[test]
fn test_duplicate_attribute_keeps_first() {
    let tokens = tokenize(r#"<p id="one" id="two" class="c">"#);
    assert_eq!(
        tokens[0].attributes(),
        &[Attribute::new("id", "one"), Attribute::new("class", "c")]
    );
}

#[test]
fn test_end_tag_attributes_are_retained() {
    // Attributes on end tags are a parse error but still tokenized.
    let tokens = tokenize(r#"</p class="x">"#);
    assert_eq!(tokens[0].kind(), TokenKind::EndTag);
    assert_eq!(tokens[0].attributes(), &[Attribute::new("class", "x")]);
}

#[test]
fn test_text_runs_are_coalesced() {
    let tokens = tokenize("a<b>bc</b>d");
    let kinds: Vec<TokenKind> = tokens.iter().map(Token::kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Text,
            TokenKind::StartTag,
            TokenKind::Text,
            TokenKind::EndTag,
            TokenKind::Text,
            TokenKind::EndOfFile,
        ]
    );
    assert_eq!(tokens[2], Token::new_text("bc"));
}

#[test]
fn test_comment() {
    let tokens = tokenize("<!-- hi -->after");
    match &tokens[0] {
        Token::Comment { data } => assert_eq!(data, " hi "),
        _ => panic!("Expected Comment"),
    }
    assert_eq!(tokens[1], Token::new_text("after"));
}

#[test]
fn test_unterminated_comment_is_emitted_at_eof() {
    let tokens = tokenize("<!-- open");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind(), TokenKind::Comment);
}

#[test]
fn test_bogus_comments() {
    let tokens = tokenize("<?php echo 1 ?><![CDATA[x]]></ x>");
    match &tokens[0] {
        Token::Comment { data } => assert_eq!(data, "?php echo 1 ?"),
        _ => panic!("Expected Comment"),
    }
    match &tokens[1] {
        Token::Comment { data } => assert_eq!(data, "[CDATA[x]]"),
        _ => panic!("Expected Comment"),
    }
    match &tokens[2] {
        Token::Comment { data } => assert_eq!(data, " x"),
        _ => panic!("Expected Comment"),
    }
}

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE html>");
    match &tokens[0] {
        Token::Doctype { name, force_quirks } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert!(!force_quirks);
        }
        _ => panic!("Expected Doctype"),
    }
}

#[test]
fn test_doctype_identifiers_are_skipped() {
    let tokens =
        tokenize(r#"<!doctype HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://x">text"#);
    assert_eq!(tokens[0].kind(), TokenKind::Doctype);
    assert_eq!(tokens[1], Token::new_text("text"));
}

#[test]
fn test_script_content_is_raw_text() {
    let tokens = tokenize("<script>if (a < b) { x = '<p>'; }</script>");
    assert_eq!(tokens[0].tag_name(), Some("script"));
    assert_eq!(tokens[1], Token::new_text("if (a < b) { x = '<p>'; }"));
    assert_eq!(tokens[2], Token::end_tag("script"));
}

#[test]
fn test_script_ends_at_first_matching_end_tag() {
    let tokens = tokenize("<script><!--</script>--></script>");
    assert_eq!(tokens[1], Token::new_text("<!--"));
    assert_eq!(tokens[2], Token::end_tag("script"));
    assert_eq!(tokens[3], Token::new_text("-->"));
    assert_eq!(tokens[4], Token::end_tag("script"));
}

#[test]
fn test_rawtext_ignores_other_end_tags() {
    let tokens = tokenize("<style>p</p>{}</STYLE>");
    assert_eq!(tokens[1], Token::new_text("p</p>{}"));
    assert_eq!(tokens[2], Token::end_tag("style"));
}

#[test]
fn test_rcdata_decodes_references() {
    let tokens = tokenize("<title>a &amp; <b></title>");
    assert_eq!(tokens[1], Token::new_text("a & <b>"));
    assert_eq!(tokens[2], Token::end_tag("title"));
}

#[test]
fn test_plaintext_consumes_the_rest() {
    let tokens = tokenize("<plaintext></plaintext><b>");
    assert_eq!(tokens[1], Token::new_text("</plaintext><b>"));
    assert!(tokens[2].is_eof());
}

#[test]
fn test_self_closing_script_does_not_switch_to_raw_text() {
    let tokens = tokenize("<script/><b>");
    assert_eq!(tokens[0].kind(), TokenKind::SelfClosingTag);
    assert_eq!(tokens[1].tag_name(), Some("b"));
}

#[test]
fn test_named_character_references() {
    let tokens = tokenize("&lt;tag&gt; &copy; &amp");
    assert_eq!(tokens[0], Token::new_text("<tag> \u{00A9} &"));
}

#[test]
fn test_unknown_named_reference_is_literal() {
    let tokens = tokenize("&nosuch; &");
    assert_eq!(tokens[0], Token::new_text("&nosuch; &"));
}

#[test]
fn test_numeric_character_references() {
    let tokens = tokenize("&#65;&#x42;&#X43;&#68 &#;");
    assert_eq!(tokens[0], Token::new_text("ABCD &#;"));
}

#[test]
fn test_numeric_reference_replacements() {
    let tokens = tokenize("&#0;&#x80;&#xD800;&#99999999999;");
    assert_eq!(
        tokens[0],
        Token::new_text("\u{FFFD}\u{20AC}\u{FFFD}\u{FFFD}")
    );
}

#[test]
fn test_character_reference_in_attribute() {
    let tokens = tokenize(r#"<a href="/a?b=1&amp;c=2" title="&#106;s">"#);
    assert_eq!(
        tokens[0].attributes(),
        &[
            Attribute::new("href", "/a?b=1&c=2"),
            Attribute::new("title", "js"),
        ]
    );
}

#[test]
fn test_legacy_reference_in_attribute_followed_by_alnum() {
    // "&copy" followed by "=" or an alphanumeric is left alone inside attributes.
    let tokens = tokenize(r#"<a href="/x?a=1&copy=2">&copyx"#);
    assert_eq!(tokens[0].attributes(), &[Attribute::new("href", "/x?a=1&copy=2")]);
    assert_eq!(tokens[1], Token::new_text("\u{00A9}x"));
}

#[test]
fn test_null_is_replaced() {
    let tokens = tokenize("a\0b");
    assert_eq!(tokens[0], Token::new_text("a\u{FFFD}b"));
}

#[test]
fn test_stray_less_than() {
    let tokens = tokenize("1 < 2 <");
    assert_eq!(tokens[0], Token::new_text("1 < 2 <"));
}

#[test]
fn test_eof_in_tag_drops_tag() {
    let tokens = tokenize(r#"ok<a href="x"#);
    assert_eq!(tokens, vec![Token::new_text("ok"), Token::EndOfFile]);
}

#[test]
fn test_serialization_round_trip() {
    let input = r#"<p class="a&amp;b">x &lt; y</p><br/><!--c--><!DOCTYPE html>"#;
    let tokens = tokenize(input);
    let serialized = serialize(&tokens);
    assert_eq!(
        serialized,
        r#"<p class="a&amp;b">x &lt; y</p><br/><!--c--><!DOCTYPE html>"#
    );
    assert_eq!(tokenize(&serialized), tokens);
}

#[test]
fn test_serialization_keeps_carriage_return_references() {
    let tokens = tokenize("<p title=\"a&#13;b\">x&#xDy</p>");
    assert_eq!(
        tokens[0],
        Token::StartTag {
            name: "p".to_string(),
            self_closing: false,
            attributes: vec![Attribute::new("title", "a\rb")],
        }
    );
    assert_eq!(tokens[1], Token::new_text("x\ry"));

    let serialized = serialize(&tokens);
    assert_eq!(serialized, "<p title=\"a&#13;b\">x&#13;y</p>");
    assert_eq!(tokenize(&serialized), tokens);
}

#[test]
fn test_serialization_escapes_attribute_quotes() {
    let tokens = tokenize(r#"<a title='say "hi"'>"#);
    assert_eq!(tokens[0].to_string(), r#"<a title="say &#34;hi&#34;">"#);
}

#[test]
fn test_from_bytes_invalid_utf8() {
    let mut bytes = b"<b>ok</b>".to_vec();
    bytes.extend_from_slice(&[0xFF, b'x']);
    let results: Vec<Result<Token, TokenizeError>> = HtmlTokenizer::from_bytes(&bytes).collect();

    assert_eq!(results.len(), 4);
    assert!(matches!(&results[1], Ok(Token::Text { data }) if data == "ok"));
    assert!(matches!(
        results[3],
        Err(TokenizeError::InvalidUtf8 { offset: 9 })
    ));
}

#[test]
fn test_from_bytes_valid() {
    let tokens: Vec<Token> = HtmlTokenizer::from_bytes("<i>é</i>".as_bytes())
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(tokens[1], Token::new_text("é"));
}

/// A reader that yields some bytes and then fails.
struct FailingReader {
    data: &'static [u8],
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::other("connection reset"));
        }
        let n = self.data.len().min(buf.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

#[test]
fn test_from_reader_reports_io_error_after_tokens() {
    let mut tokenizer = HtmlTokenizer::from_reader(FailingReader { data: b"<b>partial" });
    assert_eq!(tokenizer.next_token().unwrap(), Token::start_tag("b", Vec::new()));
    assert_eq!(tokenizer.next_token().unwrap(), Token::new_text("partial"));
    assert!(matches!(tokenizer.next_token(), Err(TokenizeError::Io(_))));
}

#[test]
fn test_from_reader_ok() {
    let tokens: Vec<Token> = HtmlTokenizer::from_reader("<hr>".as_bytes())
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(tokens, vec![Token::start_tag("hr", Vec::new()), Token::EndOfFile]);
}
