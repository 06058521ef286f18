//! Property tests for the sanitizer, text extraction and slugs.

// quickcheck hands every property an owned input.
#![allow(clippy::needless_pass_by_value)]

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use sift_html::{HtmlTokenizer, Token, TokenKind};
use sift_sanitize::slug::{name, path};
use sift_sanitize::text::strip_html;
use sift_sanitize::{SanitizerConfig, sanitize_html};

/// Pieces of hostile and ordinary markup, glued together at random.
const FRAGMENTS: &[&str] = &[
    "<p>",
    "</p>",
    "<b>",
    "</b>",
    "<br/>",
    "<a href=\"/ok\">",
    "<a href=\"javascript:alert(1)\">",
    "<a href='//evil'>",
    "</a>",
    "<img src=\"da ta:x\" alt=\"a\">",
    "<img src=x onerror=alert(1)>",
    "<div class=\"c\" style=\"x\">",
    "</div>",
    "<script>",
    "</script>",
    "<style>",
    "</style>",
    "<title>",
    "</title>",
    "<object>",
    "<embed/>",
    "<textarea>",
    "<plaintext>",
    "<!--",
    "-->",
    "<!DOCTYPE html>",
    "<![CDATA[",
    "<",
    ">",
    "/",
    "\"",
    "'",
    "=",
    "&",
    "&amp;",
    "&lt;",
    "&#106;",
    "&#x3C;",
    "&copy",
    "text",
    " ",
    "\n",
    "\r",
    "&#13;",
    "&#xD",
    "\0",
    "é",
];

#[derive(Debug, Clone)]
struct Markup(String);

impl Arbitrary for Markup {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 32;
        let markup = (0..len)
            .map(|_| *g.choose(FRAGMENTS).unwrap_or(&""))
            .collect();
        Self(markup)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Self))
    }
}

/// Printable ASCII, the alphabet slugs are usually made from.
#[derive(Debug, Clone)]
struct PrintableAscii(String);

impl Arbitrary for PrintableAscii {
    fn arbitrary(g: &mut Gen) -> Self {
        let bytes = Vec::<u8>::arbitrary(g);
        Self(bytes.iter().map(|b| char::from(b' ' + b % 95)).collect())
    }
}

fn tokens(markup: &str) -> Vec<Token> {
    HtmlTokenizer::new(markup)
        .collect::<Result<_, _>>()
        .expect("string input never fails")
}

#[quickcheck]
fn sanitized_tags_and_attributes_are_allowlisted(input: Markup) -> bool {
    let config = SanitizerConfig::default();
    let output = sanitize_html(&input.0).expect("string input never fails");

    tokens(&output).iter().all(|token| match token.kind() {
        TokenKind::StartTag | TokenKind::SelfClosingTag => {
            token.tag_name().is_some_and(|tag| config.allows_tag(tag))
                && token
                    .attributes()
                    .iter()
                    .all(|attr| config.allows_attribute(&attr.name) && !attr.value.is_empty())
        }
        TokenKind::EndTag => {
            token.tag_name().is_some_and(|tag| config.allows_tag(tag))
                && token.attributes().is_empty()
        }
        TokenKind::Text | TokenKind::EndOfFile => true,
        TokenKind::Comment | TokenKind::Doctype => false,
    })
}

#[quickcheck]
fn sanitized_attributes_carry_no_script_scheme(input: Markup) -> bool {
    let output = sanitize_html(&input.0).expect("string input never fails");
    tokens(&output).iter().all(|token| {
        token.attributes().iter().all(|attr| {
            let squeezed: String = attr
                .value
                .to_lowercase()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            !squeezed.contains("javascript:") && !squeezed.contains("data:")
        })
    })
}

#[quickcheck]
fn sanitizing_is_idempotent(input: Markup) -> bool {
    let once = sanitize_html(&input.0).expect("string input never fails");
    let twice = sanitize_html(&once).expect("string input never fails");
    once == twice
}

#[quickcheck]
fn sanitizing_arbitrary_text_never_fails(input: String) -> bool {
    sanitize_html(&input).is_ok()
}

#[quickcheck]
fn stripped_text_has_no_angle_brackets(input: Markup) -> bool {
    !strip_html(&input.0).contains(['<', '>'])
}

#[quickcheck]
fn path_slugs_are_safe(input: PrintableAscii) -> bool {
    let slug = path(&input.0);
    !slug.contains("..")
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '/' | '-'))
}

#[quickcheck]
fn name_slugs_have_no_slashes(input: PrintableAscii) -> bool {
    let slug = name(&input.0);
    !slug.contains('/') && !slug.contains("..") && !slug.contains("--")
}
