//! The tag filter: decides, token by token, what reaches the output.

use sift_html::{Token, TokenKind};

use crate::attributes::clean_attributes;
use crate::config::{SanitizerConfig, is_denied};

/// Per-document filtering state.
///
/// While a deny-listed element is open, everything up to its matching end tag
/// is suppressed. Only one suppressing tag is tracked at a time: a second
/// deny-listed start tag inside the first is ignored, and the first end tag
/// matching the tracked name ends suppression even if the same element was
/// opened twice.
///
/// ```
/// use sift_html::Token;
/// use sift_sanitize::{SanitizerConfig, TagFilter};
///
/// let config = SanitizerConfig::default();
/// let mut filter = TagFilter::new(&config);
/// assert!(filter.filter(Token::start_tag("script", Vec::new())).is_none());
/// assert_eq!(filter.suppressing(), Some("script"));
/// assert!(filter.filter(Token::new_text("alert(1)")).is_none());
/// assert!(filter.filter(Token::end_tag("script")).is_none());
/// assert!(filter.filter(Token::new_text("ok")).is_some());
/// ```
#[derive(Debug)]
pub struct TagFilter<'a> {
    config: &'a SanitizerConfig,
    suppressing: Option<String>,
}

impl<'a> TagFilter<'a> {
    /// Start filtering a new document.
    #[must_use]
    pub const fn new(config: &'a SanitizerConfig) -> Self {
        Self {
            config,
            suppressing: None,
        }
    }

    /// The deny-listed tag whose subtree is currently being dropped.
    #[must_use]
    pub fn suppressing(&self) -> Option<&str> {
        self.suppressing.as_deref()
    }

    /// Filter one token.
    ///
    /// Returns the token to write out, with its attributes cleaned, or `None`
    /// if it is dropped. Comments, DOCTYPEs and the end-of-file marker are
    /// always dropped.
    pub fn filter(&mut self, token: Token) -> Option<Token> {
        match token.kind() {
            TokenKind::StartTag => self.start_tag(token),
            TokenKind::SelfClosingTag => self.self_closing_tag(token),
            TokenKind::EndTag => self.end_tag(&token),
            TokenKind::Text => self.suppressing.is_none().then_some(token),
            TokenKind::Comment | TokenKind::Doctype | TokenKind::EndOfFile => None,
        }
    }

    fn start_tag(&mut self, token: Token) -> Option<Token> {
        let name = token.tag_name()?;
        if self.suppressing.is_none() && self.config.allows_tag(name) {
            return Some(self.with_clean_attributes(token));
        }
        if is_denied(name) {
            if self.suppressing.is_none() {
                log::debug!("[Sanitizer] suppressing <{name}> subtree");
                self.suppressing = Some(name.to_string());
            }
        } else {
            log::debug!("[Sanitizer] dropping <{name}>");
        }
        None
    }

    fn self_closing_tag(&mut self, token: Token) -> Option<Token> {
        let name = token.tag_name()?;
        if self.suppressing.is_none() && self.config.allows_tag(name) {
            return Some(self.with_clean_attributes(token));
        }
        self.end_suppression_if_matching(name);
        None
    }

    fn end_tag(&mut self, token: &Token) -> Option<Token> {
        let name = token.tag_name()?;
        if self.suppressing.is_none() && self.config.allows_tag(name) {
            return Some(Token::end_tag(name));
        }
        self.end_suppression_if_matching(name);
        None
    }

    fn end_suppression_if_matching(&mut self, name: &str) {
        if self.suppressing.as_deref() == Some(name) {
            log::debug!("[Sanitizer] end of suppressed <{name}> subtree");
            self.suppressing = None;
        }
    }

    fn with_clean_attributes(&self, mut token: Token) -> Token {
        let cleaned = clean_attributes(token.attributes(), self.config.allowed_attributes());
        token.set_attributes(cleaned);
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_html::Attribute;

    fn self_closing(name: &str) -> Token {
        Token::StartTag {
            name: name.to_string(),
            self_closing: true,
            attributes: Vec::new(),
        }
    }

    #[test]
    fn test_allowed_start_tag_is_cleaned() {
        let config = SanitizerConfig::default();
        let mut filter = TagFilter::new(&config);
        let token = Token::start_tag(
            "a",
            vec![
                Attribute::new("href", "javascript:x"),
                Attribute::new("onclick", "x"),
                Attribute::new("title", "t"),
            ],
        );
        assert_eq!(
            filter.filter(token),
            Some(Token::start_tag("a", vec![Attribute::new("title", "t")]))
        );
    }

    #[test]
    fn test_end_tag_loses_attributes() {
        let config = SanitizerConfig::default();
        let mut filter = TagFilter::new(&config);
        let token = Token::EndTag {
            name: "p".to_string(),
            attributes: vec![Attribute::new("id", "x")],
        };
        assert_eq!(filter.filter(token), Some(Token::end_tag("p")));
    }

    #[test]
    fn test_comments_and_doctypes_are_dropped() {
        let config = SanitizerConfig::default();
        let mut filter = TagFilter::new(&config);
        assert!(filter.filter(Token::new_comment()).is_none());
        assert!(filter.filter(Token::new_doctype()).is_none());
        assert!(filter.filter(Token::EndOfFile).is_none());
    }

    #[test]
    fn test_unknown_tags_are_dropped_without_suppression() {
        let config = SanitizerConfig::default();
        let mut filter = TagFilter::new(&config);
        assert!(filter.filter(Token::start_tag("table", Vec::new())).is_none());
        assert_eq!(filter.suppressing(), None);
        assert!(filter.filter(Token::new_text("cell")).is_some());
    }

    #[test]
    fn test_suppression_is_single_slot() {
        let config = SanitizerConfig::default();
        let mut filter = TagFilter::new(&config);
        assert!(filter.filter(Token::start_tag("style", Vec::new())).is_none());
        assert!(filter.filter(Token::start_tag("script", Vec::new())).is_none());
        assert_eq!(filter.suppressing(), Some("style"));
        assert!(filter.filter(Token::end_tag("script")).is_none());
        assert_eq!(filter.suppressing(), Some("style"));
        assert!(filter.filter(Token::end_tag("style")).is_none());
        assert_eq!(filter.suppressing(), None);
    }

    #[test]
    fn test_allowed_tags_are_dropped_while_suppressing() {
        let config = SanitizerConfig::default();
        let mut filter = TagFilter::new(&config);
        let _ = filter.filter(Token::start_tag("object", Vec::new()));
        assert!(filter.filter(Token::start_tag("p", Vec::new())).is_none());
        assert!(filter.filter(self_closing("br")).is_none());
        assert!(filter.filter(Token::end_tag("p")).is_none());
    }

    #[test]
    fn test_self_closing_denied_tag_ends_suppression() {
        let config = SanitizerConfig::default();
        let mut filter = TagFilter::new(&config);
        let _ = filter.filter(Token::start_tag("embed", Vec::new()));
        assert!(filter.filter(self_closing("embed")).is_none());
        assert_eq!(filter.suppressing(), None);
    }

    #[test]
    fn test_self_closing_denied_tag_does_not_start_suppression() {
        let config = SanitizerConfig::default();
        let mut filter = TagFilter::new(&config);
        assert!(filter.filter(self_closing("base")).is_none());
        assert_eq!(filter.suppressing(), None);
    }

    #[test]
    fn test_allowlisted_denied_tag_is_emitted() {
        let config = SanitizerConfig::new(["title"], Vec::<String>::new());
        let mut filter = TagFilter::new(&config);
        assert!(filter.filter(Token::start_tag("title", Vec::new())).is_some());
        assert_eq!(filter.suppressing(), None);
    }
}
