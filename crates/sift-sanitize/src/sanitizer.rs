//! Sanitizer driver: runs a token stream through the tag filter.

use std::io::Read;

use sift_html::{HtmlTokenizer, Token, TokenizeError};

use crate::config::SanitizerConfig;
use crate::error::ParseError;
use crate::filter::TagFilter;

/// Sanitize `input` with the default allowlists.
///
/// ```
/// use sift_sanitize::sanitize_html;
///
/// let clean = sanitize_html("<p onclick=\"x()\">Hi<script>alert(1)</script></p>").unwrap();
/// assert_eq!(clean, "<p>Hi</p>");
/// ```
///
/// # Errors
///
/// Tokenizing a `&str` cannot fail, so in practice this always succeeds; the
/// signature matches the byte and reader entry points.
pub fn sanitize_html(input: &str) -> Result<String, ParseError> {
    sanitize_html_with(input, &SanitizerConfig::default())
}

/// Sanitize `input` with the given allowlists.
///
/// # Errors
///
/// See [`sanitize_html`].
pub fn sanitize_html_with(input: &str, config: &SanitizerConfig) -> Result<String, ParseError> {
    sanitize_tokens(HtmlTokenizer::new(input), config)
}

/// Sanitize raw bytes, which must be UTF-8.
///
/// # Errors
///
/// Returns [`ParseError`] if the bytes are not valid UTF-8. Nothing of the
/// valid prefix is returned in that case.
pub fn sanitize_html_bytes(input: &[u8], config: &SanitizerConfig) -> Result<String, ParseError> {
    sanitize_tokens(HtmlTokenizer::from_bytes(input), config)
}

/// Sanitize everything `reader` yields.
///
/// # Errors
///
/// Returns [`ParseError`] if reading fails or the input is not valid UTF-8.
pub fn sanitize_reader(reader: impl Read, config: &SanitizerConfig) -> Result<String, ParseError> {
    sanitize_tokens(HtmlTokenizer::from_reader(reader), config)
}

/// Sanitize an arbitrary token stream.
///
/// The stream ends at the first [`Token::EndOfFile`] or the first error;
/// tokens after either are never pulled.
///
/// # Errors
///
/// Returns the first error in the stream as a [`ParseError`], discarding any
/// output produced so far.
pub fn sanitize_tokens<I>(tokens: I, config: &SanitizerConfig) -> Result<String, ParseError>
where
    I: IntoIterator<Item = Result<Token, TokenizeError>>,
{
    let mut filter = TagFilter::new(config);
    let mut output = String::new();

    for token in tokens {
        let token = token?;
        if token.is_eof() {
            break;
        }
        if let Some(kept) = filter.filter(token) {
            output.push_str(&kept.to_string());
        }
    }

    if let Some(name) = filter.suppressing() {
        log::debug!("[Sanitizer] input ended inside suppressed <{name}>");
    }
    Ok(output)
}

/// A sanitizer bound to one configuration, for reuse across documents.
///
/// ```
/// use sift_sanitize::{Sanitizer, SanitizerConfig};
///
/// let sanitizer = Sanitizer::new(SanitizerConfig::new(["b"], Vec::<String>::new()));
/// assert_eq!(sanitizer.sanitize("<b>bold</b> <i>it</i>").unwrap(), "<b>bold</b> it");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Sanitizer {
    config: SanitizerConfig,
}

impl Sanitizer {
    /// Create a sanitizer with the given allowlists.
    #[must_use]
    pub const fn new(config: SanitizerConfig) -> Self {
        Self { config }
    }

    /// The allowlists in use.
    #[must_use]
    pub const fn config(&self) -> &SanitizerConfig {
        &self.config
    }

    /// Sanitize a string.
    ///
    /// # Errors
    ///
    /// See [`sanitize_html`].
    pub fn sanitize(&self, input: &str) -> Result<String, ParseError> {
        sanitize_html_with(input, &self.config)
    }

    /// Sanitize UTF-8 bytes.
    ///
    /// # Errors
    ///
    /// See [`sanitize_html_bytes`].
    pub fn sanitize_bytes(&self, input: &[u8]) -> Result<String, ParseError> {
        sanitize_html_bytes(input, &self.config)
    }

    /// Sanitize everything `reader` yields.
    ///
    /// # Errors
    ///
    /// See [`sanitize_reader`].
    pub fn sanitize_reader(&self, reader: impl Read) -> Result<String, ParseError> {
        sanitize_reader(reader, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_stops_at_first_error() {
        let tokens = vec![
            Ok(Token::new_text("kept?")),
            Err(TokenizeError::InvalidUtf8 { offset: 5 }),
            Ok(Token::new_text("never read")),
        ];
        let err = sanitize_tokens(tokens, &SanitizerConfig::default()).unwrap_err();
        assert!(matches!(
            err.tokenize_error(),
            TokenizeError::InvalidUtf8 { offset: 5 }
        ));
    }

    #[test]
    fn test_stream_stops_at_end_of_file() {
        let tokens = vec![
            Ok(Token::new_text("a")),
            Ok(Token::EndOfFile),
            Ok(Token::new_text("b")),
        ];
        assert_eq!(
            sanitize_tokens(tokens, &SanitizerConfig::default()).unwrap(),
            "a"
        );
    }

    #[test]
    fn test_stream_without_end_marker() {
        let tokens = vec![Ok(Token::start_tag("b", Vec::new())), Ok(Token::new_text("x"))];
        assert_eq!(
            sanitize_tokens(tokens, &SanitizerConfig::default()).unwrap(),
            "<b>x"
        );
    }
}
