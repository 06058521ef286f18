use sift_html::TokenizeError;
use thiserror::Error;

/// Sanitizing failed because the markup could not be tokenized.
///
/// No partial output is returned alongside this error.
#[derive(Debug, Error)]
#[error("failed to tokenize markup")]
pub struct ParseError {
    #[from]
    source: TokenizeError,
}

impl ParseError {
    /// The tokenizer failure that ended the stream.
    #[must_use]
    pub const fn tokenize_error(&self) -> &TokenizeError {
        &self.source
    }
}
