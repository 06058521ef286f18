use thiserror::Error;

/// A failure that ends the token stream.
///
/// Malformed markup is never an error: parse errors are recovered from and
/// only logged. These variants cover input that cannot be read as text.
#[derive(Debug, Error)]
pub enum TokenizeError {
    /// The input bytes are not valid UTF-8. Everything before `offset` was
    /// tokenized.
    #[error("invalid UTF-8 sequence at byte offset {offset}")]
    InvalidUtf8 {
        /// Length of the longest valid prefix, in bytes.
        offset: usize,
    },
    /// Reading from the input failed.
    #[error("failed to read markup input")]
    Io(#[from] std::io::Error),
}
