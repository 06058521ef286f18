//! HTML tokenizer module.
//!
//! Implements [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard, minus the tree builder: the states the
//! tree builder would switch to (RCDATA, RAWTEXT, script data, PLAINTEXT) are
//! selected by the tokenizer itself when it emits the corresponding start tag.

/// Character reference parsing per § 13.2.5.72.
pub mod character_reference;
/// Helper methods for tokenizer state transitions.
pub mod helpers;
/// Named character reference lookup table per § 13.5.
pub mod named_character_references;
/// Token types produced by the tokenizer.
pub mod token;
/// HTML tokenizer state machine implementation.
pub mod core;

pub use core::{HtmlTokenizer, TokenizerState};
pub use token::{Attribute, Token, TokenKind};
