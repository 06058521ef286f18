//! HTML tokenizer for the sift sanitizer.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Data, RCDATA, RAWTEXT, script data and PLAINTEXT states
//!   - Tag, attribute, comment and DOCTYPE states
//!   - Named and numeric character references
//!   - Lazy token production through [`HtmlTokenizer::next_token`] or [`Iterator`]
//!
//! - **Token serialization**: [`Token`] implements [`std::fmt::Display`] and
//!   escapes text and attribute values so the output re-tokenizes to the same
//!   tokens.
//!
//! - **Entity helpers** ([`escape`]): escaping and unescaping of text outside
//!   the tokenizer, using the same reference tables.
//!
//! # Not Implemented
//!
//! - Tree construction
//! - Script data escape states
//! - DOCTYPE public and system identifiers
//! - Encoding sniffing (input is UTF-8)

mod error;
/// Escaping and unescaping of character references.
pub mod escape;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use error::TokenizeError;
pub use tokenizer::{Attribute, HtmlTokenizer, Token, TokenKind, TokenizerState};
