//! Allowlist HTML sanitizer for the sift toolkit.
//!
//! # Scope
//!
//! This crate implements:
//! - **Sanitizer**: walks the [`sift_html`] token stream and keeps only
//!   allowlisted tags and attributes
//!   - Deny-listed containers (`script`, `style`, `iframe`, ...) are dropped
//!     with their whole subtree
//!   - `data:` and `javascript:` values are removed from every attribute,
//!     and `href` must be root-relative or `mailto://`, `http://`, `https://`
//!   - Comments and DOCTYPEs are dropped
//!
//! - **Plain text** ([`text::strip_html`]): tag stripping for previews and
//!   summaries
//!
//! - **Slugs** ([`slug::path`], [`slug::name`]): lowercase ASCII URL paths
//!   and file names, with accents flattened by [`accents::transliterate`]
//!
//! # Not Implemented
//!
//! - CSS or JavaScript sanitization (`style` attributes are simply not
//!   allowlisted by default)
//! - Tree construction: end tags are not balanced against start tags

/// ASCII transliteration of accented letters.
pub mod accents;
/// Attribute cleaning for emitted tags.
pub mod attributes;
/// Allowlist configuration.
pub mod config;
mod error;
/// The per-token tag filter.
pub mod filter;
mod sanitizer;
/// URL path and file name slugs.
pub mod slug;
/// Plain-text extraction.
pub mod text;

pub use config::SanitizerConfig;
pub use error::ParseError;
pub use filter::TagFilter;
pub use sanitizer::{
    Sanitizer, sanitize_html, sanitize_html_bytes, sanitize_html_with, sanitize_reader,
    sanitize_tokens,
};
