//! Common utilities for the sift crates.
//!
//! This crate provides shared infrastructure used by the tokenizer and the
//! sanitizer:
//! - **Warning System** - deduplicated configuration and input warnings

pub mod warning;
