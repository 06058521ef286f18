//! Deduplicated warnings routed through the `log` facade.
//!
//! Sanitizer configuration problems (an allowlist that can never match, a tag
//! that is both allowed and deny-listed) are worth telling the operator about
//! once, not once per sanitized document.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a problem, logging it once per unique component/message pair.
///
/// Returns `true` if the warning was emitted, `false` if it was a duplicate.
///
/// # Example
/// ```
/// use sift_common::warning::warn_once;
///
/// warn_once("Config", "allowed tag 'Script' contains uppercase letters");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_log = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_log {
        log::warn!("[sift {component}] {message}");
    }
    should_log
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_once_deduplicates() {
        let message = "duplicate detection check";
        let first = warn_once("Test", message);
        let second = warn_once("Test", message);
        assert!(first);
        assert!(!second);
    }

    #[test]
    fn test_same_message_different_component_is_distinct() {
        assert!(warn_once("ComponentA", "shared message"));
        assert!(warn_once("ComponentB", "shared message"));
    }
}
