//! Allowlist configuration for the sanitizer.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sift_common::warning::warn_once;

/// Tags allowed when no allowlist is given.
pub const DEFAULT_TAGS: [&str; 18] = [
    "h1", "h2", "h3", "h4", "h5", "h6", "div", "span", "hr", "p", "br", "b", "i", "ol", "ul",
    "li", "a", "img",
];

/// Attribute keys allowed when no allowlist is given.
pub const DEFAULT_ATTRIBUTES: [&str; 8] =
    ["id", "class", "src", "href", "title", "alt", "name", "rel"];

/// Container tags whose whole subtree is dropped unless they are allowlisted.
///
/// This list is fixed. Text inside these elements is never meant to be shown
/// (titles, scripts, styles) or it embeds other documents.
pub const DENIED_TAGS: [&str; 12] = [
    "title", "script", "style", "iframe", "frame", "frameset", "noframes", "noembed", "embed",
    "applet", "object", "base",
];

/// Returns true if `name` is a deny-listed container tag.
///
/// ```
/// use sift_sanitize::config::is_denied;
///
/// assert!(is_denied("script"));
/// assert!(!is_denied("p"));
/// ```
#[must_use]
pub fn is_denied(name: &str) -> bool {
    DENIED_TAGS.contains(&name)
}

/// The tag names and attribute keys a sanitizer lets through.
///
/// Entries are compared against lowercased token names, so they should be
/// lowercase themselves. Construction warns (once per entry) about entries
/// that can never match and about tags that are both allowed and deny-listed.
///
/// The configuration deserializes from JSON; a missing field falls back to the
/// default set:
///
/// ```json
/// { "allowed_tags": ["p", "a"], "allowed_attributes": ["href"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ConfigFile")]
pub struct SanitizerConfig {
    allowed_tags: BTreeSet<String>,
    allowed_attributes: BTreeSet<String>,
}

impl SanitizerConfig {
    /// Build a configuration from explicit tag and attribute allowlists.
    ///
    /// ```
    /// use sift_sanitize::SanitizerConfig;
    ///
    /// let config = SanitizerConfig::new(["p", "a"], ["href"]);
    /// assert!(config.allows_tag("a"));
    /// assert!(!config.allows_tag("img"));
    /// assert!(config.allows_attribute("href"));
    /// ```
    #[must_use]
    pub fn new<T, A>(tags: T, attributes: A) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        let config = Self {
            allowed_tags: tags.into_iter().map(Into::into).collect(),
            allowed_attributes: attributes.into_iter().map(Into::into).collect(),
        };
        config.warn_about_entries();
        config
    }

    /// Replace the tag allowlist.
    #[must_use]
    pub fn with_tags<T>(self, tags: T) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self::new(tags, self.allowed_attributes)
    }

    /// Replace the attribute allowlist.
    #[must_use]
    pub fn with_attributes<A>(self, attributes: A) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self::new(self.allowed_tags, attributes)
    }

    /// Add one tag to the allowlist.
    #[must_use]
    pub fn allow_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        check_entry("tag", &tag);
        let _ = self.allowed_tags.insert(tag);
        self
    }

    /// Add one attribute key to the allowlist.
    #[must_use]
    pub fn allow_attribute(mut self, attribute: impl Into<String>) -> Self {
        let attribute = attribute.into();
        check_entry("attribute", &attribute);
        let _ = self.allowed_attributes.insert(attribute);
        self
    }

    /// The allowed tag names.
    #[must_use]
    pub const fn allowed_tags(&self) -> &BTreeSet<String> {
        &self.allowed_tags
    }

    /// The allowed attribute keys.
    #[must_use]
    pub const fn allowed_attributes(&self) -> &BTreeSet<String> {
        &self.allowed_attributes
    }

    /// Returns true if tags named `name` are emitted.
    #[must_use]
    pub fn allows_tag(&self, name: &str) -> bool {
        self.allowed_tags.contains(name)
    }

    /// Returns true if attributes keyed `key` may be kept.
    #[must_use]
    pub fn allows_attribute(&self, key: &str) -> bool {
        self.allowed_attributes.contains(key)
    }

    fn warn_about_entries(&self) {
        for tag in &self.allowed_tags {
            check_entry("tag", tag);
        }
        for attribute in &self.allowed_attributes {
            check_entry("attribute", attribute);
        }
    }
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            allowed_tags: DEFAULT_TAGS.iter().map(ToString::to_string).collect(),
            allowed_attributes: DEFAULT_ATTRIBUTES.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Warn about an allowlist entry that will not behave as its author expects.
fn check_entry(kind: &str, entry: &str) {
    if entry.bytes().any(|b| b.is_ascii_uppercase()) {
        let _ = warn_once(
            "Config",
            &format!("allowed {kind} '{entry}' contains uppercase letters and will never match"),
        );
    }
    if kind == "tag" && is_denied(entry) {
        let _ = warn_once(
            "Config",
            &format!("allowed tag '{entry}' is deny-listed; it will be emitted, not suppressed"),
        );
    }
}

/// On-disk form of [`SanitizerConfig`]; absent lists take the defaults.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    allowed_tags: Option<Vec<String>>,
    allowed_attributes: Option<Vec<String>>,
}

impl From<ConfigFile> for SanitizerConfig {
    fn from(file: ConfigFile) -> Self {
        let defaults = Self::default();
        Self::new(
            file.allowed_tags.map_or(defaults.allowed_tags, BTreeSet::from_iter),
            file.allowed_attributes
                .map_or(defaults.allowed_attributes, BTreeSet::from_iter),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allowlists() {
        let config = SanitizerConfig::default();
        for tag in ["h1", "h6", "div", "a", "img", "br"] {
            assert!(config.allows_tag(tag), "{tag} should be allowed");
        }
        assert!(!config.allows_tag("script"));
        assert!(!config.allows_tag("table"));
        assert!(config.allows_attribute("href"));
        assert!(!config.allows_attribute("style"));
        assert!(!config.allows_attribute("onclick"));
    }

    #[test]
    fn test_denied_tags() {
        for tag in DENIED_TAGS {
            assert!(is_denied(tag));
        }
        assert!(!is_denied("div"));
        assert!(!is_denied("SCRIPT"));
    }

    #[test]
    fn test_builders() {
        let config = SanitizerConfig::default()
            .with_tags(["p"])
            .allow_tag("em")
            .with_attributes(Vec::<String>::new())
            .allow_attribute("title");
        assert_eq!(config.allowed_tags().len(), 2);
        assert!(config.allows_tag("em"));
        assert!(!config.allows_attribute("href"));
        assert!(config.allows_attribute("title"));
    }

    #[test]
    fn test_deserialize_with_missing_field() {
        let config: SanitizerConfig =
            serde_json::from_str(r#"{ "allowed_tags": ["p"] }"#).unwrap();
        assert!(config.allows_tag("p"));
        assert!(!config.allows_tag("a"));
        assert_eq!(
            config.allowed_attributes(),
            SanitizerConfig::default().allowed_attributes()
        );
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let result = serde_json::from_str::<SanitizerConfig>(r#"{ "tags": ["p"] }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_round_trip() {
        let config = SanitizerConfig::new(["b"], ["id"]);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"allowed_tags":["b"],"allowed_attributes":["id"]}"#);
        let parsed: SanitizerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
