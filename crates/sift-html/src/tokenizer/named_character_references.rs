//! Named character reference lookup table.
//!
//! [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
//!
//! The full table defines 2,231 entities. This one carries the markup-significant
//! ones, the Latin-1 set and the typographic symbols that show up in
//! user-written content.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Maps entity names (without the leading '&') to their replacement strings.
///
/// Names are matched WITH the trailing semicolon when present. The legacy
/// Latin-1 names also match without it (e.g. "&amp" matches like "&amp;").
static NAMED_ENTITIES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        // Markup-significant characters
        ("amp;", "&"),
        ("amp", "&"), // Legacy (no semicolon)
        ("AMP;", "&"),
        ("AMP", "&"),
        ("lt;", "<"),
        ("lt", "<"),
        ("LT;", "<"),
        ("LT", "<"),
        ("gt;", ">"),
        ("gt", ">"),
        ("GT;", ">"),
        ("GT", ">"),
        ("quot;", "\""),
        ("quot", "\""),
        ("QUOT;", "\""),
        ("QUOT", "\""),
        ("apos;", "'"),
        ("nbsp;", "\u{00A0}"),
        ("nbsp", "\u{00A0}"),
        // Punctuation and symbols
        ("iexcl;", "\u{00A1}"),
        ("cent;", "\u{00A2}"),
        ("pound;", "\u{00A3}"),
        ("curren;", "\u{00A4}"),
        ("yen;", "\u{00A5}"),
        ("brvbar;", "\u{00A6}"),
        ("sect;", "\u{00A7}"),
        ("uml;", "\u{00A8}"),
        ("copy;", "\u{00A9}"),
        ("copy", "\u{00A9}"),
        ("ordf;", "\u{00AA}"),
        ("laquo;", "\u{00AB}"),
        ("not;", "\u{00AC}"),
        ("shy;", "\u{00AD}"),
        ("reg;", "\u{00AE}"),
        ("reg", "\u{00AE}"),
        ("macr;", "\u{00AF}"),
        ("deg;", "\u{00B0}"),
        ("plusmn;", "\u{00B1}"),
        ("sup2;", "\u{00B2}"),
        ("sup3;", "\u{00B3}"),
        ("acute;", "\u{00B4}"),
        ("micro;", "\u{00B5}"),
        ("para;", "\u{00B6}"),
        ("middot;", "\u{00B7}"),
        ("cedil;", "\u{00B8}"),
        ("sup1;", "\u{00B9}"),
        ("ordm;", "\u{00BA}"),
        ("raquo;", "\u{00BB}"),
        ("frac14;", "\u{00BC}"),
        ("frac12;", "\u{00BD}"),
        ("frac34;", "\u{00BE}"),
        ("iquest;", "\u{00BF}"),
        ("times;", "\u{00D7}"),
        ("divide;", "\u{00F7}"),
        ("trade;", "\u{2122}"),
        ("mdash;", "\u{2014}"),
        ("ndash;", "\u{2013}"),
        ("hellip;", "\u{2026}"),
        ("bull;", "\u{2022}"),
        ("lsquo;", "\u{2018}"),
        ("rsquo;", "\u{2019}"),
        ("sbquo;", "\u{201A}"),
        ("ldquo;", "\u{201C}"),
        ("rdquo;", "\u{201D}"),
        ("bdquo;", "\u{201E}"),
        ("dagger;", "\u{2020}"),
        ("Dagger;", "\u{2021}"),
        ("permil;", "\u{2030}"),
        ("lsaquo;", "\u{2039}"),
        ("rsaquo;", "\u{203A}"),
        ("euro;", "\u{20AC}"),
        ("ensp;", "\u{2002}"),
        ("emsp;", "\u{2003}"),
        ("thinsp;", "\u{2009}"),
        ("zwnj;", "\u{200C}"),
        ("zwj;", "\u{200D}"),
        // Math symbols
        ("ne;", "\u{2260}"),
        ("le;", "\u{2264}"),
        ("ge;", "\u{2265}"),
        ("minus;", "\u{2212}"),
        ("infin;", "\u{221E}"),
        // Arrows
        ("larr;", "\u{2190}"),
        ("uarr;", "\u{2191}"),
        ("rarr;", "\u{2192}"),
        ("darr;", "\u{2193}"),
        ("harr;", "\u{2194}"),
        // Greek letters (commonly used)
        ("alpha;", "\u{03B1}"),
        ("beta;", "\u{03B2}"),
        ("gamma;", "\u{03B3}"),
        ("delta;", "\u{03B4}"),
        ("epsilon;", "\u{03B5}"),
        ("lambda;", "\u{03BB}"),
        ("mu;", "\u{03BC}"),
        ("pi;", "\u{03C0}"),
        ("sigma;", "\u{03C3}"),
        ("omega;", "\u{03C9}"),
        ("Omega;", "\u{03A9}"),
        // Latin-1 letters, upper case
        ("Agrave;", "\u{00C0}"),
        ("Aacute;", "\u{00C1}"),
        ("Acirc;", "\u{00C2}"),
        ("Atilde;", "\u{00C3}"),
        ("Auml;", "\u{00C4}"),
        ("Aring;", "\u{00C5}"),
        ("AElig;", "\u{00C6}"),
        ("Ccedil;", "\u{00C7}"),
        ("Egrave;", "\u{00C8}"),
        ("Eacute;", "\u{00C9}"),
        ("Ecirc;", "\u{00CA}"),
        ("Euml;", "\u{00CB}"),
        ("Igrave;", "\u{00CC}"),
        ("Iacute;", "\u{00CD}"),
        ("Icirc;", "\u{00CE}"),
        ("Iuml;", "\u{00CF}"),
        ("ETH;", "\u{00D0}"),
        ("Ntilde;", "\u{00D1}"),
        ("Ograve;", "\u{00D2}"),
        ("Oacute;", "\u{00D3}"),
        ("Ocirc;", "\u{00D4}"),
        ("Otilde;", "\u{00D5}"),
        ("Ouml;", "\u{00D6}"),
        ("Oslash;", "\u{00D8}"),
        ("Ugrave;", "\u{00D9}"),
        ("Uacute;", "\u{00DA}"),
        ("Ucirc;", "\u{00DB}"),
        ("Uuml;", "\u{00DC}"),
        ("Yacute;", "\u{00DD}"),
        ("THORN;", "\u{00DE}"),
        ("OElig;", "\u{0152}"),
        ("Scaron;", "\u{0160}"),
        ("Yuml;", "\u{0178}"),
        // Latin-1 letters, lower case
        ("szlig;", "\u{00DF}"),
        ("agrave;", "\u{00E0}"),
        ("aacute;", "\u{00E1}"),
        ("acirc;", "\u{00E2}"),
        ("atilde;", "\u{00E3}"),
        ("auml;", "\u{00E4}"),
        ("aring;", "\u{00E5}"),
        ("aelig;", "\u{00E6}"),
        ("ccedil;", "\u{00E7}"),
        ("egrave;", "\u{00E8}"),
        ("eacute;", "\u{00E9}"),
        ("ecirc;", "\u{00EA}"),
        ("euml;", "\u{00EB}"),
        ("igrave;", "\u{00EC}"),
        ("iacute;", "\u{00ED}"),
        ("icirc;", "\u{00EE}"),
        ("iuml;", "\u{00EF}"),
        ("eth;", "\u{00F0}"),
        ("ntilde;", "\u{00F1}"),
        ("ograve;", "\u{00F2}"),
        ("oacute;", "\u{00F3}"),
        ("ocirc;", "\u{00F4}"),
        ("otilde;", "\u{00F5}"),
        ("ouml;", "\u{00F6}"),
        ("oslash;", "\u{00F8}"),
        ("ugrave;", "\u{00F9}"),
        ("uacute;", "\u{00FA}"),
        ("ucirc;", "\u{00FB}"),
        ("uuml;", "\u{00FC}"),
        ("yacute;", "\u{00FD}"),
        ("thorn;", "\u{00FE}"),
        ("yuml;", "\u{00FF}"),
        ("oelig;", "\u{0153}"),
        ("scaron;", "\u{0161}"),
    ])
});

/// Look up a named character reference.
///
/// Returns the replacement string if found.
/// The `name` should NOT include the leading '&'.
///
/// ```
/// use sift_html::tokenizer::named_character_references::lookup_entity;
///
/// assert_eq!(lookup_entity("amp;"), Some("&"));
/// assert_eq!(lookup_entity("amp"), Some("&"));
/// assert_eq!(lookup_entity("xyz;"), None);
/// ```
#[must_use]
pub fn lookup_entity(name: &str) -> Option<&'static str> {
    NAMED_ENTITIES.get(name).copied()
}

/// Check if any entity name starts with the given prefix.
///
/// This is used to determine whether we should keep consuming characters
/// while looking for the longest match.
#[must_use]
pub fn any_entity_has_prefix(prefix: &str) -> bool {
    NAMED_ENTITIES.keys().any(|name| name.starts_with(prefix))
}

/// Find the longest entity name at the start of `s`.
///
/// Returns the matched name length in bytes and its replacement. Entity names
/// are ASCII, so the returned length is always a char boundary.
#[must_use]
pub fn longest_entity_prefix(s: &str) -> Option<(usize, &'static str)> {
    let candidate_len = s
        .bytes()
        .take_while(u8::is_ascii_alphanumeric)
        .count();
    let with_semicolon = candidate_len + usize::from(s.as_bytes().get(candidate_len) == Some(&b';'));

    (1..=with_semicolon)
        .rev()
        .find_map(|len| lookup_entity(&s[..len]).map(|replacement| (len, replacement)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_legacy_and_terminated() {
        assert_eq!(lookup_entity("lt;"), Some("<"));
        assert_eq!(lookup_entity("lt"), Some("<"));
        assert_eq!(lookup_entity("apos"), None);
    }

    #[test]
    fn test_prefix_search() {
        assert!(any_entity_has_prefix("am"));
        assert!(!any_entity_has_prefix("zzz"));
    }

    #[test]
    fn test_longest_entity_prefix() {
        assert_eq!(longest_entity_prefix("amp;rest"), Some((4, "&")));
        assert_eq!(longest_entity_prefix("ampere"), Some((3, "&")));
        // Only the legacy Latin-1 names match without a semicolon.
        assert_eq!(longest_entity_prefix("notit;"), None);
        assert_eq!(longest_entity_prefix("copy"), Some((4, "\u{00A9}")));
    }
}
