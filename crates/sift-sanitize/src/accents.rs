//! Transliteration of common accented letters to ASCII.

/// Letters with a fixed ASCII spelling. Covers Latin-1 and the handful of
/// Latin Extended-A letters common in European names.
const TRANSLITERATIONS: [(char, &str); 74] = [
    ('À', "A"),
    ('Á', "A"),
    ('Â', "A"),
    ('Ã', "A"),
    ('Ä', "A"),
    ('Å', "AA"),
    ('Æ', "AE"),
    ('Ç', "C"),
    ('È', "E"),
    ('É', "E"),
    ('Ê', "E"),
    ('Ë', "E"),
    ('Ì', "I"),
    ('Í', "I"),
    ('Î', "I"),
    ('Ï', "I"),
    ('Ð', "D"),
    ('Ł', "L"),
    ('Ñ', "N"),
    ('Ò', "O"),
    ('Ó', "O"),
    ('Ô', "O"),
    ('Õ', "O"),
    ('Ö', "O"),
    ('Ø', "OE"),
    ('Ù', "U"),
    ('Ú', "U"),
    ('Ü', "U"),
    ('Û', "U"),
    ('Ý', "Y"),
    ('Þ', "Th"),
    ('ß', "ss"),
    ('à', "a"),
    ('á', "a"),
    ('â', "a"),
    ('ã', "a"),
    ('ä', "a"),
    ('å', "aa"),
    ('æ', "ae"),
    ('ç', "c"),
    ('è', "e"),
    ('é', "e"),
    ('ê', "e"),
    ('ë', "e"),
    ('ì', "i"),
    ('í', "i"),
    ('î', "i"),
    ('ï', "i"),
    ('ð', "d"),
    ('ł', "l"),
    ('ñ', "n"),
    ('ń', "n"),
    ('ò', "o"),
    ('ó', "o"),
    ('ô', "o"),
    ('õ', "o"),
    ('ō', "o"),
    ('ö', "o"),
    ('ø', "oe"),
    ('ś', "s"),
    ('ù', "u"),
    ('ú', "u"),
    ('û', "u"),
    ('ū', "u"),
    ('ü', "u"),
    ('ý', "y"),
    ('þ', "th"),
    ('ÿ', "y"),
    ('ż', "z"),
    ('Œ', "OE"),
    ('œ', "oe"),
    ('Š', "S"),
    ('š', "s"),
    ('Ž', "Z"),
];

/// The ASCII spelling of `c`, if it has one in the table.
#[must_use]
pub fn transliteration(c: char) -> Option<&'static str> {
    TRANSLITERATIONS
        .iter()
        .find(|(accented, _)| *accented == c)
        .map(|&(_, ascii)| ascii)
}

/// Replace every accented letter in the table with its ASCII spelling.
///
/// Characters outside the table are left alone.
///
/// ```
/// use sift_sanitize::accents::transliterate;
///
/// assert_eq!(transliterate("Åse Ørsted"), "AAse OErsted");
/// assert_eq!(transliterate("straße"), "strasse");
/// assert_eq!(transliterate("日本"), "日本");
/// ```
#[must_use]
pub fn transliterate(text: &str) -> String {
    let mut flattened = String::with_capacity(text.len());
    for c in text.chars() {
        match transliteration(c) {
            Some(ascii) => flattened.push_str(ascii),
            None => flattened.push(c),
        }
    }
    flattened
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_replacement_is_ascii() {
        for (accented, ascii) in TRANSLITERATIONS {
            assert!(!accented.is_ascii());
            assert!(ascii.is_ascii() && !ascii.is_empty(), "{accented}");
        }
    }

    #[test]
    fn test_table_has_no_duplicates() {
        for (i, (a, _)) in TRANSLITERATIONS.iter().enumerate() {
            assert!(
                TRANSLITERATIONS[i + 1..].iter().all(|(b, _)| a != b),
                "{a} listed twice"
            );
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(transliterate("Łódź"), "Lodź");
        assert_eq!(transliterate("Þórður"), "Thordur");
        assert_eq!(transliterate("Œuvre"), "OEuvre");
    }
}
