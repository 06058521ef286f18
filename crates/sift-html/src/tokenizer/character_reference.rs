//! Character reference helpers for the HTML tokenizer.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)

use super::core::{HtmlTokenizer, TokenizerState};

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// "If the number is one of the numbers in the first column of the following
/// table, then find the row with that number in the first column, and set the
/// character reference code to the number in the second column of that row."
const C1_REPLACEMENTS: [(u32, char); 27] = [
    (0x80, '\u{20AC}'), // EURO SIGN
    (0x82, '\u{201A}'), // SINGLE LOW-9 QUOTATION MARK
    (0x83, '\u{0192}'), // LATIN SMALL LETTER F WITH HOOK
    (0x84, '\u{201E}'), // DOUBLE LOW-9 QUOTATION MARK
    (0x85, '\u{2026}'), // HORIZONTAL ELLIPSIS
    (0x86, '\u{2020}'), // DAGGER
    (0x87, '\u{2021}'), // DOUBLE DAGGER
    (0x88, '\u{02C6}'), // MODIFIER LETTER CIRCUMFLEX ACCENT
    (0x89, '\u{2030}'), // PER MILLE SIGN
    (0x8A, '\u{0160}'), // LATIN CAPITAL LETTER S WITH CARON
    (0x8B, '\u{2039}'), // SINGLE LEFT-POINTING ANGLE QUOTATION MARK
    (0x8C, '\u{0152}'), // LATIN CAPITAL LIGATURE OE
    (0x8E, '\u{017D}'), // LATIN CAPITAL LETTER Z WITH CARON
    (0x91, '\u{2018}'), // LEFT SINGLE QUOTATION MARK
    (0x92, '\u{2019}'), // RIGHT SINGLE QUOTATION MARK
    (0x93, '\u{201C}'), // LEFT DOUBLE QUOTATION MARK
    (0x94, '\u{201D}'), // RIGHT DOUBLE QUOTATION MARK
    (0x95, '\u{2022}'), // BULLET
    (0x96, '\u{2013}'), // EN DASH
    (0x97, '\u{2014}'), // EM DASH
    (0x98, '\u{02DC}'), // SMALL TILDE
    (0x99, '\u{2122}'), // TRADE MARK SIGN
    (0x9A, '\u{0161}'), // LATIN SMALL LETTER S WITH CARON
    (0x9B, '\u{203A}'), // SINGLE RIGHT-POINTING ANGLE QUOTATION MARK
    (0x9C, '\u{0153}'), // LATIN SMALL LIGATURE OE
    (0x9E, '\u{017E}'), // LATIN SMALL LETTER Z WITH CARON
    (0x9F, '\u{0178}'), // LATIN CAPITAL LETTER Y WITH DIAERESIS
];

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// Map a character reference code to the character it stands for.
///
/// - "If the number is 0x00, then this is a null-character-reference parse
///   error. Set the character reference code to 0xFFFD."
/// - "If the number is greater than 0x10FFFF ... Set the character reference
///   code to 0xFFFD."
/// - "If the number is a surrogate ... Set the character reference code to 0xFFFD."
/// - C1 controls in the replacement table are remapped; noncharacters and
///   other controls pass through unchanged.
///
/// ```
/// use sift_html::tokenizer::character_reference::numeric_reference_to_char;
///
/// assert_eq!(numeric_reference_to_char(0x41), 'A');
/// assert_eq!(numeric_reference_to_char(0x80), '€');
/// assert_eq!(numeric_reference_to_char(0xD800), '\u{FFFD}');
/// ```
#[must_use]
pub fn numeric_reference_to_char(code: u32) -> char {
    if let Some(&(_, replacement)) = C1_REPLACEMENTS.iter().find(|(c1, _)| *c1 == code) {
        return replacement;
    }
    match code {
        0 => '\u{FFFD}',
        // char::from_u32 rejects surrogates and values above U+10FFFF.
        _ => char::from_u32(code).unwrap_or('\u{FFFD}'),
    }
}

impl HtmlTokenizer {
    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    /// Returns true if the return state is an attribute value state.
    /// WHATWG: "consumed as part of an attribute"
    pub(super) const fn is_consumed_as_part_of_attribute(&self) -> bool {
        matches!(
            self.return_state,
            Some(
                TokenizerState::AttributeValueDoubleQuoted
                    | TokenizerState::AttributeValueSingleQuoted
                    | TokenizerState::AttributeValueUnquoted
            )
        )
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    /// "Flush code points consumed as a character reference"
    /// WHATWG: "If the character reference was consumed as part of an attribute,
    /// then append each character to the current attribute's value. Otherwise,
    /// emit each character as a character token."
    pub(super) fn flush_code_points_consumed_as_character_reference(&mut self) {
        let buffer = std::mem::take(&mut self.temporary_buffer);
        if self.is_consumed_as_part_of_attribute() {
            for c in buffer.chars() {
                self.append_to_attribute_value(c);
            }
        } else {
            self.emit_character_tokens(&buffer);
        }
    }

    /// Emit or append a single character produced by a character reference.
    pub(super) fn flush_character_reference_char(&mut self, c: char) {
        if self.is_consumed_as_part_of_attribute() {
            self.append_to_attribute_value(c);
        } else {
            self.emit_character_token(c);
        }
    }

    /// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    ///
    /// "Set the temporary buffer to the empty string. Append a code point equal
    /// to the character reference code to the temporary buffer. Flush code
    /// points consumed as a character reference. Switch to the return state."
    ///
    /// The end state consumes nothing, so it runs inline: `terminated` says
    /// whether the digits were closed by `;` (consumed) or by some other
    /// character that must be reconsumed in the return state.
    pub(super) fn finish_numeric_character_reference(&mut self, terminated: bool) {
        let code = self.character_reference_code;
        if code == 0 || code > 0x0010_FFFF || (0xD800..=0xDFFF).contains(&code) {
            self.log_parse_error();
        }

        self.temporary_buffer.clear();
        self.temporary_buffer.push(numeric_reference_to_char(code));
        self.flush_code_points_consumed_as_character_reference();

        let return_state = self.take_return_state();
        if terminated {
            self.switch_to(return_state);
        } else {
            self.reconsume_in(return_state);
        }
    }
}
