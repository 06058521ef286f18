//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Input/character handling ("Consume the next input character")
//! - Token emission ("Emit the current token"), including text coalescing
//! - Raw text helpers shared by the RCDATA, RAWTEXT and script data states
//! - Attribute helpers for duplicate detection

use super::core::{HtmlTokenizer, TokenizerState};
use super::token::Token;

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HtmlTokenizer {
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Switch to the X state"
    ///
    /// Transitions to a new state. The next character will be consumed on the
    /// next step of the state machine.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Reconsume in the X state"
    ///
    /// Transitions to a new state without consuming the current character.
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }

    /// "Switch to the return state" / "Reconsume in the return state"
    ///
    /// The return state is always set before entering a character reference
    /// state; `Data` is the fallback if that invariant were ever broken.
    pub(super) const fn take_return_state(&mut self) -> TokenizerState {
        match self.return_state.take() {
            Some(state) => state,
            None => TokenizerState::Data,
        }
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl HtmlTokenizer {
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Consume the next input character"
    ///
    /// Returns the character at the current position and advances the position.
    /// Returns None if we've reached the end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    /// Peek at a codepoint at the given offset from the current position without
    /// consuming it. Used for lookahead operations like "the next few characters are".
    #[must_use]
    pub fn peek_codepoint(&self, offset: usize) -> Option<char> {
        self.input[self.current_pos..].chars().nth(offset)
    }

    /// "If the next few characters are..."
    ///
    /// Check if the next few characters match the target string exactly.
    #[must_use]
    pub fn next_few_characters_are(&self, target: &str) -> bool {
        self.input[self.current_pos..].starts_with(target)
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// "ASCII case-insensitive match for the word 'DOCTYPE'"
    #[must_use]
    pub fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        self.input[self.current_pos..]
            .get(..target.len())
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(target))
    }

    /// Consume the given string from the input.
    /// Caller must have already verified the characters are present.
    pub(super) const fn consume_string(&mut self, target: &str) {
        // Targets are ASCII ("DOCTYPE", "--", "[CDATA["), so bytes == chars.
        self.current_pos += target.len();
    }

    /// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    ///
    /// "ASCII whitespace is U+0009 TAB, U+000A LF, U+000C FF, U+000D CR,
    /// or U+0020 SPACE."
    ///
    /// CR never reaches the state machine: it is normalized to LF on input.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C')
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HtmlTokenizer {
    /// "Emit the current token"
    ///
    /// Flushes any buffered text first so output order matches input order.
    pub(super) fn emit_token(&mut self) {
        let Some(token) = self.current_token.take() else {
            return;
        };
        self.flush_pending_text();

        if let Token::StartTag {
            ref name,
            self_closing,
            ..
        } = token
        {
            self.last_start_tag_name = Some(name.clone());

            // [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
            // NOTE: The tree builder normally switches the tokenizer state. There is
            // no tree builder here, so the switch happens on emission. A
            // self-closing start tag has no content and does not switch.
            if !self_closing {
                match name.as_str() {
                    // "Switch the tokenizer to the RCDATA state."
                    "title" | "textarea" => self.switch_to(TokenizerState::Rcdata),
                    // "Switch the tokenizer to the RAWTEXT state."
                    "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
                        self.switch_to(TokenizerState::Rawtext);
                    }
                    // "Switch the tokenizer to the script data state."
                    "script" => self.switch_to(TokenizerState::ScriptData),
                    // "Switch the tokenizer to the PLAINTEXT state."
                    "plaintext" => self.switch_to(TokenizerState::Plaintext),
                    _ => {}
                }
            }
        }
        self.token_stream.push_back(token);
    }

    /// "Emit the current input character as a character token."
    ///
    /// Character tokens are buffered and coalesced into a single
    /// [`Token::Text`] that is flushed before the next non-character token.
    pub(super) fn emit_character_token(&mut self, c: char) {
        self.pending_text.push(c);
    }

    /// Emit every character of `s` as character tokens.
    pub(super) fn emit_character_tokens(&mut self, s: &str) {
        self.pending_text.push_str(s);
    }

    /// "Emit an end-of-file token."
    pub(super) fn emit_eof_token(&mut self) {
        self.flush_pending_text();
        self.token_stream.push_back(Token::EndOfFile);
        self.at_eof = true;
    }

    /// Turn the buffered character run into a text token.
    fn flush_pending_text(&mut self) {
        if !self.pending_text.is_empty() {
            let data = std::mem::take(&mut self.pending_text);
            self.token_stream.push_back(Token::Text { data });
        }
    }
}

// =============================================================================
// Raw Text Helpers
// =============================================================================

impl HtmlTokenizer {
    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    ///
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any."
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        if let (Some(last_start_tag), Some(Token::EndTag { name, .. })) =
            (&self.last_start_tag_name, &self.current_token)
        {
            return name == last_start_tag;
        }
        false
    }

    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    /// [§ 13.2.5.14 RAWTEXT end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-name-state)
    /// [§ 13.2.5.17 Script data end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-end-tag-name-state)
    ///
    /// "Anything else":
    /// "Emit a U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS character
    /// token, and a character token for each of the characters in the temporary
    /// buffer... Reconsume in the [text] state."
    pub(super) fn emit_end_tag_name_anything_else(&mut self, text_state: TokenizerState) {
        // STEP 1: "Emit a U+003C LESS-THAN SIGN character token"
        // STEP 2: "Emit a U+002F SOLIDUS character token"
        self.emit_character_tokens("</");
        // STEP 3: "Emit a character token for each of the characters in the temporary buffer"
        let buffer = std::mem::take(&mut self.temporary_buffer);
        self.emit_character_tokens(&buffer);
        // STEP 4: Discard the current end tag token
        self.current_token = None;
        // STEP 5: "Reconsume in the [text] state"
        self.reconsume_in(text_state);
    }
}

// =============================================================================
// Attribute Helpers
// =============================================================================

impl HtmlTokenizer {
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "When the user agent leaves the attribute name state... if there is
    /// already an attribute on the token with the exact same name, then this
    /// is a duplicate-attribute parse error and the new attribute must be
    /// removed from the token."
    pub(super) fn check_duplicate_attribute(&mut self) {
        let is_duplicate = self
            .current_token
            .as_ref()
            .is_some_and(Token::current_attribute_name_is_duplicate);

        if is_duplicate {
            // STEP 1: "This is a duplicate-attribute parse error"
            self.log_parse_error();

            // STEP 2: "The new attribute must be removed from the token"
            if let Some(ref mut token) = self.current_token {
                token.remove_current_attribute();
            }
            self.dropped_duplicate_attribute = true;
        }
    }

    /// Append to the current attribute's value, unless the attribute was
    /// already dropped as a duplicate. Values of a dropped attribute are
    /// consumed and discarded.
    pub(super) fn append_to_attribute_value(&mut self, c: char) {
        if self.dropped_duplicate_attribute {
            return;
        }
        if let Some(ref mut token) = self.current_token {
            token.append_to_current_attribute_value(c);
        }
    }

    /// Start a new attribute in the current tag token.
    pub(super) fn start_new_attribute(&mut self) {
        self.dropped_duplicate_attribute = false;
        if let Some(ref mut token) = self.current_token {
            token.start_new_attribute();
        }
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl HtmlTokenizer {
    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Parse errors in HTML are not fatal: the tokenizer recovers and continues.
    /// Untrusted markup produces them constantly, so they only reach `trace`.
    pub(super) fn log_parse_error(&self) {
        log::trace!(
            "[HTML Tokenizer] parse error in {} state at byte {}",
            self.state,
            self.current_pos
        );
    }
}
