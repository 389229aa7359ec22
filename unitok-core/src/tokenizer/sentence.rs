//! Sentence-boundary detection over newly added tokens, in quote-aware
//! and quote-oblivious modes.

use log::debug;

use crate::settings::Setting;
use crate::token::{Token, TokenRole};
use crate::tokenizer::Tokenizer;
use crate::unicode;

/// Closing bracket that may absorb the end-of-sentence of its predecessor.
fn is_closing_bracket(token: &Token) -> bool {
    let mut chars = token.text.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(')' | '}' | ']' | '>'), None)
    )
}

impl Tokenizer {
    /// Does the punctuation token at `i` mark the end of a sentence?
    pub(crate) fn detect_eos(&self, i: usize, setting: &Setting) -> bool {
        let c = match self.tokens[i].first_char() {
            Some(c) => c,
            None => return false,
        };
        if c != '.' && !setting.is_eos_marker(c) {
            return false;
        }
        if i + 1 == self.tokens.len() {
            // nothing follows on this line
            return true;
        }
        let next = match self.tokens[i + 1].first_char() {
            Some(c) => c,
            None => return true,
        };
        if setting.quotes().is_quote(next) {
            if self.config.detect_quotes {
                return true;
            }
            if i + 2 < self.tokens.len() {
                if let Some(after_quote) = self.tokens[i + 2].first_char() {
                    // the word after the quote starts a sentence or more
                    // punctuation follows
                    if unicode::is_uppercase(after_quote)
                        || unicode::is_titlecase(after_quote)
                        || unicode::is_punct(after_quote)
                    {
                        return true;
                    }
                }
            }
            false
        } else if self.tokens[i].text.chars().count() > 1 {
            // multi-character punctuation only ends a sentence before a
            // capitalized word
            unicode::is_uppercase(next) || unicode::is_titlecase(next)
        } else {
            true
        }
    }

    /// Quote-oblivious detection over `tokens[offset..]`.
    pub(crate) fn detect_sentence_bounds(&mut self, offset: usize, setting: &Setting) {
        let size = self.tokens.len();
        for i in offset..size {
            if !self.tokens[i].class.is_punctuation() {
                continue;
            }
            if self.detect_eos(i, setting) {
                debug!("end of sentence at #{i} [{}]", self.tokens[i].text);
                self.tokens[i].role |= TokenRole::ENDOFSENTENCE;
                if i + 1 < size && !self.tokens[i + 1].role.contains(TokenRole::BEGINOFSENTENCE) {
                    self.tokens[i + 1].role |= TokenRole::BEGINOFSENTENCE;
                }
                self.take_over_eos(i);
            } else if is_closing_bracket(&self.tokens[i]) {
                self.take_over_eos(i);
            }
        }
        self.fixup_trailing_punctuation(offset);
    }

    /// Quote-aware detection: inside an open quote the end-of-sentence is
    /// provisional until the quote resolves.
    pub(crate) fn detect_quoted_sentence_bounds(&mut self, offset: usize, setting: &Setting) {
        let size = self.tokens.len();
        for i in offset..size {
            if !self.tokens[i].class.is_punctuation() {
                continue;
            }
            if self.detect_eos(i, setting) {
                if !self.quote_stack.is_empty() {
                    debug!("provisional end of sentence at #{i}");
                    self.tokens[i].role |= TokenRole::TEMPENDOFSENTENCE;
                    // only the latest provisional end survives
                    if i > 0 && self.tokens[i - 1].role.contains(TokenRole::TEMPENDOFSENTENCE) {
                        self.tokens[i - 1].role.remove(TokenRole::TEMPENDOFSENTENCE);
                    }
                } else if !self.config.sentence_per_line_input {
                    debug!("end of sentence at #{i} [{}]", self.tokens[i].text);
                    self.tokens[i].role |= TokenRole::ENDOFSENTENCE;
                    if i + 1 < size
                        && !self.tokens[i + 1].role.contains(TokenRole::BEGINOFSENTENCE)
                    {
                        self.tokens[i + 1].role |= TokenRole::BEGINOFSENTENCE;
                    }
                    self.take_over_eos(i);
                }
            } else if is_closing_bracket(&self.tokens[i]) {
                self.take_over_eos(i);
            }
            self.detect_quote_bounds(i, setting);
        }
    }

    /// When the predecessor ended a sentence without beginning one, the
    /// current punctuation token takes over that role.
    fn take_over_eos(&mut self, i: usize) {
        if i == 0 {
            return;
        }
        let prev = self.tokens[i - 1].role;
        if prev.contains(TokenRole::ENDOFSENTENCE) && !prev.contains(TokenRole::BEGINOFSENTENCE) {
            self.tokens[i - 1].role.remove(TokenRole::ENDOFSENTENCE);
            if self.tokens[i].role.contains(TokenRole::BEGINOFSENTENCE) {
                self.tokens[i].role.remove(TokenRole::BEGINOFSENTENCE);
            }
        }
    }

    /// Strip spurious sentence roles from punctuation at the end of the
    /// buffer so no sentence consists of punctuation alone. The very last
    /// token keeps its end-of-sentence: the next line must see a closed
    /// previous sentence.
    fn fixup_trailing_punctuation(&mut self, offset: usize) {
        let size = self.tokens.len();
        for i in (offset + 1..size).rev() {
            if !self.tokens[i].class.is_punctuation() {
                break;
            }
            self.tokens[i].role.remove(TokenRole::BEGINOFSENTENCE);
            if i != size - 1 {
                self.tokens[i].role.remove(TokenRole::ENDOFSENTENCE);
            }
        }
    }
}
