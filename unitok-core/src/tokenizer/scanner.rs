//! Character scanner: walks a line's code points, accumulates words
//! between whitespace, and decides which words need the full rule engine.

use log::{debug, warn};

use crate::settings::Setting;
use crate::token::{TokenClass, TokenRole};
use crate::tokenizer::{Tokenizer, MAX_WORD_LENGTH};
use crate::unicode;

impl Tokenizer {
    /// Scan one normalized, filtered line. Returns the number of new
    /// tokens; a pathological line is dropped and contributes none.
    pub(crate) fn scan_line(&mut self, setting: &Setting, input: &str, lang: &str) -> usize {
        let len = input.chars().count();
        debug!("scanning line of {len} characters");
        if len == 0 {
            return 0;
        }
        let begin = self.tokens.len();
        let marker_len = self.config.eos_marker.chars().count();
        let mut word = String::new();
        let mut word_len = 0usize;
        let mut needs_rules = false;
        let mut reset = false;
        let mut saw_marker = false;

        for (i, c) in input.chars().enumerate() {
            if reset {
                reset = false;
                needs_rules = false;
                word.clear();
                word_len = 0;
                if !c.is_whitespace() {
                    word.push(c);
                    word_len = 1;
                }
            } else if !c.is_whitespace() {
                word.push(c);
                word_len += 1;
            }
            if word_len > MAX_WORD_LENGTH {
                warn!(
                    "line {}: word exceeds {MAX_WORD_LENGTH} characters, line dropped",
                    self.line_num
                );
                self.tokens.truncate(begin);
                return 0;
            }
            if c.is_whitespace() || i == len - 1 {
                if i == len - 1 && self.needs_rule_engine(setting, c) {
                    needs_rules = true;
                }
                let marker_at = if word_len >= marker_len {
                    word.rfind(&self.config.eos_marker)
                } else {
                    None
                };
                if let Some(pos) = marker_at {
                    saw_marker = true;
                    self.split_on_marker(setting, &word, pos);
                } else if !word.is_empty() {
                    if needs_rules {
                        self.tokenize_word(setting, &word, true, None);
                    } else {
                        self.tokenize_word(setting, &word, true, Some(TokenClass::WORD));
                    }
                }
                reset = true;
            } else if self.needs_rule_engine(setting, c) {
                needs_rules = true;
            }
        }

        let new_tokens = self.tokens.len() - begin;
        if new_tokens == 0 {
            if saw_marker {
                // a lone utterance marker still consumes the signal
                self.paragraph_signal = false;
            }
            return 0;
        }
        for token in &mut self.tokens[begin..] {
            token.lang = Some(lang.to_string());
        }
        if self.paragraph_signal {
            self.tokens[begin].role |= TokenRole::NEWPARAGRAPH | TokenRole::BEGINOFSENTENCE;
            self.paragraph_signal = false;
        }
        if self.config.detect_bounds {
            if self.config.sentence_per_line_input {
                self.tokens[begin].role |= TokenRole::BEGINOFSENTENCE;
                if let Some(last) = self.tokens.last_mut() {
                    last.role |= TokenRole::ENDOFSENTENCE;
                }
                if self.config.detect_quotes {
                    self.detect_quoted_sentence_bounds(begin, setting);
                }
            } else if self.config.detect_quotes {
                self.detect_quoted_sentence_bounds(begin, setting);
            } else {
                self.detect_sentence_bounds(begin, setting);
            }
        }
        new_tokens
    }

    /// A word needs the full rule engine once it contains punctuation, a
    /// digit, a quote, or an emoticon/pictogram block member.
    fn needs_rule_engine(&self, setting: &Setting, c: char) -> bool {
        unicode::is_punct(c)
            || unicode::is_digit(c)
            || setting.quotes().is_quote(c)
            || unicode::is_emoticon(c)
            || unicode::is_pictogram(c)
    }

    /// Split a word around an explicit utterance marker: the prefix keeps
    /// no trailing space, the token before the split becomes an
    /// end-of-sentence, and the suffix is tokenized normally.
    fn split_on_marker(&mut self, setting: &Setting, word: &str, pos: usize) {
        debug!("explicit end-of-sentence marker in [{word}]");
        let prefix = &word[..pos];
        let suffix = &word[pos + self.config.eos_marker.len()..];
        if !prefix.is_empty() {
            self.tokenize_word(setting, prefix, false, None);
        }
        if let Some(last) = self.tokens.last_mut() {
            last.role |= TokenRole::ENDOFSENTENCE;
        } else {
            warn!("explicit end-of-sentence marker with an empty buffer has no effect");
        }
        if !suffix.is_empty() {
            self.tokenize_word(setting, suffix, true, None);
        }
    }
}
