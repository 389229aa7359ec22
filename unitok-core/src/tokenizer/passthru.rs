//! Passthru mode: whitespace splitting with character-category-majority
//! classification, no rules.

use log::debug;

use crate::token::{Token, TokenClass, TokenRole};
use crate::tokenizer::Tokenizer;
use crate::unicode;

impl Tokenizer {
    /// Tokenize a line without the rule engine. A word is `WORD` when only
    /// alphabetic characters occurred, `NUMBER` for digits only,
    /// `PUNCTUATION` for punctuation only, `UNKNOWN` for any mix.
    pub fn passthru_line(&mut self, input: &str) {
        debug!("passthru line [{input}]");
        let begin = self.tokens.len();
        let mut word = String::new();
        let mut alpha = false;
        let mut num = false;
        let mut punct = false;
        for c in input.chars() {
            if c.is_whitespace() {
                if word.is_empty() {
                    continue;
                }
                self.passthru_word(&word, alpha, num, punct);
                word.clear();
                alpha = false;
                num = false;
                punct = false;
            } else {
                if unicode::is_alpha(c) {
                    alpha = true;
                } else if unicode::is_punct(c) {
                    punct = true;
                } else if unicode::is_digit(c) {
                    num = true;
                }
                word.push(c);
            }
        }
        if !word.is_empty() {
            self.passthru_word(&word, alpha, num, punct);
        }
        if self.config.sentence_per_line_input && self.tokens.len() > begin {
            self.tokens[begin].role |= TokenRole::BEGINOFSENTENCE;
            if let Some(last) = self.tokens.last_mut() {
                last.role |= TokenRole::ENDOFSENTENCE;
            }
        }
    }

    fn passthru_word(&mut self, word: &str, alpha: bool, num: bool, punct: bool) {
        if word == self.config.eos_marker {
            if let Some(last) = self.tokens.last_mut() {
                last.role |= TokenRole::ENDOFSENTENCE;
            }
            self.passthru_bos = true;
            return;
        }
        let class = if alpha && !num && !punct {
            TokenClass::word()
        } else if num && !alpha && !punct {
            TokenClass::number()
        } else if punct && !alpha && !num {
            TokenClass::punctuation()
        } else {
            TokenClass::unknown()
        };
        if self.config.do_punct_filter && class.is_filterable() {
            debug!("passthru skipped {class} [{word}]");
            self.strip_trailing_nospace();
            return;
        }
        let text = self.normalized_text(class.as_str(), word);
        let role = if self.passthru_bos {
            TokenRole::BEGINOFSENTENCE
        } else {
            TokenRole::empty()
        };
        self.passthru_bos = false;
        self.tokens.push(Token::new(class, text, role));
    }
}
