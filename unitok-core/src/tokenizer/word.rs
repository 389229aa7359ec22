//! The recursive word tokenizer: ordered rule sweep with pre/match/post
//! recursion.

use log::{trace, warn};

use crate::settings::Setting;
use crate::token::{Token, TokenClass, TokenRole};
use crate::tokenizer::Tokenizer;
use crate::unicode;

impl Tokenizer {
    /// Tokenize a whitespace-delimited fragment. `space` tells whether a
    /// space follows the fragment in the input; `assigned` carries a class
    /// guess on recursive re-entry and suppresses further recursion.
    pub(crate) fn tokenize_word(
        &mut self,
        setting: &Setting,
        input: &str,
        space: bool,
        assigned: Option<&str>,
    ) {
        if input == self.config.eos_marker {
            if let Some(last) = self.tokens.last_mut() {
                last.role |= TokenRole::ENDOFSENTENCE;
            } else {
                warn!("explicit end-of-sentence marker by itself has no effect");
            }
            return;
        }

        let mut chars = input.chars();
        let first = match chars.next() {
            Some(c) => c,
            None => return,
        };
        if chars.next().is_none() {
            self.tokenize_single(first, input, space);
            return;
        }

        for rule in setting.rules() {
            let m = match rule.match_all(input) {
                Some(m) => m,
                None => continue,
            };
            trace!(
                "rule {} matched [{input}]: pre=[{}] matches={:?} post=[{}]",
                rule.id(),
                m.pre,
                m.matches,
                m.post
            );
            let rule_id = rule.id();

            // Re-entry with an assigned class: when the match covers the
            // whole fragment, or only confirms WORD, emit a single token
            // instead of recursing again. An incoming WORD guess may be
            // refined; anything more specific is kept as-is.
            if assigned.is_some() && (rule_id == TokenClass::WORD || (m.pre.is_empty() && m.post.is_empty())) {
                let assigned = assigned.unwrap_or(TokenClass::UNKNOWN);
                let class = if assigned == TokenClass::WORD {
                    TokenClass::new(rule_id)
                } else {
                    TokenClass::new(assigned)
                };
                self.push_token(class, input.to_string(), space);
                return;
            }

            if !m.pre.is_empty() {
                self.tokenize_word(setting, &m.pre, false, None);
            }
            let count = m.matches.len();
            for (idx, matched) in m.matches.iter().enumerate() {
                if self.config.do_punct_filter && TokenClass::new(rule_id).is_filterable() {
                    trace!("skipped {rule_id} [{matched}]");
                    self.strip_trailing_nospace();
                    continue;
                }
                let internal_space = space && m.post.is_empty() && idx + 1 == count;
                if self.config.norm_set.contains(rule_id) {
                    self.push_token(
                        TokenClass::new(rule_id),
                        format!("{{{{{rule_id}}}}}"),
                        internal_space,
                    );
                } else if assigned.is_some() {
                    self.push_token(TokenClass::new(rule_id), matched.clone(), internal_space);
                } else {
                    self.tokenize_word(setting, matched, internal_space, Some(rule_id));
                }
            }
            if !m.post.is_empty() {
                self.tokenize_word(setting, &m.post, space, None);
            }
            return;
        }

        // no rule matched: keep the fragment in one piece
        let class = assigned.map(TokenClass::new).unwrap_or_else(TokenClass::unknown);
        self.push_token(class, input.to_string(), space);
    }

    /// Fast path for a single code point: classify by Unicode category,
    /// no rule sweep needed.
    fn tokenize_single(&mut self, c: char, input: &str, space: bool) {
        let class = unicode::detect_type(c);
        if class == TokenClass::SPACE {
            return;
        }
        if self.config.do_punct_filter && class.is_filterable() {
            trace!("skipped {class} [{input}]");
            self.strip_trailing_nospace();
            return;
        }
        let text = self.normalized_text(class.as_str(), input);
        self.push_token(class, text, space);
    }

    pub(crate) fn push_token(&mut self, class: TokenClass, text: String, space: bool) {
        let role = if space {
            TokenRole::empty()
        } else {
            TokenRole::NOSPACE
        };
        let token = Token::new(class, text, role);
        trace!("added token {token}");
        self.tokens.push(token);
    }

    /// When a token is skipped by the punctuation filter, its spacing must
    /// not be inherited by the neighbors.
    pub(crate) fn strip_trailing_nospace(&mut self) {
        if let Some(last) = self.tokens.last_mut() {
            last.role.remove(TokenRole::NOSPACE);
        }
    }

    pub(crate) fn normalized_text(&self, class: &str, text: &str) -> String {
        if self.config.norm_set.contains(class) {
            format!("{{{{{class}}}}}")
        } else {
            text.to_string()
        }
    }
}
