//! Quote pairing: match closing quotes against the stack of unresolved
//! opens and settle the sentence bounds inside the pair.

use log::debug;

use crate::settings::Setting;
use crate::token::TokenRole;
use crate::tokenizer::Tokenizer;
use crate::unicode;

impl Tokenizer {
    /// Dispatch on the quote character at buffer position `i`: ambiguous
    /// symmetric quotes try to close first and open otherwise; directional
    /// quotes go the way the table says. An unmatched directional close is
    /// silently dropped as a quote boundary.
    pub(crate) fn detect_quote_bounds(&mut self, i: usize, setting: &Setting) {
        let c = match self.tokens[i].first_char() {
            Some(c) => c,
            None => return,
        };
        if c == '"' || c == '＂' || c == '\'' {
            debug!("ambiguous quote [{c}] at #{i}");
            if !self.resolve_quote(i, &c.to_string(), setting) {
                self.quote_stack.push(i, c);
            }
        } else if setting.quotes().open_to_close(c).is_some() {
            debug!("opening quote [{c}] at #{i}");
            self.quote_stack.push(i, c);
        } else if let Some(open_class) = setting.quotes().close_to_open(c) {
            debug!("closing quote [{c}] at #{i}");
            let open_class = open_class.to_string();
            if !self.resolve_quote(i, &open_class, setting) {
                debug!("unable to resolve [{c}]");
            }
        }
    }

    /// Pair the quote ending at `end_index` with the most recent open in
    /// `open_class`. Sentences strictly inside the pair must balance;
    /// provisional ends are promoted, and a single missing final
    /// end-of-sentence is repaired. Returns false when no open matches.
    pub(crate) fn resolve_quote(
        &mut self,
        end_index: usize,
        open_class: &str,
        setting: &Setting,
    ) -> bool {
        let (begin_index, slot) = match self.quote_stack.lookup(open_class) {
            Some(found) => found,
            None => return false,
        };
        debug_assert!(begin_index <= end_index, "open quote after its close");
        debug!("quote found, begin={begin_index} end={end_index}");

        let mut begin_sentence = begin_index + 1;
        let mut expecting_end = 0i32;
        let mut subquote = 0i32;
        for i in begin_sentence..end_index {
            let role = self.tokens[i].role;
            if role.contains(TokenRole::BEGINQUOTE) {
                subquote += 1;
            }
            if subquote == 0 {
                if role.contains(TokenRole::BEGINOFSENTENCE) {
                    expecting_end += 1;
                }
                if role.contains(TokenRole::ENDOFSENTENCE) {
                    expecting_end -= 1;
                }
                if role.contains(TokenRole::TEMPENDOFSENTENCE) {
                    self.tokens[i].role.remove(TokenRole::TEMPENDOFSENTENCE);
                    self.tokens[i].role.insert(TokenRole::ENDOFSENTENCE);
                    self.tokens[begin_sentence].role.insert(TokenRole::BEGINOFSENTENCE);
                    begin_sentence = i + 1;
                }
            } else if role.contains(TokenRole::ENDQUOTE) && role.contains(TokenRole::ENDOFSENTENCE)
            {
                // a quoted sentence ended inside: the enclosing sentence
                // resumes right after it
                self.tokens[begin_sentence].role.insert(TokenRole::BEGINOFSENTENCE);
                begin_sentence = i + 1;
            }
            if self.tokens[i].role.contains(TokenRole::ENDQUOTE) {
                subquote -= 1;
            }
        }

        if expecting_end == 0 && subquote == 0 {
            self.tokens[begin_index].role.insert(TokenRole::BEGINQUOTE);
            self.tokens[end_index].role.insert(TokenRole::ENDQUOTE);
        } else if expecting_end == 1
            && subquote == 0
            && end_index > 0
            && !self.tokens[end_index - 1].role.contains(TokenRole::ENDOFSENTENCE)
        {
            // one sentence is still open; closing it on the last inner
            // token makes the pair sound
            debug!("missing end of sentence in quote, fixing");
            self.tokens[end_index - 1].role.insert(TokenRole::ENDOFSENTENCE);
            self.tokens[begin_index].role.insert(TokenRole::BEGINQUOTE);
            self.tokens[end_index].role.insert(TokenRole::ENDQUOTE);
        } else {
            debug!(
                "unbalanced quote content (expecting_end={expecting_end}, subquote={subquote}), \
                 pair not marked"
            );
        }
        self.quote_stack.erase_at(slot);

        self.close_quote_ends_sentence(end_index, setting);
        true
    }

    /// A confirmed closing quote right after an end-of-sentence ends the
    /// enclosing sentence too, when what follows looks like a sentence
    /// start (or nothing follows).
    fn close_quote_ends_sentence(&mut self, end_index: usize, setting: &Setting) {
        let size = self.tokens.len();
        if !self.tokens[end_index].role.contains(TokenRole::ENDQUOTE) {
            return;
        }
        if end_index == 0 || !self.tokens[end_index - 1].role.contains(TokenRole::ENDOFSENTENCE) {
            return;
        }
        let next_is_bos = end_index + 1 < size
            && self.tokens[end_index + 1]
                .first_char()
                .is_some_and(unicode::is_bos_candidate);
        let next_is_quote = end_index + 1 < size
            && self.tokens[end_index + 1]
                .first_char()
                .is_some_and(|c| setting.quotes().is_quote(c));
        let second_is_bos = end_index + 2 < size
            && self.tokens[end_index + 2]
                .first_char()
                .is_some_and(unicode::is_bos_candidate);
        let ends_sentence = end_index + 1 == size
            || next_is_bos
            || (end_index + 2 < size && next_is_quote && second_is_bos)
            || (end_index + 2 == size && next_is_quote);
        if ends_sentence {
            self.tokens[end_index].role.insert(TokenRole::ENDOFSENTENCE);
        }
    }
}
