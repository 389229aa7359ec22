//! Token buffer bookkeeping: counting completed sentences, extracting
//! them, and rebasing the quote stack on flush.

use log::debug;

use crate::error::{Error, Result};
use crate::token::{Token, TokenRole};
use crate::tokenizer::Tokenizer;

impl Tokenizer {
    /// Count completed sentences in the buffer, i.e. tokens bearing
    /// `ENDOFSENTENCE` at quote level zero.
    ///
    /// With `force_drain`, provisional ends left by unresolved quotes are
    /// promoted to real ones and the final token is closed off, so the
    /// whole buffer becomes extractable.
    pub fn count_sentences(&mut self, force_drain: bool) -> usize {
        let size = self.tokens.len();
        let mut quote_level = 0i32;
        let mut count = 0;
        let mut begin = 0usize;
        for i in 0..size {
            let role = self.tokens[i].role;
            if role.contains(TokenRole::NEWPARAGRAPH) {
                quote_level = 0;
            }
            if role.contains(TokenRole::BEGINQUOTE) {
                quote_level += 1;
            }
            if role.contains(TokenRole::ENDQUOTE) {
                quote_level -= 1;
            }
            if force_drain && role.contains(TokenRole::TEMPENDOFSENTENCE) && quote_level == 0 {
                // the quote never closed; the provisional end becomes real
                self.tokens[i].role.remove(TokenRole::TEMPENDOFSENTENCE);
                self.tokens[i].role.insert(TokenRole::ENDOFSENTENCE);
                self.tokens[begin].role.insert(TokenRole::BEGINOFSENTENCE);
            }
            if self.tokens[i].role.contains(TokenRole::ENDOFSENTENCE) && quote_level == 0 {
                begin = i + 1;
                count += 1;
                if begin < size {
                    self.tokens[begin].role.insert(TokenRole::BEGINOFSENTENCE);
                }
            }
            if force_drain
                && i == size - 1
                && !self.tokens[i].role.contains(TokenRole::ENDOFSENTENCE)
            {
                debug!("forcibly ending the final sentence");
                count += 1;
                self.tokens[i].role.insert(TokenRole::ENDOFSENTENCE);
            }
        }
        count
    }

    /// Copy out sentence `index` (0-based among completed sentences),
    /// terminator included.
    pub fn sentence(&self, index: usize) -> Result<Vec<Token>> {
        let size = self.tokens.len();
        let mut quote_level = 0i32;
        let mut count = 0usize;
        let mut begin = 0usize;
        for i in 0..size {
            let role = self.tokens[i].role;
            if role.contains(TokenRole::NEWPARAGRAPH) {
                quote_level = 0;
            }
            // the closing quote settles before a sentence start is probed,
            // the opening quote only after; otherwise nested quoted
            // sentences are extracted twice
            if role.contains(TokenRole::ENDQUOTE) {
                quote_level -= 1;
            }
            if role.contains(TokenRole::BEGINOFSENTENCE) && quote_level == 0 {
                begin = i;
            }
            if role.contains(TokenRole::BEGINQUOTE) {
                quote_level += 1;
            }
            if role.contains(TokenRole::ENDOFSENTENCE) && quote_level == 0 {
                if count == index {
                    debug!("extracted sentence {index}, begin={begin} end={i}");
                    let mut out: Vec<Token> = self.tokens[begin..=i].to_vec();
                    out[0].role.insert(TokenRole::BEGINOFSENTENCE);
                    return Ok(out);
                }
                count += 1;
            }
        }
        Err(Error::Range(format!(
            "no sentence exists with index {index}"
        )))
    }

    /// Erase the first `n` completed sentences, rebasing the quote stack
    /// and restoring `BEGINOFSENTENCE` on the surviving head. Returns the
    /// number of tokens left.
    pub fn flush_sentences(&mut self, n: usize) -> Result<usize> {
        let size = self.tokens.len();
        if n == 0 {
            return Ok(size);
        }
        let mut quote_level = 0i32;
        let mut begin = 0usize;
        let mut remaining = n;
        for i in 0..size {
            if remaining == 0 {
                break;
            }
            let role = self.tokens[i].role;
            if role.contains(TokenRole::NEWPARAGRAPH) {
                quote_level = 0;
            }
            if role.contains(TokenRole::BEGINQUOTE) {
                quote_level += 1;
            }
            if role.contains(TokenRole::ENDQUOTE) {
                quote_level -= 1;
            }
            if role.contains(TokenRole::ENDOFSENTENCE) && quote_level == 0 {
                begin = i + 1;
                remaining -= 1;
            }
        }
        if begin == 0 {
            return Err(Error::Range(format!(
                "unable to flush {n} sentences, not that many in the buffer"
            )));
        }
        if begin == size {
            self.tokens.clear();
            self.quote_stack.clear();
        } else {
            self.tokens.drain(..begin);
            if !self.quote_stack.is_empty() {
                self.quote_stack.flush(begin);
            }
        }
        if let Some(first) = self.tokens.first_mut() {
            first.role.insert(TokenRole::BEGINOFSENTENCE);
        }
        Ok(self.tokens.len())
    }

    /// Extract the first `n` completed sentences and erase them from the
    /// buffer.
    pub fn extract_and_flush(&mut self, n: usize) -> Result<Vec<Token>> {
        let mut out = Vec::new();
        for i in 0..n {
            out.extend(self.sentence(i)?);
        }
        self.flush_sentences(n)?;
        Ok(out)
    }
}
