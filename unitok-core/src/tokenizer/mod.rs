//! The tokenization engine: per-instance state, the line driver, and
//! text-mode rendering.
//!
//! A `Tokenizer` owns the token buffer, the quote stack, the paragraph
//! signal, and the line counter. All effects on that state are ordered by
//! the sequence of calls on the instance; `Setting` bundles are immutable
//! and shared.

mod buffer;
mod passthru;
mod quotes;
mod scanner;
mod sentence;
mod word;

use std::collections::{HashMap, HashSet};
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

use encoding_rs::Encoding;
use log::{debug, warn};

use crate::error::{Error, Result};
use crate::normalizer::Normalizer;
use crate::quoting::QuoteStack;
use crate::settings::Setting;
use crate::token::{Token, TokenRole};

/// Cap on the code points of a single whitespace-delimited word; a line
/// that exceeds it is dropped as pathological input.
pub const MAX_WORD_LENGTH: usize = 2_500;

/// Default explicit end-of-sentence marker.
pub const DEFAULT_EOS_MARKER: &str = "<utt>";

/// Engine configuration. Immutable once the tokenizer is constructed.
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    /// Settings to load; the first entry is the default language
    pub languages: Vec<String>,
    /// Extra directory searched for `tokconfig-<lang>` files
    pub config_dir: Option<PathBuf>,
    /// Encoding label for byte input fed through `tokenize_stream`
    pub input_encoding: String,
    /// The literal utterance marker recognized anywhere in input
    pub eos_marker: String,
    /// Run the sentence-boundary detector
    pub detect_bounds: bool,
    /// Pair quotes and resolve sentence bounds inside them
    pub detect_quotes: bool,
    /// Stamp `NEWPARAGRAPH` after blank lines
    pub detect_paragraphs: bool,
    /// Input is one sentence per line
    pub sentence_per_line_input: bool,
    /// Render one sentence per line
    pub sentence_per_line_output: bool,
    /// Apply the setting's character filter
    pub do_filter: bool,
    /// Drop punctuation (and currency/emoticon/pictogram) tokens
    pub do_punct_filter: bool,
    /// Lowercase rendered text
    pub lowercase: bool,
    /// Uppercase rendered text
    pub uppercase: bool,
    /// Classes whose tokens are replaced by a `{{TYPE}}` placeholder
    pub norm_set: HashSet<String>,
    /// Skip the rule engine entirely
    pub passthru: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        TokenizerConfig {
            languages: vec!["generic".to_string()],
            config_dir: None,
            input_encoding: "UTF-8".to_string(),
            eos_marker: DEFAULT_EOS_MARKER.to_string(),
            detect_bounds: true,
            detect_quotes: false,
            detect_paragraphs: true,
            sentence_per_line_input: false,
            sentence_per_line_output: false,
            do_filter: true,
            do_punct_filter: false,
            lowercase: false,
            uppercase: false,
            norm_set: HashSet::new(),
            passthru: false,
        }
    }
}

impl TokenizerConfig {
    pub fn builder() -> TokenizerConfigBuilder {
        TokenizerConfigBuilder::default()
    }

    fn validate(&self) -> Result<()> {
        if self.lowercase && self.uppercase {
            return Err(Error::Config(
                "lowercase and uppercase are mutually exclusive".into(),
            ));
        }
        if !self.passthru && self.languages.is_empty() {
            return Err(Error::Config("no languages configured".into()));
        }
        if self.eos_marker.is_empty() {
            return Err(Error::Config("eos_marker must not be empty".into()));
        }
        if Encoding::for_label(self.input_encoding.as_bytes()).is_none() {
            return Err(Error::Coding {
                encoding: self.input_encoding.clone(),
            });
        }
        Ok(())
    }
}

/// Fluent builder for `TokenizerConfig`.
#[derive(Debug, Default)]
pub struct TokenizerConfigBuilder {
    config: TokenizerConfig,
}

impl TokenizerConfigBuilder {
    /// Replace the language list with a single language.
    pub fn language(mut self, lang: impl Into<String>) -> Self {
        self.config.languages = vec![lang.into()];
        self
    }

    pub fn languages(mut self, langs: Vec<String>) -> Self {
        self.config.languages = langs;
        self
    }

    pub fn config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.config_dir = Some(dir.into());
        self
    }

    pub fn input_encoding(mut self, label: impl Into<String>) -> Self {
        self.config.input_encoding = label.into();
        self
    }

    pub fn eos_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.eos_marker = marker.into();
        self
    }

    pub fn detect_bounds(mut self, on: bool) -> Self {
        self.config.detect_bounds = on;
        self
    }

    pub fn detect_quotes(mut self, on: bool) -> Self {
        self.config.detect_quotes = on;
        self
    }

    pub fn detect_paragraphs(mut self, on: bool) -> Self {
        self.config.detect_paragraphs = on;
        self
    }

    pub fn sentence_per_line_input(mut self, on: bool) -> Self {
        self.config.sentence_per_line_input = on;
        self
    }

    pub fn sentence_per_line_output(mut self, on: bool) -> Self {
        self.config.sentence_per_line_output = on;
        self
    }

    pub fn filter(mut self, on: bool) -> Self {
        self.config.do_filter = on;
        self
    }

    pub fn punct_filter(mut self, on: bool) -> Self {
        self.config.do_punct_filter = on;
        self
    }

    pub fn lowercase(mut self, on: bool) -> Self {
        self.config.lowercase = on;
        self
    }

    pub fn uppercase(mut self, on: bool) -> Self {
        self.config.uppercase = on;
        self
    }

    /// Comma-separated class names to replace with `{{TYPE}}` placeholders.
    pub fn normalize(mut self, classes: &str) -> Self {
        self.config.norm_set = classes
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        self
    }

    pub fn passthru(mut self, on: bool) -> Self {
        self.config.passthru = on;
        self
    }

    pub fn build(self) -> Result<TokenizerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// The tokenization engine. Single-threaded and stateful; one instance per
/// input stream.
pub struct Tokenizer {
    config: TokenizerConfig,
    encoding: &'static Encoding,
    settings: HashMap<String, Arc<Setting>>,
    default_language: String,
    normalizer: Normalizer,
    tokens: Vec<Token>,
    quote_stack: QuoteStack,
    paragraph_signal: bool,
    passthru_bos: bool,
    line_num: usize,
}

impl Tokenizer {
    /// Build a tokenizer, loading and compiling every configured setting.
    pub fn new(config: TokenizerConfig) -> Result<Tokenizer> {
        config.validate()?;
        let encoding = Encoding::for_label(config.input_encoding.as_bytes())
            .ok_or_else(|| Error::Coding {
                encoding: config.input_encoding.clone(),
            })?;
        let mut settings = HashMap::new();
        let mut default_language = String::new();
        if !config.passthru {
            for lang in &config.languages {
                let setting = Setting::load(lang, config.config_dir.as_deref())?;
                debug!(
                    "loaded settings '{}' ({} rules)",
                    setting.name(),
                    setting.rules().len()
                );
                settings.insert(lang.clone(), Arc::new(setting));
            }
            default_language.clone_from(&config.languages[0]);
        }
        Ok(Tokenizer {
            config,
            encoding,
            settings,
            default_language,
            normalizer: Normalizer::default(),
            tokens: Vec::new(),
            quote_stack: QuoteStack::new(),
            paragraph_signal: true,
            passthru_bos: true,
            line_num: 0,
        })
    }

    /// Tokenizer over the embedded generic settings.
    pub fn with_defaults() -> Result<Tokenizer> {
        Tokenizer::new(TokenizerConfig::default())
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// The tokens currently buffered (completed or not).
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn setting(&self, lang: &str) -> Option<&Arc<Setting>> {
        self.settings.get(lang)
    }

    /// Raise the paragraph signal; the next non-empty line stamps
    /// `NEWPARAGRAPH` on its first token.
    pub fn signal_paragraph(&mut self) {
        self.paragraph_signal = true;
    }

    /// Drop all buffered state and start a fresh stream.
    pub fn reset(&mut self) {
        self.tokens.clear();
        self.quote_stack.clear();
        self.paragraph_signal = true;
        self.passthru_bos = true;
        self.line_num = 0;
    }

    /// Switch the byte-input encoding (e.g. after a BOM sniff).
    pub fn set_input_encoding(&mut self, label: &str) -> Result<()> {
        self.encoding = Encoding::for_label(label.as_bytes()).ok_or_else(|| Error::Coding {
            encoding: label.to_string(),
        })?;
        self.config.input_encoding = label.to_string();
        Ok(())
    }

    /// Tokenize one already-decoded line under the rules of `lang` (the
    /// default language when `None` or unknown). Returns the number of new
    /// tokens.
    pub fn tokenize_line(&mut self, line: &str, lang: Option<&str>) -> Result<usize> {
        let (setting, resolved) = self.resolve_setting(lang)?;
        let input = self.normalizer.normalize(line);
        let input = if self.config.do_filter {
            setting.filter().filter(&input)
        } else {
            input
        };
        Ok(self.scan_line(&setting, &input, &resolved))
    }

    fn resolve_setting(&self, lang: Option<&str>) -> Result<(Arc<Setting>, String)> {
        if let Some(lang) = lang {
            if let Some(setting) = self.settings.get(lang) {
                return Ok((setting.clone(), lang.to_string()));
            }
            debug!("no settings for '{lang}', falling back to '{}'", self.default_language);
        }
        match self.settings.get(&self.default_language) {
            Some(setting) => Ok((setting.clone(), self.default_language.clone())),
            None => Err(Error::Config("no settings loaded (passthru mode?)".into())),
        }
    }

    /// Read lines until at least one sentence is complete, then extract and
    /// return it. An empty vector means the stream is exhausted.
    pub fn tokenize_stream<R: BufRead>(&mut self, reader: &mut R) -> Result<Vec<Token>> {
        self.passthru_bos = true;
        let mut raw = Vec::new();
        loop {
            raw.clear();
            let n = reader.read_until(b'\n', &mut raw)?;
            let done = n == 0;
            self.line_num += 1;
            if raw.last() == Some(&b'\n') {
                raw.pop();
            }
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }
            // stray zero bytes show up around newlines in UTF-16 input
            let utf16be = self.encoding == encoding_rs::UTF_16BE;
            if !utf16be && raw.first() == Some(&0) {
                raw.remove(0);
            }
            if utf16be && raw.last() == Some(&0) {
                raw.pop();
            }

            let mut input_line = String::new();
            if !raw.is_empty() {
                match self.decode(&raw) {
                    Some(line) => {
                        input_line = line;
                        if self.config.sentence_per_line_input {
                            input_line.push(' ');
                            input_line.push_str(&self.config.eos_marker);
                        }
                    }
                    None => {
                        warn!(
                            "line {}: invalid {} input, line skipped",
                            self.line_num, self.config.input_encoding
                        );
                        continue;
                    }
                }
            } else if self.config.sentence_per_line_input && !done {
                input_line.clone_from(&self.config.eos_marker);
            }

            let num_sentences = if done || input_line.is_empty() {
                self.signal_paragraph();
                self.count_sentences(true)
            } else {
                if self.config.passthru {
                    self.passthru_line(&input_line);
                } else {
                    self.tokenize_line(&input_line, None)?;
                }
                self.count_sentences(false)
            };
            if num_sentences > 0 {
                debug!("{num_sentences} sentence(s) in buffer, extracting");
                return self.extract_and_flush(num_sentences);
            }
            if done {
                return Ok(Vec::new());
            }
        }
    }

    /// Tokenize a complete in-memory text, draining every sentence.
    pub fn tokenize_text(&mut self, text: &str) -> Result<Vec<Token>> {
        let mut cursor = std::io::Cursor::new(text.as_bytes());
        let mut out = Vec::new();
        loop {
            let batch = self.tokenize_stream(&mut cursor)?;
            if batch.is_empty() {
                return Ok(out);
            }
            out.extend(batch);
        }
    }

    fn decode(&self, bytes: &[u8]) -> Option<String> {
        let (text, had_errors) = self.encoding.decode_without_bom_handling(bytes);
        if had_errors {
            None
        } else {
            Some(text.into_owned())
        }
    }
}

/// Render extracted tokens in text mode: tokens separated by single
/// spaces, sentences ended by the EOS marker (or a newline in
/// sentence-per-line mode), paragraphs separated by a blank line. Set
/// `continued` on every call after the first so paragraph separators work
/// across batches.
pub fn tokens_to_text(tokens: &[Token], config: &TokenizerConfig, continued: bool) -> String {
    let mut out = String::new();
    let mut quote_level = 0i32;
    let last = tokens.len().saturating_sub(1);
    for (i, token) in tokens.iter().enumerate() {
        if config.detect_paragraphs
            && token.role.contains(TokenRole::NEWPARAGRAPH)
            && (i > 0 || continued)
        {
            if config.sentence_per_line_output {
                out.push('\n');
            } else {
                out.push_str("\n\n");
            }
        }
        if config.lowercase {
            out.push_str(&token.text.to_lowercase());
        } else if config.uppercase {
            out.push_str(&token.text.to_uppercase());
        } else {
            out.push_str(&token.text);
        }
        if token.role.contains(TokenRole::NEWPARAGRAPH) {
            quote_level = 0;
        }
        if token.role.contains(TokenRole::BEGINQUOTE) {
            quote_level += 1;
        }
        if token.role.contains(TokenRole::ENDQUOTE) {
            quote_level -= 1;
        }
        if token.role.contains(TokenRole::ENDOFSENTENCE) && quote_level == 0 {
            if config.sentence_per_line_output {
                out.push('\n');
            } else {
                out.push(' ');
                out.push_str(&config.eos_marker);
            }
        }
        if i != last {
            let ended_line = token.role.contains(TokenRole::ENDOFSENTENCE)
                && config.sentence_per_line_output;
            if !ended_line || quote_level > 0 {
                out.push(' ');
            }
        }
    }
    out
}
