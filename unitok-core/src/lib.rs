//! unitok-core
//!
//! A configurable, Unicode-aware tokenizer and sentence splitter. Input
//! text is scanned into typed tokens grouped into sentences and
//! paragraphs, driven by per-language settings files of ordered regex
//! rules, quote pairings, and end-of-sentence markers.
//!
//! ```no_run
//! use unitok_core::{Tokenizer, TokenizerConfig};
//!
//! let mut tokenizer = Tokenizer::new(TokenizerConfig::default())?;
//! let tokens = tokenizer.tokenize_text("Hello, world.")?;
//! for token in &tokens {
//!     println!("{}\t{}", token.text, token.class);
//! }
//! # Ok::<(), unitok_core::Error>(())
//! ```

pub mod error;
pub mod filter;
pub mod normalizer;
pub mod quoting;
pub mod rule;
pub mod settings;
pub mod token;
pub mod tokenizer;
pub mod unicode;

pub use error::{Error, Result};
pub use settings::Setting;
pub use token::{Token, TokenClass, TokenRole};
pub use tokenizer::{
    tokens_to_text, Tokenizer, TokenizerConfig, TokenizerConfigBuilder, DEFAULT_EOS_MARKER,
    MAX_WORD_LENGTH,
};
