//! Output formatting for tokenized text

mod json;
mod text;

use std::io::Write;

use unitok_core::{Token, TokenizerConfig};

use crate::CliResult;

pub use json::JsonFormatter;
pub use text::{TextFormatter, VerboseFormatter};

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text: tokens separated by spaces, sentences by the EOS
    /// marker or newlines
    Text,
    /// One token per line with class and role columns
    Verbose,
    /// JSON array of tokens with metadata
    Json,
}

/// Consumes batches of extracted tokens and renders them.
pub trait OutputFormatter {
    /// Render one batch (one or more complete sentences).
    fn format_tokens(&mut self, tokens: &[Token]) -> CliResult<()>;

    /// Make everything written so far visible (interactive use).
    fn flush(&mut self) -> CliResult<()> {
        Ok(())
    }

    /// Write any trailing output and flush.
    fn finish(&mut self) -> CliResult<()>;
}

/// Build the formatter for the requested format.
pub fn create_formatter(
    format: OutputFormat,
    writer: Box<dyn Write>,
    config: TokenizerConfig,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer, config)),
        OutputFormat::Verbose => Box::new(VerboseFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
    }
}
