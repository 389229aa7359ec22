//! Plain text and verbose output formatters

use std::io::Write;

use unitok_core::{tokens_to_text, Token, TokenRole, TokenizerConfig};

use super::OutputFormatter;
use crate::CliResult;

/// Running-text formatter: space-separated tokens, the EOS marker (or a
/// newline) after each sentence, a blank line between paragraphs.
pub struct TextFormatter<W: Write> {
    writer: W,
    config: TokenizerConfig,
    continued: bool,
}

impl<W: Write> TextFormatter<W> {
    pub fn new(writer: W, config: TokenizerConfig) -> Self {
        TextFormatter {
            writer,
            config,
            continued: false,
        }
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn format_tokens(&mut self, tokens: &[Token]) -> CliResult<()> {
        if self.continued && !self.config.sentence_per_line_output {
            self.writer.write_all(b" ")?;
        }
        let rendered = tokens_to_text(tokens, &self.config, self.continued);
        self.writer.write_all(rendered.as_bytes())?;
        self.continued = true;
        Ok(())
    }

    fn flush(&mut self) -> CliResult<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> CliResult<()> {
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// One token per line: `text<TAB>class<TAB>roles`, a blank line after each
/// sentence.
pub struct VerboseFormatter<W: Write> {
    writer: W,
}

impl<W: Write> VerboseFormatter<W> {
    pub fn new(writer: W) -> Self {
        VerboseFormatter { writer }
    }
}

impl<W: Write> OutputFormatter for VerboseFormatter<W> {
    fn format_tokens(&mut self, tokens: &[Token]) -> CliResult<()> {
        for token in tokens {
            writeln!(self.writer, "{}\t{}\t{}", token.text, token.class, token.role)?;
            if token.role.contains(TokenRole::ENDOFSENTENCE)
                && !token.role.contains(TokenRole::NOSPACE)
            {
                writeln!(self.writer)?;
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> CliResult<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> CliResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}
