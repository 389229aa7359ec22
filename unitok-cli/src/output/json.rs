//! JSON output formatter: the structured consumer interface.

use std::io::Write;

use serde::Serialize;
use unitok_core::{Token, TokenRole};

use super::OutputFormatter;
use crate::CliResult;

#[derive(Debug, Serialize)]
struct TokenRecord {
    text: String,
    class: String,
    roles: Vec<String>,
    /// false when no space precedes the next token
    space: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    lang: Option<String>,
}

impl From<&Token> for TokenRecord {
    fn from(token: &Token) -> Self {
        TokenRecord {
            text: token.text.clone(),
            class: token.class.as_str().to_string(),
            roles: token
                .role
                .iter_names()
                .map(|(name, _)| name.to_string())
                .collect(),
            space: !token.role.contains(TokenRole::NOSPACE),
            lang: token.lang.clone(),
        }
    }
}

/// Collects every token and writes one JSON array at the end.
pub struct JsonFormatter<W: Write> {
    writer: W,
    records: Vec<TokenRecord>,
}

impl<W: Write> JsonFormatter<W> {
    pub fn new(writer: W) -> Self {
        JsonFormatter {
            writer,
            records: Vec::new(),
        }
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn format_tokens(&mut self, tokens: &[Token]) -> CliResult<()> {
        self.records.extend(tokens.iter().map(TokenRecord::from));
        Ok(())
    }

    fn finish(&mut self) -> CliResult<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.records)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
