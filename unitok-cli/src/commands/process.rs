//! Process command: the main tokenization path

use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Args;
use unitok_core::{Tokenizer, TokenizerConfig};

use crate::config::CliConfig;
use crate::input;
use crate::output::{self, OutputFormat, OutputFormatter};

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Input files or glob patterns (stdin when absent)
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Language whose settings drive tokenization
    #[arg(short, long)]
    pub language: Option<String>,

    /// Extra directory searched for tokconfig files
    #[arg(short = 'c', long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// TOML file supplying defaults for language/format/encoding
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Input encoding label (overridden by a detected BOM)
    #[arg(short, long)]
    pub encoding: Option<String>,

    /// Skip the rule engine: whitespace splitting only
    #[arg(long)]
    pub passthru: bool,

    /// Disable sentence-boundary detection
    #[arg(long)]
    pub no_bounds: bool,

    /// Pair quotes and resolve sentence bounds inside them
    #[arg(short = 'Q', long)]
    pub detect_quotes: bool,

    /// Write one sentence per line
    #[arg(short = 'n', long)]
    pub sentence_per_line_output: bool,

    /// Treat every input line as exactly one sentence
    #[arg(short = 'm', long)]
    pub sentence_per_line_input: bool,

    /// Drop punctuation tokens from the output
    #[arg(long)]
    pub filter_punct: bool,

    /// Disable the character-substitution filter
    #[arg(long)]
    pub no_filter: bool,

    /// Lowercase the output text
    #[arg(long, conflicts_with = "uppercase")]
    pub lowercase: bool,

    /// Uppercase the output text
    #[arg(long)]
    pub uppercase: bool,

    /// Comma-separated token classes to mask as {{TYPE}}
    #[arg(short = 'N', long, value_name = "TYPES")]
    pub normalize: Option<String>,

    /// Suppress logging entirely
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        let file_config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        let format = match self.format {
            Some(format) => format,
            None => parse_format(&file_config.defaults.format)?,
        };
        let interactive = self.input.is_empty() && io::stdin().is_terminal();
        let config = self.build_tokenizer_config(&file_config, interactive)?;

        let writer: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(BufWriter::new(
                File::create(path)
                    .with_context(|| format!("cannot create {}", path.display()))?,
            )),
            None => Box::new(io::stdout().lock()),
        };
        let mut formatter = output::create_formatter(format, writer, config.clone());
        let mut tokenizer = Tokenizer::new(config)?;

        if interactive {
            self.run_repl(&mut tokenizer, formatter.as_mut())?;
        } else if self.input.is_empty() {
            log::info!("processing standard input");
            let mut reader = io::stdin().lock();
            drain(&mut tokenizer, &mut reader, formatter.as_mut())?;
        } else {
            let files = input::resolve_patterns(&self.input)?;
            for path in &files {
                log::info!("processing {}", path.display());
                let mut file = input::open(path)?;
                if let Some(encoding) = file.bom_encoding {
                    tokenizer.set_input_encoding(encoding.name())?;
                }
                drain(&mut tokenizer, &mut file.reader, formatter.as_mut())?;
            }
        }
        formatter.finish()?;
        Ok(())
    }

    fn build_tokenizer_config(
        &self,
        file_config: &CliConfig,
        interactive: bool,
    ) -> Result<TokenizerConfig> {
        let language = self
            .language
            .clone()
            .unwrap_or_else(|| file_config.defaults.language.clone());
        let encoding = self
            .encoding
            .clone()
            .unwrap_or_else(|| file_config.defaults.encoding.clone());
        let mut builder = TokenizerConfig::builder()
            .language(language)
            .input_encoding(encoding)
            .detect_bounds(!self.no_bounds)
            .detect_quotes(self.detect_quotes)
            .sentence_per_line_input(self.sentence_per_line_input || interactive)
            .sentence_per_line_output(self.sentence_per_line_output || interactive)
            .punct_filter(self.filter_punct)
            .filter(!self.no_filter)
            .lowercase(self.lowercase)
            .uppercase(self.uppercase)
            .passthru(self.passthru);
        if let Some(dir) = &self.config_dir {
            builder = builder.config_dir(dir);
        }
        if let Some(classes) = &self.normalize {
            builder = builder.normalize(classes);
        }
        Ok(builder.build()?)
    }

    /// Interactive loop when standard input is a terminal.
    fn run_repl(
        &self,
        tokenizer: &mut Tokenizer,
        formatter: &mut dyn OutputFormatter,
    ) -> Result<()> {
        let mut editor = rustyline::DefaultEditor::new()?;
        loop {
            match editor.readline("unitok> ") {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let _ = editor.add_history_entry(&line);
                    let mut cursor = io::Cursor::new(line.into_bytes());
                    drain(tokenizer, &mut cursor, formatter)?;
                    formatter.flush()?;
                }
                Err(rustyline::error::ReadlineError::Interrupted)
                | Err(rustyline::error::ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        if self.quiet {
            return;
        }
        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(level),
        )
        .try_init();
    }
}

fn parse_format(name: &str) -> Result<OutputFormat> {
    <OutputFormat as clap::ValueEnum>::from_str(name, true)
        .map_err(|_| anyhow!("unknown output format '{name}'"))
}

/// Pump every completed sentence batch from `reader` into the formatter.
fn drain<R: io::BufRead>(
    tokenizer: &mut Tokenizer,
    reader: &mut R,
    formatter: &mut dyn OutputFormatter,
) -> Result<()> {
    loop {
        let batch = tokenizer.tokenize_stream(reader)?;
        if batch.is_empty() {
            return Ok(());
        }
        formatter.format_tokens(&batch)?;
    }
}
