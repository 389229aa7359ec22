//! Command-line interface definition

pub mod process;
pub mod validate;

use clap::{Parser, Subcommand};

/// Unicode-aware tokenizer and sentence splitter
#[derive(Debug, Parser)]
#[command(name = "unitok", version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Tokenize text files or standard input
    Process(process::ProcessArgs),
    /// Check a settings file and report what it defines
    Validate(validate::ValidateArgs),
}

impl Cli {
    pub fn run(&self) -> anyhow::Result<()> {
        match &self.command {
            Commands::Process(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
        }
    }
}
