//! unitok CLI library
//!
//! Command-line frontend for the unitok tokenizer: argument parsing,
//! input resolution with BOM sniffing, and output formatting.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;

pub use error::{CliError, CliResult};
