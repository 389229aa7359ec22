//! Validate command: load a settings file and report its contents

use std::path::PathBuf;

use anyhow::bail;
use clap::Args;
use unitok_core::Setting;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Settings file to check
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Locate the settings of this language through the search path
    /// instead of naming a file
    #[arg(short, long, conflicts_with = "file")]
    pub language: Option<String>,

    /// Extra directory searched for tokconfig files
    #[arg(short = 'c', long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

impl ValidateArgs {
    pub fn execute(&self) -> anyhow::Result<()> {
        let setting = match (&self.file, &self.language) {
            (Some(path), _) => Setting::from_file(path)?,
            (None, Some(lang)) => Setting::load(lang, self.config_dir.as_deref())?,
            (None, None) => bail!("give a settings FILE or --language"),
        };
        println!("settings:    {}", setting.name());
        if let Some(version) = setting.version() {
            println!("version:     {version}");
        }
        println!("rules:       {}", setting.rules().len());
        println!("quote pairs: {}", setting.quotes().len());
        println!("eos markers: {}", setting.eos_markers().chars().count());
        println!("filter:      {} entries", setting.filter().len());
        Ok(())
    }
}
