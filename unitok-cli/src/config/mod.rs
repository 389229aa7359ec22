//! Optional TOML configuration file with CLI defaults

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Defaults applied when the matching flag is absent
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    /// Language whose settings drive tokenization
    pub language: String,

    /// Output format name (text, verbose, json)
    pub format: String,

    /// Input encoding label
    pub encoding: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            language: "generic".to_string(),
            format: "text".to_string(),
            encoding: "UTF-8".to_string(),
        }
    }
}

impl CliConfig {
    /// Load a configuration file.
    pub fn load(path: &Path) -> anyhow::Result<CliConfig> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("cannot parse {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.defaults.language, "generic");
        assert_eq!(config.defaults.format, "text");
    }

    #[test]
    fn test_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[defaults]\nlanguage = \"toy\"\nformat = \"json\"\nencoding = \"UTF-8\"").unwrap();
        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config.defaults.language, "toy");
        assert_eq!(config.defaults.format, "json");
    }
}
