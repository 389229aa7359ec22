//! Language settings: ordered rules, quote table, EOS markers, and filter.
//!
//! A `Setting` is immutable after load and may be shared read-only across
//! tokenizer instances. Settings files follow the conventional
//! `tokconfig-<lang>` naming and are located through a search path; a
//! generic configuration ships embedded in the crate.

mod reader;

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::filter::CharFilter;
use crate::quoting::QuoteTable;
use crate::rule::Rule;

/// Embedded fallback configuration, loaded under the tag `generic`.
const EMBEDDED_GENERIC: &str = include_str!("../../configs/tokconfig-generic");

/// Immutable per-language bundle consumed by the engine.
#[derive(Debug, Clone)]
pub struct Setting {
    name: String,
    version: Option<String>,
    rules: Vec<Rule>,
    quotes: QuoteTable,
    eos_markers: String,
    filter: CharFilter,
}

impl Setting {
    /// Load the settings for `lang`, searching `config_dir` (when given),
    /// then `$UNITOK_DATA`, then the embedded configurations.
    pub fn load(lang: &str, config_dir: Option<&Path>) -> Result<Setting> {
        let file_name = format!("tokconfig-{lang}");
        for dir in search_dirs(config_dir) {
            let candidate = dir.join(&file_name);
            if candidate.is_file() {
                return Setting::from_file(&candidate);
            }
        }
        if lang == "generic" {
            return Setting::from_embedded(&file_name, EMBEDDED_GENERIC);
        }
        Err(Error::Config(format!(
            "no settings file found for language '{lang}' (looked for {file_name})"
        )))
    }

    /// Read and compile a settings file from disk. `%include` directives
    /// resolve relative to the file's directory, then `$UNITOK_DATA`.
    pub fn from_file(path: &Path) -> Result<Setting> {
        let text = std::fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        reader::SettingsReader::new(name, path.parent().map(Path::to_path_buf)).read(&text)
    }

    /// Compile a settings file from an in-memory string. `%include` is not
    /// available here.
    pub fn from_embedded(name: &str, text: &str) -> Result<Setting> {
        reader::SettingsReader::new(name.to_string(), None).read(text)
    }

    pub(crate) fn build(
        name: String,
        version: Option<String>,
        rules: Vec<Rule>,
        quotes: QuoteTable,
        eos_markers: String,
        filter: CharFilter,
    ) -> Setting {
        Setting {
            name,
            version,
            rules,
            quotes,
            eos_markers,
            filter,
        }
    }

    /// Identifier of the settings file this bundle was compiled from.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Rules in application order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn quotes(&self) -> &QuoteTable {
        &self.quotes
    }

    /// The end-of-sentence markers, treated as a set of code points.
    pub fn eos_markers(&self) -> &str {
        &self.eos_markers
    }

    pub fn is_eos_marker(&self, c: char) -> bool {
        self.eos_markers.contains(c)
    }

    pub fn filter(&self) -> &CharFilter {
        &self.filter
    }
}

fn search_dirs(config_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(dir) = config_dir {
        dirs.push(dir.to_path_buf());
    }
    if let Ok(data) = std::env::var("UNITOK_DATA") {
        if !data.is_empty() {
            dirs.push(PathBuf::from(data));
        }
    }
    dirs
}
