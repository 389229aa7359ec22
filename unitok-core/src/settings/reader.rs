//! Settings-file parser: bracketed sections, pattern accumulators,
//! meta-rule expansion, rule ordering, and `%include` resolution.

use std::collections::HashMap;
use std::path::PathBuf;

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::filter::CharFilter;
use crate::quoting::QuoteTable;
use crate::rule::Rule;
use crate::settings::Setting;
use crate::unicode;

/// The closed set of recognized section modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum ConfigMode {
    None,
    Rules,
    MetaRules,
    RuleOrder,
    Abbreviations,
    AttachedPrefixes,
    AttachedSuffixes,
    Prefixes,
    Suffixes,
    Tokens,
    Units,
    Ordinals,
    Currency,
    EosMarkers,
    Quotes,
    Filter,
}

impl ConfigMode {
    fn from_header(line: &str) -> ConfigMode {
        match line {
            "[RULES]" => ConfigMode::Rules,
            "[META-RULES]" => ConfigMode::MetaRules,
            "[RULE-ORDER]" => ConfigMode::RuleOrder,
            "[ABBREVIATIONS]" => ConfigMode::Abbreviations,
            "[ATTACHEDPREFIXES]" => ConfigMode::AttachedPrefixes,
            "[ATTACHEDSUFFIXES]" => ConfigMode::AttachedSuffixes,
            "[PREFIXES]" => ConfigMode::Prefixes,
            "[SUFFIXES]" => ConfigMode::Suffixes,
            "[TOKENS]" => ConfigMode::Tokens,
            "[UNITS]" => ConfigMode::Units,
            "[ORDINALS]" => ConfigMode::Ordinals,
            "[CURRENCY]" => ConfigMode::Currency,
            "[EOSMARKERS]" => ConfigMode::EosMarkers,
            "[QUOTES]" => ConfigMode::Quotes,
            "[FILTER]" => ConfigMode::Filter,
            _ => ConfigMode::None,
        }
    }

    /// Sections whose lines accumulate into a `|`-joined alternation,
    /// referenced by name from `[META-RULES]`.
    fn is_pattern_section(self) -> bool {
        matches!(
            self,
            ConfigMode::Abbreviations
                | ConfigMode::AttachedPrefixes
                | ConfigMode::AttachedSuffixes
                | ConfigMode::Prefixes
                | ConfigMode::Suffixes
                | ConfigMode::Tokens
                | ConfigMode::Units
                | ConfigMode::Ordinals
                | ConfigMode::Currency
        )
    }

    /// File extension used by `%include` within this section.
    fn include_extension(self) -> Option<&'static str> {
        match self {
            ConfigMode::Rules => Some(".rule"),
            ConfigMode::Filter => Some(".filter"),
            ConfigMode::Quotes => Some(".quote"),
            ConfigMode::EosMarkers => Some(".eos"),
            ConfigMode::Abbreviations => Some(".abr"),
            _ => None,
        }
    }
}

pub(crate) struct SettingsReader {
    name: String,
    base_dir: Option<PathBuf>,
    /// Raw `NAME=PATTERN` pairs in insertion order; later definitions of
    /// the same name replace the earlier pattern in place.
    raw_rules: Vec<(String, String)>,
    rule_order: Vec<String>,
    /// Raw meta-rule lines, expanded after the whole file is read.
    meta_rules: Vec<String>,
    patterns: HashMap<ConfigMode, String>,
    eos_markers: String,
    quotes: QuoteTable,
    filter: CharFilter,
    version: Option<String>,
}

impl SettingsReader {
    pub(crate) fn new(name: String, base_dir: Option<PathBuf>) -> Self {
        SettingsReader {
            name,
            base_dir,
            raw_rules: Vec::new(),
            rule_order: Vec::new(),
            meta_rules: Vec::new(),
            patterns: HashMap::new(),
            eos_markers: String::new(),
            quotes: QuoteTable::new(),
            filter: CharFilter::new(),
            version: None,
        }
    }

    pub(crate) fn read(mut self, text: &str) -> Result<Setting> {
        self.read_sections(text)?;
        self.finish()
    }

    fn read_sections(&mut self, text: &str) -> Result<()> {
        let mut mode = ConfigMode::None;
        for raw_line in text.lines() {
            let line = raw_line.trim();
            if let Some(rest) = line.strip_prefix("%include") {
                self.read_include(mode, rest.trim())?;
                continue;
            }
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.starts_with('[') {
                mode = ConfigMode::from_header(line);
                continue;
            }
            // a leading "\[" escapes a literal bracket at line start
            let line = if line.starts_with("\\[") { &line[1..] } else { line };
            self.read_entry(mode, line, raw_line)?;
        }
        Ok(())
    }

    fn read_entry(&mut self, mode: ConfigMode, line: &str, raw_line: &str) -> Result<()> {
        match mode {
            ConfigMode::Rules => self.add_raw_rule(line),
            ConfigMode::RuleOrder => self.add_rule_order(line),
            ConfigMode::MetaRules => {
                self.meta_rules.push(line.to_string());
                Ok(())
            }
            m if m.is_pattern_section() => {
                let pattern = self.patterns.entry(m).or_default();
                if !pattern.is_empty() {
                    pattern.push('|');
                }
                pattern.push_str(line);
                Ok(())
            }
            ConfigMode::EosMarkers => self.add_eos_marker(line),
            ConfigMode::Quotes => self.add_quote_pair(line),
            ConfigMode::Filter => self.filter.add_entry(line),
            ConfigMode::None => {
                if let Some((key, value)) = raw_line.split_once('=') {
                    if key.trim() == "version" {
                        self.version = Some(value.trim().to_string());
                    }
                }
                Ok(())
            }
            _ => Err(Error::Logic("unhandled configuration mode".to_string())),
        }
    }

    fn add_raw_rule(&mut self, line: &str) -> Result<()> {
        let (id, pattern) = line
            .split_once('=')
            .ok_or_else(|| Error::Config(format!("invalid RULES entry: {line}")))?;
        self.insert_rule(id.to_string(), pattern.to_string());
        Ok(())
    }

    fn insert_rule(&mut self, id: String, pattern: String) {
        if let Some(existing) = self.raw_rules.iter_mut().find(|(name, _)| *name == id) {
            existing.1 = pattern;
        } else {
            self.raw_rules.push((id, pattern));
        }
    }

    fn add_rule_order(&mut self, line: &str) -> Result<()> {
        for id in line.split_whitespace() {
            if self.rule_order.iter().any(|o| o == id) {
                return Err(Error::Config(format!("multiple entry {id} in RULE-ORDER")));
            }
            self.rule_order.push(id.to_string());
        }
        Ok(())
    }

    fn add_eos_marker(&mut self, line: &str) -> Result<()> {
        let valid = (line.starts_with("\\u") && line.len() == 6)
            || (line.starts_with("\\U") && line.len() == 10);
        if !valid {
            warn!("{}: ignoring EOSMARKERS entry: {line}", self.name);
            return Ok(());
        }
        let marker = unicode::unescape(line)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| Error::Config(format!("invalid EOSMARKERS entry: {line}")))?;
        self.eos_markers.push_str(&marker);
        Ok(())
    }

    fn add_quote_pair(&mut self, line: &str) -> Result<()> {
        let (open, close) = line
            .split_once(|c: char| c == ' ' || c == '\t')
            .ok_or_else(|| {
                Error::Config(format!("invalid QUOTES entry: {line} (missing whitespace)"))
            })?;
        let open = unicode::unescape(open.trim())
            .ok_or_else(|| Error::Config(format!("invalid QUOTES entry: {line}")))?;
        let close = unicode::unescape(close.trim())
            .ok_or_else(|| Error::Config(format!("invalid QUOTES entry: {line}")))?;
        if open.is_empty() || close.is_empty() {
            return Err(Error::Config(format!("invalid QUOTES entry: {line}")));
        }
        self.quotes.add(open, close);
        Ok(())
    }

    fn read_include(&mut self, mode: ConfigMode, name: &str) -> Result<()> {
        let extension = mode.include_extension().ok_or_else(|| {
            Error::Config(format!("%include {name}: not supported in this section"))
        })?;
        let path = self.resolve_include(&format!("{name}{extension}"))?;
        debug!("{}: %include {}", self.name, path.display());
        let text = std::fs::read_to_string(&path)?;
        for raw_line in text.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            self.read_entry(mode, line, raw_line)?;
        }
        Ok(())
    }

    fn resolve_include(&self, file: &str) -> Result<PathBuf> {
        if let Some(dir) = &self.base_dir {
            let candidate = dir.join(file);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
        if let Ok(data) = std::env::var("UNITOK_DATA") {
            let candidate = PathBuf::from(data).join(file);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
        Err(Error::Config(format!("'%include {file}' failed: file not found")))
    }

    fn finish(mut self) -> Result<Setting> {
        // reasonable defaults for anything the file left unset
        if self.eos_markers.is_empty() {
            self.eos_markers.push_str(".!?");
        }
        if self.quotes.is_empty() {
            self.quotes.add("\"", "\"");
            self.quotes.add("‘", "’");
            self.quotes.add("“„‟", "”");
        }

        self.expand_meta_rules()?;
        let rules = self.sort_rules()?;

        Ok(Setting::build(
            self.name,
            self.version,
            rules,
            self.quotes,
            self.eos_markers,
            self.filter,
        ))
    }

    /// Expand `[META-RULES]` lines into plain rules. Each part between
    /// splitters is either the name of a pattern section (substituted with
    /// the accumulated alternation) or a literal pattern fragment. A
    /// `SPLITTER` entry changes the separator for subsequent lines.
    fn expand_meta_rules(&mut self) -> Result<()> {
        let mut splitter = "%".to_string();
        let meta_rules = std::mem::take(&mut self.meta_rules);
        for meta in &meta_rules {
            let (name, body) = meta
                .split_once('=')
                .ok_or_else(|| Error::Config(format!("invalid entry in META-RULES: {meta}")))?;
            let name = name.trim();
            if name == "SPLITTER" {
                let mut value = body.to_string();
                if value.is_empty() {
                    return Err(Error::Config(format!(
                        "invalid SPLITTER value in META-RULES: {meta}"
                    )));
                }
                if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
                    value = value[1..value.len() - 1].to_string();
                }
                splitter = value;
                continue;
            }
            let mut pattern = String::new();
            let mut skip_rule = false;
            for part in body.split(splitter.as_str()) {
                let part = part.trim();
                let mode = ConfigMode::from_header(&format!("[{part}]"));
                if mode.is_pattern_section() {
                    match self.patterns.get(&mode) {
                        Some(section) if !section.is_empty() => pattern.push_str(section),
                        _ => {
                            skip_rule = true;
                            break;
                        }
                    }
                } else {
                    pattern.push_str(part);
                }
            }
            if skip_rule {
                warn!("{}: skipping META rule '{name}' (empty section)", self.name);
            } else {
                self.insert_rule(name.trim().to_string(), pattern);
            }
        }
        Ok(())
    }

    /// Compile rules in application order: `[RULE-ORDER]` names first,
    /// then rules without an order entry in configuration-file order.
    fn sort_rules(&mut self) -> Result<Vec<Rule>> {
        let mut raw = std::mem::take(&mut self.raw_rules);
        let mut rules = Vec::with_capacity(raw.len());
        for id in &self.rule_order {
            if let Some(pos) = raw.iter().position(|(name, _)| name == id) {
                let (id, pattern) = raw.remove(pos);
                rules.push(Rule::new(id, &pattern)?);
            } else {
                warn!("{}: RULE-ORDER specified for undefined RULE '{id}'", self.name);
            }
        }
        for (id, pattern) in raw {
            debug!("{}: no RULE-ORDER for RULE '{id}' (put at end)", self.name);
            rules.push(Rule::new(id, &pattern)?);
        }
        Ok(rules)
    }
}
