//! Settings loading from disk: search path, includes, and rule wiring.

use std::fs;

use tempfile::TempDir;
use unitok_core::{Error, Setting, Tokenizer, TokenizerConfig};

fn write_config(dir: &TempDir, lang: &str, text: &str) {
    fs::write(dir.path().join(format!("tokconfig-{lang}")), text).unwrap();
}

#[test]
fn test_load_from_config_dir() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        "toy",
        "[RULES]\n\
         WORD=[\\p{L}]+\n\
         PUNCTUATION=[\\p{P}]\n\
         [RULE-ORDER]\n\
         WORD PUNCTUATION\n",
    );
    let setting = Setting::load("toy", Some(dir.path())).unwrap();
    assert_eq!(setting.name(), "tokconfig-toy");
    assert_eq!(setting.rules().len(), 2);
}

#[test]
fn test_include_resolves_next_to_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("extra.abr"), "foo\nbar\n").unwrap();
    write_config(
        &dir,
        "inc",
        "[ABBREVIATIONS]\n\
         %include extra\n\
         baz\n\
         [META-RULES]\n\
         ABBREVIATION-KNOWN=^((?:%ABBREVIATIONS%)\\.)$\n",
    );
    let setting = Setting::load("inc", Some(dir.path())).unwrap();
    let rule = setting
        .rules()
        .iter()
        .find(|r| r.id() == "ABBREVIATION-KNOWN")
        .unwrap();
    assert_eq!(rule.pattern(), "^((?:foo|bar|baz)\\.)$");
    assert!(rule.match_all("bar.").is_some());
    assert!(rule.match_all("quux.").is_none());
}

#[test]
fn test_missing_include_is_fatal() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "broken", "[ABBREVIATIONS]\n%include nowhere\n");
    let err = Setting::load("broken", Some(dir.path())).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_invalid_rule_regex_is_fatal() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "badre", "[RULES]\nBROKEN=(ab\n");
    let err = Setting::load("badre", Some(dir.path())).unwrap_err();
    match err {
        Error::Rule { id, .. } => assert_eq!(id, "BROKEN"),
        other => panic!("expected rule error, got {other}"),
    }
}

#[test]
fn test_tokenizer_uses_custom_config_dir() {
    let dir = TempDir::new().unwrap();
    // a deliberately odd rule set: digits become DIGITS tokens
    write_config(
        &dir,
        "toy",
        "[RULES]\n\
         DIGITS=[0-9]+\n\
         WORD=[\\p{L}]+\n\
         PUNCTUATION=[\\p{P}]\n\
         [RULE-ORDER]\n\
         DIGITS WORD PUNCTUATION\n",
    );
    let config = TokenizerConfig::builder()
        .language("toy")
        .config_dir(dir.path())
        .build()
        .unwrap();
    let mut tok = Tokenizer::new(config).unwrap();
    let tokens = tok.tokenize_text("abc 123").unwrap();
    assert_eq!(tokens[1].class.as_str(), "DIGITS");
    assert_eq!(tokens[1].lang.as_deref(), Some("toy"));
}

#[test]
fn test_custom_quotes_and_eos_markers() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        "quoty",
        "[RULES]\n\
         WORD=[\\p{L}]+\n\
         PUNCTUATION=[\\p{P}]\n\
         [EOSMARKERS]\n\
         \\u00A1\n\
         [QUOTES]\n\
         <<\t>>\n",
    );
    let setting = Setting::load("quoty", Some(dir.path())).unwrap();
    assert!(setting.is_eos_marker('\u{00A1}'));
    // configured markers replace the defaults
    assert!(!setting.is_eos_marker('!'));
    assert_eq!(setting.quotes().open_to_close('<'), Some(">>"));
}

#[test]
fn test_settings_shared_across_tokenizers() {
    let setting = std::sync::Arc::new(Setting::load("generic", None).unwrap());
    let clone = setting.clone();
    let handle = std::thread::spawn(move || clone.rules().len());
    assert_eq!(handle.join().unwrap(), setting.rules().len());
}
