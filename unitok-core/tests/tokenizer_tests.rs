//! End-to-end tests for the rule-driven tokenizer over the embedded
//! generic settings.

use unitok_core::{Token, TokenRole, Tokenizer, TokenizerConfig};

fn tokenizer() -> Tokenizer {
    Tokenizer::new(TokenizerConfig::default()).unwrap()
}

fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

fn classes(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.class.as_str()).collect()
}

#[test]
fn test_simple_sentence() {
    let mut tok = tokenizer();
    let tokens = tok.tokenize_text("Hello, world.").unwrap();
    assert_eq!(texts(&tokens), vec!["Hello", ",", "world", "."]);
    assert_eq!(
        classes(&tokens),
        vec!["WORD", "PUNCTUATION", "WORD", "PUNCTUATION"]
    );
    // no space between a word and its trailing comma
    assert!(tokens[0].role.contains(TokenRole::NOSPACE));
    assert!(tokens[0].role.contains(TokenRole::BEGINOFSENTENCE));
    assert!(tokens[0].role.contains(TokenRole::NEWPARAGRAPH));
    assert!(!tokens[1].role.contains(TokenRole::ENDOFSENTENCE));
    assert!(tokens[2].role.contains(TokenRole::NOSPACE));
    assert!(tokens[3].role.contains(TokenRole::ENDOFSENTENCE));
}

#[test]
fn test_two_sentences_split() {
    let mut tok = tokenizer();
    let tokens = tok.tokenize_text("It works. It really does.").unwrap();
    let ends: Vec<_> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| t.role.contains(TokenRole::ENDOFSENTENCE))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(texts(&tokens), vec!["It", "works", ".", "It", "really", "does", "."]);
    assert_eq!(ends, vec![2, 6]);
    assert!(tokens[3].role.contains(TokenRole::BEGINOFSENTENCE));
}

#[test]
fn test_known_abbreviation_does_not_end_sentence() {
    let mut tok = tokenizer();
    let tokens = tok.tokenize_text("etc. Next").unwrap();
    assert_eq!(texts(&tokens), vec!["etc.", "Next"]);
    assert_eq!(classes(&tokens), vec!["ABBREVIATION-KNOWN", "WORD"]);
    assert!(!tokens[0].role.contains(TokenRole::ENDOFSENTENCE));
}

#[test]
fn test_title_abbreviation_mid_sentence() {
    let mut tok = tokenizer();
    let tokens = tok.tokenize_text("Mr. Smith went home.").unwrap();
    assert_eq!(texts(&tokens), vec!["Mr.", "Smith", "went", "home", "."]);
    assert_eq!(classes(&tokens)[0], "ABBREVIATION-KNOWN");
    // one sentence: only the final period ends it
    let eos_count = tokens
        .iter()
        .filter(|t| t.role.contains(TokenRole::ENDOFSENTENCE))
        .count();
    assert_eq!(eos_count, 1);
}

#[test]
fn test_uppercase_abbreviation() {
    let mut tok = tokenizer();
    let tokens = tok.tokenize_text("U.S.A. rules").unwrap();
    assert_eq!(texts(&tokens), vec!["U.S.A.", "rules"]);
    assert_eq!(classes(&tokens)[0], "ABBREVIATION");
}

#[test]
fn test_explicit_eos_marker_inside_word() {
    let mut tok = tokenizer();
    let mut cursor = std::io::Cursor::new(&b"A<utt>B"[..]);
    let first = tok.tokenize_stream(&mut cursor).unwrap();
    // the token before the marker ends the first sentence
    assert_eq!(texts(&first), vec!["A"]);
    assert!(first[0].role.contains(TokenRole::ENDOFSENTENCE));
    let second = tok.tokenize_stream(&mut cursor).unwrap();
    assert_eq!(texts(&second), vec!["B"]);
    assert!(second[0].role.contains(TokenRole::BEGINOFSENTENCE));
}

#[test]
fn test_explicit_eos_marker_between_words() {
    let mut tok = tokenizer();
    let tokens = tok.tokenize_text("one <utt> two").unwrap();
    assert_eq!(texts(&tokens), vec!["one", "two"]);
    assert!(tokens[0].role.contains(TokenRole::ENDOFSENTENCE));
}

#[test]
fn test_blank_line_starts_new_paragraph() {
    let mut tok = tokenizer();
    let tokens = tok.tokenize_text("hello\n\nworld").unwrap();
    assert_eq!(texts(&tokens), vec!["hello", "world"]);
    assert!(tokens[0].role.contains(TokenRole::NEWPARAGRAPH));
    assert!(tokens[1].role.contains(TokenRole::NEWPARAGRAPH));
    assert!(tokens[1].role.contains(TokenRole::BEGINOFSENTENCE));
}

#[test]
fn test_single_blank_line_single_paragraph_mark() {
    let mut tok = tokenizer();
    let tokens = tok.tokenize_text("one.\n\ntwo. three.").unwrap();
    let marks = tokens
        .iter()
        .filter(|t| t.role.contains(TokenRole::NEWPARAGRAPH))
        .count();
    // one mark for the leading paragraph, exactly one for the blank line
    assert_eq!(marks, 2);
}

#[test]
fn test_currency_and_number() {
    let mut tok = tokenizer();
    let tokens = tok.tokenize_text("$5.00").unwrap();
    assert_eq!(texts(&tokens), vec!["$", "5.00"]);
    assert_eq!(classes(&tokens), vec!["CURRENCY", "NUMBER"]);
    assert!(tokens[0].role.contains(TokenRole::NOSPACE));
}

#[test]
fn test_url_is_one_token() {
    let mut tok = tokenizer();
    let tokens = tok.tokenize_text("see https://example.com/a?b=c now").unwrap();
    assert_eq!(texts(&tokens)[1], "https://example.com/a?b=c");
    assert_eq!(classes(&tokens)[1], "URL");
}

#[test]
fn test_smiley_survives() {
    let mut tok = tokenizer();
    let tokens = tok.tokenize_text("nice :)").unwrap();
    assert_eq!(texts(&tokens), vec!["nice", ":)"]);
    assert_eq!(classes(&tokens)[1], "SMILEY");
}

#[test]
fn test_punctuation_filter_drops_punctuation() {
    let config = TokenizerConfig::builder().punct_filter(true).build().unwrap();
    let mut tok = Tokenizer::new(config).unwrap();
    let tokens = tok.tokenize_text("Hello, world. $5").unwrap();
    assert_eq!(texts(&tokens), vec!["Hello", "world", "5"]);
    // the skipped comma releases the spacing of its predecessor
    assert!(!tokens[0].role.contains(TokenRole::NOSPACE));
    assert!(tokens.iter().all(|t| !t.class.is_filterable()));
}

#[test]
fn test_normalization_set_substitutes_placeholder() {
    let config = TokenizerConfig::builder().normalize("NUMBER").build().unwrap();
    let mut tok = Tokenizer::new(config).unwrap();
    let tokens = tok.tokenize_text("pay 42 now").unwrap();
    assert_eq!(texts(&tokens), vec!["pay", "{{NUMBER}}", "now"]);
    assert_eq!(classes(&tokens)[1], "NUMBER");
}

#[test]
fn test_empty_input() {
    let mut tok = tokenizer();
    let tokens = tok.tokenize_text("").unwrap();
    assert!(tokens.is_empty());
}

#[test]
fn test_lone_eos_marker_produces_nothing() {
    let mut tok = tokenizer();
    let tokens = tok.tokenize_text("<utt>").unwrap();
    assert!(tokens.is_empty());
}

#[test]
fn test_lone_eos_marker_clears_paragraph_signal() {
    let mut tok = tokenizer();
    let mut cursor = std::io::Cursor::new(&b"<utt>\nnext"[..]);
    let mut tokens = Vec::new();
    loop {
        let batch = tok.tokenize_stream(&mut cursor).unwrap();
        if batch.is_empty() {
            break;
        }
        tokens.extend(batch);
    }
    assert_eq!(texts(&tokens), vec!["next"]);
    assert!(!tokens[0].role.contains(TokenRole::NEWPARAGRAPH));
}

#[test]
fn test_overlong_word_drops_line() {
    let mut tok = tokenizer();
    let line = "a".repeat(3000);
    let tokens = tok.tokenize_text(&line).unwrap();
    assert!(tokens.is_empty());
}

#[test]
fn test_overlong_word_does_not_stop_stream() {
    let mut tok = tokenizer();
    let text = format!("{}\nstill here.", "a".repeat(3000));
    let tokens = tok.tokenize_text(&text).unwrap();
    assert_eq!(texts(&tokens), vec!["still", "here", "."]);
}

#[test]
fn test_sentence_per_line_input() {
    let config = TokenizerConfig::builder()
        .sentence_per_line_input(true)
        .build()
        .unwrap();
    let mut tok = Tokenizer::new(config).unwrap();
    let tokens = tok.tokenize_text("one two\nthree four\n").unwrap();
    assert_eq!(texts(&tokens), vec!["one", "two", "three", "four"]);
    assert!(tokens[1].role.contains(TokenRole::ENDOFSENTENCE));
    assert!(tokens[2].role.contains(TokenRole::BEGINOFSENTENCE));
    assert!(tokens[3].role.contains(TokenRole::ENDOFSENTENCE));
}

#[test]
fn test_no_temp_eos_leaks_to_output() {
    let config = TokenizerConfig::builder().detect_quotes(true).build().unwrap();
    let mut tok = Tokenizer::new(config).unwrap();
    let tokens = tok
        .tokenize_text("He said, \"Wait. No. Stop.\" and left. \"Unclosed. Quote")
        .unwrap();
    assert!(tokens
        .iter()
        .all(|t| !t.role.contains(TokenRole::TEMPENDOFSENTENCE)));
}

#[test]
fn test_first_token_of_output_begins_sentence() {
    let mut tok = tokenizer();
    for text in ["plain words here.", "no terminator at all", "42"] {
        let tokens = tok.tokenize_text(text).unwrap();
        assert!(
            tokens[0].role.contains(TokenRole::BEGINOFSENTENCE),
            "first token of {text:?} lacks BEGINOFSENTENCE"
        );
        assert!(
            tokens.last().unwrap().role.contains(TokenRole::ENDOFSENTENCE),
            "last token of {text:?} lacks ENDOFSENTENCE"
        );
        tok.reset();
    }
}

#[test]
fn test_language_tag_is_stamped() {
    let mut tok = tokenizer();
    let tokens = tok.tokenize_text("hello").unwrap();
    assert_eq!(tokens[0].lang.as_deref(), Some("generic"));
}

#[test]
fn test_range_error_on_missing_sentence() {
    let mut tok = tokenizer();
    tok.tokenize_line("no terminator", None).unwrap();
    let err = tok.sentence(3).unwrap_err();
    assert!(matches!(err, unitok_core::Error::Range(_)));
}

#[test]
fn test_buffer_flush_rebases() {
    let mut tok = tokenizer();
    tok.tokenize_line("First one. Second one.", None).unwrap();
    assert_eq!(tok.count_sentences(false), 2);
    let first = tok.extract_and_flush(1).unwrap();
    assert_eq!(texts(&first), vec!["First", "one", "."]);
    // the remaining sentence survives with a fresh sentence start
    assert!(tok.tokens()[0].role.contains(TokenRole::BEGINOFSENTENCE));
    assert_eq!(tok.count_sentences(false), 1);
}
