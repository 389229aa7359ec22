//! CLI smoke tests

use assert_cmd::Command;
use predicates::prelude::*;

fn unitok() -> Command {
    Command::cargo_bin("unitok").unwrap()
}

#[test]
fn test_help() {
    unitok()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("tokenizer"));
}

#[test]
fn test_process_stdin_text() {
    unitok()
        .args(["process"])
        .write_stdin("Hello, world.")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello , world ."));
}

#[test]
fn test_process_sentence_per_line_output() {
    unitok()
        .args(["process", "-n"])
        .write_stdin("One done. Two done.")
        .assert()
        .success()
        .stdout(predicate::str::contains("One done .\nTwo done .\n"));
}

#[test]
fn test_process_verbose_format() {
    unitok()
        .args(["process", "--format", "verbose"])
        .write_stdin("Hi.")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hi\tWORD"))
        .stdout(predicate::str::contains("ENDOFSENTENCE"));
}

#[test]
fn test_process_json_format() {
    unitok()
        .args(["process", "--format", "json"])
        .write_stdin("Hi.")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"class\": \"WORD\""))
        .stdout(predicate::str::contains("\"space\""));
}

#[test]
fn test_process_passthru() {
    unitok()
        .args(["process", "--passthru"])
        .write_stdin("Hello, world.")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello, world."));
}

#[test]
fn test_process_file_input() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("input.txt");
    std::fs::write(&path, "From a file.").unwrap();
    unitok()
        .args(["process", "-i", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("From a file ."));
}

#[test]
fn test_process_unknown_language_fails() {
    unitok()
        .args(["process", "--language", "nope-nope"])
        .write_stdin("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope-nope"));
}

#[test]
fn test_validate_reports_counts() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("tokconfig-toy");
    std::fs::write(
        &path,
        "[RULES]\nWORD=[\\p{L}]+\nPUNCTUATION=[\\p{P}]\n[RULE-ORDER]\nWORD PUNCTUATION\n",
    )
    .unwrap();
    unitok()
        .args(["validate", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("rules:       2"));
}

#[test]
fn test_validate_rejects_bad_regex() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("tokconfig-bad");
    std::fs::write(&path, "[RULES]\nBAD=(oops\n").unwrap();
    unitok()
        .args(["validate", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("BAD"));
}
