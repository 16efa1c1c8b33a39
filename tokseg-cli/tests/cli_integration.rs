//! Integration tests for the tokseg CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

fn tokseg() -> Command {
    Command::cargo_bin("tokseg").unwrap()
}

#[test]
fn test_tokens_one_per_line() {
    tokseg()
        .args(["process", "-i", &fixture_path("english-sample.txt")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Mr.\nSmith\nwent\n"))
        .stdout(predicate::str::contains("-LRB-\nand\neggs\n-RRB-\n"));
}

#[test]
fn test_stdin_input() {
    tokseg()
        .arg("process")
        .write_stdin("Hello, world.")
        .assert()
        .success()
        .stdout("Hello\n,\nworld\n.\n");
}

#[test]
fn test_sentences() {
    tokseg()
        .args(["process", "--sentences", "-i", &fixture_path("english-sample.txt")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Mr. Smith went to the store .\nHe bought some milk -LRB- and eggs -RRB- .\n",
        ))
        .stdout(predicate::str::contains("`` Is that all ? ''\nshe asked .\n"))
        .stdout(predicate::str::contains(
            "A new paragraph starts here and continues on the next line .\n",
        ));
}

#[test]
fn test_config_file_and_flag_override() {
    tokseg()
        .args([
            "process",
            "-s",
            "-c",
            &fixture_path("tokseg.toml"),
            "-i",
            &fixture_path("english-sample.txt"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\" Is that all ? \"\n"))
        .stdout(predicate::str::contains("A new paragraph starts here\n"));

    tokseg()
        .args([
            "process",
            "-s",
            "-c",
            &fixture_path("tokseg.toml"),
            "--options",
            "quotes=latex",
            "--newline-break",
            "two",
            "-i",
            &fixture_path("english-sample.txt"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("`` Is that all ? ''\n"))
        .stdout(predicate::str::contains(
            "A new paragraph starts here and continues on the next line .\n",
        ));
}

#[test]
fn test_preserve_lines() {
    tokseg()
        .args(["process", "--preserve-lines"])
        .write_stdin("One (two).\n\nThree!")
        .assert()
        .success()
        .stdout("One -LRB- two -RRB- .\n\nThree !\n");
}

#[test]
fn test_region_and_xml_breaks() {
    tokseg()
        .args([
            "process",
            "-s",
            "--region",
            "text",
            "--xml-break",
            "p",
            "-i",
            &fixture_path("markup-sample.xml"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("First sentence without a stop\n"))
        .stdout(predicate::str::contains("Second one .\n"))
        .stdout(predicate::str::contains("Ignored").not());
}

#[test]
fn test_parse_inside() {
    tokseg()
        .args([
            "process",
            "--parse-inside",
            "p",
            "-i",
            &fixture_path("markup-sample.xml"),
        ])
        .assert()
        .success()
        .stdout("Second\none\n.\n");
}

#[test]
fn test_dump_and_lower_case() {
    let output = tokseg()
        .args(["process", "--dump", "--lower-case"])
        .write_stdin("Big Apple")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let records: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["text"], "big");
    assert_eq!(records[1]["text"], "apple");
    assert_eq!(records[1]["begin"], 4);
    assert_eq!(records[1]["end"], 9);
}

#[test]
fn test_untok() {
    tokseg()
        .args(["process", "--untok", "-i", &fixture_path("tokenized-sample.txt")])
        .assert()
        .success()
        .stdout("\"Hello,\" he said (quietly).\nI can't go.\n");
}

#[test]
fn test_encoding() {
    tokseg()
        .args([
            "process",
            "--encoding",
            "latin1",
            "-i",
            &fixture_path("latin1-sample.txt"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Caf\u{e9}\nau\nlait\nco\u{fb}te\n"));
}

#[test]
fn test_unknown_encoding() {
    tokseg()
        .args(["process", "--encoding", "klingon"])
        .write_stdin("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown encoding: klingon"));
}

#[test]
fn test_multiple_files_keep_input_order() {
    let dir = TempDir::new().unwrap();
    for (name, text) in [("a.txt", "Alpha one."), ("b.txt", "Beta two."), ("c.txt", "Gamma three.")] {
        fs::write(dir.path().join(name), text).unwrap();
    }
    let pattern = dir.path().join("*.txt");

    tokseg()
        .args(["process", "-s", "-q", "-j", "2", "-i"])
        .arg(pattern.to_str().unwrap())
        .assert()
        .success()
        .stdout("Alpha one .\nBeta two .\nGamma three .\n");
}

#[test]
fn test_output_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.txt");

    tokseg()
        .args(["process", "-s", "-o"])
        .arg(&output)
        .write_stdin("One. Two.")
        .assert()
        .success()
        .stdout("");

    assert_eq!(fs::read_to_string(&output).unwrap(), "One .\nTwo .\n");
}

#[test]
fn test_missing_input() {
    tokseg()
        .args(["process", "-i", "tests/fixtures/does-not-exist-*.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_invalid_options() {
    tokseg()
        .args(["process", "--options", "frobnicate"])
        .write_stdin("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("frobnicate"));
}

#[test]
fn test_generate_and_validate_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tokseg.toml");

    tokseg()
        .args(["generate-config", "--options", "invertible", "-o"])
        .arg(&path)
        .assert()
        .success();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("[tokenizer]"));
    assert!(content.contains("[splitter]"));

    tokseg()
        .args(["validate", "-c"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_validate_rejects_bad_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[splitter]\nmulti_token_pattern = \"/unclosed\"\n").unwrap();

    tokseg()
        .args(["validate", "-c"])
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Configuration is invalid"));
}

#[test]
fn test_help_lists_commands() {
    tokseg()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("generate-config"))
        .stdout(predicate::str::contains("validate"));
}
