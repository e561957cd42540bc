use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const RECEIPT: &str = "\
Life Insurance Corporation of India
Premium Receipt
Policy Number: 123456789
Premium Amount: Rs. 12,345.50
Date: 15/08/2023
";

/// Command with the user config directory pointed at an empty temp dir.
fn licr(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("licr").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home);
    cmd
}

#[test]
fn test_validate_in_year() {
    let home = TempDir::new().unwrap();
    licr(home.path())
        .args(["validate", "--date", "2023-08-15T00:00:00", "-y", "2023-24"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Premium submission date 2023-08-15 is valid for FY 2023-24",
        ));
}

#[test]
fn test_validate_outside_year_fails() {
    let home = TempDir::new().unwrap();
    licr(home.path())
        .args(["validate", "--date", "2024-04-01", "-y", "2023-24"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Premium submission date 2024-04-01 not in FY 2023-24",
        ));
}

#[test]
fn test_validate_without_date_fails() {
    let home = TempDir::new().unwrap();
    licr(home.path())
        .args(["validate", "-y", "2023-24"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No premium submission date"));
}

#[test]
fn test_validate_json_output() {
    let home = TempDir::new().unwrap();
    licr(home.path())
        .args(["validate", "--date", "2024-03-31", "-y", "2023-24", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"is_valid\": true"));
}

#[test]
fn test_process_receipt_json() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("receipt.txt");
    fs::write(&input, RECEIPT).unwrap();

    licr(home.path())
        .arg("process")
        .arg(&input)
        .args(["-y", "2023-24"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"LIC_RECEIPT\""))
        .stdout(predicate::str::contains("\"12345.50\""))
        .stdout(predicate::str::contains("2023-08-15T00:00:00"))
        .stdout(predicate::str::contains("\"is_valid\": true"));
}

#[test]
fn test_process_text_format_with_metadata() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("receipt.txt");
    let metadata = dir.path().join("metadata.json");
    fs::write(&input, RECEIPT).unwrap();
    fs::write(&metadata, r#"{"financial_year": "2024-25"}"#).unwrap();

    licr(home.path())
        .arg("process")
        .arg(&input)
        .arg("--metadata")
        .arg(&metadata)
        .args(["--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Document Type: LIC_RECEIPT"))
        .stdout(predicate::str::contains(
            "Premium submission date 2023-08-15 not in FY 2024-25",
        ));
}

#[test]
fn test_process_strict_rejects_other_document() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bill.txt");
    fs::write(&input, "Electricity bill\nAmount: 900\nDate: 02/02/2024\n").unwrap();

    licr(home.path())
        .arg("process")
        .arg(&input)
        .args(["-y", "2023-24", "--strict"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("OTHER_DOCUMENT"));
}

#[test]
fn test_process_rejects_malformed_financial_year() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("receipt.txt");
    fs::write(&input, RECEIPT).unwrap();

    licr(home.path())
        .arg("process")
        .arg(&input)
        .args(["-y", "2023/24"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-YY"));
}

#[test]
fn test_process_missing_file() {
    let home = TempDir::new().unwrap();
    licr(home.path())
        .args(["process", "/nonexistent/receipt.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_process_unavailable_command_source() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("receipt.txt");
    let config = dir.path().join("config.json");
    fs::write(&input, RECEIPT).unwrap();
    fs::write(
        &config,
        r#"{"source": {"kind": "command", "program": "licr-no-such-extractor"}}"#,
    )
    .unwrap();

    licr(home.path())
        .arg("--config")
        .arg(&config)
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("text source unavailable"));
}

#[test]
fn test_batch_writes_summary() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    fs::write(dir.path().join("a.txt"), RECEIPT).unwrap();
    fs::write(dir.path().join("b.txt"), "Grocery list: milk, eggs").unwrap();

    let pattern = format!("{}/*.txt", dir.path().display());

    licr(home.path())
        .args(["batch", &pattern, "-y", "2023-24", "--summary", "-j", "2"])
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 2 files"));

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.contains("a.txt,accepted,LIC_RECEIPT,12345.50"));
    assert!(summary.contains("b.txt,not_accepted,OTHER_DOCUMENT"));
    assert!(out.join("a.json").exists());
    assert!(out.join("b.json").exists());
}

#[test]
fn test_config_show_defaults() {
    let home = TempDir::new().unwrap();
    licr(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"min_marker_matches\": 3"))
        .stdout(predicate::str::contains("\"kind\": \"plain_text\""));
}

#[test]
fn test_config_set_then_get() {
    let home = TempDir::new().unwrap();
    licr(home.path())
        .args(["config", "set", "classification.min_marker_matches", "2"])
        .assert()
        .success();

    licr(home.path())
        .args(["config", "get", "classification.min_marker_matches"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2"));
}
