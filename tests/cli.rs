//! Command-line tests against a throwaway data directory

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fintrack(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fintrack").unwrap();
    cmd.env("FINTRACK_DATA_DIR", dir).env_remove("FINTRACK_LOG");
    cmd
}

fn initialized() -> TempDir {
    let dir = TempDir::new().unwrap();
    fintrack(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Demo data created"));
    dir
}

const JANUARY: [&str; 4] = ["--from", "2024-01-01", "--to", "2024-01-31"];

#[test]
fn init_twice_keeps_existing_data() {
    let dir = initialized();
    fintrack(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("demo data was not added"));
}

#[test]
fn category_list_shows_seeded_categories() {
    let dir = initialized();
    fintrack(dir.path())
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Food & Dining").and(predicate::str::contains("Salary")));
}

#[test]
fn summary_reports_demo_month() {
    let dir = initialized();
    fintrack(dir.path())
        .args(["report", "summary"])
        .args(JANUARY)
        .assert()
        .success()
        .stdout(predicate::str::contains("$3,000.00").and(predicate::str::contains("$430.75")));
}

#[test]
fn financial_report_writes_pdf() {
    let dir = initialized();
    let out = dir.path().join("reports");

    fintrack(dir.path())
        .args(["report", "financial"])
        .args(JANUARY)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Financial Report written to"));

    let bytes = fs::read(out.join("financial-report-2024-01-01-to-2024-01-31.pdf")).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.4"));
    assert!(bytes.ends_with(b"%%EOF\n"));
}

#[test]
fn budget_report_defaults_to_exports_dir() {
    let dir = initialized();
    fintrack(dir.path())
        .args(["report", "budget"])
        .args(JANUARY)
        .assert()
        .success();

    let path = dir
        .path()
        .join("exports")
        .join("budget-analysis-2024-01-01-to-2024-01-31.pdf");
    assert!(path.exists());
}

#[test]
fn added_transaction_is_listed_and_exported() {
    let dir = initialized();

    fintrack(dir.path())
        .args(["transaction", "add", "12.34", "Coffee \"beans\"", "--category", "Food & Dining", "--date", "2024-01-20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded expense $12.34"));

    fintrack(dir.path())
        .args(["txn", "list", "--search", "coffee"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Coffee"));

    fintrack(dir.path())
        .args(["export", "csv"])
        .args(JANUARY)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 6 transactions"));

    let csv = fs::read_to_string(
        dir.path()
            .join("exports")
            .join("transactions-2024-01-01-to-2024-01-31.csv"),
    )
    .unwrap();
    assert!(csv.starts_with("Date,Description,Category,Type,Amount\n"));
    assert!(csv.contains("2024-01-20,\"Coffee \"\"beans\"\"\",Food & Dining,expense,12.34"));
}

#[test]
fn budget_list_and_duplicate_budget() {
    let dir = initialized();

    fintrack(dir.path())
        .args(["budget", "list"])
        .args(JANUARY)
        .assert()
        .success()
        .stdout(predicate::str::contains("Food & Dining").and(predicate::str::contains("$500.00")));

    fintrack(dir.path())
        .args(["budget", "add", "Food & Dining", "300"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn reversed_window_is_rejected() {
    let dir = initialized();
    fintrack(dir.path())
        .args(["report", "summary", "--from", "2024-02-01", "--to", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
}

#[test]
fn json_snapshot_is_written() {
    let dir = initialized();
    let out = dir.path().join("snap");

    fintrack(dir.path())
        .args(["export", "json", "--pretty", "--output-dir"])
        .arg(&out)
        .assert()
        .success();

    let entry = fs::read_dir(&out).unwrap().next().unwrap().unwrap();
    let text = fs::read_to_string(entry.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["schema_version"], "1.0.0");
    assert_eq!(value["transactions"].as_array().unwrap().len(), 5);
}
