//! Integration tests for the histfetch CLI
//!
//! These tests run the histfetch binary against an Anki-format fixture
//! collection, with config and data directories isolated per test.

mod common;

use common::{histfetch, write_collection};
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn collection(home: &Path) -> PathBuf {
    write_collection(&home.join("collection.anki2"))
}

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn test_help_flag() {
    let dir = tempdir().unwrap();
    histfetch(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: histfetch"))
        .stdout(predicate::str::contains("fetch"))
        .stdout(predicate::str::contains("block"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("blocklist"));
}

#[test]
fn test_version_flag() {
    let dir = tempdir().unwrap();
    histfetch(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("histfetch"));
}

#[test]
fn test_mix_out_of_range_is_usage_error() {
    let dir = tempdir().unwrap();
    histfetch(dir.path())
        .args(["fetch", "--mix", "150"])
        .assert()
        .code(2);
}

#[test]
fn test_parse_error_uses_json_envelope() {
    let dir = tempdir().unwrap();
    let output = histfetch(dir.path())
        .args(["--format", "json", "fetch", "--mix", "150"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["code"], 2);
    assert_eq!(json["error"]["type"], "usage_error");
}

// ============================================================================
// fetch
// ============================================================================

#[test]
fn test_fetch_requires_collection() {
    let dir = tempdir().unwrap();
    histfetch(dir.path())
        .args(["fetch", "--hours", "2"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no collection configured"));
}

#[test]
fn test_fetch_missing_collection_file() {
    let dir = tempdir().unwrap();
    histfetch(dir.path())
        .args(["fetch", "--collection"])
        .arg(dir.path().join("missing.anki2"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("collection not found"));
}

#[test]
fn test_fetch_direct_batches() {
    let dir = tempdir().unwrap();
    let col = collection(dir.path());

    histfetch(dir.path())
        .args(["fetch", "--hours", "2", "--collection"])
        .arg(&col)
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Batch 1 (3 IDs) ---"))
        .stdout(predicate::str::contains("101, 102, 103"))
        .stdout(predicate::str::contains("900").not())
        .stdout(predicate::str::contains("300").not());
}

#[test]
fn test_fetch_state_flags() {
    let dir = tempdir().unwrap();
    let col = collection(dir.path());

    histfetch(dir.path())
        .args(["fetch", "--hours", "2", "--no-learning", "--collection"])
        .arg(&col)
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Batch 1 (1 IDs) ---"))
        .stdout(predicate::str::contains("103"));

    // only the young card is left, and its note carries a Shelf tag
    histfetch(dir.path())
        .args([
            "fetch",
            "--hours",
            "2",
            "--no-learning",
            "--no-mature",
            "--collection",
        ])
        .arg(&col)
        .assert()
        .success()
        .stdout(predicate::str::contains("no valid Step tags"));
}

#[test]
fn test_fetch_horizontal() {
    let dir = tempdir().unwrap();
    let col = collection(dir.path());

    histfetch(dir.path())
        .args(["fetch", "--hours", "2", "--horizontal", "--collection"])
        .arg(&col)
        .assert()
        .success()
        .stdout(predicate::str::contains("101, 102, 103, 201"))
        .stdout(predicate::str::contains(
            "Selected 3 direct + 1 horizontal IDs (depth 1, 0 in overflow)",
        ));
}

#[test]
fn test_fetch_empty_window() {
    let dir = tempdir().unwrap();
    let col = collection(dir.path());

    histfetch(dir.path())
        .args(["fetch", "--since", "1", "--until", "2", "--collection"])
        .arg(&col)
        .assert()
        .success()
        .stdout(predicate::str::contains("no events in window"));
}

#[test]
fn test_fetch_json() {
    let dir = tempdir().unwrap();
    let col = collection(dir.path());

    let output = histfetch(dir.path())
        .args(["--format", "json", "fetch", "--hours", "2", "--collection"])
        .arg(&col)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["seed_count"], 3);
    assert_eq!(json["stats"]["direct_found"], 3);
    assert_eq!(json["batches"][0]["number"], 1);
    assert_eq!(
        json["batches"][0]["ids"],
        serde_json::json!(["101", "102", "103"])
    );
}

#[test]
fn test_fetch_empty_json() {
    let dir = tempdir().unwrap();
    let col = collection(dir.path());

    let output = histfetch(dir.path())
        .args(["--format", "json", "fetch", "--since", "1", "--until", "2"])
        .arg("--collection")
        .arg(&col)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["empty"], true);
    assert_eq!(json["reason"], "no_events");
}

#[test]
fn test_fetch_excludes_blocklisted_and_mastered() {
    let dir = tempdir().unwrap();
    let col = collection(dir.path());
    let mastered = dir.path().join("correct_questions.txt");
    fs::write(&mastered, "102\n").unwrap();

    histfetch(dir.path())
        .args(["block", "UWorld says 103 is not a valid question"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "IDs saved to blocklist (none were in current list).",
        ));

    histfetch(dir.path())
        .args(["fetch", "--hours", "2", "--collection"])
        .arg(&col)
        .arg("--mastered")
        .arg(&mastered)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Automatically removed: 1 correct questions, 1 invalid questions",
        ))
        .stdout(predicate::str::contains("--- Batch 1 (1 IDs) ---\n101"));

    histfetch(dir.path())
        .args(["fetch", "--hours", "2", "--include-mastered", "--collection"])
        .arg(&col)
        .arg("--mastered")
        .arg(&mastered)
        .assert()
        .success()
        .stdout(predicate::str::contains("101, 102"));
}

#[test]
fn test_fetch_random_seed_is_reproducible() {
    let dir = tempdir().unwrap();
    let col = collection(dir.path());

    let run = || {
        histfetch(dir.path())
            .args(["-q", "fetch", "--hours", "2", "--random", "--seed", "42"])
            .arg("--collection")
            .arg(&col)
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

// ============================================================================
// block / show / blocklist
// ============================================================================

#[test]
fn test_block_refill_and_show() {
    let dir = tempdir().unwrap();
    let col = collection(dir.path());

    // quota: 1 direct + 1 horizontal, the other direct IDs overflow
    histfetch(dir.path())
        .args([
            "fetch",
            "--hours",
            "2",
            "--horizontal",
            "--batch-size",
            "2",
            "--collection",
        ])
        .arg(&col)
        .assert()
        .success()
        .stdout(predicate::str::contains("101, 201"));

    histfetch(dir.path())
        .args(["block", "--refill", "Invalid question IDs: 201"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Removed 1 invalid IDs and saved them to blocklist.",
        ))
        .stdout(predicate::str::contains("Recalled 1 IDs from overflow."));

    histfetch(dir.path())
        .args(["show", "--overflow"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Batch 1 (2 IDs) ---\n101, 102"))
        .stdout(predicate::str::contains("--- Overflow (1 IDs) ---\n103"));

    histfetch(dir.path())
        .arg("blocklist")
        .assert()
        .success()
        .stdout(predicate::str::diff("201\n"));
}

#[test]
fn test_block_reads_stdin() {
    let dir = tempdir().unwrap();

    histfetch(dir.path())
        .arg("block")
        .write_stdin("Error: questions 66 and 55 are unavailable\n")
        .assert()
        .success();

    histfetch(dir.path())
        .arg("blocklist")
        .assert()
        .success()
        .stdout(predicate::str::diff("55, 66\n"));

    let stored = fs::read_to_string(dir.path().join("data").join("invalid_questions.txt")).unwrap();
    assert_eq!(stored, "55, 66");
}

#[test]
fn test_block_without_numbers() {
    let dir = tempdir().unwrap();

    histfetch(dir.path())
        .args(["block", "something went wrong"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No numbers found in the pasted text."));

    histfetch(dir.path())
        .arg("blocklist")
        .assert()
        .success()
        .stdout(predicate::str::contains("Blocklist is empty."));
}

#[test]
fn test_show_without_session() {
    let dir = tempdir().unwrap();

    histfetch(dir.path())
        .arg("show")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("no saved session"));
}

#[test]
fn test_json_error_envelope() {
    let dir = tempdir().unwrap();

    let output = histfetch(dir.path())
        .args(["--format", "json", "show"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));

    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["code"], 3);
    assert_eq!(json["error"]["type"], "no_session");
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_file_sets_defaults() {
    let dir = tempdir().unwrap();
    let col = collection(dir.path());
    let config_dir = dir.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        format!(
            "batch_size = 2\n\n[paths]\ncollection = {:?}\n",
            col.display().to_string()
        ),
    )
    .unwrap();

    histfetch(dir.path())
        .args(["fetch", "--hours", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Batch 1 (2 IDs) ---\n101, 102"))
        .stdout(predicate::str::contains("--- Batch 2 (1 IDs) ---\n103"));
}

#[test]
fn test_invalid_config_is_usage_error() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("custom.toml");
    fs::write(&config, "mix_percent = 150\n").unwrap();

    histfetch(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("blocklist")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid mix percent"));
}

#[test]
fn test_missing_explicit_config() {
    let dir = tempdir().unwrap();

    histfetch(dir.path())
        .arg("--config")
        .arg(dir.path().join("nope.toml"))
        .arg("blocklist")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("config file not found"));
}
