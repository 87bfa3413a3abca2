//! Concurrency tests for the cycle binary.
//!
//! These tests verify that repeated processes can safely:
//! - Append to the journal (file locking)
//! - Rewrite the profile while it is being read

use assert_cmd::Command;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("cycle"))
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

#[test]
fn test_concurrent_journal_appends() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    let handles: Vec<_> = (1..=5)
        .map(|day| {
            let data_dir = data_dir.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(day * 5));
                cli()
                    .args(["journal", "add", "--mood", "content"])
                    .arg("--date")
                    .arg(format!("2024-01-0{}", day))
                    .arg("--data-dir")
                    .arg(&data_dir)
                    .assert()
                    .success();
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("journal writer panicked");
    }

    let journal = std::fs::read_to_string(data_dir.join("journal.jsonl"))
        .expect("Failed to read journal");
    let entry_count = journal.lines().count();
    assert_eq!(entry_count, 5, "Expected 5 entries, got {}", entry_count);

    for line in journal.lines() {
        serde_json::from_str::<serde_json::Value>(line).expect("interleaved journal line");
    }
}

#[test]
fn test_status_does_not_undo_concurrent_setup() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("setup")
        .arg("--data-dir")
        .arg(&data_dir)
        .args(["--today", "2024-01-10", "--last-period", "2024-01-01"])
        .args(["--cycle-length", "28"])
        .assert()
        .success();

    let readers: Vec<_> = (0..6)
        .map(|i| {
            let data_dir = data_dir.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(i * 3));
                cli()
                    .arg("status")
                    .arg("--data-dir")
                    .arg(&data_dir)
                    .args(["--today", "2024-01-10"])
                    .assert()
                    .success();
            })
        })
        .collect();

    let writer = {
        let data_dir = data_dir.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(5));
            cli()
                .arg("setup")
                .arg("--data-dir")
                .arg(&data_dir)
                .args(["--today", "2024-01-10", "--last-period", "2024-01-05"])
                .args(["--cycle-length", "30"])
                .assert()
                .success();
        })
    };

    writer.join().expect("setup writer panicked");
    for reader in readers {
        reader.join().expect("status reader panicked");
    }

    let profile = std::fs::read_to_string(data_dir.join("profile.json")).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&profile).expect("profile must stay valid JSON");
    assert_eq!(json["cycle"]["settings"]["averageCycleLength"], 30);
    assert_eq!(json["cycle"]["settings"]["lastPeriodStartDate"], "2024-01-05");
}
