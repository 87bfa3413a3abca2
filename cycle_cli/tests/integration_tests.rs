//! Integration tests for the cycle binary.
//!
//! These tests verify end-to-end behavior including:
//! - Cycle setup and projection queries
//! - Recommendations, hormones and horoscope output
//! - Journal recording and CSV export
//! - Data persistence and reset

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("cycle"))
}

/// Run `setup` with a 28/5 cycle starting 2024-01-01
fn setup_standard_cycle(data_dir: &Path) {
    cli()
        .arg("setup")
        .arg("--data-dir")
        .arg(data_dir)
        .args(["--today", "2024-01-10"])
        .args(["--cycle-length", "28", "--period-length", "5"])
        .args(["--last-period", "2024-01-01"])
        .assert()
        .success();
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Menstrual cycle phase tracker"));
}

#[test]
fn test_setup_reports_current_phase() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("setup")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["--today", "2024-01-10"])
        .args(["--last-period", "2024-01-01", "--name", "Jane"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cycle saved"))
        .stdout(predicate::str::contains("Projected 56 days from 2024-01-01"))
        .stdout(predicate::str::contains("Follicular Phase - day 10"))
        .stdout(predicate::str::contains("Next period in 19 days"));

    let profile = fs::read_to_string(temp_dir.path().join("profile.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&profile).unwrap();
    assert_eq!(json["name"], "Jane");
    assert_eq!(json["cycle"]["settings"]["averageCycleLength"], 28);
    assert_eq!(json["cycle"]["settings"]["lastPeriodStartDate"], "2024-01-01");
    assert_eq!(
        json["cycle"]["predictedCycleDays"].as_array().unwrap().len(),
        56
    );
}

#[test]
fn test_setup_rejects_out_of_range_settings() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("setup")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["--cycle-length", "50", "--last-period", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidSettings"));

    assert!(!temp_dir.path().join("profile.json").exists());
}

#[test]
fn test_setup_rejects_bad_date() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("setup")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["--last-period", "2024-13-40"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected YYYY-MM-DD"));
}

#[test]
fn test_status_requires_setup() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("NotConfigured"));
}

#[test]
fn test_status_after_setup() {
    let temp_dir = setup_test_dir();
    setup_standard_cycle(temp_dir.path());

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["--today", "2024-01-20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Luteal Phase - day 20"))
        .stdout(predicate::str::contains("Next period in 9 days"));
}

#[test]
fn test_status_full_cycle_counts_whole_cycle() {
    let temp_dir = setup_test_dir();
    setup_standard_cycle(temp_dir.path());

    cli()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["--today", "2024-01-29"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Menstrual Phase - day 1"))
        .stdout(predicate::str::contains("Next period in 28 days"));
}

#[test]
fn test_status_outside_projection_falls_back() {
    let temp_dir = setup_test_dir();
    setup_standard_cycle(temp_dir.path());

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["--today", "2024-06-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Menstrual Phase - day 1"))
        .stdout(predicate::str::contains("outside the projected timeline"));
}

#[test]
fn test_day_lookup() {
    let temp_dir = setup_test_dir();
    setup_standard_cycle(temp_dir.path());

    cli()
        .arg("day")
        .arg("2024-01-15")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-15: day 15 (Ovulatory)"));

    cli()
        .arg("day")
        .arg("2024-03-01")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("outside the projected timeline"));
}

#[test]
fn test_calendar_month() {
    let temp_dir = setup_test_dir();
    setup_standard_cycle(temp_dir.path());

    cli()
        .arg("calendar")
        .args(["--month", "2024-01"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("January 2024"))
        .stdout(predicate::str::contains(" 1M"))
        .stdout(predicate::str::contains("15O"))
        .stdout(predicate::str::contains("20L"));
}

#[test]
fn test_recommend_for_explicit_phase_without_setup() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("recommend")
        .args(["--phase", "luteal"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("LUTEAL PHASE"))
        .stdout(predicate::str::contains("Complex Carbohydrates"))
        .stdout(predicate::str::contains("Self-Compassion Meditation"));
}

#[test]
fn test_recommend_uses_current_phase() {
    let temp_dir = setup_test_dir();
    setup_standard_cycle(temp_dir.path());

    cli()
        .arg("recommend")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["--today", "2024-01-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MENSTRUAL PHASE"))
        .stdout(predicate::str::contains("Iron-Rich Foods"));
}

#[test]
fn test_hormones_for_day() {
    let temp_dir = setup_test_dir();
    setup_standard_cycle(temp_dir.path());

    cli()
        .arg("hormones")
        .args(["--day", "14"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Day 14 of 28"))
        .stdout(predicate::str::contains("Estrogen"))
        .stdout(predicate::str::contains("1.00"));

    cli()
        .arg("hormones")
        .args(["--day", "40"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure();
}

#[test]
fn test_horoscope_for_day() {
    let temp_dir = setup_test_dir();
    setup_standard_cycle(temp_dir.path());

    cli()
        .arg("horoscope")
        .args(["--day", "1"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Day 1 of Your Cycle"))
        .stdout(predicate::str::contains("Period starts"))
        .stdout(predicate::str::contains("Menstrual Phase"))
        .stdout(predicate::str::contains("Make Today Better"));
}

#[test]
fn test_journal_add_and_upsert() {
    let temp_dir = setup_test_dir();
    setup_standard_cycle(temp_dir.path());

    cli()
        .args(["journal", "add", "--date", "2024-01-05"])
        .args(["--mood", "sad", "--symptom", "Cramps:4", "--notes", "rough day"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Journal entry saved for 2024-01-05"));

    cli()
        .args(["journal", "add", "--date", "2024-01-05", "--mood", "happy"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .args(["journal", "list"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-05 [Menstrual]"))
        .stdout(predicate::str::contains("Mood: happy (3/5)"))
        .stdout(predicate::str::contains("rough day").not());

    let log = fs::read_to_string(temp_dir.path().join("journal.jsonl")).unwrap();
    assert_eq!(log.lines().count(), 2);
}

#[test]
fn test_journal_rejects_bad_intensity() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["journal", "add", "--symptom", "Headache:9"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure();

    assert!(!temp_dir.path().join("journal.jsonl").exists());
}

#[test]
fn test_export_timeline_csv() {
    let temp_dir = setup_test_dir();
    setup_standard_cycle(temp_dir.path());
    let out = temp_dir.path().join("timeline.csv");

    cli()
        .arg("export")
        .arg("--out")
        .arg(&out)
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 56 rows"));

    let csv = fs::read_to_string(&out).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("date,day_of_cycle,phase"));
    assert_eq!(lines.next(), Some("2024-01-01,1,menstrual"));
    assert_eq!(csv.lines().count(), 57);
}

#[test]
fn test_export_journal_csv() {
    let temp_dir = setup_test_dir();
    let out = temp_dir.path().join("journal.csv");

    cli()
        .args(["journal", "add", "--date", "2024-02-02", "--mood", "content"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .args(["export", "--journal", "--out"])
        .arg(&out)
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 rows"));

    assert!(fs::read_to_string(&out).unwrap().contains("2024-02-02,content,3"));
}

#[test]
fn test_reset_removes_data() {
    let temp_dir = setup_test_dir();
    setup_standard_cycle(temp_dir.path());

    cli()
        .arg("reset")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("removed"));

    assert!(!temp_dir.path().join("profile.json").exists());

    cli()
        .arg("reset")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to remove"));
}

#[test]
fn test_config_file_overrides_bounds() {
    let temp_dir = setup_test_dir();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[bounds]\nmax_cycle_length = 45\n").unwrap();

    cli()
        .arg("setup")
        .arg("--config")
        .arg(&config_path)
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["--today", "2024-01-02"])
        .args(["--cycle-length", "40", "--last-period", "2024-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Projected 80 days"));
}

#[test]
fn test_horoscope_past_content_table_uses_default_content() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("setup")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["--today", "2024-01-30"])
        .args(["--cycle-length", "35", "--last-period", "2024-01-01"])
        .assert()
        .success();

    cli()
        .arg("horoscope")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["--today", "2024-01-30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Day 30 of Your Cycle"))
        .stdout(predicate::str::contains("Content for day 30 is currently unavailable"))
        .stdout(predicate::str::contains("Luteal Phase"));

    cli()
        .arg("horoscope")
        .args(["--day", "36"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 1 and 35"));
}

#[test]
fn test_journal_mood_intensity_requires_mood() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["journal", "add", "--date", "2024-01-05", "--mood-intensity", "4"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--mood"));

    assert!(!temp_dir.path().join("journal.jsonl").exists());

    cli()
        .args(["journal", "add", "--date", "2024-01-05"])
        .args(["--mood", "anxious", "--mood-intensity", "4"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .args(["journal", "list"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Mood: anxious (4/5)"));
}
