//! Integration tests for the bmi binary.
//!
//! These tests verify end-to-end behavior including:
//! - Recording measurements and progress messages
//! - Editing and deleting stored measurements
//! - Data persistence across runs
//! - Report and CSV export output

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
    Command::new(assert_cmd::cargo::cargo_bin!("bmi"))
}

/// Record one measurement in `data_dir`
fn add(data_dir: &Path, height: &str, weight: &str) -> assert_cmd::assert::Assert {
    cli()
        .arg("add")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--height")
        .arg(height)
        .arg("--weight")
        .arg(weight)
        .assert()
}

fn stored_records(data_dir: &Path) -> Vec<serde_json::Value> {
    let contents =
        fs::read_to_string(data_dir.join("bmi_records.json")).expect("Failed to read store");
    serde_json::from_str(&contents).expect("Store is not a JSON array")
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("BMI measurement tracker"));
}

#[test]
fn test_first_measurement_has_no_prior_data() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    add(data_dir, "170", "80")
        .success()
        .stdout(predicate::str::contains("Measurement recorded"))
        .stdout(predicate::str::contains("BMI 27.68"))
        .stdout(predicate::str::contains(
            "no prior data available for comparison",
        ));

    let records = stored_records(data_dir);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["recommendation"], "Diet");
}

#[test]
fn test_diet_progress_success() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    add(data_dir, "170", "80").success();
    add(data_dir, "170", "75")
        .success()
        .stdout(predicate::str::contains("diet progress: success"));

    cli()
        .arg("progress")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("diet progress: success"));
}

#[test]
fn test_unchanged_weight_is_no_progress() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    add(data_dir, "170", "80").success();
    add(data_dir, "170", "80")
        .success()
        .stdout(predicate::str::contains("no progress, follow the guidance"));
}

#[test]
fn test_target_reached() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    add(data_dir, "170", "50").success();
    // Bulking phase, and weight hits the ideal range
    add(data_dir, "170", "60")
        .success()
        .stdout(predicate::str::contains("target reached"));
}

#[test]
fn test_invalid_input_rejected() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    add(data_dir, "170", "0")
        .failure()
        .stderr(predicate::str::contains("InvalidArgument"));

    // BMI of 200 is not plausible
    add(data_dir, "100", "200")
        .failure()
        .stderr(predicate::str::contains("InvalidArgument"));

    assert!(!data_dir.join("bmi_records.json").exists());
}

#[test]
fn test_list_default_command() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No measurements recorded."));

    add(data_dir, "170", "80").success();
    add(data_dir, "180", "70").success();

    cli()
        .arg("list")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 measurement(s)"))
        .stdout(predicate::str::contains("[0]"))
        .stdout(predicate::str::contains("[1]"))
        .stdout(predicate::str::contains("180 cm"));
}

#[test]
fn test_update_and_delete() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    add(data_dir, "170", "80").success();
    add(data_dir, "170", "78").success();

    cli()
        .arg("update")
        .arg("1")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--height")
        .arg("170")
        .arg("--weight")
        .arg("50")
        .assert()
        .success()
        .stdout(predicate::str::contains("Measurement [1] updated"));

    let records = stored_records(data_dir);
    assert_eq!(records[1]["weight"], 50.0);
    assert_eq!(records[1]["recommendation"], "Bulking");

    cli()
        .arg("delete")
        .arg("0")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted [0]"));

    let records = stored_records(data_dir);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["weight"], 50.0);
}

#[test]
fn test_out_of_range_index_fails_without_changes() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("update")
        .arg("0")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--height")
        .arg("170")
        .arg("--weight")
        .arg("70")
        .assert()
        .failure()
        .stderr(predicate::str::contains("IndexOutOfRange"));

    add(data_dir, "170", "80").success();
    let before = fs::read_to_string(data_dir.join("bmi_records.json")).unwrap();

    cli()
        .arg("delete")
        .arg("5")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("IndexOutOfRange"));

    let after = fs::read_to_string(data_dir.join("bmi_records.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_recommend_keeps_bmi() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    add(data_dir, "170", "80").success();
    let bmi_before = stored_records(data_dir)[0]["bmi"].clone();

    cli()
        .arg("recommend")
        .arg("0")
        .arg("Maintain")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("set to Maintain"));

    let records = stored_records(data_dir);
    assert_eq!(records[0]["recommendation"], "Maintain");
    assert_eq!(records[0]["bmi"], bmi_before);

    // A previous label other than Diet/Bulking cannot be judged
    add(data_dir, "170", "85")
        .success()
        .stdout(predicate::str::contains(
            "progress data not applicable for analysis",
        ));
}

#[test]
fn test_report() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("report")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No measurements recorded."));

    add(data_dir, "170", "80").success();
    add(data_dir, "170", "82").success();

    cli()
        .arg("report")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Weight: 82 kg"))
        .stdout(predicate::str::contains("BMI: 28.37"))
        .stdout(predicate::str::contains("Recommendation: Diet"))
        .stdout(predicate::str::contains("Progress: progress not as expected"));
}

#[test]
fn test_export_csv() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    let csv_path = data_dir.join("export").join("history.csv");

    add(data_dir, "170", "80").success();
    add(data_dir, "170", "76").success();

    cli()
        .arg("export")
        .arg(&csv_path)
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 measurement(s)"));

    let csv_content = fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert!(csv_content.starts_with("date,time,height_cm,weight_kg,bmi,recommendation"));
    assert_eq!(csv_content.lines().count(), 3);

    // Second export to the same file is refused
    cli()
        .arg("export")
        .arg(&csv_path)
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_verbose_flag_raises_log_level() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .env_remove("RUST_LOG")
        .arg("list")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("No measurement file").not());

    cli()
        .env_remove("RUST_LOG")
        .arg("-v")
        .arg("list")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("No measurement file"))
        .stdout(predicate::str::contains("No measurements recorded."));

    add(data_dir, "170", "80").success();

    cli()
        .env_remove("RUST_LOG")
        .arg("-vv")
        .arg("progress")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("Loaded 1 measurements"))
        .stdout(predicate::str::contains(
            "no prior data available for comparison",
        ));
}

#[test]
fn test_progress_on_empty_store() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("progress")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No measurements recorded."));
}
