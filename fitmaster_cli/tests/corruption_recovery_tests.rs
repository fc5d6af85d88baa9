//! Corruption recovery tests for the fitmaster binary.
//!
//! These tests verify the system can handle:
//! - Corrupted exercise and workout files
//! - Workouts referencing deleted exercises
//! - Empty store files

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cli(data_dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fitmaster"));
    cmd.env("XDG_CONFIG_HOME", data_dir.join("config"))
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--user")
        .arg("alice");
    cmd
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

#[test]
fn test_corrupted_exercise_file() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    fs::write(data_dir.join("exercises.json"), "{ invalid json }}}}")
        .expect("Failed to write corrupted exercises");

    cli(data_dir)
        .args(["exercise", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No exercises found"));

    // The next write moves the corrupted file aside before replacing it
    cli(data_dir)
        .args(["exercise", "add", "--name", "Row", "--group", "back"])
        .args(["--load", "machine", "--type", "auxiliary"])
        .assert()
        .success();

    let backup = fs::read_dir(data_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .find(|e| {
            e.file_name()
                .to_string_lossy()
                .starts_with("exercises.json.corrupt-")
        })
        .expect("corrupted file should be kept");
    assert_eq!(
        fs::read_to_string(backup.path()).unwrap(),
        "{ invalid json }}}}"
    );

    cli(data_dir)
        .args(["exercise", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Row"));
}

#[test]
fn test_corrupted_workout_file() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    fs::write(data_dir.join("workouts.json"), "[{ \"id\": ")
        .expect("Failed to write corrupted workouts");

    cli(data_dir)
        .args(["workout", "--auto-complete"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No active workout"));
}

#[test]
fn test_empty_store_files() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    fs::write(data_dir.join("exercises.json"), "").unwrap();
    fs::write(data_dir.join("workouts.json"), "").unwrap();

    cli(data_dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exercises in catalog: 0"));
}

#[test]
fn test_workout_with_deleted_exercise() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    for name in ["Curl", "Hammer Curl"] {
        cli(data_dir)
            .args(["exercise", "add", "--name", name, "--group", "arms"])
            .args(["--load", "additional_weight", "--type", "isolation"])
            .assert()
            .success();
    }

    cli(data_dir)
        .args(["generate", "--group", "arms=2", "--start"])
        .assert()
        .success();

    let exercises: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(data_dir.join("exercises.json")).unwrap())
            .unwrap();
    let id = exercises[0]["id"].as_str().unwrap().to_string();
    cli(data_dir)
        .args(["exercise", "delete", &id])
        .assert()
        .success();

    // The session proceeds with the remaining exercise
    cli(data_dir)
        .args(["workout", "--auto-complete"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout finished"));

    // The entry for the deleted exercise is still on the finished workout
    let workouts: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(data_dir.join("workouts.json")).unwrap())
            .unwrap();
    let entries = workouts[0]["exercises"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().any(|e| e["exercise_id"] == id.as_str()));
}

#[test]
fn test_workout_with_every_exercise_deleted() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args(["exercise", "add", "--name", "Curl", "--group", "arms"])
        .args(["--load", "additional_weight", "--type", "isolation"])
        .assert()
        .success();
    cli(data_dir)
        .args(["generate", "--group", "arms=1", "--start"])
        .assert()
        .success();

    let exercises: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(data_dir.join("exercises.json")).unwrap())
            .unwrap();
    let id = exercises[0]["id"].as_str().unwrap().to_string();
    cli(data_dir)
        .args(["exercise", "delete", &id])
        .assert()
        .success();

    cli(data_dir)
        .args(["workout", "--auto-complete"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No active workout"));
}
