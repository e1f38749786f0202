use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary isolated from the user's settings and environment overrides
fn splitkit(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("splitkit").unwrap();
    cmd.env("SPLITKIT_CONFIG", config_path(config_dir.path()))
        .env_remove("SPLITKIT_NAMING_PATTERN")
        .env_remove("SPLITKIT_OUTPUT_FORMAT")
        .env_remove("SPLITKIT_OUTPUT_DIR")
        .env_remove("RUST_LOG");
    cmd
}

fn config_path(dir: &Path) -> PathBuf {
    dir.join("config.toml")
}

#[test]
fn test_preview_default_pattern() {
    let dir = TempDir::new().unwrap();
    splitkit(&dir)
        .args(["preview", "--name", "MySong"])
        .assert()
        .success()
        .stdout(predicate::eq("MySong_part_001.mp3\n"));
}

#[test]
fn test_preview_time_pattern() {
    let dir = TempDir::new().unwrap();
    splitkit(&dir)
        .args([
            "preview",
            "--pattern",
            "{original_name}_({start_time}-{end_time})",
            "--name",
            "MySong",
            "--start",
            "01:30",
            "--end",
            "180",
            "--format",
            "wav",
        ])
        .assert()
        .success()
        .stdout(predicate::eq("MySong_(01:30-03:00).wav\n"));
}

#[test]
fn test_check_rejects_unknown_token() {
    let dir = TempDir::new().unwrap();
    splitkit(&dir)
        .args(["check", "--pattern", "{foo}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown placeholder '{foo}'"));
}

#[test]
fn test_check_notes_missing_number() {
    let dir = TempDir::new().unwrap();
    splitkit(&dir)
        .args(["check", "--pattern", "{original_name}_{start_time}"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ok\n").and(predicate::str::contains("note:")));
}

#[test]
fn test_plan_equal_parts() {
    let dir = TempDir::new().unwrap();
    splitkit(&dir)
        .args([
            "plan", "--input", "MySong.mp3", "--duration", "03:00", "--parts", "3",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("MySong_part_001.mp3")
                .and(predicate::str::contains("00:00 - 01:00"))
                .and(predicate::str::contains("MySong_part_003.mp3")),
        );
}

#[test]
fn test_plan_duplicate_names_fail() {
    let dir = TempDir::new().unwrap();
    splitkit(&dir)
        .args([
            "plan",
            "--input",
            "MySong.mp3",
            "--duration",
            "120",
            "--segment",
            "30",
            "--pattern",
            "{original_name}",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate file name 'MySong.mp3'"));
}

#[test]
fn test_plan_json_custom_ranges() {
    let dir = TempDir::new().unwrap();
    let output = splitkit(&dir)
        .args([
            "plan",
            "--input",
            "MySong.wav",
            "--duration",
            "05:00",
            "--range",
            "00:30-01:30",
            "--range",
            "02:00-09:00",
            "--format",
            "same",
            "--output-dir",
            "out",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let segments = plan["segments"].as_array().unwrap();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0]["file_name"], "MySong_part_001.wav");
    assert_eq!(segments[1]["end"], "05:00");
    assert_eq!(plan["method"], "custom_ranges");
}

#[test]
fn test_plan_rejects_single_part() {
    let dir = TempDir::new().unwrap();
    splitkit(&dir)
        .args(["plan", "--input", "a.mp3", "--duration", "60", "--parts", "1"])
        .assert()
        .failure();
}

#[test]
fn test_saved_pattern_is_used() {
    let dir = TempDir::new().unwrap();
    splitkit(&dir)
        .args(["config", "set-pattern", "Part{number:02d}_of_{original_name}"])
        .assert()
        .success();

    splitkit(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Part{number:02d}_of_{original_name}"));

    splitkit(&dir)
        .args(["plan", "--input", "MySong.mp3", "--duration", "60"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Part02_of_MySong.mp3"));
}

#[test]
fn test_environment_override_beats_file() {
    let dir = TempDir::new().unwrap();
    splitkit(&dir)
        .env("SPLITKIT_OUTPUT_FORMAT", "flac")
        .args(["preview", "--name", "MySong"])
        .assert()
        .success()
        .stdout(predicate::eq("MySong_part_001.flac\n"));
}

#[test]
fn test_remember_records_recent_file() {
    let dir = TempDir::new().unwrap();
    splitkit(&dir)
        .args([
            "plan",
            "--input",
            "music/MySong.mp3",
            "--duration",
            "60",
            "--remember",
        ])
        .assert()
        .success();

    splitkit(&dir)
        .args(["config", "recent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MySong.mp3"));
    assert!(config_path(dir.path()).exists());
}

#[test]
fn test_remember_stores_job_parameters() {
    let dir = TempDir::new().unwrap();
    splitkit(&dir)
        .args([
            "plan",
            "--input",
            "MySong.mp3",
            "--duration",
            "100",
            "--segment",
            "40",
            "--overlap",
            "10",
            "--remember",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("MySong_part_003.mp3").and(
            predicate::str::contains("MySong_part_004.mp3").not(),
        ));

    let saved: toml::Value =
        toml::from_str(&fs::read_to_string(config_path(dir.path())).unwrap()).unwrap();
    let last = &saved["last_configuration"];
    assert_eq!(last["method"].as_str(), Some("fixed_duration"));
    assert_eq!(last["segment_seconds"].as_str(), Some("40"));
    assert_eq!(last["overlap_seconds"].as_str(), Some("10"));
    assert!(last.get("parts").is_none());
}

#[test]
fn test_segment_count_is_capped() {
    let dir = TempDir::new().unwrap();
    splitkit(&dir)
        .args([
            "plan",
            "--input",
            "MySong.mp3",
            "--duration",
            "100000000",
            "--segment",
            "0.001",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("more than 10000 segments"));
}

#[test]
fn test_set_pattern_rejects_invalid() {
    let dir = TempDir::new().unwrap();
    splitkit(&dir)
        .args(["config", "set-pattern", "{number:0Xd}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed number format"));
    assert!(!config_path(dir.path()).exists());
}

#[test]
fn test_scan_lists_audio_files() {
    let dir = TempDir::new().unwrap();
    let music = dir.path().join("music");
    fs::create_dir(&music).unwrap();
    fs::write(music.join("one.mp3"), vec![0u8; 2048]).unwrap();
    fs::write(music.join("cover.jpg"), b"jpg").unwrap();

    splitkit(&dir)
        .args(["scan", "--dir"])
        .arg(&music)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("one.mp3")
                .and(predicate::str::contains("2.00 KB"))
                .and(predicate::str::contains("cover.jpg").not()),
        );
}
