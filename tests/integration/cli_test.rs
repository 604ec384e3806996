//! Integration tests for the cueplay CLI

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::fixture_path;

/// cueplay command with config, cache and home isolated in `home`.
fn cueplay(home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cueplay"));
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_CACHE_HOME", home.path().join("cache"))
        .env_remove("CUEPLAY_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn fixture(name: &str) -> String {
    fixture_path(name).display().to_string()
}

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    cueplay(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn play_help_lists_keys() {
    let home = TempDir::new().unwrap();
    cueplay(&home)
        .args(["play", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--duration"))
        .stdout(predicate::str::contains("Dismiss a pause message"));
}

#[test]
fn version_flag() {
    let home = TempDir::new().unwrap();
    cueplay(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("cueplay "));
}

// ============================================================================
// Check Command Tests
// ============================================================================

#[test]
fn check_lists_annotations() {
    let home = TempDir::new().unwrap();
    let output = cueplay(&home)
        .args(["check", &fixture("lesson.json"), "--duration", "120"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();

    insta::with_settings!({filters => vec![(r"Payload: .*", "Payload: [PATH]")]}, {
        insta::assert_snapshot!(stdout.trim_end(), @r#"
        Payload: [PATH]
        Title: Ixcanul - Lesson 3
        Events: 3
          #0   Mute  00:00:10 - 00:00:20
          #1   Skip  00:00:30 - 00:00:45
          #2   Pause 00:01:00  "What does Maria decide here?"
        Subtitles: 2 track(s)
          en   3 cue(s)
          es   2 cue(s)
        Skip regions: 1
          25.0% +12.5%
        "#);
    });
}

#[test]
fn check_reports_rejected_entries() {
    let home = TempDir::new().unwrap();
    cueplay(&home)
        .args(["check", &fixture("malformed_entries.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Events: 2"))
        .stdout(predicate::str::contains("Rejected: 6"))
        .stdout(predicate::str::contains(
            "event #2: Skip event has no end time",
        ))
        .stdout(predicate::str::contains("event #3: Unknown event type 'Rewind'"))
        .stdout(predicate::str::contains(
            "track #0: Missing field 'language'",
        ));
}

#[test]
fn check_strict_fails_on_rejected_entries() {
    let home = TempDir::new().unwrap();
    cueplay(&home)
        .args(["check", "--strict", &fixture("malformed_entries.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("6 entries rejected"));
}

#[test]
fn check_strict_passes_clean_payload() {
    let home = TempDir::new().unwrap();
    cueplay(&home)
        .args(["check", "--strict", &fixture("lesson.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rejected").not());
}

#[test]
fn check_invalid_json_fails() {
    let home = TempDir::new().unwrap();
    cueplay(&home)
        .args(["check", &fixture("broken.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid JSON"));
}

#[test]
fn check_missing_file_fails() {
    let home = TempDir::new().unwrap();
    cueplay(&home)
        .args(["check", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read payload"));
}

// ============================================================================
// Play Command Tests
// ============================================================================

#[test]
fn play_requires_duration() {
    let home = TempDir::new().unwrap();
    cueplay(&home)
        .args(["play", &fixture("lesson.json")])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--duration"));
}

#[test]
fn play_rejects_non_positive_duration() {
    let home = TempDir::new().unwrap();
    cueplay(&home)
        .args(["play", &fixture("lesson.json"), "--duration", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duration must be a positive"));
}

// ============================================================================
// Config and Completions Tests
// ============================================================================

#[test]
fn config_show_prints_defaults() {
    let home = TempDir::new().unwrap();
    cueplay(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[player]"))
        .stdout(predicate::str::contains("inactivity_delay_ms = 3000"))
        .stdout(predicate::str::contains("fullscreen = \"xterm\""));
}

#[test]
fn config_init_writes_once() {
    let home = TempDir::new().unwrap();
    cueplay(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));

    cueplay(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    cueplay(&home)
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn config_path_points_into_cueplay_dir() {
    let home = TempDir::new().unwrap();
    cueplay(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cueplay"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn completions_for_bash() {
    let home = TempDir::new().unwrap();
    cueplay(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_cueplay"));
}
