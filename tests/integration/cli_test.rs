//! Integration tests for the command-line interface

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{run_reelsync, write_film};

fn reelsync(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("reelsync").unwrap();
    cmd.env("NO_COLOR", "1")
        .env("REELSYNC_CONFIG", config_dir.path().join("config.toml"))
        .env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) = run_reelsync(dir.path(), &["--help"]);

    assert_eq!(exit_code, 0);
    for name in ["play", "chapters", "cues", "poi", "chat", "timecode", "config"] {
        assert!(stdout.contains(name), "missing {} in help", name);
    }
}

#[test]
fn version_mentions_package_version() {
    let dir = TempDir::new().unwrap();
    reelsync(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn speak_without_time_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let (_stdout, stderr, exit_code) = run_reelsync(dir.path(), &["cues", "film.json", "--speak"]);
    assert_eq!(exit_code, 2);
    assert!(stderr.contains("--at"));
}

// ============================================================================
// Timecode
// ============================================================================

#[test]
fn timecode_parse() {
    let dir = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) =
        run_reelsync(dir.path(), &["timecode", "parse", "01:02:03", "02:03", "garbage", ""]);
    assert_eq!(exit_code, 0);
    insta::assert_snapshot!(stdout, @r"
    3723
    123
    0
    0
    ");
}

#[test]
fn timecode_format() {
    let dir = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) =
        run_reelsync(dir.path(), &["timecode", "format", "3723", "360000", "59.9"]);
    assert_eq!(exit_code, 0);
    insta::assert_snapshot!(stdout, @r"
    01:02:03
    100:00:00
    00:00:59
    ");
}

// ============================================================================
// Film listings
// ============================================================================

#[test]
fn chapters_mark_the_active_one() {
    let dir = TempDir::new().unwrap();
    let film = write_film(dir.path());

    reelsync(&dir)
        .args(["chapters", film.to_str().unwrap(), "--at", "00:01:05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Le Voyage"))
        .stdout(predicate::str::contains("▶ 00:01:00  Tempête"))
        .stdout(predicate::str::contains("  00:02:00  Harbor"));
}

#[test]
fn chapters_json_output() {
    let dir = TempDir::new().unwrap();
    let film = write_film(dir.path());
    let (stdout, _stderr, exit_code) = run_reelsync(
        dir.path(),
        &["chapters", film.to_str().unwrap(), "--json", "--lang", "en", "--at", "130"],
    );
    assert_eq!(exit_code, 0);

    let rows: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1]["title"], "Storm");
    assert_eq!(rows[2]["timestamp"], "00:02:00");
    assert_eq!(rows[2]["active"], true);
    assert_eq!(rows[0]["active"], false);
}

#[test]
fn cues_respect_tolerance() {
    let dir = TempDir::new().unwrap();
    let film = write_film(dir.path());
    let film = film.to_str().unwrap();

    let (stdout, _, _) = run_reelsync(dir.path(), &["cues", film, "--at", "10.3"]);
    assert!(stdout.contains("▶ 00:00:10"));

    let (stdout, _, _) = run_reelsync(dir.path(), &["cues", film, "--at", "10.6"]);
    assert!(!stdout.contains('▶'));

    let (stdout, _, _) =
        run_reelsync(dir.path(), &["cues", film, "--at", "10.6", "--tolerance", "1"]);
    assert!(stdout.contains("▶ 00:00:10"));
}

#[test]
fn configured_tolerance_applies_to_cues() {
    let dir = TempDir::new().unwrap();
    let film = write_film(dir.path());
    fs::write(
        dir.path().join("config.toml"),
        "[narration]\ntolerance_secs = 1.0\n",
    )
    .unwrap();

    reelsync(&dir)
        .args(["cues", film.to_str().unwrap(), "--at", "10.6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("▶ 00:00:10"));
}

#[test]
fn poi_lists_places_and_scenes() {
    let dir = TempDir::new().unwrap();
    let film = write_film(dir.path());

    reelsync(&dir)
        .args(["poi", film.to_str().unwrap(), "--lang", "fr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Phare"))
        .stdout(predicate::str::contains("(48.38000, -4.49000)"))
        .stdout(predicate::str::contains("00:00:30  Arrivée"))
        .stdout(predicate::str::contains("00:01:40  Departure"));
}

#[test]
fn missing_film_fails_with_context() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.json");
    let (_stdout, stderr, exit_code) =
        run_reelsync(dir.path(), &["chapters", missing.to_str().unwrap()]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Failed to load film"));
}

#[test]
fn play_without_film_or_config_source_fails_early() {
    let dir = TempDir::new().unwrap();
    let (_stdout, stderr, exit_code) = run_reelsync(dir.path(), &["play"]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("film.source"));
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn config_show_prints_defaults() {
    let dir = TempDir::new().unwrap();
    reelsync(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[narration]"))
        .stdout(predicate::str::contains("tolerance_secs = 0.5"));
}

#[test]
fn config_path_honors_override() {
    let dir = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) = run_reelsync(dir.path(), &["config", "path"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.trim().ends_with("config.toml"));
}

#[test]
fn config_migrate_fills_missing_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "# mine\n[narration]\nrate = 0.9\n").unwrap();

    let (stdout, _stderr, exit_code) = run_reelsync(dir.path(), &["config", "migrate", "--yes"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("+ voice"));

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("# mine"));
    assert!(content.contains("rate = 0.9"));
    assert!(content.contains("[chat]"));

    let (stdout, _stderr, _) = run_reelsync(dir.path(), &["config", "migrate", "--yes"]);
    assert!(stdout.contains("already up to date"));
}

#[test]
fn broken_config_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "[player\n").unwrap();

    let (stdout, stderr, exit_code) = run_reelsync(dir.path(), &["timecode", "format", "61"]);
    assert_eq!(exit_code, 0);
    assert_eq!(stdout.trim(), "00:01:01");
    assert!(stderr.contains("Using default config"));
}

#[test]
fn completions_are_generated() {
    let dir = TempDir::new().unwrap();
    reelsync(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reelsync"));
}
