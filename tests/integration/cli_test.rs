//! Integration tests for the ytstamps CLI

use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

use super::helpers::{comments_fixture, ytstamps, VIDEO_A, VIDEO_B};

fn sample_comments() -> serde_json::Value {
    json!([
        {"commentId": "a", "time": 2, "authorName": "ann", "text": "intro"},
        {"commentId": "b", "time": 5, "authorName": "bo", "text": "see 0:02"},
        {"commentId": "bad", "time": "soon"}
    ])
}

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let config = TempDir::new().unwrap();
    ytstamps(&config)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("replay"))
        .stdout(predicate::str::contains("bar"))
        .stdout(predicate::str::contains("stamps"));
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    let config = TempDir::new().unwrap();
    ytstamps(&config).assert().code(2);
}

// ============================================================================
// Stamps
// ============================================================================

#[test]
fn stamps_prints_each_timestamp() {
    let config = TempDir::new().unwrap();
    ytstamps(&config)
        .args(["stamps", "chorus at 1:02:03, bridge at 3:75"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1:02:03 -> 3723s"))
        .stdout(predicate::str::contains("3:75 -> invalid"));
}

#[test]
fn stamps_without_timestamps_says_so() {
    let config = TempDir::new().unwrap();
    ytstamps(&config)
        .args(["stamps", "no times here"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No timestamps found."));
}

// ============================================================================
// Bar
// ============================================================================

#[test]
fn bar_draws_one_glyph_per_distinct_time_and_skips_malformed_records() {
    let config = TempDir::new().unwrap();
    let (_dir, path) = comments_fixture(
        "c.json",
        json!([
            {"commentId": "a", "time": 15},
            {"commentId": "b", "time": 30},
            {"commentId": "c", "time": 30},
            {"commentId": 7, "time": 45},
            {"commentId": "late", "time": 500}
        ]),
    );

    let output = ytstamps(&config)
        .arg("bar")
        .arg(&path)
        .args(["--duration", "60", "--width", "60"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches('◆').count(), 1);
    assert_eq!(stdout.matches('◈').count(), 1);
    assert!(stdout.contains("0:00/1:00"));
    assert!(!stdout.contains('\x1b'));
}

#[test]
fn bar_rejects_missing_file() {
    let config = TempDir::new().unwrap();
    ytstamps(&config)
        .args(["bar", "/nonexistent/comments.json", "--duration", "60"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read comments file"));
}

// ============================================================================
// Replay
// ============================================================================

#[test]
fn replay_prints_overlay_events() {
    let config = TempDir::new().unwrap();
    let (_dir, path) = comments_fixture("c.json", sample_comments());

    ytstamps(&config)
        .args(["replay", "--url", VIDEO_A, "--duration", "10", "--comments"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("show #1 slot 0 @ann [0:02] intro"))
        .stdout(predicate::str::contains("fade #1"))
        .stdout(predicate::str::contains("hide #2"))
        .stderr(predicate::str::contains("2 comments, 2 shown"));
}

#[test]
fn replay_reads_the_configured_comments_dir() {
    let config = TempDir::new().unwrap();
    let comments_dir = TempDir::new().unwrap();
    std::fs::write(
        comments_dir.path().join("aaaaaaaaaaa.json"),
        sample_comments().to_string(),
    )
    .unwrap();
    std::fs::write(
        config.path().join("config.toml"),
        format!(
            "[provider]\ncomments_dir = {:?}\n",
            comments_dir.path().to_string_lossy()
        ),
    )
    .unwrap();

    ytstamps(&config)
        .args(["replay", "--url", VIDEO_A, "--duration", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("@bo"));
}

#[test]
fn replay_without_comments_source_fails() {
    let config = TempDir::new().unwrap();
    ytstamps(&config)
        .args(["replay", "--url", VIDEO_A, "--duration", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No comments source"));
}

#[test]
fn replay_follows_navigation() {
    let config = TempDir::new().unwrap();
    let (_dir_a, path_a) = comments_fixture("a.json", sample_comments());
    let (_dir_b, path_b) = comments_fixture(
        "b.json",
        json!([{"commentId": "z", "time": 1, "authorName": "zed", "text": "second video"}]),
    );

    ytstamps(&config)
        .args(["replay", "--url", VIDEO_A, "--duration", "10", "--comments"])
        .arg(&path_a)
        .args([
            "--navigate-to",
            VIDEO_B,
            "--navigate-at",
            "3",
            "--next-duration",
            "4",
            "--next-comments",
        ])
        .arg(&path_b)
        .assert()
        .success()
        .stdout(predicate::str::contains("@zed"))
        .stdout(predicate::str::contains("@bo").not())
        .stdout(predicate::str::contains("overlay container removed"))
        .stderr(predicate::str::contains("navigated"));
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn config_show_prints_defaults_without_a_file() {
    let config = TempDir::new().unwrap();
    ytstamps(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max_concurrent = 3"))
        .stdout(predicate::str::contains("display_ms = 4000"));
}

#[test]
fn config_show_reads_the_file() {
    let config = TempDir::new().unwrap();
    std::fs::write(
        config.path().join("config.toml"),
        "[overlay]\nmax_concurrent = 5\n",
    )
    .unwrap();

    ytstamps(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max_concurrent = 5"))
        .stdout(predicate::str::contains("fade_ms = 500"));
}

#[test]
fn config_show_rejects_invalid_values() {
    let config = TempDir::new().unwrap();
    std::fs::write(
        config.path().join("config.toml"),
        "[overlay]\nmax_concurrent = 0\n",
    )
    .unwrap();

    ytstamps(&config)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_concurrent"));
}

#[test]
fn config_migrate_adds_missing_fields() {
    let config = TempDir::new().unwrap();
    let path = config.path().join("config.toml");
    std::fs::write(&path, "[overlay]\nmax_concurrent = 2\n").unwrap();

    ytstamps(&config)
        .args(["config", "migrate", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config updated successfully."));

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("max_concurrent = 2"));
    assert!(content.contains("fade_ms"));
    assert!(content.contains("[playback]"));
}

#[test]
fn config_migrate_without_tty_changes_nothing() {
    let config = TempDir::new().unwrap();
    let path = config.path().join("config.toml");
    std::fs::write(&path, "[overlay]\nmax_concurrent = 2\n").unwrap();

    ytstamps(&config)
        .args(["config", "migrate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes made."));

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "[overlay]\nmax_concurrent = 2\n"
    );
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn completions_generate_for_bash() {
    let config = TempDir::new().unwrap();
    ytstamps(&config)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ytstamps"));
}
