//! Integration tests for the `chronograph` CLI binary.
//!
//! These exercise the day, week, list and filename subcommands through the
//! actual binary, including stdin input, config files, privacy modes and
//! argument errors.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

const NOW: &str = "2026-03-18T08:00:00Z";

fn events_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/events.json")
}

fn config_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/layout.toml")
}

fn chronograph() -> Command {
    let mut cmd = Command::cargo_bin("chronograph").unwrap();
    cmd.env_remove("RUST_LOG").env("LANG", "en_US.UTF-8");
    cmd
}

/// Run a subcommand and parse its stdout as JSON.
fn run_json(args: &[&str]) -> Value {
    let output = chronograph().args(args).output().unwrap();
    assert!(
        output.status.success(),
        "chronograph {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// day
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn day_lays_out_today() {
    let days = run_json(&["day", "-i", events_path(), "--now", NOW]);
    let days = days.as_array().unwrap();
    assert_eq!(days.len(), 1);

    let blocks = days[0]["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0]["event_id"], "standup");
    assert_eq!(blocks[0]["top_offset"], 180.0);
    assert_eq!(blocks[0]["height"], 30.0);
    assert_eq!(blocks[0]["display"]["primary_label"], "Team standup");
}

#[test]
fn day_clamps_but_labels_true_times() {
    let days = run_json(&["day", "-i", events_path(), "--now", NOW]);
    let late = &days[0]["blocks"][2];
    assert_eq!(late["event_id"], "late-deploy");
    assert_eq!(late["top_offset"], 990.0);
    assert_eq!(late["clamped_end"], "2026-03-18T23:00:00Z");
    assert_eq!(late["time_label"], "22:30 - 01:00");
}

#[test]
fn day_reads_stdin() {
    let events = std::fs::read_to_string(events_path()).unwrap();
    chronograph()
        .args(["day", "--now", NOW])
        .write_stdin(events)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"event_id\": \"dentist\""));
}

#[test]
fn day_respects_time_zone() {
    // 09:00 UTC is 18:00 in Tokyo; the late deploy lands on the 19th there.
    let days = run_json(&["day", "-i", events_path(), "--now", NOW, "--tz", "Asia/Tokyo"]);
    let blocks = days[0]["blocks"].as_array().unwrap();
    let ids: Vec<&str> = blocks.iter().map(|b| b["event_id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["standup"]);
    assert_eq!(blocks[0]["time_label"], "18:00 - 18:15");
}

#[test]
fn day_custom_range_spans_days() {
    let days = run_json(&[
        "day",
        "-i",
        events_path(),
        "--from",
        "2026-03-18T00:00:00Z",
        "--to",
        "2026-03-20T00:00:00Z",
    ]);
    let days = days.as_array().unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[1]["all_day"][0]["event_id"], "offsite");
    // The late deploy's tail on the 19th ends before the 06:00 window opens.
    assert!(days[1]["blocks"].as_array().unwrap().is_empty());
}

#[test]
fn day_uses_config_file() {
    let days = run_json(&[
        "day",
        "-i",
        events_path(),
        "--now",
        NOW,
        "--config",
        config_path(),
    ]);
    let blocks = days[0]["blocks"].as_array().unwrap();
    // Window 08:00-20:00 at 40px per hour; the late deploy is outside it.
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0]["top_offset"], 40.0);
    assert_eq!(blocks[0]["height"], 20.0);
    assert_eq!(days[0]["total_height"], 480.0);
}

// ─────────────────────────────────────────────────────────────────────────────
// privacy
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn partial_hides_location_and_notes() {
    chronograph()
        .args(["day", "-i", events_path(), "--now", NOW])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dentist"))
        .stdout(predicate::str::contains("Harley").not())
        .stdout(predicate::str::contains("insurance").not());
}

#[test]
fn full_shows_location() {
    chronograph()
        .args(["day", "-i", events_path(), "--now", NOW, "--privacy", "full"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12 Harley St"))
        .stdout(predicate::str::contains("Bring insurance card"));
}

#[test]
fn opaque_shows_only_availability() {
    chronograph()
        .args(["day", "-i", events_path(), "--now", NOW, "--privacy", "opaque"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dentist").not())
        .stdout(predicate::str::contains("Team standup").not())
        .stdout(predicate::str::contains("\"Busy\""))
        .stdout(predicate::str::contains("\"Tentative\""));
}

#[test]
fn legacy_privacy_label_is_accepted() {
    chronograph()
        .args(["day", "-i", events_path(), "--now", NOW, "--privacy", "不透明模式"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dentist").not());
}

#[test]
fn system_language_follows_lang() {
    chronograph()
        .env("LANG", "zh_CN.UTF-8")
        .args(["day", "-i", events_path(), "--now", NOW, "--privacy", "opaque"])
        .assert()
        .success()
        .stdout(predicate::str::contains("忙碌"));
}

// ─────────────────────────────────────────────────────────────────────────────
// week
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn week_has_seven_columns() {
    let grid = run_json(&[
        "week", "-i", events_path(), "--now", NOW, "--range", "thisWeek", "--width", "1170",
    ]);
    assert_eq!(grid["columns"].as_array().unwrap().len(), 7);
    assert_eq!(grid["week_start"], "2026-03-16T00:00:00Z");
    let total = grid["total_height"].as_f64().unwrap();
    assert!((total - 1170.0).abs() < 1e-6, "total height {}", total);
}

#[test]
fn week_with_config_uses_base_rows() {
    let grid = run_json(&[
        "week",
        "-i",
        events_path(),
        "--now",
        NOW,
        "--width",
        "400",
        "--config",
        config_path(),
    ]);
    assert_eq!(grid["row_height"]["hour_row_height"], 50.0);
}

// ─────────────────────────────────────────────────────────────────────────────
// list
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn list_groups_week_by_day() {
    let days = run_json(&["list", "-i", events_path(), "--now", NOW, "--range", "thisWeek"]);
    let days = days.as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["placeholder"], "No events");
    assert_eq!(days[2]["is_today"], true);
    assert_eq!(days[2]["rows"].as_array().unwrap().len(), 3);
    assert_eq!(days[3]["rows"][0]["time_text"], "all-day");
}

#[test]
fn list_collapse_empty_drops_placeholder() {
    let days = run_json(&[
        "list",
        "-i",
        events_path(),
        "--now",
        NOW,
        "--range",
        "thisWeek",
        "--collapse-empty",
        "--lang",
        "zh-Hans",
    ]);
    let days = days.as_array().unwrap();
    assert!(days.iter().all(|d| d["placeholder"].is_null()));
    assert_eq!(days[3]["rows"][0]["time_text"], "全天");
}

// ─────────────────────────────────────────────────────────────────────────────
// filename
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn filename_prints_seed() {
    chronograph()
        .args(["filename", "--range", "last7Days", "--now", NOW])
        .assert()
        .success()
        .stdout("ChronoGraph_last-7-days_20260318\n");
}

#[test]
fn filename_uses_configured_app_name() {
    chronograph()
        .args(["filename", "--now", NOW, "--config", config_path()])
        .assert()
        .success()
        .stdout("TeamCal_today_20260318\n");
}

#[test]
fn filename_accepts_legacy_range() {
    chronograph()
        .args(["filename", "--range", "两周", "--now", NOW])
        .assert()
        .success()
        .stdout(predicate::str::contains("_last-14-days_"));
}

// ─────────────────────────────────────────────────────────────────────────────
// export-size
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn export_size_caps_scale_and_share_copy() {
    let plan = run_json(&[
        "export-size",
        "--content-width",
        "2000",
        "--content-height",
        "1000",
        "--scale",
        "3",
    ]);
    assert_eq!(plan["scale"], 2.0);
    assert_eq!(plan["pixel_width"], 4000.0);
    assert_eq!(plan["share_width"], 3000.0);
    assert_eq!(plan["share_height"], 1500.0);
}

#[test]
fn export_size_reads_configured_limits() {
    let plan = run_json(&[
        "export-size",
        "--content-width",
        "1000",
        "--content-height",
        "500",
        "--scale",
        "2",
        "--config",
        config_path(),
    ]);
    assert_eq!(plan["pixel_width"], 2000.0);
    assert_eq!(plan["share_width"], 1000.0);
    assert_eq!(plan["share_height"], 500.0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn invalid_timezone_fails() {
    chronograph()
        .args(["day", "-i", events_path(), "--tz", "Mars/Olympus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --tz"));
}

#[test]
fn unknown_range_fails() {
    chronograph()
        .args(["filename", "--range", "fortnight"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown range"));
}

#[test]
fn malformed_json_fails() {
    chronograph()
        .arg("day")
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse events JSON"));
}

#[test]
fn missing_input_file_fails() {
    chronograph()
        .args(["day", "-i", "/nonexistent/events.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn from_without_to_is_rejected() {
    chronograph()
        .args(["day", "-i", events_path(), "--from", "2026-03-18T00:00:00Z"])
        .assert()
        .failure();
}
