//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with a throwaway config directory and
//! verify its outputs.

mod common;

use common::{assert_contains, parse_json, run_cli_failure, run_cli_success};
use serde_json::Value;

fn config_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("tempdir")
}

#[test]
fn test_profile_list_json() {
    let dir = config_dir();
    let out = run_cli_success(dir.path(), &["profile", "list", "--json"]);
    let profiles: Vec<Value> = parse_json(&out);
    let names: Vec<&str> = profiles.iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["BEGINNER", "INTERMEDIATE", "PRO", "CUSTOM"]);
    assert_eq!(profiles[1]["work_secs"], 1500);
}

#[test]
fn test_profile_show_unknown_fails() {
    let dir = config_dir();
    let (_, stderr, _) = run_cli_failure(dir.path(), &["profile", "show", "expert"]);
    assert_contains(&stderr, "Unknown profile");
}

#[test]
fn test_profile_set_custom_persists() {
    let dir = config_dir();
    run_cli_success(
        dir.path(),
        &["profile", "set-custom", "--work", "40", "--cycles", "2"],
    );
    let out = run_cli_success(dir.path(), &["profile", "show", "custom"]);
    let profile: Value = parse_json(&out);
    assert_eq!(profile["work_secs"], 2400);
    assert_eq!(profile["short_break_secs"], 300);
    assert_eq!(profile["cycles_per_long_break"], 2);
}

#[test]
fn test_profile_set_custom_rejects_zero() {
    let dir = config_dir();
    let (_, stderr, _) = run_cli_failure(dir.path(), &["profile", "set-custom", "--work", "0"]);
    assert_contains(&stderr, "work_min");
}

#[test]
fn test_config_get_and_set() {
    let dir = config_dir();
    let out = run_cli_success(dir.path(), &["config", "get", "custom.work_min"]);
    assert_eq!(out.trim(), "25");

    run_cli_success(dir.path(), &["config", "set", "timer.default_profile", "PRO"]);
    let out = run_cli_success(dir.path(), &["config", "get", "timer.default_profile"]);
    assert_eq!(out.trim(), "PRO");

    run_cli_success(dir.path(), &["config", "set", "timer.default_profile", "beginner"]);
    let out = run_cli_success(dir.path(), &["config", "get", "timer.default_profile"]);
    assert_eq!(out.trim(), "BEGINNER");

    run_cli_failure(dir.path(), &["config", "set", "custom.work_min", "0"]);
    run_cli_failure(dir.path(), &["config", "get", "custom.unknown"]);
}

#[test]
fn test_simulate_requires_task() {
    let dir = config_dir();
    let (_, stderr, _) = run_cli_failure(dir.path(), &["timer", "simulate", "--ticks", "5"]);
    assert_contains(&stderr, "No task selected");
}

#[test]
fn test_simulate_first_work_phase() {
    let dir = config_dir();
    let out = run_cli_success(
        dir.path(),
        &[
            "timer",
            "simulate",
            "--profile",
            "intermediate",
            "--task",
            "T1",
            "--ticks",
            "1500",
        ],
    );
    let snapshot: Value = parse_json(&out);
    assert_eq!(snapshot["type"], "StateSnapshot");
    assert_eq!(snapshot["state"]["phase"], "SHORT_BREAK");
    assert_eq!(snapshot["state"]["remaining_secs"], 480);
    assert_eq!(snapshot["state"]["completed_cycles"], 1);
    assert_eq!(snapshot["task_sessions"], 1);
}

#[test]
fn test_simulate_uses_configured_default_profile() {
    let dir = config_dir();
    run_cli_success(dir.path(), &["config", "set", "timer.default_profile", "BEGINNER"]);
    let out = run_cli_success(dir.path(), &["timer", "simulate", "--task", "T1"]);
    let snapshot: Value = parse_json(&out);
    assert_eq!(snapshot["profile"], "BEGINNER");
    assert_eq!(snapshot["state"]["remaining_secs"], 600);
}

#[test]
fn test_run_stops_after_requested_cycles() {
    let dir = config_dir();
    run_cli_success(
        dir.path(),
        &["profile", "set-custom", "--work", "1", "--short-break", "1"],
    );
    run_cli_success(dir.path(), &["config", "set", "notifications.enabled", "false"]);
    let out = run_cli_success(
        dir.path(),
        &[
            "timer", "run", "--task", "T1", "--profile", "custom", "--cycles", "1", "--tick-ms",
            "1", "--json",
        ],
    );
    let events: Vec<Value> = out.lines().map(|l| parse_json(l)).collect();
    let completed: Vec<&Value> = events
        .iter()
        .filter(|e| e["type"] == "PhaseCompleted")
        .collect();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0]["credited_task"], "T1");
    assert_eq!(events.last().unwrap()["type"], "TimerStopped");
}

#[test]
fn test_run_rejects_zero_cycles() {
    let dir = config_dir();
    let (stdout, stderr, _) = run_cli_failure(
        dir.path(),
        &["timer", "run", "--task", "T1", "--cycles", "0", "--tick-ms", "1"],
    );
    assert_contains(&stderr, "--cycles must be positive");
    assert!(stdout.is_empty());
}

#[test]
fn test_profile_list_plain_names_profiles() {
    let dir = config_dir();
    let out = run_cli_success(dir.path(), &["profile", "list"]);
    assert_contains(&out, "* INTERMEDIATE");
    assert_contains(&out, "Beginner: Perfect for getting started");
}

#[test]
fn test_run_rejects_task_missing_from_focus_list() {
    let dir = config_dir();
    let tasks = dir.path().join("tasks.json");
    std::fs::write(
        &tasks,
        r#"[{"id":"A","title":"Essay","status":"TO_DO"},{"id":"B","title":"Old","status":"COMPLETED"}]"#,
    )
    .unwrap();
    let tasks = tasks.to_str().unwrap();

    let (_, stderr, _) = run_cli_failure(
        dir.path(),
        &["timer", "run", "--task", "B", "--tasks", tasks, "--tick-ms", "1"],
    );
    assert_contains(&stderr, "not on today's focus list");

    let out = run_cli_success(dir.path(), &["tasks", "list", "--file", tasks, "--all"]);
    assert_contains(&out, "Today's focus tasks (1)");
    assert_contains(&out, "[B] Old");
}
