#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::process::Command;

use tempfile::TempDir;

fn lsw() -> Command {
    Command::new(env!("CARGO_BIN_EXE_lsw"))
}

/// Run inside an empty temp dir so no repo-local `.lsw/` leaks in.
fn lsw_in(dir: &TempDir) -> Command {
    let mut cmd = lsw();
    cmd.current_dir(dir.path());
    cmd
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

// --- lsw scan ---

#[test]
fn scan_abcabcbb() {
    let output = lsw().args(["scan", "abcabcbb"]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_of(&output).trim(), "3  \"abc\"");
}

#[test]
fn scan_bbbbb() {
    let output = lsw().args(["scan", "bbbbb"]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_of(&output).trim(), "1  \"b\"");
}

#[test]
fn scan_pwwkew() {
    let output = lsw().args(["scan", "pwwkew"]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_of(&output).trim(), "3  \"wke\"");
}

#[test]
fn scan_empty_input() {
    let output = lsw().args(["scan", ""]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_of(&output).trim(), "0  \"\"");
}

#[test]
fn scan_json() {
    let output = lsw().args(["scan", "--json", "dvdf"]).output().unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["best_length"], 3);
    assert_eq!(json["best_window"], "vdf");
    assert_eq!(json["steps"], 4);
}

#[test]
fn scan_preset() {
    let tmp = TempDir::new().unwrap();
    let output = lsw_in(&tmp)
        .args(["scan", "--preset", "tricky/tmmzuxt"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_of(&output).trim(), "5  \"mzuxt\"");
}

#[test]
fn scan_unknown_preset_fails() {
    let tmp = TempDir::new().unwrap();
    let output = lsw_in(&tmp)
        .args(["scan", "--preset", "no/such/preset"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("preset not found"), "stderr: {stderr}");
}

#[test]
fn scan_without_input_fails() {
    let output = lsw().args(["scan"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no input"), "stderr: {stderr}");
}

#[test]
fn scan_timing_reports_on_stderr() {
    let output = lsw().args(["scan", "--timing", "abc"]).output().unwrap();
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[lsw] scan took"), "stderr: {stderr}");
}

// --- lsw step ---

#[test]
fn step_prints_one_line_per_frame() {
    let tmp = TempDir::new().unwrap();
    let output = lsw_in(&tmp).args(["step", "abca"]).output().unwrap();
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    // initial frame + 4 steps + summary
    assert_eq!(lines.len(), 6, "stdout: {stdout}");
    assert!(lines[0].contains("[]abca"));
    assert!(lines[4].contains("a[bca]"));
    assert!(lines[4].contains("dup 'a' (seen at 0)"));
    assert!(lines[4].ends_with("done"));
    assert_eq!(lines[5], "best: 3  \"abc\"");
}

#[test]
fn step_shows_seen_map_when_configured() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join(".lsw")).unwrap();
    fs::write(tmp.path().join(".lsw/config.toml"), "show_seen = true\n").unwrap();
    let output = lsw_in(&tmp).args(["step", "ab"]).output().unwrap();
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("seen: a:0 b:1"), "stdout: {stdout}");
}

#[test]
fn step_json_trace() {
    let output = lsw().args(["step", "--json", "bbbbb"]).output().unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["frames"].as_array().unwrap().len(), 6);
    assert_eq!(json["best_length"], 1);
    assert_eq!(json["frames"][5]["duplicate"]["symbol"], "b");
}

#[test]
fn step_invalid_config_fails() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join(".lsw")).unwrap();
    fs::write(tmp.path().join(".lsw/config.toml"), "show_seen = 3\n").unwrap();
    let output = lsw_in(&tmp).args(["step", "ab"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to parse settings file"), "stderr: {stderr}");
}

// --- lsw play ---

#[test]
fn play_runs_to_completion() {
    let tmp = TempDir::new().unwrap();
    let output = lsw_in(&tmp)
        .args(["play", "--delay-ms", "0", "pwwkew"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert_eq!(stdout.lines().count(), 8, "stdout: {stdout}");
    assert!(stdout.trim_end().ends_with("best: 3"));
}

#[test]
fn play_max_steps_stops_early() {
    let tmp = TempDir::new().unwrap();
    let output = lsw_in(&tmp)
        .args(["play", "--delay-ms", "0", "--max-steps", "2", "abcdef"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(
        stdout.contains("stopped after 2 steps, best so far: 2"),
        "stdout: {stdout}"
    );
}

// --- lsw verify ---

#[test]
fn verify_literal_input() {
    let output = lsw().args(["verify", "abcabcbb"]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_of(&output).trim(), "ok: 3");
}

#[test]
fn verify_builtin_preset() {
    let tmp = TempDir::new().unwrap();
    let output = lsw_in(&tmp)
        .args(["verify", "--preset", "unicode/accents"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_of(&output).trim(), "ok: 7");
}

#[test]
fn verify_wrong_expected_fails() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join(".lsw/presets")).unwrap();
    fs::write(
        tmp.path().join(".lsw/presets/wrong.toml"),
        "input = \"abc\"\nexpected = 2\n",
    )
    .unwrap();
    let output = lsw_in(&tmp)
        .args(["verify", "--preset", "wrong"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("expected=2"), "stderr: {stderr}");
}

// --- lsw config ---

#[test]
fn config_shows_local_settings() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join(".lsw")).unwrap();
    fs::write(tmp.path().join(".lsw/config.toml"), "delay_ms = 25\n").unwrap();
    let output = lsw_in(&tmp).args(["config"]).output().unwrap();
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("delay_ms = 25"), "stdout: {stdout}");
    assert!(stdout.contains(".lsw"), "stdout: {stdout}");
}

#[test]
fn unknown_subcommand_fails() {
    let output = lsw().args(["frobnicate"]).output().unwrap();
    assert!(!output.status.success());
}
