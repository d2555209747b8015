//! CLI smoke tests: run the compiled binary and check exit codes and output.
//!
//! No network access required; units use local commands only.

use std::process::Command;

/// Helper: run launchseq with given args and return (exit_code, stdout, stderr).
fn run_cli(args: &[&str]) -> (i32, String, String) {
    let bin = env!("CARGO_BIN_EXE_launchseq");
    let output = Command::new(bin)
        .args(args)
        .env("RUST_LOG", "") // suppress tracing noise
        .output()
        .expect("failed to execute launchseq binary");
    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (code, stdout, stderr)
}

fn write_config(dir: &tempfile::TempDir, body: &str) -> String {
    let path = dir.path().join("config.json");
    std::fs::write(&path, body).unwrap();
    path.display().to_string()
}

// ============================================================================
// Help & Version
// ============================================================================

#[test]
fn cli_no_args_shows_help() {
    let (code, stdout, _stderr) = run_cli(&[]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("launchseq"));
}

#[test]
fn cli_help_flag() {
    let (code, stdout, _stderr) = run_cli(&["--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Commands:"));
    assert!(stdout.contains("exec"));
    assert!(stdout.contains("run"));
}

#[test]
fn cli_version_command() {
    let (code, stdout, _stderr) = run_cli(&["version"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("launchseq"));
    assert!(stdout.contains('.'));
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn cli_config_check_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.json").display().to_string();
    let (code, stdout, _stderr) = run_cli(&["--config", &path, "config", "check"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("No config file found"));
}

#[test]
fn cli_config_check_valid() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"{"units": [{"type": "command", "name": "ok", "command": "true"}]}"#,
    );
    let (code, stdout, _stderr) = run_cli(&["config", "check", "--config", &path]);
    assert_eq!(code, 0, "stdout: {stdout}");
    assert!(stdout.contains("Configuration looks good!"));
}

#[test]
fn cli_config_check_reports_unknown_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, r#"{"unitz": []}"#);
    let (code, stdout, _stderr) = run_cli(&["--config", &path, "config", "check"]);
    assert_ne!(code, 0);
    assert!(stdout.contains("[ERROR] unitz"));
}

// ============================================================================
// Run & Exec
// ============================================================================

#[test]
fn cli_run_without_units() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "{}");
    let (code, stdout, _stderr) = run_cli(&["--config", &path, "run"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("No units configured"));
}

#[cfg(unix)]
#[test]
fn cli_run_launches_units_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("order.txt").display().to_string();
    let body = serde_json::json!({
        "units": [
            {"type": "command", "name": "first", "command": "sh",
             "args": ["-c", format!("echo first >> {marker}")]},
            {"type": "command", "name": "second", "command": "sh",
             "args": ["-c", format!("echo second >> {marker}")]}
        ]
    });
    let path = write_config(&dir, &body.to_string());
    let (code, stdout, _stderr) = run_cli(&["--config", &path, "run"]);
    assert_eq!(code, 0, "stdout: {stdout}");
    assert!(stdout.contains("All 2 unit(s) launched"));
    let order = std::fs::read_to_string(&marker).unwrap();
    assert_eq!(order, "first\nsecond\n");
}

#[cfg(unix)]
#[test]
fn cli_exec_true() {
    let (code, stdout, _stderr) = run_cli(&["exec", "--name", "noop", "--", "true"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("noop launched"));
}

#[cfg(unix)]
#[test]
fn cli_exec_retries_until_success() {
    // Fails on the first run, succeeds once the marker exists.
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("seen").display().to_string();
    let script = format!("test -f {marker} || {{ touch {marker}; exit 1; }}");
    let (code, stdout, _stderr) = run_cli(&[
        "exec",
        "--name",
        "flaky",
        "--interval-secs",
        "1",
        "--",
        "sh",
        "-c",
        &script,
    ]);
    assert_eq!(code, 0);
    assert!(stdout.contains("flaky launched"));
}

#[test]
fn cli_exec_requires_command() {
    let (code, _stdout, stderr) = run_cli(&["exec", "--name", "nothing"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("required"));
}
